//! docintel CLI binary: serve the HTTP API, answer a question over local files, or print the
//! workflow graph.
//!
//! Subcommands: `serve`, `ask`, `graph`.

mod log_format;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cli::{build_service, index_documents, render_answer, render_graph, ServiceOptions};
use docintel::PipelineConfig;

#[derive(Parser, Debug)]
#[command(name = "docintel")]
#[command(about = "docintel: answer questions over a document with a planner/analyst/writer/critic pipeline")]
struct Args {
    #[command(subcommand)]
    cmd: Command,

    /// Offline mode: hash embeddings and an echo model; no API key or network needed
    #[arg(long, global = true)]
    offline: bool,

    /// Verbose: print node enter/exit around every stage
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Prompt override directory (default: PROMPTS_DIR or ./prompts)
    #[arg(long, global = true, value_name = "DIR")]
    prompts_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (GET /, POST /upload, POST /ask)
    Serve(ServeArgs),
    /// Index local documents and answer one question
    Ask(AskArgs),
    /// Print the workflow graph
    Graph(GraphArgs),
}

#[derive(clap::Args, Debug)]
struct ServeArgs {
    /// Listen address (default: DOCINTEL_ADDR or 127.0.0.1:8000)
    #[arg(long, value_name = "ADDR")]
    addr: Option<String>,
}

#[derive(clap::Args, Debug)]
struct AskArgs {
    /// Document to index (.pdf, .txt, .md); repeatable, the last one is searched
    #[arg(short, long = "doc", value_name = "FILE", required = true)]
    docs: Vec<PathBuf>,

    /// Output the answer as JSON
    #[arg(long)]
    json: bool,

    /// The question
    #[arg(required = true, trailing_var_arg = true)]
    question: Vec<String>,
}

#[derive(clap::Args, Debug)]
struct GraphArgs {
    /// Graphviz DOT instead of a text listing
    #[arg(long)]
    dot: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    config::load_and_apply("docintel", None::<&std::path::Path>).ok();
    logging::init()?;

    let args = Args::parse();
    let pipeline_config = PipelineConfig::from_env();
    // `graph` never calls a model, so it never needs a key.
    let options = ServiceOptions {
        offline: args.offline || matches!(args.cmd, Command::Graph(_)),
        verbose: args.verbose,
        prompts_dir: args.prompts_dir.clone(),
    };

    let service = match build_service(&pipeline_config, &options) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("docintel: {}", e);
            std::process::exit(1);
        }
    };

    match args.cmd {
        Command::Serve(sa) => {
            if let Err(e) = serve::run_serve(sa.addr.as_deref(), service).await {
                eprintln!("serve error: {}", e);
                std::process::exit(1);
            }
        }
        Command::Ask(aa) => {
            if let Err(e) = index_documents(&service, &aa.docs).await {
                eprintln!("docintel: {}", e);
                std::process::exit(1);
            }
            let question = aa.question.join(" ");
            match service.ask(&question).await {
                Ok(resp) => println!("{}", render_answer(&resp, aa.json)),
                Err(e) => {
                    eprintln!("docintel: {} ({})", e, e.kind());
                    std::process::exit(1);
                }
            }
        }
        Command::Graph(ga) => {
            print!("{}", render_graph(&service, ga.dot));
        }
    }
    Ok(())
}
