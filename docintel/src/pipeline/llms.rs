//! One generation client per LLM-backed stage.

use std::sync::Arc;

use async_openai::config::OpenAIConfig;

use crate::llm::{ChatOpenAI, LlmClient};

use super::PipelineConfig;

/// Stage temperatures: planning and analysis stay focused, writing gets a little more room,
/// critique is the most deterministic.
pub const PLANNER_TEMPERATURE: f32 = 0.3;
pub const ANALYST_TEMPERATURE: f32 = 0.3;
pub const WRITER_TEMPERATURE: f32 = 0.4;
pub const CRITIC_TEMPERATURE: f32 = 0.2;

/// Generation clients for planner, analyst, writer and critic.
#[derive(Clone)]
pub struct PipelineLlms {
    pub planner: Arc<dyn LlmClient>,
    pub analyst: Arc<dyn LlmClient>,
    pub writer: Arc<dyn LlmClient>,
    pub critic: Arc<dyn LlmClient>,
}

impl PipelineLlms {
    /// Same client for every stage.
    pub fn uniform(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            planner: llm.clone(),
            analyst: llm.clone(),
            writer: llm.clone(),
            critic: llm,
        }
    }

    /// `ChatOpenAI` clients with per-stage temperature and the configured model and timeout.
    pub fn openai(config: &PipelineConfig) -> Self {
        let openai_config = openai_config(config);
        let client = |temperature: f32| -> Arc<dyn LlmClient> {
            Arc::new(
                ChatOpenAI::with_config(openai_config.clone(), config.model.clone())
                    .with_temperature(temperature)
                    .with_timeout(config.llm_timeout),
            )
        };
        Self {
            planner: client(PLANNER_TEMPERATURE),
            analyst: client(ANALYST_TEMPERATURE),
            writer: client(WRITER_TEMPERATURE),
            critic: client(CRITIC_TEMPERATURE),
        }
    }
}

/// OpenAI client config from the pipeline config; unset fields keep the library defaults
/// (`OPENAI_API_KEY` from the environment, public API base).
pub fn openai_config(config: &PipelineConfig) -> OpenAIConfig {
    let mut openai = OpenAIConfig::new();
    if let Some(key) = &config.openai_api_key {
        openai = openai.with_api_key(key.clone());
    }
    if let Some(base) = &config.openai_base_url {
        openai = openai.with_api_base(base.clone());
    }
    openai
}
