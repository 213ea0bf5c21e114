//! HTTP end-to-end tests: a real listener on 127.0.0.1:0 and a reqwest client.

mod ask;
mod common;
mod index;
mod upload;
