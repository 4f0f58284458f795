// Creative assistant: brainstorming, caption analysis, image suggestions, localization.
// All model calls go through llm_client::ModelGateway.

pub mod composer;
pub mod handlers;
pub mod parser;
pub mod prompts;
pub mod ranking;
pub mod service;
pub mod views;
