//! Outbound side of the remote text-generation service: prompts and payloads
//!
//! Transport is left to the caller.

pub mod prompts;
pub mod requests;

pub use prompts::{PromptParams, PromptTemplates};
pub use requests::{EvaluationRequest, MatchRequest, QuestionCount};
