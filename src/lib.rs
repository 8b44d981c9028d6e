//! Resume matcher library
//!
//! Local heuristic scoring of a resume against a job description, plus
//! normalization of the free-form text returned by a text-generation service.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;
pub mod response;
pub mod service;

pub use analyzer::MatchAnalyzer;
pub use config::Config;
pub use error::{Result, ResumeMatcherError};
