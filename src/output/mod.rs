//! Report assembly and output formatting

pub mod formatter;
pub mod report;

pub use formatter::{EvaluationRenderer, OutputFormatter, ReportGenerator};
pub use report::{MatchReport, ReportMetadata};
