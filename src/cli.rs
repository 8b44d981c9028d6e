//! CLI interface for the resume matcher

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// Extensions accepted for resume and job description inputs
pub const INPUT_EXTENSIONS: &[&str] = &["txt", "text", "md", "markdown", "pdf", "doc", "docx"];

#[derive(Parser)]
#[command(name = "resume-matcher")]
#[command(about = "Resume and job description matching tool")]
#[command(long_about = "Score resume compatibility with a job description and normalize \
text-generation service responses into skills, analysis and interview questions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score a resume against a job description
    Match {
        /// Path to resume file (TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Saved service response (JSON with match_score and interview_questions)
        #[arg(long)]
        response: Option<PathBuf>,

        /// Output format: console, json, markdown, html
        #[arg(short, long)]
        output: Option<String>,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Output detailed analysis
        #[arg(short, long)]
        detailed: bool,
    },

    /// Normalize a list of interview questions
    Questions {
        /// JSON array of questions, or a plain-text block layout with --text
        #[arg(short, long)]
        file: PathBuf,

        /// Treat the file as "Easy:/Medium:/Hard:" blocks
        #[arg(long)]
        text: bool,
    },

    /// Render answer-evaluation feedback
    Evaluate {
        /// JSON response with an "evaluation" field, or the raw feedback text
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Print the prompt the remote service would receive
    Prompt {
        #[arg(short, long)]
        resume: PathBuf,

        #[arg(short, long)]
        job: PathBuf,

        #[arg(short, long, value_enum, default_value = "match")]
        kind: PromptKind,

        /// Interview question, for evaluation prompts
        #[arg(long)]
        question: Option<String>,

        /// Candidate answer, for evaluation prompts
        #[arg(long)]
        answer: Option<String>,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

impl Commands {
    /// Commands that must work even when the configuration file is broken or absent
    pub fn skips_config_load(&self) -> bool {
        matches!(
            self,
            Commands::Config {
                action: Some(ConfigAction::Reset | ConfigAction::Path)
            }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PromptKind {
    Match,
    Questions,
    More,
    Evaluate,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, html",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
