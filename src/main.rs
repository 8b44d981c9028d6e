//! resume-matcher: resume and job description matching tool

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, warn};
use resume_matcher::cli::{self, Cli, Commands, ConfigAction, PromptKind};
use resume_matcher::config::Config;
use resume_matcher::input::InputManager;
use resume_matcher::output::formatter::{save_report_to_file, suggest_filename};
use resume_matcher::output::{EvaluationRenderer, ReportGenerator};
use resume_matcher::response::contracts::from_json;
use resume_matcher::response::{
    classify_evaluation, format_evaluation, parse_question_blocks, EvaluationResponse,
    MatchResponse, QuestionSet,
};
use resume_matcher::service::{PromptParams, PromptTemplates, QuestionCount};
use resume_matcher::{MatchAnalyzer, ResumeMatcherError};
use std::path::{Path, PathBuf};
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = if cli.command.skips_config_load() {
        Ok(Config::default())
    } else {
        match &cli.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    };
    let config = match config {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config, cli.config).await {
        error!("Command failed: {:#}", e);
        process::exit(1);
    }
}

async fn run_command(
    command: Commands,
    config: Config,
    config_path: Option<PathBuf>,
) -> Result<()> {
    match command {
        Commands::Match {
            resume,
            job,
            response,
            output,
            save,
            detailed,
        } => {
            info!("Starting resume match analysis");

            let output_format = match output {
                Some(format) => {
                    cli::parse_output_format(&format).map_err(ResumeMatcherError::InvalidInput)?
                }
                None => config.output.format,
            };

            let mut input_manager = InputManager::new();
            let (resume_text, job_text) = read_pair(&mut input_manager, &resume, &job).await?;

            let response = match response {
                Some(path) => {
                    let content = std::fs::read_to_string(&path).with_context(|| {
                        format!("Failed to read service response {}", path.display())
                    })?;
                    let parsed = from_json::<MatchResponse>(&content).with_context(|| {
                        format!("Invalid service response in {}", path.display())
                    })?;
                    Some(parsed)
                }
                None => None,
            };

            let analyzer = MatchAnalyzer::new(&config).context("Failed to build analyzer")?;
            let report = analyzer.analyze(&resume_text, &job_text, response.as_ref());

            let mut output_config = config.output.clone();
            output_config.detailed |= detailed;
            let generator = ReportGenerator::from_config(&output_config);
            let rendered = generator.generate_report(&report, &output_format)?;

            match save {
                Some(path) => {
                    let path = if path.is_dir() {
                        path.join(suggest_filename(&output_format, &resume.to_string_lossy(), true))
                    } else {
                        path
                    };
                    save_report_to_file(&rendered, &path)
                        .with_context(|| format!("Failed to save report to {}", path.display()))?;
                    info!("Report saved to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }

        Commands::Questions { file, text } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let analyzer = MatchAnalyzer::new(&config)?;

            let questions = if text {
                analyzer.normalizer().normalize_raw(&parse_question_blocks(&content))
            } else {
                let raw: serde_json::Value = from_json(&content)
                    .with_context(|| format!("Invalid question list in {}", file.display()))?;
                analyzer.questions(&raw)
            };

            let questions = QuestionSet::new(questions);
            if questions.is_empty() {
                warn!("No usable questions found in {}", file.display());
            }
            println!("{}", serde_json::to_string_pretty(&questions)?);
        }

        Commands::Evaluate { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;

            let is_json = file
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            let text = if is_json {
                let response: EvaluationResponse = from_json(&content)?;
                match MatchAnalyzer::new(&config)?.evaluate(&response) {
                    Some(text) => text,
                    None => {
                        warn!("Evaluation field is missing or not text");
                        return Ok(());
                    }
                }
            } else {
                format_evaluation(&content)
            };

            let renderer = EvaluationRenderer::new(config.output.color_output);
            println!("{}", renderer.render(&classify_evaluation(&text)));
        }

        Commands::Prompt {
            resume,
            job,
            kind,
            question,
            answer,
        } => {
            let mut input_manager = InputManager::new();
            let (resume_content, job_content) = read_pair(&mut input_manager, &resume, &job).await?;
            let params = PromptParams {
                resume_content,
                job_content,
            };

            let templates = PromptTemplates::default();
            let counts = QuestionCount::default();
            let prompt = match kind {
                PromptKind::Match => templates.render_match(&params),
                PromptKind::Questions => templates.render_questions(&params, &counts),
                PromptKind::More => templates.render_more_questions(&params, &counts),
                PromptKind::Evaluate => {
                    let question =
                        question.context("--question is required for evaluation prompts")?;
                    let answer = answer.context("--answer is required for evaluation prompts")?;
                    templates.render_evaluation(&params, &question, &answer)
                }
            };
            println!("{}", prompt);
        }

        Commands::Config { action } => {
            let path = config_path.unwrap_or_else(Config::config_path);
            match action {
                Some(ConfigAction::Show) | None => {
                    println!("Configuration: {}\n", path.display());
                    let weights = &config.scoring.weights;
                    println!("Scoring Weights:");
                    println!("  Skills: {:.1}%", weights.skills * 100.0);
                    println!("  Experience: {:.1}%", weights.experience * 100.0);
                    println!("  Education: {:.1}%", weights.education * 100.0);
                    println!("  Keywords: {:.1}%", weights.keywords * 100.0);
                    println!("\nSkill vocabulary: {} terms", config.scoring.skill_vocabulary.len());
                    println!("Minimum keyword length: {}", config.scoring.min_keyword_len);
                    println!("Output format: {:?}", config.output.format);
                }

                Some(ConfigAction::Reset) => {
                    Config::reset_at(&path)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Configuration reset: {}", path.display());
                }

                Some(ConfigAction::Path) => println!("{}", path.display()),
            }
        }
    }

    Ok(())
}

async fn read_pair(
    input_manager: &mut InputManager,
    resume: &Path,
    job: &Path,
) -> Result<(String, String)> {
    cli::validate_file_extension(resume, cli::INPUT_EXTENSIONS)
        .map_err(|e| ResumeMatcherError::InvalidInput(format!("Resume file: {}", e)))?;
    cli::validate_file_extension(job, cli::INPUT_EXTENSIONS)
        .map_err(|e| ResumeMatcherError::InvalidInput(format!("Job description file: {}", e)))?;

    let resume_text = input_manager
        .extract_text(resume)
        .await
        .with_context(|| format!("Failed to read resume {}", resume.display()))?;
    let job_text = input_manager
        .extract_text(job)
        .await
        .with_context(|| format!("Failed to read job description {}", job.display()))?;

    info!(
        "Loaded resume ({} chars) and job description ({} chars)",
        resume_text.chars().count(),
        job_text.chars().count()
    );
    Ok((resume_text, job_text))
}
