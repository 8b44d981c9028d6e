//! Output formatters for the merged match report

use crate::config::{OutputConfig, OutputFormat};
use crate::error::{Result, ResumeMatcherError};
use crate::output::report::MatchReport;
use crate::response::{Difficulty, FeedbackLine};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for formatting match reports
pub trait OutputFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Terminal formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    formatters: Vec<Box<dyn OutputFormatter>>,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Match Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container { background: white; padding: 30px; border-radius: 8px; }
        .score-badge {
            display: inline-block;
            padding: 8px 16px;
            border-radius: 20px;
            font-weight: bold;
            color: white;
        }
        .score-strong { background: #28a745; }
        .score-good { background: #17a2b8; }
        .score-partial { background: #ffc107; color: #000; }
        .score-weak { background: #dc3545; }
        .section h2 { color: #007acc; border-bottom: 2px solid #e9ecef; padding-bottom: 10px; }
        .difficulty { font-size: 0.8em; text-transform: uppercase; color: #6c757d; }
        .metadata {
            font-size: 0.9em;
            color: #6c757d;
            border-top: 1px solid #e9ecef;
            margin-top: 30px;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Resume Match Report</h1>
            <p>
                <strong>Match Score:</strong> {{ score }}%
                <span class="score-badge {{ score_class }}">{{ verdict }}</span>
            </p>
            {% if has_reported_score %}
            <p><strong>Service-reported score:</strong> {{ reported_score }}%</p>
            {% endif %}
        </div>

        <div class="section">
            <h2>Score Breakdown</h2>
            <ul>
                <li>Skills: {{ skills }}%</li>
                <li>Experience: {{ experience }}%</li>
                <li>Education: {{ education }}%</li>
                <li>Keywords: {{ keywords }}%</li>
            </ul>
        </div>

        <div class="section">
            <h2>Qualified Skills</h2>
            <ul>
                {% for skill in qualified_skills %}
                <li>{{ skill }}</li>
                {% endfor %}
            </ul>
        </div>

        <div class="section">
            <h2>Missing Skills</h2>
            <ul>
                {% for skill in missing_skills %}
                <li>{{ skill }}</li>
                {% endfor %}
            </ul>
        </div>

        <div class="section">
            <h2>Compatibility Analysis</h2>
            <p>{{ analysis }}</p>
        </div>

        {% if has_questions %}
        <div class="section">
            <h2>Interview Questions</h2>
            <ol>
                {% for question in questions %}
                <li><span class="difficulty">{{ question.label }}</span> {{ question.text }}</li>
                {% endfor %}
            </ol>
        </div>
        {% endif %}

        <div class="metadata">
            <p>Generated by resume-matcher v{{ version }} on {{ generated_at }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlTemplate {
    include_styles: bool,
    score: String,
    score_class: String,
    verdict: String,
    has_reported_score: bool,
    reported_score: u8,
    skills: u32,
    experience: u32,
    education: u32,
    keywords: u32,
    qualified_skills: Vec<String>,
    missing_skills: Vec<String>,
    analysis: String,
    has_questions: bool,
    questions: Vec<HtmlQuestion>,
    version: String,
    generated_at: String,
}

#[derive(Debug, Clone)]
struct HtmlQuestion {
    label: &'static str,
    text: String,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_score_badge(&self, report: &MatchReport) -> String {
        let color = match report.score_value() {
            80..=100 => Color::Green,
            60..=79 => Color::BrightGreen,
            40..=59 => Color::Yellow,
            _ => Color::Red,
        };
        let badge = report.verdict().to_uppercase();

        if self.use_colors {
            format!("[{}]", badge.color(color).bold())
        } else {
            format!("[{}]", badge)
        }
    }

    fn format_list(&self, items: &[String], marker: &str, color: Color) -> String {
        items
            .iter()
            .map(|item| format!("  {} {}\n", self.colorize(marker, color), item))
            .collect()
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME MATCH ANALYSIS", 1));
        output.push_str(&format!(
            "Match Score: {}% {}\n",
            report.score,
            self.format_score_badge(report)
        ));
        if let Some(reported) = report.reported_score {
            output.push_str(&format!("Service-reported score: {}%\n", reported));
        }

        output.push_str(&self.format_header("Score Breakdown", 3));
        let breakdown = &report.breakdown;
        output.push_str(&format!("Skills:     {:>3}%\n", breakdown.skills));
        output.push_str(&format!("Experience: {:>3}%\n", breakdown.experience));
        output.push_str(&format!("Education:  {:>3}%\n", breakdown.education));
        output.push_str(&format!("Keywords:   {:>3}%\n", breakdown.keywords));

        output.push_str(&self.format_header("Qualified Skills", 2));
        output.push_str(&self.format_list(&report.qualified_skills, "✓", Color::Green));

        output.push_str(&self.format_header("Missing Skills", 2));
        output.push_str(&self.format_list(&report.missing_skills, "✗", Color::Red));

        output.push_str(&self.format_header("Compatibility Analysis", 2));
        output.push_str(&report.analysis);
        output.push('\n');

        if !report.interview_questions.is_empty() {
            output.push_str(&self.format_header("Interview Questions", 2));
            for difficulty in Difficulty::ALL {
                let questions = report.interview_questions.by_difficulty(difficulty);
                if questions.is_empty() {
                    continue;
                }
                output.push_str(&format!("{}\n", self.colorize(difficulty.label(), Color::Cyan)));
                for (i, question) in questions.iter().enumerate() {
                    output.push_str(&format!("  {}. {}\n", i + 1, question.question));
                }
            }
        }

        if self.detailed {
            output.push_str(&self.format_header("Details", 3));
            output.push_str(&format!(
                "Generated: {}\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ));
            output.push_str(&format!("Version: {}\n", report.metadata.version));
            let source = if report.metadata.local_only {
                "local heuristics only"
            } else {
                "local heuristics + service response"
            };
            output.push_str(&format!("Source: {}\n", source));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Resume Match Report\n\n");
        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Version:** {}\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.version
            ));
        }

        output.push_str(&format!("**Match Score:** {}% ({})\n\n", report.score, report.verdict()));
        if let Some(reported) = report.reported_score {
            output.push_str(&format!("**Service-reported score:** {}%\n\n", reported));
        }

        output.push_str("## Score Breakdown\n\n");
        output.push_str("| Component | Score |\n");
        output.push_str("|-----------|-------|\n");
        output.push_str(&format!("| Skills | {}% |\n", report.breakdown.skills));
        output.push_str(&format!("| Experience | {}% |\n", report.breakdown.experience));
        output.push_str(&format!("| Education | {}% |\n", report.breakdown.education));
        output.push_str(&format!("| Keywords | {}% |\n\n", report.breakdown.keywords));

        output.push_str("## Qualified Skills\n\n");
        for skill in &report.qualified_skills {
            output.push_str(&format!("- {}\n", skill));
        }
        output.push_str("\n## Missing Skills\n\n");
        for skill in &report.missing_skills {
            output.push_str(&format!("- {}\n", skill));
        }

        output.push_str("\n## Compatibility Analysis\n\n");
        output.push_str(&report.analysis);
        output.push_str("\n");

        if !report.interview_questions.is_empty() {
            output.push_str("\n## Interview Questions\n");
            for difficulty in Difficulty::ALL {
                let questions = report.interview_questions.by_difficulty(difficulty);
                if questions.is_empty() {
                    continue;
                }
                output.push_str(&format!("\n### {}\n\n", difficulty.label()));
                for (i, question) in questions.iter().enumerate() {
                    output.push_str(&format!("{}. {}\n", i + 1, question.question));
                }
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn create_template_data(&self, report: &MatchReport) -> HtmlTemplate {
        let score_class = match report.score_value() {
            80..=100 => "score-strong",
            60..=79 => "score-good",
            40..=59 => "score-partial",
            _ => "score-weak",
        };

        HtmlTemplate {
            include_styles: self.include_styles,
            score: report.score.clone(),
            score_class: score_class.to_string(),
            verdict: report.verdict().to_string(),
            has_reported_score: report.reported_score.is_some(),
            reported_score: report.reported_score.unwrap_or_default(),
            skills: report.breakdown.skills,
            experience: report.breakdown.experience,
            education: report.breakdown.education,
            keywords: report.breakdown.keywords,
            qualified_skills: report.qualified_skills.clone(),
            missing_skills: report.missing_skills.clone(),
            analysis: report.analysis.clone(),
            has_questions: !report.interview_questions.is_empty(),
            questions: report
                .interview_questions
                .iter()
                .map(|q| HtmlQuestion {
                    label: q.difficulty.label(),
                    text: q.question.clone(),
                })
                .collect(),
            version: report.metadata.version.clone(),
            generated_at: report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        }
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &MatchReport) -> Result<String> {
        self.create_template_data(report)
            .render()
            .map_err(|e| ResumeMatcherError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        detailed: bool,
        pretty_json: bool,
        include_metadata: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            formatters: vec![
                Box::new(ConsoleFormatter::new(use_colors, detailed)),
                Box::new(JsonFormatter::new(pretty_json)),
                Box::new(MarkdownFormatter::new(include_metadata)),
                Box::new(HtmlFormatter::new(include_html_styles)),
            ],
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::with_options(config.color_output, config.detailed, true, config.detailed, true)
    }

    pub fn formatter(&self, format: &OutputFormat) -> Option<&dyn OutputFormatter> {
        self.formatters
            .iter()
            .find(|f| f.supports_format() == *format)
            .map(|f| f.as_ref())
    }

    pub fn generate_report(&self, report: &MatchReport, format: &OutputFormat) -> Result<String> {
        let formatter = self.formatter(format).ok_or_else(|| {
            ResumeMatcherError::OutputFormatting(format!("No formatter for {:?} output", format))
        })?;
        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Console rendering of classified evaluation feedback
pub struct EvaluationRenderer {
    use_colors: bool,
}

impl EvaluationRenderer {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    pub fn render_line(&self, line: &FeedbackLine) -> String {
        let paint = |text: &str, color: Color| {
            if self.use_colors {
                text.color(color).bold().to_string()
            } else {
                text.to_string()
            }
        };

        match line {
            FeedbackLine::Score(score) => format!("{} {}", paint("Score:", Color::Blue), score),
            FeedbackLine::StrengthsHeader => paint("Strengths", Color::Green),
            FeedbackLine::ImprovementsHeader => paint("Areas for Improvement", Color::Yellow),
            FeedbackLine::Point(point) => format!("  • {}", point),
            FeedbackLine::Tip(tip) => format!("{} {}", paint("Tip:", Color::Cyan), tip),
        }
    }

    /// Unrecognized lines are not part of `lines` and are therefore omitted
    pub fn render(&self, lines: &[FeedbackLine]) -> String {
        lines
            .iter()
            .map(|line| self.render_line(line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
        OutputFormat::Html => "html",
    };
    format!("{}_match{}.{}", base_name, timestamp_suffix, extension)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefaultResponses;
    use crate::processing::{MatchScoreResult, ScoreBreakdown};
    use crate::response::{classify_evaluation, ParsedAnalysis, Question, QuestionSet};

    fn sample_report() -> MatchReport {
        MatchReport::new(
            MatchScoreResult {
                score: "61".to_string(),
                breakdown: ScoreBreakdown { skills: 27, experience: 30, education: 0, keywords: 4 },
            },
            ParsedAnalysis {
                missing_skills: vec!["Kubernetes".to_string()],
                qualified_skills: vec!["Python".to_string(), "React & Redux".to_string()],
                analysis: DefaultResponses::default().analysis,
            },
            QuestionSet::new(vec![
                Question { question: "What is X?".to_string(), difficulty: Difficulty::Easy },
                Question { question: "Design Y.".to_string(), difficulty: Difficulty::Hard },
            ]),
            Some(78),
            false,
        )
    }

    #[test]
    fn test_console_plain_output() {
        let output = ConsoleFormatter::new(false, false)
            .format_report(&sample_report())
            .unwrap();

        assert!(output.contains("Match Score: 61% [GOOD MATCH]"));
        assert!(output.contains("Service-reported score: 78%"));
        assert!(output.contains("✗ Kubernetes"));
        assert!(output.contains("1. Design Y."));
        assert!(!output.contains("Version:"));
    }

    #[test]
    fn test_console_detailed_output() {
        let output = ConsoleFormatter::new(false, true)
            .format_report(&sample_report())
            .unwrap();
        assert!(output.contains("Source: local heuristics + service response"));
    }

    #[test]
    fn test_json_output() {
        let output = JsonFormatter::new(false).format_report(&sample_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["score"], "61");
        assert_eq!(value["breakdown"]["skills"], 27);
        assert_eq!(value["interviewQuestions"][1]["difficulty"], "hard");
    }

    #[test]
    fn test_markdown_output() {
        let output = MarkdownFormatter::new(false).format_report(&sample_report()).unwrap();

        assert!(output.starts_with("# Resume Match Report"));
        assert!(output.contains("| Experience | 30% |"));
        assert!(output.contains("### Easy\n\n1. What is X?"));
        assert!(!output.contains("**Generated:**"));
    }

    #[test]
    fn test_html_output_escapes_content() {
        let output = HtmlFormatter::new(false).format_report(&sample_report()).unwrap();

        assert!(output.contains("<title>Resume Match Report</title>"));
        assert!(output.contains("score-good"));
        assert!(output.contains("React &amp; Redux"));
        assert!(!output.contains("<style>"));
    }

    #[test]
    fn test_generator_dispatch() {
        let generator = ReportGenerator::with_options(false, false, true, false, false);
        let report = sample_report();

        let formats = [
            OutputFormat::Console,
            OutputFormat::Json,
            OutputFormat::Markdown,
            OutputFormat::Html,
        ];
        for format in formats {
            let formatter = generator.formatter(&format).unwrap();
            assert_eq!(formatter.supports_format(), format);
        }

        let json = generator.generate_report(&report, &OutputFormat::Json).unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&json).is_ok());
        let markdown = generator.generate_report(&report, &OutputFormat::Markdown).unwrap();
        assert!(markdown.starts_with("# Resume Match Report"));
        let html = generator.generate_report(&report, &OutputFormat::Html).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        let console = generator.generate_report(&report, &OutputFormat::Console).unwrap();
        assert!(console.contains("RESUME MATCH ANALYSIS"));
    }

    #[test]
    fn test_evaluation_renderer() {
        let lines = classify_evaluation(
            "Overall Score: 8/10\nStrengths:\n• Clear\nQuestion: ignored\nQuick Tip: Slow down",
        );
        let output = EvaluationRenderer::new(false).render(&lines);

        assert_eq!(output, "Score: 8/10\nStrengths\n  • Clear\nTip: Slow down");
    }

    #[test]
    fn test_suggest_filename() {
        assert_eq!(
            suggest_filename(&OutputFormat::Json, "docs/resume.txt", false),
            "resume_match.json"
        );
        assert_eq!(suggest_filename(&OutputFormat::Html, "cv.md", false), "cv_match.html");
    }
}
