//! Prompt templates sent to the remote text-generation service
//!
//! The parsers in `response` rely on the layouts requested here.

use crate::service::requests::QuestionCount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub match_analysis: String,
    pub questions: String,
    pub more_questions: String,
    pub evaluation: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            match_analysis: MATCH_ANALYSIS_TEMPLATE.to_string(),
            questions: QUESTIONS_TEMPLATE.to_string(),
            more_questions: MORE_QUESTIONS_TEMPLATE.to_string(),
            evaluation: EVALUATION_TEMPLATE.to_string(),
        }
    }
}

/// Parameters for prompt template substitution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptParams {
    pub resume_content: String,
    pub job_content: String,
}

impl PromptTemplates {
    pub fn render_match(&self, params: &PromptParams) -> String {
        self.fill(&self.match_analysis, params)
    }

    pub fn render_questions(&self, params: &PromptParams, counts: &QuestionCount) -> String {
        self.fill_counts(self.fill(&self.questions, params), counts)
    }

    pub fn render_more_questions(&self, params: &PromptParams, counts: &QuestionCount) -> String {
        self.fill_counts(self.fill(&self.more_questions, params), counts)
    }

    pub fn render_evaluation(&self, params: &PromptParams, question: &str, answer: &str) -> String {
        self.fill(&self.evaluation, params)
            .replace("{question}", question)
            .replace("{answer}", answer)
    }

    fn fill(&self, template: &str, params: &PromptParams) -> String {
        template
            .replace("{resume}", &params.resume_content)
            .replace("{job}", &params.job_content)
    }

    fn fill_counts(&self, prompt: String, counts: &QuestionCount) -> String {
        prompt
            .replace("{easy}", &counts.easy.to_string())
            .replace("{medium}", &counts.medium.to_string())
            .replace("{hard}", &counts.hard.to_string())
            .replace("{total}", &counts.total().to_string())
    }
}

const MATCH_ANALYSIS_TEMPLATE: &str = r#"Compare the following resume and job description
and provide:
- Match Score (0-100%)
- Missing Skills
- Qualified Skills
- Compatibility Analysis in around 5 bulleted sentences.

Use these exact section labels, each followed by a colon, with one bullet (•) per item.

Resume:
{resume}

Job Description:
{job}"#;

const QUESTIONS_TEMPLATE: &str = r#"Based on the resume and job description, generate
interview questions in three difficulty levels:
Generate {easy} Easy questions: Basic concepts and fundamentals
Generate {medium} Medium questions: Intermediate concepts and practical applications
Generate {hard} Hard questions: Advanced concepts and complex problem-solving

Format your response exactly like this:
Easy:
First easy question

Medium:
First medium question

Hard:
First hard question

Resume: {resume}
Job Description: {job}"#;

const MORE_QUESTIONS_TEMPLATE: &str = r#"Generate exactly {total} new interview questions
with specific difficulty levels:
{easy} Easy questions: Basic concepts and fundamentals
{medium} Medium questions: Intermediate concepts and practical applications
{hard} Hard questions: Advanced concepts and complex problem-solving

Format your response EXACTLY like this:
Easy:
First easy question

Medium:
First medium question

Hard:
First hard question

Note: Make these questions unique and different from typical questions.
Base questions on this context:

Resume: {resume}
Job Description: {job}"#;

const EVALUATION_TEMPLATE: &str = r#"Evaluate this interview answer and provide feedback
in this exact format:

Overall Score: [Give a score out of 10]

Strengths:
• [Key strength point 1]
• [Key strength point 2]

Areas for Improvement:
• [Improvement point 1]
• [Improvement point 2]

Quick Tip: [One short, actionable improvement tip]

Question: {question}
Answer: {answer}

Resume: {resume}
Job Description: {job}

Base your evaluation on:
- Relevance to the question
- Completeness of response
- Technical accuracy
- Communication clarity"#;
