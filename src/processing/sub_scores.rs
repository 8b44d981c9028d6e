//! Independent sub-score calculators, each returning a ratio in [0, 1]
//!
//! All inputs are expected to be lower-cased already; the aggregator does
//! that once per document.

use crate::processing::skill_extractor::SkillExtractor;
use regex::Regex;
use std::collections::HashSet;

/// Share of the job description's recognized skills that the resume also mentions
pub fn skills_ratio(extractor: &SkillExtractor, resume: &str, job: &str) -> f64 {
    let job_skills = extractor.extract(job);
    if job_skills.is_empty() {
        return 0.0;
    }

    let resume_skills: HashSet<String> = extractor.extract(resume).into_iter().collect();
    let common = job_skills
        .iter()
        .filter(|skill| resume_skills.contains(*skill))
        .count();

    common as f64 / job_skills.len() as f64
}

/// Presence-only keyword comparison, capped at 1
pub fn keyword_presence_ratio(keywords: &[String], resume: &str, job: &str) -> f64 {
    let present = |text: &str| keywords.iter().filter(|k| text.contains(k.as_str())).count();

    let job_count = present(job);
    if job_count == 0 {
        return 0.0;
    }

    (present(resume) as f64 / job_count as f64).min(1.0)
}

pub fn experience_ratio(keywords: &[String], resume: &str, job: &str) -> f64 {
    keyword_presence_ratio(keywords, resume, job)
}

pub fn education_ratio(keywords: &[String], resume: &str, job: &str) -> f64 {
    keyword_presence_ratio(keywords, resume, job)
}

/// Splits on runs of non-word characters (ASCII word class)
pub struct KeywordTokenizer {
    separator: Regex,
    min_len: usize,
}

impl KeywordTokenizer {
    pub fn new(min_len: usize) -> Self {
        Self {
            separator: Regex::new(r"[^A-Za-z0-9_]+").expect("Invalid separator regex"),
            min_len,
        }
    }

    /// Tokens longer than `min_len` characters, duplicates kept
    pub fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.separator
            .split(text)
            .filter(|token| token.chars().count() > self.min_len)
            .collect()
    }

    /// Fraction of the job description's long tokens found anywhere in the resume
    pub fn overlap_ratio(&self, resume: &str, job: &str) -> f64 {
        let tokens = self.tokenize(job);
        if tokens.is_empty() {
            return 0.0;
        }

        let matched = tokens.iter().filter(|token| resume.contains(*token)).count();
        matched as f64 / tokens.len() as f64
    }
}

pub fn keyword_overlap_ratio(min_len: usize, resume: &str, job: &str) -> f64 {
    KeywordTokenizer::new(min_len).overlap_ratio(resume, job)
}
