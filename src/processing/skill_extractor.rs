//! Fixed-vocabulary skill detection

use crate::error::Result;
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::HashSet;

/// Finds which vocabulary terms occur in a text as case-insensitive substrings
pub struct SkillExtractor {
    matcher: AhoCorasick,
    vocabulary: Vec<String>,
}

impl SkillExtractor {
    pub fn new(vocabulary: &[String]) -> Result<Self> {
        let vocabulary: Vec<String> = vocabulary
            .iter()
            .map(|term| term.to_lowercase())
            .filter(|term| !term.is_empty())
            .collect();

        // Standard semantics so overlapping search reports nested terms too
        // ("java" inside "javascript", "ai" inside "maintain")
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&vocabulary)?;

        Ok(Self { matcher, vocabulary })
    }

    /// Vocabulary terms present in `text`, in vocabulary order, each at most once
    pub fn extract(&self, text: &str) -> Vec<String> {
        let found: HashSet<usize> = self
            .matcher
            .find_overlapping_iter(&text.to_lowercase())
            .map(|m| m.pattern().as_usize())
            .collect();

        let mut seen = HashSet::new();
        self.vocabulary
            .iter()
            .enumerate()
            .filter(|(idx, term)| found.contains(idx) && seen.insert(term.as_str()))
            .map(|(_, term)| term.clone())
            .collect()
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn skill_count(&self) -> usize {
        self.vocabulary.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;

    fn default_extractor() -> SkillExtractor {
        SkillExtractor::new(&ScoringConfig::default().skill_vocabulary).unwrap()
    }

    #[test]
    fn test_extractor_creation() {
        let extractor = default_extractor();
        assert_eq!(extractor.skill_count(), 33);
    }

    #[test]
    fn test_case_insensitive_matching() {
        let extractor = default_extractor();
        let skills = extractor.extract("Built services in Python and REACT on AWS");

        assert!(skills.contains(&"python".to_string()));
        assert!(skills.contains(&"react".to_string()));
        assert!(skills.contains(&"aws".to_string()));
    }

    #[test]
    fn test_substring_matching_includes_nested_terms() {
        let extractor = default_extractor();
        let skills = extractor.extract("javascript");

        assert!(skills.contains(&"javascript".to_string()));
        assert!(skills.contains(&"java".to_string()));
    }

    #[test]
    fn test_results_follow_vocabulary_order() {
        let extractor = default_extractor();
        let skills = extractor.extract("docker, then react, then python");
        assert_eq!(skills, vec!["python", "react", "docker"]);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let extractor = default_extractor();
        let text = "Machine learning with Python, SQL and Kubernetes; agile/scrum teams";
        assert_eq!(extractor.extract(text), extractor.extract(text));
    }

    #[test]
    fn test_custom_vocabulary() {
        let extractor = SkillExtractor::new(&["Rust".to_string(), "tokio".to_string()]).unwrap();
        assert_eq!(extractor.extract("async RUST with Tokio"), vec!["rust", "tokio"]);
        assert!(extractor.extract("python").is_empty());
    }

    #[test]
    fn test_empty_text() {
        let extractor = default_extractor();
        assert!(extractor.extract("").is_empty());
    }
}
