use async_trait::async_trait;

use crate::{GenError, Generator, GeneratorKind};

/// Offline generator for runs without network access and for tests.
///
/// Paraphrase prompts quote the original statement; this backend returns the
/// quoted span verbatim, so offline sessions present the canonical wording.
/// Follow-up prompts get a fixed supplementary question framed for the same
/// five-category answer set.
pub struct CannedGenerator;

const CANNED_FOLLOW_UP: &str =
    "How much has this been affecting your day-to-day life recently?";

impl CannedGenerator {
    pub fn new() -> Self {
        Self
    }

    fn quoted_span(prompt: &str) -> Option<&str> {
        let start = prompt.find('"')?;
        let rest = &prompt[start + 1..];
        let end = rest.find('"')?;
        let span = &rest[..end];
        if span.trim().is_empty() {
            None
        } else {
            Some(span)
        }
    }
}

impl Default for CannedGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Generator for CannedGenerator {
    fn name(&self) -> &str {
        "Canned"
    }

    fn kind(&self) -> GeneratorKind {
        GeneratorKind::Canned
    }

    async fn generate(&self, prompt: &str) -> Result<String, GenError> {
        if prompt.to_lowercase().contains("follow-up") {
            return Ok(CANNED_FOLLOW_UP.to_string());
        }

        match Self::quoted_span(prompt) {
            Some(span) => Ok(span.to_string()),
            None => Err(GenError::EmptyCompletion),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_canned_returns_quoted_statement() {
        let gen = CannedGenerator::new();
        let out = gen
            .generate("Rephrase the statement \"Felt overwhelmed by difficulties\" as a question.")
            .await
            .unwrap();
        assert_eq!(out, "Felt overwhelmed by difficulties");
    }

    #[tokio::test]
    async fn test_canned_follow_up_is_fixed() {
        let gen = CannedGenerator::new();
        let out = gen
            .generate("Write one follow-up question about \"family matters\".")
            .await
            .unwrap();
        assert_eq!(out, CANNED_FOLLOW_UP);
    }

    #[tokio::test]
    async fn test_canned_errors_without_quoted_span() {
        let gen = CannedGenerator::new();
        assert!(gen.generate("no quotes here").await.is_err());
    }
}
