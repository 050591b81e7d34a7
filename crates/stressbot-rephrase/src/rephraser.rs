use stressbot_gen::Generator;
use tracing::debug;

use crate::RephrasePrompts;

/// Runs the text-generation collaborator and validates what comes back.
///
/// The caller decides what a failure means (fall back to the canonical
/// wording, or skip the follow-up); this type only guarantees that a
/// successful result is a single non-empty line of text.
pub struct Rephraser<'a> {
    generator: &'a dyn Generator,
}

impl<'a> Rephraser<'a> {
    pub fn new(generator: &'a dyn Generator) -> Self {
        Self { generator }
    }

    /// Request a conversational rewording of an inventory statement.
    pub async fn paraphrase(&self, statement: &str) -> Result<String, RephraseError> {
        let prompt = RephrasePrompts::build_paraphrase_prompt(statement);
        debug!(statement, "Requesting paraphrase");
        let raw = self
            .generator
            .generate(&prompt)
            .await
            .map_err(|e| RephraseError::GenerationFailed(e.to_string()))?;
        Self::sanitize(&raw)
    }

    /// Request a single follow-up question for a high-severity answer.
    pub async fn follow_up(
        &self,
        statement: &str,
        answer_label: &str,
    ) -> Result<String, RephraseError> {
        let prompt = RephrasePrompts::build_follow_up_prompt(statement, answer_label);
        debug!(statement, answer = answer_label, "Requesting follow-up question");
        let raw = self
            .generator
            .generate(&prompt)
            .await
            .map_err(|e| RephraseError::GenerationFailed(e.to_string()))?;
        Self::sanitize(&raw)
    }

    /// Reduce model output to one clean question: take the first non-empty
    /// line, strip surrounding quotes, reject empties.
    fn sanitize(raw: &str) -> Result<String, RephraseError> {
        let line = raw
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or("");

        let line = line
            .trim_start_matches(['"', '\u{201c}'])
            .trim_end_matches(['"', '\u{201d}'])
            .trim();

        if line.is_empty() {
            return Err(RephraseError::EmptyOutput);
        }

        Ok(line.to_string())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RephraseError {
    #[error("Text generation failed: {0}")]
    GenerationFailed(String),

    #[error("Generator returned no usable text")]
    EmptyOutput,
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use stressbot_gen::{GenError, GeneratorKind};

    struct FixedGenerator(&'static str);

    #[async_trait]
    impl Generator for FixedGenerator {
        fn name(&self) -> &str {
            "Fixed"
        }

        fn kind(&self) -> GeneratorKind {
            GeneratorKind::Canned
        }

        async fn generate(&self, _prompt: &str) -> Result<String, GenError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl Generator for FailingGenerator {
        fn name(&self) -> &str {
            "Failing"
        }

        fn kind(&self) -> GeneratorKind {
            GeneratorKind::Canned
        }

        async fn generate(&self, _prompt: &str) -> Result<String, GenError> {
            Err(GenError::EmptyCompletion)
        }
    }

    #[tokio::test]
    async fn test_paraphrase_takes_first_line_and_strips_quotes() {
        let gen = FixedGenerator("\"How often have you felt overwhelmed?\"\n\nHope that helps!");
        let rephraser = Rephraser::new(&gen);
        let out = rephraser.paraphrase("Felt overwhelmed").await.unwrap();
        assert_eq!(out, "How often have you felt overwhelmed?");
    }

    #[tokio::test]
    async fn test_whitespace_only_output_is_rejected() {
        let gen = FixedGenerator("   \n  \n");
        let rephraser = Rephraser::new(&gen);
        let err = rephraser.paraphrase("Felt overwhelmed").await.unwrap_err();
        assert!(matches!(err, RephraseError::EmptyOutput));
    }

    #[tokio::test]
    async fn test_generation_failure_is_surfaced() {
        let gen = FailingGenerator;
        let rephraser = Rephraser::new(&gen);
        let err = rephraser.follow_up("Felt overwhelmed", "Often").await.unwrap_err();
        assert!(matches!(err, RephraseError::GenerationFailed(_)));
    }
}
