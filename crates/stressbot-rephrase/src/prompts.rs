/// Prompt templates for the text-generation collaborator
pub struct RephrasePrompts;

impl RephrasePrompts {
    /// Build the prompt that asks for a conversational rewording of an
    /// inventory statement. The statement is quoted so the reworded version
    /// stays anchored to the canonical topic.
    pub fn build_paraphrase_prompt(statement: &str) -> String {
        format!(
            r#"You are a warm, supportive wellbeing chatbot talking to a college student.

Reword the following stress-inventory statement as a single friendly question about the past month: "{statement}"

Rules:
- Keep the exact meaning of the statement. Do not add or drop topics.
- The question must be answerable with one of: Never, Rarely, Sometimes, Often, Very Often.
- Reply with the question only. No preamble, no quotes, no explanations."#
        )
    }

    /// Build the prompt that asks for a single follow-up question after a
    /// high-severity answer.
    pub fn build_follow_up_prompt(statement: &str, answer_label: &str) -> String {
        format!(
            r#"You are a warm, supportive wellbeing chatbot talking to a college student.

The student was asked about this stress-inventory statement: "{statement}"
They answered: {answer_label}

Write exactly one gentle follow-up question that explores this stressor a little further.

Rules:
- The follow-up must be answerable with one of: Never, Rarely, Sometimes, Often, Very Often.
- Do not give advice and do not diagnose.
- Reply with the question only. No preamble, no quotes, no explanations."#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paraphrase_prompt_quotes_statement() {
        let prompt = RephrasePrompts::build_paraphrase_prompt("Felt overwhelmed");
        assert!(prompt.contains("\"Felt overwhelmed\""));
        assert!(prompt.contains("Never, Rarely, Sometimes, Often, Very Often"));
    }

    #[test]
    fn test_follow_up_prompt_includes_answer() {
        let prompt = RephrasePrompts::build_follow_up_prompt("Felt overwhelmed", "Very Often");
        assert!(prompt.contains("They answered: Very Often"));
        assert!(prompt.to_lowercase().contains("follow-up"));
    }
}
