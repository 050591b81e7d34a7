use anyhow::Result;
use colored::Colorize;
use dialoguer::Select;

use stressbot_core::{PromptKind, SessionRunner};
use stressbot_logging::TranscriptWriter;

use super::{bot_says, participant_says};

/// Chat page: walks the inventory one prompt at a time until the
/// questionnaire is complete.
///
/// Returns `false` when the participant abandons the session mid-chat.
pub async fn run_chat(
    runner: &mut SessionRunner<'_>,
    transcript: &TranscriptWriter,
) -> Result<bool> {
    println!();
    println!("{}", "College Student Stress Chatbot".bold());

    bot_says(
        "Hi, I'm here to check in on how you've been feeling lately. \
         Let's go through a few quick questions.",
    );

    while let Some(prompt) = runner.current_prompt().await {
        bot_says(&prompt.text);

        let labels: Vec<&str> = runner.options().iter().map(|o| o.label()).collect();
        let Some(choice) = Select::new().items(&labels).default(0).interact_opt()? else {
            return Ok(false);
        };
        let answer = runner.options()[choice];
        participant_says(answer.label());

        runner.submit(answer).await?;

        match prompt.kind {
            PromptKind::Main => {
                if let Some(record) = runner.records().get(prompt.ordinal) {
                    transcript.write_item(
                        prompt.ordinal,
                        &record.prompt,
                        &prompt.text,
                        answer.label(),
                        answer.score(),
                    );
                }
            }
            PromptKind::FollowUp => {
                transcript.write_follow_up(
                    prompt.ordinal,
                    &prompt.text,
                    answer.label(),
                    answer.score(),
                );
            }
        }
    }

    bot_says("That's all the questions! Let's continue to a short feedback survey.");
    Ok(true)
}
