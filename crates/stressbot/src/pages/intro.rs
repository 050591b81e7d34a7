use anyhow::Result;
use colored::Colorize;
use dialoguer::{Confirm, Input};

use stressbot_core::{ParticipantError, ParticipantInfo};

/// Intro page: study blurb plus participant intake.
///
/// Returns `None` when the participant backs out (Esc or declining to
/// retry after withholding consent).
pub fn collect_participant() -> Result<Option<ParticipantInfo>> {
    println!();
    println!("{}", "Welcome to the Stress Chatbot Study".bold());
    println!();
    println!("This study looks at how students respond to stress-related questions.");
    println!("Your responses will help improve support tools for student wellbeing.");
    println!();
    println!("{}", "The session takes about 5-10 minutes.".dimmed());
    println!();

    loop {
        let Some(student) = Confirm::new()
            .with_prompt("Are you currently a student?")
            .interact_opt()?
        else {
            return Ok(None);
        };

        let age: u8 = Input::new()
            .with_prompt("What is your age?")
            .validate_with(|input: &u8| -> Result<(), String> {
                if (ParticipantInfo::MIN_AGE..=ParticipantInfo::MAX_AGE).contains(input) {
                    Ok(())
                } else {
                    Err(format!(
                        "Age must be between {} and {}",
                        ParticipantInfo::MIN_AGE,
                        ParticipantInfo::MAX_AGE
                    ))
                }
            })
            .interact_text()?;

        let Some(consent) = Confirm::new()
            .with_prompt("I consent to my anonymous responses being used for research purposes.")
            .default(false)
            .interact_opt()?
        else {
            return Ok(None);
        };

        match ParticipantInfo::new(student, age, consent) {
            Ok(participant) => return Ok(Some(participant)),
            Err(e @ ParticipantError::ConsentRequired) => {
                eprintln!("{} {}", "⚠".bright_yellow(), e);
                let Some(retry) = Confirm::new()
                    .with_prompt("Would you like to start over?")
                    .default(true)
                    .interact_opt()?
                else {
                    return Ok(None);
                };
                if !retry {
                    return Ok(None);
                }
            }
            Err(e) => {
                // Age is validated at the input prompt; anything else restarts
                eprintln!("{} {}", "⚠".bright_yellow(), e);
            }
        }
    }
}
