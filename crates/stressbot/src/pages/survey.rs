use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Select};

use stressbot_core::{Agreement, SurveyForm, SurveyResponse};

/// Survey page: the chatbot-experience evaluation.
///
/// Returns `None` when the participant abandons the survey.
pub fn run_survey(form: &SurveyForm) -> Result<Option<SurveyResponse>> {
    println!();
    println!("{}", "Final Survey: Chatbot Experience Evaluation".bold());
    println!(
        "{}",
        "Please answer based on your experience with the chatbot you just used.".dimmed()
    );

    let scale: Vec<String> = Agreement::ALL.iter().map(|a| a.to_string()).collect();

    let mut ratings = Vec::new();
    for section in &form.sections {
        println!();
        println!("{}", section.title.bold());
        for question in &section.questions {
            let Some(choice) = Select::new()
                .with_prompt(question.text)
                .items(&scale)
                .interact_opt()?
            else {
                return Ok(None);
            };
            ratings.push((question.key.to_string(), Agreement::ALL[choice]));
        }
    }

    println!();
    println!("{}", "Section D \u{2013} Open Feedback".bold());
    let mut feedback = Vec::new();
    for question in &form.feedback {
        loop {
            let text: String = Input::new()
                .with_prompt(question.text)
                .allow_empty(true)
                .interact_text()?;
            if text.trim().is_empty() {
                eprintln!(
                    "{} Please write a short answer before continuing.",
                    "⚠".bright_yellow()
                );
                continue;
            }
            feedback.push((question.key.to_string(), text));
            break;
        }
    }

    let response = SurveyResponse::new(form, ratings, feedback)?;
    Ok(Some(response))
}
