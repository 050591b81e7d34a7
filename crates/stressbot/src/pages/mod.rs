//! The four participant-facing pages: intro, chat, survey, thank-you.

pub mod chat;
pub mod intro;
pub mod survey;

use colored::Colorize;

/// Final page shown after the results have been recorded.
pub fn thank_you() {
    println!();
    println!("{}", "Thank You!".bold());
    println!("Your responses have been recorded.");
    println!("Thank you for participating in this study.");
    println!();
}

pub(crate) fn bot_says(text: &str) {
    println!();
    println!("{} {}", "chatbot".bright_magenta().bold(), text);
}

pub(crate) fn participant_says(text: &str) {
    println!("{} {}", "    you".bright_cyan().bold(), text);
}
