mod prompts;
mod rephraser;

pub use prompts::RephrasePrompts;
pub use rephraser::{RephraseError, Rephraser};
