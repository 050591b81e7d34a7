mod error;
mod flow;
mod inventory;
mod likert;
mod participant;
mod runner;
mod session;
mod survey;

pub use error::FlowError;
pub use flow::{FlowState, FollowUp, ResponseRecord, Stage};
pub use inventory::{Inventory, InventoryItem};
pub use likert::Likert;
pub use participant::{ParticipantError, ParticipantInfo};
pub use runner::{CurrentPrompt, PromptKind, SessionRunner};
pub use session::CompletedSession;
pub use survey::{Agreement, SurveyError, SurveyForm, SurveyQuestion, SurveyResponse, SurveySection};
