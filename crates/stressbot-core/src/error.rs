use thiserror::Error;

/// Errors raised by the questionnaire flow controller.
///
/// None of these are fatal: every variant leaves the session state unchanged
/// and the caller free to re-prompt or retry.
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Invalid answer category: {0:?}")]
    InvalidAnswer(String),

    #[error("The questionnaire is already complete")]
    SessionComplete,

    #[error("A follow-up answer for item {0} is still outstanding")]
    FollowUpOutstanding(usize),

    #[error("No follow-up is pending")]
    NoFollowUpPending,

    #[error("A follow-up cannot be armed for a non-severe answer")]
    FollowUpNotTriggered,

    #[error("Inventory must contain at least one item")]
    EmptyInventory,
}
