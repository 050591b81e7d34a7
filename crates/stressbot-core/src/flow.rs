use serde::{Deserialize, Serialize};

use crate::{FlowError, Inventory, InventoryItem, Likert};

/// Where the controller is in the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Waiting for a main answer to item `i`
    Answering(usize),
    /// Waiting for the follow-up answer belonging to item `i`
    AwaitingFollowup(usize),
    /// All items answered; no further answers are accepted
    Complete,
}

/// The follow-up sub-record attached to a high-severity answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUp {
    pub prompt: String,
    pub answer: Likert,
}

/// One answered inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub ordinal: usize,
    pub prompt: String,
    pub answer: Likert,
    pub follow_up: Option<FollowUp>,
}

/// The per-session mutable progress record of the questionnaire.
///
/// Invariants held between calls:
/// - while `Answering(i)`, `records.len() == i` and no follow-up is armed
/// - while `AwaitingFollowup(i)`, `records.len() == i + 1`, the armed prompt
///   belongs to item `i`, and `records[i].follow_up` is still unset
/// - once `Complete`, `records.len() == item_count()` and every record's
///   follow-up is present iff its main answer was severe
#[derive(Debug, Clone)]
pub struct FlowState {
    inventory: Inventory,
    stage: Stage,
    records: Vec<ResponseRecord>,
    armed_follow_up: Option<String>,
}

impl FlowState {
    pub fn new(inventory: Inventory) -> Self {
        Self {
            inventory,
            stage: Stage::Answering(0),
            records: Vec::new(),
            armed_follow_up: None,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn item_count(&self) -> usize {
        self.inventory.len()
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// The item whose main or follow-up answer is currently pending.
    pub fn current_item(&self) -> Option<&InventoryItem> {
        match self.stage {
            Stage::Answering(i) | Stage::AwaitingFollowup(i) => self.inventory.get(i),
            Stage::Complete => None,
        }
    }

    /// The armed follow-up question, present only while `AwaitingFollowup`.
    pub fn armed_follow_up(&self) -> Option<&str> {
        self.armed_follow_up.as_deref()
    }

    pub fn is_complete(&self) -> bool {
        self.stage == Stage::Complete
    }

    pub fn records(&self) -> &[ResponseRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ResponseRecord> {
        self.records
    }

    pub fn follow_up_count(&self) -> usize {
        self.records.iter().filter(|r| r.follow_up.is_some()).count()
    }

    /// Record a main answer with no follow-up and advance.
    ///
    /// Callers use this for non-severe answers, and for severe answers whose
    /// follow-up generation failed (the documented skip fallback).
    pub fn submit_main(&mut self, answer: Likert) -> Result<Stage, FlowError> {
        let ordinal = self.expect_answering()?;
        self.push_record(ordinal, answer);
        Ok(self.advance(ordinal))
    }

    /// Record a severe main answer and arm its follow-up question.
    pub fn submit_main_expecting_follow_up(
        &mut self,
        answer: Likert,
        follow_up_prompt: String,
    ) -> Result<Stage, FlowError> {
        if !answer.is_severe() {
            return Err(FlowError::FollowUpNotTriggered);
        }

        let ordinal = self.expect_answering()?;
        self.push_record(ordinal, answer);
        self.armed_follow_up = Some(follow_up_prompt);
        self.stage = Stage::AwaitingFollowup(ordinal);
        Ok(self.stage)
    }

    /// Record the follow-up answer for the item it belongs to and advance.
    ///
    /// A follow-up answer never arms another follow-up, regardless of its
    /// severity; the branch is at most one level deep.
    pub fn submit_follow_up(&mut self, answer: Likert) -> Result<Stage, FlowError> {
        let ordinal = match self.stage {
            Stage::AwaitingFollowup(i) => i,
            Stage::Answering(_) => return Err(FlowError::NoFollowUpPending),
            Stage::Complete => return Err(FlowError::SessionComplete),
        };

        let prompt = self
            .armed_follow_up
            .take()
            .ok_or(FlowError::NoFollowUpPending)?;

        // The record for this ordinal was pushed when the main answer arrived
        let record = self
            .records
            .get_mut(ordinal)
            .expect("record exists for awaited follow-up");
        record.follow_up = Some(FollowUp { prompt, answer });

        Ok(self.advance(ordinal))
    }

    fn expect_answering(&self) -> Result<usize, FlowError> {
        match self.stage {
            Stage::Answering(i) => Ok(i),
            Stage::AwaitingFollowup(i) => Err(FlowError::FollowUpOutstanding(i)),
            Stage::Complete => Err(FlowError::SessionComplete),
        }
    }

    fn push_record(&mut self, ordinal: usize, answer: Likert) {
        let prompt = self
            .inventory
            .get(ordinal)
            .expect("stage ordinal within inventory")
            .prompt
            .clone();
        self.records.push(ResponseRecord {
            ordinal,
            prompt,
            answer,
            follow_up: None,
        });
    }

    fn advance(&mut self, ordinal: usize) -> Stage {
        self.stage = if ordinal + 1 < self.inventory.len() {
            Stage::Answering(ordinal + 1)
        } else {
            Stage::Complete
        };
        self.stage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_item_flow() -> FlowState {
        let inventory =
            Inventory::new(vec!["First stressor".to_string(), "Second stressor".to_string()])
                .unwrap();
        FlowState::new(inventory)
    }

    #[test]
    fn test_initial_stage_is_answering_zero() {
        let flow = two_item_flow();
        assert_eq!(flow.stage(), Stage::Answering(0));
        assert!(flow.records().is_empty());
        assert_eq!(flow.current_item().unwrap().ordinal, 0);
    }

    #[test]
    fn test_non_severe_answers_run_straight_through() {
        let mut flow = two_item_flow();
        assert_eq!(flow.submit_main(Likert::Sometimes).unwrap(), Stage::Answering(1));
        assert_eq!(flow.submit_main(Likert::Never).unwrap(), Stage::Complete);

        assert!(flow.is_complete());
        assert_eq!(flow.records().len(), 2);
        assert!(flow.records().iter().all(|r| r.follow_up.is_none()));
    }

    #[test]
    fn test_severe_answer_arms_follow_up_and_holds_position() {
        let mut flow = two_item_flow();
        let stage = flow
            .submit_main_expecting_follow_up(Likert::Often, "How has this affected you?".into())
            .unwrap();
        assert_eq!(stage, Stage::AwaitingFollowup(0));
        assert_eq!(flow.armed_follow_up(), Some("How has this affected you?"));
        assert_eq!(flow.records().len(), 1);
        assert!(flow.records()[0].follow_up.is_none());

        let stage = flow.submit_follow_up(Likert::Rarely).unwrap();
        assert_eq!(stage, Stage::Answering(1));
        let follow_up = flow.records()[0].follow_up.as_ref().unwrap();
        assert_eq!(follow_up.answer, Likert::Rarely);
        assert_eq!(follow_up.prompt, "How has this affected you?");
        assert!(flow.armed_follow_up().is_none());
    }

    #[test]
    fn test_severe_follow_up_answer_never_chains() {
        let mut flow = two_item_flow();
        flow.submit_main_expecting_follow_up(Likert::VeryOften, "Follow-up?".into())
            .unwrap();
        // Even a Very Often follow-up answer just advances
        assert_eq!(flow.submit_follow_up(Likert::VeryOften).unwrap(), Stage::Answering(1));
        assert_eq!(flow.records()[0].follow_up.as_ref().unwrap().answer, Likert::VeryOften);
    }

    #[test]
    fn test_follow_up_for_non_severe_answer_is_refused() {
        let mut flow = two_item_flow();
        let err = flow
            .submit_main_expecting_follow_up(Likert::Sometimes, "Follow-up?".into())
            .unwrap_err();
        assert!(matches!(err, FlowError::FollowUpNotTriggered));
        assert_eq!(flow.stage(), Stage::Answering(0));
        assert!(flow.records().is_empty());
    }

    #[test]
    fn test_follow_up_answer_while_answering_is_refused() {
        let mut flow = two_item_flow();
        let err = flow.submit_follow_up(Likert::Never).unwrap_err();
        assert!(matches!(err, FlowError::NoFollowUpPending));
        assert_eq!(flow.stage(), Stage::Answering(0));
    }

    #[test]
    fn test_main_answer_while_follow_up_outstanding_is_refused() {
        let mut flow = two_item_flow();
        flow.submit_main_expecting_follow_up(Likert::Often, "Follow-up?".into())
            .unwrap();
        let err = flow.submit_main(Likert::Never).unwrap_err();
        assert!(matches!(err, FlowError::FollowUpOutstanding(0)));
        assert_eq!(flow.stage(), Stage::AwaitingFollowup(0));
        assert_eq!(flow.records().len(), 1);
    }

    #[test]
    fn test_complete_accepts_no_further_answers() {
        let mut flow = two_item_flow();
        flow.submit_main(Likert::Never).unwrap();
        flow.submit_main(Likert::Never).unwrap();

        assert!(matches!(
            flow.submit_main(Likert::Never),
            Err(FlowError::SessionComplete)
        ));
        assert!(matches!(
            flow.submit_follow_up(Likert::Never),
            Err(FlowError::SessionComplete)
        ));
        assert_eq!(flow.records().len(), 2);
    }

    #[test]
    fn test_severe_final_item_completes_after_follow_up() {
        let mut flow = two_item_flow();
        flow.submit_main(Likert::Never).unwrap();
        flow.submit_main_expecting_follow_up(Likert::VeryOften, "Follow-up?".into())
            .unwrap();
        assert_eq!(flow.submit_follow_up(Likert::Sometimes).unwrap(), Stage::Complete);
        assert_eq!(flow.follow_up_count(), 1);
    }

    #[test]
    fn test_records_are_a_prefix_in_ordinal_order() {
        let mut flow = two_item_flow();
        flow.submit_main(Likert::Rarely).unwrap();
        let ordinals: Vec<usize> = flow.records().iter().map(|r| r.ordinal).collect();
        assert_eq!(ordinals, vec![0]);

        flow.submit_main(Likert::Rarely).unwrap();
        let ordinals: Vec<usize> = flow.records().iter().map(|r| r.ordinal).collect();
        assert_eq!(ordinals, vec![0, 1]);
    }

    #[test]
    fn test_records_store_literal_prompt_text() {
        let mut flow = two_item_flow();
        flow.submit_main(Likert::Rarely).unwrap();
        assert_eq!(flow.records()[0].prompt, "First stressor");
    }
}
