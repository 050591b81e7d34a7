use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use stressbot_gen::Generator;
use stressbot_logging::{LogEvent, Logger, PromptRole};
use stressbot_rephrase::Rephraser;

use crate::{FlowError, FlowState, Inventory, Likert, ResponseRecord, Stage};

/// Which kind of prompt the participant is being asked to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Main,
    FollowUp,
}

/// The prompt currently awaiting an answer, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentPrompt {
    pub kind: PromptKind,
    pub ordinal: usize,
    pub text: String,
}

/// Drives one participant session: owns the [`FlowState`], requests
/// paraphrases and follow-up questions from the text-generation collaborator,
/// and applies the documented fallbacks when generation fails.
///
/// The runner performs no persistence and no terminal I/O; rendering and the
/// result sink are the caller's concern.
pub struct SessionRunner<'a> {
    flow: FlowState,
    rephraser: Rephraser<'a>,
    rephrase_enabled: bool,
    /// Lazily filled, one slot per item; a failed paraphrase caches the
    /// canonical wording so each item issues at most one generation request.
    paraphrase_cache: Vec<Option<String>>,
    logger: Arc<Logger>,
    started_at: Instant,
}

impl<'a> SessionRunner<'a> {
    pub fn new(
        inventory: Inventory,
        generator: &'a dyn Generator,
        logger: Arc<Logger>,
        rephrase_enabled: bool,
    ) -> Self {
        let item_count = inventory.len();
        Self {
            flow: FlowState::new(inventory),
            rephraser: Rephraser::new(generator),
            rephrase_enabled,
            paraphrase_cache: vec![None; item_count],
            logger,
            started_at: Instant::now(),
        }
    }

    /// The fixed category set participants choose from.
    pub fn options(&self) -> &'static [Likert; 5] {
        &Likert::ALL
    }

    pub fn stage(&self) -> Stage {
        self.flow.stage()
    }

    pub fn is_complete(&self) -> bool {
        self.flow.is_complete()
    }

    pub fn item_count(&self) -> usize {
        self.flow.item_count()
    }

    pub fn records(&self) -> &[ResponseRecord] {
        self.flow.records()
    }

    pub fn follow_up_count(&self) -> usize {
        self.flow.follow_up_count()
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Consume the runner once the questionnaire is complete.
    pub fn into_records(self) -> Vec<ResponseRecord> {
        self.flow.into_records()
    }

    /// The prompt currently awaiting an answer, or `None` once complete.
    ///
    /// Re-requesting the current prompt never changes the flow state; the
    /// only side effect is populating the paraphrase cache, at most once per
    /// item.
    pub async fn current_prompt(&mut self) -> Option<CurrentPrompt> {
        match self.flow.stage() {
            Stage::Complete => None,
            Stage::AwaitingFollowup(ordinal) => {
                let text = self
                    .flow
                    .armed_follow_up()
                    .expect("follow-up armed while awaiting")
                    .to_string();
                self.logger.log(&LogEvent::ItemPresented {
                    ordinal,
                    role: PromptRole::FollowUp,
                    rephrased: false,
                });
                Some(CurrentPrompt {
                    kind: PromptKind::FollowUp,
                    ordinal,
                    text,
                })
            }
            Stage::Answering(ordinal) => {
                let text = self.presented_prompt(ordinal).await;
                let canonical = &self.flow.inventory().get(ordinal)?.prompt;
                self.logger.log(&LogEvent::ItemPresented {
                    ordinal,
                    role: PromptRole::Main,
                    rephrased: text != *canonical,
                });
                Some(CurrentPrompt {
                    kind: PromptKind::Main,
                    ordinal,
                    text,
                })
            }
        }
    }

    /// Submit an answer for the currently pending prompt.
    ///
    /// This is the controller's single mutation entry point: the runner
    /// routes the answer to the main item or the armed follow-up based on the
    /// current stage.
    pub async fn submit(&mut self, answer: Likert) -> Result<Stage, FlowError> {
        let stage = match self.flow.stage() {
            Stage::Complete => return Err(FlowError::SessionComplete),
            Stage::AwaitingFollowup(ordinal) => {
                let stage = self.flow.submit_follow_up(answer)?;
                self.logger.log(&LogEvent::AnswerRecorded {
                    ordinal,
                    role: PromptRole::FollowUp,
                    answer: answer.label().to_string(),
                    score: answer.score(),
                    severe: answer.is_severe(),
                });
                stage
            }
            Stage::Answering(ordinal) => {
                self.logger.log(&LogEvent::AnswerRecorded {
                    ordinal,
                    role: PromptRole::Main,
                    answer: answer.label().to_string(),
                    score: answer.score(),
                    severe: answer.is_severe(),
                });

                if answer.is_severe() {
                    self.submit_severe(ordinal, answer).await?
                } else {
                    self.flow.submit_main(answer)?
                }
            }
        };

        if stage == Stage::Complete {
            self.logger.log(&LogEvent::InventoryComplete {
                items: self.flow.item_count(),
                follow_ups: self.flow.follow_up_count(),
            });
        }

        Ok(stage)
    }

    /// A severe answer requests one follow-up question. If generation fails
    /// the follow-up is skipped and the session proceeds as if the answer
    /// were non-severe; study continuity matters more than prompt variety.
    async fn submit_severe(&mut self, ordinal: usize, answer: Likert) -> Result<Stage, FlowError> {
        let statement = self
            .flow
            .inventory()
            .get(ordinal)
            .expect("stage ordinal within inventory")
            .prompt
            .clone();

        match self.rephraser.follow_up(&statement, answer.label()).await {
            Ok(prompt) => {
                let stage = self
                    .flow
                    .submit_main_expecting_follow_up(answer, prompt)?;
                self.logger.log(&LogEvent::FollowUpArmed { ordinal });
                Ok(stage)
            }
            Err(e) => {
                warn!(ordinal, error = %e, "Follow-up generation failed, skipping follow-up");
                self.logger.log(&LogEvent::FollowUpSkipped {
                    ordinal,
                    error: e.to_string(),
                });
                self.flow.submit_main(answer)
            }
        }
    }

    /// The wording shown for item `ordinal`: a cached paraphrase when
    /// rephrasing is enabled and generation succeeded, the canonical text
    /// otherwise.
    async fn presented_prompt(&mut self, ordinal: usize) -> String {
        let canonical = self
            .flow
            .inventory()
            .get(ordinal)
            .expect("stage ordinal within inventory")
            .prompt
            .clone();

        if !self.rephrase_enabled {
            return canonical;
        }

        if let Some(cached) = &self.paraphrase_cache[ordinal] {
            return cached.clone();
        }

        let presented = match self.rephraser.paraphrase(&canonical).await {
            Ok(paraphrase) => {
                debug!(ordinal, "Paraphrase cached");
                paraphrase
            }
            Err(e) => {
                warn!(ordinal, error = %e, "Paraphrase failed, using canonical wording");
                self.logger.log(&LogEvent::ParaphraseFallback {
                    ordinal,
                    error: e.to_string(),
                });
                canonical
            }
        };

        self.paraphrase_cache[ordinal] = Some(presented.clone());
        presented
    }
}
