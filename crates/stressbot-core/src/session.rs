use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use stressbot_sink::ResultRow;

use crate::{ParticipantInfo, ResponseRecord, SurveyResponse};

/// Everything one finished participant session produces, ready to persist.
#[derive(Debug, Clone, Serialize)]
pub struct CompletedSession {
    pub session_id: String,
    pub started_at: DateTime<Utc>,
    /// Study/model tag written into the result row (e.g. "model1")
    pub study: String,
    pub participant: ParticipantInfo,
    pub records: Vec<ResponseRecord>,
    pub survey: SurveyResponse,
}

impl CompletedSession {
    pub fn new(
        study: String,
        participant: ParticipantInfo,
        records: Vec<ResponseRecord>,
        survey: SurveyResponse,
    ) -> Self {
        Self::with_id(
            Uuid::new_v4().to_string(),
            Utc::now(),
            study,
            participant,
            records,
            survey,
        )
    }

    /// Build from a session id and start time allocated when the session
    /// began (the transcript is keyed by the same id).
    pub fn with_id(
        session_id: String,
        started_at: DateTime<Utc>,
        study: String,
        participant: ParticipantInfo,
        records: Vec<ResponseRecord>,
        survey: SurveyResponse,
    ) -> Self {
        Self {
            session_id,
            started_at,
            study,
            participant,
            records,
            survey,
        }
    }

    /// Flatten the session into one sink row.
    ///
    /// Column set depends only on the inventory length and survey form, never
    /// on which follow-ups fired, so every session of a study appends under
    /// the same header: absent follow-ups become empty cells.
    pub fn to_row(&self) -> ResultRow {
        let mut row = ResultRow::new();
        row.push("user_id", self.session_id.clone());
        row.push("timestamp", self.started_at.to_rfc3339());
        row.push("student", if self.participant.student { "yes" } else { "no" });
        row.push("age", self.participant.age.to_string());
        row.push("consent", self.participant.consent.to_string());

        for record in &self.records {
            let n = record.ordinal + 1;
            row.push(format!("q{}", n), record.answer.score().to_string());
            match &record.follow_up {
                Some(follow_up) => {
                    row.push(format!("q{}_followup", n), follow_up.answer.score().to_string());
                    row.push(format!("q{}_followup_prompt", n), follow_up.prompt.clone());
                }
                None => {
                    row.push(format!("q{}_followup", n), "");
                    row.push(format!("q{}_followup_prompt", n), "");
                }
            }
        }

        for (key, rating) in self.survey.ratings() {
            row.push(key.clone(), rating.score().to_string());
        }
        for (key, text) in self.survey.feedback() {
            row.push(key.clone(), text.clone());
        }

        row.push("model", self.study.clone());
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Agreement, FollowUp, Likert, SurveyForm};

    fn sample_session() -> CompletedSession {
        let form = SurveyForm::standard();
        let ratings = form
            .rating_keys()
            .into_iter()
            .map(|k| (k.to_string(), Agreement::Agree))
            .collect();
        let feedback = form
            .feedback
            .iter()
            .map(|q| (q.key.to_string(), "fine".to_string()))
            .collect();
        let survey = SurveyResponse::new(&form, ratings, feedback).unwrap();

        let records = vec![
            ResponseRecord {
                ordinal: 0,
                prompt: "First stressor".into(),
                answer: Likert::Often,
                follow_up: Some(FollowUp {
                    prompt: "Tell me more?".into(),
                    answer: Likert::Rarely,
                }),
            },
            ResponseRecord {
                ordinal: 1,
                prompt: "Second stressor".into(),
                answer: Likert::Never,
                follow_up: None,
            },
        ];

        CompletedSession::new(
            "model1".into(),
            ParticipantInfo::new(true, 21, true).unwrap(),
            records,
            survey,
        )
    }

    #[test]
    fn test_row_scores_and_follow_up_columns() {
        let session = sample_session();
        let row = session.to_row();

        assert_eq!(row.get("q1"), Some("4"));
        assert_eq!(row.get("q1_followup"), Some("2"));
        assert_eq!(row.get("q1_followup_prompt"), Some("Tell me more?"));
        assert_eq!(row.get("q2"), Some("1"));
        assert_eq!(row.get("q2_followup"), Some(""));
        assert_eq!(row.get("model"), Some("model1"));
        assert_eq!(row.get("student"), Some("yes"));
        assert_eq!(row.get("func_1"), Some("4"));
        assert_eq!(row.get("feedback_like"), Some("fine"));
    }

    #[test]
    fn test_header_is_stable_across_follow_up_presence() {
        let with_follow_up = sample_session();

        let mut without = with_follow_up.clone();
        without.records[0].follow_up = None;

        assert_eq!(with_follow_up.to_row().headers(), without.to_row().headers());
    }

    #[test]
    fn test_session_ids_are_unique() {
        let a = sample_session();
        let b = sample_session();
        assert_ne!(a.session_id, b.session_id);
    }
}
