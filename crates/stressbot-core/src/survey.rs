use serde::{Deserialize, Serialize};

/// One agreement rating on the satisfaction survey, 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Agreement {
    StronglyDisagree,
    Disagree,
    Neutral,
    Agree,
    StronglyAgree,
}

impl Agreement {
    pub const ALL: [Agreement; 5] = [
        Agreement::StronglyDisagree,
        Agreement::Disagree,
        Agreement::Neutral,
        Agreement::Agree,
        Agreement::StronglyAgree,
    ];

    pub fn score(&self) -> u8 {
        match self {
            Agreement::StronglyDisagree => 1,
            Agreement::Disagree => 2,
            Agreement::Neutral => 3,
            Agreement::Agree => 4,
            Agreement::StronglyAgree => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Agreement::StronglyDisagree => "Strongly Disagree",
            Agreement::Disagree => "Disagree",
            Agreement::Neutral => "Neutral",
            Agreement::Agree => "Agree",
            Agreement::StronglyAgree => "Strongly Agree",
        }
    }
}

impl std::fmt::Display for Agreement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} \u{2013} {}", self.score(), self.label())
    }
}

/// One rated survey question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveyQuestion {
    /// Stable column key for the result row
    pub key: &'static str,
    pub text: &'static str,
}

/// A titled group of rated questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurveySection {
    pub title: &'static str,
    pub questions: Vec<SurveyQuestion>,
}

/// The fixed chatbot-experience evaluation form.
#[derive(Debug, Clone)]
pub struct SurveyForm {
    pub sections: Vec<SurveySection>,
    pub feedback: Vec<SurveyQuestion>,
}

impl SurveyForm {
    /// The evaluation form used by the study: three rated sections plus
    /// three required open-feedback questions.
    pub fn standard() -> Self {
        let section_a = SurveySection {
            title: "Section A \u{2013} Functional Quality",
            questions: vec![
                SurveyQuestion { key: "func_1", text: "The chatbot was able to carry out the intended functions." },
                SurveyQuestion { key: "func_2", text: "I felt the chatbot's capabilities matched my expectations." },
                SurveyQuestion { key: "func_3", text: "The chatbot helped me complete the task successfully." },
                SurveyQuestion { key: "func_4", text: "The chatbot responded in a timely and efficient manner." },
                SurveyQuestion { key: "func_5", text: "The chatbot was easy to use." },
                SurveyQuestion { key: "func_6", text: "Overall, the chatbot worked as I expected." },
            ],
        };
        let section_b = SurveySection {
            title: "Section B \u{2013} Conversation Quality",
            questions: vec![
                SurveyQuestion { key: "conv_1", text: "The chatbot's responses were easy to understand." },
                SurveyQuestion { key: "conv_2", text: "The flow of the conversation felt natural." },
                SurveyQuestion { key: "conv_3", text: "I felt like I was having a real conversation." },
            ],
        };
        let section_c = SurveySection {
            title: "Section C \u{2013} Likeability / Enjoyment",
            questions: vec![
                SurveyQuestion { key: "like_1", text: "I enjoyed interacting with the chatbot." },
                SurveyQuestion { key: "like_2", text: "The chatbot felt friendly during the conversation." },
                SurveyQuestion { key: "like_3", text: "I would like to use this chatbot again." },
                SurveyQuestion { key: "like_4", text: "I felt comfortable talking to the chatbot." },
                SurveyQuestion { key: "like_5", text: "The chatbot's personality was pleasant." },
                SurveyQuestion { key: "like_6", text: "I felt engaged while interacting with the chatbot." },
                SurveyQuestion { key: "like_7", text: "I would recommend this chatbot to others." },
                SurveyQuestion { key: "like_8", text: "I found the experience satisfying." },
                SurveyQuestion { key: "like_9", text: "I felt the chatbot was likable." },
            ],
        };
        let feedback = vec![
            SurveyQuestion { key: "feedback_like", text: "What did you like most about this chatbot?" },
            SurveyQuestion { key: "feedback_frustrating", text: "What did you find frustrating or confusing?" },
            SurveyQuestion { key: "feedback_suggestions", text: "Do you have any suggestions to improve this chatbot?" },
        ];

        Self {
            sections: vec![section_a, section_b, section_c],
            feedback,
        }
    }

    /// All rated question keys in form order.
    pub fn rating_keys(&self) -> Vec<&'static str> {
        self.sections
            .iter()
            .flat_map(|s| s.questions.iter().map(|q| q.key))
            .collect()
    }
}

/// A sealed, fully answered satisfaction survey.
///
/// Construction validates completeness: every rated question answered and
/// every feedback box non-blank, matching the original form's submit gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyResponse {
    ratings: Vec<(String, Agreement)>,
    feedback: Vec<(String, String)>,
}

impl SurveyResponse {
    pub fn new(
        form: &SurveyForm,
        ratings: Vec<(String, Agreement)>,
        feedback: Vec<(String, String)>,
    ) -> Result<Self, SurveyError> {
        for key in form.rating_keys() {
            if !ratings.iter().any(|(k, _)| k == key) {
                return Err(SurveyError::MissingRating(key.to_string()));
            }
        }
        for question in &form.feedback {
            let answer = feedback
                .iter()
                .find(|(k, _)| k == question.key)
                .map(|(_, v)| v.as_str())
                .ok_or_else(|| SurveyError::BlankFeedback(question.key.to_string()))?;
            if answer.trim().is_empty() {
                return Err(SurveyError::BlankFeedback(question.key.to_string()));
            }
        }

        Ok(Self { ratings, feedback })
    }

    pub fn ratings(&self) -> &[(String, Agreement)] {
        &self.ratings
    }

    pub fn feedback(&self) -> &[(String, String)] {
        &self.feedback
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SurveyError {
    #[error("Survey question {0:?} was not answered")]
    MissingRating(String),

    #[error("Feedback box {0:?} must not be left blank")]
    BlankFeedback(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_ratings(form: &SurveyForm) -> Vec<(String, Agreement)> {
        form.rating_keys()
            .into_iter()
            .map(|k| (k.to_string(), Agreement::Agree))
            .collect()
    }

    fn full_feedback(form: &SurveyForm) -> Vec<(String, String)> {
        form.feedback
            .iter()
            .map(|q| (q.key.to_string(), "some thoughts".to_string()))
            .collect()
    }

    #[test]
    fn test_standard_form_shape() {
        let form = SurveyForm::standard();
        assert_eq!(form.sections.len(), 3);
        assert_eq!(form.rating_keys().len(), 6 + 3 + 9);
        assert_eq!(form.feedback.len(), 3);
    }

    #[test]
    fn test_complete_survey_seals() {
        let form = SurveyForm::standard();
        let response = SurveyResponse::new(&form, full_ratings(&form), full_feedback(&form));
        assert!(response.is_ok());
    }

    #[test]
    fn test_missing_rating_is_refused() {
        let form = SurveyForm::standard();
        let mut ratings = full_ratings(&form);
        ratings.retain(|(k, _)| k != "conv_2");
        let err = SurveyResponse::new(&form, ratings, full_feedback(&form)).unwrap_err();
        assert!(matches!(err, SurveyError::MissingRating(k) if k == "conv_2"));
    }

    #[test]
    fn test_blank_feedback_is_refused() {
        let form = SurveyForm::standard();
        let mut feedback = full_feedback(&form);
        feedback[1].1 = "   ".to_string();
        let err = SurveyResponse::new(&form, full_ratings(&form), feedback).unwrap_err();
        assert!(matches!(err, SurveyError::BlankFeedback(_)));
    }

    #[test]
    fn test_agreement_scores() {
        let scores: Vec<u8> = Agreement::ALL.iter().map(|a| a.score()).collect();
        assert_eq!(scores, vec![1, 2, 3, 4, 5]);
        assert_eq!(Agreement::Neutral.to_string(), "3 \u{2013} Neutral");
    }
}
