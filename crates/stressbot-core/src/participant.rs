use serde::{Deserialize, Serialize};

/// Intake details collected before the chat starts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    /// Currently a student?
    pub student: bool,
    pub age: u8,
    /// Consent to anonymous research use. A session must not start without it.
    pub consent: bool,
}

impl ParticipantInfo {
    pub const MIN_AGE: u8 = 18;
    pub const MAX_AGE: u8 = 100;

    pub fn new(student: bool, age: u8, consent: bool) -> Result<Self, ParticipantError> {
        if !consent {
            return Err(ParticipantError::ConsentRequired);
        }
        if !(Self::MIN_AGE..=Self::MAX_AGE).contains(&age) {
            return Err(ParticipantError::AgeOutOfRange(age));
        }
        Ok(Self {
            student,
            age,
            consent,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParticipantError {
    #[error("Consent is required to participate")]
    ConsentRequired,

    #[error("Age {0} is outside the accepted range (18-100)")]
    AgeOutOfRange(u8),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consent_is_mandatory() {
        let err = ParticipantInfo::new(true, 21, false).unwrap_err();
        assert!(matches!(err, ParticipantError::ConsentRequired));
    }

    #[test]
    fn test_age_bounds() {
        assert!(ParticipantInfo::new(true, 17, true).is_err());
        assert!(ParticipantInfo::new(true, 18, true).is_ok());
        assert!(ParticipantInfo::new(false, 100, true).is_ok());
        assert!(ParticipantInfo::new(false, 101, true).is_err());
    }
}
