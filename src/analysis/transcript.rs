//! Submitted transcript validation

use thiserror::Error;

/// Minimum transcript length, in characters, after trimming.
pub const MIN_TRANSCRIPT_CHARS: usize = 20;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a transcript.")]
    Empty,

    #[error("Transcript too short. Minimum {} characters required.", MIN_TRANSCRIPT_CHARS)]
    TooShort { chars: usize },
}

/// A trimmed transcript that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript(String);

impl Transcript {
    /// Trim surrounding whitespace and check the length.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        let chars = trimmed.chars().count();

        if chars == 0 {
            return Err(ValidationError::Empty);
        }
        if chars < MIN_TRANSCRIPT_CHARS {
            return Err(ValidationError::TooShort { chars });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_is_empty() {
        assert_eq!(Transcript::parse(""), Err(ValidationError::Empty));
        assert_eq!(Transcript::parse(" \n\t "), Err(ValidationError::Empty));
    }

    #[test]
    fn short_input_reports_trimmed_length() {
        assert_eq!(
            Transcript::parse("  short  "),
            Err(ValidationError::TooShort { chars: 5 })
        );
        assert_eq!(
            Transcript::parse(&"x".repeat(19)),
            Err(ValidationError::TooShort { chars: 19 })
        );
    }

    #[test]
    fn twenty_characters_is_enough() {
        let transcript = Transcript::parse(&format!("  {}  ", "y".repeat(20))).unwrap();
        assert_eq!(transcript.as_str(), "y".repeat(20));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 10 two-byte characters: 20 bytes, still too short
        let err = Transcript::parse(&"é".repeat(10)).unwrap_err();
        assert_eq!(err, ValidationError::TooShort { chars: 10 });
    }

    #[test]
    fn messages_match_form_feedback() {
        assert_eq!(ValidationError::Empty.to_string(), "Please enter a transcript.");
        assert_eq!(
            ValidationError::TooShort { chars: 3 }.to_string(),
            "Transcript too short. Minimum 20 characters required."
        );
    }
}
