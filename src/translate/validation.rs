use crate::error::TranslatorError;

/// Upper bound on the trimmed input, counted in characters
pub const MAX_TEXT_LENGTH: usize = 5000;

/// Trim `text` and check it is non-empty and within [`MAX_TEXT_LENGTH`].
/// Returns the trimmed text on success.
pub fn validate_text(text: &str) -> Result<&str, TranslatorError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(TranslatorError::InvalidInput("Text is required".to_string()));
    }
    if trimmed.chars().count() > MAX_TEXT_LENGTH {
        return Err(TranslatorError::InvalidInput(format!(
            "Text is too long (maximum {} characters)",
            MAX_TEXT_LENGTH
        )));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(validate_text("  Hello, how are you?\n").unwrap(), "Hello, how are you?");
    }

    #[test]
    fn test_rejects_blank_input() {
        for input in ["", "   ", "\n\t "] {
            let err = validate_text(input).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
            assert_eq!(err.to_string(), "Text is required");
        }
    }

    #[test]
    fn test_length_limit_is_inclusive() {
        let at_limit = "a".repeat(MAX_TEXT_LENGTH);
        assert!(validate_text(&at_limit).is_ok());

        let over = "a".repeat(MAX_TEXT_LENGTH + 1);
        let err = validate_text(&over).unwrap_err();
        assert_eq!(err.to_string(), "Text is too long (maximum 5000 characters)");
    }

    #[test]
    fn test_limit_counts_characters_not_bytes() {
        // Each of these is two bytes in UTF-8
        let arabic = "ك".repeat(MAX_TEXT_LENGTH);
        assert!(validate_text(&arabic).is_ok());
    }

    #[test]
    fn test_padding_does_not_count() {
        let padded = format!("   {}   ", "a".repeat(MAX_TEXT_LENGTH));
        assert!(validate_text(&padded).is_ok());
    }
}
