//! Tag name validation.
//!
//! Tags are opaque labels, so the rules only reject names that would be
//! ambiguous when displayed or typed back in:
//! - Must not be empty
//! - No leading or trailing whitespace
//! - No control characters
//! - No commas (comma-separated lists are how tags are entered in bulk)

/// Validates a tag name.
///
/// # Examples
/// ```
/// use tagstage::tags::validation::validate_tag_name;
///
/// assert!(validate_tag_name("rock").is_ok());
/// assert!(validate_tag_name("90s").is_ok());
/// assert!(validate_tag_name("hip hop").is_ok());
///
/// assert!(validate_tag_name("").is_err());
/// assert!(validate_tag_name(" jazz").is_err());
/// assert!(validate_tag_name("rock,pop").is_err());
/// ```
pub fn validate_tag_name(name: &str) -> Result<(), TagValidationError> {
    if name.is_empty() {
        return Err(TagValidationError::Empty);
    }

    if name.trim() != name {
        return Err(TagValidationError::SurroundingWhitespace);
    }

    for ch in name.chars() {
        if ch.is_control() {
            return Err(TagValidationError::ControlCharacter);
        }
        if ch == ',' {
            return Err(TagValidationError::Comma);
        }
    }

    Ok(())
}

/// Error type for tag name validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagValidationError {
    Empty,
    SurroundingWhitespace,
    ControlCharacter,
    Comma,
}

impl std::fmt::Display for TagValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TagValidationError::Empty => write!(f, "tag name cannot be empty"),
            TagValidationError::SurroundingWhitespace => {
                write!(f, "tag name cannot start or end with whitespace")
            }
            TagValidationError::ControlCharacter => {
                write!(f, "tag name cannot contain control characters")
            }
            TagValidationError::Comma => write!(f, "tag name cannot contain a comma"),
        }
    }
}

impl std::error::Error for TagValidationError {}
