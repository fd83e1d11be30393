use std::fmt;

/// Validation failures for user-entered text. Shown as a blocking notice.
#[derive(Debug, Clone, PartialEq)]
pub enum InputError {
    EmptyFlightNumber,
}

impl InputError {
    pub fn title(&self) -> &'static str {
        match self {
            InputError::EmptyFlightNumber => "Error",
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::EmptyFlightNumber => write!(f, "Please enter a flight number"),
        }
    }
}

impl std::error::Error for InputError {}

/// Rejects empty and whitespace-only flight numbers. The input itself is
/// returned untouched.
pub fn validate_flight_number(input: &str) -> Result<&str, InputError> {
    if input.trim().is_empty() {
        return Err(InputError::EmptyFlightNumber);
    }
    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_input_is_rejected() {
        assert_eq!(validate_flight_number(""), Err(InputError::EmptyFlightNumber));
        assert_eq!(validate_flight_number("  \t"), Err(InputError::EmptyFlightNumber));
    }

    #[test]
    fn input_is_not_trimmed() {
        assert_eq!(validate_flight_number(" aa1"), Ok(" aa1"));
    }
}
