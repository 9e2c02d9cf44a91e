use thiserror::Error;

/// A single field of a trade row could not be converted to its typed form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("column '{column}' has unparseable value '{value}': {reason}")]
pub struct ParseError {
    pub column: &'static str,
    pub value: String,
    pub reason: String,
}

impl ParseError {
    pub fn new(column: &'static str, value: impl Into<String>, reason: impl ToString) -> Self {
        Self {
            column,
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}
