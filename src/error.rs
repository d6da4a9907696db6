use std::error::Error;
use std::fmt::{self, Display, Formatter};

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ReactorError {
    InvertedInterval { min: i64, max: i64 },
    BadInstruction { line: usize, message: String },
    BadConfig(String),
    Io(String),
}

impl Display for ReactorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ReactorError::InvertedInterval { min, max } => {
                write!(f, "inverted interval {}..{}", min, max)
            }
            ReactorError::BadInstruction { line, message } => {
                write!(f, "line {}: {}", line, message)
            }
            ReactorError::BadConfig(message) => {
                write!(f, "bad configuration: {}", message)
            }
            ReactorError::Io(message) => {
                write!(f, "failed to read input: {}", message)
            }
        }
    }
}

impl Error for ReactorError {}

#[test]
fn test_display() {
    assert_eq!(
        ReactorError::InvertedInterval { min: 4, max: -2 }.to_string(),
        "inverted interval 4..-2"
    );
    assert_eq!(
        ReactorError::BadInstruction {
            line: 3,
            message: "not matched: 'x'".to_string()
        }
        .to_string(),
        "line 3: not matched: 'x'"
    );
}
