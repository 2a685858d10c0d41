use crate::Position;
use thiserror::Error;

/// Errors raised while turning program text into an [`Expr`](crate::Expr).
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The text is not a single well-formed JSON value.
    #[error("{file}:{position}: invalid JSON: {message}\n  | {source_line}")]
    Syntax {
        file: String,
        position: Position,
        message: String,
        source_line: String,
    },

    /// A JSON number that is not an integer in the signed 64-bit range.
    #[error("unsupported number {text}: only 64-bit integers are allowed")]
    Number { text: String },

    /// A JSON value kind with no expression counterpart (`null`, objects).
    #[error("unsupported JSON value: {kind} cannot appear in a program")]
    Unsupported { kind: &'static str },
}

impl DecodeError {
    /// Source position, when the error came from the JSON parser.
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Syntax { position, .. } => Some(*position),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = DecodeError::Syntax {
            file: "prog.json".into(),
            position: Position::new(2, 4),
            message: "expected value".into(),
            source_line: "  ,]".into(),
        };
        assert_eq!(
            err.to_string(),
            "prog.json:2:4: invalid JSON: expected value\n  |   ,]"
        );
        assert_eq!(err.position(), Some(Position::new(2, 4)));
    }

    #[test]
    fn test_number_error_display() {
        let err = DecodeError::Number { text: "1.5".into() };
        assert!(err.to_string().contains("1.5"));
        assert_eq!(err.position(), None);
    }
}
