use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in program text.
///
/// Line and column are 1-based for human-readable error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A named program text.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub source: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }

    /// The text of a 1-based line, without its line terminator.
    pub fn line(&self, line_number: u32) -> Option<&str> {
        let idx = usize::try_from(line_number.checked_sub(1)?).ok()?;
        self.source
            .split('\n')
            .nth(idx)
            .map(|line| line.trim_end_matches('\r'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_display() {
        assert_eq!(format!("{}", Position::new(3, 7)), "3:7");
    }

    #[test]
    fn test_source_file_line_lookup() {
        let src = SourceFile::new("prog.json", "[\"seq\",\n  1,\n  2]");
        assert_eq!(src.line(1), Some("[\"seq\","));
        assert_eq!(src.line(3), Some("  2]"));
        assert_eq!(src.line(0), None);
        assert_eq!(src.line(4), None);
    }

    #[test]
    fn test_source_file_crlf() {
        let src = SourceFile::new("prog.json", "[\"print\",\r\n 1]\r\n");
        assert_eq!(src.line(1), Some("[\"print\","));
        assert_eq!(src.line(2), Some(" 1]"));
    }

    #[test]
    fn test_source_file_empty() {
        assert_eq!(SourceFile::new("prog.json", "").line(1), Some(""));
    }
}
