use thiserror::Error;

/// Raw text that is not a well-formed JSON document.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid JSON at line {line}, column {column}: {message}")]
pub struct ParseError {
    /// The full input that failed to parse.
    pub text: String,
    /// 1-based line of the offending character.
    pub line: usize,
    /// 1-based column (in bytes) of the offending character.
    pub column: usize,
    /// Byte offset of the offending character, clamped to the input length.
    pub offset: usize,
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(text: &str, err: &serde_json::Error) -> Self {
        let (line, column) = (err.line(), err.column());
        let rendered = err.to_string();
        let message = rendered
            .strip_suffix(&format!(" at line {line} column {column}"))
            .unwrap_or(&rendered)
            .to_string();
        ParseError {
            text: text.to_string(),
            line,
            column,
            offset: byte_offset(text, line, column),
            message,
        }
    }

    /// The input line containing the error, without its terminator.
    pub fn line_text(&self) -> &str {
        self.text
            .lines()
            .nth(self.line.saturating_sub(1))
            .unwrap_or_default()
    }
}

fn byte_offset(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(text.len())
}

#[cfg(test)]
mod tests {
    use crate::JsonValue;

    #[test]
    fn reports_position_of_syntax_error() {
        let err = JsonValue::from_text("[1, 2,, 3]").unwrap_err();
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 7);
        assert_eq!(err.offset, 6);
        assert_eq!(&err.text[err.offset..err.offset + 1], ",");
        assert!(!err.message.contains("at line"));
    }

    #[test]
    fn reports_line_of_multiline_error() {
        let text = "{\n  \"a\": 1,\n  \"b\": ?\n}";
        let err = JsonValue::from_text(text).unwrap_err();
        assert_eq!(err.line, 3);
        assert_eq!(err.line_text(), "  \"b\": ?");
        assert_eq!(&text[err.offset..err.offset + 1], "?");
    }

    #[test]
    fn trailing_garbage_is_an_error() {
        let err = JsonValue::from_text("{} x").unwrap_err();
        assert_eq!(err.column, 4);
        assert!(err.to_string().starts_with("invalid JSON at line 1, column 4"));
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = JsonValue::from_text("").unwrap_err();
        assert_eq!(err.offset, 0);
        assert!(JsonValue::from_text("   ").is_err());
    }
}
