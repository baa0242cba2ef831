//! RFC 6901 JSON Pointers naming locations inside a [`JsonValue`](crate::JsonValue).

use std::borrow::Cow;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    #[error("pointer {0:?} must be empty or start with '/'")]
    NotAbsolute(String),
    #[error("pointer segment {0:?} has a '~' not followed by '0' or '1'")]
    BadEscape(String),
}

fn decode_segment(segment: &str) -> Result<Cow<'_, str>, PointerError> {
    if !segment.contains('~') {
        return Ok(Cow::Borrowed(segment));
    }
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars();
    while let Some(c) = chars.next() {
        if c != '~' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('0') => out.push('~'),
            Some('1') => out.push('/'),
            _ => return Err(PointerError::BadEscape(segment.to_owned())),
        }
    }
    Ok(Cow::Owned(out))
}

fn encode_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains(['~', '/']) {
        Cow::Owned(segment.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(segment)
    }
}

/// Split a pointer into its unescaped segments. `""` is the root.
pub(crate) fn split(pointer: &str) -> Result<Vec<String>, PointerError> {
    let Some(rest) = pointer.strip_prefix('/') else {
        return if pointer.is_empty() {
            Ok(Vec::new())
        } else {
            Err(PointerError::NotAbsolute(pointer.to_owned()))
        };
    };
    rest.split('/')
        .map(|segment| decode_segment(segment).map(Cow::into_owned))
        .collect()
}

/// Join unescaped segments back into a pointer string.
pub(crate) fn join<S: AsRef<str>>(segments: &[S]) -> String {
    segments.iter().fold(String::new(), |mut out, segment| {
        out.push('/');
        out.push_str(&encode_segment(segment.as_ref()));
        out
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_and_join() {
        assert_eq!(split("").unwrap(), Vec::<String>::new());
        assert_eq!(split("/").unwrap(), vec![String::new()]);
        assert_eq!(split("/a~0b/c~1d/1").unwrap(), ["a~b", "c/d", "1"]);
        assert_eq!(join(&["a~b", "c/d", "1"]), "/a~0b/c~1d/1");
        assert_eq!(join::<&str>(&[]), "");
    }

    #[test]
    fn escapes_are_decoded_left_to_right() {
        // "~01" is an escaped '~' followed by a literal '1', not a '/'.
        assert_eq!(split("/~01").unwrap(), ["~1"]);
        assert_eq!(join(&["~1"]), "/~01");
    }

    #[test]
    fn malformed_pointers() {
        assert_eq!(
            split("no-slash"),
            Err(PointerError::NotAbsolute("no-slash".into()))
        );
        assert_eq!(split("/a~2"), Err(PointerError::BadEscape("a~2".into())));
        assert_eq!(split("/a~"), Err(PointerError::BadEscape("a~".into())));
    }
}
