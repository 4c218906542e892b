//! Quote-aware line tokenizer.
//!
//! Splits a line on space, tab, CR, LF, and NUL. A token beginning with
//! `"` or `'` opens a quoted span that keeps consuming raw tokens until
//! one ends with the same quote character; the emitted token is the
//! literal text between the quotes, inner delimiters preserved. There is
//! no escape processing, so every token is a borrowed subslice of the
//! input line.

use heapless::Vec;

use crate::config::MAX_TOKENS;
use crate::error::Error;

const DELIMITERS: &[u8] = &[b' ', b'\t', b'\r', b'\n', b'\0'];

pub(crate) fn is_delimiter(byte: u8) -> bool {
    DELIMITERS.contains(&byte)
}

/// Split `line` into at most [`MAX_TOKENS`] tokens.
///
/// Zero-length tokens from consecutive delimiters are skipped; an
/// explicitly quoted empty string (`""`) is emitted. An unterminated
/// quote yields no token for that span, so callers observe early
/// token-stream exhaustion. Exceeding the token capacity is fatal
/// [`Error::BufferExhausted`].
///
/// Tokens borrow from `line` and never outlive it.
pub fn tokenize(line: &str) -> Result<Vec<&str, MAX_TOKENS>, Error> {
    let bytes = line.as_bytes();
    let mut tokens: Vec<&str, MAX_TOKENS> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        while i < bytes.len() && is_delimiter(bytes[i]) {
            i += 1;
        }
        if i >= bytes.len() {
            break;
        }

        let start = i;
        while i < bytes.len() && !is_delimiter(bytes[i]) {
            i += 1;
        }

        let quote = bytes[start];
        if quote == b'"' || quote == b'\'' {
            // Quoted span: keep consuming raw tokens until one ends with
            // the opening quote character.
            loop {
                if i - start >= 2 && bytes[i - 1] == quote {
                    push(&mut tokens, &line[start + 1..i - 1])?;
                    break;
                }
                while i < bytes.len() && is_delimiter(bytes[i]) {
                    i += 1;
                }
                if i >= bytes.len() {
                    // Unterminated quote: the span yields no token.
                    return Ok(tokens);
                }
                while i < bytes.len() && !is_delimiter(bytes[i]) {
                    i += 1;
                }
            }
        } else {
            push(&mut tokens, &line[start..i])?;
        }
    }

    Ok(tokens)
}

fn push<'a>(tokens: &mut Vec<&'a str, MAX_TOKENS>, token: &'a str) -> Result<(), Error> {
    tokens.push(token).map_err(|_| Error::BufferExhausted)
}

#[cfg(test)]
mod tests {
    use super::tokenize;

    #[test]
    fn splits_on_all_delimiters() {
        let tokens = tokenize("a\tb\rc\nd\0e f").unwrap();
        assert_eq!(tokens.as_slice(), &["a", "b", "c", "d", "e", "f"]);
    }

    #[test]
    fn consecutive_delimiters_emit_nothing() {
        let tokens = tokenize("  one   two  ").unwrap();
        assert_eq!(tokens.as_slice(), &["one", "two"]);
    }

    #[test]
    fn quoted_empty_string_is_a_token() {
        let tokens = tokenize(r#"set "" done"#).unwrap();
        assert_eq!(tokens.as_slice(), &["set", "", "done"]);
    }

    #[test]
    fn quote_only_at_token_start_opens_a_span() {
        let tokens = tokenize(r#"ab"cd ef""#).unwrap();
        assert_eq!(tokens.as_slice(), &["ab\"cd", "ef\""]);
    }
}
