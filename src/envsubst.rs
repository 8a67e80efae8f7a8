//! `${VAR}` substitution over raw bytes.
//!
//! Tokens are `${NAME}` where `NAME` matches `[A-Za-z_][A-Za-z0-9_]*`.
//! Unset variables expand to nothing. A bare `$` not followed by `{`, and a
//! braced token that is not a valid name, are copied through untouched.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvSubstError {
    #[error("unterminated variable token at byte {0}")]
    Unterminated(usize),
}

/// Substitute `${NAME}` tokens from the process environment.
pub fn expand_env(input: &[u8]) -> Result<Vec<u8>, EnvSubstError> {
    expand(input, |name| {
        std::env::var_os(name).map(|v| v.into_encoded_bytes())
    })
}

/// Substitute `${NAME}` tokens using `lookup`.
pub fn expand<F>(input: &[u8], lookup: F) -> Result<Vec<u8>, EnvSubstError>
where
    F: Fn(&str) -> Option<Vec<u8>>,
{
    let mut out = Vec::with_capacity(input.len());
    let mut i = 0;

    while i < input.len() {
        if input[i] == b'$' && input.get(i + 1) == Some(&b'{') {
            let start = i + 2;
            let end = input[start..]
                .iter()
                .position(|&b| b == b'}')
                .map(|p| start + p)
                .ok_or(EnvSubstError::Unterminated(i))?;

            let raw = &input[start..end];
            match std::str::from_utf8(raw).ok().filter(|n| is_valid_name(n)) {
                Some(name) => {
                    if let Some(value) = lookup(name) {
                        out.extend_from_slice(&value);
                    }
                }
                // not a variable (e.g. shell `${1}`), keep it verbatim
                None => out.extend_from_slice(&input[i..=end]),
            }
            i = end + 1;
        } else {
            out.push(input[i]);
            i += 1;
        }
    }

    Ok(out)
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
