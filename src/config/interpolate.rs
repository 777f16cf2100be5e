//! Environment variable interpolation for deploy file values
//!
//! Supported forms:
//! - `${VAR}`: value of `VAR`, error when unset
//! - `${VAR:-default}`: value of `VAR`, or `default` when unset or empty
//! - `$$`: a literal `$`
//!
//! A `$` followed by anything else is kept as-is.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpolateError {
    #[error("environment variable {0} is not set")]
    Unset(String),

    #[error("unterminated '${{' in '{0}'")]
    Unterminated(String),

    #[error("invalid variable name '{0}'")]
    InvalidName(String),
}

/// Expand variable references in `input` using `get_env`.
pub fn interpolate(
    input: &str,
    get_env: impl Fn(&str) -> Option<String>,
) -> Result<String, InterpolateError> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(tail) = after.strip_prefix('$') {
            out.push('$');
            rest = tail;
        } else if let Some(body) = after.strip_prefix('{') {
            let end = body
                .find('}')
                .ok_or_else(|| InterpolateError::Unterminated(input.to_string()))?;
            out.push_str(&expand(&body[..end], &get_env)?);
            rest = &body[end + 1..];
        } else {
            out.push('$');
            rest = after;
        }
    }

    out.push_str(rest);
    Ok(out)
}

fn expand(
    reference: &str,
    get_env: &impl Fn(&str) -> Option<String>,
) -> Result<String, InterpolateError> {
    let (name, default) = match reference.split_once(":-") {
        Some((name, default)) => (name, Some(default)),
        None => (reference, None),
    };

    if !is_valid_name(name) {
        return Err(InterpolateError::InvalidName(name.to_string()));
    }

    match (get_env(name), default) {
        (Some(value), Some(default)) if value.is_empty() => Ok(default.to_string()),
        (Some(value), _) => Ok(value),
        (None, Some(default)) => Ok(default.to_string()),
        (None, None) => Err(InterpolateError::Unset(name.to_string())),
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}
