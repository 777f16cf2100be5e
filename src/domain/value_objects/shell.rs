//! Shell Quoting and Remote Scripts
//!
//! Every path or service argument is quoted before it is interpolated into a
//! remote script.

/// Wrap `value` in double quotes, backslash-escaping the characters that keep
/// their meaning inside double quotes (`"`, `\`, `$` and backtick).
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

/// An ordered sequence of shell statements sent as one remote invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Script {
    lines: Vec<String>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script consisting of a single statement
    pub fn line(statement: impl Into<String>) -> Self {
        Self::new().then(statement)
    }

    /// Append a statement
    pub fn then(mut self, statement: impl Into<String>) -> Self {
        self.lines.push(statement.into());
        self
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Statements joined with newlines
    pub fn body(&self) -> String {
        self.lines.join("\n")
    }

    /// Final script text; fail-fast scripts abort on the first failing statement
    pub fn render(&self, fail_fast: bool) -> String {
        if fail_fast {
            format!("set -e\n{}", self.body())
        } else {
            self.body()
        }
    }
}

impl<S: Into<String>> FromIterator<S> for Script {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().map(Into::into).collect(),
        }
    }
}
