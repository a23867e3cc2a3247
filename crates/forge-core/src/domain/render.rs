use std::collections::BTreeMap;
use std::path::PathBuf;

/// Values substituted into `{{key}}` placeholders.
///
/// Unknown placeholders are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderVariables {
    values: BTreeMap<String, String>,
}

impl RenderVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Replace every `{{key}}` (whitespace inside the braces allowed).
    ///
    /// `\{{key}}` renders as a literal `{{key}}`, so a template can emit
    /// placeholders for a later render.
    pub fn render(&self, source: &str) -> String {
        let mut out = String::with_capacity(source.len());
        let mut rest = source;

        while let Some(start) = rest.find("{{") {
            if let Some(literal) = rest[..start].strip_suffix('\\') {
                out.push_str(literal);
                out.push_str("{{");
                rest = &rest[start + 2..];
                continue;
            }
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("}}") {
                Some(end) => {
                    let key = after[..end].trim();
                    match self.values.get(key) {
                        Some(value) => out.push_str(value),
                        None => out.push_str(&rest[start..start + 2 + end + 2]),
                    }
                    rest = &after[end + 2..];
                }
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// Where and how a generator's files should be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub destination: PathBuf,
    pub variables: RenderVariables,
    /// Replace files that already exist instead of failing.
    pub overwrite: bool,
}

impl RenderRequest {
    pub fn new(destination: impl Into<PathBuf>, variables: RenderVariables) -> Self {
        Self {
            destination: destination.into(),
            variables,
            overwrite: false,
        }
    }

    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}
