use serde::Serialize;

/// One recoverable anomaly observed during a conversion.
///
/// The `code` is a stable machine-readable category; the message is free
/// text. Both are part of the externally observable contract and are
/// asserted verbatim by test suites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub code: String,
    pub message: String,
}

/// Ordered per-device diagnostics log.
///
/// Constructed fresh for every conversion and threaded explicitly through
/// each component; diagnostics never abort a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    /// Append one entry.
    pub fn push(&mut self, code: &str, message: impl Into<String>) {
        self.entries.push(Diagnostic {
            code: code.to_string(),
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any entry carries the given code.
    pub fn has_code(&self, code: &str) -> bool {
        self.entries.iter().any(|d| d.code == code)
    }
}
