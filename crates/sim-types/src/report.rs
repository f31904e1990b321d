use serde::{Deserialize, Serialize};

/// Outcome of a successful document import.
///
/// A report with no warnings means the document was applied as given.
/// Warnings mean it was applied with caveats (typically skipped pairs) and
/// callers must surface them instead of treating the write as clean.
/// Hard failures are carried by the store's error type, not here.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteReport {
    #[serde(default)]
    pub warnings: Vec<String>,
}

impl WriteReport {
    pub fn clean() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    /// Returns `true` if the write produced no warnings.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warnings_keep_order() {
        let mut r = WriteReport::clean();
        assert!(r.is_clean());
        r.warn("first");
        r.warn("second");
        assert!(!r.is_clean());
        assert_eq!(r.warnings, vec!["first", "second"]);
    }

    #[test]
    fn serializes_as_warning_list() {
        let mut r = WriteReport::clean();
        r.warn("pair 1 skipped");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json, serde_json::json!({"warnings": ["pair 1 skipped"]}));
    }
}
