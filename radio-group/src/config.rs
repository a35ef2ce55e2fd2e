//! Radio group configuration.

/// Per-group configuration.
///
/// Every field can also be changed on a live group; changes apply to the
/// next operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RadioGroupConfig {
    /// Re-run the full selection cycle, callbacks included, when the
    /// already-selected control is activated again.
    /// When false that activation is a no-op.
    pub allow_duplicate_selection: bool,
}

impl Default for RadioGroupConfig {
    fn default() -> Self {
        Self {
            allow_duplicate_selection: true,
        }
    }
}

impl RadioGroupConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether re-activating the selected control notifies again.
    pub fn allow_duplicate_selection(mut self, allow: bool) -> Self {
        self.allow_duplicate_selection = allow;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allows_duplicates() {
        assert!(RadioGroupConfig::default().allow_duplicate_selection);
        assert_eq!(RadioGroupConfig::new(), RadioGroupConfig::default());
    }

    #[test]
    fn test_builder() {
        let config = RadioGroupConfig::new().allow_duplicate_selection(false);
        assert!(!config.allow_duplicate_selection);
    }
}
