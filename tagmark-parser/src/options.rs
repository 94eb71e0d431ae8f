//! Transform-time configuration.

use rustc_hash::FxHashSet;

/// Configuration passed explicitly into the transform, keeping it a pure
/// function of (parse tree, options).
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Options {
    /// Tag keys that suppress the default `inline` flag on an inline span.
    /// A span whose merged tags contain any of these keys is emitted
    /// without `inline = true`.
    pub inline_flag_excludes: FxHashSet<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            inline_flag_excludes: ["mathinline".to_string()].into_iter().collect(),
        }
    }
}

impl Options {
    /// Create a new `OptionsBuilder` for fluent configuration.
    ///
    /// # Example
    ///
    /// ```
    /// use tagmark_parser::Options;
    ///
    /// let options = Options::builder()
    ///     .with_inline_flag_exclude("mathdisplay")
    ///     .build();
    /// assert!(options.inline_flag_excludes.contains("mathdisplay"));
    /// ```
    #[must_use]
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::default()
    }

    /// Create a new `Options` with default settings.
    ///
    /// Equivalent to `Options::default()`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Builder for [`Options`]. Starts from the default configuration.
#[derive(Debug, Clone, Default)]
pub struct OptionsBuilder {
    options: Options,
}

impl OptionsBuilder {
    /// Add a tag key to the inline-flag exclusion set.
    #[must_use]
    pub fn with_inline_flag_exclude(mut self, key: impl Into<String>) -> Self {
        self.options.inline_flag_excludes.insert(key.into());
        self
    }

    /// Clear the exclusion set, so every inline span gets the `inline`
    /// flag.
    #[must_use]
    pub fn with_no_inline_flag_excludes(mut self) -> Self {
        self.options.inline_flag_excludes.clear();
        self
    }

    #[must_use]
    pub fn build(self) -> Options {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::Options;

    #[test]
    fn default_excludes_mathinline() {
        assert!(Options::default().inline_flag_excludes.contains("mathinline"));
    }

    #[test]
    fn builder_extends_the_exclusion_set() {
        let options = Options::builder()
            .with_inline_flag_exclude("mathdisplay")
            .build();
        assert!(options.inline_flag_excludes.contains("mathinline"));
        assert!(options.inline_flag_excludes.contains("mathdisplay"));
    }

    #[test]
    fn builder_can_clear_the_exclusion_set() {
        let options = Options::builder().with_no_inline_flag_excludes().build();
        assert!(options.inline_flag_excludes.is_empty());
    }
}
