//! Scanner configuration.

/// Longest reference name, in bytes, the scanner will look for before the `;`.
pub const DEFAULT_MAX_ENTITY_LENGTH: usize = 32;

/// Settings for a [`Scanner`](crate::Scanner).
///
/// The defaults scan every element's content as ordinary character data.
/// [`ScanOptions::html`] treats `script` and `style` as raw text the way an
/// HTML parser does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Elements whose content runs, unscanned, to the matching end tag.
    /// Matched case-insensitively.
    pub raw_text_elements: Vec<String>,
    /// Print each recovery through the warning system as well as recording
    /// it. Off by default; the CLI turns it on.
    pub log_recoveries: bool,
    /// Longest reference name to consider.
    pub max_entity_length: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            raw_text_elements: Vec::new(),
            log_recoveries: false,
            max_entity_length: DEFAULT_MAX_ENTITY_LENGTH,
        }
    }
}

impl ScanOptions {
    /// Options for HTML documents: `script` and `style` hold raw text.
    #[must_use]
    pub fn html() -> Self {
        Self::default()
            .with_raw_text_element("script")
            .with_raw_text_element("style")
    }

    /// Add an element whose content is raw text.
    #[must_use]
    pub fn with_raw_text_element(mut self, name: impl Into<String>) -> Self {
        self.raw_text_elements.push(name.into());
        self
    }

    /// Turn recovery warnings on or off.
    #[must_use]
    pub const fn with_log_recoveries(mut self, enabled: bool) -> Self {
        self.log_recoveries = enabled;
        self
    }

    /// Set the longest reference name to consider.
    #[must_use]
    pub const fn with_max_entity_length(mut self, length: usize) -> Self {
        self.max_entity_length = length;
        self
    }

    /// Whether `name` is configured as a raw text element.
    #[must_use]
    pub fn is_raw_text_element(&self, name: &str) -> bool {
        self.raw_text_elements
            .iter()
            .any(|element| element.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_preset() {
        let options = ScanOptions::html();
        assert!(options.is_raw_text_element("script"));
        assert!(options.is_raw_text_element("STYLE"));
        assert!(!options.is_raw_text_element("textarea"));
        assert!(!options.log_recoveries);
    }

    #[test]
    fn test_default_has_no_raw_text() {
        assert!(!ScanOptions::default().is_raw_text_element("script"));
    }

    #[test]
    fn test_logging_is_opt_in() {
        assert!(!ScanOptions::default().log_recoveries);
        assert!(ScanOptions::default().with_log_recoveries(true).log_recoveries);
    }
}
