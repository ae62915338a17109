//! Validation options.

/// Options controlling a validation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Detect the encoding of assessment files (default: true).
    ///
    /// When disabled the encoding is reported as `unknown`, which the
    /// `Encoding` check flags as a warning.
    pub encoding_detection: bool,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            encoding_detection: true,
        }
    }
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_encoding_detection(mut self, enabled: bool) -> Self {
        self.encoding_detection = enabled;
        self
    }
}
