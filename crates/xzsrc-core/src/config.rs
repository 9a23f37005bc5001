//! Extraction policy configuration.

/// Default name the archive's top-level directory is rewritten to.
pub const DEFAULT_ROOT_NAME: &str = "xz";

/// Default ceiling for a single regular file when the native filter is off.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Policy for one extraction call.
///
/// Everything the extractor needs is carried here; there is no global state.
/// The caller decides once whether the native member filter is available and
/// passes that decision in.
///
/// # Examples
///
/// ```
/// use xzsrc_core::ExtractConfig;
///
/// let config = ExtractConfig::default()
///     .with_root_name("liblzma")
///     .with_native_filter(false);
/// assert_eq!(config.root_name, "liblzma");
/// assert_eq!(config.max_file_size, 100 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Name that replaces the archive's top-level directory.
    pub root_name: String,

    /// Largest regular file accepted by the manual filter, in bytes.
    pub max_file_size: u64,

    /// Whether the native "data" member filter is available.
    ///
    /// When `true`, file modes are sanitized the way the data filter does it.
    /// When `false`, modes are applied as stored (masked to `0o777`) and the
    /// `max_file_size` ceiling is enforced instead.
    pub native_filter: bool,
}

impl Default for ExtractConfig {
    /// Default values:
    /// - `root_name`: `"xz"`
    /// - `max_file_size`: 100 MiB
    /// - `native_filter`: true
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            native_filter: true,
        }
    }
}

impl ExtractConfig {
    /// Sets the name the archive root is rewritten to.
    #[must_use]
    pub fn with_root_name(mut self, name: impl Into<String>) -> Self {
        self.root_name = name.into();
        self
    }

    /// Sets the manual-filter file size ceiling.
    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Declares whether the native member filter is available.
    #[must_use]
    pub fn with_native_filter(mut self, available: bool) -> Self {
        self.native_filter = available;
        self
    }
}
