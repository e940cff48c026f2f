use serde::{Deserialize, Serialize};

/// Upper bound on cascade passes used by [`BoardConfig::default`].
pub const DEFAULT_MAX_CASCADE_PASSES: usize = 1000;

/// Tunable board behaviour.
///
/// Missing fields take their default values when deserializing, so an empty
/// JSON object is a valid configuration.
///
/// # Example
///
/// ```
/// use match3_engine::BoardConfig;
///
/// let config: BoardConfig = serde_json::from_str(r#"{ "resolve_initial": true }"#).unwrap();
/// assert!(config.resolve_initial);
/// assert_eq!(config.max_cascade_passes, Some(1000));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Maximum number of clear/compact/refill passes a single move may take.
    ///
    /// `None` removes the bound, in which case a generator that keeps
    /// producing matches makes the move never return.
    pub max_cascade_passes: Option<usize>,
    /// Clear any matches left by the initial fill before the board is handed out.
    pub resolve_initial: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            max_cascade_passes: Some(DEFAULT_MAX_CASCADE_PASSES),
            resolve_initial: false,
        }
    }
}

impl BoardConfig {
    #[must_use]
    pub const fn with_max_cascade_passes(mut self, max: Option<usize>) -> Self {
        self.max_cascade_passes = max;
        self
    }

    #[must_use]
    pub const fn with_resolve_initial(mut self, resolve: bool) -> Self {
        self.resolve_initial = resolve;
        self
    }
}
