use std::fmt;

/// Result alias for descriptor operations.
pub type Result<T> = std::result::Result<T, ActionError>;

/// The two mutually exclusive ways a loader can supply a client-side script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScriptSource {
    /// A symbolic reference to a script resource.
    Reference,
    /// A literal script body.
    Body,
}

impl fmt::Display for ScriptSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference => f.write_str("script reference"),
            Self::Body => f.write_str("script body"),
        }
    }
}

/// Error type for descriptor configuration.
///
/// Every variant is a configuration fault: the loader or whoever builds the
/// rule set gave the descriptor something it cannot honour. A script that
/// cannot be found is not an error and never shows up here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ActionError {
    /// A script reference and a literal script body were both supplied.
    #[error("action `{action}`: cannot set a {attempted} after a {existing} has been set")]
    ConflictingScriptConfig {
        /// Name of the offending action (may be empty if not named yet).
        action: String,
        /// The setter that was rejected.
        attempted: ScriptSource,
        /// The configuration already present.
        existing: ScriptSource,
    },

    /// A default script reference was requested for an action with no name.
    #[error("cannot derive a default script reference for action `{action}`: it has no name")]
    MissingName {
        /// The unnamed action, identified by its target (`class::method`).
        action: String,
    },

    /// Script resolution settings are unusable.
    #[error("invalid script settings: {reason}")]
    InvalidSettings {
        /// What is wrong with the settings.
        reason: String,
    },
}

impl ActionError {
    /// Create a conflicting-script error.
    pub fn conflicting(
        action: impl Into<String>,
        attempted: ScriptSource,
        existing: ScriptSource,
    ) -> Self {
        Self::ConflictingScriptConfig {
            action: action.into(),
            attempted,
            existing,
        }
    }

    /// Create a missing-name error for `action`.
    pub fn missing_name(action: impl Into<String>) -> Self {
        Self::MissingName {
            action: action.into(),
        }
    }

    /// Create an invalid-settings error.
    pub fn invalid_settings(reason: impl Into<String>) -> Self {
        Self::InvalidSettings {
            reason: reason.into(),
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConflictingScriptConfig { .. } => "conflicting_script_config",
            Self::MissingName { .. } => "missing_name",
            Self::InvalidSettings { .. } => "invalid_settings",
        }
    }

    /// Returns `true` if the error was raised by a script setter.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::ConflictingScriptConfig { .. })
    }
}
