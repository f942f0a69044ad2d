//! Serializable configuration: script resolution settings and the flat
//! loader-facing shape of one action.

use serde::{Deserialize, Serialize};

use crate::descriptor::ActionDescriptor;
use crate::error::{ActionError, Result};

/// Namespace used for default script references when none is configured.
pub const DEFAULT_SCRIPT_NAMESPACE: &str = "verdict.scripts";

/// Suffix appended to dotted script references.
pub const DEFAULT_SCRIPT_SUFFIX: &str = ".js";

/// Settings that shape how a script reference becomes a resource path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptSettings {
    /// Dotted namespace prefixed to derived default references.
    pub namespace: String,
    /// Suffix appended to dotted references when forming a path.
    pub suffix: String,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_SCRIPT_NAMESPACE.to_owned(),
            suffix: DEFAULT_SCRIPT_SUFFIX.to_owned(),
        }
    }
}

impl ScriptSettings {
    /// Settings with a custom namespace and the default suffix.
    pub fn with_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Check that the settings can produce well-formed references.
    pub fn validate(&self) -> Result<()> {
        if self.namespace.trim().is_empty() {
            return Err(ActionError::invalid_settings("namespace must not be empty"));
        }
        if self.namespace.starts_with('.') || self.namespace.ends_with('.') {
            return Err(ActionError::invalid_settings(format!(
                "namespace `{}` must not start or end with `.`",
                self.namespace
            )));
        }
        if !self.suffix.is_empty() && !self.suffix.starts_with('.') {
            return Err(ActionError::invalid_settings(format!(
                "suffix `{}` must start with `.`",
                self.suffix
            )));
        }
        Ok(())
    }
}

/// One action as it appears in a rule-set document.
///
/// Loaders deserialize this and convert it with [`TryFrom`]; the conversion
/// goes through the descriptor's setters, so a definition carrying both a
/// `script_ref` and a `script` fails with
/// [`ActionError::ConflictingScriptConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionDefinition {
    /// Rule name other actions refer to in `depends`.
    pub name: String,
    /// Symbolic name of the type holding the check.
    pub target_class: String,
    /// Symbolic name of the check itself.
    pub target_method: String,
    /// Comma-separated parameter types; `None` keeps the default list.
    pub method_params: Option<String>,
    /// Comma-separated names of actions this one depends on.
    pub depends: String,
    /// Default error message key.
    pub message_key: String,
    /// Overrides `name` when deriving the default script reference.
    pub script_function_name: Option<String>,
    /// Explicit script resource reference.
    pub script_ref: Option<String>,
    /// Literal script body.
    pub script: Option<String>,
}

impl TryFrom<ActionDefinition> for ActionDescriptor {
    type Error = ActionError;

    fn try_from(def: ActionDefinition) -> Result<Self> {
        let mut descriptor = Self::new(def.name)
            .with_target(def.target_class, def.target_method)
            .with_message_key(def.message_key);

        if let Some(params) = def.method_params {
            descriptor.set_method_params(params);
        }
        descriptor.set_depends(def.depends);

        if let Some(function_name) = def.script_function_name {
            descriptor.set_script_function_name(function_name);
        }
        if let Some(reference) = def.script_ref {
            descriptor.set_script_ref(reference)?;
        }
        if let Some(body) = def.script {
            descriptor.set_script_body(body)?;
        }
        Ok(descriptor)
    }
}
