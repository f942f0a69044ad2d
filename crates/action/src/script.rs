//! Script reference handling: default naming, path formatting and decoding.

use std::fmt;
use std::sync::Arc;

use crate::config::ScriptSettings;
use crate::error::{ActionError, Result};
use crate::resource::ResourceReader;

/// Upper-cases the first character of `s` and leaves the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `"<namespace>.validate<Name>"` for an action without an explicit reference.
///
/// `action` identifies the action in the error raised when `name` is empty.
pub fn default_script_ref(namespace: &str, name: &str, action: &str) -> Result<String> {
    if name.is_empty() {
        return Err(ActionError::missing_name(action));
    }
    Ok(format!("{namespace}.validate{}", capitalize(name)))
}

/// Turn a script reference into a resource path.
///
/// A reference starting with `/` is taken as a path already; only the leading
/// slash is removed. Otherwise dots become slashes and `suffix` is appended.
pub fn resource_path(reference: &str, suffix: &str) -> String {
    match reference.strip_prefix('/') {
        Some(path) => path.to_owned(),
        None => format!("{}{suffix}", reference.replace('.', "/")),
    }
}

/// Lossy UTF-8 decode; an empty resource counts as no script.
pub fn decode_script(bytes: &[u8]) -> Option<Arc<str>> {
    if bytes.is_empty() {
        return None;
    }
    Some(Arc::from(String::from_utf8_lossy(bytes)))
}

/// The collaborators a descriptor needs to resolve its script.
#[derive(Clone)]
pub struct ScriptResolver {
    reader: Arc<dyn ResourceReader>,
    settings: ScriptSettings,
}

impl ScriptResolver {
    /// Resolver over `reader` with default settings.
    pub fn new(reader: impl ResourceReader + 'static) -> Self {
        Self::from_arc(Arc::new(reader))
    }

    /// Resolver over an already shared reader.
    pub fn from_arc(reader: Arc<dyn ResourceReader>) -> Self {
        Self {
            reader,
            settings: ScriptSettings::default(),
        }
    }

    /// Replace the settings after validating them.
    pub fn with_settings(mut self, settings: ScriptSettings) -> Result<Self> {
        settings.validate()?;
        self.settings = settings;
        Ok(self)
    }

    /// The active settings.
    pub fn settings(&self) -> &ScriptSettings {
        &self.settings
    }

    /// Resource path for `reference` under these settings.
    pub fn path_for(&self, reference: &str) -> String {
        resource_path(reference, &self.settings.suffix)
    }

    /// Default reference for an action named `name`.
    pub fn default_ref(&self, name: &str, action: &str) -> Result<String> {
        default_script_ref(&self.settings.namespace, name, action)
    }

    /// Read and decode the script at `path`. Absent and empty both give `None`.
    pub fn load(&self, path: &str) -> Option<Arc<str>> {
        let script = self
            .reader
            .read_resource(path)
            .and_then(|bytes| decode_script(&bytes));
        if script.is_none() {
            tracing::debug!(path, "Unable to read script");
        }
        script
    }
}

impl fmt::Debug for ScriptResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptResolver")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
