//! The action descriptor: one named validation rule and everything the rule
//! engine needs to know about it.
//!
//! Plain fields are configured through `&mut self` while the loader still
//! owns the descriptor. Once it is shared (typically behind an `Arc`), the
//! engine reads it concurrently:
//!
//! - the dependency and parameter lists are immutable [`TokenList`]
//!   snapshots swapped in whole by [`set_depends`](ActionDescriptor::set_depends)
//!   and [`set_method_params`](ActionDescriptor::set_method_params);
//! - the client-side script is resolved at most once, on first request,
//!   under a lock owned by this descriptor alone. Later reads skip the lock.

use std::any::Any;
use std::fmt;
use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;
use parking_lot::{Mutex, RwLock};

use crate::error::{ActionError, Result, ScriptSource};
use crate::script::ScriptResolver;
use crate::tokens::TokenList;

/// Parameter slot for the object being validated.
pub const BEAN_PARAM: &str = "bean";
/// Parameter slot for the descriptor of the running action.
pub const ACTION_PARAM: &str = "action";
/// Parameter slot for the field under validation.
pub const FIELD_PARAM: &str = "field";

/// Parameter list used until [`ActionDescriptor::set_method_params`] is called.
pub const DEFAULT_METHOD_PARAMS: &str = "bean,action,field";

type Instance = Arc<dyn Any + Send + Sync>;

/// Metadata binding a rule name to its check, parameters, message,
/// dependencies and optional client-side script.
pub struct ActionDescriptor {
    name: String,
    target_class: String,
    target_method: String,
    message_key: String,
    method_params: ArcSwap<TokenList>,
    depends: ArcSwap<TokenList>,
    script_function_name: Option<String>,
    script_ref: Option<String>,
    script_body: Option<Arc<str>>,
    /// `Some(None)` is a settled "no script".
    resolved: OnceLock<Option<Arc<str>>>,
    resolve_lock: Mutex<()>,
    instance: RwLock<Option<Instance>>,
}

impl ActionDescriptor {
    /// Create a descriptor with the default parameter list and no dependencies.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            target_class: String::new(),
            target_method: String::new(),
            message_key: String::new(),
            method_params: ArcSwap::from_pointee(TokenList::parse(DEFAULT_METHOD_PARAMS)),
            depends: ArcSwap::from_pointee(TokenList::default()),
            script_function_name: None,
            script_ref: None,
            script_body: None,
            resolved: OnceLock::new(),
            resolve_lock: Mutex::new(()),
            instance: RwLock::new(None),
        }
    }

    /// Set the type and method that implement the check.
    pub fn with_target(
        mut self,
        target_class: impl Into<String>,
        target_method: impl Into<String>,
    ) -> Self {
        self.target_class = target_class.into();
        self.target_method = target_method.into();
        self
    }

    /// Set the default error message key.
    pub fn with_message_key(mut self, key: impl Into<String>) -> Self {
        self.message_key = key.into();
        self
    }

    /// Set the comma-separated dependency list.
    pub fn with_depends(self, spec: impl Into<String>) -> Self {
        self.set_depends(spec);
        self
    }

    /// Set the comma-separated parameter type list.
    pub fn with_method_params(self, spec: impl Into<String>) -> Self {
        self.set_method_params(spec);
        self
    }

    // ---------------------------------------------------------------------
    // Plain fields
    // ---------------------------------------------------------------------

    /// The rule name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the action.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Symbolic name of the type holding the check.
    pub fn target_class(&self) -> &str {
        &self.target_class
    }

    /// Set the type holding the check.
    pub fn set_target_class(&mut self, target_class: impl Into<String>) {
        self.target_class = target_class.into();
    }

    /// Symbolic name of the check.
    pub fn target_method(&self) -> &str {
        &self.target_method
    }

    /// Set the check name.
    pub fn set_target_method(&mut self, target_method: impl Into<String>) {
        self.target_method = target_method.into();
    }

    /// Default error message key.
    pub fn message_key(&self) -> &str {
        &self.message_key
    }

    /// Set the default error message key.
    pub fn set_message_key(&mut self, key: impl Into<String>) {
        self.message_key = key.into();
    }

    // ---------------------------------------------------------------------
    // Comma-separated lists
    // ---------------------------------------------------------------------

    /// Raw parameter type spec as last set.
    pub fn method_params_spec(&self) -> String {
        self.method_params.load().raw().to_owned()
    }

    /// Snapshot of the parameter types, in call order.
    pub fn method_params(&self) -> Arc<TokenList> {
        self.method_params.load_full()
    }

    /// Replace the parameter type list.
    pub fn set_method_params(&self, spec: impl Into<String>) {
        self.method_params.store(Arc::new(TokenList::parse(spec)));
    }

    /// Raw dependency spec as last set.
    pub fn depends(&self) -> String {
        self.depends.load().raw().to_owned()
    }

    /// Snapshot of the names this action depends on.
    ///
    /// Readers racing with [`set_depends`](Self::set_depends) see either the
    /// old list or the new one, never a mix.
    pub fn dependency_list(&self) -> Arc<TokenList> {
        self.depends.load_full()
    }

    /// Replace the dependency list.
    pub fn set_depends(&self, spec: impl Into<String>) {
        self.depends.store(Arc::new(TokenList::parse(spec)));
    }

    /// Returns `true` if `action` appears in the dependency list.
    pub fn is_dependency(&self, action: &str) -> bool {
        self.depends.load().contains(action)
    }

    // ---------------------------------------------------------------------
    // Script configuration
    // ---------------------------------------------------------------------

    /// Name used instead of [`name`](Self::name) when deriving the default
    /// script reference.
    pub fn script_function_name(&self) -> Option<&str> {
        self.script_function_name.as_deref()
    }

    /// Override the name used for the default script reference.
    pub fn set_script_function_name(&mut self, function_name: impl Into<String>) {
        self.script_function_name = Some(function_name.into());
    }

    /// Explicit script reference, if configured.
    pub fn script_ref(&self) -> Option<&str> {
        self.script_ref.as_deref()
    }

    /// Point the script at a resource.
    ///
    /// Fails if a literal script body has already been set.
    pub fn set_script_ref(&mut self, reference: impl Into<String>) -> Result<()> {
        if self.script_body.is_some() {
            return Err(self.conflict(ScriptSource::Reference, ScriptSource::Body));
        }
        self.script_ref = Some(reference.into());
        Ok(())
    }

    /// The script, whether set literally or already resolved.
    ///
    /// Never triggers resolution; see [`script`](Self::script).
    pub fn script_body(&self) -> Option<&str> {
        match self.resolved.get() {
            Some(resolved) => resolved.as_deref(),
            None => self.script_body.as_deref(),
        }
    }

    /// Supply the script literally.
    ///
    /// Fails if a script reference has already been set.
    pub fn set_script_body(&mut self, body: impl Into<String>) -> Result<()> {
        if self.script_ref.is_some() {
            return Err(self.conflict(ScriptSource::Body, ScriptSource::Reference));
        }
        let body: String = body.into();
        self.script_body = Some(Arc::from(body));
        Ok(())
    }

    /// The name, or `class::method` for an unnamed action.
    fn label(&self) -> String {
        if self.name.is_empty() {
            format!("{}::{}", self.target_class, self.target_method)
        } else {
            self.name.clone()
        }
    }

    fn conflict(&self, attempted: ScriptSource, existing: ScriptSource) -> ActionError {
        tracing::warn!(
            action = %self.name,
            %attempted,
            %existing,
            "Rejected conflicting script configuration"
        );
        ActionError::conflicting(self.name.clone(), attempted, existing)
    }

    // ---------------------------------------------------------------------
    // Script resolution
    // ---------------------------------------------------------------------

    /// Returns `true` once resolution has settled, with or without a script.
    pub fn is_script_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }

    /// Resolve the script if that has not happened yet.
    pub fn ensure_script_loaded(&self, resolver: &ScriptResolver) -> Result<()> {
        self.script(resolver).map(drop)
    }

    /// The client-side script for this action, resolving it on first call.
    ///
    /// `Ok(None)` means there is no script; that outcome is cached like any
    /// other. Only configuration faults are errors, and those are not cached.
    pub fn script(&self, resolver: &ScriptResolver) -> Result<Option<Arc<str>>> {
        if let Some(resolved) = self.resolved.get() {
            return Ok(resolved.clone());
        }

        let _guard = self.resolve_lock.lock();
        if let Some(resolved) = self.resolved.get() {
            return Ok(resolved.clone());
        }

        let script = self.resolve(resolver)?;
        Ok(self.resolved.get_or_init(|| script).clone())
    }

    fn resolve(&self, resolver: &ScriptResolver) -> Result<Option<Arc<str>>> {
        if let Some(body) = &self.script_body {
            return Ok(Some(Arc::clone(body)));
        }

        tracing::trace!(action = %self.name, "Loading script");

        let reference = match self.script_ref.as_deref().filter(|r| !r.is_empty()) {
            Some(reference) => reference.to_owned(),
            None => {
                let base = self
                    .script_function_name
                    .as_deref()
                    .filter(|n| !n.is_empty())
                    .unwrap_or(&self.name);
                resolver.default_ref(base, &self.label())?
            }
        };

        let path = resolver.path_for(&reference);
        tracing::trace!(action = %self.name, %path, "Loading script resource");

        let script = resolver.load(&path);
        tracing::trace!(
            action = %self.name,
            found = script.is_some(),
            "Script loading completed"
        );
        Ok(script)
    }

    // ---------------------------------------------------------------------
    // Bound instance
    // ---------------------------------------------------------------------

    /// The instance stored by the engine, if it has type `T`.
    pub fn bound_instance<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        let instance = self.instance.read().clone()?;
        instance.downcast::<T>().ok()
    }

    /// Returns `true` if any instance is stored.
    pub fn has_bound_instance(&self) -> bool {
        self.instance.read().is_some()
    }

    /// Store an instance for reuse, replacing any previous one.
    pub fn set_bound_instance<T: Any + Send + Sync>(&self, instance: Arc<T>) {
        *self.instance.write() = Some(instance);
    }

    /// Drop the stored instance.
    pub fn clear_bound_instance(&self) {
        *self.instance.write() = None;
    }
}

impl fmt::Display for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ActionDescriptor: {}", self.name)
    }
}

impl fmt::Debug for ActionDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDescriptor")
            .field("name", &self.name)
            .field("target_class", &self.target_class)
            .field("target_method", &self.target_method)
            .field("message_key", &self.message_key)
            .field("method_params", &self.method_params.load().as_slice())
            .field("depends", &self.depends.load().as_slice())
            .field("script_function_name", &self.script_function_name)
            .field("script_ref", &self.script_ref)
            .field("script_resolved", &self.is_script_resolved())
            .field("has_bound_instance", &self.has_bound_instance())
            .finish_non_exhaustive()
    }
}
