//! # Verdict Action Descriptors
//!
//! Metadata for a single named validation rule ("action") in a rule-based
//! field-validation system.
//!
//! This crate describes **what** an action is: the check it binds to, its
//! parameter list, its error message, the actions it depends on and an
//! optional client-side script. Running checks, ordering actions and parsing
//! rule-set documents are the rule engine's and loader's job.
//!
//! ## Core Types
//!
//! - [`ActionDescriptor`] — one rule; shared read-mostly across workers
//! - [`TokenList`] — a raw comma-separated spec together with its tokens
//! - [`ScriptResolver`] — resource reader plus naming settings used to
//!   resolve a descriptor's script on first request
//! - [`ResourceReader`] — collaborator that supplies raw script bytes
//! - [`ActionDefinition`] — serde shape of one action in a rule-set document
//! - [`ActionError`] — configuration faults (missing a script is not one)
//!
//! ## Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use verdict_action::{ActionDescriptor, MemoryResourceReader, ScriptResolver};
//!
//! let action = Arc::new(
//!     ActionDescriptor::new("minlength")
//!         .with_target("FieldChecks", "validate_min_length")
//!         .with_message_key("errors.minlength")
//!         .with_depends("required, integer"),
//! );
//! assert!(action.is_dependency("required"));
//!
//! let reader = MemoryResourceReader::new().with_resource(
//!     "verdict/scripts/validateMinlength.js",
//!     "function validateMinlength(form) {}",
//! );
//! let resolver = ScriptResolver::new(reader);
//! let script = action.script(&resolver).unwrap();
//! assert!(script.is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Serializable settings and the loader-facing action definition.
pub mod config;
/// The action descriptor itself.
pub mod descriptor;
/// Configuration errors.
pub mod error;
/// Resource readers that supply script bytes.
pub mod resource;
/// Script reference naming, path formatting and decoding.
pub mod script;
/// Comma-separated list tokenization.
pub mod tokens;

pub use config::{ActionDefinition, ScriptSettings};
pub use descriptor::{
    ACTION_PARAM, ActionDescriptor, BEAN_PARAM, DEFAULT_METHOD_PARAMS, FIELD_PARAM,
};
pub use error::{ActionError, Result, ScriptSource};
pub use resource::{FsResourceReader, MemoryResourceReader, ResourceReader};
pub use script::ScriptResolver;
pub use tokens::{TokenList, tokenize};
