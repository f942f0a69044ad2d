use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use verdict_action::resource::from_fn;
use verdict_action::{
    ActionDefinition, ActionDescriptor, ActionError, MemoryResourceReader, ScriptResolver,
    ScriptSettings,
};

#[derive(Default)]
struct PathRecorder(Mutex<Vec<String>>);

impl PathRecorder {
    fn record(&self, path: &str) {
        self.0.lock().push(path.to_owned());
    }

    fn paths(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

fn counting_resolver(body: &'static [u8]) -> (ScriptResolver, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let resolver = ScriptResolver::new(from_fn(move |_path| {
        counter.fetch_add(1, Ordering::SeqCst);
        Some(body.to_vec())
    }));
    (resolver, calls)
}

#[test]
fn required_action_end_to_end() {
    let action = ActionDescriptor::new("required")
        .with_depends("")
        .with_method_params("bean,action,field");

    assert!(action.dependency_list().is_empty());
    assert_eq!(action.method_params().as_slice(), ["bean", "action", "field"]);
    assert!(!action.is_dependency("anything"));
}

#[test]
fn resetting_same_depends_is_idempotent() {
    let action = ActionDescriptor::new("minlength");
    action.set_depends("a,b");
    let first = action.dependency_list();
    action.set_depends("a,b");
    let second = action.dependency_list();
    assert_eq!(first, second);
    assert_eq!(second.as_slice(), ["a", "b"]);
}

#[test]
fn script_resolution_is_memoized() {
    let (resolver, calls) = counting_resolver(b"function validateTire() {}");
    let action = ActionDescriptor::new("tire");

    let first = action.script(&resolver).unwrap();
    let second = action.script(&resolver).unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(first, second);
    assert_eq!(first.as_deref(), Some("function validateTire() {}"));
}

#[test]
fn absent_result_is_memoized_too() {
    let (resolver, calls) = counting_resolver(b"");
    let action = ActionDescriptor::new("tire");

    assert_eq!(action.script(&resolver).unwrap(), None);
    assert_eq!(action.script(&resolver).unwrap(), None);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn not_found_and_empty_both_mean_no_script() {
    let not_found = ScriptResolver::new(from_fn(|_| None));
    let empty = ScriptResolver::new(from_fn(|_| Some(Vec::new())));

    assert_eq!(ActionDescriptor::new("a").script(&not_found).unwrap(), None);
    assert_eq!(ActionDescriptor::new("a").script(&empty).unwrap(), None);
}

#[test]
fn default_path_follows_configured_namespace() {
    let seen = Arc::new(PathRecorder::default());
    let recorder = Arc::clone(&seen);
    let resolver = ScriptResolver::new(from_fn(move |path| {
        recorder.record(path);
        None
    }))
    .with_settings(ScriptSettings::with_namespace("com.acme.rules"))
    .unwrap();

    ActionDescriptor::new("tire").ensure_script_loaded(&resolver).unwrap();
    assert_eq!(seen.paths(), vec!["com/acme/rules/validateTire.js".to_owned()]);
}

#[test]
fn empty_reference_derives_the_default_path() {
    let seen = Arc::new(PathRecorder::default());
    let recorder = Arc::clone(&seen);
    let resolver = ScriptResolver::new(from_fn(move |path| {
        recorder.record(path);
        None
    }));

    let mut action = ActionDescriptor::new("tire");
    action.set_script_ref("").unwrap();
    action.ensure_script_loaded(&resolver).unwrap();

    assert_eq!(seen.paths(), vec!["verdict/scripts/validateTire.js".to_owned()]);
}

#[test]
fn empty_name_error_is_not_cached() {
    let (resolver, calls) = counting_resolver(b"x");
    let mut action = ActionDescriptor::new("").with_target("FieldChecks", "validate_tire");

    assert_eq!(
        action.script(&resolver),
        Err(ActionError::missing_name("FieldChecks::validate_tire"))
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    action.set_name("later");
    assert_eq!(action.script(&resolver).unwrap().as_deref(), Some("x"));
}

#[test]
fn definitions_load_from_json_rule_set() {
    let defs: Vec<ActionDefinition> = serde_json::from_str(
        r#"[
            { "name": "required", "target_class": "FieldChecks", "target_method": "validate_required",
              "message_key": "errors.required" },
            { "name": "mask", "target_class": "FieldChecks", "target_method": "validate_mask",
              "depends": "required", "message_key": "errors.invalid",
              "script": "function validateMask(form) { return true; }" }
        ]"#,
    )
    .unwrap();

    let actions = defs
        .into_iter()
        .map(ActionDescriptor::try_from)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let reader = MemoryResourceReader::new();
    let resolver = ScriptResolver::new(reader);

    assert_eq!(actions[0].script(&resolver).unwrap(), None);
    assert!(actions[1].is_dependency("required"));
    assert_eq!(
        actions[1].script(&resolver).unwrap().as_deref(),
        Some("function validateMask(form) { return true; }")
    );
}
