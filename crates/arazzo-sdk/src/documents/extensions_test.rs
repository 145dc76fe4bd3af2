use super::{ExtensionKeyPolicy, Extensions};
use serde_json::json;

#[test]
fn verbatim_policy_keeps_hyphenated_keys() {
    let mut extensions = Extensions::default();
    extensions.capture("x-custom-extension", &json!("some-value"), ExtensionKeyPolicy::Verbatim);

    assert!(extensions.specification().contains_key("x-custom-extension"));
    assert_eq!(extensions.get("x-custom-extension"), Some(&json!("some-value")));
    assert_eq!(extensions.get("x_custom_extension"), Some(&json!("some-value")));
}

#[test]
fn normalized_policy_underscores_keys() {
    let mut extensions = Extensions::default();
    extensions.capture("x-custom-extension", &json!(1), ExtensionKeyPolicy::Normalized);

    assert!(extensions.specification().contains_key("x_custom_extension"));
    assert_eq!(extensions.get("x-custom-extension"), Some(&json!(1)));
}

#[test]
fn unknown_keys_are_kept_apart_and_serialized_in_order() {
    let mut extensions = Extensions::default();
    extensions.capture("zeta", &json!(true), ExtensionKeyPolicy::Verbatim);
    extensions.capture("x-b", &json!(2), ExtensionKeyPolicy::Verbatim);
    extensions.capture("x-a", &json!(1), ExtensionKeyPolicy::Verbatim);

    assert_eq!(extensions.unknown().get("zeta"), Some(&json!(true)));
    assert_eq!(extensions.get("zeta"), None);

    let text = serde_json::to_string(&extensions).expect("serialize");
    assert_eq!(text, r#"{"x-b":2,"x-a":1,"zeta":true}"#);
}

#[test]
fn normalized_policy_recaptures_underscored_keys_as_extensions() {
    let mut extensions = Extensions::default();
    extensions.capture("x_custom_extension", &json!("v"), ExtensionKeyPolicy::Normalized);

    assert!(extensions.unknown().is_empty());
    assert_eq!(extensions.get("x-custom-extension"), Some(&json!("v")));
}

#[test]
fn normalized_policy_collapses_colliding_spellings_to_the_later_value() {
    let mut extensions = Extensions::default();
    extensions.capture("x-a", &json!(1), ExtensionKeyPolicy::Normalized);
    extensions.capture("x_a", &json!(2), ExtensionKeyPolicy::Normalized);

    assert_eq!(extensions.specification().len(), 1);
    let text = serde_json::to_string(&extensions).expect("serialize");
    assert_eq!(text, r#"{"x_a":2}"#);
}

#[test]
fn verbatim_policy_leaves_underscored_keys_unknown() {
    let mut extensions = Extensions::default();
    extensions.capture("x_a", &json!(1), ExtensionKeyPolicy::Verbatim);

    assert_eq!(extensions.unknown().get("x_a"), Some(&json!(1)));
    assert!(extensions.specification().is_empty());
}
