//! Canonical cache keys.
//!
//! Keys have the shape `{resource}_{params}` where `resource` is usually a
//! `{namespace}_{operation}` pair (e.g. `projects_getAll`) and `params` is the
//! JSON encoding of the request parameters sorted by name. [`Params`] is a
//! `BTreeMap`, so the order parameters were inserted in never leaks into the
//! key.

use std::collections::BTreeMap;

use serde_json::Value;

/// Request parameters, ordered by name.
pub type Params = BTreeMap<String, Value>;

/// Build the canonical cache key for `resource` called with `params`.
///
/// ```rust
/// # use portfolio_api::cache::{generate_key, Params};
/// let mut a = Params::new();
/// a.insert("b".into(), 2.into());
/// a.insert("a".into(), 1.into());
/// assert_eq!(generate_key("projects", &a), r#"projects_{"a":1,"b":2}"#);
/// ```
pub fn generate_key(resource: &str, params: &Params) -> String {
    // A string-keyed map of JSON values always serializes.
    let encoded = serde_json::to_string(params).unwrap_or_else(|_| String::from("{}"));
    format!("{resource}_{encoded}")
}

/// Join a resource namespace and an operation name into a key resource.
pub fn namespaced(namespace: &str, operation: &str) -> String {
    format!("{namespace}_{operation}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_params_encode_as_empty_object() {
        assert_eq!(generate_key("contact-messages_getAll", &Params::new()), "contact-messages_getAll_{}");
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let mut first = Params::new();
        first.insert("page".into(), json!(2));
        first.insert("category".into(), json!("web"));

        let mut second = Params::new();
        second.insert("category".into(), json!("web"));
        second.insert("page".into(), json!(2));

        assert_eq!(generate_key("projects", &first), generate_key("projects", &second));
    }

    #[test]
    fn different_values_give_different_keys() {
        let mut first = Params::new();
        first.insert("page".into(), json!(1));
        let mut second = Params::new();
        second.insert("page".into(), json!(2));

        assert_ne!(generate_key("projects", &first), generate_key("projects", &second));
    }

    #[test]
    fn namespaced_joins_with_underscore() {
        assert_eq!(namespaced("projects", "getFeatured"), "projects_getFeatured");
    }
}
