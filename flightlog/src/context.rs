//! Accumulated grouping and bound attributes for derived sink views.
//!
//! A [`Context`] carries the dotted group namespace and the attributes a
//! derived recorder view stamps onto every record it accepts. Contexts are
//! plain immutable values: derivation clones and extends, the parent is never
//! touched, so concurrent derivation from a shared parent needs no
//! synchronization.
//!
//! Attributes are qualified eagerly. A pair bound via [`Context::with_attrs`]
//! is stored under the group prefix in force *at bind time*; opening a group
//! afterwards does not retroactively re-prefix it. Call-site attributes get
//! the full current prefix when a record is assembled.

use crate::record::Attr;

/// Immutable bundle of group namespace and bound attributes.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Ordered group names forming the dotted key prefix.
    groups: Vec<String>,
    /// Attribute pairs merged ahead of call-site attributes, keys already
    /// qualified by the prefix in force when they were bound.
    bound: Vec<Attr>,
}

impl Context {
    /// Creates an empty context: no groups, no bound attributes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derives a context with `name` appended to the group prefix.
    ///
    /// An empty name is inert and derives an equivalent context, so callers
    /// never produce keys with empty dotted segments.
    pub fn with_group(&self, name: &str) -> Self {
        let mut derived = self.clone();
        if !name.is_empty() {
            derived.groups.push(name.to_string());
        }
        derived
    }

    /// Derives a context with additional bound attributes.
    ///
    /// The pairs are qualified with the current group prefix and appended
    /// after any previously bound attributes.
    pub fn with_attrs(&self, attrs: &[Attr]) -> Self {
        let mut derived = self.clone();
        derived
            .bound
            .extend(attrs.iter().map(|(key, value)| (self.qualify(key), value.clone())));
        derived
    }

    /// Qualifies a key with the current dotted group prefix.
    pub fn qualify(&self, key: &str) -> String {
        if self.groups.is_empty() {
            return key.to_string();
        }

        let mut qualified =
            String::with_capacity(self.groups.iter().map(|g| g.len() + 1).sum::<usize>() + key.len());
        for group in &self.groups {
            qualified.push_str(group);
            qualified.push('.');
        }
        qualified.push_str(key);
        qualified
    }

    /// Merges bound attributes ahead of qualified call-site attributes into
    /// the final attribute list for one record.
    pub(crate) fn merge(&self, attrs: &[Attr]) -> Vec<Attr> {
        let mut merged = Vec::with_capacity(self.bound.len() + attrs.len());
        merged.extend(self.bound.iter().cloned());
        merged.extend(attrs.iter().map(|(key, value)| (self.qualify(key), value.clone())));
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys(attrs: &[Attr]) -> Vec<&str> {
        attrs.iter().map(|(k, _)| k.as_str()).collect()
    }

    #[test]
    fn test_empty_context_passes_keys_through() {
        let ctx = Context::new();
        assert_eq!(ctx.qualify("port"), "port");

        let merged = ctx.merge(&[("port".to_string(), json!(8080))]);
        assert_eq!(keys(&merged), vec!["port"]);
    }

    #[test]
    fn test_group_prefixes_call_site_keys() {
        let ctx = Context::new().with_group("request").with_group("peer");
        assert_eq!(ctx.qualify("addr"), "request.peer.addr");
    }

    #[test]
    fn test_empty_group_is_inert() {
        let ctx = Context::new().with_group("");
        assert_eq!(ctx.qualify("key"), "key");
    }

    #[test]
    fn test_bound_attrs_keep_bind_time_prefix() {
        let ctx = Context::new()
            .with_attrs(&[("service".to_string(), json!("api"))])
            .with_group("request")
            .with_attrs(&[("id".to_string(), json!(7))]);

        let merged = ctx.merge(&[("path".to_string(), json!("/healthz"))]);
        // "service" was bound before the group opened, so it stays bare;
        // later keys carry the prefix.
        assert_eq!(keys(&merged), vec!["service", "request.id", "request.path"]);
    }

    #[test]
    fn test_bound_attrs_precede_call_site_attrs() {
        let ctx = Context::new().with_attrs(&[("a".to_string(), json!(1))]);
        let merged = ctx.merge(&[("b".to_string(), json!(2))]);
        assert_eq!(keys(&merged), vec!["a", "b"]);
    }

    #[test]
    fn test_derivation_leaves_parent_unchanged() {
        let parent = Context::new().with_attrs(&[("a".to_string(), json!(1))]);
        let _child = parent.with_group("g").with_attrs(&[("b".to_string(), json!(2))]);

        let merged = parent.merge(&[]);
        assert_eq!(keys(&merged), vec!["a"]);
        assert_eq!(parent.qualify("x"), "x");
    }
}
