use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use super::types::{PickerType, PickerValue};
use crate::store::gate::CloseGate;

/// Invoked with the committed value of a single-select picker.
pub type ValueCallback = Arc<dyn Fn(PickerValue) + Send + Sync>;

/// Invoked with the committed set of a multi-select picker.
pub type ValuesCallback = Arc<dyn Fn(Vec<PickerValue>) + Send + Sync>;

/// Custom equality used for selection membership.
pub type EqualityFn = Arc<dyn Fn(&PickerValue, &PickerValue) -> bool + Send + Sync>;

/// Configuration of one picker invocation.
///
/// The store treats this as opaque; surfaces interpret it. Callbacks are
/// shared so the configuration can be cloned into every surface that needs
/// it. `surface_options` carries rendering customisations (top/bottom
/// views, custom option content, ...) that the core passes through untouched.
#[derive(Clone)]
pub struct PickerConfig {
    pub picker_type: PickerType,
    pub title: Option<String>,
    pub items: Vec<PickerValue>,
    pub selected_value: Option<PickerValue>,
    pub selected_values: Vec<PickerValue>,
    pub is_multi_select: bool,
    pub can_filter: bool,
    pub has_selector: bool,
    pub on_value_change: Option<ValueCallback>,
    pub on_values_change: Option<ValuesCallback>,
    pub on_before_close: Option<CloseGate>,
    pub is_equal: Option<EqualityFn>,
    pub surface_options: Map<String, Value>,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            picker_type: PickerType::default(),
            title: None,
            items: Vec::new(),
            selected_value: None,
            selected_values: Vec::new(),
            is_multi_select: false,
            can_filter: false,
            has_selector: true,
            on_value_change: None,
            on_values_change: None,
            on_before_close: None,
            is_equal: None,
            surface_options: Map::new(),
        }
    }
}

impl fmt::Debug for PickerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerConfig")
            .field("picker_type", &self.picker_type)
            .field("title", &self.title)
            .field("items", &self.items)
            .field("selected_value", &self.selected_value)
            .field("selected_values", &self.selected_values)
            .field("is_multi_select", &self.is_multi_select)
            .field("can_filter", &self.can_filter)
            .field("has_selector", &self.has_selector)
            .field("on_value_change", &self.on_value_change.is_some())
            .field("on_values_change", &self.on_values_change.is_some())
            .field("on_before_close", &self.on_before_close.is_some())
            .field("is_equal", &self.is_equal.is_some())
            .field("surface_options", &self.surface_options)
            .finish()
    }
}

impl PickerConfig {
    /// A single-select list picker over `items`.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<PickerValue>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// A picker of the given type with no items.
    pub fn of_type(picker_type: PickerType) -> Self {
        Self {
            picker_type,
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_selected_value(mut self, value: impl Into<PickerValue>) -> Self {
        self.selected_value = Some(value.into());
        self
    }

    /// Switch to multi-select, seeding the committed set.
    pub fn multi_select<I, V>(mut self, selected: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<PickerValue>,
    {
        self.is_multi_select = true;
        self.selected_values = selected.into_iter().map(Into::into).collect();
        self
    }

    pub fn filterable(mut self) -> Self {
        self.can_filter = true;
        self
    }

    pub fn on_value_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(PickerValue) + Send + Sync + 'static,
    {
        self.on_value_change = Some(Arc::new(callback));
        self
    }

    pub fn on_values_change<F>(mut self, callback: F) -> Self
    where
        F: Fn(Vec<PickerValue>) + Send + Sync + 'static,
    {
        self.on_values_change = Some(Arc::new(callback));
        self
    }

    pub fn on_before_close(mut self, gate: CloseGate) -> Self {
        self.on_before_close = Some(gate);
        self
    }

    pub fn with_equality<F>(mut self, is_equal: F) -> Self
    where
        F: Fn(&PickerValue, &PickerValue) -> bool + Send + Sync + 'static,
    {
        self.is_equal = Some(Arc::new(is_equal));
        self
    }

    /// Compare two values with the configured predicate, or `PartialEq`.
    pub fn values_equal(&self, a: &PickerValue, b: &PickerValue) -> bool {
        match &self.is_equal {
            Some(is_equal) => is_equal(a, b),
            None => a == b,
        }
    }

    pub(crate) fn notify_value(&self, value: PickerValue) {
        match &self.on_value_change {
            Some(callback) => callback(value),
            None => debug!(
                event = "core.picker.value_callback_missing",
                picker_type = %self.picker_type
            ),
        }
    }

    pub(crate) fn notify_values(&self, values: Vec<PickerValue>) {
        match &self.on_values_change {
            Some(callback) => callback(values),
            None => debug!(
                event = "core.picker.values_callback_missing",
                picker_type = %self.picker_type
            ),
        }
    }

    /// Apply a partial update. Fields present in `patch` override, all other
    /// fields are kept. `surface_options` is merged key by key.
    pub fn merge(&mut self, patch: PickerConfigPatch) {
        let PickerConfigPatch {
            picker_type,
            title,
            items,
            selected_value,
            selected_values,
            is_multi_select,
            can_filter,
            has_selector,
            on_value_change,
            on_values_change,
            on_before_close,
            is_equal,
            surface_options,
        } = patch;

        if let Some(picker_type) = picker_type {
            self.picker_type = picker_type;
        }
        if let Some(title) = title {
            self.title = Some(title);
        }
        if let Some(items) = items {
            self.items = items;
        }
        if let Some(selected_value) = selected_value {
            self.selected_value = Some(selected_value);
        }
        if let Some(selected_values) = selected_values {
            self.selected_values = selected_values;
        }
        if let Some(is_multi_select) = is_multi_select {
            self.is_multi_select = is_multi_select;
        }
        if let Some(can_filter) = can_filter {
            self.can_filter = can_filter;
        }
        if let Some(has_selector) = has_selector {
            self.has_selector = has_selector;
        }
        if let Some(callback) = on_value_change {
            self.on_value_change = Some(callback);
        }
        if let Some(callback) = on_values_change {
            self.on_values_change = Some(callback);
        }
        if let Some(gate) = on_before_close {
            self.on_before_close = Some(gate);
        }
        if let Some(is_equal) = is_equal {
            self.is_equal = Some(is_equal);
        }
        self.surface_options.extend(surface_options);
    }
}

/// A partial [`PickerConfig`] used by `change_config`.
///
/// `None` means "keep the current value".
#[derive(Clone, Default)]
pub struct PickerConfigPatch {
    pub picker_type: Option<PickerType>,
    pub title: Option<String>,
    pub items: Option<Vec<PickerValue>>,
    pub selected_value: Option<PickerValue>,
    pub selected_values: Option<Vec<PickerValue>>,
    pub is_multi_select: Option<bool>,
    pub can_filter: Option<bool>,
    pub has_selector: Option<bool>,
    pub on_value_change: Option<ValueCallback>,
    pub on_values_change: Option<ValuesCallback>,
    pub on_before_close: Option<CloseGate>,
    pub is_equal: Option<EqualityFn>,
    pub surface_options: Map<String, Value>,
}

impl PickerConfigPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn items<I, V>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<PickerValue>,
    {
        self.items = Some(items.into_iter().map(Into::into).collect());
        self
    }

    pub fn surface_option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.surface_options.insert(key.into(), value);
        self
    }
}

impl fmt::Debug for PickerConfigPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerConfigPatch")
            .field("picker_type", &self.picker_type)
            .field("title", &self.title)
            .field("items", &self.items)
            .field("selected_value", &self.selected_value)
            .field("selected_values", &self.selected_values)
            .field("is_multi_select", &self.is_multi_select)
            .field("can_filter", &self.can_filter)
            .field("has_selector", &self.has_selector)
            .field("surface_options", &self.surface_options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;

    #[test]
    fn test_default_config_has_selector() {
        let config = PickerConfig::default();
        assert_eq!(config.picker_type, PickerType::List);
        assert!(config.has_selector);
        assert!(!config.is_multi_select);
        assert!(config.items.is_empty());
    }

    #[test]
    fn test_successive_patches_accumulate() {
        let mut config = PickerConfig::list(["1", "2"]).with_title("Fruit");

        config.merge(PickerConfigPatch::new().surface_option("a", json!(1)));
        config.merge(PickerConfigPatch::new().surface_option("b", json!(2)));

        assert_eq!(config.surface_options.get("a"), Some(&json!(1)));
        assert_eq!(config.surface_options.get("b"), Some(&json!(2)));
        assert_eq!(config.title.as_deref(), Some("Fruit"));
        assert_eq!(config.items.len(), 2);
    }

    #[test]
    fn test_patch_overrides_only_present_fields() {
        let mut config = PickerConfig::list(["old"])
            .with_title("Old title")
            .multi_select(["old"]);

        config.merge(PickerConfigPatch::new().items(["new-1", "new-2"]));

        assert_eq!(
            config.items,
            vec![PickerValue::from("new-1"), PickerValue::from("new-2")]
        );
        assert_eq!(config.title.as_deref(), Some("Old title"));
        assert!(config.is_multi_select);
        assert_eq!(config.selected_values, vec![PickerValue::from("old")]);
    }

    #[test]
    fn test_patch_replaces_callbacks() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut config = PickerConfig::list(["a"]).on_value_change(|_| {});

        config.merge(PickerConfigPatch {
            on_value_change: Some(Arc::new(move |value| sink.lock().unwrap().push(value))),
            ..PickerConfigPatch::default()
        });
        config.notify_value(PickerValue::from("a"));

        assert_eq!(*seen.lock().unwrap(), vec![PickerValue::from("a")]);
    }

    #[test]
    fn test_values_equal_uses_custom_predicate() {
        let config = PickerConfig::list(["Apple"]).with_equality(|a, b| {
            a.label().eq_ignore_ascii_case(&b.label())
        });
        assert!(config.values_equal(&PickerValue::from("apple"), &PickerValue::from("APPLE")));

        let plain = PickerConfig::list(["Apple"]);
        assert!(!plain.values_equal(&PickerValue::from("apple"), &PickerValue::from("APPLE")));
    }

    #[test]
    fn test_notify_without_callback_is_silent() {
        let config = PickerConfig::list(["a"]);
        config.notify_value(PickerValue::from("a"));
        config.notify_values(vec![PickerValue::from("a")]);
    }

    #[test]
    fn test_debug_hides_callbacks() {
        let config = PickerConfig::list(["a"]).on_value_change(|_| {});
        let debug = format!("{:?}", config);
        assert!(debug.contains("on_value_change: true"));
        assert!(debug.contains("on_before_close: false"));
    }
}
