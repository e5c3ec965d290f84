//! Draft selection state and its pure update rules.

use crate::picker::{PickerConfig, PickerValue};

/// Local, uncommitted selection of a mounted list.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionDraft {
    Single(Option<PickerValue>),
    Multi(Vec<PickerValue>),
}

impl SelectionDraft {
    /// Seed the draft from the committed selection in `config`.
    pub fn seeded(config: &PickerConfig) -> Self {
        if config.is_multi_select {
            SelectionDraft::Multi(config.selected_values.clone())
        } else {
            SelectionDraft::Single(config.selected_value.clone())
        }
    }

    pub fn is_selected<F>(&self, item: &PickerValue, is_equal: F) -> bool
    where
        F: Fn(&PickerValue, &PickerValue) -> bool,
    {
        match self {
            SelectionDraft::Single(selected) => {
                selected.as_ref().is_some_and(|value| is_equal(value, item))
            }
            SelectionDraft::Multi(values) => contains(values, item, is_equal),
        }
    }
}

pub fn contains<F>(values: &[PickerValue], item: &PickerValue, is_equal: F) -> bool
where
    F: Fn(&PickerValue, &PickerValue) -> bool,
{
    values.iter().any(|value| is_equal(value, item))
}

/// Remove `item` when present, append it otherwise.
pub fn toggle_value<F>(values: &[PickerValue], item: &PickerValue, is_equal: F) -> Vec<PickerValue>
where
    F: Fn(&PickerValue, &PickerValue) -> bool,
{
    if contains(values, item, &is_equal) {
        values
            .iter()
            .filter(|value| !is_equal(*value, item))
            .cloned()
            .collect()
    } else {
        let mut toggled = values.to_vec();
        toggled.push(item.clone());
        toggled
    }
}

/// Clear when every item is already selected, select every item otherwise.
pub fn toggle_all<F>(items: &[PickerValue], values: &[PickerValue], is_equal: F) -> Vec<PickerValue>
where
    F: Fn(&PickerValue, &PickerValue) -> bool,
{
    if items.iter().all(|item| contains(values, item, &is_equal)) {
        Vec::new()
    } else {
        items.to_vec()
    }
}

pub fn all_selected<F>(items: &[PickerValue], values: &[PickerValue], is_equal: F) -> bool
where
    F: Fn(&PickerValue, &PickerValue) -> bool,
{
    !items.is_empty() && items.iter().all(|item| contains(values, item, &is_equal))
}

/// The select-all control only makes sense for a multi-select list with a
/// real choice to make.
pub fn shows_select_all(is_multi_select: bool, item_count: usize) -> bool {
    is_multi_select && item_count > 1
}
