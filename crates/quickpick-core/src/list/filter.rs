use crate::picker::PickerValue;

/// Items whose label contains `query`, ignoring case, with their index in
/// the full item list. A blank query keeps every item.
pub fn filter_items<'a>(items: &'a [PickerValue], query: &str) -> Vec<(usize, &'a PickerValue)> {
    let needle = query.trim().to_lowercase();
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| needle.is_empty() || item.label().to_lowercase().contains(&needle))
        .collect()
}
