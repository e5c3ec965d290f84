use serde::Serialize;
use tracing::{debug, info};

use super::filter::filter_items;
use super::selection::{SelectionDraft, all_selected, shows_select_all, toggle_all, toggle_value};
use crate::config::ListSettings;
use crate::picker::{PickerConfig, PickerType, PickerValue};
use crate::store::{CloseOutcome, PickerStore};
use crate::surface::SurfaceError;

/// One visible row of the list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListRow {
    /// Position in the unfiltered item list.
    pub index: usize,
    pub label: String,
    pub checked: bool,
}

/// Headless view model of the list screen, handed to the rendering toolkit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListLayout {
    pub title: String,
    /// Multi-select needs an explicit confirm action; single-select commits on press.
    pub show_confirm_action: bool,
    pub show_search_bar: bool,
    pub search_placeholder: String,
    pub search_text: String,
    pub show_select_all: bool,
    pub select_all_checked: bool,
    pub show_empty_view: bool,
    pub show_selector: bool,
    pub rows: Vec<ListRow>,
}

/// Result of pressing a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PressOutcome {
    /// Single-select: the value was committed and a close was requested.
    Committed { close: CloseOutcome },
    /// Multi-select: the item's membership in the draft flipped.
    Toggled { selected: bool },
}

/// The in-app list picker screen.
///
/// Holds a draft seeded from the configuration on mount. Nothing reaches the
/// configuration's callbacks until a commit: a press in single-select mode,
/// or `confirm` in multi-select mode. `cancel` drops the draft.
pub struct ListScreen {
    store: PickerStore,
    config: PickerConfig,
    draft: SelectionDraft,
    query: String,
    search_placeholder: String,
    focused: bool,
}

impl ListScreen {
    /// Mount the screen for the store's active list picker.
    pub fn mount(store: PickerStore, settings: &ListSettings) -> Result<Self, SurfaceError> {
        let config = store.picker_config().ok_or(SurfaceError::NoActivePicker)?;
        if config.picker_type != PickerType::List {
            return Err(SurfaceError::WrongPickerType {
                expected: "list",
                actual: config.picker_type,
            });
        }

        let draft = SelectionDraft::seeded(&config);
        info!(
            event = "core.list.mounted",
            item_count = config.items.len(),
            multi_select = config.is_multi_select
        );
        debug!(event = "core.list.back_handler_attached");

        Ok(Self {
            store,
            config,
            draft,
            query: String::new(),
            search_placeholder: settings.search_placeholder().to_string(),
            focused: true,
        })
    }

    pub fn config(&self) -> &PickerConfig {
        &self.config
    }

    pub fn draft(&self) -> &SelectionDraft {
        &self.draft
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn layout(&self) -> ListLayout {
        let config = &self.config;
        let is_equal = |a: &PickerValue, b: &PickerValue| config.values_equal(a, b);

        let rows = filter_items(&config.items, &self.query)
            .into_iter()
            .map(|(index, item)| ListRow {
                index,
                label: item.label(),
                checked: self.draft.is_selected(item, is_equal),
            })
            .collect();

        let select_all_checked = match &self.draft {
            SelectionDraft::Multi(values) => all_selected(&config.items, values, is_equal),
            SelectionDraft::Single(_) => false,
        };

        ListLayout {
            title: config.title.clone().unwrap_or_default(),
            show_confirm_action: config.is_multi_select,
            show_search_bar: config.can_filter && !config.items.is_empty(),
            search_placeholder: self.search_placeholder.clone(),
            search_text: self.query.clone(),
            show_select_all: shows_select_all(config.is_multi_select, config.items.len()),
            select_all_checked,
            show_empty_view: config.items.is_empty(),
            show_selector: config.has_selector,
            rows,
        }
    }

    /// Narrow the visible rows. Never touches the draft.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        debug!(event = "core.list.query_changed", query = %self.query);
    }

    /// Press the row for `index` in the unfiltered item list.
    pub async fn press_item(&mut self, index: usize) -> Result<PressOutcome, SurfaceError> {
        let item = self
            .config
            .items
            .get(index)
            .cloned()
            .ok_or(SurfaceError::IndexOutOfRange {
                index,
                len: self.config.items.len(),
            })?;

        let config = &self.config;
        match &mut self.draft {
            SelectionDraft::Multi(values) => {
                *values = toggle_value(values, &item, |a, b| config.values_equal(a, b));
                let selected = values.iter().any(|value| config.values_equal(value, &item));
                debug!(event = "core.list.item_toggled", index = index, selected = selected);
                Ok(PressOutcome::Toggled { selected })
            }
            SelectionDraft::Single(selected) => {
                *selected = Some(item.clone());
                info!(event = "core.list.value_committed", index = index);
                self.config.notify_value(item);
                let close = self.store.close_picker().await?;
                Ok(PressOutcome::Committed { close })
            }
        }
    }

    /// Flip the select-all control. Returns false in single-select mode.
    pub fn toggle_select_all(&mut self) -> bool {
        let config = &self.config;
        match &mut self.draft {
            SelectionDraft::Multi(values) => {
                *values = toggle_all(&config.items, values, |a, b| config.values_equal(a, b));
                debug!(event = "core.list.select_all_toggled", selected = values.len());
                true
            }
            SelectionDraft::Single(_) => {
                debug!(event = "core.list.select_all_ignored", reason = "single select");
                false
            }
        }
    }

    /// Commit the draft and request close.
    pub async fn confirm(&mut self) -> Result<CloseOutcome, SurfaceError> {
        match &self.draft {
            SelectionDraft::Multi(values) => {
                info!(event = "core.list.values_committed", count = values.len());
                self.config.notify_values(values.clone());
            }
            SelectionDraft::Single(Some(value)) => {
                info!(event = "core.list.value_committed");
                self.config.notify_value(value.clone());
            }
            SelectionDraft::Single(None) => {
                debug!(event = "core.list.confirm_without_selection");
            }
        }
        Ok(self.store.close_picker().await?)
    }

    /// Drop the draft and request close without invoking callbacks.
    pub async fn cancel(&mut self) -> Result<CloseOutcome, SurfaceError> {
        info!(event = "core.list.cancelled");
        Ok(self.store.close_picker().await?)
    }

    /// Focus transitions attach and detach the back handler.
    pub fn set_focused(&mut self, focused: bool) {
        if self.focused == focused {
            return;
        }
        self.focused = focused;
        if focused {
            debug!(event = "core.list.back_handler_attached");
        } else {
            debug!(event = "core.list.back_handler_detached");
        }
    }

    /// Hardware back press. Returns whether the screen consumed it.
    pub async fn handle_back(&mut self) -> Result<bool, SurfaceError> {
        if !self.focused {
            debug!(event = "core.list.back_ignored", reason = "not focused");
            return Ok(false);
        }
        self.cancel().await?;
        Ok(true)
    }

    /// Pick up `change_config` patches made while mounted.
    ///
    /// The draft is kept unless the patch switched between single and multi
    /// select, in which case it is reseeded from the new configuration.
    pub fn refresh_config(&mut self) {
        match self.store.picker_config() {
            Some(config) => {
                if config.is_multi_select != self.config.is_multi_select {
                    self.draft = SelectionDraft::seeded(&config);
                    debug!(
                        event = "core.list.draft_reseeded",
                        is_multi_select = config.is_multi_select
                    );
                }
                self.config = config;
                debug!(
                    event = "core.list.config_refreshed",
                    item_count = self.config.items.len()
                );
            }
            None => debug!(event = "core.list.config_refresh_skipped"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SurfaceSettings;
    use crate::picker::PickerConfigPatch;
    use crate::store::CloseGate;
    use crate::surface::{
        NavigationCall, NavigationHandle, RecordingNavigator, SurfaceAction, SurfaceDispatcher,
    };
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Commits {
        value: Mutex<Vec<PickerValue>>,
        values: Mutex<Vec<Vec<PickerValue>>>,
    }

    fn recorded(config: PickerConfig) -> (PickerConfig, Arc<Commits>) {
        let commits = Arc::new(Commits::default());
        let value_sink = commits.clone();
        let values_sink = commits.clone();
        let config = config
            .on_value_change(move |v| value_sink.value.lock().unwrap().push(v))
            .on_values_change(move |vs| values_sink.values.lock().unwrap().push(vs));
        (config, commits)
    }

    fn mount(config: PickerConfig) -> (PickerStore, ListScreen) {
        let store = PickerStore::new();
        store.open_picker(config);
        let screen = ListScreen::mount(store.clone(), &ListSettings::default()).unwrap();
        (store, screen)
    }

    fn values(raw: &[&str]) -> Vec<PickerValue> {
        raw.iter().map(|v| PickerValue::from(*v)).collect()
    }

    #[tokio::test]
    async fn test_single_select_press_commits_and_closes_end_to_end() {
        let store = PickerStore::new();
        let navigator = Arc::new(RecordingNavigator::new());
        let handle: NavigationHandle = navigator.clone();
        store.init_navigation(handle);
        let mut dispatcher = SurfaceDispatcher::new(store.clone(), &SurfaceSettings::default());

        let (config, commits) = recorded(PickerConfig::list(["a", "b"]));
        store.open_picker(config);
        assert!(matches!(
            dispatcher.observe().unwrap(),
            Some(SurfaceAction::NavigatedToScreen { .. })
        ));

        let mut screen = ListScreen::mount(store.clone(), &ListSettings::default()).unwrap();
        let outcome = screen.press_item(1).await.unwrap();

        assert_eq!(
            outcome,
            PressOutcome::Committed {
                close: CloseOutcome::Closed
            }
        );
        assert_eq!(*commits.value.lock().unwrap(), values(&["b"]));
        assert!(store.should_close());
        assert!(!store.should_open());

        assert_eq!(
            dispatcher.observe().unwrap(),
            Some(SurfaceAction::NavigatedBack)
        );
        assert_eq!(navigator.calls().last(), Some(&NavigationCall::GoBack));
    }

    #[tokio::test]
    async fn test_multi_select_toggle_then_confirm() {
        let (config, commits) = recorded(
            PickerConfig::list(["1", "2", "mock data"]).multi_select(["1", "2"]),
        );
        let (store, mut screen) = mount(config);

        assert_eq!(
            screen.press_item(2).await.unwrap(),
            PressOutcome::Toggled { selected: true }
        );
        assert_eq!(
            screen.draft(),
            &SelectionDraft::Multi(values(&["1", "2", "mock data"]))
        );
        assert_eq!(
            screen.press_item(2).await.unwrap(),
            PressOutcome::Toggled { selected: false }
        );
        assert_eq!(screen.draft(), &SelectionDraft::Multi(values(&["1", "2"])));
        assert!(commits.values.lock().unwrap().is_empty());
        assert!(!store.should_close());

        screen.press_item(0).await.unwrap();
        assert_eq!(screen.confirm().await.unwrap(), CloseOutcome::Closed);
        assert_eq!(*commits.values.lock().unwrap(), vec![values(&["2"])]);
        assert!(commits.value.lock().unwrap().is_empty());
        assert!(store.should_close());
    }

    #[tokio::test]
    async fn test_cancel_discards_draft() {
        let (config, commits) = recorded(PickerConfig::list(["1", "2"]).multi_select(["1"]));
        let (store, mut screen) = mount(config);

        screen.press_item(1).await.unwrap();
        assert_eq!(screen.cancel().await.unwrap(), CloseOutcome::Closed);

        assert!(commits.values.lock().unwrap().is_empty());
        assert!(commits.value.lock().unwrap().is_empty());
        assert!(store.should_close());
        assert_eq!(store.picker_config().unwrap().selected_values, values(&["1"]));
    }

    #[test]
    fn test_select_all_toggle() {
        let (_store, mut screen) = mount(PickerConfig::list(["1", "2"]).multi_select(["1", "2"]));
        assert!(screen.layout().select_all_checked);

        assert!(screen.toggle_select_all());
        assert_eq!(screen.draft(), &SelectionDraft::Multi(Vec::new()));
        assert!(!screen.layout().select_all_checked);

        assert!(screen.toggle_select_all());
        assert_eq!(screen.draft(), &SelectionDraft::Multi(values(&["1", "2"])));
    }

    #[test]
    fn test_select_all_ignored_in_single_select() {
        let (_store, mut screen) = mount(PickerConfig::list(["1", "2"]));
        assert!(!screen.toggle_select_all());
        assert_eq!(screen.draft(), &SelectionDraft::Single(None));
    }

    #[test]
    fn test_select_all_hidden_for_single_item() {
        let (_store, screen) = mount(PickerConfig::list(["only"]).multi_select(Vec::<&str>::new()));
        assert!(!screen.layout().show_select_all);

        let (_store, screen) = mount(PickerConfig::list(["1", "2"]).multi_select(["3", "4"]));
        let layout = screen.layout();
        assert!(layout.show_select_all);
        assert!(!layout.select_all_checked);

        let (_store, screen) = mount(PickerConfig::list(["1", "2"]));
        assert!(!screen.layout().show_select_all);
    }

    #[test]
    fn test_layout_actions_and_search_bar() {
        let (_store, screen) = mount(PickerConfig::list(["1", "2"]).with_title("Numbers"));
        let layout = screen.layout();
        assert_eq!(layout.title, "Numbers");
        assert!(!layout.show_confirm_action);
        assert!(!layout.show_search_bar);
        assert!(layout.show_selector);
        assert_eq!(layout.search_placeholder, "Type to search");

        let (_store, screen) = mount(PickerConfig::list(["1", "2"]).filterable().multi_select(["1"]));
        let layout = screen.layout();
        assert!(layout.show_confirm_action);
        assert!(layout.show_search_bar);
        assert_eq!(
            layout.rows.iter().map(|r| r.checked).collect::<Vec<_>>(),
            vec![true, false]
        );
    }

    #[test]
    fn test_empty_items_render_empty_view() {
        let (_store, screen) = mount(PickerConfig::list(Vec::<&str>::new()).filterable());
        let layout = screen.layout();
        assert!(layout.show_empty_view);
        assert!(!layout.show_search_bar);
        assert!(layout.rows.is_empty());
    }

    #[test]
    fn test_filter_narrows_rows_without_touching_draft() {
        let (_store, mut screen) = mount(
            PickerConfig::list(["Apple", "Banana", "Pineapple"])
                .filterable()
                .multi_select(["Banana"]),
        );

        screen.set_query("apple");
        let layout = screen.layout();
        assert_eq!(layout.search_text, "apple");
        assert_eq!(
            layout.rows,
            vec![
                ListRow {
                    index: 0,
                    label: "Apple".to_string(),
                    checked: false
                },
                ListRow {
                    index: 2,
                    label: "Pineapple".to_string(),
                    checked: false
                },
            ]
        );
        assert_eq!(screen.draft(), &SelectionDraft::Multi(values(&["Banana"])));
    }

    #[tokio::test]
    async fn test_press_out_of_range() {
        let (_store, mut screen) = mount(PickerConfig::list(["a"]));
        assert_eq!(
            screen.press_item(5).await,
            Err(SurfaceError::IndexOutOfRange { index: 5, len: 1 })
        );
    }

    #[tokio::test]
    async fn test_back_only_handled_when_focused() {
        let (store, mut screen) = mount(PickerConfig::list(["a"]));

        screen.set_focused(false);
        assert!(!screen.handle_back().await.unwrap());
        assert!(!store.should_close());

        screen.set_focused(true);
        assert!(screen.handle_back().await.unwrap());
        assert!(store.should_close());
    }

    #[tokio::test]
    async fn test_confirm_vetoed_keeps_picker_open() {
        let (config, commits) = recorded(
            PickerConfig::list(["a", "b"])
                .multi_select(["a"])
                .on_before_close(CloseGate::from_fn(|| false)),
        );
        let (store, mut screen) = mount(config);

        assert_eq!(screen.confirm().await.unwrap(), CloseOutcome::Vetoed);
        assert_eq!(commits.values.lock().unwrap().len(), 1);
        assert!(store.should_open());
        assert!(!store.should_close());
    }

    #[tokio::test]
    async fn test_single_select_confirm_commits_draft() {
        let (config, commits) = recorded(PickerConfig::list(["a", "b"]).with_selected_value("a"));
        let (store, mut screen) = mount(config);

        screen.confirm().await.unwrap();
        assert_eq!(*commits.value.lock().unwrap(), values(&["a"]));
        assert!(store.should_close());
    }

    #[test]
    fn test_refresh_config_keeps_draft() {
        let (store, mut screen) = mount(PickerConfig::list(["1", "2"]).multi_select(["1"]));
        store.change_config(PickerConfigPatch::new().items(["1", "2", "3"]));

        screen.refresh_config();
        assert_eq!(screen.layout().rows.len(), 3);
        assert_eq!(screen.draft(), &SelectionDraft::Multi(values(&["1"])));
    }

    #[tokio::test]
    async fn test_refresh_config_follows_select_mode_change() {
        let (config, commits) = recorded(PickerConfig::list(["a", "b"]).with_selected_value("a"));
        let (store, mut screen) = mount(config);
        store.change_config(PickerConfigPatch {
            is_multi_select: Some(true),
            selected_values: Some(values(&["b"])),
            ..PickerConfigPatch::new()
        });

        screen.refresh_config();
        assert_eq!(screen.draft(), &SelectionDraft::Multi(values(&["b"])));
        assert!(screen.layout().show_select_all);

        let outcome = screen.press_item(0).await.unwrap();
        assert_eq!(outcome, PressOutcome::Toggled { selected: true });
        assert!(commits.value.lock().unwrap().is_empty());
        assert!(!store.should_close());

        screen.confirm().await.unwrap();
        assert_eq!(*commits.values.lock().unwrap(), vec![values(&["b", "a"])]);
    }

    #[test]
    fn test_mount_requires_active_list_picker() {
        let store = PickerStore::new();
        assert_eq!(
            ListScreen::mount(store.clone(), &ListSettings::default()).err(),
            Some(SurfaceError::NoActivePicker)
        );

        store.open_picker(PickerConfig::of_type(PickerType::Color));
        assert_eq!(
            ListScreen::mount(store, &ListSettings::default()).err(),
            Some(SurfaceError::WrongPickerType {
                expected: "list",
                actual: PickerType::Color
            })
        );
    }
}
