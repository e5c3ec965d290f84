use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::warn;

/// Route name of the in-app picker screen.
pub const PICKER_SCREEN_ROUTE_NAME: &str = "PickerScreen";

/// Host navigation controller.
///
/// The store only references it; the surface dispatcher is the only caller.
pub trait NavigationController: Send + Sync {
    /// Push the screen registered under `route`.
    fn navigate(&self, route: &str);

    /// Pop the top screen.
    fn go_back(&self);
}

pub type NavigationHandle = Arc<dyn NavigationController>;

/// A navigation call observed by [`RecordingNavigator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NavigationCall {
    Navigate { route: String },
    GoBack,
}

/// Headless navigation controller that records every call.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    calls: Mutex<Vec<NavigationCall>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<NavigationCall> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    fn record(&self, call: NavigationCall) {
        match self.calls.lock() {
            Ok(mut calls) => calls.push(call),
            Err(_) => warn!(event = "core.navigation.record_failed", call = ?call),
        }
    }
}

impl NavigationController for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.record(NavigationCall::Navigate {
            route: route.to_string(),
        });
    }

    fn go_back(&self) {
        self.record(NavigationCall::GoBack);
    }
}
