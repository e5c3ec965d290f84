use std::sync::Arc;

use serde::Serialize;
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use super::errors::DispatchError;
use super::overlay::{NativeOverlay, OverlayRequest};
use crate::config::SurfaceSettings;
use crate::picker::PickerType;
use crate::store::{CoordinationState, PickerStore};

/// Navigation step taken for one observed edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SurfaceAction {
    /// Pushed the in-app picker screen.
    NavigatedToScreen { route: String },
    /// Opened a native overlay; no navigation happened.
    OpenedOverlay { picker_type: PickerType },
    /// The native overlay declined, so the in-app screen was pushed instead.
    FellBackToScreen { route: String, picker_type: PickerType },
    /// Popped the in-app picker screen.
    NavigatedBack,
    /// Closed the native overlay and reset the store flags.
    ClosedOverlay { handled: bool },
    /// Close edge with no surface mounted; only the store flags were reset.
    ReleasedState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct EdgeSnapshot {
    should_open: bool,
    should_close: bool,
}

impl EdgeSnapshot {
    fn of(state: &CoordinationState) -> Self {
        Self {
            should_open: state.should_open,
            should_close: state.should_close,
        }
    }
}

#[derive(Debug)]
enum ActiveSurface {
    Screen,
    Overlay(OverlayRequest),
}

/// Turns store edges into navigation.
///
/// Keeps the last observed `(should_open, should_close)` pair and acts only on
/// a false→true transition of either flag, so re-evaluating an unchanged
/// state never navigates twice. Close is checked before open, and an open
/// edge is ignored while a close is pending.
pub struct SurfaceDispatcher {
    store: PickerStore,
    overlay: Option<Arc<dyn NativeOverlay>>,
    screen_route: String,
    native_types: Vec<PickerType>,
    last_seen: EdgeSnapshot,
    active: Option<ActiveSurface>,
}

impl SurfaceDispatcher {
    pub fn new(store: PickerStore, settings: &SurfaceSettings) -> Self {
        Self {
            store,
            overlay: None,
            screen_route: settings.screen_route().to_string(),
            native_types: settings.native_types(),
            last_seen: EdgeSnapshot::default(),
            active: None,
        }
    }

    pub fn with_overlay(mut self, overlay: Arc<dyn NativeOverlay>) -> Self {
        self.overlay = Some(overlay);
        self
    }

    pub fn has_active_surface(&self) -> bool {
        self.active.is_some()
    }

    /// Evaluate the store's current state once.
    pub fn observe(&mut self) -> Result<Option<SurfaceAction>, DispatchError> {
        let state = self.store.snapshot();
        self.observe_state(&state)
    }

    /// Evaluate `state` once. The edge is consumed even when acting on it fails.
    pub fn observe_state(
        &mut self,
        state: &CoordinationState,
    ) -> Result<Option<SurfaceAction>, DispatchError> {
        let previous = self.last_seen;
        self.last_seen = EdgeSnapshot::of(state);

        if state.should_close && !previous.should_close {
            return self.close_surface(state).map(Some);
        }

        if state.should_open && !previous.should_open && !state.should_close {
            return self.open_surface(state).map(Some);
        }

        Ok(None)
    }

    /// Observe every store notification until `shutdown` fires or its sender
    /// is dropped.
    pub async fn run(mut self, mut shutdown: oneshot::Receiver<()>) {
        let mut receiver = self.store.subscribe();
        debug!(event = "core.surface.dispatcher_started");

        loop {
            let state = receiver.borrow_and_update().clone();
            if let Err(e) = self.observe_state(&state) {
                error!(event = "core.surface.dispatch_failed", error = %e);
            }

            tokio::select! {
                changed = receiver.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = &mut shutdown => break,
            }
        }

        debug!(event = "core.surface.dispatcher_stopped");
    }

    fn open_surface(&mut self, state: &CoordinationState) -> Result<SurfaceAction, DispatchError> {
        let config = state
            .picker_config
            .as_ref()
            .ok_or(DispatchError::MissingPickerConfig)?;
        let picker_type = config.picker_type;

        if !self.native_types.contains(&picker_type) {
            self.navigate_to_screen(state)?;
            info!(
                event = "core.surface.screen_opened",
                invocation_id = ?state.invocation_id,
                picker_type = %picker_type
            );
            return Ok(SurfaceAction::NavigatedToScreen {
                route: self.screen_route.clone(),
            });
        }

        if let Some(overlay) = &self.overlay
            && overlay.supports(picker_type)
        {
            let request = OverlayRequest::from_config(config);
            if overlay.open(&request) {
                self.active = Some(ActiveSurface::Overlay(request));
                info!(
                    event = "core.surface.overlay_opened",
                    invocation_id = ?state.invocation_id,
                    picker_type = %picker_type
                );
                return Ok(SurfaceAction::OpenedOverlay { picker_type });
            }
        }

        warn!(
            event = "core.surface.overlay_fallback",
            invocation_id = ?state.invocation_id,
            picker_type = %picker_type,
            "Native overlay unavailable, using in-app screen"
        );
        self.navigate_to_screen(state)?;
        Ok(SurfaceAction::FellBackToScreen {
            route: self.screen_route.clone(),
            picker_type,
        })
    }

    fn close_surface(&mut self, state: &CoordinationState) -> Result<SurfaceAction, DispatchError> {
        match self.active.take() {
            Some(ActiveSurface::Screen) => {
                let navigation = state
                    .navigation
                    .as_ref()
                    .ok_or(DispatchError::NavigationNotInitialized)?;
                navigation.go_back();
                info!(
                    event = "core.surface.screen_closed",
                    invocation_id = ?state.invocation_id
                );
                Ok(SurfaceAction::NavigatedBack)
            }
            Some(ActiveSurface::Overlay(request)) => {
                let handled = self
                    .overlay
                    .as_ref()
                    .is_some_and(|overlay| overlay.close(&request));
                if !handled {
                    warn!(
                        event = "core.surface.overlay_close_unhandled",
                        invocation_id = ?state.invocation_id,
                        picker_type = %request.picker_type
                    );
                }
                self.store.picker_closed();
                info!(
                    event = "core.surface.overlay_closed",
                    invocation_id = ?state.invocation_id,
                    handled = handled
                );
                Ok(SurfaceAction::ClosedOverlay { handled })
            }
            None => {
                self.store.picker_closed();
                debug!(
                    event = "core.surface.state_released",
                    invocation_id = ?state.invocation_id
                );
                Ok(SurfaceAction::ReleasedState)
            }
        }
    }

    fn navigate_to_screen(&mut self, state: &CoordinationState) -> Result<(), DispatchError> {
        let navigation = state
            .navigation
            .as_ref()
            .ok_or(DispatchError::NavigationNotInitialized)?;
        navigation.navigate(&self.screen_route);
        self.active = Some(ActiveSurface::Screen);
        Ok(())
    }
}
