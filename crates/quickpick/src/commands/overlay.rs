use std::sync::Mutex;

use serde::Serialize;
use tokio::sync::oneshot;
use tracing::warn;

use quickpick_core::PickerType;
use quickpick_core::surface::{NativeOverlay, OverlayRequest};

/// Overlay presentation recorded by [`ScriptedOverlay`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OverlayCall {
    Open { request: OverlayRequest, accepted: bool },
    CloseStage { picker_type: PickerType },
    OpenTimeStage { picker_type: PickerType, hour: u32, minute: u32 },
    Close { picker_type: PickerType },
}

/// Stand-in for a platform's native pickers.
///
/// Accepts every type it supports unless told to decline, in which case the
/// dispatcher falls back to the in-app screen.
pub struct ScriptedOverlay {
    supported: Vec<PickerType>,
    decline: bool,
    calls: Mutex<Vec<OverlayCall>>,
}

impl ScriptedOverlay {
    pub fn new(supported: Vec<PickerType>, decline: bool) -> Self {
        Self {
            supported,
            decline,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<OverlayCall> {
        match self.calls.lock() {
            Ok(calls) => calls.clone(),
            Err(_) => {
                warn!(event = "cli.overlay.lock_poisoned");
                Vec::new()
            }
        }
    }

    fn record(&self, call: OverlayCall) {
        match self.calls.lock() {
            Ok(mut calls) => calls.push(call),
            Err(_) => warn!(event = "cli.overlay.lock_poisoned"),
        }
    }
}

impl NativeOverlay for ScriptedOverlay {
    fn supports(&self, picker_type: PickerType) -> bool {
        self.supported.contains(&picker_type)
    }

    fn open(&self, request: &OverlayRequest) -> bool {
        let accepted = !self.decline;
        self.record(OverlayCall::Open {
            request: request.clone(),
            accepted,
        });
        accepted
    }

    fn close(&self, request: &OverlayRequest) -> bool {
        self.record(OverlayCall::Close {
            picker_type: request.picker_type,
        });
        true
    }

    /// The scripted dismiss finishes at once.
    fn close_stage(&self, request: &OverlayRequest) -> Option<oneshot::Receiver<()>> {
        self.record(OverlayCall::CloseStage {
            picker_type: request.picker_type,
        });
        let (done, completion) = oneshot::channel();
        // The receiver is still held, so this cannot fail.
        let _ = done.send(());
        Some(completion)
    }

    fn open_time_stage(&self, request: &OverlayRequest, time: (u32, u32)) -> bool {
        self.record(OverlayCall::OpenTimeStage {
            picker_type: request.picker_type,
            hour: time.0,
            minute: time.1,
        });
        true
    }
}
