use std::fmt;

use serde::Serialize;
use uuid::Uuid;

use crate::picker::PickerConfig;
use crate::surface::navigation::NavigationHandle;

/// Where a picker is in its open/close lifecycle, derived from the flag pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PickerPhase {
    Idle,
    Opening,
    Closing,
}

/// The single shared coordination state.
///
/// `should_open`/`should_close` are kept as two flags rather than one enum so
/// a surface can detect the rising edge of each request independently.
#[derive(Clone, Default)]
pub struct CoordinationState {
    pub should_open: bool,
    pub should_close: bool,
    pub picker_config: Option<PickerConfig>,
    pub navigation: Option<NavigationHandle>,
    /// Correlates log events of one picker lifecycle. Assigned on open.
    pub invocation_id: Option<Uuid>,
}

impl CoordinationState {
    pub fn phase(&self) -> PickerPhase {
        match (self.should_open, self.should_close) {
            (_, true) => PickerPhase::Closing,
            (true, false) => PickerPhase::Opening,
            (false, false) => PickerPhase::Idle,
        }
    }
}

impl fmt::Debug for CoordinationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordinationState")
            .field("should_open", &self.should_open)
            .field("should_close", &self.should_close)
            .field("picker_config", &self.picker_config)
            .field("navigation", &self.navigation.is_some())
            .field("invocation_id", &self.invocation_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let state = CoordinationState::default();
        assert!(!state.should_open);
        assert!(!state.should_close);
        assert!(state.picker_config.is_none());
        assert!(state.navigation.is_none());
        assert_eq!(state.phase(), PickerPhase::Idle);
    }

    #[test]
    fn test_phase_from_flags() {
        let mut state = CoordinationState {
            should_open: true,
            ..CoordinationState::default()
        };
        assert_eq!(state.phase(), PickerPhase::Opening);

        state.should_open = false;
        state.should_close = true;
        assert_eq!(state.phase(), PickerPhase::Closing);
    }
}
