use crate::color::ColorError;
use crate::datetime::FlowError;
use crate::errors::QuickpickError;
use crate::picker::PickerType;
use crate::store::CloseError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DispatchError {
    #[error("Navigation handle not initialized")]
    NavigationNotInitialized,

    #[error("Open requested without a picker configuration")]
    MissingPickerConfig,
}

impl QuickpickError for DispatchError {
    fn error_code(&self) -> &'static str {
        match self {
            DispatchError::NavigationNotInitialized => "NAVIGATION_NOT_INITIALIZED",
            DispatchError::MissingPickerConfig => "MISSING_PICKER_CONFIG",
        }
    }
}

/// Errors from a mounted picker surface (list screen, date/time, color).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    #[error("No active picker to mount")]
    NoActivePicker,

    #[error("Surface for {expected} pickers cannot present a {actual} picker")]
    WrongPickerType {
        expected: &'static str,
        actual: PickerType,
    },

    #[error("Item index {index} out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error(transparent)]
    Close(#[from] CloseError),

    #[error(transparent)]
    Flow(#[from] FlowError),

    #[error(transparent)]
    Color(#[from] ColorError),
}

impl QuickpickError for SurfaceError {
    fn error_code(&self) -> &'static str {
        match self {
            SurfaceError::NoActivePicker => "NO_ACTIVE_PICKER",
            SurfaceError::WrongPickerType { .. } => "WRONG_PICKER_TYPE",
            SurfaceError::IndexOutOfRange { .. } => "ITEM_INDEX_OUT_OF_RANGE",
            SurfaceError::Close(e) => e.error_code(),
            SurfaceError::Flow(e) => e.error_code(),
            SurfaceError::Color(e) => e.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            SurfaceError::NoActivePicker => false,
            SurfaceError::WrongPickerType { .. } => true,
            SurfaceError::IndexOutOfRange { .. } => true,
            SurfaceError::Close(e) => e.is_user_error(),
            SurfaceError::Flow(e) => e.is_user_error(),
            SurfaceError::Color(e) => e.is_user_error(),
        }
    }
}
