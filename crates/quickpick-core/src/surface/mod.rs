//! Picker surfaces and the dispatcher that mounts them.
//!
//! - [`dispatcher`] - Edge-triggered navigation for store transitions
//! - [`navigation`] - Host navigation controller contract
//! - [`overlay`] - Native overlay contract and request mapping
//! - [`route`] - Route table entry for the in-app screen

pub mod dispatcher;
pub mod errors;
pub mod navigation;
pub mod overlay;
pub mod route;

pub use dispatcher::{SurfaceAction, SurfaceDispatcher};
pub use errors::{DispatchError, SurfaceError};
pub use navigation::{
    NavigationCall, NavigationController, NavigationHandle, PICKER_SCREEN_ROUTE_NAME,
    RecordingNavigator,
};
pub use overlay::{NativeOverlay, OverlayOption, OverlayRequest};
pub use route::{RouteConfig, ScreenPresentation, route_config};
