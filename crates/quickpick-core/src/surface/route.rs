use serde::Serialize;

use crate::config::SurfaceSettings;

/// How the host navigator should present the picker screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenPresentation {
    /// Modal sliding up from the bottom edge.
    ModalSlideFromBottom,
}

/// Route table entry the host registers with its navigator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteConfig {
    pub name: String,
    pub presentation: ScreenPresentation,
}

/// Routes quickpick needs registered.
pub fn route_config(settings: &SurfaceSettings) -> Vec<RouteConfig> {
    vec![RouteConfig {
        name: settings.screen_route().to_string(),
        presentation: ScreenPresentation::ModalSlideFromBottom,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_config_default() {
        let routes = route_config(&SurfaceSettings::default());
        assert_eq!(
            routes,
            vec![RouteConfig {
                name: "PickerScreen".to_string(),
                presentation: ScreenPresentation::ModalSlideFromBottom,
            }]
        );
    }

    #[test]
    fn test_route_config_uses_configured_route() {
        let settings = SurfaceSettings {
            screen_route: Some("Chooser".to_string()),
            ..SurfaceSettings::default()
        };
        assert_eq!(route_config(&settings)[0].name, "Chooser");
    }
}
