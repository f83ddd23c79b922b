use tracing::warn;

use crate::browser::BrowserView;
use crate::request::{HttpMethod, PageRequest, ParamMap};
use crate::surface::{ContentPane, ScrollBehavior, SurfaceSettings, WebSurface};

/// Decides how the embedded web surface is constructed and populated.
pub trait ContentLoader {
    /// Create a surface in `pane` and issue the initial request.
    ///
    /// The default implementation handles GET and POST only; any other
    /// method returns `None` without touching the pane. The surface is
    /// configured with vertical-only non-bouncing scrolling and fills
    /// the pane.
    fn create_surface(
        &self,
        pane: &mut ContentPane,
        url: &str,
        method: HttpMethod,
        params: Option<&ParamMap>,
        javascript_enabled: bool,
    ) -> Option<Box<dyn WebSurface>> {
        let request = PageRequest::build(url, method, params)?;
        let settings = SurfaceSettings {
            javascript_enabled,
            scroll: ScrollBehavior::VerticalNoBounce,
        };
        let mut surface = match pane.spawn_surface(&settings) {
            Ok(surface) => surface,
            Err(e) => {
                warn!(error = %e, "surface creation failed");
                return None;
            }
        };
        if let Err(e) = surface.load(&request) {
            warn!(error = %e, url, "initial load failed");
            return None;
        }
        Some(surface)
    }

    /// Whether the progress bar is shown. Read on `show` and when this
    /// loader is bound.
    fn is_progress_bar_shown(&self) -> bool {
        false
    }

    /// Whether the navigation bar is shown. Read on `show` and when
    /// this loader is bound.
    fn is_navigation_bar_shown(&self) -> bool {
        true
    }

    /// Invoked once when the browser is dismissed.
    fn on_destroy(&self, _browser: &BrowserView) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::DefaultCapabilities;
    use crate::testing::MockFactory;
    use webpane_common::Rect;

    fn pane() -> (ContentPane, crate::testing::MockProbe) {
        let (factory, probe) = MockFactory::new();
        let mut pane = ContentPane::new(factory);
        pane.frame = Rect::new(0.0, 44.0, 320.0, 436.0);
        (pane, probe)
    }

    #[test]
    fn supported_methods_yield_a_surface() {
        for method in [HttpMethod::Get, HttpMethod::Post] {
            let (mut pane, _) = pane();
            let surface =
                DefaultCapabilities.create_surface(&mut pane, "http://x/", method, None, true);
            assert!(surface.is_some(), "{method} should create a surface");
        }
    }

    #[test]
    fn unsupported_method_yields_none_without_touching_the_pane() {
        let (mut pane, probe) = pane();
        let surface =
            DefaultCapabilities.create_surface(&mut pane, "http://x/", HttpMethod::Put, None, true);
        assert!(surface.is_none());
        assert_eq!(probe.surface_count(), 0);
    }

    #[test]
    fn surface_is_spawned_with_requested_settings() {
        let (mut pane, probe) = pane();
        DefaultCapabilities
            .create_surface(&mut pane, "http://x/", HttpMethod::Get, None, false)
            .unwrap();
        let settings = probe.settings_seen();
        assert_eq!(settings.len(), 1);
        assert!(!settings[0].javascript_enabled);
        assert_eq!(settings[0].scroll, ScrollBehavior::VerticalNoBounce);
    }

    #[test]
    fn surface_fills_the_pane() {
        let (mut pane, probe) = pane();
        DefaultCapabilities
            .create_surface(&mut pane, "http://x/", HttpMethod::Get, None, true)
            .unwrap();
        let state = probe.state(0);
        let state = state.lock().unwrap();
        assert_eq!(state.bounds[0], Rect::new(0.0, 44.0, 320.0, 436.0));
    }

    #[test]
    fn initial_request_is_issued() {
        let (mut pane, probe) = pane();
        let mut params = ParamMap::new();
        params.insert("a".into(), serde_json::json!("1"));
        DefaultCapabilities
            .create_surface(&mut pane, "http://x/", HttpMethod::Get, Some(&params), true)
            .unwrap();
        let state = probe.state(0);
        let state = state.lock().unwrap();
        assert_eq!(state.loads.len(), 1);
        assert_eq!(state.loads[0].url, "http://x/?a=1");
    }

    #[test]
    fn engine_failure_yields_none() {
        let (factory, probe) = MockFactory::failing();
        let mut pane = ContentPane::new(factory);
        let surface =
            DefaultCapabilities.create_surface(&mut pane, "http://x/", HttpMethod::Get, None, true);
        assert!(surface.is_none());
        assert_eq!(probe.surface_count(), 0);
    }

    #[test]
    fn default_visibility_flags() {
        assert!(!DefaultCapabilities.is_progress_bar_shown());
        assert!(DefaultCapabilities.is_navigation_bar_shown());
    }
}
