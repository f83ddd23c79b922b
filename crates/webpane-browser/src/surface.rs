//! The web-surface boundary.
//!
//! A [`WebSurface`] is one embedded web-rendering element: it loads a
//! [`PageRequest`], reports progress estimates, and surfaces pop-up and
//! dialog interceptions as [`SurfaceEvent`]s. Surfaces queue events
//! into an [`EventSink`] which the browser drains on its UI tick.
//! Dropping a surface releases its event registrations with it.

use std::sync::{Arc, Mutex};

use tracing::debug;
use webpane_common::{Color, Rect, SurfaceError, SurfaceId};

use crate::dialog::DialogRequest;
use crate::request::PageRequest;

/// State of a page load lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLoadState {
    /// Navigation has started.
    Started,
    /// Page has fully loaded.
    Finished,
}

/// Events emitted by a web surface, consumed by the owning browser.
#[derive(Debug)]
pub enum SurfaceEvent {
    /// The load-progress estimate changed. Value in [0, 1].
    ProgressChanged(f64),
    /// The page asked to open a new window with no target frame.
    PopupRequested { url: String },
    /// Page content raised a JavaScript dialog.
    DialogRequested(DialogRequest),
    /// Page load state changed. Carries the URL.
    PageLoad { state: PageLoadState, url: String },
    /// Document title changed.
    TitleChanged(String),
}

/// Shared event queue between a surface's engine callbacks and the
/// browser that drains it.
#[derive(Clone, Default)]
pub struct EventSink(Arc<Mutex<Vec<SurfaceEvent>>>);

impl EventSink {
    pub fn push(&self, event: SurfaceEvent) {
        if let Ok(mut events) = self.0.lock() {
            events.push(event);
        }
    }

    pub fn drain(&self) -> Vec<SurfaceEvent> {
        match self.0.lock() {
            Ok(mut events) => std::mem::take(&mut *events),
            Err(_) => Vec::new(),
        }
    }
}

/// How the surface's scroll viewport behaves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScrollBehavior {
    /// Vertical scrolling only, no bounce/overscroll.
    #[default]
    VerticalNoBounce,
    /// Whatever the engine does natively.
    Natural,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceSettings {
    pub javascript_enabled: bool,
    pub scroll: ScrollBehavior,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            javascript_enabled: true,
            scroll: ScrollBehavior::default(),
        }
    }
}

/// One embedded web surface.
pub trait WebSurface {
    fn id(&self) -> SurfaceId;

    /// Issue a request. The surface keeps it as its last request for
    /// [`WebSurface::reload`].
    fn load(&mut self, request: &PageRequest) -> Result<(), SurfaceError>;

    /// Re-issue the last request. No-op if nothing was ever loaded.
    fn reload(&mut self) -> Result<(), SurfaceError>;

    fn set_bounds(&mut self, bounds: Rect) -> Result<(), SurfaceError>;

    /// Drain queued events and deliver any pending dialog outcomes
    /// back into the page. Called once per UI tick by the browser.
    fn pump(&mut self) -> Vec<SurfaceEvent>;

    fn current_url(&self) -> &str;
}

/// Creates surfaces. The production factory builds `wry` webviews as
/// children of the host window; tests substitute their own.
pub trait SurfaceFactory {
    fn create(
        &mut self,
        settings: &SurfaceSettings,
        bounds: Rect,
    ) -> Result<Box<dyn WebSurface>, SurfaceError>;
}

/// The container region the web surface lives in. Spawned surfaces are
/// pinned to its frame; the browser's layout pass keeps surface bounds
/// in sync when the frame changes.
pub struct ContentPane {
    pub frame: Rect,
    pub background: Option<Color>,
    factory: Box<dyn SurfaceFactory>,
}

impl ContentPane {
    pub fn new(factory: Box<dyn SurfaceFactory>) -> Self {
        Self {
            frame: Rect::zero(),
            background: None,
            factory,
        }
    }

    /// Create a surface filling this pane.
    pub fn spawn_surface(
        &mut self,
        settings: &SurfaceSettings,
    ) -> Result<Box<dyn WebSurface>, SurfaceError> {
        let surface = self.factory.create(settings, self.frame)?;
        debug!(id = %surface.id(), "surface spawned");
        Ok(surface)
    }
}
