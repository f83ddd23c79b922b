//! Embeddable in-app browser pane.
//!
//! `BrowserView` composes a web surface (backed by `wry`), an optional
//! navigation bar, and an optional progress indicator inside a host
//! window region. Hosts customize it through three traits, each of
//! which carries default behavior:
//! - [`ContentLoader`] — how the web surface is created and populated
//! - [`NavBarDelegate`] — navigation-bar content and button behavior
//! - [`ProgressObserver`] — page-load progress forwarding
//!
//! JavaScript dialogs (alert/confirm/prompt) raised by page content are
//! intercepted and routed to a [`DialogHost`] as single-shot
//! [`DialogResponder`]s; pop-up window requests are suppressed and
//! loaded into the same surface instead.

pub mod browser;
pub mod capabilities;
pub mod chrome;
pub mod dialog;
pub mod request;
pub mod surface;
pub mod wry_surface;

#[cfg(test)]
pub(crate) mod testing;

pub use browser::{BrowserState, BrowserView, NAV_BAR_HEIGHT, PROGRESS_BAR_HEIGHT};
pub use capabilities::{ContentLoader, DefaultCapabilities, NavBarDelegate, ProgressObserver};
pub use chrome::{BarButton, ContentMode, NavigationBar, ProgressBar, ProgressIndicator, TitleLabel};
pub use dialog::{
    DialogHost, DialogKind, DialogOutcome, DialogRequest, DialogResponder, NullDialogHost,
    OutcomeSink,
};
pub use request::{HttpMethod, PageRequest, ParamMap};
pub use surface::{
    ContentPane, EventSink, PageLoadState, ScrollBehavior, SurfaceEvent, SurfaceFactory,
    SurfaceSettings, WebSurface,
};
pub use wry_surface::{WrySurface, WrySurfaceFactory};
