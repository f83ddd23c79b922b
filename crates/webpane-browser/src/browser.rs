//! The composing browser container.
//!
//! `BrowserView` owns the chrome (navigation bar, progress bar), the
//! content pane, and at most one live web surface. Hosts drive it with
//! `show` / `load` / `reload` / `dismiss` and tick `pump_events` from
//! their UI loop.

use std::rc::Rc;

use tracing::{debug, warn};
use webpane_common::{Color, Rect};

use crate::capabilities::{ContentLoader, DefaultCapabilities, NavBarDelegate, ProgressObserver};
use crate::chrome::{NavigationBar, ProgressBar};
use crate::dialog::{DialogHost, DialogRequest, NullDialogHost};
use crate::request::{HttpMethod, PageRequest, ParamMap};
use crate::surface::{ContentPane, SurfaceEvent, SurfaceFactory, WebSurface};

/// Height of the navigation-bar strip, in logical units.
pub const NAV_BAR_HEIGHT: f64 = 44.0;
/// Height of the progress strip, in logical units.
pub const PROGRESS_BAR_HEIGHT: f64 = 2.0;

/// Lifecycle of a browser instance. `Dismissed` is terminal; a
/// dismissed browser is not reusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserState {
    Unattached,
    Attached,
    Loaded,
    Dismissed,
}

pub struct BrowserView {
    state: BrowserState,
    /// Own frame within the parent, set on `show`.
    frame: Rect,
    /// Fallback parent frame when `show` is called without one.
    host_frame: Rect,
    parent: Option<Rect>,

    url: Option<String>,
    http_method: HttpMethod,
    params: Option<ParamMap>,
    javascript_enabled: bool,

    navigation_bar_visible: bool,
    progress_bar_visible: bool,
    background: Option<Color>,
    theme_color: Option<Color>,
    page_title: Option<String>,

    pub content_pane: ContentPane,
    pub navigation_bar: NavigationBar,
    pub progress_bar: ProgressBar,
    surface: Option<Box<dyn WebSurface>>,

    content_loader: Option<Rc<dyn ContentLoader>>,
    nav_bar_delegate: Option<Rc<dyn NavBarDelegate>>,
    progress_observer: Option<Rc<dyn ProgressObserver>>,
    dialog_host: Box<dyn DialogHost>,
    defaults: Rc<DefaultCapabilities>,
}

impl BrowserView {
    /// Build a browser with the standard chrome. `host_frame` is the
    /// host's main-window frame, used when `show` is called without an
    /// explicit parent.
    pub fn new(factory: Box<dyn SurfaceFactory>, host_frame: Rect) -> Self {
        Self {
            state: BrowserState::Unattached,
            frame: Rect::zero(),
            host_frame,
            parent: None,
            url: None,
            http_method: HttpMethod::Get,
            params: None,
            javascript_enabled: true,
            navigation_bar_visible: true,
            progress_bar_visible: false,
            background: None,
            theme_color: None,
            page_title: None,
            content_pane: ContentPane::new(factory),
            navigation_bar: NavigationBar::default(),
            progress_bar: ProgressBar {
                hidden: true,
                ..ProgressBar::default()
            },
            surface: None,
            content_loader: None,
            nav_bar_delegate: None,
            progress_observer: None,
            dialog_host: Box::new(NullDialogHost),
            defaults: Rc::new(DefaultCapabilities),
        }
    }

    // -----------------------------------------------------------------
    // Capability bindings
    // -----------------------------------------------------------------

    /// Bind a content loader. Both visibility flags are re-read from it
    /// immediately.
    pub fn set_content_loader(&mut self, loader: Rc<dyn ContentLoader>) {
        self.content_loader = Some(loader);
        let loader = self.content_loader();
        self.set_navigation_bar_visible(loader.is_navigation_bar_shown());
        self.set_progress_bar_visible(loader.is_progress_bar_shown());
    }

    /// Bind a navigation-bar delegate. The bar content is refreshed
    /// eagerly, not on the next layout.
    pub fn set_nav_bar_delegate(&mut self, delegate: Rc<dyn NavBarDelegate>) {
        self.nav_bar_delegate = Some(delegate);
        self.refresh_navigation_bar();
    }

    pub fn set_progress_observer(&mut self, observer: Rc<dyn ProgressObserver>) {
        self.progress_observer = Some(observer);
    }

    /// Bind the presenting context for intercepted JavaScript dialogs.
    pub fn set_dialog_host(&mut self, host: Box<dyn DialogHost>) {
        self.dialog_host = host;
    }

    fn content_loader(&self) -> Rc<dyn ContentLoader> {
        match &self.content_loader {
            Some(loader) => Rc::clone(loader),
            None => self.defaults.clone() as Rc<dyn ContentLoader>,
        }
    }

    fn nav_bar_delegate(&self) -> Rc<dyn NavBarDelegate> {
        match &self.nav_bar_delegate {
            Some(delegate) => Rc::clone(delegate),
            None => self.defaults.clone() as Rc<dyn NavBarDelegate>,
        }
    }

    fn progress_observer(&self) -> Rc<dyn ProgressObserver> {
        match &self.progress_observer {
            Some(observer) => Rc::clone(observer),
            None => self.defaults.clone() as Rc<dyn ProgressObserver>,
        }
    }

    // -----------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------

    /// Attach to a parent region, or to the host window frame when
    /// `parent` is `None`. Sizes self to fill the parent, re-reads both
    /// visibility flags, and re-applies layout. Calling again
    /// re-parents.
    pub fn show(&mut self, parent: Option<Rect>) {
        if self.state == BrowserState::Dismissed {
            warn!("show called on a dismissed browser");
            return;
        }
        let target = parent.unwrap_or(self.host_frame);
        self.parent = Some(target);
        self.frame = target;
        if self.state == BrowserState::Unattached {
            self.state = BrowserState::Attached;
        }
        let loader = self.content_loader();
        self.set_navigation_bar_visible(loader.is_navigation_bar_shown());
        self.set_progress_bar_visible(loader.is_progress_bar_shown());
    }

    /// Load `url` with JavaScript enabled. See [`BrowserView::load_with`].
    pub fn load(&mut self, url: &str, method: HttpMethod, params: Option<ParamMap>) -> bool {
        self.load_with(url, method, params, true)
    }

    /// Store the request parameters and delegate to the content loader
    /// for a new surface, replacing any previous one. Returns `false`
    /// when the loader yields no surface (unsupported method or engine
    /// failure); the previous surface is discarded either way.
    pub fn load_with(
        &mut self,
        url: &str,
        method: HttpMethod,
        params: Option<ParamMap>,
        javascript_enabled: bool,
    ) -> bool {
        if self.state == BrowserState::Dismissed {
            warn!("load called on a dismissed browser");
            return false;
        }
        self.url = Some(url.to_string());
        self.http_method = method;
        self.params = params;
        self.javascript_enabled = javascript_enabled;

        let loader = self.content_loader();
        let surface = loader.create_surface(
            &mut self.content_pane,
            url,
            method,
            self.params.as_ref(),
            javascript_enabled,
        );
        if let Some(old) = self.surface.take() {
            debug!(id = %old.id(), "replacing surface");
        }
        match surface {
            Some(surface) => {
                self.surface = Some(surface);
                self.state = BrowserState::Loaded;
                self.layout();
                true
            }
            None => {
                warn!(%method, url, "content loader produced no surface");
                false
            }
        }
    }

    /// Re-issue the current surface's last request. Explicit no-op
    /// before any successful `load`.
    pub fn reload(&mut self) {
        match self.surface.as_mut() {
            Some(surface) => {
                if let Err(e) = surface.reload() {
                    warn!(error = %e, "reload failed");
                }
            }
            None => warn!("reload called before load, ignoring"),
        }
    }

    /// Detach from the parent, fire the destroy callback, and release
    /// the surface. Terminal; repeated calls are no-ops.
    pub fn dismiss(&mut self) {
        if self.state == BrowserState::Dismissed {
            return;
        }
        self.state = BrowserState::Dismissed;
        self.parent = None;
        debug!("browser dismissed");
        let loader = self.content_loader();
        loader.on_destroy(self);
        self.surface = None;
    }

    // -----------------------------------------------------------------
    // Event pump
    // -----------------------------------------------------------------

    /// Drain the surface's events and route them: progress to the
    /// indicator and observer, pop-ups back into the same surface,
    /// dialogs to the dialog host. Call once per UI tick.
    pub fn pump_events(&mut self) {
        let events = match self.surface.as_mut() {
            Some(surface) => surface.pump(),
            None => return,
        };
        for event in events {
            match event {
                SurfaceEvent::ProgressChanged(value) => {
                    self.progress_bar.indicator.set_value(value);
                    let observer = self.progress_observer();
                    observer.on_progress(self, value);
                }
                SurfaceEvent::PopupRequested { url } => {
                    debug!(url = %url, "pop-up suppressed, loading in place");
                    if let Some(surface) = self.surface.as_mut() {
                        if let Err(e) = surface.load(&PageRequest::get(url)) {
                            warn!(error = %e, "in-place pop-up load failed");
                        }
                    }
                }
                SurfaceEvent::DialogRequested(request) => {
                    let DialogRequest { kind, responder } = request;
                    self.dialog_host.present(&kind, responder);
                }
                SurfaceEvent::PageLoad { state, url } => {
                    debug!(?state, url = %url, "page load");
                }
                SurfaceEvent::TitleChanged(title) => {
                    debug!(title = %title, "page title changed");
                    self.page_title = Some(title);
                }
            }
        }
    }

    // -----------------------------------------------------------------
    // Navigation-bar actions
    // -----------------------------------------------------------------

    pub fn press_left_button(&mut self) {
        let delegate = self.nav_bar_delegate();
        delegate.on_left_button_clicked(self);
    }

    pub fn press_right_button(&mut self) {
        let delegate = self.nav_bar_delegate();
        delegate.on_right_button_clicked(self);
    }

    /// Run the four configuration callbacks in the fixed order
    /// title → left → right → right-size, then layout.
    fn refresh_navigation_bar(&mut self) {
        let delegate = self.nav_bar_delegate();
        delegate.configure_title(&mut self.navigation_bar.title);
        delegate.configure_left_button(&mut self.navigation_bar.left_button);
        delegate.configure_right_button(&mut self.navigation_bar.right_button);
        self.navigation_bar.right_button.width =
            delegate.right_button_size(&self.navigation_bar.right_button);
        self.layout();
    }

    // -----------------------------------------------------------------
    // Appearance
    // -----------------------------------------------------------------

    /// Apply one color to every chrome background.
    pub fn set_theme_color(&mut self, color: Color) {
        self.theme_color = Some(color);
        self.background = Some(color);
        self.content_pane.background = Some(color);
        self.navigation_bar.background = Some(color);
        self.progress_bar.background = Some(color);
    }

    pub fn set_navigation_bar_visible(&mut self, visible: bool) {
        self.navigation_bar_visible = visible;
        self.navigation_bar.hidden = !visible;
        if visible {
            // becoming visible re-runs the configuration pass
            self.refresh_navigation_bar();
        } else {
            self.layout();
        }
    }

    pub fn set_progress_bar_visible(&mut self, visible: bool) {
        self.progress_bar_visible = visible;
        self.progress_bar.hidden = !visible;
        self.layout();
    }

    /// Recompute chrome frames top-down and re-pin the surface to the
    /// content pane. Runs after every layout-affecting mutation.
    fn layout(&mut self) {
        let bounds = Rect::new(0.0, 0.0, self.frame.width, self.frame.height);
        let mut remainder = bounds;
        if self.navigation_bar_visible {
            let (strip, rest) = remainder.split_top(NAV_BAR_HEIGHT);
            self.navigation_bar.frame = strip;
            remainder = rest;
        }
        if self.progress_bar_visible {
            let (strip, rest) = remainder.split_top(PROGRESS_BAR_HEIGHT);
            self.progress_bar.frame = strip;
            remainder = rest;
        }
        self.content_pane.frame = remainder;
        if let Some(surface) = self.surface.as_mut() {
            if let Err(e) = surface.set_bounds(remainder) {
                warn!(error = %e, "surface bounds update failed");
            }
        }
    }

    // -----------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------

    pub fn state(&self) -> BrowserState {
        self.state
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn attached(&self) -> bool {
        self.parent.is_some()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn http_method(&self) -> HttpMethod {
        self.http_method
    }

    pub fn navigation_bar_visible(&self) -> bool {
        self.navigation_bar_visible
    }

    pub fn progress_bar_visible(&self) -> bool {
        self.progress_bar_visible
    }

    pub fn theme_color(&self) -> Option<Color> {
        self.theme_color
    }

    pub fn background(&self) -> Option<Color> {
        self.background
    }

    pub fn page_title(&self) -> Option<&str> {
        self.page_title.as_deref()
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    /// URL the current surface is showing, if any.
    pub fn current_url(&self) -> Option<&str> {
        self.surface.as_ref().map(|s| s.current_url())
    }
}
