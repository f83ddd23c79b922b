//! Demo host for the webpane browser component.
//!
//! Opens a native window, embeds one `BrowserView` over the wry
//! surface factory, and drives its event pump from the winit loop.

mod cli;

use std::rc::Rc;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::{Window, WindowId};

use webpane_browser::{BrowserView, HttpMethod, NavBarDelegate, TitleLabel, WrySurfaceFactory};
use webpane_common::{BrowserError, Color, Rect};

/// Puts the CLI-provided title on the navigation bar; everything else
/// keeps the default behavior.
struct DemoTitle {
    title: String,
}

impl NavBarDelegate for DemoTitle {
    fn configure_title(&self, label: &mut TitleLabel) {
        label.text = self.title.clone();
    }
}

struct DemoApp {
    args: cli::Args,
    window: Option<Arc<Window>>,
    browser: Option<BrowserView>,
    last_title: Option<String>,
}

impl DemoApp {
    fn new(args: cli::Args) -> Self {
        Self {
            args,
            window: None,
            browser: None,
            last_title: None,
        }
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("webpane demo")
            .with_inner_size(winit::dpi::LogicalSize::new(1024.0, 768.0));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                tracing::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size().to_logical::<f64>(window.scale_factor());
        let frame = Rect::new(0.0, 0.0, size.width, size.height);

        let factory = WrySurfaceFactory::new(window.clone());
        let mut browser = BrowserView::new(Box::new(factory), frame);

        if let Some(hex) = &self.args.theme {
            match Color::from_hex(hex) {
                Some(color) => browser.set_theme_color(color),
                None => tracing::warn!("Unparseable theme color: {hex}"),
            }
        }
        if let Some(title) = &self.args.title {
            browser.set_nav_bar_delegate(Rc::new(DemoTitle {
                title: title.clone(),
            }));
        }
        if self.args.no_nav_bar {
            browser.set_navigation_bar_visible(false);
        }
        if self.args.progress_bar {
            browser.set_progress_bar_visible(true);
        }

        browser.show(None);
        if !browser.load(&self.args.url, HttpMethod::Get, None) {
            tracing::error!("Initial load failed for {}", self.args.url);
            event_loop.exit();
            return;
        }

        self.window = Some(window);
        self.browser = Some(browser);
        tracing::info!("Browser ready");
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                tracing::info!("Window close requested");
                if let Some(browser) = self.browser.as_mut() {
                    browser.dismiss();
                }
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    if let (Some(window), Some(browser)) =
                        (self.window.as_ref(), self.browser.as_mut())
                    {
                        let logical = size.to_logical::<f64>(window.scale_factor());
                        browser.show(Some(Rect::new(0.0, 0.0, logical.width, logical.height)));
                    }
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        let (Some(browser), Some(window)) = (self.browser.as_mut(), self.window.as_ref()) else {
            return;
        };
        browser.pump_events();
        if let Some(title) = browser.page_title() {
            if self.last_title.as_deref() != Some(title) {
                window.set_title(&format!("{title} — webpane demo"));
                self.last_title = Some(title.to_string());
            }
        }
    }
}

fn run(args: cli::Args) -> webpane_common::Result<()> {
    let event_loop =
        EventLoop::new().map_err(|e| BrowserError::HostWindow(e.to_string()))?;
    let mut app = DemoApp::new(args);
    event_loop
        .run_app(&mut app)
        .map_err(|e| BrowserError::HostWindow(e.to_string()))?;
    Ok(())
}

fn main() {
    let args = cli::parse();

    let directive = args.log_level.as_deref().unwrap_or("webpane=info");
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| "webpane=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("webpane demo v{} starting", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(args) {
        tracing::error!("Fatal: {e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}
