//! Test doubles shared by the crate's unit tests: a scriptable mock
//! surface/factory pair and recording capability implementations.

use std::sync::{Arc, Mutex};

use webpane_common::{Rect, SurfaceError, SurfaceId};

use crate::browser::BrowserView;
use crate::capabilities::{ContentLoader, NavBarDelegate, ProgressObserver};
use crate::chrome::{BarButton, TitleLabel};
use crate::dialog::{DialogHost, DialogKind, DialogOutcome, DialogResponder, OutcomeSink};
use crate::request::PageRequest;
use crate::surface::{SurfaceEvent, SurfaceFactory, SurfaceSettings, WebSurface};

// ---------------------------------------------------------------------
// Mock surface / factory
// ---------------------------------------------------------------------

#[derive(Default)]
pub struct MockSurfaceState {
    pub loads: Vec<PageRequest>,
    pub reloads: usize,
    pub bounds: Vec<Rect>,
    /// Events the surface will emit on its next pump.
    pub queued: Vec<SurfaceEvent>,
    /// Dialog outcomes the surface delivered back to the page.
    pub outcomes: Vec<(u64, DialogOutcome)>,
    /// Sink wired into responders raised by this surface.
    pub outcome_sink: OutcomeSink,
    pub alive: bool,
}

pub type SharedSurfaceState = Arc<Mutex<MockSurfaceState>>;

pub struct MockSurface {
    id: SurfaceId,
    state: SharedSurfaceState,
    live: Arc<Mutex<usize>>,
    current_url: String,
    last_request: Option<PageRequest>,
}

impl WebSurface for MockSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn load(&mut self, request: &PageRequest) -> Result<(), SurfaceError> {
        self.current_url = request.url.clone();
        self.last_request = Some(request.clone());
        self.state.lock().unwrap().loads.push(request.clone());
        Ok(())
    }

    fn reload(&mut self) -> Result<(), SurfaceError> {
        if self.last_request.is_some() {
            self.state.lock().unwrap().reloads += 1;
        }
        Ok(())
    }

    fn set_bounds(&mut self, bounds: Rect) -> Result<(), SurfaceError> {
        self.state.lock().unwrap().bounds.push(bounds);
        Ok(())
    }

    fn pump(&mut self) -> Vec<SurfaceEvent> {
        let mut state = self.state.lock().unwrap();
        let delivered = state.outcome_sink.drain();
        state.outcomes.extend(delivered);
        std::mem::take(&mut state.queued)
    }

    fn current_url(&self) -> &str {
        &self.current_url
    }
}

impl Drop for MockSurface {
    fn drop(&mut self) {
        self.state.lock().unwrap().alive = false;
        *self.live.lock().unwrap() -= 1;
    }
}

/// Inspection handle the factory shares with the test that created it.
#[derive(Clone, Default)]
pub struct MockProbe {
    created: Arc<Mutex<Vec<SharedSurfaceState>>>,
    live: Arc<Mutex<usize>>,
    settings: Arc<Mutex<Vec<SurfaceSettings>>>,
}

impl MockProbe {
    /// Total surfaces ever created.
    pub fn surface_count(&self) -> usize {
        self.created.lock().unwrap().len()
    }

    /// Surfaces currently alive (created minus dropped).
    pub fn live_count(&self) -> usize {
        *self.live.lock().unwrap()
    }

    pub fn state(&self, index: usize) -> SharedSurfaceState {
        self.created.lock().unwrap()[index].clone()
    }

    pub fn settings_seen(&self) -> Vec<SurfaceSettings> {
        self.settings.lock().unwrap().clone()
    }

    /// Script an event for the surface at `index` to emit on its next
    /// pump.
    pub fn queue_event(&self, index: usize, event: SurfaceEvent) {
        self.state(index).lock().unwrap().queued.push(event);
    }

    /// The outcome sink responders raised by surface `index` report to.
    pub fn outcome_sink(&self, index: usize) -> OutcomeSink {
        self.state(index).lock().unwrap().outcome_sink.clone()
    }
}

pub struct MockFactory {
    probe: MockProbe,
    next_id: u32,
    fail: bool,
}

impl MockFactory {
    pub fn new() -> (Box<dyn SurfaceFactory>, MockProbe) {
        let probe = MockProbe::default();
        let factory = MockFactory {
            probe: probe.clone(),
            next_id: 0,
            fail: false,
        };
        (Box::new(factory), probe)
    }

    /// A factory whose every create fails, for engine-failure paths.
    pub fn failing() -> (Box<dyn SurfaceFactory>, MockProbe) {
        let probe = MockProbe::default();
        let factory = MockFactory {
            probe: probe.clone(),
            next_id: 0,
            fail: true,
        };
        (Box::new(factory), probe)
    }
}

impl SurfaceFactory for MockFactory {
    fn create(
        &mut self,
        settings: &SurfaceSettings,
        bounds: Rect,
    ) -> Result<Box<dyn WebSurface>, SurfaceError> {
        if self.fail {
            return Err(SurfaceError::Engine("mock factory failure".into()));
        }
        self.probe.settings.lock().unwrap().push(*settings);
        let state: SharedSurfaceState = Arc::new(Mutex::new(MockSurfaceState {
            alive: true,
            ..MockSurfaceState::default()
        }));
        state.lock().unwrap().bounds.push(bounds);
        self.probe.created.lock().unwrap().push(state.clone());
        *self.probe.live.lock().unwrap() += 1;
        let id = SurfaceId(self.next_id);
        self.next_id += 1;
        Ok(Box::new(MockSurface {
            id,
            state,
            live: self.probe.live.clone(),
            current_url: String::new(),
            last_request: None,
        }))
    }
}

// ---------------------------------------------------------------------
// Recording capability implementations
// ---------------------------------------------------------------------

/// Ordered call-tag log shared between a recording delegate and the
/// test asserting on it.
#[derive(Clone, Default)]
pub struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub fn push(&self, tag: &str) {
        self.0.lock().unwrap().push(tag.to_string());
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

pub struct RecordingNavBar {
    pub log: CallLog,
    pub right_width: f64,
}

impl NavBarDelegate for RecordingNavBar {
    fn configure_title(&self, label: &mut TitleLabel) {
        self.log.push("title");
        label.text = "Recorded".to_string();
    }

    fn configure_left_button(&self, _button: &mut BarButton) {
        self.log.push("left");
    }

    fn configure_right_button(&self, button: &mut BarButton) {
        self.log.push("right");
        button.hidden = false;
    }

    fn right_button_size(&self, _button: &BarButton) -> f64 {
        self.log.push("size");
        self.right_width
    }
}

#[derive(Clone, Default)]
pub struct RecordingProgressObserver {
    pub calls: Arc<Mutex<Vec<f64>>>,
}

impl ProgressObserver for RecordingProgressObserver {
    fn on_progress(&self, _browser: &BrowserView, progress: f64) {
        self.calls.lock().unwrap().push(progress);
    }
}

/// Content loader with configurable visibility flags and a destroy
/// counter. Surface creation falls through to the default behavior.
pub struct CountingLoader {
    pub nav_shown: bool,
    pub progress_shown: bool,
    pub destroys: Arc<Mutex<usize>>,
}

impl CountingLoader {
    pub fn new(nav_shown: bool, progress_shown: bool) -> (Self, Arc<Mutex<usize>>) {
        let destroys = Arc::new(Mutex::new(0));
        (
            Self {
                nav_shown,
                progress_shown,
                destroys: destroys.clone(),
            },
            destroys,
        )
    }
}

impl ContentLoader for CountingLoader {
    fn is_progress_bar_shown(&self) -> bool {
        self.progress_shown
    }

    fn is_navigation_bar_shown(&self) -> bool {
        self.nav_shown
    }

    fn on_destroy(&self, _browser: &BrowserView) {
        *self.destroys.lock().unwrap() += 1;
    }
}

/// Dialog host that records every kind it saw and answers with a fixed
/// mapping.
pub struct RecordingDialogHost {
    pub seen: Arc<Mutex<Vec<DialogKind>>>,
    pub answer: Box<dyn Fn(&DialogKind) -> DialogOutcome>,
}

impl RecordingDialogHost {
    pub fn answering(
        answer: impl Fn(&DialogKind) -> DialogOutcome + 'static,
    ) -> (Self, Arc<Mutex<Vec<DialogKind>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                seen: seen.clone(),
                answer: Box::new(answer),
            },
            seen,
        )
    }
}

impl DialogHost for RecordingDialogHost {
    fn present(&mut self, kind: &DialogKind, responder: DialogResponder) {
        self.seen.lock().unwrap().push(kind.clone());
        responder.resolve((self.answer)(kind));
    }
}
