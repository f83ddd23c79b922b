//! Production surface backing over `wry`.
//!
//! Surfaces are built as child webviews of the host window. A bridge
//! init script reports page-load progress estimates and reroutes
//! `window.alert`/`confirm`/`prompt` through `window.ipc.postMessage`;
//! the IPC handler validates the JSON and queues [`SurfaceEvent`]s.
//! Resolved dialog outcomes travel back into the page as generated
//! JavaScript on the next pump.

use std::sync::{Arc, Mutex};

use serde::Deserialize;
use tracing::{debug, warn};
use webpane_common::{Rect, SurfaceError, SurfaceId};
use wry::raw_window_handle::HasWindowHandle;
use wry::WebViewBuilder;

use crate::dialog::{DialogKind, DialogOutcome, DialogRequest, DialogResponder, OutcomeSink};
use crate::request::{HttpMethod, PageRequest};
use crate::surface::{
    EventSink, PageLoadState, ScrollBehavior, SurfaceEvent, SurfaceFactory, SurfaceSettings,
    WebSurface,
};

impl From<wry::PageLoadEvent> for PageLoadState {
    fn from(event: wry::PageLoadEvent) -> Self {
        match event {
            wry::PageLoadEvent::Started => Self::Started,
            wry::PageLoadEvent::Finished => Self::Finished,
        }
    }
}

// =============================================================================
// BRIDGE PROTOCOL
// =============================================================================

/// Message posted by the bridge script via `window.ipc.postMessage`.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum BridgeMessage {
    Progress {
        value: f64,
    },
    Dialog {
        id: u64,
        dialog: DialogName,
        message: String,
        #[serde(default)]
        default_text: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum DialogName {
    Alert,
    Confirm,
    Prompt,
}

/// Map a validated bridge message to the surface event it raises.
fn bridge_event(message: BridgeMessage, outcomes: &OutcomeSink) -> SurfaceEvent {
    match message {
        BridgeMessage::Progress { value } => SurfaceEvent::ProgressChanged(value.clamp(0.0, 1.0)),
        BridgeMessage::Dialog {
            id,
            dialog,
            message,
            default_text,
        } => {
            let kind = match dialog {
                DialogName::Alert => DialogKind::Alert { message },
                DialogName::Confirm => DialogKind::Confirm { message },
                DialogName::Prompt => DialogKind::Prompt {
                    message,
                    default_text: default_text.unwrap_or_default(),
                },
            };
            let responder = DialogResponder::new(id, &kind, outcomes.clone());
            SurfaceEvent::DialogRequested(DialogRequest { kind, responder })
        }
    }
}

/// Suppresses repeated identical progress estimates, so the browser
/// sees one event per change.
#[derive(Debug, Default)]
struct ProgressGate {
    last: Option<f64>,
}

impl ProgressGate {
    fn admit(&mut self, value: f64) -> Option<f64> {
        if self.last == Some(value) {
            return None;
        }
        self.last = Some(value);
        Some(value)
    }
}

// =============================================================================
// GENERATED JAVASCRIPT
// =============================================================================

/// Init script: progress reporting plus dialog rerouting. The native
/// dialog functions cannot block once overridden, so `confirm` and
/// `prompt` return their dismissive values immediately; page code that
/// needs the real answer uses the promise-returning
/// `window.__webpane.*` variants, resolved by `deliver`.
fn bridge_script(scroll: ScrollBehavior) -> String {
    let mut script = String::from(
        r#"(function () {
    if (window.__webpane) { return; }
    var seq = 0;
    var pending = {};
    function send(message) { window.ipc.postMessage(JSON.stringify(message)); }
    function report(value) { send({ kind: 'progress', value: value }); }
    function ask(dialog, message, defaultText) {
        var id = ++seq;
        send({
            kind: 'dialog',
            id: id,
            dialog: dialog,
            message: String(message),
            default_text: defaultText === undefined ? null : String(defaultText)
        });
        return new Promise(function (resolve) { pending[id] = resolve; });
    }
    window.__webpane = {
        deliver: function (id, value) {
            var resolve = pending[id];
            if (resolve) { delete pending[id]; resolve(value); }
        },
        alert: function (m) { return ask('alert', m); },
        confirm: function (m) { return ask('confirm', m); },
        prompt: function (m, d) { return ask('prompt', m, d === undefined ? '' : d); }
    };
    window.alert = function (m) { ask('alert', m); };
    window.confirm = function (m) { ask('confirm', m); return false; };
    window.prompt = function (m, d) { ask('prompt', m, d === undefined ? '' : d); return null; };
    document.addEventListener('readystatechange', function () {
        if (document.readyState === 'interactive') { report(0.6); }
        if (document.readyState === 'complete') { report(1.0); }
    });
    window.addEventListener('load', function () { report(1.0); });
    report(0.1);
})();
"#,
    );
    if scroll == ScrollBehavior::VerticalNoBounce {
        script.push_str(
            r#"(function () {
    var style = document.createElement('style');
    style.textContent = 'html, body { overscroll-behavior-y: none; overflow-x: hidden; }';
    document.addEventListener('DOMContentLoaded', function () {
        document.head.appendChild(style);
    });
})();
"#,
        );
    }
    script
}

/// Bootstrap document for POST loads: `wry` can only navigate with GET,
/// so the request is issued from inside the page and the response
/// document-written over the bootstrap.
fn post_bootstrap(request: &PageRequest) -> String {
    let url = serde_json::to_string(&request.url).unwrap_or_else(|_| "\"\"".to_string());
    let headers: serde_json::Map<String, serde_json::Value> = request
        .headers
        .iter()
        .map(|(name, value)| (name.clone(), serde_json::Value::String(value.clone())))
        .collect();
    let headers = serde_json::to_string(&headers).unwrap_or_else(|_| "{}".to_string());
    let body = match &request.body {
        Some(data) => serde_json::to_string(&String::from_utf8_lossy(data))
            .unwrap_or_else(|_| "null".to_string()),
        None => "null".to_string(),
    };
    format!(
        r#"<!doctype html>
<html><body><script>
fetch({url}, {{ method: 'POST', headers: {headers}, body: {body} }})
    .then(function (response) {{ return response.text(); }})
    .then(function (text) {{
        document.open();
        document.write(text);
        document.close();
    }});
</script></body></html>"#
    )
}

/// Snippet that resolves a pending dialog promise in the page.
fn deliver_js(id: u64, outcome: &DialogOutcome) -> String {
    let value = match outcome {
        DialogOutcome::Acknowledged => "null".to_string(),
        DialogOutcome::Confirmed(answer) => answer.to_string(),
        DialogOutcome::Text(Some(text)) => {
            serde_json::to_string(text).unwrap_or_else(|_| "null".to_string())
        }
        DialogOutcome::Text(None) => "null".to_string(),
    };
    format!("window.__webpane.deliver({id}, {value});")
}

fn to_wry_rect(rect: Rect) -> wry::Rect {
    wry::Rect {
        position: wry::dpi::LogicalPosition::new(rect.x, rect.y).into(),
        size: wry::dpi::LogicalSize::new(rect.width, rect.height).into(),
    }
}

// =============================================================================
// HANDLER ATTACHMENTS
// =============================================================================

fn attach_ipc_handler(
    builder: WebViewBuilder<'_>,
    sink: EventSink,
    outcomes: OutcomeSink,
    id: SurfaceId,
) -> WebViewBuilder<'_> {
    let gate = Arc::new(Mutex::new(ProgressGate::default()));
    builder.with_ipc_handler(move |request| {
        let body = request.body();
        let message: BridgeMessage = match serde_json::from_str(body) {
            Ok(message) => message,
            Err(e) => {
                warn!(surface = %id, error = %e, "bridge message rejected: invalid JSON");
                return;
            }
        };
        let event = bridge_event(message, &outcomes);
        if let SurfaceEvent::ProgressChanged(value) = event {
            if let Some(value) = gate.lock().ok().and_then(|mut gate| gate.admit(value)) {
                sink.push(SurfaceEvent::ProgressChanged(value));
            }
            return;
        }
        sink.push(event);
    })
}

fn attach_page_load_handler(
    builder: WebViewBuilder<'_>,
    sink: EventSink,
    id: SurfaceId,
    synthesize_progress: bool,
) -> WebViewBuilder<'_> {
    builder.with_on_page_load_handler(move |event, url| {
        let state = PageLoadState::from(event);
        debug!(surface = %id, ?state, url = %url, "page load");
        // without the bridge script there are no estimates, so loads
        // still complete the progress indicator
        if synthesize_progress && state == PageLoadState::Finished {
            sink.push(SurfaceEvent::ProgressChanged(1.0));
        }
        sink.push(SurfaceEvent::PageLoad { state, url });
    })
}

fn attach_title_handler(
    builder: WebViewBuilder<'_>,
    sink: EventSink,
    id: SurfaceId,
) -> WebViewBuilder<'_> {
    builder.with_document_title_changed_handler(move |title| {
        debug!(surface = %id, title = %title, "title changed");
        sink.push(SurfaceEvent::TitleChanged(title));
    })
}

fn attach_popup_handler(
    builder: WebViewBuilder<'_>,
    sink: EventSink,
    id: SurfaceId,
) -> WebViewBuilder<'_> {
    builder.with_new_window_req_handler(move |url| {
        debug!(surface = %id, url = %url, "new-window request suppressed");
        sink.push(SurfaceEvent::PopupRequested { url });
        false
    })
}

// =============================================================================
// FACTORY AND SURFACE
// =============================================================================

/// Builds `wry` child webviews inside the host window.
pub struct WrySurfaceFactory<W> {
    window: Arc<W>,
    next_id: u32,
}

impl<W> WrySurfaceFactory<W> {
    pub fn new(window: Arc<W>) -> Self {
        Self { window, next_id: 0 }
    }
}

impl<W: HasWindowHandle> SurfaceFactory for WrySurfaceFactory<W> {
    fn create(
        &mut self,
        settings: &SurfaceSettings,
        bounds: Rect,
    ) -> Result<Box<dyn WebSurface>, SurfaceError> {
        let id = SurfaceId(self.next_id);
        self.next_id += 1;

        let sink = EventSink::default();
        let outcomes = OutcomeSink::default();

        let mut builder = WebViewBuilder::new()
            .with_bounds(to_wry_rect(bounds))
            .with_focused(false);

        // wry has no engine-level JavaScript switch; withholding the
        // bridge is as far as the embedder can go
        if settings.javascript_enabled {
            let script = bridge_script(settings.scroll);
            builder = builder.with_initialization_script(script.as_str());
            builder = attach_ipc_handler(builder, sink.clone(), outcomes.clone(), id);
        }
        builder = attach_page_load_handler(builder, sink.clone(), id, !settings.javascript_enabled);
        builder = attach_title_handler(builder, sink.clone(), id);
        builder = attach_popup_handler(builder, sink.clone(), id);

        let webview = builder
            .build_as_child(self.window.as_ref())
            .map_err(|e| SurfaceError::Engine(e.to_string()))?;

        debug!(surface = %id, "webview created");
        Ok(Box::new(WrySurface {
            id,
            webview,
            sink,
            outcomes,
            last_request: None,
            current_url: String::new(),
        }))
    }
}

pub struct WrySurface {
    id: SurfaceId,
    webview: wry::WebView,
    sink: EventSink,
    outcomes: OutcomeSink,
    last_request: Option<PageRequest>,
    current_url: String,
}

impl WebSurface for WrySurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn load(&mut self, request: &PageRequest) -> Result<(), SurfaceError> {
        match request.method {
            HttpMethod::Get => self
                .webview
                .load_url(&request.url)
                .map_err(|e| SurfaceError::Engine(e.to_string()))?,
            HttpMethod::Post => self
                .webview
                .load_html(&post_bootstrap(request))
                .map_err(|e| SurfaceError::Engine(e.to_string()))?,
            other => return Err(SurfaceError::UnsupportedMethod(other.to_string())),
        }
        self.current_url = request.url.clone();
        self.last_request = Some(request.clone());
        Ok(())
    }

    fn reload(&mut self) -> Result<(), SurfaceError> {
        match self.last_request.clone() {
            Some(request) => self.load(&request),
            None => {
                warn!(surface = %self.id, "reload with no prior load, ignoring");
                Ok(())
            }
        }
    }

    fn set_bounds(&mut self, bounds: Rect) -> Result<(), SurfaceError> {
        self.webview
            .set_bounds(to_wry_rect(bounds))
            .map_err(|e| SurfaceError::Engine(e.to_string()))
    }

    fn pump(&mut self) -> Vec<SurfaceEvent> {
        for (id, outcome) in self.outcomes.drain() {
            let script = deliver_js(id, &outcome);
            if let Err(e) = self.webview.evaluate_script(&script) {
                warn!(surface = %self.id, dialog_id = id, error = %e, "dialog outcome delivery failed");
            }
        }
        self.sink.drain()
    }

    fn current_url(&self) -> &str {
        &self.current_url
    }
}
