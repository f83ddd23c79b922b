use crate::browser::BrowserView;

/// Receives page-load progress. Called once per underlying estimate
/// change, unthrottled; values are in [0, 1].
pub trait ProgressObserver {
    fn on_progress(&self, _browser: &BrowserView, _progress: f64) {}
}
