//! Navigation-bar and progress-bar widget state.
//!
//! These structs hold the state the host's renderer draws from; the
//! browser itself only mutates them. Frames are assigned by
//! `BrowserView`'s layout pass.

use webpane_common::{Color, Rect};

/// Default width of the right bar button, in logical units.
pub const DEFAULT_BAR_BUTTON_WIDTH: f64 = 40.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleLabel {
    pub text: String,
    pub color: Option<Color>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentMode {
    #[default]
    ScaleToFill,
    AspectFit,
    AspectFill,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BarButton {
    /// Icon name resolved by the host's asset pipeline.
    pub icon: Option<String>,
    pub content_mode: ContentMode,
    pub hidden: bool,
    /// Width constraint slot; the navigation-bar delegate's size
    /// callback writes into this.
    pub width: f64,
}

impl Default for BarButton {
    fn default() -> Self {
        Self {
            icon: None,
            content_mode: ContentMode::default(),
            hidden: false,
            width: DEFAULT_BAR_BUTTON_WIDTH,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NavigationBar {
    pub frame: Rect,
    pub hidden: bool,
    pub background: Option<Color>,
    pub title: TitleLabel,
    pub left_button: BarButton,
    pub right_button: BarButton,
}

#[derive(Debug, Clone, Default)]
pub struct ProgressIndicator {
    pub value: f64,
    pub hidden: bool,
}

impl ProgressIndicator {
    /// Update the fill value. Clamped to [0, 1]; the indicator hides
    /// itself once the value reaches 1 and shows itself below that.
    pub fn set_value(&mut self, value: f64) {
        self.value = value.clamp(0.0, 1.0);
        self.hidden = self.value >= 1.0;
    }
}

/// The progress strip: a thin container under the navigation bar that
/// holds the fill indicator. Its own `hidden` flag is driven by the
/// browser's progress-bar visibility setting, independently of the
/// indicator hiding at completion.
#[derive(Debug, Clone, Default)]
pub struct ProgressBar {
    pub frame: Rect,
    pub hidden: bool,
    pub background: Option<Color>,
    pub indicator: ProgressIndicator,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicator_visible_below_one() {
        let mut indicator = ProgressIndicator::default();
        indicator.set_value(0.2);
        assert!(!indicator.hidden);
        assert_eq!(indicator.value, 0.2);

        indicator.set_value(0.6);
        assert!(!indicator.hidden);
    }

    #[test]
    fn indicator_hides_at_completion() {
        let mut indicator = ProgressIndicator::default();
        indicator.set_value(1.0);
        assert!(indicator.hidden);
        assert_eq!(indicator.value, 1.0);
    }

    #[test]
    fn indicator_clamps_out_of_range_values() {
        let mut indicator = ProgressIndicator::default();
        indicator.set_value(1.7);
        assert_eq!(indicator.value, 1.0);
        assert!(indicator.hidden);

        indicator.set_value(-0.3);
        assert_eq!(indicator.value, 0.0);
        assert!(!indicator.hidden);
    }

    #[test]
    fn indicator_reshows_on_new_load() {
        let mut indicator = ProgressIndicator::default();
        indicator.set_value(1.0);
        assert!(indicator.hidden);
        indicator.set_value(0.1);
        assert!(!indicator.hidden);
    }

    #[test]
    fn bar_button_defaults() {
        let button = BarButton::default();
        assert!(button.icon.is_none());
        assert!(!button.hidden);
        assert_eq!(button.width, DEFAULT_BAR_BUTTON_WIDTH);
        assert_eq!(button.content_mode, ContentMode::ScaleToFill);
    }
}
