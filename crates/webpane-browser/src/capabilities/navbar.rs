use crate::browser::BrowserView;
use crate::chrome::{BarButton, ContentMode, TitleLabel, DEFAULT_BAR_BUTTON_WIDTH};

/// Decides navigation-bar content and button behavior.
///
/// Whenever the bar becomes visible or the delegate is (re)bound, the
/// four configuration callbacks run in the fixed order title → left
/// button → right button → right-button size, followed by a layout
/// pass.
pub trait NavBarDelegate {
    fn configure_title(&self, label: &mut TitleLabel) {
        label.text.clear();
    }

    fn configure_left_button(&self, button: &mut BarButton) {
        button.icon = Some("back".to_string());
        button.content_mode = ContentMode::AspectFit;
    }

    fn configure_right_button(&self, button: &mut BarButton) {
        button.hidden = true;
    }

    fn right_button_size(&self, _button: &BarButton) -> f64 {
        DEFAULT_BAR_BUTTON_WIDTH
    }

    fn on_left_button_clicked(&self, browser: &mut BrowserView) {
        browser.dismiss();
    }

    fn on_right_button_clicked(&self, _browser: &mut BrowserView) {}
}
