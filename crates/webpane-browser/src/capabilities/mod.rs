//! Host customization seams.
//!
//! Each trait carries default method bodies, so a host implements only
//! what it wants to change. A browser with no bindings behaves exactly
//! like one bound to [`DefaultCapabilities`].

mod content;
mod navbar;
mod progress;

pub use content::ContentLoader;
pub use navbar::NavBarDelegate;
pub use progress::ProgressObserver;

/// Null-object fallback: implements every capability trait with the
/// default bodies. One shared instance backs every unbound seam.
#[derive(Debug, Default)]
pub struct DefaultCapabilities;

impl ContentLoader for DefaultCapabilities {}
impl NavBarDelegate for DefaultCapabilities {}
impl ProgressObserver for DefaultCapabilities {}
