pub mod errors;
pub mod types;

pub use errors::{BrowserError, SurfaceError};
pub use types::{Color, Rect, SurfaceId};

pub type Result<T> = std::result::Result<T, BrowserError>;
