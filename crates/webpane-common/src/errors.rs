#[derive(Debug, thiserror::Error)]
pub enum SurfaceError {
    #[error("engine error: {0}")]
    Engine(String),

    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),
}

#[derive(Debug, thiserror::Error)]
pub enum BrowserError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    #[error("host window error: {0}")]
    HostWindow(String),

    #[error("{0}")]
    Other(String),
}
