use clap::Parser;

/// webpane demo — hosts one in-app browser pane in a native window.
#[derive(Parser, Debug)]
#[command(name = "webpane-demo", version, about)]
pub struct Args {
    /// URL to load.
    #[arg(long, default_value = "https://example.com/")]
    pub url: String,

    /// Navigation-bar title.
    #[arg(long)]
    pub title: Option<String>,

    /// Hide the navigation bar.
    #[arg(long)]
    pub no_nav_bar: bool,

    /// Show the progress bar.
    #[arg(long)]
    pub progress_bar: bool,

    /// Theme color as hex (e.g. #1e1e2e).
    #[arg(long)]
    pub theme: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
