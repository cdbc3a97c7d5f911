pub mod generate;
pub mod init;
pub mod publish;
pub mod serve;

/// Open `url` in the default browser. Failure is logged, never fatal.
fn open_in_browser(url: &str) {
    if let Err(e) = open::that(url) {
        tracing::warn!("Failed to open browser: {}", e);
    }
}
