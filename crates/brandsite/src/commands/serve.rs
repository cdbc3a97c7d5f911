//! Preview server command.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use axum::Router;
use brandsite_static::INDEX_HTML;
use tower_http::services::ServeDir;

/// Run the serve command.
pub async fn run(port: u16, dir: PathBuf, open_browser: bool) -> Result<()> {
    if !dir.join(INDEX_HTML).exists() {
        anyhow::bail!(
            "No site found in {}. Run 'brandsite generate' first.",
            dir.display()
        );
    }

    let addr: SocketAddr = format!("127.0.0.1:{}", port)
        .parse()
        .context("Invalid address")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    // Port 0 binds an ephemeral port
    let url = format!("http://{}", listener.local_addr()?);
    tracing::info!("Serving {} at {}", dir.display(), url);

    if open_browser {
        super::open_in_browser(&url);
    }

    axum::serve(listener, preview_router(&dir)).await?;

    Ok(())
}

/// Serves the generated files, `index.html` for directory requests.
fn preview_router(dir: &Path) -> Router {
    Router::new().fallback_service(ServeDir::new(dir))
}
