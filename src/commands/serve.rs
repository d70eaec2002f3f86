use std::net::SocketAddr;

use crate::ServeArgs;
use crate::config::AppConfig;
use crate::format::ContentFormatter;
use crate::server::{AppState, router};

pub async fn run(args: &ServeArgs) -> Result<(), anyhow::Error> {
    let mut config = AppConfig::load_from_arg(args.config_file.as_deref())?;

    // Command line flags win over the config file
    if let Some(bind) = &args.bind {
        config.server.bind = bind.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if config.revalidate.secret.as_deref().is_none_or(str::is_empty) {
        tracing::warn!("no revalidation secret configured; every webhook call will be rejected");
    }

    let formatter = ContentFormatter::new(&config.markdown, &config.highlight)?;
    let state = AppState::new(formatter, config.revalidate.clone());
    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.server.bind, config.server.port).parse()?;

    // Determine the URL to display
    let display_host = if config.server.bind == "0.0.0.0" {
        "localhost"
    } else {
        &config.server.bind
    };
    tracing::info!(
        url = %format!("http://{}:{}", display_host, config.server.port),
        theme = %config.highlight.theme,
        "serving articlefmt"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
