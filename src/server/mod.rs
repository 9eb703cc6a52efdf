//! Preview server for generated output
//!
//! Serves the public directory and, unless disabled, re-runs generation
//! on the configured revalidation cadence so the static pages track
//! upstream content changes.

use anyhow::Result;
use axum::Router;
use std::net::SocketAddr;
use std::time::Duration;
use tower_http::services::ServeDir;

use crate::generator::Generator;
use crate::Starlog;

/// Start the preview server
pub async fn start(app: &Starlog, ip: &str, port: u16, revalidate: bool) -> Result<()> {
    if revalidate && app.config.revalidate_secs > 0 {
        spawn_revalidation(app.clone());
    }

    let router = Router::new().fallback_service(ServeDir::new(&app.public_dir));

    // handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if revalidate {
        println!(
            "Regenerating every {} seconds. Press Ctrl+C to stop.",
            app.config.revalidate_secs
        );
    } else {
        println!("Press Ctrl+C to stop.");
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

fn spawn_revalidation(app: Starlog) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(app.config.revalidate_secs));
        // the first tick completes immediately; the site was just generated
        interval.tick().await;
        loop {
            interval.tick().await;
            tracing::info!("Revalidating generated pages");
            let result = match Generator::new(&app) {
                Ok(generator) => generator.generate(None).await.map(|_| ()),
                Err(err) => Err(err),
            };
            if let Err(err) = result {
                tracing::warn!("Regeneration failed: {:#}", err);
            }
        }
    });
}
