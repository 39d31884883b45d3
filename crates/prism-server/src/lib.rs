mod cors;
mod health;

use std::net::SocketAddr;

use axum::{Extension, Router};
use prism_config::Config;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// The cancellation token is handed to request handlers so in-flight
    /// upstream calls stop promptly on shutdown. Pass the same token to
    /// [`Self::serve`].
    #[must_use]
    pub fn new(config: &Config, shutdown: CancellationToken) -> Self {
        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        // One shared client so all provider calls reuse the connection pool
        let client = prism_core::http_client(config.upstream.timeout());

        let imagegen_state = prism_imagegen::build_server(config, client.clone());
        let rembg_state = prism_rembg::build_server(config, client.clone());
        let upscale_state = prism_upscale::build_server(config, client.clone());
        let quality_state = prism_quality::build_server(config, client.clone());
        let bria_state = prism_bria::build_server(config, client);

        // Build base router with feature routes
        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(
                &config.server.health.path,
                axum::routing::get(health::health_handler),
            );
        }

        // Image generation routes
        app = app.merge(prism_imagegen::endpoint_router().with_state(imagegen_state));

        // Background removal routes
        app = app.merge(prism_rembg::endpoint_router().with_state(rembg_state));

        // Upscaling routes
        app = app.merge(prism_upscale::endpoint_router().with_state(upscale_state));

        // Quality check routes
        app = app.merge(prism_quality::endpoint_router().with_state(quality_state));

        // Bria tool proxy routes
        app = app.merge(prism_bria::endpoint_router().with_state(bria_state));

        // Shutdown token for long-running handlers
        app = app.layer(Extension(shutdown));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        // CORS
        if let Some(ref cors_config) = config.server.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        Self {
            router: app,
            listen_address,
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    #[must_use]
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
