//! Gateway service - binds the listener and serves the router.

use std::future::Future;

use tracing::info;
use vb_store::RecordStore;

use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::router::build_router;
use crate::state::AppState;

/// The HTTP gateway service.
pub struct GatewayService<S> {
    config: GatewayConfig,
    state: AppState<S>,
}

impl<S: RecordStore> GatewayService<S> {
    /// Create the service after validating the configuration.
    pub fn new(config: GatewayConfig, state: AppState<S>) -> Result<Self, GatewayError> {
        config.validate()?;
        Ok(Self { config, state })
    }

    /// Serve until the shutdown future resolves.
    pub async fn serve(
        self,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), GatewayError> {
        let router = build_router(self.state, &self.config);

        let listener = tokio::net::TcpListener::bind(&self.config.http_addr).await?;
        info!(addr = %listener.local_addr()?, "Starting HTTP server");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;

        info!("HTTP server stopped");
        Ok(())
    }
}
