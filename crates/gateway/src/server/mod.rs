mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{config::Config, kubernetes::ClusterOps, Result};

pub struct Server {
    cluster: Arc<dyn ClusterOps>,
}

impl Server {
    pub fn new(_config: &Config, cluster: Arc<dyn ClusterOps>) -> Self {
        Self { cluster }
    }

    pub fn build_router(self) -> Router {
        let state = Arc::new(self);

        Router::new()
            .route("/health", get(routes::health))
            .route("/search", get(routes::search))
            .route("/process", post(routes::spawn_batch_job))
            .route("/volumes", get(routes::list_persistent_volumes))
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    pub async fn start(self, addr: &str) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!(addr, "listening");
        axum::serve(listener, self.build_router()).await?;
        Ok(())
    }
}
