use crate::config::Config;
use crate::session::MonitoringSession;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (detector source, media asset URLs)
    pub config: Arc<Config>,

    /// Active monitoring sessions (session_id → session)
    pub sessions: Arc<RwLock<HashMap<String, Arc<MonitoringSession>>>>,
}

impl AppState {
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Stop every active session, for graceful shutdown.
    pub async fn stop_all(&self) {
        let sessions: Vec<Arc<MonitoringSession>> = {
            let mut map = self.sessions.write().await;
            map.drain().map(|(_, session)| session).collect()
        };

        let stops = sessions.iter().map(|session| session.stop());
        for result in futures::future::join_all(stops).await {
            if let Err(e) = result {
                tracing::error!("Failed to stop session during shutdown: {}", e);
            }
        }
    }
}
