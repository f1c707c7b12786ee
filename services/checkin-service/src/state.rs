use std::sync::Arc;

use crate::auth::AuthGuard;
use crate::dashboard::Dashboard;
use crate::registry::DeviceRegistry;

#[derive(Clone)]
pub struct AppState {
    pub registry: DeviceRegistry,
    pub auth: Arc<AuthGuard>,
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    pub fn new(auth: AuthGuard, dashboard: Dashboard) -> Self {
        Self {
            registry: DeviceRegistry::new(),
            auth: Arc::new(auth),
            dashboard: Arc::new(dashboard),
        }
    }
}
