use crate::config::AppConfig;
use crate::services::dispatcher::Dispatcher;

pub struct AppState {
    pub config: AppConfig,
    pub dispatcher: Dispatcher,
}
