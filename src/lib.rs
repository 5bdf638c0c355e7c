pub mod app;
pub mod config;
pub mod domain;
pub mod events;
pub mod http;
pub mod infra;
pub mod store;

use crate::events::EventBus;
use crate::store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub events: EventBus,
}
