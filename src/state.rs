use std::sync::Arc;

use crate::config::Config;
use crate::engine::WorkflowEngine;
use crate::store::{EntityStore, TagStore, WorkflowStore};

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub workflows: Arc<dyn WorkflowStore>,
    pub entities: Arc<dyn EntityStore>,
    pub tags: Arc<dyn TagStore>,
    pub engine: WorkflowEngine,
}
