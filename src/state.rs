use std::path::PathBuf;
use std::sync::Arc;

use crate::gateway::registry::Registry;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<Registry>,
    pub static_dir: PathBuf,
    pub index_path: PathBuf,
}

impl AppState {
    pub fn new(static_dir: PathBuf, index_path: PathBuf) -> Self {
        Self {
            registry: Arc::new(Registry::new()),
            static_dir,
            index_path,
        }
    }
}
