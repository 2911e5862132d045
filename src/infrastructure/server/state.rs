use crate::application::screener::Screener;
use std::sync::Arc;

pub(crate) struct ServerState {
    screener: Arc<Screener>,
}

impl ServerState {
    pub(crate) fn new(screener: Arc<Screener>) -> Self {
        Self { screener }
    }

    pub(crate) fn screener(&self) -> Arc<Screener> {
        Arc::clone(&self.screener)
    }
}
