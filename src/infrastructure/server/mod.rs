mod docs;
mod dto;
mod error;
mod router;
mod routes;
mod state;

pub use error::ServerError;
pub(crate) use state::ServerState;

use crate::application::screener::Screener;
use std::net::SocketAddr;
use std::sync::Arc;

pub async fn serve(screener: Arc<Screener>, addr: SocketAddr) -> Result<(), ServerError> {
    router::serve(screener, addr).await
}
