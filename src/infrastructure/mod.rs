pub mod lookup;
pub mod model;
pub mod server;
