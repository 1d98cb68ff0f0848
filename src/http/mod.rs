pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use server::{router, run_server, AppState, ServerConfig};
