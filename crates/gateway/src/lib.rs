//! HTTP gateway: embed files into the vector store and answer questions over them.

pub mod error;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;
pub mod types;

pub use {
    error::ApiError,
    routes::build_router,
    server::{prepare_gateway, serve},
    services::RagService,
    state::GatewayState,
};
