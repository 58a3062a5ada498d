pub mod config;
pub mod data_validation_handlers;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod metrics_handler;
pub mod observability;
pub mod profile_verification_handlers;
pub mod request_logger;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;
pub mod validation;
