pub mod errors;
pub mod observability;
pub mod routes;
pub mod soap_endpoint;
pub mod startup;
pub mod state;

pub use startup::run_with_config;
