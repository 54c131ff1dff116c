pub mod routes;
pub mod startup;
pub mod errors;
pub mod openapi;

pub use routes::AppState;
pub use startup::{build_app, build_state, serve};
