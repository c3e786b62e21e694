// Rutube API client module
//
// - client:  HTTP transport (timeouts, error classification)
// - auth:    token authentication
// - rutube:  Rutube endpoints and the production connector
// - session: traits the `info` flow depends on

pub mod auth;
pub mod client;
pub mod error;
pub mod rutube;
pub mod session;
pub mod types;
