pub mod error;
pub mod formatter;
pub mod processing;
pub mod validator;
