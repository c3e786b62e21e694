pub mod help;
pub mod info;
pub mod list;
pub mod result;
pub mod status;

pub use result::CommandResult;
