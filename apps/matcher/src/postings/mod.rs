pub mod handlers;
pub mod source;
pub mod stats;
