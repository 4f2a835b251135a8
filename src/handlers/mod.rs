pub mod api;
pub mod status_handlers;

pub use api::configure;
