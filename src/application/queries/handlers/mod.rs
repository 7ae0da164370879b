//! Query Handlers 实现

mod food_handlers;
mod request_handlers;

pub use food_handlers::*;
pub use request_handlers::*;
