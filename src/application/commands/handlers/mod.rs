//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod food_handlers;
mod request_handlers;
mod session_handlers;

pub use food_handlers::*;
pub use request_handlers::*;
pub use session_handlers::*;
