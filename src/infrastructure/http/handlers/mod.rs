//! HTTP Handlers

mod food;
mod health;
mod request;
mod session;

pub use food::*;
pub use health::*;
pub use request::*;
pub use session::*;
