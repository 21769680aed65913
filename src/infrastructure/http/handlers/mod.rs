//! HTTP Handlers

mod health;
mod speech;
mod voice;

pub use health::*;
pub use speech::*;
pub use voice::*;
