//! Token values handed out by identity clients.

pub mod secret;
pub mod tokens;

pub use secret::*;
pub use tokens::*;
