pub(crate) mod json;
pub(crate) mod session;

pub use json::*;
pub use session::Session;
