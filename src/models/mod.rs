mod assistant;
mod conversation;
mod file;
mod toast;
pub mod user;

pub use assistant::*;
pub use conversation::*;
pub use file::*;
pub use toast::*;
pub use user::*;
