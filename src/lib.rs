pub mod collision;
pub mod compute;
pub mod constants;
pub mod entities;
pub mod error;
pub mod input;
pub mod render;
pub mod session;
pub mod spawner;

pub use error::SessionError;
pub use session::Session;
