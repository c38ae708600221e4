pub mod decoder;
pub mod error;
pub mod handlers;
pub mod models;
pub mod service;

pub use decoder::*;
pub use error::*;
pub use handlers::*;
pub use models::*;
pub use service::*;
