pub mod error;
pub mod models;
pub mod session;
pub mod transport;

pub use error::ChatError;
pub use models::Turn;
pub use session::Session;
pub use transport::{HttpTransport, Transport};
