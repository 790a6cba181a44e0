pub mod dispatch;
pub mod error;
pub mod fetch;
pub mod handler;
pub mod provider;

pub use dispatch::ActionDispatcher;
pub use error::{GatewayError, GatewayResult};
pub use fetch::{RemoteFile, ResourceFetcher};
pub use handler::GatewayHandler;
pub use provider::ProviderClient;
