pub mod error;
pub mod types;
pub mod backend_client;
pub mod transport;
pub mod controller;
pub mod view;

pub use error::PromptError;
pub use types::*;
pub use backend_client::BackendClient;
pub use transport::{PromptTransport, ProxyClient};
pub use controller::{Applied, PromptController, PromptPhase};
pub use view::View;
