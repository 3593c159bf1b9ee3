//! Domain layer for the PDP client.

pub mod backend;
pub mod error;
pub mod local_client;
pub mod request;
pub mod response;
pub mod service;
pub mod transport;

pub use backend::BackendMode;
pub use error::DomainError;
pub use local_client::PdpClientLocal;
pub use service::Service;
pub use transport::{HttpTransport, PdpTransport, TransportRequest, TransportResponse};
