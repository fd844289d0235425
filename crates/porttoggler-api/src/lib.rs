// porttoggler-api: Async client for the Meraki Dashboard switch port endpoints

pub mod client;
pub mod error;
pub mod outcome;
pub mod port;
pub mod transport;

pub use client::{API_KEY_HEADER, DEFAULT_BASE_URL, DashboardClient};
pub use error::Error;
pub use outcome::{FailureKind, Outcome, SuccessKind, interpret};
pub use port::{PortId, PortType, PortUpdate, StpGuard};
pub use transport::{ApiRequest, HttpTransport, RawResponse, TlsMode, Transport, TransportConfig};
