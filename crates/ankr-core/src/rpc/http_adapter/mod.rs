//! Production [`Transport`](super::Transport) over `reqwest`, plus endpoint
//! URL construction for the keyed multichain endpoint.

mod client;
mod connection;

pub use client::HttpTransport;
pub use connection::endpoint_url;
