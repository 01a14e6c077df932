//! Client library for connecting to catalogd.
//!
//! Provides [`ServiceClient`], which implements [`CategoryStore`](crate::CategoryStore)
//! by forwarding calls to a remote catalogd instance over gRPC, and adds the
//! two streaming create operations.

mod service_client;

pub use service_client::{CategoryStream, ServiceClient};
