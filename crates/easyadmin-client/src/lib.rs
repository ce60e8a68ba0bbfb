//! Client side of the frame channel.
//!
//! [`CallProxy`] turns host operations into local async calls: each call
//! gets a fresh correlation id, is registered with the [`Correlator`], and
//! completes when the host's response with the same id arrives.

pub mod api;
pub mod correlator;
pub mod proxy;

pub use api::EasyAdminApi;
pub use correlator::{CallReceiver, CallResult, Correlator};
pub use proxy::{CallProxy, RemoteOperation};
