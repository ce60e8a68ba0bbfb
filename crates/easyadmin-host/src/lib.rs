//! Host side of the frame channel.
//!
//! The host owns an [`OperationRegistry`] of named asynchronous operations
//! and a [`Dispatcher`] that accepts calls from the one frame it embeds,
//! runs the matching operation, and posts the result back.

pub mod dispatcher;
pub mod operation;
pub mod registry;

pub use dispatcher::{Dispatcher, Rejection, ReplyTo, PANIC_ERROR_NAME};
pub use operation::{Args, Operation, OperationError};
pub use registry::OperationRegistry;
