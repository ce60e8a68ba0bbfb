pub mod api;
pub mod envelope;
pub mod errors;
pub mod id;
pub mod origin;

pub use api::{NewUser, Role, User};
pub use envelope::{
    parse_request, EnvelopeError, ErrorPayload, PayloadLimits, RequestEnvelope, ResponseEnvelope,
};
pub use errors::{ConfigError, RpcError};
pub use id::{new_id, new_request_id, WindowId};
pub use origin::Origin;

pub type Result<T> = std::result::Result<T, RpcError>;
