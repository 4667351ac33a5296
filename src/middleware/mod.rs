pub mod request_id;
pub mod session;

pub use request_id::{make_span_with_request_id, request_id_middleware, RequestId};
pub use session::{CurrentSession, OptionalSession, SESSION_HEADER};
