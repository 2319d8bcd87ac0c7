//! HTTP message wire contracts.
//!
//! Readers and writers abstract over how a request or response is actually
//! represented, so builders and handlers never depend on a transport's
//! native types.

mod exchange;
mod field;
mod message;
mod method;
mod status;
mod version;

pub use exchange::{RequestBuilder, ResponseHandler, Sender};
pub use field::{Field, Fields};
pub use message::{MessageReader, MessageWriter, RequestReader, RequestWriter, ResponseReader, ResponseWriter};
pub use method::Method;
pub use status::StatusCode;
pub use version::ProtocolVersion;
