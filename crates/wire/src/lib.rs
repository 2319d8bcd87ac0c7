//! Wire-level building blocks of the micro http client.
//!
//! This crate holds everything an exchange needs short of the network
//! itself:
//!
//! - [`url`]: absolute urls, their builder and host/port validation
//! - [`protocol`]: message reader/writer contracts, request builders,
//!   response handlers and the [`Sender`](protocol::Sender) seam
//! - [`body`]: message bodies and their serializers/deserializers
//! - [`header`]: writers for common headers
//! - [`sender`]: a reference sender running over any synchronous
//!   [`Transport`](sender::Transport)
//!
//! # Example
//!
//! ```
//! use micro_wire::body::{StringBody, write_body};
//! use micro_wire::protocol::{Method, RequestBuilder, RequestReader, RequestWriter, ResponseReader};
//! use micro_wire::protocol::{ResponseWriter, Sender, StatusCode};
//! use micro_wire::sender::{HttpSender, Loopback};
//! use micro_wire::url::UrlBuilder;
//! use micro_wire::WireError;
//!
//! fn teapot(_: &mut dyn RequestReader, response: &mut dyn ResponseWriter<'static>) -> Result<(), WireError> {
//!     response.status_line(StatusCode::new(418)?, "I'm a teapot")?;
//!     write_body(response, &StringBody::new("short and stout"))
//! }
//!
//! let url = UrlBuilder::new().http().host_and_port("localhost").join_path("tea").build().unwrap();
//! let builder = RequestBuilder::new(move |writer| writer.request_line(Method::Get, &url));
//!
//! let sender = HttpSender::new(Loopback::new(teapot));
//! let reader = sender.send(&builder).unwrap();
//! assert_eq!(reader.status_line().0.as_u16(), 418);
//! ```

pub mod body;
mod error;
pub mod header;
pub mod protocol;
pub mod sender;
pub mod url;
mod utils;

pub use error::{TransportError, WireError};
