//! A composable micro http client.
//!
//! Requests are assembled from small [`RequestBuilder`]s and responses
//! processed by a chain of [`ResponseHandler`]s. Both chains stop at the
//! first error, and that error is what the exchange returns.
//!
//! # Example
//!
//! ```
//! use micro_client::{Client, accept, expect_success, get, read_json_response};
//! use micro_wire::body::{JsonBody, write_body};
//! use micro_wire::protocol::{RequestReader, ResponseWriter};
//! use micro_wire::sender::{HttpSender, Loopback};
//! use micro_wire::WireError;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Default, Deserialize)]
//! struct Greeting {
//!     message: String,
//! }
//!
//! fn greet(_: &mut dyn RequestReader, response: &mut dyn ResponseWriter<'static>) -> Result<(), WireError> {
//!     write_body(response, &JsonBody(serde_json::json!({ "message": "hello" })))
//! }
//!
//! let client = Client::new(HttpSender::new(Loopback::new(greet)));
//! let mut greeting = Greeting::default();
//!
//! client
//!     .request([get("http://localhost:8080/greeting"), accept([mime::APPLICATION_JSON])])
//!     .handle([expect_success(), read_json_response(&mut greeting)])
//!     .unwrap();
//!
//! assert_eq!(greeting.message, "hello");
//! ```
//!
//! With the `ureq` feature enabled, `Client::default()` and `request()` send
//! over the network through a freshly built `UreqTransport`.

mod body;
mod client;
mod handler;
mod header;
mod method;
#[cfg(feature = "ureq")]
mod ureq_transport;

pub use body::{body, bytes, json, stream, text};
pub use client::{Client, Response};
pub use handler::{
    expect_status_in, expect_status_one_of, expect_success, read_bytes_response, read_json_response, read_response,
    read_text_response,
};
pub use header::{accept, authorization, bearer_token, bearer_token_opt, content_length, content_type, header};
pub use method::{TargetUrl, delete, get, head, options, patch, post, put, request_line};
pub use micro_wire::protocol::{RequestBuilder, ResponseHandler};
#[cfg(feature = "ureq")]
pub use ureq_transport::UreqTransport;

#[cfg(feature = "ureq")]
impl Default for Client<micro_wire::sender::HttpSender<UreqTransport>> {
    fn default() -> Self {
        Client::new(micro_wire::sender::HttpSender::new(UreqTransport::new()))
    }
}

/// Sends the request over a freshly built [`Client::default`].
#[cfg(feature = "ureq")]
pub fn request<'a, I, B>(builders: I) -> Response
where
    I: IntoIterator<Item = B>,
    B: Into<Option<RequestBuilder<'a>>>,
{
    Client::default().request(builders)
}
