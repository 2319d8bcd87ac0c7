use http::{Request, Response};
use micro_wire::TransportError;
use micro_wire::body::Body;
use micro_wire::sender::Transport;
use tracing::trace;
use ureq::{Agent, SendBody};

/// A [`Transport`] backed by a blocking [`ureq::Agent`].
///
/// Status codes are never turned into errors, leaving their interpretation
/// to the response handlers.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = Agent::config_builder().http_status_as_error(false).build().new_agent();
        Self { agent }
    }

    /// Uses a caller configured agent, e.g. one with timeouts or a proxy.
    pub fn with_agent(agent: Agent) -> Self {
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn round_trip(&self, request: Request<Body<'_>>) -> Result<Response<Body<'static>>, TransportError> {
        let (parts, mut body) = request.into_parts();
        trace!(streaming = body.is_streaming(), "hand request to ureq");

        let response = if body.is_streaming() {
            self.agent.run(Request::from_parts(parts, SendBody::from_reader(&mut body)))?
        } else {
            let content = body.into_bytes()?;
            self.agent.run(Request::from_parts(parts, content.as_ref()))?
        };

        let (parts, body) = response.into_parts();
        Ok(Response::from_parts(parts, Body::stream(body.into_reader())))
    }
}
