use crate::dns::wire::{WireCodec, MAX_UDP_RESPONSE_SIZE};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error};
use zoneward_application::use_cases::RequestDispatcher;
use zoneward_domain::{RequestContext, Response, ResponseCode};

/// Bridges raw DNS messages from the listeners to the dispatcher.
pub struct DnsRequestHandler {
    dispatcher: Arc<RequestDispatcher>,
    tcp_max_message_size: usize,
}

impl DnsRequestHandler {
    pub fn new(dispatcher: Arc<RequestDispatcher>, tcp_max_message_size: usize) -> Self {
        Self {
            dispatcher,
            tcp_max_message_size,
        }
    }

    /// Reply datagram for one UDP message, or `None` when nothing should be sent.
    pub async fn handle_udp(&self, bytes: &[u8], source: SocketAddr) -> Option<Vec<u8>> {
        let response = match self.dispatch(bytes, source).await {
            Ok(response) => response,
            Err(fallback) => return fallback,
        };

        match WireCodec::encode_udp(&response, MAX_UDP_RESPONSE_SIZE) {
            Ok(reply) => Some(reply),
            Err(e) => {
                error!(client = %source, error = %e, "Failed to encode UDP response");
                Self::server_failure(&response)
            }
        }
    }

    /// Reply messages for one TCP request, in send order. Zone transfers may
    /// span several messages.
    pub async fn handle_tcp(&self, bytes: &[u8], source: SocketAddr) -> Vec<Vec<u8>> {
        let response = match self.dispatch(bytes, source).await {
            Ok(response) => response,
            Err(fallback) => return fallback.into_iter().collect(),
        };

        let is_transfer = response
            .questions
            .first()
            .is_some_and(|q| q.record_type.is_zone_transfer());

        let encoded = if is_transfer {
            WireCodec::encode_stream(&response, self.tcp_max_message_size)
        } else {
            WireCodec::encode(&response).map(|reply| vec![reply])
        };

        match encoded {
            Ok(messages) => messages,
            Err(e) => {
                error!(client = %source, error = %e, "Failed to encode TCP response");
                Self::server_failure(&response).into_iter().collect()
            }
        }
    }

    /// `Err` carries the reply to send when the message could not be decoded.
    async fn dispatch(&self, bytes: &[u8], source: SocketAddr) -> Result<Response, Option<Vec<u8>>> {
        let context = RequestContext::new(format!("req-{:016x}", fastrand::u64(..)));

        match WireCodec::decode(bytes, source, context) {
            Ok(request) => Ok(self.dispatcher.handle(&request).await),
            Err(e) => {
                debug!(client = %source, error = %e, "Undecodable DNS message");
                Err(WireCodec::header_only_response(bytes))
            }
        }
    }

    fn server_failure(response: &Response) -> Option<Vec<u8>> {
        let mut failed = response.clone();
        failed.answers.clear();
        failed.authoritative = false;
        failed.rcode = ResponseCode::ServFail;
        WireCodec::encode(&failed).ok()
    }
}
