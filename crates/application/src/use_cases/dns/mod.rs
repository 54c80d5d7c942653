mod dispatcher;
mod notify;
mod record_query;
mod zone_transfer;

pub use dispatcher::RequestDispatcher;
pub use notify::NotifyResponder;
pub use record_query::RecordQueryResponder;
pub use zone_transfer::ZoneTransferResponder;

use tracing::{error, warn};
use zoneward_domain::{DomainError, Request, Response, ResponseCode};

/// Logs `err` and answers with the rcode it maps to.
pub(crate) fn failure_response(request: &Request, err: &DomainError, operation: &str) -> Response {
    let question = request
        .single_question()
        .map(ToString::to_string)
        .unwrap_or_default();

    match err {
        DomainError::UnsupportedAuthorizationScope(_) => {
            error!(error = %err, %question, operation, "TSIG key scope is misconfigured");
        }
        e if e.is_refusal() => {
            warn!(error = %e, %question, operation, "Refusing request");
        }
        e => {
            error!(error = %e, %question, operation, "Request failed");
        }
    }

    Response::error(request, ResponseCode::for_error(err))
}
