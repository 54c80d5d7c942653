use std::sync::Arc;

use tracing::debug;
use zoneward_domain::{OpCode, RecordClass, Request, Response};

use super::{NotifyResponder, RecordQueryResponder, ZoneTransferResponder};

/// Entry point for decoded requests: routes on opcode and question type.
///
/// `handle` never fails; every error is reported through the response rcode.
pub struct RequestDispatcher {
    zone_transfer: Arc<ZoneTransferResponder>,
    record_query: Arc<RecordQueryResponder>,
    notify: Arc<NotifyResponder>,
}

impl RequestDispatcher {
    pub fn new(
        zone_transfer: Arc<ZoneTransferResponder>,
        record_query: Arc<RecordQueryResponder>,
        notify: Arc<NotifyResponder>,
    ) -> Self {
        Self {
            zone_transfer,
            record_query,
            notify,
        }
    }

    pub async fn handle(&self, request: &Request) -> Response {
        match request.opcode {
            OpCode::Query => {
                let question = match request.single_question() {
                    Some(q) if q.record_class == RecordClass::IN => q,
                    _ => {
                        debug!(
                            questions = request.questions.len(),
                            "QUERY must carry exactly one IN question"
                        );
                        return Response::refused(request);
                    }
                };

                // IXFR is answered with a full transfer.
                if question.record_type.is_zone_transfer() {
                    self.zone_transfer.handle(request).await
                } else {
                    self.record_query.handle(request).await
                }
            }
            OpCode::Notify => self.notify.handle(request).await,
            other => {
                debug!(opcode = %other, "Unsupported opcode");
                Response::refused(request)
            }
        }
    }
}
