use std::sync::Arc;

use zoneward_domain::{
    DomainError, Question, RecordSetCriterion, Request, ResourceRecordSet, Response,
    ZoneCriterion,
};

use super::failure_response;
use crate::ports::ZoneRepository;
use crate::services::{CriteriaBuilder, RRsetProjector};

/// Answers an ordinary single-question QUERY.
///
/// The record-set is looked up only in zones the requester may read, so a
/// same-named zone in another pool never shadows the authorized one. Names
/// that do not exist and names without the requested type are both
/// answered REFUSED; no negative answers with an SOA are produced.
pub struct RecordQueryResponder {
    repository: Arc<dyn ZoneRepository>,
    criteria: CriteriaBuilder,
}

impl RecordQueryResponder {
    pub fn new(repository: Arc<dyn ZoneRepository>, criteria: CriteriaBuilder) -> Self {
        Self {
            repository,
            criteria,
        }
    }

    pub async fn handle(&self, request: &Request) -> Response {
        let Some(question) = request.single_question() else {
            return Response::refused(request);
        };

        match self.answer(request, question).await {
            Ok(rrset) => Response::authoritative_answer(request, vec![rrset]),
            Err(e) => failure_response(request, &e, "record query"),
        }
    }

    async fn answer(
        &self,
        request: &Request,
        question: &Question,
    ) -> Result<ResourceRecordSet, DomainError> {
        let context = &request.context;
        let authorized = self.criteria.zone_criterion(request, ZoneCriterion::default())?;

        let recordset = self
            .repository
            .find_recordset(
                context,
                &RecordSetCriterion::for_question(&question.name, question.record_type)
                    .within(&authorized),
            )
            .await?;

        let criterion = authorized.restrict_to_zone(Arc::clone(&recordset.zone_id))?;
        let zone = self.repository.find_zone(context, &criterion).await?;

        RRsetProjector::project(&zone, &recordset)
            .ok_or_else(|| DomainError::RecordSetNotFound(question.to_string()))
    }
}
