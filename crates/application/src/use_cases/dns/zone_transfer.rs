use std::sync::Arc;

use tracing::debug;
use zoneward_domain::{
    DomainError, Question, RecordSetCriterion, RecordType, Request, ResourceRecordSet, Response,
    ZoneCriterion,
};

use super::failure_response;
use crate::ports::ZoneRepository;
use crate::services::{CriteriaBuilder, RRsetProjector};

/// Answers AXFR (and IXFR) with the whole zone framed by its SOA.
pub struct ZoneTransferResponder {
    repository: Arc<dyn ZoneRepository>,
    criteria: CriteriaBuilder,
}

impl ZoneTransferResponder {
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

        match self.transfer(request, question).await {
            Ok(answers) => {
                debug!(zone = %question.name, rrsets = answers.len(), "Zone transfer assembled");
                Response::authoritative_answer(request, answers)
            }
            Err(e) => failure_response(request, &e, "zone transfer"),
        }
    }

    async fn transfer(
        &self,
        request: &Request,
        question: &Question,
    ) -> Result<Vec<ResourceRecordSet>, DomainError> {
        let context = &request.context;

        let base = ZoneCriterion {
            deleted: Some(false),
            ..ZoneCriterion::by_name(&question.name)
        };
        let criterion = self.criteria.zone_criterion(request, base)?;
        let zone = self.repository.find_zone(context, &criterion).await?;

        let soa_recordsets = self
            .repository
            .find_recordsets(
                context,
                &RecordSetCriterion::zone_records_of_type(Arc::clone(&zone.id), RecordType::SOA),
            )
            .await?;
        let soa: Vec<ResourceRecordSet> = soa_recordsets
            .iter()
            .filter_map(|rs| RRsetProjector::project(&zone, rs))
            .collect();

        if soa.is_empty() {
            return Err(DomainError::ZoneTransferFailed(format!(
                "zone {} has no SOA record",
                zone.name
            )));
        }

        let recordsets = self
            .repository
            .find_recordsets(
                context,
                &RecordSetCriterion::zone_records_except(Arc::clone(&zone.id), RecordType::SOA),
            )
            .await?;

        let mut answers = Vec::with_capacity(recordsets.len() + 2 * soa.len());
        answers.extend(soa.iter().cloned());
        answers.extend(
            recordsets
                .iter()
                .filter_map(|rs| RRsetProjector::project(&zone, rs)),
        );
        answers.extend(soa);

        Ok(answers)
    }
}
