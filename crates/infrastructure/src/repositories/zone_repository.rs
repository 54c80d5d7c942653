use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;
use std::net::IpAddr;
use std::str::FromStr;
use tracing::{debug, error, info, instrument, warn};
use zoneward_application::ports::{ZoneContentWriter, ZoneRepository};
use zoneward_domain::{
    DomainError, Record, RecordAction, RecordSet, RecordSetCriterion, RecordType, RequestContext,
    TransferredZone, TypeFilter, Zone, ZoneCriterion, ZoneKind, ZoneMaster,
};

type ZoneRow = (String, String, String, i64, i64, String, bool);

type RecordSetRow = (
    String,
    String,
    String,
    String,
    Option<i64>,
    Option<String>,
    Option<String>,
    Option<String>,
);

const SELECT_ZONES: &str = "SELECT id, pool_id, name, serial, ttl, type, deleted
     FROM zones
     WHERE (?1 IS NULL OR id = ?1)
       AND (?2 IS NULL OR pool_id = ?2)
       AND (?3 IS NULL OR name = ?3)
       AND (?4 IS NULL OR type = ?4)
       AND (?5 IS NULL OR deleted = ?5)
     ORDER BY id
     LIMIT 2";

const SELECT_RECORDSETS: &str =
    "SELECT rs.id, rs.zone_id, rs.name, rs.type, rs.ttl, r.id, r.data, r.action
     FROM recordsets rs
     JOIN zones z ON z.id = rs.zone_id
     LEFT JOIN records r ON r.recordset_id = rs.id
     WHERE (?1 IS NULL OR rs.zone_id = ?1)
       AND (?2 IS NULL OR rs.name = ?2)
       AND (?3 IS NULL OR rs.type = ?3)
       AND (?4 IS NULL OR rs.type != ?4)
       AND (?5 IS NULL OR z.deleted = ?5)
       AND (?6 IS NULL OR z.pool_id = ?6)
     ORDER BY rs.name, rs.type, rs.id, r.id";

pub struct SqliteZoneRepository {
    pool: SqlitePool,
}

impl SqliteZoneRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn database_error(e: sqlx::Error) -> DomainError {
        DomainError::DatabaseError(e.to_string())
    }

    fn row_to_zone(row: ZoneRow) -> Result<Zone, DomainError> {
        let (id, pool_id, name, serial, ttl, kind, deleted) = row;

        let kind = ZoneKind::from_str(&kind)?;
        let serial = u32::try_from(serial)
            .map_err(|_| DomainError::DatabaseError(format!("Zone {} has invalid serial {}", id, serial)))?;
        let ttl = u32::try_from(ttl)
            .map_err(|_| DomainError::DatabaseError(format!("Zone {} has invalid ttl {}", id, ttl)))?;

        let mut zone = Zone::new(id, pool_id, &name, serial, ttl);
        zone.kind = kind;
        zone.deleted = deleted;
        Ok(zone)
    }

    async fn load_masters(&self, zone_id: &str) -> Result<Vec<ZoneMaster>, DomainError> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT host, port FROM zone_masters WHERE zone_id = ? ORDER BY id",
        )
        .bind(zone_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, zone_id, "Failed to load zone masters");
            Self::database_error(e)
        })?;

        Ok(rows
            .into_iter()
            .filter_map(|(host, port)| {
                let master = host
                    .parse::<IpAddr>()
                    .ok()
                    .zip(u16::try_from(port).ok())
                    .map(|(host, port)| ZoneMaster::new(host, port));
                if master.is_none() {
                    warn!(zone_id, host = %host, port, "Ignoring invalid zone master");
                }
                master
            })
            .collect())
    }

    /// Folds the joined rows (already ordered by record-set) into record-sets.
    fn group_recordsets(rows: Vec<RecordSetRow>) -> Vec<RecordSet> {
        let mut recordsets: Vec<RecordSet> = Vec::new();
        let mut skipped: Option<String> = None;

        for (rs_id, zone_id, name, rtype, ttl, record_id, data, action) in rows {
            if skipped.as_deref() == Some(rs_id.as_str()) {
                continue;
            }

            let same_set = recordsets
                .last()
                .is_some_and(|rs| rs.id.as_ref() == rs_id.as_str());

            if !same_set {
                let record_type = match RecordType::from_str(&rtype) {
                    Ok(t) => t,
                    Err(e) => {
                        warn!(recordset_id = %rs_id, error = %e, "Skipping record-set with unknown type");
                        skipped = Some(rs_id);
                        continue;
                    }
                };
                let ttl = ttl.and_then(|t| u32::try_from(t).ok());
                recordsets.push(RecordSet::new(rs_id, zone_id, &name, record_type, ttl));
            }

            let (Some(record_id), Some(data)) = (record_id, data) else {
                continue;
            };
            let action = action
                .as_deref()
                .map(RecordAction::from_str)
                .transpose()
                .unwrap_or_else(|e| {
                    warn!(record_id = %record_id, error = %e, "Unknown record action, treating as NONE");
                    None
                })
                .unwrap_or(RecordAction::None);

            if let Some(current) = recordsets.last_mut() {
                current.records.push(Record::new(record_id, data, action));
            }
        }

        recordsets
    }

    fn new_id() -> String {
        format!("{:016x}{:016x}", fastrand::u64(..), fastrand::u64(..))
    }
}

#[async_trait]
impl ZoneRepository for SqliteZoneRepository {
    #[instrument(skip(self), fields(request_id = %context))]
    async fn find_zone(
        &self,
        context: &RequestContext,
        criterion: &ZoneCriterion,
    ) -> Result<Zone, DomainError> {
        let mut rows = sqlx::query_as::<_, ZoneRow>(SELECT_ZONES)
            .bind(criterion.id.as_deref())
            .bind(criterion.pool_id.as_deref())
            .bind(criterion.name.as_deref())
            .bind(criterion.kind.map(|k| k.as_str()))
            .bind(criterion.deleted)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to query zones");
                Self::database_error(e)
            })?;

        let row = match rows.len() {
            0 => {
                return Err(DomainError::ZoneNotFound(format!(
                    "no zone matches {:?}",
                    criterion
                )))
            }
            1 => rows.remove(0),
            _ => {
                error!(criterion = ?criterion, "Zone lookup matched more than one zone");
                return Err(DomainError::DatabaseError(
                    "zone lookup matched more than one zone".to_string(),
                ));
            }
        };

        let mut zone = Self::row_to_zone(row)?;
        zone.masters = self.load_masters(&zone.id).await?;
        Ok(zone)
    }

    #[instrument(skip(self), fields(request_id = %context))]
    async fn find_recordset(
        &self,
        context: &RequestContext,
        criterion: &RecordSetCriterion,
    ) -> Result<RecordSet, DomainError> {
        self.find_recordsets(context, criterion)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                DomainError::RecordSetNotFound(format!("no record-set matches {:?}", criterion))
            })
    }

    #[instrument(skip(self), fields(request_id = %context))]
    async fn find_recordsets(
        &self,
        context: &RequestContext,
        criterion: &RecordSetCriterion,
    ) -> Result<Vec<RecordSet>, DomainError> {
        let (type_is, type_is_not) = match criterion.record_type {
            Some(TypeFilter::Is(t)) => (Some(t.to_string()), None),
            Some(TypeFilter::IsNot(t)) => (None, Some(t.to_string())),
            None => (None, None),
        };

        let rows = sqlx::query_as::<_, RecordSetRow>(SELECT_RECORDSETS)
            .bind(criterion.zone_id.as_deref())
            .bind(criterion.name.as_deref())
            .bind(type_is)
            .bind(type_is_not)
            .bind(criterion.zone_deleted)
            .bind(criterion.zone_pool_id.as_deref())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to query record-sets");
                Self::database_error(e)
            })?;

        let recordsets = Self::group_recordsets(rows);
        debug!(count = recordsets.len(), "Record-sets loaded");
        Ok(recordsets)
    }
}

#[async_trait]
impl ZoneContentWriter for SqliteZoneRepository {
    #[instrument(skip(self, transferred), fields(request_id = %context, serial = transferred.serial))]
    async fn replace_zone_contents(
        &self,
        context: &RequestContext,
        zone_id: &str,
        transferred: &TransferredZone,
    ) -> Result<(), DomainError> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            error!(error = %e, "Failed to begin transaction");
            Self::database_error(e)
        })?;

        let updated = sqlx::query("UPDATE zones SET serial = ?, updated_at = ? WHERE id = ?")
            .bind(transferred.serial as i64)
            .bind(Utc::now().format("%Y-%m-%d %H:%M:%S").to_string())
            .bind(zone_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to update zone serial");
                Self::database_error(e)
            })?;

        if updated.rows_affected() == 0 {
            return Err(DomainError::ZoneNotFound(format!("zone {} no longer exists", zone_id)));
        }

        sqlx::query(
            "DELETE FROM records
             WHERE recordset_id IN (SELECT id FROM recordsets WHERE zone_id = ?)",
        )
        .bind(zone_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to clear records");
            Self::database_error(e)
        })?;

        sqlx::query("DELETE FROM recordsets WHERE zone_id = ?")
            .bind(zone_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to clear record-sets");
                Self::database_error(e)
            })?;

        for rrset in &transferred.recordsets {
            let recordset_id = Self::new_id();

            sqlx::query(
                "INSERT INTO recordsets (id, zone_id, name, type, ttl) VALUES (?, ?, ?, ?, ?)",
            )
            .bind(&recordset_id)
            .bind(zone_id)
            .bind(rrset.name.as_ref())
            .bind(rrset.record_type.to_string())
            .bind(rrset.ttl as i64)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!(error = %e, name = %rrset.name, "Failed to insert record-set");
                Self::database_error(e)
            })?;

            for data in &rrset.data {
                sqlx::query(
                    "INSERT INTO records (id, recordset_id, data, action) VALUES (?, ?, ?, 'NONE')",
                )
                .bind(Self::new_id())
                .bind(&recordset_id)
                .bind(data.as_ref())
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    error!(error = %e, name = %rrset.name, "Failed to insert record");
                    Self::database_error(e)
                })?;
            }
        }

        tx.commit().await.map_err(|e| {
            error!(error = %e, "Failed to commit zone contents");
            Self::database_error(e)
        })?;

        info!(
            zone_id,
            recordsets = transferred.recordsets.len(),
            records = transferred.record_count(),
            "Zone contents replaced"
        );

        Ok(())
    }
}
