use sqlx::SqlitePool;
use std::sync::Arc;
use zoneward_infrastructure::repositories::SqliteZoneRepository;

pub struct Repositories {
    pub zones: Arc<SqliteZoneRepository>,
}

impl Repositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            zones: Arc::new(SqliteZoneRepository::new(pool)),
        }
    }
}
