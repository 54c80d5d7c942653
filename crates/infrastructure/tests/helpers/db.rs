use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;

pub const TEST_POOL: &str = "794ccc2c-d751-44fe-b57f-8894c9f5c842";

const MIGRATIONS_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../migrations");

/// In-memory database carrying the shipped schema from `migrations/`.
pub async fn create_test_db() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    Migrator::new(Path::new(MIGRATIONS_DIR))
        .await
        .unwrap()
        .run(&pool)
        .await
        .unwrap();

    pool
}

pub async fn insert_zone(pool: &SqlitePool, id: &str, pool_id: &str, name: &str, serial: i64) {
    insert_zone_full(pool, id, pool_id, name, serial, "PRIMARY", false).await;
}

pub async fn insert_zone_full(
    pool: &SqlitePool,
    id: &str,
    pool_id: &str,
    name: &str,
    serial: i64,
    kind: &str,
    deleted: bool,
) {
    sqlx::query(
        "INSERT INTO zones (id, pool_id, name, serial, ttl, type, deleted)
         VALUES (?, ?, ?, ?, 3600, ?, ?)",
    )
    .bind(id)
    .bind(pool_id)
    .bind(name)
    .bind(serial)
    .bind(kind)
    .bind(deleted)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn insert_master(pool: &SqlitePool, zone_id: &str, host: &str, port: i64) {
    sqlx::query("INSERT INTO zone_masters (zone_id, host, port) VALUES (?, ?, ?)")
        .bind(zone_id)
        .bind(host)
        .bind(port)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn insert_recordset(
    pool: &SqlitePool,
    id: &str,
    zone_id: &str,
    name: &str,
    rtype: &str,
    ttl: Option<i64>,
) {
    sqlx::query("INSERT INTO recordsets (id, zone_id, name, type, ttl) VALUES (?, ?, ?, ?, ?)")
        .bind(id)
        .bind(zone_id)
        .bind(name)
        .bind(rtype)
        .bind(ttl)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn insert_record(pool: &SqlitePool, id: &str, recordset_id: &str, data: &str, action: &str) {
    sqlx::query("INSERT INTO records (id, recordset_id, data, action) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(recordset_id)
        .bind(data)
        .bind(action)
        .execute(pool)
        .await
        .unwrap();
}

/// Primary zone `example.org.` (id `z1`, serial 100) in the default pool
/// with an SOA, two NS records, a two-record `www` A set and a TXT set.
pub async fn seed_example_zone(pool: &SqlitePool) {
    insert_zone(pool, "z1", TEST_POOL, "example.org.", 100).await;

    insert_recordset(pool, "rs-soa", "z1", "example.org.", "SOA", None).await;
    insert_record(
        pool,
        "r-soa",
        "rs-soa",
        "ns1.example.org. admin.example.org. 100 3600 600 86400 300",
        "NONE",
    )
    .await;

    insert_recordset(pool, "rs-ns", "z1", "example.org.", "NS", None).await;
    insert_record(pool, "r-ns1", "rs-ns", "ns1.example.org.", "NONE").await;
    insert_record(pool, "r-ns2", "rs-ns", "ns2.example.org.", "NONE").await;

    insert_recordset(pool, "rs-www", "z1", "www.example.org.", "A", Some(300)).await;
    insert_record(pool, "r-www1", "rs-www", "192.0.2.10", "NONE").await;
    insert_record(pool, "r-www2", "rs-www", "192.0.2.11", "NONE").await;

    insert_recordset(pool, "rs-txt", "z1", "example.org.", "TXT", Some(60)).await;
    insert_record(pool, "r-txt", "rs-txt", "\"v=spf1 -all\"", "NONE").await;
}
