use super::{NoteStore, TableName, registry::BackendSpec};
use crate::config::PoolConfig;
use crate::error::StorageError;
use crate::note::Note;
use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::debug;

/// Notes stored as rows of a PostGIS table:
/// `followup boolean, email text, comment text, map_context text, login text,
/// the_geom geometry(Point, <srid>)`.
#[derive(Debug, Clone)]
pub struct PostgisStore {
    pool: PgPool,
    insert_sql: String,
    srid: i32,
}

impl PostgisStore {
    /// Creates the pool without opening any connection; the database is
    /// first contacted by the first store.
    pub fn connect_lazy(spec: &BackendSpec, pool: &PoolConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(pool.max_connections)
            .acquire_timeout(pool.acquire_timeout())
            .test_before_acquire(pool.test_before_acquire)
            .connect_lazy_with(spec.connection.connect_options().clone());

        Self::with_pool(pool, &spec.table, spec.srid)
    }

    pub fn with_pool(pool: PgPool, table: &TableName, srid: i32) -> Self {
        Self {
            pool,
            insert_sql: insert_statement(table),
            srid,
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn insert_statement(table: &TableName) -> String {
    format!(
        "INSERT INTO {} (followup, email, comment, map_context, login, the_geom) \
         VALUES ($1, $2, $3, $4, $5, ST_SetSRID(ST_MakePoint($6, $7), $8))",
        table.quoted()
    )
}

/// Column values bound into the insert, in placeholder order.
#[derive(Debug, PartialEq)]
struct NoteRow<'a> {
    followup: bool,
    email: Option<&'a str>,
    comment: &'a str,
    map_context: &'a str,
    login: Option<&'a str>,
    x: f64,
    y: f64,
}

impl<'a> From<&'a Note> for NoteRow<'a> {
    fn from(note: &'a Note) -> Self {
        Self {
            followup: note.follow_up(),
            email: note.email(),
            comment: note.comment(),
            map_context: note.map_context(),
            login: note.login(),
            // Points are (x, y) = (longitude, latitude).
            x: note.longitude(),
            y: note.latitude(),
        }
    }
}

#[async_trait]
impl NoteStore for PostgisStore {
    async fn store(&self, note: &Note) -> Result<(), StorageError> {
        let row = NoteRow::from(note);

        // Returned to the pool on drop, whichever way this function exits.
        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query(self.insert_sql.as_str())
            .bind(row.followup)
            .bind(row.email)
            .bind(row.comment)
            .bind(row.map_context)
            .bind(row.login)
            .bind(row.x)
            .bind(row.y)
            .bind(self.srid)
            .execute(&mut *conn)
            .await?;

        debug!(
            rows = result.rows_affected(),
            srid = self.srid,
            "Inserted note row"
        );
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
