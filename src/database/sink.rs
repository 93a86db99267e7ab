use crate::database::record::{Column, SinkRecord, SqlValue};
use crate::database::table::TableName;
use crate::error::Result;
use async_trait::async_trait;
use sqlx::query_builder::Separated;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

/// Destination for scraped batches.
///
/// Tables are created on first use. Appending never deduplicates: writing the same
/// rows twice stores them twice.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn append<R: SinkRecord>(&self, table: &TableName, rows: &[R]) -> Result<()>;

    /// Drops whatever the table held and stores `rows` instead.
    async fn replace<R: SinkRecord>(&self, table: &TableName, rows: &[R]) -> Result<()>;

    async fn read_all<R: SinkRecord>(&self, table: &TableName) -> Result<Vec<R>>;
}

#[derive(Clone)]
pub struct PgSink {
    pool: PgPool,
}

impl PgSink {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_table<R: SinkRecord>(&self, table: &TableName) -> Result<()> {
        let ddl = format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            table.quoted(),
            R::COLUMNS
                .iter()
                .map(|c| format!("\"{}\" {}", c.name, c.ty.sql()))
                .collect::<Vec<_>>()
                .join(", ")
        );
        sqlx::query(&ddl).execute(&self.pool).await?;
        Ok(())
    }

    async fn insert<R: SinkRecord>(&self, table: &TableName, rows: &[R]) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "INSERT INTO {} ({}) ",
            table.quoted(),
            column_list(R::COLUMNS)
        ));
        builder.push_values(rows, |mut tuple, row| {
            for value in row.values() {
                push_value(&mut tuple, value);
            }
        });
        builder.build().execute(&self.pool).await?;

        debug!(table = %table, rows = rows.len(), "Appended rows");
        Ok(())
    }
}

#[async_trait]
impl RecordSink for PgSink {
    async fn append<R: SinkRecord>(&self, table: &TableName, rows: &[R]) -> Result<()> {
        self.ensure_table::<R>(table).await?;
        self.insert(table, rows).await
    }

    async fn replace<R: SinkRecord>(&self, table: &TableName, rows: &[R]) -> Result<()> {
        let drop = format!("DROP TABLE IF EXISTS {}", table.quoted());
        sqlx::query(&drop).execute(&self.pool).await?;
        self.ensure_table::<R>(table).await?;
        self.insert(table, rows).await
    }

    async fn read_all<R: SinkRecord>(&self, table: &TableName) -> Result<Vec<R>> {
        self.ensure_table::<R>(table).await?;
        let select = format!(
            "SELECT {} FROM {}",
            column_list(R::COLUMNS),
            table.quoted()
        );
        let rows = sqlx::query_as::<_, R>(&select)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

fn column_list(columns: &[Column]) -> String {
    columns
        .iter()
        .map(|c| format!("\"{}\"", c.name))
        .collect::<Vec<_>>()
        .join(", ")
}

fn push_value(tuple: &mut Separated<'_, '_, Postgres, &'static str>, value: SqlValue) {
    match value {
        SqlValue::Text(v) => {
            tuple.push_bind(v);
        }
        SqlValue::BigInt(v) => {
            tuple.push_bind(v);
        }
        SqlValue::Double(v) => {
            tuple.push_bind(v);
        }
        SqlValue::Date(v) => {
            tuple.push_bind(v);
        }
    }
}
