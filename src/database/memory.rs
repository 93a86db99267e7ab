use crate::database::record::SinkRecord;
use crate::database::sink::RecordSink;
use crate::database::table::TableName;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Keeps tables in process memory. Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemorySink {
    tables: Arc<Mutex<HashMap<TableName, Vec<JsonValue>>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row_count(&self, table: &TableName) -> Result<usize> {
        self.with_tables(|tables| Ok(tables.get(table).map_or(0, Vec::len)))
    }

    pub fn table_names(&self) -> Result<Vec<TableName>> {
        self.with_tables(|tables| Ok(tables.keys().cloned().collect()))
    }

    fn with_tables<T>(
        &self,
        f: impl FnOnce(&mut HashMap<TableName, Vec<JsonValue>>) -> Result<T>,
    ) -> Result<T> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| Error::Internal("memory sink lock poisoned".to_string()))?;
        f(&mut tables)
    }
}

#[async_trait]
impl RecordSink for MemorySink {
    async fn append<R: SinkRecord>(&self, table: &TableName, rows: &[R]) -> Result<()> {
        let encoded = rows
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.with_tables(|tables| {
            tables.entry(table.clone()).or_default().extend(encoded);
            Ok(())
        })
    }

    async fn replace<R: SinkRecord>(&self, table: &TableName, rows: &[R]) -> Result<()> {
        let encoded = rows
            .iter()
            .map(serde_json::to_value)
            .collect::<std::result::Result<Vec<_>, _>>()?;
        self.with_tables(|tables| {
            tables.insert(table.clone(), encoded);
            Ok(())
        })
    }

    async fn read_all<R: SinkRecord>(&self, table: &TableName) -> Result<Vec<R>> {
        let stored = self.with_tables(|tables| Ok(tables.get(table).cloned().unwrap_or_default()))?;
        stored
            .into_iter()
            .map(|row| serde_json::from_value(row).map_err(Error::from))
            .collect()
    }
}
