use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::props::{Properties, PropertyValue, Row};
use super::RecordStore;

struct StoredRow {
    table: String,
    row: Row,
    archived: bool,
}

/// In-process store used for local runs (`STORE_BACKEND=memory`) and tests.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<StoredRow>>,
    options: Mutex<Vec<(String, String, Vec<String>)>>,
    failing_tables: Mutex<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the option vocabulary of a multi-select property.
    #[cfg(test)]
    pub fn with_tag_options(self, table: &str, property: &str, tags: &[&str]) -> Self {
        self.lock_options().push((
            table.to_string(),
            property.to_string(),
            tags.iter().map(|t| t.to_string()).collect(),
        ));
        self
    }

    /// Makes every subsequent write to `table` fail.
    #[cfg(test)]
    pub fn fail_writes_to(&self, table: &str) {
        self.lock_failing().insert(table.to_string());
    }

    /// Inserts a row directly, bypassing failure injection.
    pub fn seed(&self, table: &str, properties: Properties) -> Row {
        let row = Row::new(Uuid::new_v4().to_string(), properties);
        self.lock_rows().push(StoredRow {
            table: table.to_string(),
            row: row.clone(),
            archived: false,
        });
        row
    }

    /// Live rows of a table in insertion order.
    #[cfg(test)]
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.lock_rows()
            .iter()
            .filter(|r| r.table == table && !r.archived)
            .map(|r| r.row.clone())
            .collect()
    }

    #[cfg(test)]
    pub fn is_archived(&self, row_id: &str) -> bool {
        self.lock_rows()
            .iter()
            .any(|r| r.row.id == row_id && r.archived)
    }

    fn lock_rows(&self) -> std::sync::MutexGuard<'_, Vec<StoredRow>> {
        self.rows.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_options(&self) -> std::sync::MutexGuard<'_, Vec<(String, String, Vec<String>)>> {
        self.options.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_failing(&self) -> std::sync::MutexGuard<'_, HashSet<String>> {
        self.failing_tables.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn check_writable(&self, table: &str) -> anyhow::Result<()> {
        if self.lock_failing().contains(table) {
            anyhow::bail!("simulated write failure on table {table}");
        }
        Ok(())
    }

    fn select_live(&self, table: &str, pred: impl Fn(&Row) -> bool) -> Vec<Row> {
        self.lock_rows()
            .iter()
            .filter(|r| r.table == table && !r.archived && pred(&r.row))
            .map(|r| r.row.clone())
            .collect()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn find_by_title(
        &self,
        table: &str,
        property: &str,
        title: &str,
    ) -> anyhow::Result<Vec<Row>> {
        Ok(self.select_live(table, |row| row.text(property) == title))
    }

    async fn find_by_tag(
        &self,
        table: &str,
        property: &str,
        tag: &str,
    ) -> anyhow::Result<Vec<Row>> {
        Ok(self.select_live(table, |row| row.tags(property).iter().any(|t| t == tag)))
    }

    async fn recent(&self, table: &str, limit: usize) -> anyhow::Result<Vec<Row>> {
        let mut rows = self.select_live(table, |_| true);
        rows.reverse();
        rows.truncate(limit);
        Ok(rows)
    }

    async fn get(&self, row_id: &str) -> anyhow::Result<Option<Row>> {
        Ok(self
            .lock_rows()
            .iter()
            .find(|r| r.row.id == row_id && !r.archived)
            .map(|r| r.row.clone()))
    }

    async fn create(&self, table: &str, properties: Properties) -> anyhow::Result<Row> {
        self.check_writable(table)?;
        Ok(self.seed(table, properties))
    }

    async fn update(&self, row_id: &str, properties: Properties) -> anyhow::Result<Row> {
        let mut rows = self.lock_rows();
        let stored = rows
            .iter_mut()
            .find(|r| r.row.id == row_id && !r.archived)
            .ok_or_else(|| anyhow::anyhow!("row {row_id} not found"))?;
        if self.lock_failing().contains(&stored.table) {
            anyhow::bail!("simulated write failure on table {}", stored.table);
        }
        stored.row.properties.extend(properties);
        Ok(stored.row.clone())
    }

    async fn archive(&self, row_id: &str) -> anyhow::Result<()> {
        let mut rows = self.lock_rows();
        let stored = rows
            .iter_mut()
            .find(|r| r.row.id == row_id)
            .ok_or_else(|| anyhow::anyhow!("row {row_id} not found"))?;
        stored.archived = true;
        Ok(())
    }

    async fn tag_options(&self, table: &str, property: &str) -> anyhow::Result<Vec<String>> {
        let mut tags: Vec<String> = self
            .lock_options()
            .iter()
            .filter(|(t, p, _)| t == table && p == property)
            .flat_map(|(_, _, tags)| tags.iter().cloned())
            .collect();
        for row in self.select_live(table, |_| true) {
            if let Some(PropertyValue::MultiSelect(row_tags)) = row.properties.get(property) {
                for tag in row_tags {
                    if !tags.contains(tag) {
                        tags.push(tag.clone());
                    }
                }
            }
        }
        Ok(tags)
    }
}
