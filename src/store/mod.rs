//! Record store adapter: a thin typed seam over the hosted table store.
//!
//! Rows are addressed by table id for queries and by row id for reads and
//! writes. No business logic lives behind this trait.

pub mod memory;
pub mod notion;
pub mod props;

use async_trait::async_trait;

pub use memory::MemoryStore;
pub use notion::NotionStore;
pub use props::{Properties, PropertyValue, Row};

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Rows of `table` whose title property `property` equals `title` exactly.
    async fn find_by_title(&self, table: &str, property: &str, title: &str)
        -> anyhow::Result<Vec<Row>>;

    /// Rows of `table` whose multi-select `property` contains `tag`.
    async fn find_by_tag(&self, table: &str, property: &str, tag: &str)
        -> anyhow::Result<Vec<Row>>;

    /// The `limit` most recently created rows of `table`, newest first.
    async fn recent(&self, table: &str, limit: usize) -> anyhow::Result<Vec<Row>>;

    async fn get(&self, row_id: &str) -> anyhow::Result<Option<Row>>;

    async fn create(&self, table: &str, properties: Properties) -> anyhow::Result<Row>;

    /// Overwrites the given properties of a row, leaving the others untouched.
    async fn update(&self, row_id: &str, properties: Properties) -> anyhow::Result<Row>;

    async fn archive(&self, row_id: &str) -> anyhow::Result<()>;

    /// Option vocabulary of a multi-select property.
    async fn tag_options(&self, table: &str, property: &str) -> anyhow::Result<Vec<String>>;
}
