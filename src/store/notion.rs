use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::props::{
    properties_from_store, properties_to_store, relation_item_ids, truncated_relations, Properties,
    PropertyValue, Row,
};
use super::RecordStore;

const API_VERSION: &str = "2022-06-28";
const MAX_PAGE_SIZE: usize = 100;

/// HTTP client for the hosted table store.
#[derive(Clone)]
pub struct NotionStore {
    client: Client,
    base_url: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct Page {
    id: String,
    #[serde(default)]
    archived: bool,
    #[serde(default)]
    properties: Value,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    results: Vec<Page>,
    #[serde(default)]
    has_more: bool,
    next_cursor: Option<String>,
}

impl From<Page> for Row {
    fn from(page: Page) -> Self {
        Row::new(page.id, properties_from_store(&page.properties))
    }
}

impl NotionStore {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("build store http client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
            .header("Notion-Version", API_VERSION)
    }

    async fn send<T: serde::de::DeserializeOwned>(
        &self,
        req: RequestBuilder,
        what: &str,
    ) -> anyhow::Result<T> {
        let resp = req.send().await.with_context(|| format!("store {what}"))?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("store {what} failed with {status}: {body}");
        }
        resp.json::<T>()
            .await
            .with_context(|| format!("decode store {what} response"))
    }

    /// Runs a database query, following cursors until `limit` rows are
    /// collected or the store has no more.
    async fn query(&self, table: &str, body: Value, limit: usize) -> anyhow::Result<Vec<Row>> {
        let mut rows = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let page_size = (limit - rows.len()).min(MAX_PAGE_SIZE);
            let req = self
                .request(Method::POST, &format!("/databases/{table}/query"))
                .json(&query_body(&body, page_size, cursor.as_deref()));
            let resp: QueryResponse = self.send(req, "query").await?;
            for page in resp.results.into_iter().filter(|p| !p.archived) {
                rows.push(self.complete_row(page).await?);
            }

            match resp.next_cursor {
                Some(next) if resp.has_more && rows.len() < limit => cursor = Some(next),
                _ => break,
            }
        }
        debug!(table, rows = rows.len(), "store query");
        Ok(rows)
    }

    /// Converts a page into a row, fetching the rest of any relation the
    /// store returned only in part.
    async fn complete_row(&self, page: Page) -> anyhow::Result<Row> {
        let truncated = truncated_relations(&page.properties);
        let mut row = Row::from(page);
        for rel in truncated {
            let ids = self
                .relation_ids(&row.id, &rel.property_id)
                .await
                .with_context(|| format!("page {} relation {}", row.id, rel.name))?;
            debug!(page = %row.id, relation = %rel.name, ids = ids.len(), "relation paged");
            row.properties.insert(rel.name, PropertyValue::Relation(ids));
        }
        Ok(row)
    }

    /// Every id of a relation property, following the property-item cursor.
    async fn relation_ids(&self, page_id: &str, property_id: &str) -> anyhow::Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut cursor: Option<String> = None;
        loop {
            let mut path =
                format!("/pages/{page_id}/properties/{property_id}?page_size={MAX_PAGE_SIZE}");
            if let Some(c) = &cursor {
                path.push_str(&format!("&start_cursor={c}"));
            }
            let list: Value = self
                .send(self.request(Method::GET, &path), "get relation")
                .await?;
            ids.extend(relation_item_ids(&list));

            let has_more = list["has_more"].as_bool().unwrap_or(false);
            match list["next_cursor"].as_str() {
                Some(next) if has_more => cursor = Some(next.to_string()),
                _ => break,
            }
        }
        Ok(ids)
    }
}

fn query_body(base: &Value, page_size: usize, cursor: Option<&str>) -> Value {
    let mut body = base.clone();
    body["page_size"] = json!(page_size);
    if let Some(cursor) = cursor {
        body["start_cursor"] = json!(cursor);
    }
    body
}

fn multi_select_options(database: &Value, property: &str) -> Vec<String> {
    database["properties"][property]["multi_select"]["options"]
        .as_array()
        .map(|opts| {
            opts.iter()
                .filter_map(|o| o.get("name").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl RecordStore for NotionStore {
    async fn find_by_title(
        &self,
        table: &str,
        property: &str,
        title: &str,
    ) -> anyhow::Result<Vec<Row>> {
        let body = json!({ "filter": { "property": property, "title": { "equals": title } } });
        self.query(table, body, MAX_PAGE_SIZE).await
    }

    async fn find_by_tag(
        &self,
        table: &str,
        property: &str,
        tag: &str,
    ) -> anyhow::Result<Vec<Row>> {
        let body = json!({ "filter": { "property": property, "multi_select": { "contains": tag } } });
        self.query(table, body, usize::MAX).await
    }

    async fn recent(&self, table: &str, limit: usize) -> anyhow::Result<Vec<Row>> {
        let body = json!({
            "sorts": [{ "timestamp": "created_time", "direction": "descending" }]
        });
        self.query(table, body, limit).await
    }

    async fn get(&self, row_id: &str) -> anyhow::Result<Option<Row>> {
        let resp = self
            .request(Method::GET, &format!("/pages/{row_id}"))
            .send()
            .await
            .context("store get page")?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("store get page failed with {status}: {body}");
        }
        let page: Page = resp.json().await.context("decode store page")?;
        if page.archived {
            return Ok(None);
        }
        self.complete_row(page).await.map(Some)
    }

    async fn create(&self, table: &str, properties: Properties) -> anyhow::Result<Row> {
        let req = self.request(Method::POST, "/pages").json(&json!({
            "parent": { "database_id": table },
            "properties": properties_to_store(&properties),
        }));
        let page: Page = self.send(req, "create page").await?;
        self.complete_row(page).await
    }

    async fn update(&self, row_id: &str, properties: Properties) -> anyhow::Result<Row> {
        let req = self
            .request(Method::PATCH, &format!("/pages/{row_id}"))
            .json(&json!({ "properties": properties_to_store(&properties) }));
        let page: Page = self.send(req, "update page").await?;
        self.complete_row(page).await
    }

    async fn archive(&self, row_id: &str) -> anyhow::Result<()> {
        let req = self
            .request(Method::PATCH, &format!("/pages/{row_id}"))
            .json(&json!({ "archived": true }));
        let _: Page = self.send(req, "archive page").await?;
        Ok(())
    }

    async fn tag_options(&self, table: &str, property: &str) -> anyhow::Result<Vec<String>> {
        let req = self.request(Method::GET, &format!("/databases/{table}"));
        let database: Value = self.send(req, "get database").await?;
        Ok(multi_select_options(&database, property))
    }
}
