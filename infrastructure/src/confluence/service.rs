//! Confluence service
//!
//! Operations against the Confluence Cloud REST API (`/rest/api/content`).
//! Bodies are exchanged in storage format and passed through untouched.

use std::sync::Arc;

use serde_json::{Value, json};

use super::models::{Ancestor, CreatedContent, CreatedPage, PageComment, PageSummary, SearchResults};
use crate::http::{ApiRequest, HttpTransport, Result};
use crate::shape::{items, str_at};

const CONTENT: &str = "/rest/api/content";

fn storage(value: &str) -> Value {
    json!({"storage": {"value": value, "representation": "storage"}})
}

/// Confluence REST operations over an [`HttpTransport`]
#[derive(Clone)]
pub struct ConfluenceService {
    transport: Arc<dyn HttpTransport>,
}

impl ConfluenceService {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    // =========================================================================
    // Read operations
    // =========================================================================

    pub async fn get_page(&self, page_id: &str, expand: Option<&str>) -> Result<PageSummary> {
        let request = ApiRequest::get(format!("{CONTENT}/{page_id}"))
            .with_optional_query("expand", expand.filter(|e| !e.is_empty()));
        let data = self.transport.send(request).await?;
        Ok(page_summary(&data))
    }

    /// CQL search; results nest their content under `content`
    pub async fn search(&self, cql: &str, limit: u32, start: u32) -> Result<SearchResults> {
        let request = ApiRequest::get("/rest/api/search")
            .with_query("cql", cql)
            .with_query("limit", limit)
            .with_query("start", start);
        let data = self.transport.send(request).await?;

        let results: Vec<PageSummary> = items(&data, "results")
            .iter()
            .map(|item| page_summary(item.get("content").unwrap_or(item)))
            .collect();
        let total = data
            .get("totalSize")
            .and_then(Value::as_u64)
            .unwrap_or(results.len() as u64);

        Ok(SearchResults {
            results,
            total,
            start,
            limit,
        })
    }

    pub async fn get_page_children(&self, page_id: &str, limit: u32) -> Result<Vec<PageSummary>> {
        let request =
            ApiRequest::get(format!("{CONTENT}/{page_id}/child/page")).with_query("limit", limit);
        let data = self.transport.send(request).await?;
        Ok(items(&data, "results").iter().map(page_summary).collect())
    }

    /// Ancestors from the space root down to the direct parent
    pub async fn get_page_ancestors(&self, page_id: &str) -> Result<Vec<Ancestor>> {
        let request = ApiRequest::get(format!("{CONTENT}/{page_id}")).with_query("expand", "ancestors");
        let data = self.transport.send(request).await?;

        Ok(items(&data, "ancestors")
            .iter()
            .map(|a| Ancestor {
                id: str_at(a, "/id"),
                title: str_at(a, "/title"),
                content_type: str_at(a, "/type"),
            })
            .collect())
    }

    pub async fn get_labels(&self, page_id: &str) -> Result<Vec<String>> {
        let data = self
            .transport
            .send(ApiRequest::get(format!("{CONTENT}/{page_id}/label")))
            .await?;
        Ok(items(&data, "results")
            .iter()
            .filter_map(|label| str_at(label, "/name"))
            .collect())
    }

    pub async fn get_comments(&self, page_id: &str, limit: u32) -> Result<Vec<PageComment>> {
        let request = ApiRequest::get(format!("{CONTENT}/{page_id}/child/comment"))
            .with_query("limit", limit)
            .with_query("expand", "body.storage");
        let data = self.transport.send(request).await?;

        Ok(items(&data, "results")
            .iter()
            .map(|c| PageComment {
                id: str_at(c, "/id"),
                title: str_at(c, "/title"),
                body: str_at(c, "/body/storage/value").unwrap_or_default(),
            })
            .collect())
    }

    // =========================================================================
    // Write operations
    // =========================================================================

    pub async fn create_page(
        &self,
        space_key: &str,
        title: &str,
        body: &str,
        parent_id: Option<&str>,
    ) -> Result<CreatedPage> {
        let mut payload = json!({
            "type": "page",
            "title": title,
            "space": {"key": space_key},
            "body": storage(body),
        });
        if let Some(parent_id) = parent_id.filter(|p| !p.is_empty()) {
            payload["ancestors"] = json!([{"id": parent_id}]);
        }

        let data = self.transport.send(ApiRequest::post(CONTENT, payload)).await?;
        Ok(CreatedPage {
            id: str_at(&data, "/id"),
            title: str_at(&data, "/title"),
            url: str_at(&data, "/_links/webui").unwrap_or_default(),
        })
    }

    /// Publish version `version_number + 1`; returns the new version.
    ///
    /// A missing or empty title or body is filled from the current page.
    pub async fn update_page(
        &self,
        page_id: &str,
        version_number: u64,
        title: Option<&str>,
        body: Option<&str>,
    ) -> Result<u64> {
        let title = title.filter(|t| !t.is_empty()).map(str::to_string);
        let body = body.filter(|b| !b.is_empty()).map(str::to_string);

        let (title, body) = match (title, body) {
            (Some(title), Some(body)) => (title, body),
            (title, body) => {
                let current = self.get_page(page_id, Some("body.storage")).await?;
                (
                    title.or(current.title).unwrap_or_default(),
                    body.or(current.body).unwrap_or_default(),
                )
            }
        };

        let next = version_number.saturating_add(1);
        let payload = json!({
            "version": {"number": next},
            "title": title,
            "type": "page",
            "body": storage(&body),
        });
        let data = self
            .transport
            .send(ApiRequest::put(format!("{CONTENT}/{page_id}"), payload))
            .await?;

        Ok(data.pointer("/version/number").and_then(Value::as_u64).unwrap_or(next))
    }

    pub async fn delete_page(&self, page_id: &str) -> Result<()> {
        self.transport
            .send(ApiRequest::delete(format!("{CONTENT}/{page_id}")))
            .await?;
        Ok(())
    }

    pub async fn add_label(&self, page_id: &str, label: &str) -> Result<()> {
        self.transport
            .send(ApiRequest::post(
                format!("{CONTENT}/{page_id}/label"),
                json!([{"name": label}]),
            ))
            .await?;
        Ok(())
    }

    pub async fn add_comment(&self, page_id: &str, body: &str) -> Result<CreatedContent> {
        let payload = json!({
            "type": "comment",
            "container": {"id": page_id, "type": "page"},
            "body": storage(body),
        });
        let data = self.transport.send(ApiRequest::post(CONTENT, payload)).await?;

        Ok(CreatedContent {
            id: str_at(&data, "/id"),
            title: str_at(&data, "/title"),
        })
    }
}

fn page_summary(page: &Value) -> PageSummary {
    let present = |key: &str| page.get(key).filter(|v| !v.is_null());

    PageSummary {
        id: str_at(page, "/id"),
        title: str_at(page, "/title"),
        content_type: str_at(page, "/type"),
        space_key: present("space").and_then(|s| str_at(s, "/key")),
        version: present("version").and_then(|v| v.get("number")).and_then(Value::as_u64),
        body: present("body").map(|b| str_at(b, "/storage/value").unwrap_or_default()),
        url: present("_links").map(|l| str_at(l, "/webui").unwrap_or_default()),
    }
}
