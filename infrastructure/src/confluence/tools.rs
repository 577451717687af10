//! Confluence tools

use std::sync::Arc;

use async_trait::async_trait;
use atlassian_domain::tool::{ToolFailure, TypedTool};

use super::models::{
    AckOutput, AddCommentInput, AddCommentOutput, AddLabelInput, CreatePageInput,
    CreatePageOutput, GetCommentsOutput, GetLabelsOutput, GetPageAncestorsOutput,
    GetPageChildrenOutput, GetPageInput, GetPageOutput, PageIdInput, PageListInput, SearchInput,
    SearchOutput, UpdatePageInput, UpdatePageOutput,
};
use super::service::ConfluenceService;
use crate::container::LazyService;
use crate::http::AtlassianError;

/// Shared, lazily built Confluence service
pub type ConfluenceHandle = Arc<LazyService<ConfluenceService>>;

fn page_error(page_id: &str, error: AtlassianError) -> String {
    match error {
        AtlassianError::NotFound(_) => format!("Page {page_id} not found"),
        other => other.to_string(),
    }
}

macro_rules! confluence_tool {
    ($tool:ident) => {
        pub struct $tool {
            service: ConfluenceHandle,
        }

        impl $tool {
            pub fn new(service: ConfluenceHandle) -> Self {
                Self { service }
            }
        }
    };
}

confluence_tool!(GetPageTool);
confluence_tool!(SearchTool);
confluence_tool!(GetPageChildrenTool);
confluence_tool!(GetPageAncestorsTool);
confluence_tool!(GetLabelsTool);
confluence_tool!(GetCommentsTool);
confluence_tool!(CreatePageTool);
confluence_tool!(UpdatePageTool);
confluence_tool!(DeletePageTool);
confluence_tool!(AddLabelTool);
confluence_tool!(AddCommentTool);

#[async_trait]
impl TypedTool for GetPageTool {
    type Input = GetPageInput;
    type Output = GetPageOutput;

    fn name(&self) -> &'static str {
        "confluence_get_page"
    }

    fn description(&self) -> &'static str {
        "Get a Confluence page by ID."
    }

    async fn call(&self, input: GetPageInput) -> Result<GetPageOutput, ToolFailure> {
        let result = async {
            self.service
                .get()
                .await?
                .get_page(&input.page_id, input.expand.as_deref())
                .await
        }
        .await;

        Ok(match result {
            Ok(page) => GetPageOutput::ok(page),
            Err(e) => GetPageOutput::failed(page_error(&input.page_id, e)),
        })
    }
}

#[async_trait]
impl TypedTool for SearchTool {
    type Input = SearchInput;
    type Output = SearchOutput;

    fn name(&self) -> &'static str {
        "confluence_search"
    }

    fn description(&self) -> &'static str {
        "Search Confluence content using CQL."
    }

    async fn call(&self, input: SearchInput) -> Result<SearchOutput, ToolFailure> {
        let result = async {
            self.service
                .get()
                .await?
                .search(&input.cql, input.limit, input.start)
                .await
        }
        .await;

        Ok(match result {
            Ok(found) => SearchOutput::ok(found.results, found.total),
            Err(e) => SearchOutput::failed(e.to_string()),
        })
    }
}

#[async_trait]
impl TypedTool for GetPageChildrenTool {
    type Input = PageListInput;
    type Output = GetPageChildrenOutput;

    fn name(&self) -> &'static str {
        "confluence_get_page_children"
    }

    fn description(&self) -> &'static str {
        "Get child pages of a Confluence page."
    }

    async fn call(&self, input: PageListInput) -> Result<GetPageChildrenOutput, ToolFailure> {
        let result = async {
            self.service
                .get()
                .await?
                .get_page_children(&input.page_id, input.limit)
                .await
        }
        .await;

        Ok(match result {
            Ok(children) => GetPageChildrenOutput::ok(children),
            Err(e) => GetPageChildrenOutput::failed(page_error(&input.page_id, e)),
        })
    }
}

#[async_trait]
impl TypedTool for GetPageAncestorsTool {
    type Input = PageIdInput;
    type Output = GetPageAncestorsOutput;

    fn name(&self) -> &'static str {
        "confluence_get_page_ancestors"
    }

    fn description(&self) -> &'static str {
        "Get the ancestor pages of a Confluence page, from the space root down."
    }

    async fn call(&self, input: PageIdInput) -> Result<GetPageAncestorsOutput, ToolFailure> {
        let result = async { self.service.get().await?.get_page_ancestors(&input.page_id).await }.await;

        Ok(match result {
            Ok(ancestors) => GetPageAncestorsOutput::ok(ancestors),
            Err(e) => GetPageAncestorsOutput::failed(page_error(&input.page_id, e)),
        })
    }
}

#[async_trait]
impl TypedTool for GetLabelsTool {
    type Input = PageIdInput;
    type Output = GetLabelsOutput;

    fn name(&self) -> &'static str {
        "confluence_get_labels"
    }

    fn description(&self) -> &'static str {
        "Get the labels on a Confluence page."
    }

    async fn call(&self, input: PageIdInput) -> Result<GetLabelsOutput, ToolFailure> {
        let result = async { self.service.get().await?.get_labels(&input.page_id).await }.await;

        Ok(match result {
            Ok(labels) => GetLabelsOutput::ok(labels),
            Err(e) => GetLabelsOutput::failed(page_error(&input.page_id, e)),
        })
    }
}

#[async_trait]
impl TypedTool for GetCommentsTool {
    type Input = PageListInput;
    type Output = GetCommentsOutput;

    fn name(&self) -> &'static str {
        "confluence_get_comments"
    }

    fn description(&self) -> &'static str {
        "Get comments on a Confluence page."
    }

    async fn call(&self, input: PageListInput) -> Result<GetCommentsOutput, ToolFailure> {
        let result = async {
            self.service
                .get()
                .await?
                .get_comments(&input.page_id, input.limit)
                .await
        }
        .await;

        Ok(match result {
            Ok(comments) => GetCommentsOutput::ok(comments),
            Err(e) => GetCommentsOutput::failed(page_error(&input.page_id, e)),
        })
    }
}

#[async_trait]
impl TypedTool for CreatePageTool {
    type Input = CreatePageInput;
    type Output = CreatePageOutput;

    fn name(&self) -> &'static str {
        "confluence_create_page"
    }

    fn description(&self) -> &'static str {
        "Create a new Confluence page, optionally under a parent page."
    }

    async fn call(&self, input: CreatePageInput) -> Result<CreatePageOutput, ToolFailure> {
        let result = async {
            self.service
                .get()
                .await?
                .create_page(
                    &input.space_key,
                    &input.title,
                    &input.body,
                    input.parent_id.as_deref(),
                )
                .await
        }
        .await;

        Ok(match result {
            Ok(page) => CreatePageOutput::ok(page.id.unwrap_or_default(), page.url),
            Err(e) => CreatePageOutput::failed(e.to_string()),
        })
    }
}

#[async_trait]
impl TypedTool for UpdatePageTool {
    type Input = UpdatePageInput;
    type Output = UpdatePageOutput;

    fn name(&self) -> &'static str {
        "confluence_update_page"
    }

    fn description(&self) -> &'static str {
        "Update the title and/or body of a Confluence page. \
         Requires the page's current version number."
    }

    async fn call(&self, input: UpdatePageInput) -> Result<UpdatePageOutput, ToolFailure> {
        let result = async {
            self.service
                .get()
                .await?
                .update_page(
                    &input.page_id,
                    input.version_number,
                    input.title.as_deref(),
                    input.body.as_deref(),
                )
                .await
        }
        .await;

        Ok(match result {
            Ok(version) => UpdatePageOutput::ok(version),
            Err(e) => UpdatePageOutput::failed(page_error(&input.page_id, e)),
        })
    }
}

#[async_trait]
impl TypedTool for DeletePageTool {
    type Input = PageIdInput;
    type Output = AckOutput;

    fn name(&self) -> &'static str {
        "confluence_delete_page"
    }

    fn description(&self) -> &'static str {
        "Delete a Confluence page."
    }

    async fn call(&self, input: PageIdInput) -> Result<AckOutput, ToolFailure> {
        let result = async { self.service.get().await?.delete_page(&input.page_id).await }.await;

        Ok(match result {
            Ok(()) => AckOutput::ok(),
            Err(e) => AckOutput::failed(page_error(&input.page_id, e)),
        })
    }
}

#[async_trait]
impl TypedTool for AddLabelTool {
    type Input = AddLabelInput;
    type Output = AckOutput;

    fn name(&self) -> &'static str {
        "confluence_add_label"
    }

    fn description(&self) -> &'static str {
        "Add a label to a Confluence page."
    }

    async fn call(&self, input: AddLabelInput) -> Result<AckOutput, ToolFailure> {
        let result = async {
            self.service
                .get()
                .await?
                .add_label(&input.page_id, &input.label)
                .await
        }
        .await;

        Ok(match result {
            Ok(()) => AckOutput::ok(),
            Err(e) => AckOutput::failed(page_error(&input.page_id, e)),
        })
    }
}

#[async_trait]
impl TypedTool for AddCommentTool {
    type Input = AddCommentInput;
    type Output = AddCommentOutput;

    fn name(&self) -> &'static str {
        "confluence_add_comment"
    }

    fn description(&self) -> &'static str {
        "Add a comment to a Confluence page."
    }

    async fn call(&self, input: AddCommentInput) -> Result<AddCommentOutput, ToolFailure> {
        let result = async {
            self.service
                .get()
                .await?
                .add_comment(&input.page_id, &input.body)
                .await
        }
        .await;

        Ok(match result {
            Ok(comment) => AddCommentOutput::ok(comment.id.unwrap_or_default()),
            Err(e) => AddCommentOutput::failed(e.to_string()),
        })
    }
}
