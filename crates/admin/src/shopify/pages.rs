//! Online Store page operations.

use serde::Serialize;
use tracing::{info, instrument};

use super::types::{Page, PageResponse, PagesResponse};
use super::{AdminClient, AdminError};

/// Content for a page create-or-update.
#[derive(Debug, Clone)]
pub struct NewPage {
    /// Page title.
    pub title: String,
    /// URL handle the page is keyed on.
    pub handle: String,
    /// HTML body.
    pub body_html: String,
    /// Whether to publish immediately.
    pub published: bool,
}

/// Result of an upsert: whether the page was created or updated in place.
#[derive(Debug, Clone)]
pub enum PageUpsert {
    /// No page had the handle; a new one was created.
    Created(Page),
    /// A page with the handle existed and was updated.
    Updated(Page),
}

impl PageUpsert {
    /// The page, regardless of which branch was taken.
    #[must_use]
    pub const fn page(&self) -> &Page {
        match self {
            Self::Created(page) | Self::Updated(page) => page,
        }
    }
}

#[derive(Debug, Serialize)]
struct PageWrite<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    title: &'a str,
    handle: &'a str,
    body_html: &'a str,
    published: bool,
}

#[derive(Debug, Serialize)]
struct PageWriteRequest<'a> {
    page: PageWrite<'a>,
}

impl AdminClient {
    /// List pages (up to 250).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_pages(&self) -> Result<Vec<Page>, AdminError> {
        let response: PagesResponse = self.get("/pages.json?limit=250").await?;
        Ok(response.pages)
    }

    /// Find a page by its URL handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn find_page_by_handle(&self, handle: &str) -> Result<Option<Page>, AdminError> {
        let path = format!("/pages.json?handle={}", urlencoding::encode(handle));
        let response: PagesResponse = self.get(&path).await?;
        Ok(response.pages.into_iter().next())
    }

    /// Create the page, or update it in place if one already exists with
    /// the same handle. Idempotent on the handle.
    ///
    /// # Errors
    ///
    /// Returns an error if an API request fails or Shopify rejects the body.
    #[instrument(skip(self, page), fields(handle = %page.handle))]
    pub async fn upsert_page(&self, page: &NewPage) -> Result<PageUpsert, AdminError> {
        let existing = self.find_page_by_handle(&page.handle).await?;

        match existing {
            Some(current) => {
                let body = PageWriteRequest {
                    page: PageWrite {
                        id: Some(current.id),
                        title: &page.title,
                        handle: &page.handle,
                        body_html: &page.body_html,
                        published: page.published,
                    },
                };
                let path = format!("/pages/{}.json", current.id);
                let response: PageResponse = self.put(&path, &body).await?;
                info!("Updated page '{}' (id {})", page.handle, current.id);
                Ok(PageUpsert::Updated(response.page))
            }
            None => {
                let body = PageWriteRequest {
                    page: PageWrite {
                        id: None,
                        title: &page.title,
                        handle: &page.handle,
                        body_html: &page.body_html,
                        published: page.published,
                    },
                };
                let response: PageResponse = self.post("/pages.json", &body).await?;
                info!("Created page '{}' (id {})", page.handle, response.page.id);
                Ok(PageUpsert::Created(response.page))
            }
        }
    }
}
