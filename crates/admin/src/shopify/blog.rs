//! Blog operations: affiliate link audits and repairs, duplicate
//! article detection.
//!
//! Link handling works on the article's `body_html` with the pure text
//! operations from `shelzys_core::links`; this module only adds the
//! fetch/update plumbing around them.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use shelzys_core::{links, similarity};
use tracing::{info, instrument, warn};

use super::types::{Article, ArticlesResponse, Blog, BlogsResponse};
use super::{AdminClient, AdminError};

/// One article flagged by the link audit.
#[derive(Debug, Clone)]
pub struct LinkAudit {
    /// Title of the blog the article belongs to.
    pub blog: String,
    /// Article ID.
    pub article_id: i64,
    /// Article title.
    pub title: String,
    /// Body contains bare Amazon URLs outside of anchor tags.
    pub plain_links: bool,
    /// Body contains malformed affiliate links (stray `)?tag=`, double tags).
    pub malformed_links: bool,
}

/// One article rewritten by the link fixer.
#[derive(Debug, Clone)]
pub struct LinkFix {
    /// Article ID.
    pub article_id: i64,
    /// Article title.
    pub title: String,
    /// How many bare URLs were wrapped in anchor tags.
    pub links_wrapped: usize,
    /// Whether malformed affiliate links were repaired.
    pub malformed_fixed: bool,
}

/// Outcome of a full link-repair sweep.
#[derive(Debug, Clone, Default)]
pub struct LinkFixReport {
    /// How many article bodies were scanned.
    pub scanned: usize,
    /// Articles rewritten and saved.
    pub fixes: Vec<LinkFix>,
    /// Articles whose update failed: (article ID, error message).
    pub failed: Vec<(i64, String)>,
}

/// Compact article info used in duplicate reports.
#[derive(Debug, Clone)]
pub struct ArticleSummary {
    /// Article ID.
    pub id: i64,
    /// Owning blog ID.
    pub blog_id: i64,
    /// Article title.
    pub title: String,
    /// Creation timestamp (ISO 8601).
    pub created_at: String,
    /// Body length in bytes.
    pub body_len: usize,
}

/// A group of articles with near-identical titles.
///
/// `keep` is the best candidate (longest body, newest on ties); the rest
/// are listed in `remove`. This is a report only - nothing is deleted.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    /// The article worth keeping.
    pub keep: ArticleSummary,
    /// The redundant copies.
    pub remove: Vec<ArticleSummary>,
}

#[derive(Debug, Serialize)]
struct ArticleWrite<'a> {
    id: i64,
    body_html: &'a str,
}

#[derive(Debug, Serialize)]
struct ArticleWriteRequest<'a> {
    article: ArticleWrite<'a>,
}

fn created_ts(created_at: &str) -> DateTime<FixedOffset> {
    DateTime::parse_from_rfc3339(created_at)
        .unwrap_or_else(|_| DateTime::<Utc>::UNIX_EPOCH.fixed_offset())
}

impl AdminClient {
    /// List all blogs on the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_blogs(&self) -> Result<Vec<Blog>, AdminError> {
        let response: BlogsResponse = self.get("/blogs.json").await?;
        Ok(response.blogs)
    }

    /// List articles in a blog (up to 250).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_articles(&self, blog_id: i64) -> Result<Vec<Article>, AdminError> {
        let path = format!("/blogs/{blog_id}/articles.json?limit=250");
        let response: ArticlesResponse = self.get(&path).await?;
        Ok(response.articles)
    }

    /// Replace an article's HTML body.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or Shopify rejects the body.
    #[instrument(skip(self, body_html))]
    pub async fn update_article_body(
        &self,
        blog_id: i64,
        article_id: i64,
        body_html: &str,
    ) -> Result<(), AdminError> {
        let body = ArticleWriteRequest {
            article: ArticleWrite {
                id: article_id,
                body_html,
            },
        };
        let path = format!("/blogs/{blog_id}/articles/{article_id}.json");
        let _: serde_json::Value = self.put(&path, &body).await?;
        info!("Updated article {article_id}");
        Ok(())
    }

    /// Scan every article for bare or malformed Amazon affiliate links.
    /// Read-only.
    ///
    /// # Errors
    ///
    /// Returns an error if an API request fails.
    #[instrument(skip(self))]
    pub async fn audit_links(&self) -> Result<Vec<LinkAudit>, AdminError> {
        let mut report = Vec::new();
        for blog in self.list_blogs().await? {
            for article in self.list_articles(blog.id).await? {
                let Some(body) = &article.body_html else {
                    continue;
                };
                let plain = links::has_plain_links(body);
                let malformed = links::has_malformed_links(body);
                if plain || malformed {
                    report.push(LinkAudit {
                        blog: blog.title.clone(),
                        article_id: article.id,
                        title: article.title,
                        plain_links: plain,
                        malformed_links: malformed,
                    });
                }
            }
        }
        Ok(report)
    }

    /// Repair affiliate links in every article: fix malformed links first,
    /// then wrap bare Amazon URLs in proper anchor tags carrying `tag`.
    /// Only articles whose body actually changed are written back. A
    /// failed write is logged and the sweep continues.
    ///
    /// # Errors
    ///
    /// Returns an error if listing blogs or articles fails.
    #[instrument(skip(self))]
    pub async fn fix_links(&self, tag: &str) -> Result<LinkFixReport, AdminError> {
        let mut report = LinkFixReport::default();
        for blog in self.list_blogs().await? {
            for article in self.list_articles(blog.id).await? {
                let Some(body) = &article.body_html else {
                    continue;
                };
                report.scanned += 1;

                let malformed = links::has_malformed_links(body);
                let mut html = if malformed {
                    links::fix_malformed(body, tag)
                } else {
                    body.clone()
                };
                let (wrapped, count) = links::rewrite_plain_links(&html, tag);
                html = wrapped;

                if html != *body {
                    match self.update_article_body(blog.id, article.id, &html).await {
                        Ok(()) => report.fixes.push(LinkFix {
                            article_id: article.id,
                            title: article.title,
                            links_wrapped: count,
                            malformed_fixed: malformed,
                        }),
                        Err(e) => {
                            warn!("Failed to update article {}: {e}", article.id);
                            report.failed.push((article.id, e.to_string()));
                        }
                    }
                    self.pace().await;
                }
            }
        }
        Ok(report)
    }

    /// Find groups of articles with near-identical titles across all blogs.
    /// Read-only: the report says what to keep, deletion stays manual.
    ///
    /// # Errors
    ///
    /// Returns an error if an API request fails.
    #[instrument(skip(self))]
    pub async fn audit_duplicates(&self) -> Result<Vec<DuplicateGroup>, AdminError> {
        let mut articles = Vec::new();
        for blog in self.list_blogs().await? {
            articles.extend(self.list_articles(blog.id).await?);
        }

        let titles: Vec<&str> = articles.iter().map(|a| a.title.as_str()).collect();
        let groups = similarity::duplicate_groups(&titles);

        Ok(groups
            .into_iter()
            .map(|indices| {
                let mut members: Vec<ArticleSummary> = indices
                    .into_iter()
                    .filter_map(|i| articles.get(i))
                    .map(|a| ArticleSummary {
                        id: a.id,
                        blog_id: a.blog_id,
                        title: a.title.clone(),
                        created_at: a.created_at.clone(),
                        body_len: a.body_len(),
                    })
                    .collect();
                // Longest body wins; newest breaks ties.
                members.sort_by(|a, b| {
                    b.body_len.cmp(&a.body_len).then_with(|| {
                        created_ts(&b.created_at).cmp(&created_ts(&a.created_at))
                    })
                });
                let mut members = members.into_iter();
                let keep = members.next();
                let remove: Vec<ArticleSummary> = members.collect();
                (keep, remove)
            })
            .filter_map(|(keep, remove)| keep.map(|keep| DuplicateGroup { keep, remove }))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_ts_parses_offsets() {
        let newer = created_ts("2024-05-02T10:00:00-04:00");
        let older = created_ts("2024-05-01T10:00:00-04:00");
        assert!(newer > older);
    }

    #[test]
    fn test_created_ts_invalid_falls_back_to_epoch() {
        let ts = created_ts("not-a-date");
        assert_eq!(ts, DateTime::<Utc>::UNIX_EPOCH.fixed_offset());
    }
}
