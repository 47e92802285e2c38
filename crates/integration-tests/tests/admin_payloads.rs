//! Integration tests for Admin REST payload parsing.
//!
//! Fixtures below mirror the 2024-01 Admin API response shapes, extra
//! fields and all, so a schema drift in our types shows up here before
//! it shows up against the live store.

#![allow(clippy::unwrap_used)]

use shelzys_admin::shopify::{
    Article, ArticlesResponse, AssetResponse, BlogsResponse, PagesResponse, ProductsResponse,
    ThemesResponse,
};

#[test]
fn test_parse_themes_payload() {
    // Real responses carry plenty of fields we don't model
    let payload = r#"{
      "themes": [
        {
          "id": 828155753,
          "name": "Dawn",
          "created_at": "2024-01-02T09:00:00-05:00",
          "updated_at": "2024-03-18T11:21:37-05:00",
          "role": "main",
          "theme_store_id": 887,
          "previewable": true,
          "processing": false,
          "admin_graphql_api_id": "gid://shopify/OnlineStoreTheme/828155753"
        },
        {
          "id": 976877075,
          "name": "Dawn - backup",
          "created_at": "2023-11-10T08:00:00-05:00",
          "updated_at": "2023-11-10T08:00:00-05:00",
          "role": "unpublished",
          "theme_store_id": null,
          "previewable": true,
          "processing": false
        }
      ]
    }"#;

    let response: ThemesResponse = serde_json::from_str(payload).unwrap();
    assert_eq!(response.themes.len(), 2);

    let published: Vec<_> = response.themes.iter().filter(|t| t.is_published()).collect();
    assert_eq!(published.len(), 1);
    assert_eq!(published[0].id, 828_155_753);
    assert_eq!(published[0].name, "Dawn");
}

#[test]
fn test_parse_asset_payload() {
    let payload = r#"{
      "asset": {
        "key": "layout/theme.liquid",
        "public_url": null,
        "value": "<!doctype html>\n<html>\n  <head>\n    {{ content_for_header }}\n  </head>\n</html>",
        "created_at": "2024-01-02T09:00:00-05:00",
        "updated_at": "2024-03-18T11:21:37-05:00",
        "content_type": "text/x-liquid",
        "size": 3049,
        "checksum": "5a0da38cb79ab74b78e92b4a7add0b3a",
        "theme_id": 828155753
      }
    }"#;

    let response: AssetResponse = serde_json::from_str(payload).unwrap();
    assert_eq!(response.asset.key, "layout/theme.liquid");
    assert!(response.asset.value.unwrap().contains("content_for_header"));
    assert_eq!(response.asset.content_type.as_deref(), Some("text/x-liquid"));
}

#[test]
fn test_parse_binary_asset_without_value() {
    // Images come back with an attachment field instead of value
    let payload = r#"{
      "asset": {
        "key": "assets/logo.png",
        "attachment": "iVBORw0KGgoAAAANSUhEUg==",
        "content_type": "image/png",
        "size": 4321,
        "theme_id": 828155753
      }
    }"#;

    let response: AssetResponse = serde_json::from_str(payload).unwrap();
    assert!(response.asset.value.is_none());
}

#[test]
fn test_parse_pages_payload() {
    let payload = r#"{
      "pages": [
        {
          "id": 131092082,
          "title": "Size Charts",
          "shop_id": 548380009,
          "handle": "size-charts",
          "body_html": "<h1>Size Charts</h1><p>Find your fit.</p>",
          "author": "Shelzy",
          "created_at": "2024-02-01T10:00:00-05:00",
          "updated_at": "2024-02-15T10:00:00-05:00",
          "published_at": "2024-02-01T10:05:00-05:00",
          "template_suffix": null,
          "admin_graphql_api_id": "gid://shopify/OnlineStorePage/131092082"
        },
        {
          "id": 169524623,
          "title": "Wholesale (draft)",
          "shop_id": 548380009,
          "handle": "wholesale",
          "body_html": "<p>Coming soon.</p>",
          "created_at": "2024-03-01T10:00:00-05:00",
          "updated_at": "2024-03-01T10:00:00-05:00",
          "published_at": null
        }
      ]
    }"#;

    let response: PagesResponse = serde_json::from_str(payload).unwrap();
    assert_eq!(response.pages.len(), 2);
    assert!(response.pages[0].is_published());
    assert!(!response.pages[1].is_published());
    assert_eq!(response.pages[1].handle, "wholesale");
}

#[test]
fn test_parse_products_payload() {
    let payload = r#"{
      "products": [
        {
          "id": 632910392,
          "title": "Spring Tumbler 20oz",
          "body_html": "<p>Double-walled skinny tumbler.</p>",
          "vendor": "Shelzy's Designs",
          "product_type": "Drinkware",
          "created_at": "2024-01-10T08:00:00-05:00",
          "handle": "spring-tumbler-20oz",
          "updated_at": "2024-04-01T08:00:00-05:00",
          "published_at": "2024-01-10T08:30:00-05:00",
          "status": "active",
          "tags": "spring, tumbler, bestseller",
          "admin_graphql_api_id": "gid://shopify/Product/632910392",
          "variants": [
            {
              "id": 808950810,
              "product_id": 632910392,
              "title": "Default Title",
              "price": "24.99",
              "sku": "SZ-TMB-20",
              "position": 1,
              "inventory_quantity": 13
            }
          ],
          "options": [],
          "images": []
        }
      ]
    }"#;

    let response: ProductsResponse = serde_json::from_str(payload).unwrap();
    let product = &response.products[0];
    assert_eq!(product.handle, "spring-tumbler-20oz");
    assert_eq!(product.status, "active");
    assert_eq!(
        product.tag_list(),
        vec!["spring", "tumbler", "bestseller"]
    );
    assert_eq!(product.variants[0].price, "24.99");
    assert_eq!(product.variants[0].sku.as_deref(), Some("SZ-TMB-20"));
}

#[test]
fn test_parse_products_payload_minimal_fields() {
    // Draft products can come back without tags, status, or variants
    let payload = r#"{
      "products": [
        {"id": 1, "title": "Bare Draft", "handle": "bare-draft", "body_html": null}
      ]
    }"#;

    let response: ProductsResponse = serde_json::from_str(payload).unwrap();
    let product = &response.products[0];
    assert!(product.tags.is_empty());
    assert!(product.tag_list().is_empty());
    assert!(product.variants.is_empty());
}

#[test]
fn test_parse_blog_and_articles_payloads() {
    let blogs = r#"{
      "blogs": [
        {
          "id": 241253187,
          "handle": "news",
          "title": "Shelzy's Blog",
          "updated_at": "2024-05-01T09:00:00-04:00",
          "commentable": "no",
          "feedburner": null,
          "tags": "",
          "admin_graphql_api_id": "gid://shopify/OnlineStoreBlog/241253187"
        }
      ]
    }"#;
    let response: BlogsResponse = serde_json::from_str(blogs).unwrap();
    assert_eq!(response.blogs[0].handle, "news");

    let articles = r#"{
      "articles": [
        {
          "id": 1051293780,
          "title": "10 Tumbler Ideas for Spring",
          "created_at": "2024-03-20T10:00:00-04:00",
          "body_html": "<p>Spring is here! https://www.amazon.com/dp/B0VINYL123</p>",
          "blog_id": 241253187,
          "author": "Shelzy",
          "user_id": null,
          "published_at": "2024-03-20T11:00:00-04:00",
          "updated_at": "2024-03-21T10:00:00-04:00",
          "summary_html": null,
          "template_suffix": null,
          "handle": "10-tumbler-ideas-for-spring",
          "tags": "spring, ideas"
        },
        {
          "id": 1051293781,
          "title": "Draft post",
          "created_at": "2024-04-01T10:00:00-04:00",
          "body_html": null,
          "blog_id": 241253187,
          "published_at": null,
          "handle": "draft-post"
        }
      ]
    }"#;
    let response: ArticlesResponse = serde_json::from_str(articles).unwrap();
    assert_eq!(response.articles.len(), 2);

    let first: &Article = &response.articles[0];
    assert_eq!(first.blog_id, 241_253_187);
    assert!(first.body_len() > 0);
    // Bodyless drafts still parse; they just audit as empty
    assert_eq!(response.articles[1].body_len(), 0);
}
