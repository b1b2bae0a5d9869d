use crate::format::{IconResultsContext, Render};
use crate::icons::{DEFAULT_ICON_LIMIT, IconCatalog, MAX_ICON_LIMIT};
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct FindIconsRequest {
    /// Space-separated search terms (e.g. "user profile", "arrow left", "check mark")
    #[serde(default)]
    pub query: String,
    /// Maximum number of results, 1 to 50 (default: 10)
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Search the icon catalog. Problems with the input or the fetch come back as text.
pub async fn handle_find_icons(
    icons: &IconCatalog,
    request: FindIconsRequest,
) -> Result<String, String> {
    let query = request.query.trim();
    if query.is_empty() {
        return Ok("Error: Query parameter is required and cannot be empty.".to_string());
    }

    let limit = match request.limit {
        None => DEFAULT_ICON_LIMIT,
        Some(limit) => match usize::try_from(limit) {
            Ok(limit) if (1..=MAX_ICON_LIMIT).contains(&limit) => limit,
            _ => return Ok("Error: Limit must be between 1 and 50.".to_string()),
        },
    };

    let results = match icons.search(query, limit).await {
        Ok(results) => results,
        Err(e) => return Ok(format!("Error searching icons: {e}")),
    };

    if results.is_empty() {
        return Ok(format!(
            "No icons found matching \"{query}\". Try different search terms."
        ));
    }

    Ok(IconResultsContext {
        query,
        icons: &results,
    }
    .render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IconError;
    use crate::icons::{IconFetcher, IconMetadata};
    use assert2::check;
    use futures::future::BoxFuture;
    use rstest::rstest;
    use std::sync::Arc;

    fn catalog() -> IconCatalog {
        let icon = |name: &str, keywords: &[&str]| IconMetadata {
            name: name.into(),
            data: String::new(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        };
        IconCatalog::from_icons(vec![
            icon("camera", &["photo", "picture"]),
            icon("account_circle", &["user", "profile"]),
        ])
    }

    fn request(query: &str, limit: Option<i64>) -> FindIconsRequest {
        FindIconsRequest {
            query: query.into(),
            limit,
        }
    }

    #[rstest]
    #[case("  ", None, "Error: Query parameter is required and cannot be empty.")]
    #[case("camera", Some(0), "Error: Limit must be between 1 and 50.")]
    #[case("camera", Some(51), "Error: Limit must be between 1 and 50.")]
    #[case("camera", Some(-3), "Error: Limit must be between 1 and 50.")]
    #[tokio::test]
    async fn rejects_bad_input(
        #[case] query: &str,
        #[case] limit: Option<i64>,
        #[case] expected: &str,
    ) {
        let out = handle_find_icons(&catalog(), request(query, limit)).await.unwrap();
        check!(out == expected);
    }

    #[tokio::test]
    async fn keyword_hit_is_rendered() {
        let out = handle_find_icons(&catalog(), request("profile", None))
            .await
            .unwrap();
        check!(out.contains("`account_circle`"));
        check!(out.contains("`tylIconAccountCircle`"));
        check!(out.contains("| keyword |"));
    }

    #[tokio::test]
    async fn no_match() {
        let out = handle_find_icons(&catalog(), request("zzzz", None))
            .await
            .unwrap();
        check!(out.starts_with("No icons found matching \"zzzz\"."));
    }

    struct Offline;

    impl IconFetcher for Offline {
        fn fetch(&self) -> BoxFuture<'static, Result<Vec<IconMetadata>, IconError>> {
            Box::pin(async { Err(IconError::Timeout(30)) })
        }
    }

    #[tokio::test]
    async fn fetch_failure_is_reported_as_text() {
        let icons = IconCatalog::new(Arc::new(Offline));
        let out = handle_find_icons(&icons, request("camera", None)).await.unwrap();
        check!(out == "Error searching icons: Icon metadata request timed out after 30 seconds");
    }
}
