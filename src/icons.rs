//! Icon metadata catalog and icon search.
//!
//! The metadata is a published JSON array fetched once per process. Icons are
//! ranked with the same tier ladder as components, matched against the icon
//! name and then its keywords.

use crate::error::IconError;
use crate::search::scoring::{MatchType, TierMatch, compare_ranked, match_keywords, match_term};
use crate::search::tokenize::whitespace_terms;
use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

/// Largest `limit` accepted for an icon search.
pub const MAX_ICON_LIMIT: usize = 50;
pub const DEFAULT_ICON_LIMIT: usize = 10;

/// One entry of the icon metadata file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconMetadata {
    pub name: String,
    /// SVG markup.
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Fetches the full icon list.
pub trait IconFetcher: Send + Sync {
    fn fetch(&self) -> BoxFuture<'static, Result<Vec<IconMetadata>, IconError>>;
}

/// Downloads icon metadata over HTTP.
#[derive(Debug, Clone)]
pub struct HttpIconFetcher {
    client: Client,
    url: String,
    timeout: Duration,
}

impl HttpIconFetcher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, IconError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("forge-docs-mcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| IconError::Request(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }
}

impl IconFetcher for HttpIconFetcher {
    fn fetch(&self) -> BoxFuture<'static, Result<Vec<IconMetadata>, IconError>> {
        let client = self.client.clone();
        let url = self.url.clone();
        let timeout_secs = self.timeout.as_secs();

        Box::pin(async move {
            tracing::info!("Fetching icon metadata from {}", url);
            let map_err = |e: reqwest::Error| {
                if e.is_timeout() {
                    IconError::Timeout(timeout_secs)
                } else {
                    IconError::Request(e.to_string())
                }
            };

            let response = client.get(&url).send().await.map_err(map_err)?;
            if !response.status().is_success() {
                return Err(IconError::Status(response.status().as_u16()));
            }
            let icons: Vec<IconMetadata> = response
                .json()
                .await
                .map_err(|e| IconError::Decode(e.to_string()))?;

            tracing::info!(count = icons.len(), "Fetched icon metadata");
            Ok(icons)
        })
    }
}

/// A fixed icon list, for tests and offline use.
#[derive(Debug, Clone, Default)]
pub struct StaticIcons(pub Vec<IconMetadata>);

impl IconFetcher for StaticIcons {
    fn fetch(&self) -> BoxFuture<'static, Result<Vec<IconMetadata>, IconError>> {
        let icons = self.0.clone();
        Box::pin(async move { Ok(icons) })
    }
}

type SharedIconFuture = Shared<BoxFuture<'static, Result<Arc<Vec<IconMetadata>>, IconError>>>;

/// Process-wide icon list, fetched on first use.
///
/// Concurrent callers share a single in-flight fetch. A successful result is
/// kept for the life of the process; a failure is handed to every waiter and
/// then forgotten so the next call tries again.
pub struct IconCatalog {
    fetcher: Arc<dyn IconFetcher>,
    cache: RwLock<Option<Arc<Vec<IconMetadata>>>>,
    in_flight: Mutex<Option<SharedIconFuture>>,
}

impl std::fmt::Debug for IconCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IconCatalog")
            .field("cached", &self.cache.try_read().is_ok_and(|c| c.is_some()))
            .finish_non_exhaustive()
    }
}

impl IconCatalog {
    pub fn new(fetcher: Arc<dyn IconFetcher>) -> Self {
        Self {
            fetcher,
            cache: RwLock::new(None),
            in_flight: Mutex::new(None),
        }
    }

    pub fn remote(url: impl Into<String>, timeout: Duration) -> Result<Self, IconError> {
        Ok(Self::new(Arc::new(HttpIconFetcher::new(url, timeout)?)))
    }

    pub fn from_icons(icons: Vec<IconMetadata>) -> Self {
        Self::new(Arc::new(StaticIcons(icons)))
    }

    /// The icon list, fetching it if this is the first successful call.
    pub async fn icons(&self) -> Result<Arc<Vec<IconMetadata>>, IconError> {
        if let Some(icons) = self.cache.read().await.clone() {
            return Ok(icons);
        }

        let shared = {
            let mut in_flight = self.in_flight.lock().await;
            // another caller may have finished while we waited for the lock
            if let Some(icons) = self.cache.read().await.clone() {
                return Ok(icons);
            }
            match in_flight.as_ref() {
                Some(shared) => {
                    tracing::debug!("Awaiting in-flight icon metadata fetch");
                    shared.clone()
                }
                None => {
                    let fetch = self.fetcher.fetch();
                    let shared = async move { fetch.await.map(Arc::new) }.boxed().shared();
                    *in_flight = Some(shared.clone());
                    shared
                }
            }
        };

        let result = shared.clone().await;

        match &result {
            Ok(icons) => *self.cache.write().await = Some(Arc::clone(icons)),
            Err(e) => tracing::warn!("Icon metadata fetch failed: {}", e),
        }

        {
            let mut in_flight = self.in_flight.lock().await;
            if in_flight.as_ref().is_some_and(|f| f.ptr_eq(&shared)) {
                *in_flight = None;
            }
        }

        result
    }

    pub async fn is_cached(&self) -> bool {
        self.cache.read().await.is_some()
    }

    /// Fetch if needed, then rank icons against `query`.
    pub async fn search(&self, query: &str, limit: usize) -> Result<Vec<IconMatch>, IconError> {
        let icons = self.icons().await?;
        Ok(search_icons(&icons, query, limit)
            .into_iter()
            .map(IconMatch::from_hit)
            .collect())
    }
}

/// A ranked icon.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconMatch {
    pub name: String,
    pub keywords: Vec<String>,
    pub score: f64,
    pub match_type: MatchType,
    pub esm_import_name: String,
}

/// Borrowed form produced by [`search_icons`].
#[derive(Debug, Clone, PartialEq)]
pub struct IconHit<'a> {
    pub icon: &'a IconMetadata,
    pub score: f64,
    pub match_type: MatchType,
}

impl IconMatch {
    fn from_hit(hit: IconHit<'_>) -> Self {
        Self {
            name: hit.icon.name.clone(),
            keywords: hit.icon.keywords.clone(),
            score: hit.score,
            match_type: hit.match_type,
            esm_import_name: esm_import_name(&hit.icon.name),
        }
    }
}

/// Rank icons by their best-matching query term.
///
/// Each term is tried against the icon name (exact, prefix, contains,
/// fuzzy) and only falls through to the keywords when the name does not
/// match at all. A query with no terms returns the first `limit` icons
/// unranked.
pub fn search_icons<'a>(icons: &'a [IconMetadata], query: &str, limit: usize) -> Vec<IconHit<'a>> {
    let terms = whitespace_terms(query);
    if terms.is_empty() {
        return icons
            .iter()
            .take(limit)
            .map(|icon| IconHit {
                icon,
                score: 0.0,
                match_type: MatchType::Exact,
            })
            .collect();
    }

    let mut hits: Vec<IconHit<'a>> = icons
        .iter()
        .filter_map(|icon| {
            let name = icon.name.to_lowercase();
            terms
                .iter()
                .filter_map(|term| {
                    match_term(&name, term).or_else(|| match_keywords(&icon.keywords, term))
                })
                .reduce(|best, hit| {
                    let score = best.score.max(hit.score);
                    let match_type = best.match_type.max(hit.match_type);
                    TierMatch { match_type, score }
                })
                .map(|best| IconHit {
                    icon,
                    score: best.score,
                    match_type: best.match_type,
                })
        })
        .collect();

    hits.sort_by(|a, b| {
        compare_ranked(
            (a.score, a.match_type, a.icon.name.as_str()),
            (b.score, b.match_type, b.icon.name.as_str()),
        )
    });
    hits.truncate(limit);
    hits
}

/// `camera` → `tylIconCamera`, `photo_album` → `tylIconPhotoAlbum`.
pub fn esm_import_name(icon_name: &str) -> String {
    let mut out = String::from("tylIcon");
    for part in icon_name.split(['-', '_']) {
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }
    out
}
