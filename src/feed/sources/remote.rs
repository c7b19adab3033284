//! Feed source backed by the community prompt service.
//!
//! `GET {base_url}/prompts?mode=popular&limit=10&tag=writing` answers with
//! `{"prompts": [...], "total": 205}`.

use async_trait::async_trait;
use log::{debug, info, warn};

use crate::feed::{FeedPage, FeedQuery, PromptSource, SourceError};

pub struct RemoteSource {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteSource {
    pub fn new(base_url: String) -> Result<Self, SourceError> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(SourceError::Config("remote source needs a base URL".to_string()));
        }
        Ok(Self {
            base_url: trimmed.to_string(),
            client: reqwest::Client::new(),
        })
    }

    fn prompts_url(&self) -> String {
        format!("{}/prompts", self.base_url)
    }
}

/// Query string for a feed request. The tag is omitted when no filter is set.
fn query_params(query: &FeedQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("mode", query.mode.as_query().to_string()),
        ("limit", query.limit.to_string()),
    ];
    if let Some(tag) = &query.tag {
        params.push(("tag", tag.clone()));
    }
    params
}

#[async_trait]
impl PromptSource for RemoteSource {
    fn name(&self) -> &str {
        "remote"
    }

    async fn fetch(&self, query: &FeedQuery) -> Result<FeedPage, SourceError> {
        let url = self.prompts_url();
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(&query_params(query))
            .send()
            .await
            .map_err(|e| SourceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Feed request failed: HTTP {} {}", status.as_u16(), message);
            return Err(SourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let mut page: FeedPage = response
            .json()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        // A service that ignores `limit` still only gets `limit` cards
        if page.prompts.len() > query.limit {
            page.prompts.truncate(query.limit);
        }
        info!(
            "remote source: {} of {} prompts",
            page.prompts.len(),
            page.total
        );
        Ok(page)
    }
}
