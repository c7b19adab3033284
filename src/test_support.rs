//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::catalog::TagCatalog;
use crate::feed::{FeedPage, FeedQuery, InjectionMode, PromptRecord, PromptSource, SourceError};

/// A source that always returns an empty page.
pub struct NoopSource;

#[async_trait]
impl PromptSource for NoopSource {
    fn name(&self) -> &str {
        "noop"
    }

    async fn fetch(&self, _query: &FeedQuery) -> Result<FeedPage, SourceError> {
        Ok(FeedPage::default())
    }
}

/// Creates a test App with a NoopSource and the default catalog.
pub fn test_app() -> crate::core::state::App {
    crate::core::state::App::new(Arc::new(NoopSource), TagCatalog::default())
}

/// A prompt record with the fields tests care about filled in.
pub fn record(title: &str, tags: &[&str], run_count: u64, created: &str) -> PromptRecord {
    PromptRecord {
        prompt_text: format!("Prompt for {title}"),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        temperature: 0.5,
        author_id: "u-test".to_string(),
        author_name: "Test Author".to_string(),
        description: format!("Description of {title}"),
        icon_ref: "*".to_string(),
        forked_from_id: String::new(),
        run_count,
        created_at: created.parse().expect("valid RFC 3339 timestamp"),
        title: title.to_string(),
        output_parsing_pattern: String::new(),
        output_parsing_replacement: String::new(),
        recommended_models: Vec::new(),
        injection_mode: InjectionMode::Replace,
    }
}
