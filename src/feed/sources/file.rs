//! Feed source backed by a JSON file (an array of prompt records).
//!
//! With no path it serves the sample feed compiled into the binary, so the
//! panel has something to show without a service.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use log::{debug, info};

use crate::core::selection::FeedMode;
use crate::feed::{FeedPage, FeedQuery, PromptRecord, PromptSource, SourceError, TagCount};

const BUNDLED_FEED: &str = include_str!("../../../assets/sample-prompts.json");

pub struct FileSource {
    path: Option<PathBuf>,
}

impl FileSource {
    pub fn new(path: PathBuf) -> Self {
        Self { path: Some(path) }
    }

    /// Serve the sample feed shipped with the binary.
    pub fn bundled() -> Self {
        Self { path: None }
    }

    /// The file is re-read on every fetch so a refresh sees edits.
    async fn read_records(&self) -> Result<Vec<PromptRecord>, SourceError> {
        let contents = match &self.path {
            Some(path) => {
                debug!("Reading feed file {}", path.display());
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(SourceError::Io)?
            }
            None => BUNDLED_FEED.to_string(),
        };
        serde_json::from_str(&contents).map_err(|e| SourceError::Parse(e.to_string()))
    }
}

/// Filter by tag, order by mode, then cut to the limit.
pub fn apply_query(mut records: Vec<PromptRecord>, query: &FeedQuery) -> FeedPage {
    let tag_counts = count_tags(&records);
    if let Some(tag) = &query.tag {
        records.retain(|r| r.has_tag(tag));
    }

    match query.mode {
        FeedMode::Popular => records.sort_by(|a, b| {
            b.run_count
                .cmp(&a.run_count)
                .then_with(|| b.created_at.cmp(&a.created_at))
        }),
        FeedMode::New => records.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }

    let total = records.len();
    records.truncate(query.limit);
    FeedPage {
        prompts: records,
        total,
        tag_counts,
    }
}

/// Most used first, ties by name.
fn count_tags(records: &[PromptRecord]) -> Vec<TagCount> {
    let mut counts: HashMap<&str, u64> = HashMap::new();
    for tag in records.iter().flat_map(|r| &r.tags) {
        *counts.entry(tag.as_str()).or_default() += 1;
    }
    let mut counts: Vec<TagCount> = counts
        .into_iter()
        .map(|(tag, prompt_count)| TagCount {
            tag: tag.to_string(),
            prompt_count,
        })
        .collect();
    counts.sort_by(|a, b| {
        b.prompt_count
            .cmp(&a.prompt_count)
            .then_with(|| a.tag.cmp(&b.tag))
    });
    counts
}

#[async_trait]
impl PromptSource for FileSource {
    fn name(&self) -> &str {
        if self.path.is_some() { "file" } else { "bundled" }
    }

    async fn fetch(&self, query: &FeedQuery) -> Result<FeedPage, SourceError> {
        let records = self.read_records().await?;
        let page = apply_query(records, query);
        info!(
            "{} source: {} of {} prompts ({:?}, tag {:?})",
            self.name(),
            page.prompts.len(),
            page.total,
            query.mode,
            query.tag
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    fn query(mode: FeedMode, tag: Option<&str>, limit: usize) -> FeedQuery {
        FeedQuery {
            mode,
            tag: tag.map(str::to_string),
            limit,
        }
    }

    fn titles(page: &FeedPage) -> Vec<&str> {
        page.prompts.iter().map(|p| p.title.as_str()).collect()
    }

    fn sample() -> Vec<PromptRecord> {
        vec![
            record("old-popular", &["writing"], 90, "2023-01-01T00:00:00Z"),
            record("new-quiet", &["research"], 3, "2024-06-01T00:00:00Z"),
            record("mid", &["writing", "research"], 40, "2024-01-01T00:00:00Z"),
            record("tie-newer", &["art"], 40, "2024-02-01T00:00:00Z"),
        ]
    }

    #[test]
    fn test_popular_orders_by_run_count_then_newest() {
        let page = apply_query(sample(), &query(FeedMode::Popular, None, 10));
        assert_eq!(titles(&page), vec!["old-popular", "tie-newer", "mid", "new-quiet"]);
        assert_eq!(page.total, 4);
    }

    #[test]
    fn test_new_orders_by_created() {
        let page = apply_query(sample(), &query(FeedMode::New, None, 10));
        assert_eq!(titles(&page), vec!["new-quiet", "tie-newer", "mid", "old-popular"]);
    }

    #[test]
    fn test_tag_filter_and_total() {
        let page = apply_query(sample(), &query(FeedMode::Popular, Some("research"), 10));
        assert_eq!(titles(&page), vec!["mid", "new-quiet"]);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn test_limit_keeps_total_of_all_matches() {
        let page = apply_query(sample(), &query(FeedMode::Popular, None, 2));
        assert_eq!(page.prompts.len(), 2);
        assert_eq!(page.total, 4);
    }

    #[test]
    fn test_tag_counts_ignore_filter_and_limit() {
        let page = apply_query(sample(), &query(FeedMode::Popular, Some("art"), 1));
        let counts: Vec<(&str, u64)> = page
            .tag_counts
            .iter()
            .map(|c| (c.tag.as_str(), c.prompt_count))
            .collect();
        assert_eq!(counts, vec![("research", 2), ("writing", 2), ("art", 1)]);
    }

    #[test]
    fn test_bundled_feed_parses() {
        let source = FileSource::bundled();
        let page = tokio_test::block_on(source.fetch(&query(FeedMode::Popular, None, 100)))
            .expect("bundled feed should parse");
        assert!(page.total > 0);
        assert_eq!(source.name(), "bundled");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = FileSource::new(PathBuf::from("/definitely/not/here.json"));
        let result = tokio_test::block_on(source.fetch(&query(FeedMode::New, None, 5)));
        assert!(matches!(result, Err(SourceError::Io(_))));
    }
}
