use std::io::Write;

use promptfeed::core::selection::FeedMode;
use promptfeed::feed::{FeedQuery, FileSource, PromptSource, SourceError};
use serde_json::json;
use tempfile::NamedTempFile;

// ============================================================================
// Helper Functions
// ============================================================================

fn prompt_json(title: &str, tags: &[&str], runs: u64, created: &str) -> serde_json::Value {
    json!({
        "prompt": format!("Prompt for {title}"),
        "tags": tags,
        "temperature": 0.5,
        "userID": "u-1",
        "userName": "Ada",
        "promptRunCount": runs,
        "created": created,
        "title": title
    })
}

fn feed_file(records: &[serde_json::Value]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", serde_json::Value::Array(records.to_vec())).unwrap();
    file
}

fn query(mode: FeedMode, tag: Option<&str>, limit: usize) -> FeedQuery {
    FeedQuery {
        mode,
        tag: tag.map(str::to_string),
        limit,
    }
}

fn titles(page: &promptfeed::feed::FeedPage) -> Vec<&str> {
    page.prompts.iter().map(|p| p.title.as_str()).collect()
}

fn sample() -> Vec<serde_json::Value> {
    vec![
        prompt_json("Old favourite", &["writing"], 900, "2023-01-01T00:00:00Z"),
        prompt_json("Fresh take", &["writing", "art"], 10, "2024-09-01T00:00:00Z"),
        prompt_json("Middle ground", &["art"], 300, "2024-03-01T00:00:00Z"),
        prompt_json("Tied newer", &["music"], 300, "2024-04-01T00:00:00Z"),
    ]
}

// ============================================================================
// Ordering, filtering and limits
// ============================================================================

#[tokio::test]
async fn test_file_popular_orders_by_runs_then_newest() {
    let file = feed_file(&sample());
    let source = FileSource::new(file.path().to_path_buf());

    let page = source.fetch(&query(FeedMode::Popular, None, 10)).await.unwrap();
    assert_eq!(
        titles(&page),
        vec!["Old favourite", "Tied newer", "Middle ground", "Fresh take"]
    );
    assert_eq!(page.total, 4);
}

#[tokio::test]
async fn test_file_new_orders_by_created() {
    let file = feed_file(&sample());
    let source = FileSource::new(file.path().to_path_buf());

    let page = source.fetch(&query(FeedMode::New, None, 10)).await.unwrap();
    assert_eq!(
        titles(&page),
        vec!["Fresh take", "Tied newer", "Middle ground", "Old favourite"]
    );
}

#[tokio::test]
async fn test_file_tag_filter_and_limit_keep_total() {
    let file = feed_file(&sample());
    let source = FileSource::new(file.path().to_path_buf());

    let page = source.fetch(&query(FeedMode::Popular, Some("art"), 1)).await.unwrap();
    assert_eq!(titles(&page), vec!["Middle ground"]);
    assert_eq!(page.total, 2);
}

#[tokio::test]
async fn test_file_is_reread_on_every_fetch() {
    let file = feed_file(&sample()[..1]);
    let source = FileSource::new(file.path().to_path_buf());
    let first = source.fetch(&query(FeedMode::New, None, 10)).await.unwrap();
    assert_eq!(first.total, 1);

    std::fs::write(file.path(), serde_json::Value::Array(sample()).to_string()).unwrap();
    let second = source.fetch(&query(FeedMode::New, None, 10)).await.unwrap();
    assert_eq!(second.total, 4);
}

#[tokio::test]
async fn test_bundled_feed_loads() {
    let source = FileSource::bundled();
    assert_eq!(source.name(), "bundled");

    let page = source.fetch(&query(FeedMode::Popular, None, 3)).await.unwrap();
    assert_eq!(page.prompts.len(), 3);
    assert_eq!(page.total, 10);
    assert!(page.prompts[0].run_count >= page.prompts[1].run_count);
}

// ============================================================================
// Error handling
// ============================================================================

#[tokio::test]
async fn test_file_missing_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = FileSource::new(dir.path().join("absent.json"));

    let result = source.fetch(&query(FeedMode::Popular, None, 10)).await;
    assert!(matches!(result, Err(SourceError::Io(_))));
}

#[tokio::test]
async fn test_file_malformed_is_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "[{{\"title\": ").unwrap();
    let source = FileSource::new(file.path().to_path_buf());

    let result = source.fetch(&query(FeedMode::Popular, None, 10)).await;
    assert!(matches!(result, Err(SourceError::Parse(_))));
}
