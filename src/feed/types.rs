use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::core::selection::FeedMode;

/// How a prompt's output is put back into the user's document.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InjectionMode {
    #[default]
    Replace,
    Append,
}

/// A shared prompt as the community service sends it.
///
/// Field names follow the service's JSON, not Rust conventions.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PromptRecord {
    #[serde(rename = "prompt")]
    pub prompt_text: String,
    /// A set on the wire; duplicates are dropped, first occurrence order kept.
    #[serde(default, deserialize_with = "unique_tags")]
    pub tags: Vec<String>,
    pub temperature: f64,
    #[serde(rename = "userID")]
    pub author_id: String,
    #[serde(rename = "userName")]
    pub author_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "icon", default)]
    pub icon_ref: String,
    #[serde(rename = "forkFrom", default)]
    pub forked_from_id: String,
    #[serde(rename = "promptRunCount", default)]
    pub run_count: u64,
    #[serde(rename = "created")]
    pub created_at: DateTime<Utc>,
    pub title: String,
    #[serde(rename = "outputParsingPattern", default)]
    pub output_parsing_pattern: String,
    #[serde(rename = "outputParsingReplacement", default)]
    pub output_parsing_replacement: String,
    #[serde(rename = "recommendedModels", default)]
    pub recommended_models: Vec<String>,
    #[serde(rename = "injectionMode", default)]
    pub injection_mode: InjectionMode,
}

fn unique_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for tag in raw {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    Ok(tags)
}

/// How many prompts carry a tag, as the service reports it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TagCount {
    pub tag: String,
    #[serde(rename = "promptCount")]
    pub prompt_count: u64,
}

impl PromptRecord {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether this prompt was forked from another one.
    pub fn is_fork(&self) -> bool {
        !self.forked_from_id.is_empty()
    }
}

/// What the panel asks a source for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedQuery {
    pub mode: FeedMode,
    pub tag: Option<String>,
    pub limit: usize,
}

/// One page of the feed: at most `limit` prompts, plus how many matched.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct FeedPage {
    pub prompts: Vec<PromptRecord>,
    pub total: usize,
    /// Per-tag counts over the whole feed, ignoring the tag filter.
    #[serde(default, rename = "tags")]
    pub tag_counts: Vec<TagCount>,
}
