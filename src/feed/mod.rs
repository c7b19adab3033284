//! # Feed
//!
//! The prompt records the panel displays and the sources that supply them.
//! The panel only ever reads a page; sources own ordering and filtering.

pub mod source;
pub mod sources;
pub mod types;

use std::sync::Arc;

use log::info;

use crate::SourceKind;
use crate::core::config::ResolvedConfig;

pub use source::{PromptSource, SourceError};
pub use sources::{FileSource, RemoteSource};
pub use types::{FeedPage, FeedQuery, InjectionMode, PromptRecord, TagCount};

/// Build the source a resolved config asks for.
pub fn build_source(config: &ResolvedConfig) -> Result<Arc<dyn PromptSource>, SourceError> {
    match config.source {
        SourceKind::File => {
            let source = match &config.file_path {
                Some(path) => {
                    info!("Using feed file {}", path.display());
                    FileSource::new(path.clone())
                }
                None => {
                    info!("Using bundled sample feed");
                    FileSource::bundled()
                }
            };
            Ok(Arc::new(source))
        }
        SourceKind::Remote => {
            let base_url = config.base_url.clone().ok_or_else(|| {
                SourceError::Config(
                    "remote source needs a URL (config [source] base_url, PROMPTFEED_URL or --url)"
                        .to_string(),
                )
            })?;
            info!("Using remote feed at {}", base_url);
            Ok(Arc::new(RemoteSource::new(base_url)?))
        }
    }
}
