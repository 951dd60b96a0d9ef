use anyhow::{Context, Result};
use url::Url;

use crate::config::StorageConfig;

/// Public object links for the document bucket. Uploads go through the
/// backend; this side only needs read links keyed by filename.
#[derive(Clone)]
pub struct StorageService {
    base: Url,
    bucket: String,
}

impl StorageService {
    pub fn new(config: &StorageConfig) -> Result<Self> {
        let base = Url::parse(&config.public_url).context("Invalid storage public_url")?;
        if base.cannot_be_a_base() {
            anyhow::bail!("Storage public_url cannot be used as a base: {}", config.public_url);
        }

        Ok(Self {
            base,
            bucket: config.bucket.clone(),
        })
    }

    /// `<public_url>/storage/v1/object/public/<bucket>/<filename>`, the
    /// filename encoded as a single path segment.
    pub fn public_url(&self, filename: &str) -> String {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["storage", "v1", "object", "public"])
                .push(&self.bucket)
                .push(filename);
        }
        url.to_string()
    }
}
