// Post source trait: the swap-ready abstraction over where posts come from.
//
// The scoring engine only ever sees `Post` records. Each platform fetcher and
// the demo generator implement this trait, so the CLI can mix them freely.

use async_trait::async_trait;

use crate::models::{Platform, Post};

/// A searchable supply of normalized posts for one platform.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// The platform every returned post belongs to.
    fn platform(&self) -> Platform;

    /// Human-readable name for progress output.
    fn name(&self) -> String;

    /// Search for recent posts about `topic`, returning at most `limit`.
    ///
    /// Never fails: fetch errors are logged and yield an empty list, so the
    /// detectors always receive a valid batch.
    async fn search(&self, topic: &str, limit: usize) -> Vec<Post>;
}
