//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{
    AcceptPattern, CompositionDraft, DraftRef, FileInfo, GatewayError, LocationRef, PublishError,
    PublishedContent, UserRef,
};

/// Platform file picker / drag-drop collaborator. Produces candidate files
/// for the selection stage; candidates are validated by the domain before
/// any item lands in the draft.
#[async_trait::async_trait]
pub trait MediaSource: Send + Sync {
    /// Resolve up to `max_count` files matching `accept`. The picker should
    /// pre-filter by mime but the domain revalidates regardless.
    async fn request_files(
        &self,
        accept: AcceptPattern,
        max_count: usize,
    ) -> Result<Vec<FileInfo>, GatewayError>;
}

/// Submission backend. This core defines the request/response contract only;
/// the adapter owns the transport.
#[async_trait::async_trait]
pub trait Publisher: Send + Sync {
    /// Submit the draft for publishing (or scheduling, when the draft's
    /// schedule is enabled). Transient failures are retryable.
    async fn publish(&self, draft: &CompositionDraft) -> Result<PublishedContent, PublishError>;

    /// Persist the draft on the backend without publishing it.
    async fn save_draft(&self, draft: &CompositionDraft) -> Result<DraftRef, PublishError>;
}

/// User/location/hashtag lookup for the details stage editors.
#[async_trait::async_trait]
pub trait Directory: Send + Sync {
    /// Users matching `query` by username or display name. Empty query
    /// returns the suggestion list.
    async fn search_users(&self, query: &str) -> Result<Vec<UserRef>, GatewayError>;

    /// Places matching `query` by name. Empty query returns nearby places.
    async fn search_locations(&self, query: &str) -> Result<Vec<LocationRef>, GatewayError>;

    /// Hashtag completions for a `#`-prefixed partial token.
    async fn suggest_hashtags(&self, prefix: &str) -> Result<Vec<String>, GatewayError>;
}
