//! Mock submission backend for testing and offline demo runs.
//!
//! Resolves after a configurable delay and can inject a one-shot transient
//! failure to exercise retry paths.

use crate::domain::{CompositionDraft, DraftRef, PublishError, PublishedContent};
use crate::ports::Publisher;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tracing::info;

/// Mock publisher. Assigns monotonic ids; no I/O.
pub struct MockPublisher {
    /// Simulated network delay in milliseconds.
    delay_ms: u64,
    fail_next: AtomicBool,
    counter: AtomicU64,
}

impl MockPublisher {
    /// Create a mock with the default delay (1500ms, the prototype's feel).
    pub fn new() -> Self {
        Self::with_delay(1500)
    }

    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            fail_next: AtomicBool::new(false),
            counter: AtomicU64::new(1),
        }
    }

    /// Make the next submission fail with a transient backend error.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::Release);
    }

    async fn simulate(&self, op: &str) -> Result<(), PublishError> {
        tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        if self.fail_next.swap(false, Ordering::AcqRel) {
            return Err(PublishError::Backend(format!(
                "simulated transient failure during {op}"
            )));
        }
        Ok(())
    }
}

impl Default for MockPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Publisher for MockPublisher {
    async fn publish(&self, draft: &CompositionDraft) -> Result<PublishedContent, PublishError> {
        info!(
            upload_type = %draft.upload_type,
            media = draft.media.len(),
            scheduled = draft.schedule.enabled,
            "[MOCK] Simulating publish"
        );
        self.simulate("publish").await?;
        let n = self.counter.fetch_add(1, Ordering::AcqRel);
        Ok(PublishedContent {
            id: format!("pub_{n}"),
            published_at: Utc::now(),
            draft: draft.clone(),
        })
    }

    async fn save_draft(&self, draft: &CompositionDraft) -> Result<DraftRef, PublishError> {
        info!(
            upload_type = %draft.upload_type,
            media = draft.media.len(),
            "[MOCK] Simulating draft save"
        );
        self.simulate("draft save").await?;
        let n = self.counter.fetch_add(1, Ordering::AcqRel);
        Ok(DraftRef {
            id: format!("draft_{n}"),
            saved_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UploadType;

    #[tokio::test]
    async fn publish_returns_snapshot_with_id() {
        let publisher = MockPublisher::with_delay(10);
        let mut draft = CompositionDraft::new(UploadType::Post);
        draft.caption = "hello".into();

        let published = publisher.publish(&draft).await.expect("publish");
        assert_eq!(published.id, "pub_1");
        assert_eq!(published.draft.caption, "hello");

        let saved = publisher.save_draft(&draft).await.expect("save");
        assert_eq!(saved.id, "draft_2");
    }

    #[tokio::test]
    async fn failure_injection_is_one_shot() {
        let publisher = MockPublisher::with_delay(10);
        publisher.fail_next();
        let draft = CompositionDraft::new(UploadType::Post);

        assert!(matches!(
            publisher.publish(&draft).await,
            Err(PublishError::Backend(_))
        ));
        assert!(publisher.publish(&draft).await.is_ok());
    }
}
