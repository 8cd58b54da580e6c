//! One composition session: owns the draft, the current step, and the
//! single in-flight submission flag.
//!
//! - All draft mutations funnel through `dispatch` (explicit actions)
//! - Forward navigation is gated per step; backward is always allowed
//! - `publish`/`save_draft` are mutually exclusive per draft and
//!   time-bounded; on success the session closes and the draft is discarded

use crate::domain::{
    CompositionDraft, DraftAction, DraftRef, FileInfo, MediaItem, PublishError, PublishedContent,
    UploadType, ValidationError, WorkflowStep, can_advance, can_publish, validate_for_draft_save,
    validate_for_publish, validate_selection,
};
use crate::ports::Publisher;
use chrono::Utc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

struct SessionState {
    step: WorkflowStep,
    draft: CompositionDraft,
    next_media_id: u64,
}

/// Releases the in-flight flag on every exit path.
struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Composition session. One per draft; discarded on publish/save/abandon.
pub struct ComposeSession {
    publisher: Arc<dyn Publisher>,
    publish_timeout: Duration,
    state: Mutex<Option<SessionState>>,
    in_flight: AtomicBool,
}

impl ComposeSession {
    pub fn new(
        upload_type: UploadType,
        publisher: Arc<dyn Publisher>,
        publish_timeout: Duration,
    ) -> Self {
        Self {
            publisher,
            publish_timeout,
            state: Mutex::new(Some(SessionState {
                step: WorkflowStep::Upload,
                draft: CompositionDraft::new(upload_type),
                next_media_id: 1,
            })),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Current step, or `SessionClosed` after a successful submission.
    pub async fn current_step(&self) -> Result<WorkflowStep, ValidationError> {
        let guard = self.state.lock().await;
        guard
            .as_ref()
            .map(|s| s.step)
            .ok_or(ValidationError::SessionClosed)
    }

    /// Snapshot of the draft for rendering/preview.
    pub async fn draft(&self) -> Result<CompositionDraft, ValidationError> {
        let guard = self.state.lock().await;
        guard
            .as_ref()
            .map(|s| s.draft.clone())
            .ok_or(ValidationError::SessionClosed)
    }

    /// Apply one draft action. Step side effects (type-switch reset,
    /// auto-advance on selection, fallback to Upload when media empties)
    /// happen here so the controller always sees them.
    pub async fn dispatch(&self, action: DraftAction) -> Result<(), ValidationError> {
        let mut guard = self.state.lock().await;
        let state = guard.as_mut().ok_or(ValidationError::SessionClosed)?;
        Self::apply_action(state, action)
    }

    fn apply_action(state: &mut SessionState, action: DraftAction) -> Result<(), ValidationError> {
        enum StepEffect {
            ResetToUpload,
            AdvanceFromUpload,
            FallbackWhenEmpty,
            None,
        }
        let effect = match &action {
            DraftAction::SetUploadType(_) => StepEffect::ResetToUpload,
            DraftAction::SelectMedia(_) => StepEffect::AdvanceFromUpload,
            DraftAction::RemoveMedia(_) => StepEffect::FallbackWhenEmpty,
            _ => StepEffect::None,
        };

        state.draft.apply(action, Utc::now())?;

        match effect {
            StepEffect::ResetToUpload => {
                state.step = WorkflowStep::Upload;
                debug!(upload_type = %state.draft.upload_type, "upload type changed, back to upload step");
            }
            StepEffect::AdvanceFromUpload => {
                if state.step == WorkflowStep::Upload {
                    state.step = WorkflowStep::Edit;
                    debug!(count = state.draft.media.len(), "media selected, advanced to edit");
                }
            }
            StepEffect::FallbackWhenEmpty => {
                if state.draft.media.is_empty() {
                    state.step = WorkflowStep::Upload;
                    debug!("media list emptied, back to upload step");
                }
            }
            StepEffect::None => {}
        }
        Ok(())
    }

    /// Validate a picker selection, mint media items, and replace the
    /// draft's media list. Auto-advances Upload → Edit on success.
    pub async fn select_media(&self, files: Vec<FileInfo>) -> Result<usize, ValidationError> {
        let mut guard = self.state.lock().await;
        let state = guard.as_mut().ok_or(ValidationError::SessionClosed)?;
        validate_selection(state.draft.upload_type, &files)?;

        let items: Vec<MediaItem> = files
            .into_iter()
            .map(|f| {
                let id = state.next_media_id;
                state.next_media_id += 1;
                MediaItem::from_file(id, f)
            })
            .collect();
        let count = items.len();
        Self::apply_action(state, DraftAction::SelectMedia(items))?;
        info!(count, "media selection accepted");
        Ok(count)
    }

    pub async fn remove_media(&self, index: usize) -> Result<(), ValidationError> {
        self.dispatch(DraftAction::RemoveMedia(index)).await
    }

    pub async fn set_upload_type(&self, upload_type: UploadType) -> Result<(), ValidationError> {
        self.dispatch(DraftAction::SetUploadType(upload_type)).await
    }

    /// Whether the current step's completion requirements are met.
    pub async fn can_advance_now(&self) -> Result<bool, ValidationError> {
        let guard = self.state.lock().await;
        let state = guard.as_ref().ok_or(ValidationError::SessionClosed)?;
        Ok(can_advance(state.step, &state.draft))
    }

    /// Move forward exactly one step, gated on the current step's rules.
    pub async fn advance(&self) -> Result<WorkflowStep, ValidationError> {
        let mut guard = self.state.lock().await;
        let state = guard.as_mut().ok_or(ValidationError::SessionClosed)?;
        if !can_advance(state.step, &state.draft) {
            return Err(ValidationError::StepIncomplete);
        }
        if let Some(next) = state.step.next() {
            state.step = next;
        }
        Ok(state.step)
    }

    /// Move back one step, clamped at Upload. Always permitted.
    pub async fn retreat(&self) -> Result<WorkflowStep, ValidationError> {
        let mut guard = self.state.lock().await;
        let state = guard.as_mut().ok_or(ValidationError::SessionClosed)?;
        if let Some(prev) = state.step.prev() {
            state.step = prev;
        }
        Ok(state.step)
    }

    /// Jump to a step: any earlier step freely, the immediate next step via
    /// the same gate as `advance`, anything further is rejected.
    pub async fn go_to(&self, target: WorkflowStep) -> Result<WorkflowStep, ValidationError> {
        let mut guard = self.state.lock().await;
        let state = guard.as_mut().ok_or(ValidationError::SessionClosed)?;
        if target <= state.step {
            state.step = target;
            return Ok(state.step);
        }
        if Some(target) == state.step.next() {
            if !can_advance(state.step, &state.draft) {
                return Err(ValidationError::StepIncomplete);
            }
            state.step = target;
            return Ok(state.step);
        }
        Err(ValidationError::ForwardJumpBlocked)
    }

    /// Publish precondition for the UI (media present, reel is video).
    pub async fn can_publish_now(&self) -> Result<bool, ValidationError> {
        let guard = self.state.lock().await;
        let state = guard.as_ref().ok_or(ValidationError::SessionClosed)?;
        Ok(can_publish(&state.draft))
    }

    /// Submit the draft. Exactly one submission may be in flight; on success
    /// the session closes and the draft is discarded.
    pub async fn publish(&self) -> Result<PublishedContent, PublishError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("publish rejected: another submission in flight");
            return Err(PublishError::InFlight);
        }
        let _flight = FlightGuard(&self.in_flight);

        let snapshot = {
            let guard = self.state.lock().await;
            let state = guard.as_ref().ok_or(ValidationError::SessionClosed)?;
            validate_for_publish(&state.draft, Utc::now())?;
            state.draft.clone()
        };

        let timeout_ms = self.publish_timeout.as_millis() as u64;
        let published = match tokio::time::timeout(
            self.publish_timeout,
            self.publisher.publish(&snapshot),
        )
        .await
        {
            Err(_) => {
                warn!(timeout_ms, "publish timed out, draft retained");
                return Err(PublishError::Timeout(timeout_ms));
            }
            Ok(Err(e)) => {
                warn!(error = %e, "publish failed, draft retained");
                return Err(e);
            }
            Ok(Ok(content)) => content,
        };

        *self.state.lock().await = None;
        info!(
            id = %published.id,
            upload_type = %published.draft.upload_type,
            media = published.draft.media.len(),
            "published, session closed"
        );
        Ok(published)
    }

    /// Save the draft on the backend without publishing. Not available for
    /// stories; shares the in-flight flag with `publish`.
    pub async fn save_draft(&self) -> Result<DraftRef, PublishError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("draft save rejected: another submission in flight");
            return Err(PublishError::InFlight);
        }
        let _flight = FlightGuard(&self.in_flight);

        let snapshot = {
            let guard = self.state.lock().await;
            let state = guard.as_ref().ok_or(ValidationError::SessionClosed)?;
            if state.draft.upload_type == UploadType::Story {
                return Err(PublishError::StoryDraft);
            }
            validate_for_draft_save(&state.draft)?;
            state.draft.clone()
        };

        let timeout_ms = self.publish_timeout.as_millis() as u64;
        let saved = match tokio::time::timeout(
            self.publish_timeout,
            self.publisher.save_draft(&snapshot),
        )
        .await
        {
            Err(_) => {
                warn!(timeout_ms, "draft save timed out, draft retained");
                return Err(PublishError::Timeout(timeout_ms));
            }
            Ok(Err(e)) => {
                warn!(error = %e, "draft save failed, draft retained");
                return Err(e);
            }
            Ok(Ok(saved)) => saved,
        };

        *self.state.lock().await = None;
        info!(id = %saved.id, "draft saved, session closed");
        Ok(saved)
    }
}
