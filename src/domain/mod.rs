//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod caption;
pub mod entities;
pub mod errors;
pub mod workflow;

pub use entities::{
    AcceptPattern, Adjustments, CompositionDraft, DraftRef, FileInfo, Filter, LocationRef,
    MediaItem, MimeCategory, PostPrivacy, PostVisibility, PrivacyConfig, PrivacyToggle,
    PublishedContent, ScheduleConfig, StoryPrivacy, StoryVisibility, Timezone, UploadType, UserRef,
};
pub use errors::{GatewayError, PublishError, ScheduleIssue, ValidationError};
pub use workflow::{
    DraftAction, WorkflowStep, can_advance, can_publish, validate_for_draft_save,
    validate_for_publish, validate_schedule, validate_selection,
};
