//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. Validation failures block
//! the attempted transition synchronously; publish failures arrive after the
//! async attempt resolves and leave the draft intact for retry.

use crate::domain::entities::{MimeCategory, UploadType};
use thiserror::Error;

/// Why a schedule request was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleIssue {
    /// Stories always publish immediately.
    StoryNotSchedulable,
    /// Date or time missing while enabling.
    IncompleteDateTime,
    /// Resolved datetime is not strictly after the current time.
    NotInFuture,
    /// Resolved datetime is more than the allowed horizon ahead.
    BeyondHorizon,
}

impl std::fmt::Display for ScheduleIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleIssue::StoryNotSchedulable => {
                f.write_str("stories cannot be scheduled and are posted immediately")
            }
            ScheduleIssue::IncompleteDateTime => f.write_str("date and time are both required"),
            ScheduleIssue::NotInFuture => f.write_str("scheduled time must be in the future"),
            ScheduleIssue::BeyondHorizon => {
                f.write_str("scheduled time is more than 30 days ahead")
            }
        }
    }
}

/// Synchronous rule violations. Block the attempted transition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("too many files for {upload_type}: {count} selected, limit is {max}")]
    TooManyFiles {
        upload_type: UploadType,
        count: usize,
        max: usize,
    },

    #[error("no files selected")]
    NoFilesSelected,

    #[error("{upload_type} requires video media, got {category}")]
    WrongMediaType {
        upload_type: UploadType,
        category: MimeCategory,
    },

    #[error("caption is {len} characters, limit for {upload_type} is {max}")]
    CaptionTooLong {
        upload_type: UploadType,
        len: usize,
        max: usize,
    },

    #[error("invalid schedule: {reason}")]
    InvalidSchedule { reason: ScheduleIssue },

    #[error("visibility value does not apply to {upload_type}")]
    VisibilityNotApplicable { upload_type: UploadType },

    #[error("media index {index} out of range (len {len})")]
    MediaIndexOutOfRange { index: usize, len: usize },

    #[error("current step is incomplete, cannot advance")]
    StepIncomplete,

    #[error("cannot jump forward past the next step")]
    ForwardJumpBlocked,

    #[error("session already closed, draft was discarded")]
    SessionClosed,
}

/// Asynchronous submission failures. The draft is retained so the user may retry.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("submission rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error("backend failure: {0}")]
    Backend(String),

    #[error("submission timed out after {0} ms")]
    Timeout(u64),

    #[error("another submission is already in flight for this draft")]
    InFlight,

    #[error("stories cannot be saved as drafts")]
    StoryDraft,
}

/// Infrastructure failures from collaborator adapters (picker, directory, shell).
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("media source error: {0}")]
    MediaSource(String),

    #[error("directory lookup error: {0}")]
    Directory(String),

    #[error("prompt error: {0}")]
    Prompt(String),
}
