//! Workflow rules: step ordering, the draft action reducer, and the
//! per-stage validation used by the session.
//!
//! Every draft mutation goes through [`CompositionDraft::apply`] so resets
//! (like the upload-type switch wiping media) are explicit transitions,
//! not incidental side effects.

use crate::domain::entities::{
    Adjustments, CompositionDraft, FileInfo, Filter, LocationRef, MediaItem, MimeCategory,
    PostVisibility, PrivacyConfig, PrivacyToggle, ScheduleConfig, StoryVisibility, Timezone,
    UploadType, UserRef,
};
use crate::domain::errors::{ScheduleIssue, ValidationError};
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Furthest ahead a post may be scheduled, in days.
pub const SCHEDULE_HORIZON_DAYS: i64 = 30;

/// One stage of the composition workflow, totally ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStep {
    Upload,
    Edit,
    Details,
    Publish,
}

impl WorkflowStep {
    pub const ALL: [WorkflowStep; 4] = [
        WorkflowStep::Upload,
        WorkflowStep::Edit,
        WorkflowStep::Details,
        WorkflowStep::Publish,
    ];

    pub fn index(self) -> usize {
        match self {
            WorkflowStep::Upload => 0,
            WorkflowStep::Edit => 1,
            WorkflowStep::Details => 2,
            WorkflowStep::Publish => 3,
        }
    }

    /// Next step in sequence, None at the end.
    pub fn next(self) -> Option<WorkflowStep> {
        WorkflowStep::ALL.get(self.index() + 1).copied()
    }

    /// Previous step in sequence, None at the start.
    pub fn prev(self) -> Option<WorkflowStep> {
        self.index().checked_sub(1).map(|i| WorkflowStep::ALL[i])
    }

    pub fn label(self) -> &'static str {
        match self {
            WorkflowStep::Upload => "Upload",
            WorkflowStep::Edit => "Edit",
            WorkflowStep::Details => "Details",
            WorkflowStep::Publish => "Publish",
        }
    }
}

impl std::fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether the given step's completion requirements are met, i.e. forward
/// navigation out of it is allowed. Upload needs media; Edit and Details
/// have no mandatory fields; Publish has no forward step.
pub fn can_advance(step: WorkflowStep, draft: &CompositionDraft) -> bool {
    match step {
        WorkflowStep::Upload => !draft.media.is_empty(),
        WorkflowStep::Edit | WorkflowStep::Details => true,
        WorkflowStep::Publish => false,
    }
}

/// Count and mime rules shared by file selection and the reducer.
fn check_counts_and_types(
    upload_type: UploadType,
    mimes: &[MimeCategory],
) -> Result<(), ValidationError> {
    if mimes.is_empty() {
        return Err(ValidationError::NoFilesSelected);
    }
    let max = upload_type.max_media();
    if mimes.len() > max {
        return Err(ValidationError::TooManyFiles {
            upload_type,
            count: mimes.len(),
            max,
        });
    }
    let accept = upload_type.accept();
    for &mime in mimes {
        if !accept.matches(mime) {
            return Err(ValidationError::WrongMediaType {
                upload_type,
                category: mime,
            });
        }
    }
    Ok(())
}

/// Validate a picker selection against the per-type limits before any item
/// is minted. Rejection leaves the draft's media untouched.
pub fn validate_selection(
    upload_type: UploadType,
    files: &[FileInfo],
) -> Result<(), ValidationError> {
    let mimes: Vec<MimeCategory> = files.iter().map(|f| f.mime).collect();
    check_counts_and_types(upload_type, &mimes)
}

/// Publish precondition: non-empty media, and a reel's single item must be video.
pub fn can_publish(draft: &CompositionDraft) -> bool {
    if draft.media.is_empty() {
        return false;
    }
    if draft.upload_type == UploadType::Reel {
        return draft.media[0].mime == MimeCategory::Video;
    }
    true
}

/// Full validation run before submitting to the backend. Re-checks the
/// schedule against the current time so a stale "in one hour" pick cannot
/// slip into the past while the user lingered on the publish step.
pub fn validate_for_publish(
    draft: &CompositionDraft,
    now: DateTime<Utc>,
) -> Result<(), ValidationError> {
    let mimes: Vec<MimeCategory> = draft.media.iter().map(|m| m.mime).collect();
    check_counts_and_types(draft.upload_type, &mimes)?;
    check_caption(draft.upload_type, &draft.caption)?;
    if draft.schedule.enabled {
        let (date, time) = schedule_parts(&draft.schedule)?;
        validate_schedule(draft.upload_type, date, time, draft.schedule.timezone, now)?;
    }
    Ok(())
}

/// Draft-save precondition: non-empty media only. Type-specific output
/// rules (reel video) are deliberately not applied to drafts.
pub fn validate_for_draft_save(draft: &CompositionDraft) -> Result<(), ValidationError> {
    if draft.media.is_empty() {
        return Err(ValidationError::NoFilesSelected);
    }
    Ok(())
}

fn check_caption(upload_type: UploadType, caption: &str) -> Result<(), ValidationError> {
    let max = upload_type.caption_limit();
    let len = caption.chars().count();
    if len > max {
        return Err(ValidationError::CaptionTooLong {
            upload_type,
            len,
            max,
        });
    }
    Ok(())
}

fn schedule_parts(schedule: &ScheduleConfig) -> Result<(NaiveDate, NaiveTime), ValidationError> {
    match (schedule.date, schedule.time) {
        (Some(d), Some(t)) => Ok((d, t)),
        _ => Err(ValidationError::InvalidSchedule {
            reason: ScheduleIssue::IncompleteDateTime,
        }),
    }
}

/// Resolve a wall-clock date/time in the configured timezone to UTC.
pub fn resolve_schedule(date: NaiveDate, time: NaiveTime, timezone: Timezone) -> DateTime<Utc> {
    let local = NaiveDateTime::new(date, time);
    // local = utc + offset, so utc = local - offset
    let utc_naive = local - Duration::hours(i64::from(timezone.utc_offset_hours()));
    DateTime::<Utc>::from_naive_utc_and_offset(utc_naive, Utc)
}

/// Schedule rules: never for stories, strictly in the future, within the
/// 30-day horizon.
pub fn validate_schedule(
    upload_type: UploadType,
    date: NaiveDate,
    time: NaiveTime,
    timezone: Timezone,
    now: DateTime<Utc>,
) -> Result<(), ValidationError> {
    if upload_type == UploadType::Story {
        return Err(ValidationError::InvalidSchedule {
            reason: ScheduleIssue::StoryNotSchedulable,
        });
    }
    let resolved = resolve_schedule(date, time, timezone);
    if resolved <= now {
        return Err(ValidationError::InvalidSchedule {
            reason: ScheduleIssue::NotInFuture,
        });
    }
    if resolved > now + Duration::days(SCHEDULE_HORIZON_DAYS) {
        return Err(ValidationError::InvalidSchedule {
            reason: ScheduleIssue::BeyondHorizon,
        });
    }
    Ok(())
}

/// Every way a draft can change. The session dispatches these; nothing
/// else mutates a draft.
#[derive(Debug, Clone)]
pub enum DraftAction {
    /// Switch content type. Resets media and privacy shape; disables any
    /// schedule when switching to a story; re-caps the caption.
    SetUploadType(UploadType),
    /// Replace the media list with already-validated items.
    SelectMedia(Vec<MediaItem>),
    RemoveMedia(usize),
    SetCaption(String),
    SetLocation(LocationRef),
    ClearLocation,
    /// Idempotent by user id.
    TagUser(UserRef),
    /// No-op when the id is not tagged.
    UntagUser(u64),
    SetPostVisibility(PostVisibility),
    SetStoryVisibility(StoryVisibility),
    /// Toggles that do not apply to the current privacy shape are ignored.
    SetPrivacyToggle(PrivacyToggle, bool),
    EnableSchedule {
        date: NaiveDate,
        time: NaiveTime,
        timezone: Timezone,
    },
    DisableSchedule,
    SetFilter(Filter),
    SetAdjustments(Adjustments),
}

impl CompositionDraft {
    /// Apply one action, validating against the current time where relevant.
    /// On error the draft is left unchanged.
    pub fn apply(&mut self, action: DraftAction, now: DateTime<Utc>) -> Result<(), ValidationError> {
        match action {
            DraftAction::SetUploadType(upload_type) => {
                self.upload_type = upload_type;
                self.media.clear();
                self.privacy = PrivacyConfig::default_for(upload_type);
                if upload_type == UploadType::Story {
                    self.schedule = ScheduleConfig::default();
                }
                let max = upload_type.caption_limit();
                if self.caption.chars().count() > max {
                    self.caption = self.caption.chars().take(max).collect();
                }
                Ok(())
            }
            DraftAction::SelectMedia(items) => {
                let mimes: Vec<MimeCategory> = items.iter().map(|m| m.mime).collect();
                check_counts_and_types(self.upload_type, &mimes)?;
                self.media = items;
                Ok(())
            }
            DraftAction::RemoveMedia(index) => {
                if index >= self.media.len() {
                    return Err(ValidationError::MediaIndexOutOfRange {
                        index,
                        len: self.media.len(),
                    });
                }
                self.media.remove(index);
                Ok(())
            }
            DraftAction::SetCaption(caption) => {
                check_caption(self.upload_type, &caption)?;
                self.caption = caption;
                Ok(())
            }
            DraftAction::SetLocation(location) => {
                self.location = Some(location);
                Ok(())
            }
            DraftAction::ClearLocation => {
                self.location = None;
                Ok(())
            }
            DraftAction::TagUser(user) => {
                if !self.tagged_users.iter().any(|u| u.id == user.id) {
                    self.tagged_users.push(user);
                }
                Ok(())
            }
            DraftAction::UntagUser(id) => {
                self.tagged_users.retain(|u| u.id != id);
                Ok(())
            }
            DraftAction::SetPostVisibility(visibility) => match &mut self.privacy {
                PrivacyConfig::Post(p) => {
                    p.visibility = visibility;
                    Ok(())
                }
                PrivacyConfig::Story(_) => Err(ValidationError::VisibilityNotApplicable {
                    upload_type: self.upload_type,
                }),
            },
            DraftAction::SetStoryVisibility(visibility) => match &mut self.privacy {
                PrivacyConfig::Story(s) => {
                    s.visibility = visibility;
                    Ok(())
                }
                PrivacyConfig::Post(_) => Err(ValidationError::VisibilityNotApplicable {
                    upload_type: self.upload_type,
                }),
            },
            DraftAction::SetPrivacyToggle(toggle, value) => {
                self.set_privacy_toggle(toggle, value);
                Ok(())
            }
            DraftAction::EnableSchedule {
                date,
                time,
                timezone,
            } => {
                validate_schedule(self.upload_type, date, time, timezone, now)?;
                self.schedule = ScheduleConfig {
                    enabled: true,
                    date: Some(date),
                    time: Some(time),
                    timezone,
                };
                Ok(())
            }
            DraftAction::DisableSchedule => {
                self.schedule.enabled = false;
                Ok(())
            }
            DraftAction::SetFilter(filter) => {
                self.filter = filter;
                Ok(())
            }
            DraftAction::SetAdjustments(adjustments) => {
                self.adjustments = adjustments.clamped();
                Ok(())
            }
        }
    }

    fn set_privacy_toggle(&mut self, toggle: PrivacyToggle, value: bool) {
        match (&mut self.privacy, toggle) {
            (PrivacyConfig::Post(p), PrivacyToggle::AllowComments) => p.allow_comments = value,
            (PrivacyConfig::Post(p), PrivacyToggle::AllowSharing) => p.allow_sharing = value,
            (PrivacyConfig::Post(p), PrivacyToggle::ShowLikeCount) => p.show_like_count = value,
            (PrivacyConfig::Post(p), PrivacyToggle::HideFromExplore) => p.hide_from_explore = value,
            (PrivacyConfig::Story(s), PrivacyToggle::AllowReplies) => s.allow_replies = value,
            (PrivacyConfig::Story(s), PrivacyToggle::AllowStorySharing) => {
                s.allow_story_sharing = value
            }
            // Not applicable to the current shape: ignored, not an error.
            _ => debug!(?toggle, upload_type = %self.upload_type, "privacy toggle not applicable, ignoring"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn img(id: u64) -> MediaItem {
        MediaItem {
            id,
            source_handle: format!("img_{id}.jpg"),
            mime: MimeCategory::Image,
            size_bytes: 1024,
        }
    }

    fn vid(id: u64) -> MediaItem {
        MediaItem {
            id,
            source_handle: format!("vid_{id}.mp4"),
            mime: MimeCategory::Video,
            size_bytes: 4096,
        }
    }

    fn file(mime: MimeCategory) -> FileInfo {
        FileInfo {
            source_handle: "f".into(),
            mime,
            size_bytes: 10,
        }
    }

    fn user(id: u64) -> UserRef {
        UserRef {
            id,
            username: format!("user_{id}"),
            display_name: format!("User {id}"),
            following: false,
        }
    }

    fn now() -> DateTime<Utc> {
        "2025-06-15T12:00:00Z".parse().expect("fixed now")
    }

    #[test]
    fn step_order_and_bounds() {
        assert_eq!(WorkflowStep::Upload.next(), Some(WorkflowStep::Edit));
        assert_eq!(WorkflowStep::Details.next(), Some(WorkflowStep::Publish));
        assert_eq!(WorkflowStep::Publish.next(), None);
        assert_eq!(WorkflowStep::Upload.prev(), None);
        assert_eq!(WorkflowStep::Publish.prev(), Some(WorkflowStep::Details));
        assert!(WorkflowStep::Upload < WorkflowStep::Publish);
    }

    #[test]
    fn upload_step_gated_on_media() {
        let mut draft = CompositionDraft::new(UploadType::Post);
        assert!(!can_advance(WorkflowStep::Upload, &draft));
        draft.media.push(img(1));
        assert!(can_advance(WorkflowStep::Upload, &draft));
        assert!(can_advance(WorkflowStep::Edit, &draft));
        assert!(can_advance(WorkflowStep::Details, &draft));
        assert!(!can_advance(WorkflowStep::Publish, &draft));
    }

    #[test]
    fn selection_count_caps_per_type() {
        let ten: Vec<FileInfo> = (0..10).map(|_| file(MimeCategory::Image)).collect();
        let eleven: Vec<FileInfo> = (0..11).map(|_| file(MimeCategory::Image)).collect();
        assert!(validate_selection(UploadType::Post, &ten).is_ok());
        assert!(matches!(
            validate_selection(UploadType::Post, &eleven),
            Err(ValidationError::TooManyFiles { max: 10, .. })
        ));

        let two: Vec<FileInfo> = (0..2).map(|_| file(MimeCategory::Image)).collect();
        assert!(matches!(
            validate_selection(UploadType::Story, &two),
            Err(ValidationError::TooManyFiles { max: 1, .. })
        ));
        assert!(matches!(
            validate_selection(UploadType::Reel, &[file(MimeCategory::Video), file(MimeCategory::Video)]),
            Err(ValidationError::TooManyFiles { max: 1, .. })
        ));
        assert!(matches!(
            validate_selection(UploadType::Post, &[]),
            Err(ValidationError::NoFilesSelected)
        ));
    }

    #[test]
    fn reel_rejects_non_video() {
        assert!(matches!(
            validate_selection(UploadType::Reel, &[file(MimeCategory::Image)]),
            Err(ValidationError::WrongMediaType { .. })
        ));
        assert!(validate_selection(UploadType::Reel, &[file(MimeCategory::Video)]).is_ok());
    }

    #[test]
    fn can_publish_requires_video_for_reel() {
        let mut draft = CompositionDraft::new(UploadType::Reel);
        assert!(!can_publish(&draft));
        draft.media.push(img(1));
        assert!(!can_publish(&draft));
        draft.media.clear();
        draft.media.push(vid(2));
        assert!(can_publish(&draft));
    }

    #[test]
    fn tag_then_untag_restores_prior_state() {
        let mut draft = CompositionDraft::new(UploadType::Post);
        draft.apply(DraftAction::TagUser(user(7)), now()).expect("tag");
        let before = draft.tagged_users.clone();
        draft.apply(DraftAction::TagUser(user(42)), now()).expect("tag");
        draft.apply(DraftAction::UntagUser(42), now()).expect("untag");
        assert_eq!(
            draft.tagged_users.iter().map(|u| u.id).collect::<Vec<_>>(),
            before.iter().map(|u| u.id).collect::<Vec<_>>()
        );
    }

    #[test]
    fn tagging_is_idempotent_by_id() {
        let mut draft = CompositionDraft::new(UploadType::Post);
        draft.apply(DraftAction::TagUser(user(7)), now()).expect("tag");
        draft.apply(DraftAction::TagUser(user(7)), now()).expect("tag again");
        assert_eq!(draft.tagged_users.len(), 1);
        // untag of an absent id is a no-op
        draft.apply(DraftAction::UntagUser(99), now()).expect("untag absent");
        assert_eq!(draft.tagged_users.len(), 1);
    }

    #[test]
    fn upload_type_switch_resets_media_and_privacy() {
        let mut draft = CompositionDraft::new(UploadType::Post);
        draft
            .apply(DraftAction::SelectMedia(vec![img(1), img(2)]), now())
            .expect("select");
        draft
            .apply(DraftAction::SetPostVisibility(PostVisibility::Private), now())
            .expect("visibility");
        draft
            .apply(DraftAction::SetUploadType(UploadType::Story), now())
            .expect("switch");
        assert!(draft.media.is_empty());
        assert!(matches!(draft.privacy, PrivacyConfig::Story(_)));
        assert!(!draft.schedule.enabled);
    }

    #[test]
    fn story_switch_caps_caption() {
        let mut draft = CompositionDraft::new(UploadType::Post);
        let long = "x".repeat(500);
        draft.apply(DraftAction::SetCaption(long), now()).expect("caption");
        draft
            .apply(DraftAction::SetUploadType(UploadType::Story), now())
            .expect("switch");
        assert_eq!(draft.caption.chars().count(), 100);
    }

    #[test]
    fn caption_caps_per_type() {
        let mut story = CompositionDraft::new(UploadType::Story);
        assert!(matches!(
            story.apply(DraftAction::SetCaption("x".repeat(101)), now()),
            Err(ValidationError::CaptionTooLong { max: 100, .. })
        ));
        assert!(story.apply(DraftAction::SetCaption("x".repeat(100)), now()).is_ok());

        let mut post = CompositionDraft::new(UploadType::Post);
        assert!(post.apply(DraftAction::SetCaption("x".repeat(2200)), now()).is_ok());
        assert!(matches!(
            post.apply(DraftAction::SetCaption("x".repeat(2201)), now()),
            Err(ValidationError::CaptionTooLong { max: 2200, .. })
        ));
    }

    #[test]
    fn visibility_shape_mismatch_rejected() {
        let mut story = CompositionDraft::new(UploadType::Story);
        assert!(matches!(
            story.apply(DraftAction::SetPostVisibility(PostVisibility::Public), now()),
            Err(ValidationError::VisibilityNotApplicable { .. })
        ));
        assert!(story
            .apply(DraftAction::SetStoryVisibility(StoryVisibility::CloseFriends), now())
            .is_ok());
    }

    #[test]
    fn inapplicable_toggle_is_ignored() {
        let mut story = CompositionDraft::new(UploadType::Story);
        let before = story.privacy.clone();
        story
            .apply(DraftAction::SetPrivacyToggle(PrivacyToggle::AllowComments, false), now())
            .expect("ignored toggle");
        assert_eq!(story.privacy, before);

        story
            .apply(DraftAction::SetPrivacyToggle(PrivacyToggle::AllowReplies, false), now())
            .expect("applicable toggle");
        match &story.privacy {
            PrivacyConfig::Story(s) => assert!(!s.allow_replies),
            _ => panic!("story privacy expected"),
        }
    }

    #[test]
    fn schedule_must_be_in_future() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).expect("date");
        let past = NaiveTime::from_hms_opt(11, 0, 0).expect("time");
        assert!(matches!(
            validate_schedule(UploadType::Post, date, past, Timezone::Utc, now()),
            Err(ValidationError::InvalidSchedule {
                reason: ScheduleIssue::NotInFuture
            })
        ));
        // exactly now is not strictly after now
        let at_now = NaiveTime::from_hms_opt(12, 0, 0).expect("time");
        assert!(matches!(
            validate_schedule(UploadType::Post, date, at_now, Timezone::Utc, now()),
            Err(ValidationError::InvalidSchedule {
                reason: ScheduleIssue::NotInFuture
            })
        ));
        let future = NaiveTime::from_hms_opt(13, 0, 0).expect("time");
        assert!(validate_schedule(UploadType::Post, date, future, Timezone::Utc, now()).is_ok());
    }

    #[test]
    fn schedule_respects_timezone_offset() {
        // 08:00 Eastern = 13:00 UTC, one hour after the fixed now
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).expect("date");
        let time = NaiveTime::from_hms_opt(8, 0, 0).expect("time");
        assert!(validate_schedule(UploadType::Post, date, time, Timezone::Eastern, now()).is_ok());
        // 08:00 UTC is already in the past
        assert!(validate_schedule(UploadType::Post, date, time, Timezone::Utc, now()).is_err());
    }

    #[test]
    fn schedule_horizon_is_thirty_days() {
        let time = NaiveTime::from_hms_opt(12, 0, 0).expect("time");
        let inside = NaiveDate::from_ymd_opt(2025, 7, 15).expect("date");
        assert!(validate_schedule(UploadType::Post, inside, time, Timezone::Utc, now()).is_ok());
        let outside = NaiveDate::from_ymd_opt(2025, 7, 16).expect("date");
        assert!(matches!(
            validate_schedule(UploadType::Post, outside, time, Timezone::Utc, now()),
            Err(ValidationError::InvalidSchedule {
                reason: ScheduleIssue::BeyondHorizon
            })
        ));
    }

    #[test]
    fn story_schedule_always_rejected() {
        let mut story = CompositionDraft::new(UploadType::Story);
        let tomorrow = NaiveDate::from_ymd_opt(2025, 6, 16).expect("date");
        let nine = NaiveTime::from_hms_opt(9, 0, 0).expect("time");
        let err = story
            .apply(
                DraftAction::EnableSchedule {
                    date: tomorrow,
                    time: nine,
                    timezone: Timezone::Eastern,
                },
                now(),
            )
            .expect_err("stories cannot schedule");
        assert!(matches!(
            err,
            ValidationError::InvalidSchedule {
                reason: ScheduleIssue::StoryNotSchedulable
            }
        ));
        assert!(!story.schedule.enabled);
    }

    #[test]
    fn enable_schedule_records_parts() {
        let mut post = CompositionDraft::new(UploadType::Post);
        let date = NaiveDate::from_ymd_opt(2025, 6, 20).expect("date");
        let time = NaiveTime::from_hms_opt(9, 0, 0).expect("time");
        post.apply(
            DraftAction::EnableSchedule {
                date,
                time,
                timezone: Timezone::Pacific,
            },
            now(),
        )
        .expect("schedule");
        assert!(post.schedule.enabled);
        assert_eq!(post.schedule.date, Some(date));
        assert_eq!(post.schedule.timezone, Timezone::Pacific);

        post.apply(DraftAction::DisableSchedule, now()).expect("disable");
        assert!(!post.schedule.enabled);
    }

    #[test]
    fn stale_schedule_fails_publish_validation() {
        let mut post = CompositionDraft::new(UploadType::Post);
        post.apply(DraftAction::SelectMedia(vec![img(1)]), now()).expect("select");
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).expect("date");
        let soon = NaiveTime::from_hms_opt(12, 30, 0).expect("time");
        post.apply(
            DraftAction::EnableSchedule {
                date,
                time: soon,
                timezone: Timezone::Utc,
            },
            now(),
        )
        .expect("schedule");
        // an hour later the pick is in the past
        let later = now() + Duration::hours(1);
        assert!(matches!(
            validate_for_publish(&post, later),
            Err(ValidationError::InvalidSchedule {
                reason: ScheduleIssue::NotInFuture
            })
        ));
    }

    #[test]
    fn remove_media_bounds_checked() {
        let mut draft = CompositionDraft::new(UploadType::Post);
        draft.apply(DraftAction::SelectMedia(vec![img(1)]), now()).expect("select");
        assert!(matches!(
            draft.apply(DraftAction::RemoveMedia(3), now()),
            Err(ValidationError::MediaIndexOutOfRange { index: 3, len: 1 })
        ));
        draft.apply(DraftAction::RemoveMedia(0), now()).expect("remove");
        assert!(draft.media.is_empty());
    }

    #[test]
    fn adjustments_clamped_on_apply() {
        let mut draft = CompositionDraft::new(UploadType::Post);
        draft
            .apply(
                DraftAction::SetAdjustments(Adjustments {
                    brightness: 120,
                    contrast: -120,
                    saturation: 10,
                    warmth: 0,
                    vignette: 250,
                }),
                now(),
            )
            .expect("adjustments");
        assert_eq!(draft.adjustments.brightness, 50);
        assert_eq!(draft.adjustments.contrast, -50);
        assert_eq!(draft.adjustments.vignette, 100);
    }

    #[test]
    fn draft_save_needs_media_only() {
        let mut reel = CompositionDraft::new(UploadType::Reel);
        assert!(validate_for_draft_save(&reel).is_err());
        // a reel draft with an image is saveable even though it cannot publish
        reel.media.push(img(1));
        assert!(validate_for_draft_save(&reel).is_ok());
        assert!(!can_publish(&reel));
    }
}
