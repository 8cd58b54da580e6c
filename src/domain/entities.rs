//! Domain entities. Pure data structures for the composition workflow.
//!
//! No picker/backend/IO types here — these are mapped from adapters.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// What kind of content the draft will become. Drives every per-type limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadType {
    Post,
    Story,
    Reel,
}

impl UploadType {
    /// Maximum number of media items a draft of this type may carry.
    pub fn max_media(self) -> usize {
        match self {
            UploadType::Post => 10,
            UploadType::Story | UploadType::Reel => 1,
        }
    }

    /// Caption length cap in characters.
    pub fn caption_limit(self) -> usize {
        match self {
            UploadType::Story => 100,
            UploadType::Post | UploadType::Reel => 2200,
        }
    }

    /// Mime filter the file picker should offer for this type.
    pub fn accept(self) -> AcceptPattern {
        match self {
            UploadType::Reel => AcceptPattern::VideoOnly,
            UploadType::Post | UploadType::Story => AcceptPattern::ImagesAndVideos,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            UploadType::Post => "Post",
            UploadType::Story => "Story",
            UploadType::Reel => "Reel",
        }
    }
}

impl std::fmt::Display for UploadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Coarse media classification. Concrete codecs are out of scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MimeCategory {
    Image,
    Video,
}

impl std::fmt::Display for MimeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MimeCategory::Image => f.write_str("image"),
            MimeCategory::Video => f.write_str("video"),
        }
    }
}

/// Mime filter passed to the media ingestion port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptPattern {
    ImagesAndVideos,
    VideoOnly,
}

impl AcceptPattern {
    pub fn matches(self, category: MimeCategory) -> bool {
        match self {
            AcceptPattern::ImagesAndVideos => true,
            AcceptPattern::VideoOnly => category == MimeCategory::Video,
        }
    }
}

/// A candidate file offered by the picker, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileInfo {
    /// Opaque handle the adapter can resolve for preview/upload (e.g. a path).
    pub source_handle: String,
    pub mime: MimeCategory,
    pub size_bytes: u64,
}

/// One accepted media item within a draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: u64,
    pub source_handle: String,
    pub mime: MimeCategory,
    pub size_bytes: u64,
}

impl MediaItem {
    /// Mint an item from an accepted candidate.
    pub fn from_file(id: u64, file: FileInfo) -> Self {
        Self {
            id,
            source_handle: file.source_handle,
            mime: file.mime,
            size_bytes: file.size_bytes,
        }
    }
}

/// A taggable user, resolved by the directory port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRef {
    pub id: u64,
    pub username: String,
    pub display_name: String,
    pub following: bool,
}

/// A taggable place, resolved by the directory port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRef {
    pub id: u64,
    pub name: String,
    pub address: String,
}

/// Who can see a post or reel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostVisibility {
    Public,
    Followers,
    CloseFriends,
    Private,
}

/// Who can see a story. Disjoint from post visibility on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryVisibility {
    AllFollowers,
    CloseFriends,
    Custom,
}

/// Privacy settings for posts and reels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPrivacy {
    pub visibility: PostVisibility,
    pub allow_comments: bool,
    pub allow_sharing: bool,
    pub show_like_count: bool,
    pub hide_from_explore: bool,
}

impl Default for PostPrivacy {
    fn default() -> Self {
        Self {
            visibility: PostVisibility::Public,
            allow_comments: true,
            allow_sharing: true,
            show_like_count: true,
            hide_from_explore: false,
        }
    }
}

/// Privacy settings for stories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryPrivacy {
    pub visibility: StoryVisibility,
    pub allow_replies: bool,
    pub allow_story_sharing: bool,
}

impl Default for StoryPrivacy {
    fn default() -> Self {
        Self {
            visibility: StoryVisibility::AllFollowers,
            allow_replies: true,
            allow_story_sharing: true,
        }
    }
}

/// Tagged union: each upload type only carries the fields that apply to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PrivacyConfig {
    Post(PostPrivacy),
    Story(StoryPrivacy),
}

impl PrivacyConfig {
    /// Default privacy shape for the given upload type. Reels share the post shape.
    pub fn default_for(upload_type: UploadType) -> Self {
        match upload_type {
            UploadType::Story => PrivacyConfig::Story(StoryPrivacy::default()),
            UploadType::Post | UploadType::Reel => PrivacyConfig::Post(PostPrivacy::default()),
        }
    }

    pub fn visibility_label(&self) -> &'static str {
        match self {
            PrivacyConfig::Post(p) => match p.visibility {
                PostVisibility::Public => "Public",
                PostVisibility::Followers => "Followers",
                PostVisibility::CloseFriends => "Close Friends",
                PostVisibility::Private => "Only Me",
            },
            PrivacyConfig::Story(s) => match s.visibility {
                StoryVisibility::AllFollowers => "All Followers",
                StoryVisibility::CloseFriends => "Close Friends",
                StoryVisibility::Custom => "Custom",
            },
        }
    }
}

/// Boolean privacy switches. Applicability depends on the privacy shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyToggle {
    AllowComments,
    AllowSharing,
    ShowLikeCount,
    HideFromExplore,
    AllowReplies,
    AllowStorySharing,
}

/// Supported timezones for scheduling. Fixed standard-time offsets; DST is not modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timezone {
    Eastern,
    Central,
    Mountain,
    Pacific,
    Utc,
}

impl Timezone {
    /// Hours offset from UTC.
    pub fn utc_offset_hours(self) -> i32 {
        match self {
            Timezone::Eastern => -5,
            Timezone::Central => -6,
            Timezone::Mountain => -7,
            Timezone::Pacific => -8,
            Timezone::Utc => 0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Timezone::Eastern => "Eastern Time (ET)",
            Timezone::Central => "Central Time (CT)",
            Timezone::Mountain => "Mountain Time (MT)",
            Timezone::Pacific => "Pacific Time (PT)",
            Timezone::Utc => "UTC",
        }
    }

    pub const ALL: [Timezone; 5] = [
        Timezone::Eastern,
        Timezone::Central,
        Timezone::Mountain,
        Timezone::Pacific,
        Timezone::Utc,
    ];
}

impl std::fmt::Display for Timezone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Optional delayed publishing. Stories can never be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    pub enabled: bool,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub timezone: Timezone,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            date: None,
            time: None,
            timezone: Timezone::Eastern,
        }
    }
}

/// Cosmetic filter presets. No semantic invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    None,
    Vintage,
    Dramatic,
    Bright,
    Warm,
    Cool,
    Mono,
    Fade,
    Sharp,
}

impl Filter {
    pub fn name(self) -> &'static str {
        match self {
            Filter::None => "Original",
            Filter::Vintage => "Vintage",
            Filter::Dramatic => "Dramatic",
            Filter::Bright => "Bright",
            Filter::Warm => "Warm",
            Filter::Cool => "Cool",
            Filter::Mono => "Mono",
            Filter::Fade => "Fade",
            Filter::Sharp => "Sharp",
        }
    }

    pub const ALL: [Filter; 9] = [
        Filter::None,
        Filter::Vintage,
        Filter::Dramatic,
        Filter::Bright,
        Filter::Warm,
        Filter::Cool,
        Filter::Mono,
        Filter::Fade,
        Filter::Sharp,
    ];
}

/// Manual tone adjustments, clamped on write. Cosmetic metadata only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Adjustments {
    pub brightness: i8,
    pub contrast: i8,
    pub saturation: i8,
    pub warmth: i8,
    pub vignette: u8,
}

impl Adjustments {
    /// Clamp every control into its valid range (-50..=50, vignette 0..=100).
    pub fn clamped(self) -> Self {
        Self {
            brightness: self.brightness.clamp(-50, 50),
            contrast: self.contrast.clamp(-50, 50),
            saturation: self.saturation.clamp(-50, 50),
            warmth: self.warmth.clamp(-50, 50),
            vignette: self.vignette.min(100),
        }
    }
}

/// Aggregate root for one in-progress composition. Mutated only through
/// the action reducer in the workflow module.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositionDraft {
    pub upload_type: UploadType,
    pub media: Vec<MediaItem>,
    pub caption: String,
    pub location: Option<LocationRef>,
    pub tagged_users: Vec<UserRef>,
    pub privacy: PrivacyConfig,
    pub schedule: ScheduleConfig,
    pub filter: Filter,
    pub adjustments: Adjustments,
}

impl CompositionDraft {
    /// Fresh draft for the chosen upload type.
    pub fn new(upload_type: UploadType) -> Self {
        Self {
            upload_type,
            media: Vec::new(),
            caption: String::new(),
            location: None,
            tagged_users: Vec::new(),
            privacy: PrivacyConfig::default_for(upload_type),
            schedule: ScheduleConfig::default(),
            filter: Filter::default(),
            adjustments: Adjustments::default(),
        }
    }

    /// Total size of all selected media in bytes.
    pub fn total_media_bytes(&self) -> u64 {
        self.media.iter().map(|m| m.size_bytes).sum()
    }
}

/// Accepted submission, returned by the publisher backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishedContent {
    pub id: String,
    pub published_at: DateTime<Utc>,
    pub draft: CompositionDraft,
}

impl PublishedContent {
    /// Human-readable outcome for the hosting shell.
    pub fn status_message(&self) -> String {
        if self.draft.schedule.enabled {
            format!("{} scheduled successfully!", self.draft.upload_type)
        } else {
            format!("{} published successfully!", self.draft.upload_type)
        }
    }
}

/// Saved-draft receipt, returned by the publisher backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftRef {
    pub id: String,
    pub saved_at: DateTime<Utc>,
}

impl DraftRef {
    pub fn status_message(&self) -> String {
        "Draft saved successfully!".to_string()
    }
}
