//! Implements MediaSource over a local directory.
//!
//! Stands in for the platform file picker: candidates are the files in a
//! configured media directory, classified by extension and sized via
//! filesystem metadata.

use crate::domain::{AcceptPattern, FileInfo, GatewayError, MimeCategory};
use crate::ports::MediaSource;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "gif", "webp", "heic"];
const VIDEO_EXTENSIONS: [&str; 6] = ["mp4", "mov", "webm", "mkv", "avi", "m4v"];

/// Classify a path by extension. None for anything that is not media.
fn mime_for_path(path: &Path) -> Option<MimeCategory> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(MimeCategory::Image)
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(MimeCategory::Video)
    } else {
        None
    }
}

/// Directory-backed media source.
pub struct FsMediaSource {
    media_dir: PathBuf,
}

impl FsMediaSource {
    pub fn new(media_dir: impl Into<PathBuf>) -> Self {
        Self {
            media_dir: media_dir.into(),
        }
    }

    /// Resolve a single path to a candidate. Unsupported extensions and
    /// unreadable files are errors here (unlike the scan, which skips them).
    pub async fn resolve(path: &Path) -> Result<FileInfo, GatewayError> {
        let mime = mime_for_path(path).ok_or_else(|| {
            GatewayError::MediaSource(format!("unsupported file type: {}", path.display()))
        })?;
        let meta = tokio::fs::metadata(path)
            .await
            .map_err(|e| GatewayError::MediaSource(format!("{}: {e}", path.display())))?;
        if !meta.is_file() {
            return Err(GatewayError::MediaSource(format!(
                "not a file: {}",
                path.display()
            )));
        }
        Ok(FileInfo {
            source_handle: path.display().to_string(),
            mime,
            size_bytes: meta.len(),
        })
    }
}

#[async_trait::async_trait]
impl MediaSource for FsMediaSource {
    async fn request_files(
        &self,
        accept: AcceptPattern,
        max_count: usize,
    ) -> Result<Vec<FileInfo>, GatewayError> {
        let mut entries = tokio::fs::read_dir(&self.media_dir).await.map_err(|e| {
            GatewayError::MediaSource(format!("{}: {e}", self.media_dir.display()))
        })?;

        let mut candidates = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| GatewayError::MediaSource(e.to_string()))?
        {
            let path = entry.path();
            let Some(mime) = mime_for_path(&path) else {
                debug!(path = %path.display(), "skipping non-media file");
                continue;
            };
            if !accept.matches(mime) {
                continue;
            }
            match Self::resolve(&path).await {
                Ok(info) => candidates.push(info),
                Err(e) => warn!(path = %path.display(), error = %e, "skipping unreadable file"),
            }
            if candidates.len() >= max_count {
                break;
            }
        }
        // Stable order for predictable prompts
        candidates.sort_by(|a, b| a.source_handle.cmp(&b.source_handle));
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("compose_flow_{name}_{}", std::process::id()));
        let _ = tokio::fs::remove_dir_all(&dir).await;
        tokio::fs::create_dir_all(&dir).await.expect("scratch dir");
        dir
    }

    #[test]
    fn extension_classification() {
        assert_eq!(mime_for_path(Path::new("a.JPG")), Some(MimeCategory::Image));
        assert_eq!(mime_for_path(Path::new("b.mp4")), Some(MimeCategory::Video));
        assert_eq!(mime_for_path(Path::new("c.txt")), None);
        assert_eq!(mime_for_path(Path::new("noext")), None);
    }

    #[tokio::test]
    async fn scan_filters_by_accept_pattern() {
        let dir = scratch_dir("scan").await;
        tokio::fs::write(dir.join("photo.jpg"), b"xx").await.expect("write");
        tokio::fs::write(dir.join("clip.mp4"), b"xxxx").await.expect("write");
        tokio::fs::write(dir.join("notes.txt"), b"x").await.expect("write");

        let source = FsMediaSource::new(&dir);
        let all = source
            .request_files(AcceptPattern::ImagesAndVideos, 10)
            .await
            .expect("scan");
        assert_eq!(all.len(), 2);

        let videos = source
            .request_files(AcceptPattern::VideoOnly, 10)
            .await
            .expect("scan");
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].mime, MimeCategory::Video);
        assert_eq!(videos[0].size_bytes, 4);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn resolve_rejects_unsupported_and_missing() {
        let dir = scratch_dir("resolve").await;
        tokio::fs::write(dir.join("notes.txt"), b"x").await.expect("write");

        assert!(FsMediaSource::resolve(&dir.join("notes.txt")).await.is_err());
        assert!(FsMediaSource::resolve(&dir.join("ghost.jpg")).await.is_err());

        tokio::fs::write(dir.join("real.png"), b"abc").await.expect("write");
        let info = FsMediaSource::resolve(&dir.join("real.png")).await.expect("resolve");
        assert_eq!(info.mime, MimeCategory::Image);
        assert_eq!(info.size_bytes, 3);

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }
}
