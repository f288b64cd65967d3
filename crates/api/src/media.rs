//! Narration audio storage under the configured media root.

use std::path::{Path, PathBuf};

use storyweave_core::types::DbId;

/// Relative path for a narration's audio file under the media root.
pub fn narration_relative_path(narration_id: DbId) -> String {
    format!("narrations/{narration_id}.mp3")
}

/// Write synthesized narration audio to disk, returning the relative path
/// stored on the row.
pub async fn store_narration_audio(
    media_root: &str,
    narration_id: DbId,
    bytes: &[u8],
) -> std::io::Result<String> {
    let relative = narration_relative_path(narration_id);
    let absolute: PathBuf = Path::new(media_root).join(&relative);

    if let Some(parent) = absolute.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(&absolute, bytes).await?;

    tracing::info!(path = %absolute.display(), bytes = bytes.len(), "Narration audio stored");
    Ok(relative)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_path_is_stable() {
        assert_eq!(narration_relative_path(42), "narrations/42.mp3");
    }

    #[tokio::test]
    async fn store_creates_directories_and_file() {
        let root = std::env::temp_dir().join("storyweave-media-test");
        let _ = tokio::fs::remove_dir_all(&root).await;

        let relative = store_narration_audio(root.to_str().unwrap(), 7, b"audio-bytes")
            .await
            .unwrap();
        assert_eq!(relative, "narrations/7.mp3");

        let written = tokio::fs::read(root.join(&relative)).await.unwrap();
        assert_eq!(written, b"audio-bytes");

        let _ = tokio::fs::remove_dir_all(&root).await;
    }
}
