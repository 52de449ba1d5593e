use std::collections::HashSet;
use std::path::Path;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::{internal_error, ErrorResponse};

use super::CategorizeState;

#[derive(Debug, Serialize, ToSchema)]
pub struct PendingListResponse {
    /// Archive-relative paths of clips without a categorization
    pub clips: Vec<String>,
}

/// Collect all .mp4 files below the archive root, as forward-slash paths
/// relative to the root. Hidden files and non-UTF-8 names are skipped.
async fn scan_archive(root: &Path) -> std::io::Result<Vec<String>> {
    let mut clips = Vec::new();
    let mut pending_dirs = vec![root.to_path_buf()];

    while let Some(dir) = pending_dirs.pop() {
        let mut entries = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                pending_dirs.push(path);
            } else if path.extension().is_some_and(|ext| ext == "mp4") {
                if let Some(relative) = relative_clip_path(root, &path) {
                    clips.push(relative);
                }
            }
        }
    }

    Ok(clips)
}

fn relative_clip_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let mut parts = Vec::new();
    for component in relative.components() {
        parts.push(component.as_os_str().to_str()?);
    }
    Some(parts.join("/"))
}

/// List clips in the video archive that have not been categorized yet
#[utoipa::path(
    get,
    path = "/api/categorize/pending",
    responses(
        (status = 200, description = "Uncategorized clips", body = PendingListResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "categorize"
)]
pub async fn list_pending(
    State(state): State<CategorizeState>,
) -> Result<Json<PendingListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let all_clips = scan_archive(&state.archive_dir)
        .await
        .map_err(|e| internal_error(format!("Failed to scan video archive: {}", e)))?;

    let categorized: Vec<String> = sqlx::query_scalar("SELECT video FROM categorized_trains")
        .fetch_all(&state.pool)
        .await
        .map_err(|e| internal_error(format!("Database error: {}", e)))?;
    let categorized: HashSet<String> = categorized.into_iter().collect();

    let mut clips: Vec<String> = all_clips
        .into_iter()
        .filter(|clip| !categorized.contains(clip))
        .collect();
    clips.sort();

    Ok(Json(PendingListResponse { clips }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scan_finds_nested_clips() {
        let dir = tempfile::tempdir().unwrap();
        let day = dir.path().join("2025-11-23");
        std::fs::create_dir_all(&day).unwrap();
        std::fs::write(day.join("2025-11-23_09-00-15.mp4"), b"").unwrap();
        std::fs::write(day.join("notes.txt"), b"").unwrap();
        std::fs::write(dir.path().join("loose.mp4"), b"").unwrap();

        let mut clips = scan_archive(dir.path()).await.unwrap();
        clips.sort();
        assert_eq!(
            clips,
            vec![
                "2025-11-23/2025-11-23_09-00-15.mp4".to_string(),
                "loose.mp4".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn scan_empty_archive() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_archive(dir.path()).await.unwrap().is_empty());
    }

    #[test]
    fn relative_paths_use_forward_slashes() {
        let root = Path::new("/archive");
        assert_eq!(
            relative_clip_path(root, Path::new("/archive/2025-11-23/clip.mp4")),
            Some("2025-11-23/clip.mp4".to_string())
        );
    }
}
