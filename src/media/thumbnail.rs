//! On-demand clip thumbnails, generated with ffmpegthumbnailer and
//! cached on disk under a directory tree parallel to the archive.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use std::path::PathBuf;
use tokio::process::Command;
use tracing::{debug, info};

use super::{resolve_relative, MediaError, MediaState, CACHE_CONTROL_IMMUTABLE};

/// Seek offset used when grabbing the thumbnail frame. Clips begin with
/// the empty track, so the frame a few seconds in shows the train.
const THUMBNAIL_SEEK: &str = "00:00:10";

fn thumbnail_path(cache_dir: &std::path::Path, relative: &str) -> Result<PathBuf, MediaError> {
    Ok(resolve_relative(cache_dir, relative)?.with_extension("png"))
}

pub async fn serve_thumbnail(
    State(state): State<MediaState>,
    Path(path): Path<String>,
) -> Result<Response, MediaError> {
    let video_path = resolve_relative(&state.archive_dir, &path)?;
    match tokio::fs::metadata(&video_path).await {
        Ok(meta) if meta.is_file() => {}
        _ => return Err(MediaError::NotFound),
    }

    let thumb_path = thumbnail_path(&state.thumbnail_dir, &path)?;
    let data = match tokio::fs::read(&thumb_path).await {
        Ok(data) => {
            debug!(video = %video_path.display(), "Found cached thumbnail");
            data
        }
        Err(_) => {
            info!(
                video = %video_path.display(),
                thumbnail = %thumb_path.display(),
                "Creating thumbnail"
            );

            if let Some(parent) = thumb_path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }

            let output = Command::new("ffmpegthumbnailer")
                .arg("-i")
                .arg(&video_path)
                .arg("-o")
                .arg(&thumb_path)
                .args(["-s", "0", "-t", THUMBNAIL_SEEK])
                .output()
                .await
                .map_err(|e| {
                    MediaError::Thumbnail(format!("failed to run ffmpegthumbnailer: {e}"))
                })?;

            if !output.status.success() {
                return Err(MediaError::Thumbnail(
                    String::from_utf8_lossy(&output.stderr).trim().to_string(),
                ));
            }

            tokio::fs::read(&thumb_path).await?
        }
    };

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (header::CONTENT_LENGTH, data.len().to_string()),
            (header::CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE.to_string()),
        ],
        Body::from(data),
    )
        .into_response())
}
