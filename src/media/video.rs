//! Byte-range MP4 serving from the clip archive.

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio::io::{AsyncReadExt, AsyncSeekExt, SeekFrom};
use tokio_util::io::ReaderStream;

use super::{resolve_relative, MediaError, MediaState, CACHE_CONTROL_IMMUTABLE};

/// Parse a `Range` header against a file of the given size.
///
/// Only single byte ranges are supported. Returns the inclusive
/// `(start, end)` pair, or None when the header is malformed or the
/// range lies outside the file.
fn parse_range(header: &str, size: u64) -> Option<(u64, u64)> {
    let ranges = header.strip_prefix("bytes=")?;
    if ranges.contains(',') {
        return None;
    }
    let (start, end) = ranges.trim().split_once('-')?;

    if start.is_empty() {
        // Suffix range: the last N bytes
        let n: u64 = end.parse().ok()?;
        if n == 0 || size == 0 {
            return None;
        }
        let n = n.min(size);
        return Some((size - n, size - 1));
    }

    let start: u64 = start.parse().ok()?;
    if start >= size {
        return None;
    }
    let end = if end.is_empty() {
        size - 1
    } else {
        end.parse::<u64>().ok()?.min(size - 1)
    };
    if end < start {
        return None;
    }
    Some((start, end))
}

/// Serve an archived clip, honouring single byte-range requests.
pub async fn serve_video(
    State(state): State<MediaState>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Result<Response, MediaError> {
    let video_path = resolve_relative(&state.archive_dir, &path)?;

    let meta = match tokio::fs::metadata(&video_path).await {
        Ok(meta) if meta.is_file() => meta,
        Ok(_) => return Err(MediaError::NotFound),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(MediaError::NotFound),
        Err(e) => return Err(e.into()),
    };
    let size = meta.len();

    let range_header = headers
        .get(header::RANGE)
        .and_then(|v| v.to_str().ok());

    let mut file = tokio::fs::File::open(&video_path).await?;

    match range_header {
        Some(range) => {
            let (start, end) =
                parse_range(range, size).ok_or(MediaError::RangeNotSatisfiable { size })?;
            let length = end - start + 1;

            file.seek(SeekFrom::Start(start)).await?;
            let stream = ReaderStream::new(file.take(length));

            Ok((
                StatusCode::PARTIAL_CONTENT,
                [
                    (header::CONTENT_TYPE, "video/mp4".to_string()),
                    (header::CONTENT_LENGTH, length.to_string()),
                    (header::CONTENT_RANGE, format!("bytes {start}-{end}/{size}")),
                    (header::ACCEPT_RANGES, "bytes".to_string()),
                    (header::CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE.to_string()),
                ],
                Body::from_stream(stream),
            )
                .into_response())
        }
        None => Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "video/mp4".to_string()),
                (header::CONTENT_LENGTH, size.to_string()),
                (header::ACCEPT_RANGES, "bytes".to_string()),
                (header::CACHE_CONTROL, CACHE_CONTROL_IMMUTABLE.to_string()),
            ],
            Body::from_stream(ReaderStream::new(file)),
        )
            .into_response()),
    }
}
