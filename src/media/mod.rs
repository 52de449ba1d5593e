//! Clip delivery: byte-range video serving and on-demand thumbnails.

pub mod error;
pub mod thumbnail;
pub mod video;

pub use error::MediaError;

use std::path::{Component, Path, PathBuf};

use axum::{routing::get, Router};

/// Cache header for immutable archive content (one week).
const CACHE_CONTROL_IMMUTABLE: &str = "public, max-age=604800, immutable";

#[derive(Clone)]
pub struct MediaState {
    pub archive_dir: PathBuf,
    pub thumbnail_dir: PathBuf,
}

pub fn router(archive_dir: PathBuf, thumbnail_dir: PathBuf) -> Router {
    let state = MediaState {
        archive_dir,
        thumbnail_dir,
    };
    Router::new()
        .route("/video/{*path}", get(video::serve_video))
        .route("/thumbnail/{*path}", get(thumbnail::serve_thumbnail))
        .with_state(state)
}

/// Resolve a client-supplied relative path inside a base directory.
/// Anything but plain forward path components is rejected, which keeps
/// the result inside the base directory without touching the filesystem.
pub(crate) fn resolve_relative(base: &Path, relative: &str) -> Result<PathBuf, MediaError> {
    let relative = Path::new(relative);
    for component in relative.components() {
        match component {
            Component::Normal(_) => {}
            _ => return Err(MediaError::Forbidden),
        }
    }
    Ok(base.join(relative))
}
