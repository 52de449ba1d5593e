pub mod categorize;
pub mod error;
pub mod health;

pub use error::{bad_request, internal_error, ErrorResponse};

use std::path::PathBuf;

use axum::Router;
use sqlx::SqlitePool;

use crate::timetable::{AllocationStoreRef, TimetableStore};

pub fn router(
    pool: SqlitePool,
    timetables: TimetableStore,
    allocations: AllocationStoreRef,
    archive_dir: PathBuf,
) -> Router {
    Router::new()
        .nest(
            "/categorize",
            categorize::router(pool, timetables.clone(), allocations.clone(), archive_dir),
        )
        .nest("/health", health::router(timetables, allocations))
}
