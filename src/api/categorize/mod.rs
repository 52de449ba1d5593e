mod pending;
mod suggestions;
mod train_info;

pub use pending::*;
pub use suggestions::*;
pub use train_info::*;

use std::path::PathBuf;

use axum::{routing::get, Router};
use sqlx::SqlitePool;

use crate::timetable::{AllocationStoreRef, TimetableStore};

#[derive(Clone)]
pub struct CategorizeState {
    pub pool: SqlitePool,
    pub timetables: TimetableStore,
    pub allocations: AllocationStoreRef,
    pub archive_dir: PathBuf,
}

pub fn router(
    pool: SqlitePool,
    timetables: TimetableStore,
    allocations: AllocationStoreRef,
    archive_dir: PathBuf,
) -> Router {
    let state = CategorizeState {
        pool,
        timetables,
        allocations,
        archive_dir,
    };
    Router::new()
        .route("/pending", get(list_pending))
        .route("/train-info", get(get_train_info))
        .route("/suggestions", get(list_suggestions))
        .with_state(state)
}
