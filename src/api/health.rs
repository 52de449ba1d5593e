use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::timetable::{AllocationStoreRef, TimetableStore};

#[derive(Clone)]
pub struct HealthState {
    pub timetables: TimetableStore,
    pub allocations: AllocationStoreRef,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Whether the service is running
    pub healthy: bool,
    /// Number of loaded timetable periods
    pub timetable_periods: usize,
    /// Number of train entries across all loaded periods
    pub train_entries: usize,
    /// Number of days with a cached allocation lookup (hits and misses)
    pub allocation_days_cached: usize,
    /// Number of cached days that actually have an allocation plan
    pub allocation_days_with_plan: usize,
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service health status", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<HealthState>) -> Json<HealthResponse> {
    let (cached, with_plan) = state.allocations.cache_stats().await;

    Json(HealthResponse {
        healthy: true,
        timetable_periods: state.timetables.len(),
        train_entries: state.timetables.iter().map(|p| p.trains.len()).sum(),
        allocation_days_cached: cached,
        allocation_days_with_plan: with_plan,
    })
}

pub fn router(timetables: TimetableStore, allocations: AllocationStoreRef) -> Router {
    let state = HealthState {
        timetables,
        allocations,
    };
    Router::new()
        .route("/", get(health_check))
        .with_state(state)
}
