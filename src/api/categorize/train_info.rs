use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::{bad_request, ErrorResponse};
use crate::direction::{direction_for_station, Direction};
use crate::locomotive::Locomotive;
use crate::timetable::{locomotives_for_train, train_on_day, Train};

use super::CategorizeState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct TrainInfoRequest {
    /// Day of service, YYYY-MM-DD
    pub day: Option<String>,
    /// Train number as printed in the timetable
    pub train: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TrainInformation {
    pub train: Train,
    /// Locomotives allocated to this train, empty when no plan is known
    pub locomotives: Vec<Locomotive>,
    pub origin_direction: Option<Direction>,
    pub destination_direction: Option<Direction>,
    /// Human-readable name of the origin direction, e.g. "St. Moritz"
    pub origin_direction_name: Option<&'static str>,
    /// Human-readable name of the destination direction
    pub destination_direction_name: Option<&'static str>,
}

/// Resolve a train number on a given day to its timetable entry and consist
#[utoipa::path(
    get,
    path = "/api/categorize/train-info",
    params(TrainInfoRequest),
    responses(
        (status = 200, description = "Resolved train information", body = TrainInformation),
        (status = 204, description = "No such train runs on that day"),
        (status = 400, description = "Missing or malformed parameters", body = ErrorResponse)
    ),
    tag = "categorize"
)]
pub async fn get_train_info(
    State(state): State<CategorizeState>,
    Query(request): Query<TrainInfoRequest>,
) -> Result<Response, (StatusCode, Json<ErrorResponse>)> {
    let day = request
        .day
        .as_deref()
        .ok_or_else(|| bad_request("Missing query parameter: day"))?;
    let number = request
        .train
        .as_deref()
        .ok_or_else(|| bad_request("Missing query parameter: train"))?;

    let day = NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|_| bad_request("Invalid day, expected YYYY-MM-DD"))?;

    let Some(train) = train_on_day(&state.timetables, day, number) else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let plan = state.allocations.plan_for(day).await;
    let locomotives = locomotives_for_train(train, plan.as_deref());

    let origin_direction = train
        .information
        .as_ref()
        .and_then(|i| direction_for_station(&i.origin));
    let destination_direction = train
        .information
        .as_ref()
        .and_then(|i| direction_for_station(&i.destination));

    Ok(Json(TrainInformation {
        train: train.clone(),
        locomotives,
        origin_direction,
        destination_direction,
        origin_direction_name: origin_direction.map(|d| d.display_name()),
        destination_direction_name: destination_direction.map(|d| d.display_name()),
    })
    .into_response())
}
