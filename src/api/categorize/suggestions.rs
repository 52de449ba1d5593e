use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::api::{bad_request, ErrorResponse};
use crate::timetable::{trains_in_timespan, Train};

use super::CategorizeState;

/// Timestamp format used in archive clip filenames.
const CLIP_TIME_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

/// Upper bound for the search windows. Anything wider than a day points
/// at a client bug, and the window walk is linear in covered days.
const MAX_VARIANCE_MINUTES: u32 = 24 * 60;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SuggestionsRequest {
    /// Recording time of the clip, YYYY-MM-DD_HH-MM-SS
    pub time: Option<String>,
    /// Search window around `time` for passenger trains, in minutes
    pub regular_variance: Option<String>,
    /// Search window around `time` for freight trains, in minutes
    pub freight_variance: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuggestionListResponse {
    /// Candidate trains, ordered by scheduled time
    pub trains: Vec<Train>,
}

fn parse_variance(value: Option<&str>, name: &str) -> Result<i64, (StatusCode, Json<ErrorResponse>)> {
    let value = value.ok_or_else(|| bad_request(format!("Missing query parameter: {}", name)))?;
    let minutes = value
        .parse::<u32>()
        .map_err(|_| bad_request(format!("Invalid {}, expected minutes as a whole number", name)))?;
    if minutes > MAX_VARIANCE_MINUTES {
        return Err(bad_request(format!(
            "Invalid {}, expected at most {} minutes",
            name, MAX_VARIANCE_MINUTES
        )));
    }
    Ok(i64::from(minutes))
}

/// Suggest scheduled trains that may appear in a clip recorded at a given time
#[utoipa::path(
    get,
    path = "/api/categorize/suggestions",
    params(SuggestionsRequest),
    responses(
        (status = 200, description = "Candidate trains around the recording time", body = SuggestionListResponse),
        (status = 400, description = "Missing or malformed parameters", body = ErrorResponse)
    ),
    tag = "categorize"
)]
pub async fn list_suggestions(
    State(state): State<CategorizeState>,
    Query(request): Query<SuggestionsRequest>,
) -> Result<Json<SuggestionListResponse>, (StatusCode, Json<ErrorResponse>)> {
    let time = request
        .time
        .as_deref()
        .ok_or_else(|| bad_request("Missing query parameter: time"))?;
    let time = NaiveDateTime::parse_from_str(time, CLIP_TIME_FORMAT)
        .map_err(|_| bad_request("Invalid time, expected YYYY-MM-DD_HH-MM-SS"))?;

    let regular = parse_variance(request.regular_variance.as_deref(), "regular_variance")?;
    let freight = parse_variance(request.freight_variance.as_deref(), "freight_variance")?;

    let regular_window = Duration::minutes(regular);
    let freight_window = Duration::minutes(freight);

    let mut trains: Vec<Train> =
        trains_in_timespan(&state.timetables, time - regular_window, time + regular_window)
            .into_iter()
            .filter(|t| !t.information.as_ref().is_some_and(|i| i.is_freight()))
            .cloned()
            .collect();

    let freight_trains =
        trains_in_timespan(&state.timetables, time - freight_window, time + freight_window)
            .into_iter()
            .filter(|t| t.information.as_ref().is_some_and(|i| i.is_freight()))
            .cloned();
    trains.extend(freight_trains);

    Ok(Json(SuggestionListResponse { trains }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::categorize::tests::{get, test_router};
    use crate::timetable::types::{test_train, HourMinute};
    use crate::timetable::ServiceInformation;

    fn fixture_trains() -> Vec<Train> {
        let mut regular = test_train("940");
        regular.transit_time = Some(HourMinute { hour: 10, minute: 20 });
        regular.information = Some(ServiceInformation {
            classifier: "R".to_string(),
            origin: "Davos Platz".to_string(),
            destination: "Filisur".to_string(),
        });

        let mut freight = test_train("5140");
        freight.transit_time = Some(HourMinute { hour: 10, minute: 20 });
        freight.information = Some(ServiceInformation {
            classifier: "G".to_string(),
            origin: "Landquart GB".to_string(),
            destination: "Samedan".to_string(),
        });

        vec![regular, freight]
    }

    async fn suggested_numbers(uri: &str) -> Vec<String> {
        let router = test_router(fixture_trains()).await;
        let (status, body) = get(router, uri).await;
        assert_eq!(status, StatusCode::OK);
        body["trains"]
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["number"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn missing_or_malformed_params_are_bad_requests() {
        for uri in [
            "/suggestions",
            "/suggestions?time=2026-03-02_10-00-00",
            "/suggestions?time=2026-03-02T10:00:00&regular_variance=30&freight_variance=10",
            "/suggestions?time=2026-03-02_10-00-00&regular_variance=soon&freight_variance=10",
            "/suggestions?time=2026-03-02_10-00-00&regular_variance=30&freight_variance=-5",
            "/suggestions?time=2026-03-02_10-00-00&regular_variance=30",
        ] {
            let router = test_router(fixture_trains()).await;
            let (status, body) = get(router, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "uri: {uri}");
            assert!(body["error"].is_string(), "uri: {uri}");
        }
    }

    #[tokio::test]
    async fn oversized_variance_is_bad_request() {
        let router = test_router(fixture_trains()).await;
        let (status, _) = get(
            router,
            "/suggestions?time=2026-03-02_10-00-00&regular_variance=4294967295&freight_variance=10",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn freight_only_matches_inside_freight_window() {
        // Both trains pass at 10:20; the freight window 09:50-10:10
        // misses it while the regular window 09:30-10:30 covers it.
        let numbers = suggested_numbers(
            "/suggestions?time=2026-03-02_10-00-00&regular_variance=30&freight_variance=10",
        )
        .await;
        assert_eq!(numbers, vec!["940"]);
    }

    #[tokio::test]
    async fn regular_only_matches_inside_regular_window() {
        let numbers = suggested_numbers(
            "/suggestions?time=2026-03-02_10-00-00&regular_variance=10&freight_variance=30",
        )
        .await;
        assert_eq!(numbers, vec!["5140"]);
    }

    #[tokio::test]
    async fn both_windows_can_match() {
        let numbers = suggested_numbers(
            "/suggestions?time=2026-03-02_10-00-00&regular_variance=30&freight_variance=30",
        )
        .await;
        assert_eq!(numbers, vec!["940", "5140"]);
    }
}
