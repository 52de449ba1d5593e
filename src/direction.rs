//! Travel directions as seen from the camera site.
//!
//! The camera sits on a junction; every train leaves the frame towards one
//! of four neighbouring line ends. Timetable origin/destination names map
//! onto those directions so the UI can pre-fill the from/to fields.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One of the four line ends reachable from the camera site.
///
/// The serialized names double as the `from`/`to` values in the
/// `categorized_trains` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Filisur,
    Chur,
    Moritz,
    Davos,
}

impl Direction {
    pub fn display_name(&self) -> &'static str {
        match self {
            Direction::Filisur => "Filisur",
            Direction::Chur => "Chur",
            Direction::Moritz => "St. Moritz",
            Direction::Davos => "Davos Platz",
        }
    }
}

/// Map a timetable origin/destination station name to a direction.
///
/// Freight workings towards Landquart run via Chur; passenger workings
/// towards Landquart run via Davos.
pub fn direction_for_station(name: &str) -> Option<Direction> {
    match name {
        "Chur" | "Chur GB" => Some(Direction::Chur),
        "Landquart" => Some(Direction::Davos),
        "Landquart GB" => Some(Direction::Chur),
        "Davos Platz" => Some(Direction::Davos),
        "Filisur" => Some(Direction::Filisur),
        "Pontresina" | "Samedan" | "St. Moritz" | "Tirano" => Some(Direction::Moritz),
        "Zermatt" => Some(Direction::Chur),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_stations_map_to_directions() {
        assert_eq!(direction_for_station("Chur"), Some(Direction::Chur));
        assert_eq!(direction_for_station("Chur GB"), Some(Direction::Chur));
        assert_eq!(direction_for_station("Landquart"), Some(Direction::Davos));
        assert_eq!(direction_for_station("Landquart GB"), Some(Direction::Chur));
        assert_eq!(direction_for_station("Pontresina"), Some(Direction::Moritz));
        assert_eq!(direction_for_station("Tirano"), Some(Direction::Moritz));
        assert_eq!(direction_for_station("Zermatt"), Some(Direction::Chur));
        assert_eq!(direction_for_station("Filisur"), Some(Direction::Filisur));
    }

    #[test]
    fn unknown_station_has_no_direction() {
        assert_eq!(direction_for_station("Bergün"), None);
        assert_eq!(direction_for_station(""), None);
    }

    #[test]
    fn serialized_names_match_schema_values() {
        assert_eq!(
            serde_json::to_string(&Direction::Moritz).unwrap(),
            "\"moritz\""
        );
        assert_eq!(
            serde_json::to_string(&Direction::Davos).unwrap(),
            "\"davos\""
        );
    }

    #[test]
    fn display_names() {
        assert_eq!(Direction::Moritz.display_name(), "St. Moritz");
        assert_eq!(Direction::Davos.display_name(), "Davos Platz");
    }
}
