//! Daily locomotive-allocation plans.
//!
//! The operations department publishes one plan per day describing which
//! physical locomotives run which train workings. Plans are parsed from
//! pre-converted `YYYY_MM_DD.min.json` files and cached for the process
//! lifetime; a day without a plan (or with a broken file) is cached as
//! absent so the disk is only probed once.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::{info, warn};

use super::types::HourMinute;

/// A locomotive coupled into an allocated train working.
#[derive(Debug, Clone, Deserialize)]
pub struct AllocatedLocomotive {
    pub number: u32,
    /// Role code; "S" marks a towed (dead) locomotive
    #[serde(default)]
    pub role: Option<String>,
    pub position: u32,
}

impl AllocatedLocomotive {
    pub fn is_towed(&self) -> bool {
        self.role.as_deref() == Some("S")
    }
}

/// A train working as listed in the allocation plan, with its full-route
/// departure and arrival times.
#[derive(Debug, Clone, Deserialize)]
pub struct AllocatedTrain {
    pub number: String,
    pub origin_location: String,
    pub destination_location: String,
    pub departure_time: HourMinute,
    pub arrival_time: HourMinute,
    pub locomotives: Vec<AllocatedLocomotive>,
}

/// Where a locomotive comes from / continues to on the neighbouring days.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdjacentWorking {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub train_number: Option<String>,
    #[serde(default)]
    pub service_identifier: Option<String>,
}

/// One leg of a locomotive's daily diagram.
#[derive(Debug, Clone, Deserialize)]
pub struct DiagramLeg {
    pub origin_location: String,
    pub destination_location: String,
    #[serde(default)]
    pub locomotive_position: Option<String>,
    pub train_number: String,
    pub departure_time: HourMinute,
    pub arrival_time: HourMinute,
}

/// A locomotive's diagram for the day. Resolution works off the `trains`
/// table of the plan; the diagrams are kept for the locomotive detail view.
#[derive(Debug, Clone, Deserialize)]
pub struct LocomotiveDiagram {
    pub number: u32,
    pub service_identifier: String,
    pub distance_km: f64,
    #[serde(default)]
    pub yesterday: AdjacentWorking,
    #[serde(default)]
    pub tomorrow: AdjacentWorking,
    #[serde(default)]
    pub routes: Vec<DiagramLeg>,
}

/// The full allocation plan for one calendar day.
#[derive(Debug, Clone, Deserialize)]
pub struct DayPlan {
    pub locomotives: Vec<LocomotiveDiagram>,
    pub trains: Vec<AllocatedTrain>,
}

impl DayPlan {
    /// Find the allocated working for a train number whose full-route
    /// times bracket the scheduled call at the camera site.
    ///
    /// `min_time`/`max_time` are the earliest and latest scheduled
    /// minutes-of-day of the call; an absent bound is not checked. The
    /// working must depart its origin no later than the call begins and
    /// arrive at its destination no earlier than the call ends.
    pub fn find_train(
        &self,
        number: &str,
        min_time: Option<u32>,
        max_time: Option<u32>,
    ) -> Option<&AllocatedTrain> {
        self.trains.iter().find(|t| {
            t.number == number
                && min_time.is_none_or(|min| t.departure_time.minutes_since_midnight() <= min)
                && max_time.is_none_or(|max| t.arrival_time.minutes_since_midnight() >= max)
        })
    }
}

/// Process-lifetime cache of allocation plans keyed by day.
///
/// `None` entries record days whose file was missing or unparseable.
pub struct AllocationStore {
    dir: PathBuf,
    cache: RwLock<HashMap<NaiveDate, Option<Arc<DayPlan>>>>,
}

impl AllocationStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn plan_path(&self, day: NaiveDate) -> PathBuf {
        self.dir.join(format!("{}.min.json", day.format("%Y_%m_%d")))
    }

    /// Get the plan for a day, reading and caching it on first access.
    pub async fn plan_for(&self, day: NaiveDate) -> Option<Arc<DayPlan>> {
        if let Some(cached) = self.cache.read().await.get(&day) {
            return cached.clone();
        }

        let path = self.plan_path(day);
        let plan = match tokio::fs::read_to_string(&path).await {
            Ok(content) => match serde_json::from_str::<DayPlan>(&content) {
                Ok(plan) => {
                    info!(
                        path = %path.display(),
                        locomotives = plan.locomotives.len(),
                        trains = plan.trains.len(),
                        "Loaded locomotive allocation plan"
                    );
                    Some(Arc::new(plan))
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Broken locomotive allocation plan");
                    None
                }
            },
            Err(_) => {
                info!(path = %path.display(), "No locomotive allocation plan for day");
                None
            }
        };

        // Two tasks may race to fill the same day; both compute the same
        // value, so last writer wins.
        self.cache.write().await.insert(day, plan.clone());
        plan
    }

    /// Cache statistics for the health endpoint: (days cached, days with a plan).
    pub async fn cache_stats(&self) -> (usize, usize) {
        let cache = self.cache.read().await;
        let with_plan = cache.values().filter(|v| v.is_some()).count();
        (cache.len(), with_plan)
    }
}

/// Shared handle to the allocation cache.
pub type AllocationStoreRef = Arc<AllocationStore>;
