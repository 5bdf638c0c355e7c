use serde::{Deserialize, Serialize};
use time::Date;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trip {
    pub id: i64,
    pub title: String,
    pub party: String,
}

/// One date range of a trip. The trip owns its dates: deleting the trip
/// deletes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripDate {
    pub id: i64,
    pub trip_id: i64,
    pub start_date: Date,
    pub end_date: Date,
}

#[derive(Debug, Clone)]
pub struct TripDraft {
    pub title: String,
    pub party: String,
    pub dates: Vec<(Date, Date)>,
}
