use serde::Serialize;

use crate::domain::error::DomainError;
use crate::domain::trip::{Trip, TripDate, TripDraft};
use crate::store::Store;

#[derive(Clone)]
pub struct TripService {
    store: Store,
}

#[derive(Debug, Serialize)]
pub struct TripWithDates {
    #[serde(flatten)]
    pub trip: Trip,
    pub dates: Vec<TripDate>,
}

impl TripService {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn create_trip(&self, draft: TripDraft) -> Result<TripWithDates, DomainError> {
        if draft.title.trim().is_empty() {
            return Err(DomainError::validation("trip title must not be empty"));
        }
        for (start_date, end_date) in &draft.dates {
            if end_date < start_date {
                return Err(DomainError::validation(
                    "trip end date must not precede its start date",
                ));
            }
        }

        let (trip, dates) = self.store.trips.insert(draft).await?;
        Ok(TripWithDates { trip, dates })
    }

    pub async fn get_trip(&self, id: i64) -> Result<TripWithDates, DomainError> {
        let (trip, dates) = self
            .store
            .trips
            .find_by_id(id)
            .await?
            .ok_or(DomainError::TripNotFound(id))?;
        Ok(TripWithDates { trip, dates })
    }

    /// Removes the trip together with its dates.
    pub async fn delete_trip(&self, id: i64) -> Result<(), DomainError> {
        self.store
            .trips
            .find_by_id(id)
            .await?
            .ok_or(DomainError::TripNotFound(id))?;
        self.store.trips.delete(id).await?;
        Ok(())
    }
}
