use serde::{Deserialize, Serialize};

use super::Record;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(default)]
    pub id: u64,
    pub trip_name: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub budget: f64,
    pub travel_mode: String,
}

impl Record for Trip {
    fn id(&self) -> u64 {
        self.id
    }
}

/// A validated trip submission that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTrip {
    pub trip_name: String,
    pub destination: String,
    pub start_date: String,
    pub end_date: String,
    pub budget: f64,
    pub travel_mode: String,
}

impl NewTrip {
    pub fn into_trip(self, id: u64) -> Trip {
        Trip {
            id,
            trip_name: self.trip_name,
            destination: self.destination,
            start_date: self.start_date,
            end_date: self.end_date,
            budget: self.budget,
            travel_mode: self.travel_mode,
        }
    }
}
