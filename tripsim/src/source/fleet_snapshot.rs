use crate::model::resource::{BikeRecord, TripRecord, UserRecord};

/// the raw fleet resources a run draws its pairings from
#[derive(Debug, Clone, Default)]
pub struct FleetSnapshot {
    pub bikes: Vec<BikeRecord>,
    pub users: Vec<UserRecord>,
    /// historical trips whose routes are replayed
    pub trips: Vec<TripRecord>,
}

impl FleetSnapshot {
    pub fn summary(&self) -> String {
        format!(
            "{} bikes, {} users, {} historical trips",
            self.bikes.len(),
            self.users.len(),
            self.trips.len()
        )
    }
}
