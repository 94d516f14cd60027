use serde::{Deserialize, Serialize};

use super::{BikeAttributes, ResourceId, TripAttributes, UserAttributes};

/// a single JSON:API style resource object as served by the fleet backend,
/// `{"id": ..., "attributes": {...}}`. the attribute payload is typed per
/// resource so that missing fields fail at parse time.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResourceRecord<A> {
    pub id: ResourceId,
    pub attributes: A,
}

pub type BikeRecord = ResourceRecord<BikeAttributes>;
pub type UserRecord = ResourceRecord<UserAttributes>;
/// a historical trip, used only as a source of routes
pub type TripRecord = ResourceRecord<TripAttributes>;

impl<A> ResourceRecord<A> {
    pub fn new(id: ResourceId, attributes: A) -> Self {
        Self { id, attributes }
    }
}
