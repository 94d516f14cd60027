mod attributes;
mod resource_id;
mod resource_record;

pub use attributes::{BikeAttributes, TripAttributes, UserAttributes};
pub use resource_id::{BikeId, RemoteTripId, ResourceId, UserId};
pub use resource_record::{BikeRecord, ResourceRecord, TripRecord, UserRecord};
