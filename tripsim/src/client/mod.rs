mod call_failure;
mod endpoints;
mod fleet_api;
mod http_fleet_client;
#[cfg(test)]
pub(crate) mod scripted_fleet_client;

pub use call_failure::CallFailure;
pub use endpoints::join_url;
pub use fleet_api::{FleetApi, MoveTarget, MoveTargetPayload};
pub use http_fleet_client::HttpFleetClient;
