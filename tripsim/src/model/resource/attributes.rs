use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BikeAttributes {
    /// WKT point, e.g. `POINT(13.06782 55.577859)`
    pub last_position: String,
    /// bikes that do not report availability are treated as available
    #[serde(default = "available_by_default")]
    pub available: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct UserAttributes {
    #[serde(default)]
    pub balance: Option<f64>,
    #[serde(default)]
    pub is_eligable: Option<bool>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TripAttributes {
    /// WKT linestring of the path the historical trip took
    pub path_taken: String,
}

fn available_by_default() -> bool {
    true
}
