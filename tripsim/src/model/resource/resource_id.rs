use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

/// identifier of a remote resource. the fleet API serves integer ids, but some
/// deployments (and the CSV fallback) provide them as strings, so both are kept
/// in their original form and serialized back unchanged.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(untagged)]
pub enum ResourceId {
    Numeric(i64),
    Text(String),
}

pub type UserId = ResourceId;
pub type BikeId = ResourceId;
/// trip identifier assigned by the trip ledger after a successful start call
pub type RemoteTripId = ResourceId;

impl Display for ResourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceId::Numeric(id) => write!(f, "{id}"),
            ResourceId::Text(id) => write!(f, "{id}"),
        }
    }
}

impl FromStr for ResourceId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(String::from("resource id cannot be empty"));
        }
        match trimmed.parse::<i64>() {
            Ok(id) => Ok(ResourceId::Numeric(id)),
            Err(_) => Ok(ResourceId::Text(trimmed.to_string())),
        }
    }
}

impl From<i64> for ResourceId {
    fn from(value: i64) -> Self {
        ResourceId::Numeric(value)
    }
}

impl From<i32> for ResourceId {
    fn from(value: i32) -> Self {
        ResourceId::Numeric(i64::from(value))
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        ResourceId::Text(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::ResourceId;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_number_or_string() {
        let ids: Vec<ResourceId> =
            serde_json::from_str(r#"[7, "a1b2"]"#).expect("test invariant failed");
        assert_eq!(ids[0], ResourceId::Numeric(7));
        assert_eq!(ids[1], ResourceId::Text(String::from("a1b2")));
    }

    #[test]
    fn test_numeric_id_serializes_as_number() {
        let json = serde_json::to_string(&ResourceId::Numeric(42)).expect("should serialize");
        assert_eq!(json, "42");
    }

    #[test]
    fn test_from_str() {
        assert_eq!(ResourceId::from_str(" 12 "), Ok(ResourceId::Numeric(12)));
        assert_eq!(ResourceId::from_str("bike-12"), Ok(ResourceId::from("bike-12")));
        assert!(ResourceId::from_str("  ").is_err());
    }
}
