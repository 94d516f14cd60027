pub const TRIPS_ENDPOINT: &str = "v1/trips/";
pub const BIKES_ENDPOINT: &str = "v1/bikes/";
pub const USERS_ENDPOINT: &str = "v1/users/";
pub const MOVE_ENDPOINT: &str = "move";

/// joins a base url and an endpoint with exactly one slash between them.
pub fn join_url(base: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}

pub fn trip_url(base: &str, trip_id: &impl std::fmt::Display) -> String {
    join_url(base, &format!("{}{trip_id}", TRIPS_ENDPOINT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://api:8000/", "/v1/trips/"),
            "http://api:8000/v1/trips/"
        );
        assert_eq!(join_url("http://api:8000", "move"), "http://api:8000/move");
    }

    #[test]
    fn test_trip_url() {
        assert_eq!(trip_url("http://api:8000/", &17), "http://api:8000/v1/trips/17");
    }
}
