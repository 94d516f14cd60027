use std::time::Duration;

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::endpoints::{self, join_url};
use super::{CallFailure, FleetApi, MoveTarget, MoveTargetPayload};
use crate::config::ServiceConfig;
use crate::model::resource::{
    BikeAttributes, BikeId, BikeRecord, RemoteTripId, ResourceRecord, TripAttributes,
    TripRecord, UserAttributes, UserId, UserRecord,
};
use crate::SimulationError;

/// [`FleetApi`] over HTTP. the trip ledger ("backend") serves JSON:API documents,
/// the bike mover ("hivemind") accepts plain JSON bodies.
#[derive(Debug, Clone)]
pub struct HttpFleetClient {
    client: reqwest::Client,
    backend_url: String,
    hivemind_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl HttpFleetClient {
    pub fn new(config: &ServiceConfig) -> Result<HttpFleetClient, SimulationError> {
        let timeout = config.request_timeout()?;
        let client = reqwest::Client::builder().build().map_err(|e| {
            SimulationError::InvalidConfiguration(format!("failure building HTTP client: {e}"))
        })?;
        Ok(HttpFleetClient {
            client,
            backend_url: config.backend_url.clone(),
            hivemind_url: config.hivemind_url.clone(),
            token: config.token.clone(),
            timeout,
        })
    }

    pub async fn fetch_bikes(&self, limit: usize) -> Result<Vec<BikeRecord>, CallFailure> {
        self.fetch_collection::<BikeAttributes>(endpoints::BIKES_ENDPOINT, limit, &[])
            .await
    }

    pub async fn fetch_users(&self, limit: usize) -> Result<Vec<UserRecord>, CallFailure> {
        self.fetch_collection::<UserAttributes>(
            endpoints::USERS_ENDPOINT,
            limit,
            &[("is_eligable", "true")],
        )
        .await
    }

    pub async fn fetch_trips(&self, limit: usize) -> Result<Vec<TripRecord>, CallFailure> {
        self.fetch_collection::<TripAttributes>(endpoints::TRIPS_ENDPOINT, limit, &[])
            .await
    }

    async fn fetch_collection<A: DeserializeOwned>(
        &self,
        endpoint: &str,
        limit: usize,
        params: &[(&str, &str)],
    ) -> Result<Vec<ResourceRecord<A>>, CallFailure> {
        let url = join_url(&self.backend_url, endpoint);
        let limit = limit.to_string();
        let request = self
            .client
            .get(&url)
            .query(&[("limit", limit.as_str())])
            .query(params);
        let body = self.execute(&url, request).await?;
        let data = document_data(&url, &body)?;
        serde_json::from_value(data).map_err(|e| CallFailure::UnexpectedResponse {
            url: url.clone(),
            message: format!("failure decoding resource collection: {e}"),
        })
    }

    /// sends a request, returning the response body of a 2xx response.
    async fn execute(&self, url: &str, request: RequestBuilder) -> Result<String, CallFailure> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| CallFailure::transport(url, e))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CallFailure::transport(url, e))?;
        if !status.is_success() {
            return Err(CallFailure::Application {
                url: url.to_string(),
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

impl FleetApi for HttpFleetClient {
    async fn start_trip(
        &self,
        user_id: &UserId,
        bike_id: &BikeId,
    ) -> Result<RemoteTripId, CallFailure> {
        let url = join_url(&self.backend_url, endpoints::TRIPS_ENDPOINT);
        let payload = json!({ "user_id": user_id, "bike_id": bike_id });
        let request = self.client.post(&url).json(&payload);
        let body = self.execute(&url, request).await?;
        created_trip_id(&url, &body)
    }

    async fn move_bike(
        &self,
        bike_id: &BikeId,
        target: MoveTarget<'_>,
    ) -> Result<(), CallFailure> {
        let url = join_url(&self.hivemind_url, endpoints::MOVE_ENDPOINT);
        let payload = json!({ "position_or_linestring": MoveTargetPayload::from(target) });
        let request = self
            .client
            .post(&url)
            .query(&[("bike_id", bike_id.to_string())])
            .json(&payload);
        self.execute(&url, request).await.map(|_| ())
    }

    async fn end_trip(
        &self,
        trip_id: &RemoteTripId,
        user_id: &UserId,
        bike_id: &BikeId,
    ) -> Result<(), CallFailure> {
        let url = endpoints::trip_url(&self.backend_url, trip_id);
        let payload = json!({ "user_id": user_id, "bike_id": bike_id });
        let request = self.client.patch(&url).json(&payload);
        self.execute(&url, request).await.map(|_| ())
    }
}

/// the top-level `data` member of a JSON:API document
fn document_data(url: &str, body: &str) -> Result<Value, CallFailure> {
    let mut document: Value =
        serde_json::from_str(body).map_err(|e| CallFailure::UnexpectedResponse {
            url: url.to_string(),
            message: format!("response is not JSON: {e}"),
        })?;
    match document.get_mut("data") {
        Some(data) => Ok(data.take()),
        None => Err(CallFailure::UnexpectedResponse {
            url: url.to_string(),
            message: String::from("response document has no 'data' member"),
        }),
    }
}

fn created_trip_id(url: &str, body: &str) -> Result<RemoteTripId, CallFailure> {
    let data = document_data(url, body)?;
    let id = data.get("id").cloned().unwrap_or(Value::Null);
    serde_json::from_value(id).map_err(|e| CallFailure::UnexpectedResponse {
        url: url.to_string(),
        message: format!("created trip has no usable id: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::{created_trip_id, document_data};
    use crate::client::CallFailure;
    use crate::model::resource::{BikeRecord, ResourceId};

    const URL: &str = "http://api:8000/v1/trips/";

    #[test]
    fn test_created_trip_id() {
        let body = r#"{"data": {"id": 381, "type": "trips", "attributes": {}}}"#;
        assert_eq!(created_trip_id(URL, body), Ok(ResourceId::from(381)));
    }

    #[test]
    fn test_created_trip_without_id() {
        let body = r#"{"data": {"type": "trips"}}"#;
        assert!(matches!(
            created_trip_id(URL, body),
            Err(CallFailure::UnexpectedResponse { .. })
        ));
        assert!(created_trip_id(URL, "<html>").is_err());
    }

    #[test]
    fn test_collection_document() {
        let body = r#"{"data": [
            {"id": 1, "type": "bikes", "attributes": {"last_position": "POINT(13.0 55.6)", "available": true}},
            {"id": 2, "type": "bikes", "attributes": {"last_position": "POINT(13.1 55.7)", "available": false}}
        ]}"#;
        let data = document_data(URL, body).expect("should find data");
        let bikes: Vec<BikeRecord> = serde_json::from_value(data).expect("should decode");
        assert_eq!(bikes.len(), 2);
        assert!(!bikes[1].attributes.available);
    }

    #[test]
    fn test_document_without_data() {
        assert!(document_data(URL, r#"{"errors": []}"#).is_err());
    }
}
