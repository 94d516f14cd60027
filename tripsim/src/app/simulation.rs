use chrono::Utc;

use super::SimulationSummary;
use crate::client::{FleetApi, HttpFleetClient};
use crate::config::{SimulationConfig, TripsimSettings};
use crate::lifecycle::{EndOfTripScheduler, TripInitiator};
use crate::model::{self, extract, Trip};
use crate::source::{self, FleetSnapshot};
use crate::SimulationError;

/// runs one simulation pass against the configured services: load fleet
/// resources, pair trips, then start, move and end them.
pub fn run_simulation(settings: &TripsimSettings) -> Result<SimulationSummary, SimulationError> {
    settings.validate()?;
    let client = HttpFleetClient::new(&settings.services)?;
    let runtime = current_thread_runtime()?;
    runtime.block_on(async {
        let snapshot = source::load_snapshot(&settings.source, &client).await?;
        simulate(&client, snapshot, &settings.simulation).await
    })
}

/// loads fleet resources and pairs trips without calling any lifecycle endpoint.
pub fn run_pairing(settings: &TripsimSettings) -> Result<Vec<Trip>, SimulationError> {
    settings.validate()?;
    let client = HttpFleetClient::new(&settings.services)?;
    let runtime = current_thread_runtime()?;
    let snapshot = runtime.block_on(source::load_snapshot(&settings.source, &client))?;
    plan_trips(snapshot, &settings.simulation)
}

/// drives the trips paired from `snapshot` through the full lifecycle.
pub async fn simulate<C: FleetApi>(
    client: &C,
    snapshot: FleetSnapshot,
    config: &SimulationConfig,
) -> Result<SimulationSummary, SimulationError> {
    let started_at = Utc::now();
    let estimator = config.duration_estimator()?;
    let parameters = config.scheduler_parameters()?;
    let pairings = plan_trips(snapshot, config)?;
    let paired = pairings.len();

    let initiator = TripInitiator::new(client, estimator, config.dispatch_concurrency);
    let started = initiator.start_all(pairings).await?;
    let moved = initiator.move_all(started.trips).await?;
    let scheduler = EndOfTripScheduler::new(&initiator, parameters);
    let outcome = scheduler.run(moved.trips).await?;

    let summary = SimulationSummary {
        started_at,
        finished_at: Utc::now(),
        paired,
        start: started.report,
        movement: moved.report,
        end: outcome.report,
        ended: outcome.ended.len(),
        abandoned: outcome.abandoned.len(),
        ticks: outcome.ticks,
    };
    log::info!("{summary}");
    Ok(summary)
}

/// filters the snapshot down to available bikes and eligible users and pairs
/// them with the historical routes.
pub fn plan_trips(
    snapshot: FleetSnapshot,
    config: &SimulationConfig,
) -> Result<Vec<Trip>, SimulationError> {
    let bikes = extract::available(snapshot.bikes);
    let users = extract::eligible(snapshot.users);
    // bike positions are validated even though pairing only needs the ids
    let positions = extract::positions(&bikes)?;
    log::debug!("{} available bikes with known positions", positions.len());
    let routes = extract::routes(&snapshot.trips)?;
    let pairings = model::pair(
        &extract::ids(&users),
        &extract::ids(&bikes),
        &routes,
        config.trips_limit,
    )?;
    log::info!("paired {} trips", pairings.len());
    Ok(pairings)
}

fn current_thread_runtime() -> Result<tokio::runtime::Runtime, SimulationError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| SimulationError::RuntimeError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{plan_trips, simulate};
    use crate::client::scripted_fleet_client::{Operation, ScriptedFleetClient};
    use crate::config::SimulationConfig;
    use crate::model::resource::ResourceId;
    use crate::source::{read_snapshot, FleetSnapshot};
    use crate::SimulationError;
    use std::path::PathBuf;

    fn test_snapshot() -> FleetSnapshot {
        let directory = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("src")
            .join("resources")
            .join("test");
        read_snapshot(&directory).expect("test invariant failed")
    }

    #[test]
    fn test_plan_trips_filters_resources() {
        let trips = plan_trips(test_snapshot(), &SimulationConfig::default())
            .expect("test invariant failed");
        // users 11 (negative balance) and 12 (ineligible) and bike 3 (unavailable) are skipped
        let pairs: Vec<_> = trips
            .iter()
            .map(|t| (t.user_id.clone(), t.bike_id.clone()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                (ResourceId::from(10), ResourceId::from(1)),
                (ResourceId::from(13), ResourceId::from(2)),
            ]
        );
    }

    #[test]
    fn test_plan_trips_respects_limit() {
        let config = SimulationConfig {
            trips_limit: 1,
            ..Default::default()
        };
        let trips = plan_trips(test_snapshot(), &config).expect("test invariant failed");
        assert_eq!(trips.len(), 1);
    }

    #[test]
    fn test_plan_trips_without_users() {
        let mut snapshot = test_snapshot();
        snapshot.users.clear();
        let result = plan_trips(snapshot, &SimulationConfig::default());
        assert!(matches!(
            result,
            Err(SimulationError::InsufficientResources(_))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulate_full_lifecycle() {
        let client = ScriptedFleetClient::new();
        let summary = simulate(&client, test_snapshot(), &SimulationConfig::default())
            .await
            .expect("test invariant failed");
        assert_eq!(summary.paired, 2);
        assert_eq!(summary.start.succeeded, 2);
        assert_eq!(summary.movement.succeeded, 2);
        assert_eq!(summary.end.succeeded, 2);
        assert_eq!(summary.ended, 2);
        assert_eq!(summary.abandoned, 0);
        // both trips are due ~10s in, first tick at 0s, second at 20s
        assert_eq!(summary.ticks, 2);
        assert_eq!(client.calls(Operation::End).len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulate_continues_past_failed_start() {
        let client = ScriptedFleetClient::new().always_fail(Operation::Start, 1);
        let summary = simulate(&client, test_snapshot(), &SimulationConfig::default())
            .await
            .expect("test invariant failed");
        assert_eq!(summary.start.failed, 1);
        assert_eq!(summary.ended, 1);
        assert_eq!(client.calls(Operation::Move), vec![ResourceId::from(2)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_simulate_fails_when_nothing_moves() {
        let client = ScriptedFleetClient::new()
            .always_fail(Operation::Move, 1)
            .always_fail(Operation::Move, 2);
        let result = simulate(&client, test_snapshot(), &SimulationConfig::default()).await;
        assert!(matches!(result, Err(SimulationError::RunFailure { .. })));
        assert!(client.calls(Operation::End).is_empty());
    }
}
