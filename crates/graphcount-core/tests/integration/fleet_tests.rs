//! Integration tests for FleetAggregator.

use graphcount_core::{AppError, FleetAggregate, FleetAggregator};

use crate::integration::common::{
    EngineAnswer, MockCatalog, MockCountProvider, graph, refused, totals,
};

#[tokio::test]
async fn test_rollup_sums_simple_totals() {
    let catalog = MockCatalog::new(vec![graph(1, Some("g1")), graph(2, Some("g2"))]);
    let provider = MockCountProvider::new(vec![("g1", totals(2, 3)), ("g2", totals(5, 1))]);
    let fleet = FleetAggregator::new(catalog, provider);

    let rollup = fleet.compute_fleet_rollup().await.unwrap();

    assert_eq!(
        rollup,
        FleetAggregate {
            entities: 4,
            edges: 7,
            pro: 11,
            all: 11,
        }
    );
}

#[tokio::test]
async fn test_rollup_of_empty_catalog_is_zero() {
    let fleet = FleetAggregator::new(MockCatalog::new(vec![]), MockCountProvider::new(vec![]));

    let rollup = fleet.compute_fleet_rollup().await.unwrap();

    assert_eq!(rollup, FleetAggregate::new(0, 0, 0));
}

/// A hard engine error aborts the rollup; partial sums are not returned.
#[tokio::test]
async fn test_rollup_aborts_on_provider_error() {
    let catalog = MockCatalog::new(vec![graph(1, Some("g1")), graph(2, Some("g2"))]);
    let provider = MockCountProvider::new(vec![
        ("g1", totals(2, 3)),
        ("g2", refused("HTTP 500", "count query failed")),
    ]);
    let fleet = FleetAggregator::new(catalog, provider);

    let result = fleet.compute_fleet_rollup().await;

    match result {
        Err(AppError::ProviderError { code, message }) => {
            assert_eq!(code, "HTTP 500");
            assert_eq!(message, "count query failed");
        }
        other => panic!("Expected ProviderError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_rollup_stops_at_first_failing_graph() {
    let catalog = MockCatalog::new(vec![
        graph(1, Some("g1")),
        graph(2, Some("g2")),
        graph(3, Some("g3")),
    ]);
    let provider = MockCountProvider::new(vec![
        ("g1", totals(1, 1)),
        ("g2", refused("E42", "boom")),
        ("g3", totals(1, 1)),
    ]);
    let fleet = FleetAggregator::new(catalog, provider.clone());

    assert!(fleet.compute_fleet_rollup().await.is_err());
    assert_eq!(provider.queried(), vec!["g1".to_string(), "g2".to_string()]);
}

/// Faulting or unassigned graphs count as zero and do not abort the rollup.
#[tokio::test]
async fn test_rollup_survives_faults_and_unassigned_graphs() {
    let catalog = MockCatalog::new(vec![
        graph(1, Some("g1")),
        graph(2, Some("flaky")),
        graph(3, None),
        graph(4, Some("g4")),
    ]);
    let provider = MockCountProvider::new(vec![
        ("g1", totals(2, 3)),
        ("flaky", EngineAnswer::Unreachable("timed out".to_string())),
        ("g4", totals(5, 1)),
    ]);
    let fleet = FleetAggregator::new(catalog, provider);

    let rollup = fleet.compute_fleet_rollup().await.unwrap();

    assert_eq!(rollup, FleetAggregate::new(4, 7, 11));
}

#[tokio::test]
async fn test_rollup_survives_failed_catalog_lookup() {
    let catalog = MockCatalog::new(vec![
        graph(1, Some("g1")),
        graph(2, Some("g2")),
        graph(3, Some("g3")),
    ])
    .with_failing_lookups(&[2]);
    let provider = MockCountProvider::new(vec![
        ("g1", totals(2, 3)),
        ("g2", totals(100, 100)),
        ("g3", totals(1, 1)),
    ]);
    let fleet = FleetAggregator::new(catalog, provider.clone());

    let rollup = fleet.compute_fleet_rollup().await.unwrap();

    assert_eq!(rollup, FleetAggregate::new(4, 3, 7));
    assert_eq!(provider.queried(), vec!["g1", "g3"]);
}

#[tokio::test]
async fn test_rollup_saturates_instead_of_overflowing() {
    let catalog = MockCatalog::new(vec![graph(1, Some("g1")), graph(2, Some("g2"))]);
    let provider = MockCountProvider::new(vec![
        ("g1", totals(u64::MAX, 0)),
        ("g2", totals(1, 1)),
    ]);
    let fleet = FleetAggregator::new(catalog, provider);

    let rollup = fleet.compute_fleet_rollup().await.unwrap();

    assert_eq!(rollup.edges, u64::MAX);
    assert_eq!(rollup.entities, 1);
    assert_eq!(rollup.pro, u64::MAX);
    assert_eq!(rollup.all, rollup.pro);
}
