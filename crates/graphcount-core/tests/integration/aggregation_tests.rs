//! Integration tests for GraphAggregator.

use graphcount_core::{AppError, CountSource, EngineCounts, GraphAggregator, GraphId};

use crate::integration::common::{
    EngineAnswer, MockCatalog, MockCountProvider, counts_map, graph, refused, totals,
};

fn id(raw: i64) -> GraphId {
    GraphId::new(raw).unwrap()
}

#[tokio::test]
async fn test_empty_mappings_yield_zero_properties() {
    let catalog = MockCatalog::new(vec![graph(1, Some("u_movies"))]);
    let provider = MockCountProvider::new(vec![("u_movies", totals(9, 4))]);
    let aggregator = GraphAggregator::new(catalog, provider);

    let aggregate = aggregator.compute_properties(id(1)).await.unwrap();

    assert_eq!(aggregate.edges, 9);
    assert_eq!(aggregate.entities, 4);
    assert_eq!(aggregate.edge_properties, 0);
    assert_eq!(aggregate.entity_properties, 0);
    assert_eq!(aggregate.total_properties, 0);
    assert_eq!(aggregate.source, CountSource::Counted);
}

/// Types present in only one of the maps must contribute nothing.
#[tokio::test]
async fn test_partially_overlapping_maps() {
    let counts = EngineCounts {
        edges: 7,
        entities: 13,
        name2count: counts_map(&[("person", 10), ("movie", 3), ("acted_in", 7)]),
        entity_count: 2,
        edge_count: 1,
        edge2pros: counts_map(&[("acted_in", 2), ("reviewed", 5)]),
        entity2pros: counts_map(&[("person", 4), ("studio", 8)]),
    };
    let catalog = MockCatalog::new(vec![graph(3, Some("u_cinema"))]);
    let provider = MockCountProvider::new(vec![("u_cinema", EngineAnswer::Counts(counts))]);
    let aggregator = GraphAggregator::new(catalog, provider);

    let aggregate = aggregator.compute_properties(id(3)).await.unwrap();

    assert_eq!(aggregate.edge_properties, 14, "7 acted_in edges x 2");
    assert_eq!(aggregate.entity_properties, 40, "10 persons x 4");
    assert_eq!(aggregate.total_properties, 54);
    assert_eq!(aggregate.edges, 7, "raw totals are untouched");
    assert_eq!(aggregate.entities, 13);
}

#[tokio::test]
async fn test_simple_totals_properties_is_edges_plus_entities() {
    let counts = EngineCounts {
        edges: 2,
        entities: 3,
        name2count: counts_map(&[("person", 3)]),
        entity2pros: counts_map(&[("person", 6)]),
        ..Default::default()
    };
    let catalog = MockCatalog::new(vec![graph(1, Some("u_a"))]);
    let provider = MockCountProvider::new(vec![("u_a", EngineAnswer::Counts(counts))]);
    let aggregator = GraphAggregator::new(catalog, provider);

    let simple = aggregator.compute_simple_totals(id(1)).await.unwrap();
    assert_eq!(simple.properties, simple.edges + simple.entities);
    assert_eq!(simple.properties, 5);

    let detailed = aggregator.compute_properties(id(1)).await.unwrap();
    assert_eq!(detailed.total_properties, 18, "the two formulas differ");
}

#[tokio::test]
async fn test_provider_fault_recovers_as_zero_counts() {
    let catalog = MockCatalog::new(vec![graph(5, Some("u_down"))]);
    let provider = MockCountProvider::new(vec![(
        "u_down",
        EngineAnswer::Unreachable("connection refused".to_string()),
    )]);
    let aggregator = GraphAggregator::new(catalog, provider);

    let snapshot = aggregator.fetch_raw_counts(id(5)).await.unwrap();

    assert_eq!(snapshot.counts.edge_total, 0);
    assert_eq!(snapshot.counts.entity_total, 0);
    assert!(snapshot.counts.type_instance_counts.is_empty());
    assert!(snapshot.counts.edge_property_arity.is_empty());
    assert!(snapshot.counts.entity_property_arity.is_empty());
    match snapshot.source {
        CountSource::Recovered { reason } => assert!(reason.contains("connection refused")),
        other => panic!("Expected Recovered source, got {:?}", other),
    }
}

#[tokio::test]
async fn test_provider_error_is_forwarded_unchanged() {
    let catalog = MockCatalog::new(vec![graph(5, Some("u_locked"))]);
    let provider =
        MockCountProvider::new(vec![("u_locked", refused("Builder.Graph.Locked", "space locked"))]);
    let aggregator = GraphAggregator::new(catalog, provider);

    let result = aggregator.compute_simple_totals(id(5)).await;

    match result {
        Err(AppError::ProviderError { code, message }) => {
            assert_eq!(code, "Builder.Graph.Locked");
            assert_eq!(message, "space locked");
        }
        other => panic!("Expected ProviderError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_graph_without_database_is_not_counted() {
    let catalog = MockCatalog::new(vec![graph(2, None), graph(4, Some(""))]);
    let provider = MockCountProvider::new(vec![]);
    let aggregator = GraphAggregator::new(catalog, provider.clone());

    let unassigned = aggregator.compute_properties(id(2)).await.unwrap();
    let blank = aggregator.compute_properties(id(4)).await.unwrap();

    assert_eq!(unassigned.source, CountSource::Unassigned);
    assert_eq!(blank.source, CountSource::Unassigned);
    assert_eq!(unassigned.edges + unassigned.entities, 0);
    assert!(provider.queried().is_empty(), "engine must not be called");
}

#[tokio::test]
async fn test_graph_missing_from_catalog_reports_zero() {
    let catalog = MockCatalog::new(vec![]);
    let provider = MockCountProvider::new(vec![]);
    let aggregator = GraphAggregator::new(catalog, provider);

    let totals = aggregator.compute_simple_totals(id(99)).await.unwrap();

    assert_eq!(totals.properties, 0);
    assert_eq!(totals.source, CountSource::Unassigned);
}

#[tokio::test]
async fn test_failed_catalog_lookup_reports_zero() {
    let catalog = MockCatalog::new(vec![graph(4, Some("u_lost"))]).with_failing_lookups(&[4]);
    let provider = MockCountProvider::new(vec![("u_lost", totals(9, 9))]);
    let aggregator = GraphAggregator::new(catalog, provider.clone());

    let detail = aggregator.compute_properties(id(4)).await.unwrap();

    assert_eq!(detail.edges + detail.entities + detail.total_properties, 0);
    match detail.source {
        CountSource::CatalogUnavailable { reason } => assert!(reason.contains("Database error")),
        other => panic!("Expected CatalogUnavailable, got {:?}", other),
    }
    assert!(provider.queried().is_empty(), "engine must not be called");
}

#[tokio::test]
async fn test_provider_called_once_per_aggregation() {
    let catalog = MockCatalog::new(vec![graph(1, Some("u_once"))]);
    let provider = MockCountProvider::new(vec![("u_once", totals(1, 1))]);
    let aggregator = GraphAggregator::new(catalog, provider.clone());

    aggregator.compute_properties(id(1)).await.unwrap();

    assert_eq!(provider.queried(), vec!["u_once".to_string()]);
}
