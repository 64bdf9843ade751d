//! Integration tests for GraphRepository.

use graphcount_core::GraphId;
use graphcount_core::traits::GraphCatalog;
use graphcount_db::GraphRepository;

use crate::integration::common::{insert_engine, insert_graph, setup_test_db};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_list_all_graphs_resolves_engine_url() {
    let (pool, _container) = setup_test_db().await;
    let engine = insert_engine(&pool, "nebula-a", "http://nebula-a:9669").await;
    let movies = insert_graph(&pool, "movies", Some("u_movies"), Some(engine)).await;
    let draft = insert_graph(&pool, "draft", None, None).await;

    let repo = GraphRepository::new(pool);
    let graphs = repo.list_all_graphs().await.unwrap();

    assert_eq!(graphs.len(), 2);
    assert_eq!(graphs[0].id, movies);
    assert_eq!(graphs[0].name, "movies");
    assert_eq!(graphs[0].db_name.as_deref(), Some("u_movies"));
    assert_eq!(graphs[0].engine_url.as_deref(), Some("http://nebula-a:9669"));

    assert_eq!(graphs[1].id, draft);
    assert_eq!(graphs[1].db_name, None);
    assert_eq!(graphs[1].engine_url, None);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_get_graph_by_id() {
    let (pool, _container) = setup_test_db().await;
    let engine = insert_engine(&pool, "nebula-b", "http://nebula-b:9669").await;
    let id = insert_graph(&pool, "finance", Some("u_finance"), Some(engine)).await;

    let repo = GraphRepository::new(pool);

    let found = repo
        .get_graph_by_id(GraphId::new(id).unwrap())
        .await
        .unwrap()
        .expect("graph should exist");
    assert_eq!(found.graph_db_id, Some(engine));
    assert_eq!(found.assigned_db_name(), Some("u_finance"));

    let missing = repo
        .get_graph_by_id(GraphId::new(id + 1000).unwrap())
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_graph_exists() {
    let (pool, _container) = setup_test_db().await;
    let id = insert_graph(&pool, "lonely", None, None).await;

    let repo = GraphRepository::new(pool);

    assert!(repo.graph_exists(GraphId::new(id).unwrap()).await.unwrap());
    assert!(!repo.graph_exists(GraphId::new(id + 1).unwrap()).await.unwrap());
    repo.health_check().await.unwrap();
}
