//! # End-to-End Kind Lifecycle
//!
//! ```text
//! [Object Store] ──Added(definition)──→ [ReconciliationLoop]
//!                                           │
//!                    ┌──────────────────────┴──────────────────┐
//!                    ↓                                         ↓
//!             [RoutingTable]                          [SectionDescriber]
//!        /section/widgets, /section/widgets/{name}        member "widgets"
//!                    │                                         │
//!                    └────────────── describe ─────────────────┘
//! ```

use super::fixtures::{definition, eventually, instance, service, ROOT, TITLE};
use dash_overview::{
    DescribeRequest, ErrorKind, InMemoryObjectStore, ObjectStore, RouteError,
    RESOURCE_VIEWER_ACCESSOR, SUMMARY_ACCESSOR, YAML_ACCESSOR,
};
use shared_types::{title_from_str, Component, ContentResponse, ObjectKey, Table, View};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn tables(response: &ContentResponse) -> Vec<&Table> {
    response
        .components
        .iter()
        .filter_map(Component::list_items)
        .flatten()
        .filter_map(|c| match &c.view {
            View::Table(table) => Some(table),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_widgets_lifecycle() {
    let widgets = definition("widgets", "Widget");
    let store = Arc::new(InMemoryObjectStore::new());
    store.put(widgets.to_record()).await;
    store.put(instance(&widgets, "ns", "w1")).await;

    let service = service(Arc::clone(&store));
    let cancel = CancellationToken::new();
    service.start(cancel.clone()).await;

    // List route
    let list = service.routes().match_path("/section/widgets").unwrap();
    assert_eq!(list.pattern, "/section/widgets");
    let response = service
        .describe_path("/section/widgets", DescribeRequest::new("ns"))
        .await
        .unwrap();
    assert_eq!(response.title, title_from_str("Custom Resources / widgets"));
    let rows = &tables(&response)[0].rows;
    assert_eq!(rows.len(), 1);
    assert_eq!(
        rows[0].cell("Name"),
        Some(&Component::link("w1", "/section/widgets/w1"))
    );

    // Detail route
    let detail = service.routes().match_path("/section/widgets/w1").unwrap();
    assert_eq!(detail.pattern, "/section/widgets/{name}");
    let response = service
        .describe_path("/section/widgets/w1", DescribeRequest::new("ns"))
        .await
        .unwrap();
    assert_eq!(
        response.accessors(),
        vec![SUMMARY_ACCESSOR, RESOURCE_VIEWER_ACCESSOR, YAML_ACCESSOR]
    );

    // Section
    let section = service
        .describe_section(&DescribeRequest::new("ns"))
        .await
        .unwrap();
    assert_eq!(section.title, title_from_str(TITLE));
    assert_eq!(tables(&section).len(), 1);

    // Delete the kind
    store.remove(&widgets.to_record()).await;
    assert!(eventually(|| service.reconciler().kinds().is_empty()).await);

    for path in ["/section/widgets", "/section/widgets/w1"] {
        assert_eq!(
            service.routes().match_path(path).unwrap_err(),
            RouteError::NotFound(path.to_string())
        );
        let err = service
            .describe_path(path, DescribeRequest::new("ns"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    let section = service
        .describe_section(&DescribeRequest::new("ns"))
        .await
        .unwrap();
    assert!(tables(&section).is_empty());

    cancel.cancel();
}

#[tokio::test]
async fn test_kind_added_after_start() {
    let store = Arc::new(InMemoryObjectStore::new());
    let service = service(Arc::clone(&store));
    let cancel = CancellationToken::new();
    service.start(cancel.clone()).await;
    assert_eq!(service.routes().patterns(), vec![ROOT.to_string()]);

    let gadgets = definition("gadgets", "Gadget");
    store.put(gadgets.to_record()).await;
    store.put(instance(&gadgets, "ns", "g1")).await;

    assert!(eventually(|| service.reconciler().kinds() == vec!["gadgets"]).await);
    let response = service
        .describe_path("/section/gadgets/g1", DescribeRequest::new("ns"))
        .await
        .unwrap();
    assert_eq!(response.title[1], Component::text("g1"));

    cancel.cancel();
}

#[tokio::test]
async fn test_denied_list_is_visibly_empty() {
    let widgets = definition("widgets", "Widget");
    let store = Arc::new(InMemoryObjectStore::new());
    store.put(widgets.to_record()).await;
    store.put(instance(&widgets, "ns", "w1")).await;
    store.deny("list", "Widget");

    let service = service(Arc::clone(&store));
    let cancel = CancellationToken::new();
    service.start(cancel.clone()).await;

    let response = service
        .describe_path("/section/widgets", DescribeRequest::new("ns"))
        .await
        .unwrap();
    assert!(tables(&response)[0].rows.is_empty());

    // Empty tables are dropped from the merged section.
    let section = service
        .describe_section(&DescribeRequest::new("ns"))
        .await
        .unwrap();
    assert!(tables(&section).is_empty());

    cancel.cancel();
}

#[tokio::test]
async fn test_update_notification_replaces_kind() {
    let widgets = definition("widgets", "Widget");
    let store = Arc::new(InMemoryObjectStore::new());
    store.put(widgets.to_record()).await;

    let service = service(Arc::clone(&store));
    let cancel = CancellationToken::new();
    service.start(cancel.clone()).await;
    let before = service.routes().patterns();

    // Re-announcing the same definition is an idempotent replace.
    store.put(widgets.to_record()).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(service.routes().patterns(), before);
    assert_eq!(service.reconciler().kinds(), vec!["widgets"]);

    cancel.cancel();
}

#[tokio::test]
async fn test_canceled_watch_stops_reconciling() {
    let store = Arc::new(InMemoryObjectStore::new());
    let service = service(Arc::clone(&store));
    let cancel = CancellationToken::new();
    service.start(cancel.clone()).await;
    cancel.cancel();
    tokio::time::sleep(Duration::from_millis(20)).await;

    store.put(definition("widgets", "Widget").to_record()).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert!(service.reconciler().kinds().is_empty());
    let definitions = store
        .list(&CancellationToken::new(), &ObjectKey::kind_definitions())
        .await
        .unwrap();
    assert_eq!(definitions.len(), 1);
}
