//! # Describes Racing Reconciliation
//!
//! Readers hit the section and per-kind routes while kinds are added and
//! deleted from other tasks. Every read must see a consistent registry:
//! section output stays ordered, routes either resolve fully or not at all,
//! and the final state matches the last applied event per kind.

use super::fixtures::{definition, eventually, instance, service};
use dash_overview::{DescribeRequest, ErrorKind, InMemoryObjectStore, OverviewService};
use futures::future::join_all;
use shared_types::{Component, ContentResponse, View};
use std::sync::Arc;

const KINDS: usize = 10;

fn kind_name(i: usize) -> String {
    format!("k{:02}", i)
}

/// Store with `KINDS` definitions, each with one instance in `ns`.
async fn populated_store() -> Arc<InMemoryObjectStore> {
    let store = Arc::new(InMemoryObjectStore::new());
    for i in 0..KINDS {
        let def = definition(&kind_name(i), &format!("K{:02}", i));
        store.put(def.to_record()).await;
        store.put(instance(&def, "ns", "obj")).await;
    }
    store
}

/// Titles of the tables merged into a section response.
fn table_titles(response: &ContentResponse) -> Vec<String> {
    response
        .components
        .iter()
        .filter_map(Component::list_items)
        .flatten()
        .filter(|c| matches!(c.view, View::Table(_)))
        .filter_map(|c| match c.metadata.title.first().map(|t| &t.view) {
            Some(View::Text { value }) => Some(value.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_describes_race_adds_and_deletes() {
    let store = populated_store().await;
    let service = Arc::new(service(Arc::clone(&store)));
    let reconciler = Arc::clone(service.reconciler());

    let readers = (0..100).map(|i| {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            let request = DescribeRequest::new("ns");
            let section = service.describe_section(&request).await.unwrap();
            let titles = table_titles(&section);
            let mut sorted = titles.clone();
            sorted.sort();
            assert_eq!(titles, sorted, "section output must be name-ordered");
            assert!(titles.len() <= KINDS);

            let path = format!("/section/{}", kind_name(i % KINDS));
            match service.describe_path(&path, request).await {
                Ok(response) => assert_eq!(response.components.len(), 1),
                Err(e) => assert_eq!(e.kind(), ErrorKind::NotFound),
            }
        })
    });

    let writers = (0..100).map(|i| {
        let reconciler = Arc::clone(&reconciler);
        tokio::spawn(async move {
            let name = kind_name(i % KINDS);
            if i % 3 == 2 {
                reconciler.delete_kind(&name);
            } else {
                reconciler.add_kind(&name);
            }
            tokio::task::yield_now().await;
        })
    });

    let readers: Vec<_> = readers.collect();
    let writers: Vec<_> = writers.collect();
    for result in join_all(readers).await.into_iter().chain(join_all(writers).await) {
        result.unwrap();
    }

    assert_pairing(&service);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_final_state_follows_last_event() {
    let store = populated_store().await;
    let service = service(Arc::clone(&store));
    let reconciler = Arc::clone(service.reconciler());

    let tasks = (0..KINDS).map(|i| {
        let reconciler = Arc::clone(&reconciler);
        tokio::spawn(async move {
            let name = kind_name(i);
            for _ in 0..20 {
                reconciler.add_kind(&name);
                reconciler.delete_kind(&name);
            }
            if i % 2 == 0 {
                reconciler.add_kind(&name);
            }
        })
    });
    for result in join_all(tasks).await {
        result.unwrap();
    }

    let expected: Vec<String> = (0..KINDS).step_by(2).map(kind_name).collect();
    assert_eq!(service.reconciler().kinds(), expected);
    assert_pairing(&service);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_watch_driven_churn_settles() {
    let store = Arc::new(InMemoryObjectStore::new());
    let service = Arc::new(service(Arc::clone(&store)));
    let cancel = tokio_util::sync::CancellationToken::new();
    service.start(cancel.clone()).await;

    let churn = (0..KINDS).map(|i| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            let def = definition(&kind_name(i), &format!("K{:02}", i));
            store.put(def.to_record()).await;
            if i % 2 == 1 {
                store.remove(&def.to_record()).await;
            }
        })
    });
    let readers = (0..50).map(|_| {
        let service = Arc::clone(&service);
        tokio::spawn(async move {
            service
                .describe_section(&DescribeRequest::new("ns"))
                .await
                .unwrap();
        })
    });

    let churn: Vec<_> = churn.collect();
    let readers: Vec<_> = readers.collect();
    for result in join_all(churn).await.into_iter().chain(join_all(readers).await) {
        result.unwrap();
    }

    let expected: Vec<String> = (0..KINDS).step_by(2).map(kind_name).collect();
    assert!(eventually(|| service.reconciler().kinds() == expected).await);
    assert_pairing(&service);

    cancel.cancel();
}

/// Every section member resolves by both paths; nothing else is routed.
fn assert_pairing(service: &OverviewService) {
    let kinds = service.reconciler().kinds();
    for name in &kinds {
        let list = format!("/section/{}", name);
        let detail = format!("/section/{}/obj", name);
        assert!(service.routes().match_path(&list).is_ok(), "{list} unrouted");
        assert!(service.routes().match_path(&detail).is_ok(), "{detail} unrouted");
    }
    // Section route, if registered, plus two per live kind.
    let section_routes = usize::from(service.routes().contains("/section"));
    assert_eq!(service.routes().len(), section_routes + 2 * kinds.len());
}
