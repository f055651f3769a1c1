//! Shared fixtures for integration tests.

use dash_overview::{
    Collaborators, InMemoryObjectStore, OverviewConfig, OverviewService, SectionConfig,
};
use dash_telemetry::{init_logging, TelemetryConfig};
use shared_types::{Record, ResourceKindDefinition};
use std::sync::{Arc, Once};
use std::time::Duration;

pub const ROOT: &str = "/section";
pub const TITLE: &str = "Custom Resources";

static LOGGING: Once = Once::new();

/// Install the subscriber once per test binary. Output only with
/// `DASH_TEST_LOGS` set.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let config = TelemetryConfig {
            console_output: std::env::var("DASH_TEST_LOGS").is_ok(),
            ..TelemetryConfig::from_env().with_log_level("debug")
        };
        // Another harness may already own the global subscriber.
        let _ = init_logging(&config);
    });
}

/// Definition `name` of kind `kind` in group `example.com/v1`.
pub fn definition(name: &str, kind: &str) -> ResourceKindDefinition {
    ResourceKindDefinition {
        name: name.to_string(),
        group: "example.com".to_string(),
        version: "v1".to_string(),
        kind: kind.to_string(),
    }
}

pub fn instance(definition: &ResourceKindDefinition, namespace: &str, name: &str) -> Record {
    Record::build(
        &definition.api_version(),
        &definition.kind,
        Some(namespace),
        name,
    )
}

pub fn config() -> OverviewConfig {
    OverviewConfig {
        section: SectionConfig {
            root: ROOT.to_string(),
            title: TITLE.to_string(),
        },
        ..OverviewConfig::default()
    }
}

/// Service over `store` with default collaborators rooted at [`ROOT`].
pub fn service(store: Arc<InMemoryObjectStore>) -> OverviewService {
    init_test_logging();
    OverviewService::new(config(), Collaborators::with_defaults(store, ROOT))
        .expect("fixture config is valid")
}

/// Poll `condition` until it holds or roughly two seconds pass.
pub async fn eventually<F>(mut condition: F) -> bool
where
    F: FnMut() -> bool,
{
    for _ in 0..400 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    false
}
