//! Resource-kind definition lookups.

use crate::domain::{DescribeError, DescribeRequest, DescribeResult};
use crate::ports::outbound::ObjectStore;
use shared_types::{ObjectKey, ResourceKindDefinition};
use tracing::debug;

/// Fetch and convert the definition named `name`.
pub async fn kind_definition(
    store: &dyn ObjectStore,
    definitions: &ObjectKey,
    request: &DescribeRequest,
    name: &str,
) -> DescribeResult<ResourceKindDefinition> {
    let key = definitions.clone().named(name);
    let record = request
        .guard(async {
            store
                .get(&request.cancel, &key)
                .await
                .map_err(|e| DescribeError::from_store(format!("resource kind {}", name), e))
        })
        .await?;

    Ok(ResourceKindDefinition::from_record(&record)?)
}

/// Names of every known resource kind, sorted. Empty when listing is denied.
pub async fn kind_names(
    store: &dyn ObjectStore,
    definitions: &ObjectKey,
    request: &DescribeRequest,
) -> DescribeResult<Vec<String>> {
    if let Err(e) = store.has_access(definitions, "list") {
        debug!(error = %e, "Resource kind listing denied");
        return Ok(Vec::new());
    }

    let records = request
        .guard(async {
            store
                .list(&request.cancel, definitions)
                .await
                .map_err(|e| DescribeError::from_store("list resource kinds", e))
        })
        .await?;

    let mut names = records
        .iter()
        .map(|record| ResourceKindDefinition::from_record(record).map(|d| d.name))
        .collect::<Result<Vec<_>, _>>()?;
    names.sort();
    Ok(names)
}
