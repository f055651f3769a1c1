//! # Core Domain Entities
//!
//! Records served by the object store and the keys used to address them.
//!
//! ## Clusters
//!
//! - **Records**: `Record`, `OwnerReference`
//! - **Addressing**: `ObjectKey`, `LabelSet`
//! - **Resource kinds**: `ResourceKindDefinition`

use crate::errors::ConversionError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// API version of resource-kind definitions.
pub const KIND_DEFINITION_API_VERSION: &str = "apiextensions.k8s.io/v1beta1";

/// Kind of resource-kind definitions.
pub const KIND_DEFINITION_KIND: &str = "CustomResourceDefinition";

// =============================================================================
// CLUSTER A: RECORDS
// =============================================================================

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

/// A typed but schemaless document held by the object store.
///
/// The body is a JSON object carrying `apiVersion`, `kind` and `metadata`.
/// Everything else is opaque to this workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Value);

impl Record {
    /// Wrap a raw JSON document.
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Build a minimal record with the standard identifying fields.
    pub fn build(api_version: &str, kind: &str, namespace: Option<&str>, name: &str) -> Self {
        let mut metadata = serde_json::json!({ "name": name });
        if let Some(ns) = namespace {
            metadata["namespace"] = Value::String(ns.to_string());
        }
        Self(serde_json::json!({
            "apiVersion": api_version,
            "kind": kind,
            "metadata": metadata,
        }))
    }

    /// Set a label, returning the updated record.
    ///
    /// Records whose body or `metadata` is not a JSON object are returned
    /// unchanged.
    pub fn with_label(mut self, key: &str, value: &str) -> Self {
        let metadata = self
            .0
            .as_object_mut()
            .map(|body| body.entry("metadata").or_insert_with(empty_object))
            .and_then(Value::as_object_mut);
        if let Some(metadata) = metadata {
            let labels = metadata.entry("labels").or_insert_with(empty_object);
            if !labels.is_object() {
                *labels = empty_object();
            }
            labels[key] = Value::String(value.to_string());
        }
        self
    }

    /// Set a top-level field (e.g. `spec`), returning the updated record.
    /// No-op when the body is not a JSON object.
    pub fn with_field(mut self, field: &str, value: Value) -> Self {
        if let Some(body) = self.0.as_object_mut() {
            body.insert(field.to_string(), value);
        }
        self
    }

    /// Raw document.
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Consume into the raw document.
    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn api_version(&self) -> &str {
        self.0["apiVersion"].as_str().unwrap_or_default()
    }

    pub fn kind(&self) -> &str {
        self.0["kind"].as_str().unwrap_or_default()
    }

    /// `metadata.name`, empty when absent.
    pub fn name(&self) -> &str {
        self.0["metadata"]["name"].as_str().unwrap_or_default()
    }

    /// `metadata.namespace`; `None` for cluster-scoped records.
    pub fn namespace(&self) -> Option<&str> {
        self.0["metadata"]["namespace"].as_str()
    }

    /// `metadata.labels` as an ordered label set.
    pub fn labels(&self) -> LabelSet {
        let mut labels = LabelSet::new();
        if let Some(map) = self.0["metadata"]["labels"].as_object() {
            for (k, v) in map {
                if let Some(v) = v.as_str() {
                    labels.insert(k, v);
                }
            }
        }
        labels
    }

    /// `metadata.ownerReferences`, skipping malformed entries.
    pub fn owner_references(&self) -> Vec<OwnerReference> {
        self.0["metadata"]["ownerReferences"]
            .as_array()
            .map(|refs| {
                refs.iter()
                    .filter_map(|r| serde_json::from_value(r.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Reference from a record to the record that owns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerReference {
    pub api_version: String,
    pub kind: String,
    pub name: String,
}

// =============================================================================
// CLUSTER B: ADDRESSING
// =============================================================================

/// Ordered label map used both as record labels and as a selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LabelSet(BTreeMap<String, String>);

impl LabelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Selector semantics: every label in `self` is present in `labels`
    /// with the same value. An empty selector matches everything.
    pub fn matches(&self, labels: &LabelSet) -> bool {
        self.0
            .iter()
            .all(|(k, v)| labels.get(k) == Some(v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LabelSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl fmt::Display for LabelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (k, v) in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            write!(f, "{}={}", k, v)?;
            first = false;
        }
        Ok(())
    }
}

/// Structured key addressing one record or a set of records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectKey {
    /// Namespace; `None` addresses every namespace (or cluster scope).
    pub namespace: Option<String>,
    pub api_version: String,
    pub kind: String,
    /// Record name; `None` addresses every record of the kind.
    pub name: Option<String>,
    /// Label selector applied to list operations.
    pub selector: Option<LabelSet>,
}

impl ObjectKey {
    pub fn new(api_version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            api_version: api_version.into(),
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Key addressing every resource-kind definition.
    pub fn kind_definitions() -> Self {
        Self::new(KIND_DEFINITION_API_VERSION, KIND_DEFINITION_KIND)
    }

    /// Set the namespace. Empty strings mean "all namespaces".
    pub fn in_namespace(mut self, namespace: &str) -> Self {
        self.namespace = if namespace.is_empty() {
            None
        } else {
            Some(namespace.to_string())
        };
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_selector(mut self, selector: Option<LabelSet>) -> Self {
        self.selector = selector;
        self
    }

    /// Whether `record` falls inside the set this key addresses.
    pub fn covers(&self, record: &Record) -> bool {
        if record.api_version() != self.api_version || record.kind() != self.kind {
            return false;
        }
        if let Some(ns) = &self.namespace {
            if record.namespace() != Some(ns.as_str()) {
                return false;
            }
        }
        if let Some(name) = &self.name {
            if record.name() != name {
                return false;
            }
        }
        match &self.selector {
            Some(selector) => selector.matches(&record.labels()),
            None => true,
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.api_version, self.kind)?;
        if let Some(ns) = &self.namespace {
            write!(f, " ns={}", ns)?;
        }
        if let Some(name) = &self.name {
            write!(f, " name={}", name)?;
        }
        if let Some(selector) = self.selector.as_ref().filter(|s| !s.is_empty()) {
            write!(f, " selector={}", selector)?;
        }
        Ok(())
    }
}

// =============================================================================
// CLUSTER C: RESOURCE KINDS
// =============================================================================

/// A dynamically discovered resource type.
///
/// Immutable once observed; an update notification supersedes it with a
/// freshly converted value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceKindDefinition {
    pub name: String,
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl ResourceKindDefinition {
    /// `group/version`, or the bare version for the core group.
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    /// Key addressing instances of this kind.
    pub fn instance_key(&self) -> ObjectKey {
        ObjectKey::new(self.api_version(), self.kind.clone())
    }

    /// Convert a definition record.
    ///
    /// `spec.version` wins; otherwise the first served entry of
    /// `spec.versions` is used.
    pub fn from_record(record: &Record) -> Result<Self, ConversionError> {
        let value = record.value();
        let name = record.name();
        if name.is_empty() {
            return Err(ConversionError::MissingField {
                field: "metadata.name",
                record: "<unnamed>".to_string(),
            });
        }

        let spec = &value["spec"];
        let missing = |field: &'static str| ConversionError::MissingField {
            field,
            record: name.to_string(),
        };

        let group = spec["group"]
            .as_str()
            .ok_or_else(|| missing("spec.group"))?
            .to_string();
        let kind = spec["names"]["kind"]
            .as_str()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| missing("spec.names.kind"))?
            .to_string();

        let version = match spec["version"].as_str() {
            Some(v) if !v.is_empty() => v.to_string(),
            _ => spec["versions"]
                .as_array()
                .and_then(|versions| {
                    versions
                        .iter()
                        .find(|v| v["served"].as_bool().unwrap_or(true))
                        .and_then(|v| v["name"].as_str())
                })
                .ok_or_else(|| missing("spec.version"))?
                .to_string(),
        };

        Ok(Self {
            name: name.to_string(),
            group,
            version,
            kind,
        })
    }

    /// Render this definition as a record, the inverse of [`Self::from_record`].
    pub fn to_record(&self) -> Record {
        Record::build(KIND_DEFINITION_API_VERSION, KIND_DEFINITION_KIND, None, &self.name)
            .with_field(
                "spec",
                serde_json::json!({
                    "group": self.group,
                    "version": self.version,
                    "names": { "kind": self.kind },
                }),
            )
    }
}
