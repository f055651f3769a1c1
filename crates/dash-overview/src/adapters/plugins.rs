//! Plugin tab providers.

use crate::domain::PluginError;
use crate::ports::outbound::{PluginManager, Tab};
use async_trait::async_trait;
use shared_types::Record;
use tokio_util::sync::CancellationToken;

/// Contributes no tabs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPlugins;

#[async_trait]
impl PluginManager for NoPlugins {
    async fn tabs(
        &self,
        _cancel: &CancellationToken,
        _record: &Record,
    ) -> Result<Vec<Tab>, PluginError> {
        Ok(Vec::new())
    }
}

/// Contributes the same fixed tabs for every record.
#[derive(Debug, Clone, Default)]
pub struct StaticPlugins {
    tabs: Vec<Tab>,
}

impl StaticPlugins {
    pub fn new(tabs: Vec<Tab>) -> Self {
        Self { tabs }
    }
}

#[async_trait]
impl PluginManager for StaticPlugins {
    async fn tabs(
        &self,
        cancel: &CancellationToken,
        _record: &Record,
    ) -> Result<Vec<Tab>, PluginError> {
        if cancel.is_cancelled() {
            return Err(PluginError("tab retrieval canceled".into()));
        }
        Ok(self.tabs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::Component;

    #[tokio::test]
    async fn test_no_plugins() {
        let record = Record::build("example.com/v1", "Widget", Some("ns"), "w1");
        let tabs = NoPlugins
            .tabs(&CancellationToken::new(), &record)
            .await
            .unwrap();
        assert!(tabs.is_empty());
    }

    #[tokio::test]
    async fn test_static_plugins() {
        let record = Record::build("example.com/v1", "Widget", Some("ns"), "w1");
        let plugins = StaticPlugins::new(vec![Tab {
            name: "metrics".into(),
            contents: Component::text("cpu"),
        }]);

        let tabs = plugins
            .tabs(&CancellationToken::new(), &record)
            .await
            .unwrap();
        assert_eq!(tabs.len(), 1);
        assert_eq!(tabs[0].name, "metrics");
    }
}
