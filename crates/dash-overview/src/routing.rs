//! Routing table: maps path patterns to describers.
//!
//! Patterns are `/`-separated templates whose segments are either literals or
//! `{param}` placeholders. A placeholder matches exactly one non-empty
//! segment and its value is returned under the placeholder name.
//!
//! When several patterns match one path, the pattern with the longer literal
//! prefix (text before its first placeholder) wins; remaining ties go to the
//! most recent registration.
//!
//! Readers take a shared lock only long enough to pick an entry and clone its
//! `Arc`; describers are always invoked after the lock is released.

use crate::domain::RouteError;
use crate::ports::{Describer, PathFilter};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed path template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<Segment>,
    literal_prefix_len: usize,
}

impl PathPattern {
    /// Parse a template. Segments of the form `{param}` become placeholders;
    /// everything else is matched literally.
    pub fn parse(raw: &str) -> Self {
        let segments = split_path(raw)
            .into_iter()
            .map(|segment| {
                match segment
                    .strip_prefix('{')
                    .and_then(|s| s.strip_suffix('}'))
                    .filter(|name| !name.is_empty())
                {
                    Some(name) => Segment::Param(name.to_string()),
                    None => Segment::Literal(segment.to_string()),
                }
            })
            .collect();

        let literal_prefix_len = raw.find('{').unwrap_or(raw.len());

        Self {
            raw: raw.to_string(),
            segments,
            literal_prefix_len,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Length of the pattern text before its first placeholder.
    pub fn literal_prefix_len(&self) -> usize {
        self.literal_prefix_len
    }

    /// Extract placeholder values if `path` matches.
    pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
        self.matches_segments(&split_path(path))
    }

    fn matches_segments(&self, segments: &[&str]) -> Option<HashMap<String, String>> {
        if segments.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (pattern, actual) in self.segments.iter().zip(segments) {
            match pattern {
                Segment::Literal(literal) if literal == actual => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    params.insert(name.clone(), (*actual).to_string());
                }
            }
        }
        Some(params)
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

struct RouteEntry {
    pattern: PathPattern,
    describer: Arc<dyn Describer>,
    /// Registration order, used for the last tie-break.
    seq: u64,
}

/// Result of a successful lookup.
#[derive(Clone)]
pub struct RouteMatch {
    /// Pattern that matched.
    pub pattern: String,
    pub describer: Arc<dyn Describer>,
    /// Placeholder values extracted from the path.
    pub params: HashMap<String, String>,
}

impl fmt::Debug for RouteMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteMatch")
            .field("pattern", &self.pattern)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

/// Concurrent registry of path patterns.
pub struct RoutingTable {
    entries: RwLock<HashMap<String, Arc<RouteEntry>>>,
    next_seq: AtomicU64,
}

impl RoutingTable {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Add or replace the entry for `pattern`.
    pub fn register(&self, pattern: &str, describer: Arc<dyn Describer>) {
        let parsed = PathPattern::parse(pattern);

        let replaced = {
            let mut entries = self.entries.write();
            // Sequence numbers follow insert order only if taken under the lock.
            let entry = Arc::new(RouteEntry {
                pattern: parsed,
                describer,
                seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            });
            entries.insert(pattern.to_string(), entry).is_some()
        };

        debug!(pattern = %pattern, replaced, "Route registered");
    }

    /// Register a describer's path filter.
    pub fn register_filter(&self, filter: PathFilter) {
        self.register(&filter.pattern, filter.describer);
    }

    /// Remove the entry for `pattern`. Returns whether one existed.
    pub fn deregister(&self, pattern: &str) -> bool {
        let removed = self.entries.write().remove(pattern).is_some();
        if removed {
            debug!(pattern = %pattern, "Route deregistered");
        }
        removed
    }

    /// Find the describer serving `path`.
    pub fn match_path(&self, path: &str) -> Result<RouteMatch, RouteError> {
        let segments = split_path(path);

        let best = {
            let entries = self.entries.read();
            let mut best: Option<(Arc<RouteEntry>, HashMap<String, String>)> = None;
            for entry in entries.values() {
                let Some(params) = entry.pattern.matches_segments(&segments) else {
                    continue;
                };
                let wins = match &best {
                    None => true,
                    Some((current, _)) => {
                        (entry.pattern.literal_prefix_len(), entry.seq)
                            > (current.pattern.literal_prefix_len(), current.seq)
                    }
                };
                if wins {
                    best = Some((Arc::clone(entry), params));
                }
            }
            best
        };

        let (entry, params) = best.ok_or_else(|| RouteError::NotFound(path.to_string()))?;
        Ok(RouteMatch {
            pattern: entry.pattern.as_str().to_string(),
            describer: Arc::clone(&entry.describer),
            params,
        })
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.entries.read().contains_key(pattern)
    }

    /// Registered patterns in lexicographic order.
    pub fn patterns(&self) -> Vec<String> {
        let mut patterns: Vec<String> = self.entries.read().keys().cloned().collect();
        patterns.sort();
        patterns
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Default for RoutingTable {
    fn default() -> Self {
        Self::new()
    }
}
