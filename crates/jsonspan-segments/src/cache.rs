use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex, PoisonError},
};

use bytes::Bytes;
use jsonspan::{Value, iterate_array, iterate_object};
use memchr::{memchr, memrchr};
use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::error::CacheError;

const NO_PATH: &[&str] = &[];

/// One segment hit: the opaque identifier a lookup returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentConfig {
    /// Downstream segment identifier.
    pub id: String,
}

impl SegmentConfig {
    /// The segment identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

/// A stored parameter value paired with the segment it selects.
#[derive(Debug, Clone)]
struct ParamSegment {
    value: String,
    segment: String,
}

type ParamMap = HashMap<String, Vec<ParamSegment>>;

/// Lazily materialized organization → parameter → segment store over one
/// raw JSON document.
///
/// The cache owns the document bytes and borrows spans out of them during
/// builds; it performs no I/O after construction. Materialization happens
/// per organization on first lookup and is serialized per key, so two
/// threads racing on the same organization trigger exactly one build.
pub struct SegmentCache {
    data: Bytes,
    orgs: Mutex<HashMap<String, Arc<OnceCell<Arc<ParamMap>>>>>,
}

impl SegmentCache {
    /// Build a cache over an already-loaded document.
    #[must_use]
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            orgs: Mutex::new(HashMap::new()),
        }
    }

    /// Load the document from disk once at startup.
    ///
    /// # Errors
    ///
    /// [`CacheError::Io`] when the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let raw = std::fs::read(path)?;
        Ok(Self::new(raw))
    }

    /// Segments registered for `param_key` under `org_key`, regardless of
    /// value: the "key exists" form, equivalent to querying with an empty
    /// value, so only segments stored with an empty value match.
    #[must_use]
    pub fn segments_for_key(&self, org_key: &str, param_key: &str) -> Vec<SegmentConfig> {
        self.segments_for_value(org_key, param_key, "")
    }

    /// Segments under `org_key`/`param_key` whose stored value matches
    /// `param_val`: an exact match always counts, and a non-empty query
    /// also matches any stored value containing it as a substring.
    /// Results keep document encounter order.
    #[must_use]
    pub fn segments_for_value(
        &self,
        org_key: &str,
        param_key: &str,
        param_val: &str,
    ) -> Vec<SegmentConfig> {
        if org_key.is_empty() || param_key.is_empty() {
            return Vec::new();
        }
        let params = self.materialize(org_key);
        let Some(segments) = params.get(param_key) else {
            return Vec::new();
        };
        segments
            .iter()
            .filter(|seg| {
                seg.value == param_val || (!param_val.is_empty() && seg.value.contains(param_val))
            })
            .map(|seg| SegmentConfig {
                id: seg.segment.clone(),
            })
            .collect()
    }

    fn materialize(&self, org_key: &str) -> Arc<ParamMap> {
        let cell = {
            let mut orgs = self.orgs.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(orgs.entry(org_key.to_owned()).or_default())
        };
        Arc::clone(cell.get_or_init(|| {
            debug!(org = org_key, "materializing organization segments");
            let params = build_org(&self.data, org_key);
            debug!(
                org = org_key,
                params = params.len(),
                "organization segments ready"
            );
            Arc::new(params)
        }))
    }
}

/// Scan the top-level organization array and build the parameter map for
/// one organization, skipping every other organization as a whole span. An
/// absent or malformed organization yields an empty map, which the cache
/// stores as the definitive answer for this document.
fn build_org(data: &Bytes, org_key: &str) -> ParamMap {
    for org in iterate_array(data.clone(), NO_PATH) {
        let Ok(org) = org else {
            warn!(org = org_key, "segment document is malformed");
            return ParamMap::new();
        };
        for member in iterate_object(org.into_bytes(), NO_PATH) {
            let Ok(member) = member else {
                warn!(org = org_key, "organization entry is malformed");
                return ParamMap::new();
            };
            if member.key() == org_key.as_bytes() {
                // Early return drops the outer stream and cancels its
                // worker mid-iteration.
                return build_params(member.into_parts().1);
            }
        }
    }
    ParamMap::new()
}

/// Build the parameter → segments map from an organization's parameter
/// array. A violation partway keeps what was already built; the emitted
/// spans before an error stay valid.
fn build_params(params: Value) -> ParamMap {
    let mut map = ParamMap::new();
    for param in iterate_array(params.into_bytes(), NO_PATH) {
        let Ok(param) = param else {
            warn!("parameter array is malformed");
            return map;
        };
        for member in iterate_object(param.into_bytes(), NO_PATH) {
            let Ok(member) = member else {
                warn!("parameter entry is malformed");
                return map;
            };
            let name = String::from_utf8_lossy(member.key()).into_owned();
            let (_, segments_value) = member.into_parts();
            let segments = build_segments(segments_value);
            map.entry(name).or_default().extend(segments);
        }
    }
    map
}

fn build_segments(segments: Value) -> Vec<ParamSegment> {
    let mut out = Vec::new();
    for seg in iterate_array(segments.into_bytes(), NO_PATH) {
        let Ok(seg) = seg else {
            warn!("segment array is malformed");
            return out;
        };
        match parse_segment(seg.raw()) {
            Some(parsed) => out.push(parsed),
            None => warn!("segment entry has no quoted strings; skipped"),
        }
    }
    out
}

/// A segment entry's parameter value is its first quoted string and its
/// segment id the last one; whatever sits between them is not interpreted.
fn parse_segment(raw: &[u8]) -> Option<ParamSegment> {
    let first = memchr(b'"', raw)?;
    let value_end = memchr(b'"', &raw[first + 1..])? + first + 1;
    let last = memrchr(b'"', raw)?;
    let id_start = memrchr(b'"', &raw[..last])? + 1;
    let value = String::from_utf8_lossy(&raw[first + 1..value_end]).into_owned();
    let segment = String::from_utf8_lossy(&raw[id_start..last]).into_owned();
    Some(ParamSegment { value, segment })
}
