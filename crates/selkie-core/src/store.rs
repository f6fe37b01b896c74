use rustc_hash::FxHashMap;

/// Fence-info prefix for transcoded fences. Recovery scans are anchored to
/// this exact alphabet so unrelated code blocks can never match.
pub const FENCE_ID_PREFIX: &str = "MERMAID_B64_";

/// Id prefix for opaque comment markers.
pub const MARKER_ID_PREFIX: &str = "mermaid-block-";

/// Which placeholder shape a captured block was encoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderVariant {
    /// HTML-comment marker; the external renderer passes it through
    /// unmodified and invisibly.
    Opaque,
    /// Fenced code block whose body is the base64-transcoded source; survives
    /// a full Markdown prose pass.
    TranscodedFence,
}

/// One captured diagram block.
///
/// `payload` holds the original source for [`PlaceholderVariant::Opaque`]
/// records and the base64 text for [`PlaceholderVariant::TranscodedFence`]
/// records (the fence comparison happens in transcoded space).
#[derive(Debug, Clone)]
pub struct DiagramRecord {
    pub id: String,
    pub payload: String,
    pub variant: PlaceholderVariant,
}

/// Registry of captured blocks for one generation run.
///
/// Capture appends, recovery reads; the `&mut self` / `&self` split keeps the
/// two phases separated, so recovery scans over independent documents may run
/// concurrently against a shared reference. [`PlaceholderStore::clear`] is the
/// boundary between generation runs; without it a long-lived process
/// accumulates records without bound. Id counters survive `clear` so an id is
/// never reused for the lifetime of the process.
#[derive(Debug, Default)]
pub struct PlaceholderStore {
    records: FxHashMap<String, DiagramRecord>,
    marker_seq: u64,
    fence_seq: u64,
}

impl PlaceholderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a payload and returns the freshly allocated id.
    pub fn insert(&mut self, variant: PlaceholderVariant, payload: String) -> String {
        let id = match variant {
            PlaceholderVariant::Opaque => {
                let id = format!("{MARKER_ID_PREFIX}{}", self.marker_seq);
                self.marker_seq += 1;
                id
            }
            PlaceholderVariant::TranscodedFence => {
                let id = format!("{FENCE_ID_PREFIX}{}", self.fence_seq);
                self.fence_seq += 1;
                id
            }
        };
        self.records.insert(
            id.clone(),
            DiagramRecord {
                id: id.clone(),
                payload,
                variant,
            },
        );
        id
    }

    pub fn get(&self, id: &str) -> Option<&DiagramRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops all records. Counters are kept, so ids stay unique across runs.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_distinct_and_namespaced_per_variant() {
        let mut store = PlaceholderStore::new();
        let a = store.insert(PlaceholderVariant::TranscodedFence, "Zm9v".into());
        let b = store.insert(PlaceholderVariant::TranscodedFence, "YmFy".into());
        let c = store.insert(PlaceholderVariant::Opaque, "graph TD".into());

        assert_ne!(a, b);
        assert!(a.starts_with(FENCE_ID_PREFIX));
        assert!(b.starts_with(FENCE_ID_PREFIX));
        assert!(c.starts_with(MARKER_ID_PREFIX));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn clear_drops_records_but_not_counters() {
        let mut store = PlaceholderStore::new();
        let first = store.insert(PlaceholderVariant::TranscodedFence, "Zm9v".into());
        store.clear();
        assert!(store.is_empty());
        assert!(store.get(&first).is_none());

        let second = store.insert(PlaceholderVariant::TranscodedFence, "YmFy".into());
        assert_ne!(first, second);
    }
}
