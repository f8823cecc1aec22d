//! Layout Cache
//!
//! One memo entry per node slot. Same available box and same style version
//! means the node's stored rect is still correct and the solver skips it.

use crate::error::Result;
use crate::store::column;
use crate::NodeId;

/// Memo key of one node's last solve
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CacheEntry {
    pub available_width: f32,
    pub available_height: f32,
    pub style_version: u64,
    pub valid: bool,
}

impl CacheEntry {
    pub const EMPTY: CacheEntry = CacheEntry {
        available_width: 0.0,
        available_height: 0.0,
        style_version: 0,
        valid: false,
    };

    /// Whether the entry was stored for exactly these inputs and not
    /// invalidated since. Floats compare as bits.
    #[inline]
    pub fn is_valid(&self, available_width: f32, available_height: f32, style_version: u64) -> bool {
        self.valid
            && self.style_version == style_version
            && self.available_width.to_bits() == available_width.to_bits()
            && self.available_height.to_bits() == available_height.to_bits()
    }

    /// Record the inputs of a fresh solve
    #[inline]
    pub fn store(&mut self, available_width: f32, available_height: f32, style_version: u64) {
        self.available_width = available_width;
        self.available_height = available_height;
        self.style_version = style_version;
        self.valid = true;
    }

    /// Clear the valid flag, keeping the key
    #[inline]
    pub fn invalidate(&mut self) {
        self.valid = false;
    }
}

/// Cache statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Cache column for every node slot
pub(crate) struct LayoutCache {
    entries: Vec<CacheEntry>,
    stats: CacheStats,
}

impl LayoutCache {
    pub fn with_capacity(capacity: usize) -> Result<Self> {
        Ok(Self {
            entries: column(capacity, || CacheEntry::EMPTY)?,
            stats: CacheStats::default(),
        })
    }

    /// Check the entry for `node`, counting a hit or a miss
    pub fn lookup(&mut self, node: NodeId, available_width: f32, available_height: f32, version: u64) -> bool {
        let hit = self
            .entries
            .get(node.index())
            .is_some_and(|entry| entry.is_valid(available_width, available_height, version));

        if hit {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }
        hit
    }

    pub fn store(&mut self, node: NodeId, available_width: f32, available_height: f32, version: u64) {
        if let Some(entry) = self.entries.get_mut(node.index()) {
            entry.store(available_width, available_height, version);
        }
    }

    pub fn invalidate(&mut self, node: NodeId) {
        if let Some(entry) = self.entries.get_mut(node.index()) {
            entry.invalidate();
        }
    }

    /// Forget everything about a freed slot
    pub fn reset(&mut self, node: NodeId) {
        if let Some(entry) = self.entries.get_mut(node.index()) {
            *entry = CacheEntry::EMPTY;
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    pub fn footprint(&self) -> usize {
        self.entries.capacity() * std::mem::size_of::<CacheEntry>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_validity() {
        let mut entry = CacheEntry::EMPTY;
        assert!(!entry.is_valid(0.0, 0.0, 0));

        entry.store(100.0, 50.0, 7);
        assert!(entry.is_valid(100.0, 50.0, 7));
        assert!(!entry.is_valid(100.0, 50.0, 8));
        assert!(!entry.is_valid(101.0, 50.0, 7));
        assert!(!entry.is_valid(100.0, 49.0, 7));

        entry.invalidate();
        assert!(!entry.is_valid(100.0, 50.0, 7));
        assert_eq!(entry.style_version, 7);
    }

    #[test]
    fn test_bitwise_keys() {
        let mut entry = CacheEntry::EMPTY;
        entry.store(0.0, f32::NAN, 1);

        assert!(entry.is_valid(0.0, f32::NAN, 1));
        assert!(!entry.is_valid(-0.0, f32::NAN, 1));
    }

    #[test]
    fn test_lookup_counts() {
        let mut cache = LayoutCache::with_capacity(4).unwrap();
        let node = NodeId::new(2);

        assert!(!cache.lookup(node, 10.0, 10.0, 1));
        cache.store(node, 10.0, 10.0, 1);
        assert!(cache.lookup(node, 10.0, 10.0, 1));
        assert!(cache.lookup(node, 10.0, 10.0, 1));

        assert_eq!(cache.stats(), CacheStats { hits: 2, misses: 1 });
        assert!((cache.stats().hit_rate() - 2.0 / 3.0).abs() < 1e-9);

        cache.reset(node);
        assert!(!cache.lookup(node, 10.0, 10.0, 1));
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_hit_rate_empty() {
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }
}
