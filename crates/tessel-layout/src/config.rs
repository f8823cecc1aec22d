//! Engine Configuration

/// Layout engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutConfig {
    /// Maximum number of live nodes. Every column is reserved up front.
    pub capacity: usize,

    /// Sibling count at which the clamp pass fans out across threads
    /// (only with the `parallel` feature)
    pub parallel_clamp_threshold: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            parallel_clamp_threshold: 4096,
        }
    }
}

impl LayoutConfig {
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_parallel_clamp_threshold(mut self, threshold: usize) -> Self {
        self.parallel_clamp_threshold = threshold;
        self
    }
}
