/// Tuning knobs for a `SearchEngine`.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Shard count of the relevance accumulator used by parallel queries.
    pub accumulator_buckets: usize,
    /// Maximum number of hits returned by `find_top_documents`.
    pub max_results: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            accumulator_buckets: 100,
            max_results: 5,
        }
    }
}
