/// Nesting levels the parser accepts before reporting `NestingTooDeep`.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Compiled programs kept by a [`Calculator`](crate::Calculator).
pub const DEFAULT_CACHE_SIZE: usize = 128;

/// Tunables for parsing and evaluation.
///
/// The core never reads configuration from the environment; callers build
/// this value directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluatorConfig {
    /// Maximum parser recursion depth. Every parenthesised group, unary
    /// operator and `^` operand adds one level.
    pub max_depth: usize,
    /// Capacity of the compiled-program cache. Zero disables caching.
    pub cache_size: usize,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            cache_size: DEFAULT_CACHE_SIZE,
        }
    }
}

impl EvaluatorConfig {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_cache_size(mut self, cache_size: usize) -> Self {
        self.cache_size = cache_size;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = EvaluatorConfig::default()
            .with_max_depth(8)
            .with_cache_size(0);
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.cache_size, 0);

        let config = EvaluatorConfig::default();
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.cache_size, DEFAULT_CACHE_SIZE);
    }
}
