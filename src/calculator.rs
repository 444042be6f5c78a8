use crate::ast::{Compiler, Evaluator, Program};
use crate::config::EvaluatorConfig;
use crate::context::EvaluationContext;
use crate::error::EvaluationError;
use log::{debug, trace};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Evaluator front end that remembers compiled programs.
///
/// Expressions are parsed and compiled once, then served from an LRU cache
/// keyed by the exact expression text. Only successful compilations are
/// cached, and a cached program gives the same value or error as a fresh
/// evaluation, so the cache never changes results.
pub struct Calculator<'c> {
    evaluator: Evaluator<'c>,
    cache: Option<LruCache<String, Arc<Program>>>,
}

impl Calculator<'static> {
    /// Calculator over the standard builtins with the default configuration.
    pub fn new() -> Self {
        Self::with_context(EvaluationContext::standard(), EvaluatorConfig::default())
    }
}

impl Default for Calculator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'c> Calculator<'c> {
    pub fn with_context(context: &'c EvaluationContext, config: EvaluatorConfig) -> Self {
        Self {
            evaluator: Evaluator::new(context).with_config(config),
            cache: NonZeroUsize::new(config.cache_size).map(LruCache::new),
        }
    }

    pub fn evaluator(&self) -> &Evaluator<'c> {
        &self.evaluator
    }

    pub fn evaluate(&mut self, expression: &str) -> Result<f64, EvaluationError> {
        let program = self.compile(expression)?;
        Ok(program.execute()?)
    }

    /// Returns the compiled program for `expression`, compiling it on a cache miss.
    pub fn compile(&mut self, expression: &str) -> Result<Arc<Program>, EvaluationError> {
        if let Some(program) = self.cache.as_mut().and_then(|cache| cache.get(expression)) {
            trace!("Program cache hit for {:?}", expression);
            return Ok(Arc::clone(program));
        }

        let ast = self.evaluator.parse_expression(expression)?;
        let program = Arc::new(Compiler::new(self.evaluator.context()).compile(&ast)?);

        if let Some(cache) = self.cache.as_mut() {
            if let Some((evicted, _)) = cache.push(expression.to_string(), Arc::clone(&program)) {
                debug!("Evicted {:?} from program cache", evicted);
            }
        }
        Ok(program)
    }

    /// Number of programs currently cached.
    pub fn cached(&self) -> usize {
        self.cache.as_ref().map_or(0, LruCache::len)
    }

    pub fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
        }
    }
}
