// Configuration for the tokenizer and the scratch buffer pool
//
// Both structs deserialize with every field optional so a host can load
// partial settings from JSON; missing fields take the defaults below.

use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};

/// How the tokenizer builds its output text
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BufferStrategy {
    /// Append matches to a growable scratch buffer as they are found
    Accumulate,
    /// Measure first, allocate the exact size, then write
    #[default]
    Exact,
}

/// Tokenizer settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Drop a surrounding `"` pair from matches that start and end with one
    pub strip_quotes: bool,
    pub strategy: BufferStrategy,
    /// Outputs up to this many bytes are built in pooled buffers; larger
    /// outputs go straight to the allocator
    pub exact_threshold: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            strip_quotes: true,
            strategy: BufferStrategy::Exact,
            exact_threshold: 8192,
        }
    }
}

impl TokenizerConfig {
    pub fn with_strip_quotes(mut self, strip_quotes: bool) -> Self {
        self.strip_quotes = strip_quotes;
        self
    }

    pub fn with_strategy(mut self, strategy: BufferStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_exact_threshold(mut self, exact_threshold: usize) -> Self {
        self.exact_threshold = exact_threshold;
        self
    }
}

/// Scratch buffer pool settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PoolConfig {
    /// Capacities of the size classes, in bytes, strictly ascending
    pub size_classes: Vec<usize>,
    /// Idle buffers kept per class; extra released buffers are dropped
    pub max_retained: usize,
    /// Buffers allocated per class up front
    pub prefill: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            size_classes: vec![32, 512, 32 * 512],
            max_retained: 32,
            prefill: 0,
        }
    }
}

impl PoolConfig {
    pub fn validate(&self) -> Result<()> {
        if self.size_classes.is_empty() {
            return Err(ExtractError::invalid_argument(
                "size_classes",
                "at least one size class is required",
            ));
        }
        if self.size_classes.contains(&0) {
            return Err(ExtractError::invalid_argument(
                "size_classes",
                "size classes must be non-zero",
            ));
        }
        if self.size_classes.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ExtractError::invalid_argument(
                "size_classes",
                "size classes must be strictly ascending",
            ));
        }
        if self.prefill > self.max_retained {
            return Err(ExtractError::invalid_argument(
                "prefill",
                "cannot prefill more buffers than a class retains",
            ));
        }
        Ok(())
    }
}
