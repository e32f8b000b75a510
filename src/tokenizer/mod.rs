//! Multi-pattern tokenizer.
//!
//! Scans a block of text once per pattern and concatenates the matched
//! substrings. Output is grouped by pattern, in the order the patterns are
//! given: every match of the first pattern comes before any match of the
//! second, whatever their positions in the text.
//!
//! Two buffer strategies produce identical output:
//!
//! - [`BufferStrategy::Accumulate`] appends into a pooled scratch buffer that
//!   grows as needed.
//! - [`BufferStrategy::Exact`] measures the output first, then writes into a
//!   buffer of exactly that size. Small outputs use a pooled buffer, large
//!   ones (whole-file aggregates) a single allocation. The write pass never
//!   reallocates.

mod text;

pub use text::TokenText;

use tracing::trace;

use crate::config::{BufferStrategy, TokenizerConfig};
use crate::error::{ExtractError, Result};
use crate::extractors::patterns::Pattern;
use crate::utils::buffer_pool::BufferPool;
use crate::utils::ensure_not_blank;

/// Tokenizer bound to a configuration and a buffer pool
#[derive(Debug, Clone)]
pub struct Tokenizer<'p> {
    config: TokenizerConfig,
    pool: &'p BufferPool,
}

impl Default for Tokenizer<'static> {
    fn default() -> Self {
        Self::new(TokenizerConfig::default())
    }
}

impl Tokenizer<'static> {
    /// Tokenizer drawing scratch buffers from the shared pool
    pub fn new(config: TokenizerConfig) -> Self {
        Self::with_pool(config, BufferPool::shared())
    }
}

impl<'p> Tokenizer<'p> {
    pub fn with_pool(config: TokenizerConfig, pool: &'p BufferPool) -> Self {
        Self { config, pool }
    }

    pub fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Matched substrings, grouped by pattern, borrowed from `text`
    pub fn tokens<'t>(&self, text: &'t str, patterns: &[&Pattern]) -> Result<Vec<&'t str>> {
        check_arguments(text, patterns)?;
        Ok(matches(text, patterns, self.config.strip_quotes).collect())
    }

    /// Concatenated matches of a single pattern
    pub fn tokenize(&self, text: &str, pattern: &Pattern) -> Result<TokenText<'p>> {
        self.tokenize_all(text, &[pattern])
    }

    /// Concatenated matches of every pattern, using the configured strategy
    pub fn tokenize_all(&self, text: &str, patterns: &[&Pattern]) -> Result<TokenText<'p>> {
        match self.config.strategy {
            BufferStrategy::Accumulate => self.tokenize_accumulate(text, patterns),
            BufferStrategy::Exact => self.tokenize_exact(text, patterns),
        }
    }

    /// Single pass into a growable scratch buffer
    pub fn tokenize_accumulate(&self, text: &str, patterns: &[&Pattern]) -> Result<TokenText<'p>> {
        check_arguments(text, patterns)?;

        let mut buffer = self
            .pool
            .rent(text.len().min(self.config.exact_threshold));
        for token in matches(text, patterns, self.config.strip_quotes) {
            buffer.push_str(token);
        }

        trace!(
            patterns = patterns.len(),
            bytes = buffer.len(),
            "accumulated tokens"
        );
        Ok(TokenText::Pooled(buffer))
    }

    /// Measure pass, exact allocation, write pass
    pub fn tokenize_exact(&self, text: &str, patterns: &[&Pattern]) -> Result<TokenText<'p>> {
        check_arguments(text, patterns)?;
        let strip = self.config.strip_quotes;

        let size: usize = matches(text, patterns, strip).map(str::len).sum();

        let mut output = if size <= self.config.exact_threshold {
            TokenText::Pooled(self.pool.rent(size))
        } else {
            TokenText::Owned(String::with_capacity(size))
        };

        {
            let buffer = output.buffer_mut();
            let capacity = buffer.capacity();
            for token in matches(text, patterns, strip) {
                buffer.push_str(token);
            }
            debug_assert_eq!(buffer.len(), size);
            debug_assert_eq!(buffer.capacity(), capacity);
        }

        trace!(
            patterns = patterns.len(),
            bytes = size,
            pooled = output.is_pooled(),
            "wrote exact tokens"
        );
        Ok(output)
    }

    /// Number of non-empty matches of `pattern`
    pub fn count_matches(&self, text: &str, pattern: &Pattern) -> Result<usize> {
        ensure_not_blank(text, "text")?;
        Ok(pattern.find_iter(text).filter(|m| !m.is_empty()).count())
    }

    pub fn has_match(&self, text: &str, pattern: &Pattern) -> Result<bool> {
        ensure_not_blank(text, "text")?;
        Ok(pattern.is_match(text))
    }

    /// Leftmost match of `pattern`, quote-stripped per configuration
    pub fn first_match<'t>(&self, text: &'t str, pattern: &Pattern) -> Result<Option<&'t str>> {
        ensure_not_blank(text, "text")?;
        Ok(pattern
            .find_iter(text)
            .find(|m| !m.is_empty())
            .map(|m| strip_quotes(m, self.config.strip_quotes)))
    }
}

/// Concatenated matches of `pattern` in `text`
pub fn tokenize(text: &str, pattern: &Pattern, strip_quotes: bool) -> Result<String> {
    let config = TokenizerConfig::default().with_strip_quotes(strip_quotes);
    Ok(Tokenizer::new(config).tokenize(text, pattern)?.into_string())
}

/// Concatenated matches of every pattern, grouped by pattern order
pub fn tokenize_all(text: &str, patterns: &[&Pattern], strip_quotes: bool) -> Result<String> {
    let config = TokenizerConfig::default().with_strip_quotes(strip_quotes);
    Ok(Tokenizer::new(config)
        .tokenize_all(text, patterns)?
        .into_string())
}

fn check_arguments(text: &str, patterns: &[&Pattern]) -> Result<()> {
    ensure_not_blank(text, "text")?;
    if patterns.is_empty() {
        return Err(ExtractError::invalid_argument(
            "patterns",
            "at least one pattern is required",
        ));
    }
    Ok(())
}

fn matches<'a, 't: 'a>(
    text: &'t str,
    patterns: &'a [&'a Pattern],
    strip: bool,
) -> impl Iterator<Item = &'t str> + 'a {
    patterns
        .iter()
        .copied()
        .flat_map(move |pattern| pattern.find_iter(text))
        .filter(|m| !m.is_empty())
        .map(move |m| strip_quotes(m, strip))
}

/// Drop a surrounding `"` pair when `strip` is set and the token has one
fn strip_quotes(token: &str, strip: bool) -> &str {
    if strip && token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        &token[1..token.len() - 1]
    } else {
        token
    }
}
