// Shared utilities
//
// Text argument checks used by the extractor and the tokenizer, plus the
// scratch buffer pool.

use crate::error::{ExtractError, Result};

/// Bounded concurrent pool of reusable text buffers
pub mod buffer_pool;

/// True when `text` is empty or contains only whitespace
pub fn is_empty_or_whitespace(text: &str) -> bool {
    text.trim().is_empty()
}

/// Reject empty or whitespace-only text arguments
pub(crate) fn ensure_not_blank(text: &str, name: &'static str) -> Result<()> {
    if is_empty_or_whitespace(text) {
        return Err(ExtractError::EmptyInput { name });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_empty_or_whitespace() {
        assert!(is_empty_or_whitespace(""));
        assert!(is_empty_or_whitespace("  \t\r\n"));
        assert!(is_empty_or_whitespace("\u{3000}"));
        assert!(!is_empty_or_whitespace(" #p1# "));
    }

    #[test]
    fn test_ensure_not_blank_names_argument() {
        assert_eq!(
            ensure_not_blank(" ", "text"),
            Err(ExtractError::EmptyInput { name: "text" })
        );
        assert!(ensure_not_blank("x", "text").is_ok());
    }
}
