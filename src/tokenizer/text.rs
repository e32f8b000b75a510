// Tokenizer output text
//
// Either a rented pool buffer (returned to the pool on drop) or a plain
// string sized exactly for a large output.

use std::fmt;
use std::ops::Deref;

use crate::utils::buffer_pool::PooledBuffer;

/// Concatenated tokens produced by a [`Tokenizer`](super::Tokenizer)
pub enum TokenText<'p> {
    Pooled(PooledBuffer<'p>),
    Owned(String),
}

impl TokenText<'_> {
    pub fn as_str(&self) -> &str {
        match self {
            TokenText::Pooled(buffer) => buffer.as_str(),
            TokenText::Owned(text) => text.as_str(),
        }
    }

    pub fn is_pooled(&self) -> bool {
        matches!(self, TokenText::Pooled(_))
    }

    /// Owned copy of the text; a pooled buffer goes back to its pool
    pub fn into_string(self) -> String {
        match self {
            TokenText::Pooled(buffer) => buffer.as_str().to_owned(),
            TokenText::Owned(text) => text,
        }
    }

    pub(super) fn buffer_mut(&mut self) -> &mut String {
        match self {
            TokenText::Pooled(buffer) => &mut **buffer,
            TokenText::Owned(text) => text,
        }
    }
}

impl Deref for TokenText<'_> {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl AsRef<str> for TokenText<'_> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for TokenText<'_> {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for TokenText<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl fmt::Display for TokenText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for TokenText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let source = if self.is_pooled() { "pooled" } else { "owned" };
        f.debug_struct("TokenText")
            .field("source", &source)
            .field("text", &self.as_str())
            .finish()
    }
}
