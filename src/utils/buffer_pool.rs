//! Bounded, thread-safe pool of reusable text buffers.
//!
//! Buffers are grouped into size classes. Renting picks the smallest class
//! that fits and pops an idle buffer (or allocates one at the class
//! capacity); requests larger than every class get a fresh, unpooled buffer.
//! Dropping the returned [`PooledBuffer`] clears it and puts it back in the
//! largest class its capacity still satisfies.

use std::ops::{Deref, DerefMut};
use std::sync::{LazyLock, Mutex, PoisonError};
use tracing::trace;

use crate::config::PoolConfig;
use crate::error::Result;

static SHARED_POOL: LazyLock<BufferPool> = LazyLock::new(BufferPool::default);

#[derive(Debug)]
struct SizeClass {
    capacity: usize,
    free: Mutex<Vec<String>>,
}

impl SizeClass {
    fn pop(&self) -> Option<String> {
        self.free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
    }

    fn push(&self, buffer: String, max_retained: usize) -> bool {
        let mut free = self.free.lock().unwrap_or_else(PoisonError::into_inner);
        if free.len() >= max_retained {
            return false;
        }
        free.push(buffer);
        true
    }

    fn idle(&self) -> usize {
        self.free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Pool of scratch `String` buffers shared across callers
#[derive(Debug)]
pub struct BufferPool {
    classes: Vec<SizeClass>,
    max_retained: usize,
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::build(PoolConfig::default())
    }
}

impl BufferPool {
    pub fn new(config: PoolConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: PoolConfig) -> Self {
        let classes = config
            .size_classes
            .iter()
            .map(|&capacity| SizeClass {
                capacity,
                free: Mutex::new(
                    (0..config.prefill)
                        .map(|_| String::with_capacity(capacity))
                        .collect(),
                ),
            })
            .collect();

        Self {
            classes,
            max_retained: config.max_retained,
        }
    }

    /// Process-wide pool with the default configuration
    pub fn shared() -> &'static BufferPool {
        &SHARED_POOL
    }

    /// Largest capacity served from a size class
    pub fn max_pooled_capacity(&self) -> usize {
        self.classes.last().map_or(0, |class| class.capacity)
    }

    /// An empty buffer with at least `min_capacity` bytes of capacity
    pub fn rent(&self, min_capacity: usize) -> PooledBuffer<'_> {
        let buffer = match self.classes.iter().find(|c| c.capacity >= min_capacity) {
            Some(class) => class
                .pop()
                .unwrap_or_else(|| String::with_capacity(class.capacity)),
            None => {
                trace!(min_capacity, "request exceeds every size class, allocating");
                String::with_capacity(min_capacity)
            }
        };

        PooledBuffer {
            buffer: Some(buffer),
            pool: self,
        }
    }

    fn release(&self, mut buffer: String) {
        let capacity = buffer.capacity();
        if capacity > self.max_pooled_capacity() {
            return;
        }
        let Some(class) = self.classes.iter().rev().find(|c| c.capacity <= capacity) else {
            return;
        };

        buffer.clear();
        if !class.push(buffer, self.max_retained) {
            trace!(capacity, "size class full, dropping buffer");
        }
    }

    /// Idle buffers currently held across all classes
    pub fn idle_buffers(&self) -> usize {
        self.classes.iter().map(SizeClass::idle).sum()
    }
}

/// A rented buffer; returns to its pool on drop
#[derive(Debug)]
pub struct PooledBuffer<'p> {
    buffer: Option<String>,
    pool: &'p BufferPool,
}

impl PooledBuffer<'_> {
    /// Detach the buffer from the pool
    pub fn into_string(mut self) -> String {
        self.buffer.take().unwrap_or_default()
    }
}

impl Deref for PooledBuffer<'_> {
    type Target = String;

    fn deref(&self) -> &String {
        // Only `into_string` and `drop` take the buffer, both consume self
        self.buffer.as_ref().expect("buffer present until drop")
    }
}

impl DerefMut for PooledBuffer<'_> {
    fn deref_mut(&mut self) -> &mut String {
        self.buffer.as_mut().expect("buffer present until drop")
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            self.pool.release(buffer);
        }
    }
}
