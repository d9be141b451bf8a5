//! Test fixtures and data generators

use std::sync::atomic::{AtomicU64, Ordering};

use feed_core::{EntityId, MediaBlob};

/// Counter for unique test data
static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Get a unique suffix for test data
pub fn unique_suffix() -> u64 {
    COUNTER.fetch_add(1, Ordering::SeqCst)
}

/// A post id no other test uses
pub fn unique_post_id() -> EntityId {
    EntityId::new(format!("seed-{}", unique_suffix()))
}

/// Small PNG-typed blob with recognizable bytes
pub fn png(marker: u8) -> MediaBlob {
    MediaBlob::new("image/png", vec![0x89, b'P', b'N', b'G', marker])
}

pub fn jpeg(marker: u8) -> MediaBlob {
    MediaBlob::new("image/jpeg", vec![0xFF, 0xD8, marker])
}
