//! Chunk-size tier table keyed by total content size.

/// One kibibyte.
pub const KIB: u64 = 1024;
/// One mebibyte.
pub const MIB: u64 = 1024 * KIB;
/// One gibibyte.
pub const GIB: u64 = 1024 * MIB;

/// Smallest chunk size a plan may carry.
pub const MIN_CHUNK_SIZE: u64 = 256 * KIB;
/// Largest chunk size a plan may carry.
pub const MAX_CHUNK_SIZE: u64 = 16 * MIB;

/// `(exclusive upper bound on total size, chunk size)`, applied top-down.
const CHUNK_TIERS: &[(u64, u64)] = &[
    (50 * MIB, 256 * KIB),
    (500 * MIB, MIB),
    (GIB, 2 * MIB),
    (4 * GIB, 4 * MIB),
    (16 * GIB, 8 * MIB),
    (64 * GIB, 16 * MIB),
];

/// Chunk size for content at or above the last tier bound (steps back
/// down from 16 MiB).
const OVERSIZE_CHUNK: u64 = 8 * MIB;

/// Picks the chunk size for `total_size` bytes of content.
#[must_use]
pub fn chunk_size_for(total_size: u64) -> u64 {
    CHUNK_TIERS
        .iter()
        .find(|(bound, _)| total_size < *bound)
        .map_or(OVERSIZE_CHUNK, |(_, chunk)| *chunk)
}

/// Returns `true` if `bytes` is a power of two within
/// `[MIN_CHUNK_SIZE, MAX_CHUNK_SIZE]`.
#[must_use]
pub fn is_valid_chunk_size(bytes: u64) -> bool {
    bytes.is_power_of_two() && (MIN_CHUNK_SIZE..=MAX_CHUNK_SIZE).contains(&bytes)
}
