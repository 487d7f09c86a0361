//! Order-preserving entity removal
//!
//! Retired entities are dropped by rebuilding the list from survivors.

/// Collect the items `keep` accepts into a fresh list, preserving order.
///
/// The predicate may be stateful (e.g. tallying what it rejects); it is called
/// exactly once per item, front to back.
pub fn compact<T: Copy>(items: &[T], mut keep: impl FnMut(&T) -> bool) -> Vec<T> {
    items.iter().filter(|item| keep(item)).copied().collect()
}
