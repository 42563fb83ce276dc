use contracts::metrics::{MetricBundle, Page};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Default)]
struct Entry {
    generation: u64,
    bundle: Option<MetricBundle>,
}

static CACHE: Lazy<RwLock<HashMap<Page, Entry>>> = Lazy::new(|| RwLock::new(HashMap::new()));

/// Start a new fetch for `page` and return its generation. A later
/// `store_if_current` with this generation succeeds only while no newer
/// fetch has been started, so a superseded response can never overwrite
/// a fresher one (stale-response guard).
pub fn begin(page: Page) -> u64 {
    let mut cache = CACHE.write().expect("bundle cache lock poisoned");
    let entry = cache.entry(page).or_default();
    entry.generation += 1;
    entry.generation
}

/// Record a successfully fetched bundle as the last-known-good value
/// for `page`, unless the fetch has been superseded. Returns whether
/// the bundle was stored.
pub fn store_if_current(page: Page, generation: u64, bundle: MetricBundle) -> bool {
    let mut cache = CACHE.write().expect("bundle cache lock poisoned");
    let entry = cache.entry(page).or_default();
    if entry.generation != generation {
        tracing::debug!("{page}: discarding stale bundle (generation {generation})");
        return false;
    }
    entry.bundle = Some(bundle);
    true
}

/// Last successfully fetched bundle for `page`, if any. Preferred over
/// the static fallback when the live source fails.
pub fn last_good(page: Page) -> Option<MetricBundle> {
    let cache = CACHE.read().expect("bundle cache lock poisoned");
    cache.get(&page).and_then(|e| e.bundle.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::metrics::fallback;

    // All tests share one global cache, so each uses its own page.

    #[test]
    fn stale_store_is_discarded() {
        let page = Page::Purchase;
        let older = begin(page);
        let newer = begin(page);

        assert!(!store_if_current(page, older, fallback::bundle(page)));
        assert!(last_good(page).is_none());

        assert!(store_if_current(page, newer, fallback::bundle(page)));
        assert_eq!(last_good(page), Some(fallback::bundle(page)));
    }

    #[test]
    fn last_good_survives_later_failed_fetches() {
        let page = Page::Inventory;
        let generation = begin(page);
        assert!(store_if_current(page, generation, fallback::bundle(page)));

        // A newer fetch that never stores (e.g. network error) leaves
        // the previous bundle available.
        let _abandoned = begin(page);
        assert_eq!(last_good(page), Some(fallback::bundle(page)));
    }
}
