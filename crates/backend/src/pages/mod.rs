pub mod dashboard;
pub mod inventory;
pub mod purchase;
pub mod reports;
pub mod sales;

use contracts::metrics::{MetricBundle, MetricValue, Page};
use contracts::system::auth::Role;
use std::collections::BTreeMap;

use crate::shared::metrics::{self, cache, fallback, source::source};
use crate::shared::policy;

/// Obtain the raw bundle for a page: live source if it delivers a
/// well-formed payload, otherwise last-known-good, otherwise the static
/// fallback. Never errors: the page always renders with the best data
/// available.
pub(crate) async fn obtain_bundle(page: Page) -> MetricBundle {
    let generation = cache::begin(page);

    match source().fetch(page).await {
        Ok(bundle) => {
            if let Err(e) = metrics::validate(page, &bundle) {
                tracing::warn!("{page}: rejected upstream bundle: {e}; using fallback");
                return recover(page);
            }
            // A superseded fetch must not become the cached bundle; its
            // payload is still fine for the request that initiated it.
            cache::store_if_current(page, generation, bundle.clone());
            bundle
        }
        Err(e) => {
            tracing::warn!("{page}: fetch failed: {e}; using fallback");
            recover(page)
        }
    }
}

fn recover(page: Page) -> MetricBundle {
    cache::last_good(page).unwrap_or_else(|| fallback::bundle(page))
}

/// KPI map filtered through the visibility policy. Values pass through
/// unmodified; excluded keys are absent from the result, not nulled.
pub(crate) fn approved_kpis(
    bundle: &MetricBundle,
    page: Page,
    role: Option<Role>,
) -> BTreeMap<String, MetricValue> {
    bundle
        .kpis
        .iter()
        .filter(|(key, _)| policy::visible(role, page, key))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approved_kpis_passes_values_through_unmodified() {
        let bundle = fallback::bundle(Page::Dashboard);
        let approved = approved_kpis(&bundle, Page::Dashboard, Some(Role::Admin));
        assert_eq!(approved, bundle.kpis);
    }

    #[test]
    fn recover_uses_fallback_when_nothing_is_cached() {
        // No test stores a sales bundle, so the cache has no entry.
        assert_eq!(recover(Page::Sales), fallback::bundle(Page::Sales));
    }

    #[test]
    fn approved_kpis_drops_excluded_keys_entirely() {
        let bundle = fallback::bundle(Page::Dashboard);
        let approved = approved_kpis(&bundle, Page::Dashboard, Some(Role::Analyst));
        assert_eq!(approved.len(), 3);
        assert!(!approved.contains_key("conversion_rate"));
        assert!(!approved.contains_key("revenue_growth"));
    }
}
