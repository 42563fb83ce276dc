use contracts::metrics::Page;
use contracts::system::auth::Role;

/// Default decision for anything the policy table does not name: an
/// unknown field, a page without rules, or an anonymous session.
///
/// The observed product behavior is fail-open (unlisted KPIs are shown,
/// and a session without a role sees everything). Flip this single
/// constant to tighten the whole service to fail-closed.
pub const FAIL_OPEN: bool = true;

/// Visibility rule for one (page, role) cell of the policy table.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// Every field on the page is visible.
    All,
    /// Everything visible except the listed fields.
    AllExcept(&'static [&'static str]),
    /// Explicit allow-list: only the listed fields are visible, the
    /// rest of the page is hidden. This is the one place the fail-open
    /// default does not apply, because the listed set is authoritative.
    Only(&'static [&'static str]),
}

impl Rule {
    fn allows(&self, field: &str) -> bool {
        match self {
            Rule::All => true,
            Rule::AllExcept(hidden) => !hidden.contains(&field),
            Rule::Only(allowed) => allowed.contains(&field),
        }
    }
}

/// The central visibility policy table.
///
/// This is the single authority for per-role field visibility; page
/// controllers must consult `visible` instead of encoding their own
/// role checks. Loaded once (static), never mutated at runtime.
fn rule(page: Page, role: Role) -> Rule {
    match (page, role) {
        (Page::Dashboard, Role::Admin) => Rule::All,
        (Page::Dashboard, Role::Manager) => Rule::AllExcept(&["conversion_rate"]),
        (Page::Dashboard, Role::Analyst) => {
            Rule::Only(&["total_sales", "total_orders", "total_customers"])
        }

        (Page::Reports, Role::Admin) => Rule::All,
        (Page::Reports, Role::Manager) => Rule::AllExcept(&["profit_growth"]),
        (Page::Reports, Role::Analyst) => Rule::Only(&["customer_growth", "average_order_growth"]),

        // Sales, inventory and purchase carry no role restrictions.
        (Page::Sales | Page::Inventory | Page::Purchase, _) => Rule::All,
    }
}

/// Decide whether `field` on `page` is visible to `role`.
///
/// Pure function of its arguments and the static table: no I/O, no
/// hidden state, safe to call from any context. An absent role is the
/// anonymous session and follows the `FAIL_OPEN` default.
pub fn visible(role: Option<Role>, page: Page, field: &str) -> bool {
    match role {
        None => FAIL_OPEN,
        Some(role) => rule(page, role).allows(field),
    }
}
