//! Client-side cache of backend state.
//!
//! One reactive cache per collection, refreshed wholesale with
//! last-response-wins semantics. The store also hosts the entitlement
//! queries that need cross-collection context (combo hydration).

mod cache;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::access::{self, AccessDecision};
use crate::model::{Combo, Course, EntityId, LiveClass, Order};

use cache::Cache;

/// Everything fetched in a single refresh cycle.
pub struct RefreshSnapshot {
    pub orders: Vec<Order>,
    pub courses: Vec<Course>,
    pub combos: Vec<Combo>,
    pub live_classes: Vec<LiveClass>,
}

/// Reactive storage for the signed-in user's view of the platform.
pub struct DataStore {
    orders: Cache<Order>,
    courses: Cache<Course>,
    combos: Cache<Combo>,
    live_classes: Cache<LiveClass>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DataStore {
    pub fn new() -> Self {
        let (last_refresh, _) = watch::channel(None);
        Self {
            orders: Cache::new(),
            courses: Cache::new(),
            combos: Cache::new(),
            live_classes: Cache::new(),
            last_refresh,
        }
    }

    /// Apply a full refresh. Each collection is replaced outright; a
    /// response that lost a record drops it here too (last response
    /// wins).
    pub fn apply_refresh(&self, snapshot: RefreshSnapshot, fetched_at: DateTime<Utc>) {
        self.orders.replace_all(
            snapshot
                .orders
                .into_iter()
                .map(|order| (order.id.clone(), order))
                .collect(),
        );
        self.courses.replace_all(
            snapshot
                .courses
                .into_iter()
                .map(|course| (course.id.clone(), course))
                .collect(),
        );
        self.combos.replace_all(
            snapshot
                .combos
                .into_iter()
                .map(|combo| (combo.id.clone(), combo))
                .collect(),
        );
        self.live_classes.replace_all(
            snapshot
                .live_classes
                .into_iter()
                .map(|class| (class.id.clone(), class))
                .collect(),
        );
        let _ = self.last_refresh.send(Some(fetched_at));
    }

    // ── Snapshots & lookups ──────────────────────────────────────────

    pub fn orders(&self) -> Arc<Vec<Arc<Order>>> {
        self.orders.snapshot()
    }

    pub fn courses(&self) -> Arc<Vec<Arc<Course>>> {
        self.courses.snapshot()
    }

    pub fn combos(&self) -> Arc<Vec<Arc<Combo>>> {
        self.combos.snapshot()
    }

    pub fn live_classes(&self) -> Arc<Vec<Arc<LiveClass>>> {
        self.live_classes.snapshot()
    }

    pub fn course(&self, id: &EntityId) -> Option<Arc<Course>> {
        self.courses.get(id)
    }

    pub fn combo(&self, id: &EntityId) -> Option<Arc<Combo>> {
        self.combos.get(id)
    }

    /// Courses any user may see: `published && admin_approved`.
    pub fn visible_courses(&self) -> Vec<Arc<Course>> {
        self.courses
            .snapshot()
            .iter()
            .filter(|course| course.is_visible())
            .cloned()
            .collect()
    }

    pub fn subscribe_live_classes(&self) -> watch::Receiver<Arc<Vec<Arc<LiveClass>>>> {
        self.live_classes.subscribe()
    }

    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.subscribe().borrow()
    }

    pub fn has_data(&self) -> bool {
        !self.courses.is_empty() || !self.orders.is_empty()
    }

    // ── Entitlement queries ──────────────────────────────────────────

    /// Resolve access to `course` at `now`.
    ///
    /// Combo orders the backend returned unhydrated (bare `comboId`, no
    /// course list) are filled in from the combo cache first; a combo
    /// that is in neither place contributes nothing (fail closed).
    pub fn resolve_access(&self, course: &EntityId, now: DateTime<Utc>) -> AccessDecision {
        let hydrated: Vec<Order> = self
            .orders
            .snapshot()
            .iter()
            .map(|order| self.hydrate_combo((**order).clone()))
            .collect();

        access::resolve_access(&hydrated, course, now)
    }

    fn hydrate_combo(&self, mut order: Order) -> Order {
        if let Some(grant) = order.combo.as_mut() {
            if grant.courses.is_none() {
                grant.courses = self
                    .combos
                    .get(&grant.id)
                    .map(|combo| combo.courses.clone());
            }
        }
        order
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{ComboGrant, Expiry, PaymentStatus, PlanType};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    fn unhydrated_combo_order(combo_id: &str) -> Order {
        Order {
            id: EntityId::from("ord1"),
            plan: PlanType::Combo,
            payment_status: PaymentStatus::Approved,
            active: true,
            course: None,
            combo: Some(ComboGrant {
                id: EntityId::from(combo_id),
                courses: None,
            }),
            starts_at: None,
            expiry: Expiry::Lifetime,
        }
    }

    fn combo(id: &str, courses: &[&str]) -> Combo {
        Combo {
            id: EntityId::from(id),
            title: "Bundle".into(),
            courses: courses.iter().map(|c| EntityId::from(*c)).collect(),
            duration_months: None,
            price: None,
        }
    }

    fn snapshot(orders: Vec<Order>, combos: Vec<Combo>) -> RefreshSnapshot {
        RefreshSnapshot {
            orders,
            courses: Vec::new(),
            combos,
            live_classes: Vec::new(),
        }
    }

    #[test]
    fn combo_hydration_from_the_combo_cache() {
        let store = DataStore::new();
        store.apply_refresh(
            snapshot(
                vec![unhydrated_combo_order("cmb1")],
                vec![combo("cmb1", &["C3", "C4"])],
            ),
            now(),
        );

        assert_eq!(
            store.resolve_access(&EntityId::from("C4"), now()),
            AccessDecision::Granted
        );
        assert_eq!(
            store.resolve_access(&EntityId::from("C5"), now()),
            AccessDecision::NotPurchased
        );
    }

    #[test]
    fn unresolvable_combo_fails_closed() {
        let store = DataStore::new();
        store.apply_refresh(snapshot(vec![unhydrated_combo_order("ghost")], Vec::new()), now());

        assert_eq!(
            store.resolve_access(&EntityId::from("C3"), now()),
            AccessDecision::NotPurchased
        );
    }

    #[test]
    fn refresh_overwrites_previous_state() {
        let store = DataStore::new();
        store.apply_refresh(
            snapshot(Vec::new(), vec![combo("cmb1", &["C1"])]),
            now(),
        );
        assert_eq!(store.combos().len(), 1);

        store.apply_refresh(snapshot(Vec::new(), Vec::new()), now());
        assert!(store.combos().is_empty());
        assert_eq!(store.last_refresh(), Some(now()));
    }

    #[test]
    fn visible_courses_filters_on_both_flags() {
        let store = DataStore::new();
        let make = |id: &str, published, approved| Course {
            id: EntityId::from(id),
            title: id.to_owned(),
            published,
            admin_approved: approved,
            price: None,
            instructor: None,
        };
        store.apply_refresh(
            RefreshSnapshot {
                orders: Vec::new(),
                courses: vec![
                    make("c1", true, true),
                    make("c2", true, false),
                    make("c3", false, true),
                ],
                combos: Vec::new(),
                live_classes: Vec::new(),
            },
            now(),
        );

        let visible = store.visible_courses();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, EntityId::from("c1"));
    }
}
