// ── Portal facade ──
//
// Central entry point for a user's session against the backend.
// `connect()` fetches an initial snapshot, then keeps two background
// tasks: a periodic full refresh and a 1 Hz countdown ticker that
// reclassifies live-class phases. `oneshot()` fetches once with no
// background tasks, for single CLI invocations.
//
// Refresh failures after the initial snapshot never clear the store --
// the previous response stays current, the state degrades, and a manual
// `refresh()` is the retry path.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::{Duration as TokioDuration, interval};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use learnhub_api::{ApiClient, TransportConfig};

use crate::access::AccessDecision;
use crate::clock::Clock;
use crate::config::PortalConfig;
use crate::convert;
use crate::error::CoreError;
use crate::model::{Combo, Course, EntityId, Expiry, LiveClass, PaymentStatus, PlanType};
use crate::renewal::{self, ExtensionPreview};
use crate::schedule::{self, SessionPhase};
use crate::store::{DataStore, RefreshSnapshot};

/// Where the portal stands with the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Online,
    /// A refresh failed; the cache still holds the previous response.
    Degraded { message: String },
    Closed,
}

/// One live class's countdown badge state, as published by the ticker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LivePhase {
    pub id: EntityId,
    pub title: String,
    pub phase: SessionPhase,
}

/// Facade over the API client, cache, and background tasks.
pub struct Portal {
    api: Arc<ApiClient>,
    store: Arc<DataStore>,
    clock: Arc<dyn Clock>,
    cancel: CancellationToken,
    state: watch::Sender<ConnectionState>,
    phases: watch::Sender<Arc<Vec<LivePhase>>>,
}

impl Portal {
    /// Connect, fetch the initial snapshot, and start background tasks.
    ///
    /// A failed initial fetch is an error -- there is nothing to show --
    /// whereas later refresh failures only degrade the state.
    pub async fn connect(config: PortalConfig, clock: Arc<dyn Clock>) -> Result<Self, CoreError> {
        let portal = Self::build(&config, clock)?;

        let _ = portal.state.send(ConnectionState::Connecting);
        portal.refresh().await?;
        let _ = portal.state.send(ConnectionState::Online);

        if config.refresh_interval_secs > 0 {
            portal.spawn_refresh_task(config.refresh_interval_secs);
        }
        portal.spawn_ticker();

        Ok(portal)
    }

    /// Fetch one snapshot and return, with no background tasks.
    pub async fn oneshot(config: PortalConfig, clock: Arc<dyn Clock>) -> Result<Self, CoreError> {
        let portal = Self::build(&config, clock)?;
        portal.refresh().await?;
        let _ = portal.state.send(ConnectionState::Online);
        Ok(portal)
    }

    fn build(config: &PortalConfig, clock: Arc<dyn Clock>) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
            accept_invalid_certs: config.accept_invalid_certs,
            ..TransportConfig::default()
        };
        let api = ApiClient::new(config.server.clone(), config.session.clone(), &transport)?;

        let (state, _) = watch::channel(ConnectionState::Connecting);
        let (phases, _) = watch::channel(Arc::new(Vec::new()));

        Ok(Self {
            api: Arc::new(api),
            store: Arc::new(DataStore::new()),
            clock,
            cancel: CancellationToken::new(),
            state,
            phases,
        })
    }

    // ── Fetching ─────────────────────────────────────────────────────

    /// Re-fetch everything now. Also the manual retry action after a
    /// degraded refresh.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        let result = refresh_once(&self.api, &self.store, &*self.clock).await;
        match &result {
            Ok(()) => {
                let _ = self.state.send(ConnectionState::Online);
            }
            Err(err) => {
                let _ = self.state.send(ConnectionState::Degraded {
                    message: err.to_string(),
                });
            }
        }
        result
    }

    fn spawn_refresh_task(&self, interval_secs: u64) {
        let api = Arc::clone(&self.api);
        let store = Arc::clone(&self.store);
        let clock = Arc::clone(&self.clock);
        let state = self.state.clone();
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            let mut ticker = interval(TokioDuration::from_secs(interval_secs));
            // The connect path already fetched; skip the immediate tick.
            ticker.tick().await;
            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        match refresh_once(&api, &store, &*clock).await {
                            Ok(()) => {
                                let _ = state.send(ConnectionState::Online);
                            }
                            Err(err) => {
                                warn!(error = %err, "background refresh failed, keeping previous snapshot");
                                let _ = state.send(ConnectionState::Degraded {
                                    message: err.to_string(),
                                });
                            }
                        }
                    }
                }
            }
        });
    }

    // ── Countdown ticker ─────────────────────────────────────────────

    /// Recompute live-class phases once per second and publish changes.
    fn spawn_ticker(&self) {
        let store = Arc::clone(&self.store);
        let clock = Arc::clone(&self.clock);
        let phases = self.phases.clone();
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            let mut ticker = interval(TokioDuration::from_secs(1));
            loop {
                tokio::select! {
                    () = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        let computed = compute_phases(&store.live_classes(), &*clock);
                        phases.send_if_modified(|current| {
                            if **current == computed {
                                false
                            } else {
                                *current = Arc::new(computed);
                                true
                            }
                        });
                    }
                }
            }
            debug!("countdown ticker stopped");
        });
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    /// Resolve the signed-in user's access to `course` right now.
    pub fn access_for(&self, course: &EntityId) -> AccessDecision {
        self.store.resolve_access(course, self.clock.now())
    }

    /// Preview extending the account's all-access subscription.
    ///
    /// Picks the strongest current quarterly order: lifetime first, then
    /// the latest expiry. No subscription at all is an error, as is one
    /// with nothing to extend.
    pub fn extension_preview(&self, months: u32) -> Result<ExtensionPreview, CoreError> {
        let orders = self.store.orders();
        let subscription = orders
            .iter()
            .filter(|order| {
                order.plan == PlanType::Quarterly
                    && order.payment_status == PaymentStatus::Approved
                    && order.active
            })
            .max_by_key(|order| match order.expiry {
                Expiry::Lifetime => (2u8, None),
                Expiry::At(end) => (1, Some(end)),
                Expiry::Invalid => (0, None),
            })
            .ok_or(CoreError::NoSubscription)?;

        renewal::extension_preview(subscription.expiry, self.clock.now(), months)
    }

    /// Latest published countdown phases.
    pub fn live_phases(&self) -> Arc<Vec<LivePhase>> {
        self.phases.subscribe().borrow().clone()
    }

    /// Subscribe to countdown phase changes (1 Hz recompute, published
    /// only when something actually changed).
    pub fn subscribe_phases(&self) -> watch::Receiver<Arc<Vec<LivePhase>>> {
        self.phases.subscribe()
    }

    pub fn connection_state(&self) -> ConnectionState {
        self.state.subscribe().borrow().clone()
    }

    /// Stop all background tasks. Idempotent; also runs on drop.
    pub fn shutdown(&self) {
        self.cancel.cancel();
        let _ = self.state.send(ConnectionState::Closed);
    }
}

impl Drop for Portal {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

// ── Free helpers (shared by methods and spawned tasks) ───────────────

async fn refresh_once(
    api: &ApiClient,
    store: &DataStore,
    clock: &dyn Clock,
) -> Result<(), CoreError> {
    debug!("fetching full snapshot");

    let (courses, combos, live_classes) = tokio::try_join!(
        api.list_courses(),
        api.list_combos(),
        api.list_live_classes(),
    )?;

    // Order history needs a signed-in session; anonymous portals browse
    // the catalog with an empty order list.
    let orders = if api.session().is_anonymous() {
        Vec::new()
    } else {
        api.my_orders().await?
    };

    store.apply_refresh(
        RefreshSnapshot {
            orders: convert::orders_from_wire(&orders),
            courses: courses.iter().map(Course::from).collect(),
            combos: combos.iter().map(Combo::from).collect(),
            live_classes: live_classes.iter().map(LiveClass::from).collect(),
        },
        clock.now(),
    );

    Ok(())
}

fn compute_phases(classes: &[Arc<LiveClass>], clock: &dyn Clock) -> Vec<LivePhase> {
    let now = clock.now();
    classes
        .iter()
        .filter_map(|class| {
            class.starts_at.map(|start| LivePhase {
                id: class.id.clone(),
                title: class.title.clone(),
                phase: schedule::classify(start, now),
            })
        })
        .collect()
}
