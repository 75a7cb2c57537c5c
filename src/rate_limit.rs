//! In-memory sliding-window budget for AI generation, per household.
//!
//! This is a soft admission-control gate: state lives in this process only
//! and resets on restart. A multi-instance deployment would need the window
//! state in a shared store with an atomic check-and-consume.

use std::collections::HashMap;

use time::{Duration, OffsetDateTime};
use tokio::sync::Mutex;
use uuid::Uuid;

/// Tokens per household per window.
pub const BUDGET: f64 = 3.0;
/// 10 minutes.
pub const WINDOW: Duration = Duration::seconds(600);

/// Full suggest / refine / regenerate-all.
pub const FULL_GENERATION_COST: f64 = 1.0;
/// Single-slot regenerate.
pub const SINGLE_SLOT_COST: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetDecision {
    pub allowed: bool,
    /// Remaining budget after consuming (when allowed) or the unchanged
    /// balance (when rejected).
    pub remaining: f64,
    /// When the oldest live event expires; only set on rejection, and `None`
    /// if there are no live events at all.
    pub resets_at: Option<OffsetDateTime>,
}

/// Constructed once at process start and injected via `AppState`, never a
/// module-level global.
#[derive(Default)]
pub struct RateLimiter {
    events: Mutex<HashMap<Uuid, Vec<(OffsetDateTime, f64)>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn check_and_consume(&self, household_id: Uuid, cost: f64) -> BudgetDecision {
        self.check_and_consume_at(household_id, cost, OffsetDateTime::now_utc())
            .await
    }

    /// The prune / sum / decide / append sequence runs under one lock;
    /// concurrent callers can never both observe the pre-consumption balance.
    async fn check_and_consume_at(
        &self,
        household_id: Uuid,
        cost: f64,
        now: OffsetDateTime,
    ) -> BudgetDecision {
        let mut map = self.events.lock().await;

        // Sweep the whole map, dropping households whose events have all
        // expired, so idle households do not accumulate entries forever.
        let cutoff = now - WINDOW;
        map.retain(|_, events| {
            events.retain(|(ts, _)| *ts > cutoff);
            !events.is_empty()
        });

        let used: f64 = map
            .get(&household_id)
            .map(|events| events.iter().map(|(_, c)| c).sum())
            .unwrap_or(0.0);
        let remaining = BUDGET - used;

        if remaining < cost {
            let resets_at = map
                .get(&household_id)
                .and_then(|events| events.iter().map(|(ts, _)| *ts).min())
                .map(|oldest| oldest + WINDOW);
            return BudgetDecision {
                allowed: false,
                remaining,
                resets_at,
            };
        }

        map.entry(household_id).or_default().push((now, cost));
        BudgetDecision {
            allowed: true,
            remaining: remaining - cost,
            resets_at: None,
        }
    }
}
