//! Live roster for the dashboards.

use crate::athletes::{AthleteGateway, AthleteRecord};
use crate::storage::{DocumentStore, StoreError, Subscription};

/// Roster subscription owned by a mounted screen.
///
/// Dropping the feed (or the screen owning it) releases the subscription.
#[derive(Default)]
pub struct RosterFeed {
    subscription: Option<Subscription>,
    seen_revision: u64,
    attempted: bool,
}

impl RosterFeed {
    /// Subscribe on first call; later calls are no-ops even if it failed.
    /// Repaints on every snapshot.
    pub fn open<S: DocumentStore>(
        &mut self,
        gateway: &AthleteGateway<S>,
        ctx: &egui::Context,
    ) -> Result<(), StoreError> {
        if self.attempted {
            return Ok(());
        }
        self.attempted = true;

        let mut subscription = gateway.subscribe()?;
        let ctx = ctx.clone();
        if let Err(e) = subscription.start(move |_| ctx.request_repaint()) {
            tracing::warn!("Failed to start roster subscription: {}", e);
        }
        self.subscription = Some(subscription);
        Ok(())
    }

    pub fn is_open(&self) -> bool {
        self.subscription.is_some()
    }

    /// The latest roster, if a new snapshot arrived since the last poll.
    pub fn poll(&mut self) -> Option<Vec<AthleteRecord>> {
        let subscription = self.subscription.as_ref()?;
        let revision = subscription.revision();
        if revision == self.seen_revision {
            return None;
        }
        self.seen_revision = revision;
        Some(AthleteRecord::from_snapshot(&subscription.latest()))
    }
}
