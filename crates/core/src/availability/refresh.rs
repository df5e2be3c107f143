//! "Please refresh" latch fed by the remote change feed
//!
//! A remote change only raises a flag. Whoever renders the day view takes
//! the flag between gestures and refetches; an in-progress drag or edit keeps
//! running against its snapshot.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;
use tracing::{debug, trace};
use whenly_domain::EventId;

use super::ports::{RemoteChangeFeed, SubscriptionId};

#[derive(Debug, Default)]
struct Latch {
    requested: AtomicBool,
    notify: Notify,
}

impl Latch {
    fn raise(&self) {
        self.requested.store(true, Ordering::Release);
        self.notify.notify_one();
    }
}

/// Refresh flag, optionally bound to a feed subscription that is released
/// on drop.
pub struct RefreshSignal {
    latch: Arc<Latch>,
    subscription: Option<(Arc<dyn RemoteChangeFeed>, SubscriptionId)>,
}

impl RefreshSignal {
    /// Unbound signal; raise it with [`RefreshSignal::request`].
    pub fn new() -> Self {
        Self {
            latch: Arc::new(Latch::default()),
            subscription: None,
        }
    }

    /// Signal raised whenever `feed` reports a change to `event_id`.
    pub fn subscribe(feed: Arc<dyn RemoteChangeFeed>, event_id: &EventId) -> Self {
        let latch = Arc::new(Latch::default());
        let callback_latch = Arc::clone(&latch);
        let subscription = feed.on_remote_change(
            event_id,
            Arc::new(move |event: &EventId| {
                trace!(event_id = %event, "remote change received");
                callback_latch.raise();
            }),
        );
        debug!(%event_id, subscription = subscription.0, "refresh signal subscribed");
        Self {
            latch,
            subscription: Some((feed, subscription)),
        }
    }

    pub fn request(&self) {
        self.latch.raise();
    }

    pub fn is_requested(&self) -> bool {
        self.latch.requested.load(Ordering::Acquire)
    }

    /// Consume the flag, returning whether it was raised.
    pub fn take(&self) -> bool {
        self.latch.requested.swap(false, Ordering::AcqRel)
    }

    /// Wait until the flag is raised, then consume it.
    pub async fn changed(&self) {
        loop {
            let notified = self.latch.notify.notified();
            if self.take() {
                return;
            }
            notified.await;
        }
    }
}

impl Default for RefreshSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RefreshSignal {
    fn drop(&mut self) {
        if let Some((feed, subscription)) = self.subscription.take() {
            feed.unsubscribe(subscription);
        }
    }
}
