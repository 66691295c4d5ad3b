//! Realtime change notifications and the subscription-bound view engine.
//!
//! Every successful tenant-scoped write publishes a [`ChangeNotification`] on
//! the in-process [`ChangeFeed`]. Live views subscribe to the feed, and on any
//! matching notification discard their current content and re-fetch in full;
//! see [`view::LiveView`].

use tokio::sync::broadcast;

pub mod sse;
pub mod view;
pub mod views;

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// Entity whose table changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Chat,
    Client,
    Product,
    Settings,
    Company,
}

/// Kind of row change. Views refresh on any of them, unfiltered by field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeOp {
    Insert,
    Update,
    Delete,
}

/// A row-level change scoped to one tenant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChangeNotification {
    pub company_id: i32,
    pub entity: EntityKind,
    pub op: ChangeOp,
}

/// In-process fan-out bus of tenant-scoped change notifications.
///
/// Cloning is cheap; all clones share the same channel.
#[derive(Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeNotification>,
}

impl ChangeFeed {
    /// Create a feed with a specific channel capacity.
    ///
    /// When the buffer is full the oldest un-consumed notifications are
    /// dropped and slow receivers observe `RecvError::Lagged`; under the
    /// full-refetch policy a lagged receiver simply refreshes once.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish a notification to all current subscribers.
    ///
    /// A send error only means there are zero receivers; it is ignored.
    pub fn publish(&self, notification: ChangeNotification) {
        let _ = self.sender.send(notification);
    }

    /// Open a new subscription to the feed.
    pub fn subscribe(&self) -> broadcast::Receiver<ChangeNotification> {
        self.sender.subscribe()
    }

    /// Number of currently open subscriptions.
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
