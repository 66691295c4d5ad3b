//! The subscription-bound view controller.
//!
//! One [`LiveView`] keeps one on-screen view consistent with server state for
//! as long as the user stays on the page: an initial fetch, then exactly one
//! feed subscription whose notifications each trigger a full re-fetch and
//! re-render. There is no diffing and no automatic retry; correctness over
//! efficiency at this data volume.

use std::sync::{Arc, Mutex};

use tokio::sync::broadcast::error::RecvError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::live::{ChangeFeed, EntityKind};
use crate::services::errors::ServiceResult;

/// Fetches and renders the content of one view for one tenant.
pub trait ViewSource: Send + Sync + 'static {
    /// Rendered output; HTML for SSE-delivered views.
    type Output: Send + 'static;

    /// Entities whose changes must refresh this view.
    fn entities(&self) -> &'static [EntityKind];

    /// Full fetch plus render, scoped to the tenant.
    fn fetch(&self, company_id: i32) -> ServiceResult<Self::Output>;
}

/// Lifecycle phase of a live view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewPhase {
    Stopped,
    Fetching,
    RenderedSubscribed,
    RenderedError,
}

/// One full render of a view, tagged with a monotonic sequence number.
///
/// Re-fetches are serialized on the view's refresh task, so sequence numbers
/// strictly increase; consumers must drop any update whose `seq` is not
/// higher than the last one applied.
#[derive(Clone, Debug, PartialEq)]
pub enum ViewUpdate<T> {
    Rendered { seq: u64, data: T },
    Error { seq: u64, message: String },
}

impl<T> ViewUpdate<T> {
    pub fn seq(&self) -> u64 {
        match self {
            ViewUpdate::Rendered { seq, .. } | ViewUpdate::Error { seq, .. } => *seq,
        }
    }
}

/// Controller binding one view to the change feed.
///
/// `start` is idempotent (a previous run is stopped first) and `stop` is safe
/// to call when already stopped. Dropping the view stops it, which is how
/// navigation away tears the subscription down.
pub struct LiveView<S: ViewSource> {
    source: Arc<S>,
    feed: ChangeFeed,
    phase: Arc<Mutex<ViewPhase>>,
    task: Option<JoinHandle<()>>,
}

impl<S: ViewSource> LiveView<S> {
    pub fn new(source: S, feed: ChangeFeed) -> Self {
        Self {
            source: Arc::new(source),
            feed,
            phase: Arc::new(Mutex::new(ViewPhase::Stopped)),
            task: None,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> ViewPhase {
        *self
            .phase
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Fetches, emits the first render, then subscribes and spawns the
    /// refresh loop.
    ///
    /// On a failed initial fetch an [`ViewUpdate::Error`] is emitted and no
    /// subscription is opened; the user has to navigate away and back.
    pub async fn start(&mut self, company_id: i32, tx: mpsc::Sender<ViewUpdate<S::Output>>) {
        self.stop();

        set_phase(&self.phase, ViewPhase::Fetching);
        let mut seq = 1u64;

        match self.source.fetch(company_id) {
            Ok(data) => {
                if tx.send(ViewUpdate::Rendered { seq, data }).await.is_err() {
                    set_phase(&self.phase, ViewPhase::Stopped);
                    return;
                }
                set_phase(&self.phase, ViewPhase::RenderedSubscribed);
            }
            Err(err) => {
                log::error!("Initial fetch for live view failed: {err}");
                let _ = tx
                    .send(ViewUpdate::Error {
                        seq,
                        message: err.to_string(),
                    })
                    .await;
                set_phase(&self.phase, ViewPhase::RenderedError);
                return;
            }
        }

        let mut rx = self.feed.subscribe();
        let source = Arc::clone(&self.source);
        let phase = Arc::clone(&self.phase);

        self.task = Some(tokio::spawn(async move {
            loop {
                let refresh = match rx.recv().await {
                    Ok(n) => n.company_id == company_id && source.entities().contains(&n.entity),
                    // Dropped notifications coalesce into a single refetch.
                    Err(RecvError::Lagged(missed)) => {
                        log::warn!("Live view lagged behind the change feed by {missed}");
                        true
                    }
                    Err(RecvError::Closed) => break,
                };

                if !refresh {
                    continue;
                }

                set_phase(&phase, ViewPhase::Fetching);
                seq += 1;

                let update = match source.fetch(company_id) {
                    Ok(data) => {
                        set_phase(&phase, ViewPhase::RenderedSubscribed);
                        ViewUpdate::Rendered { seq, data }
                    }
                    Err(err) => {
                        log::error!("Re-fetch for live view failed: {err}");
                        set_phase(&phase, ViewPhase::RenderedError);
                        ViewUpdate::Error {
                            seq,
                            message: err.to_string(),
                        }
                    }
                };

                if tx.send(update).await.is_err() {
                    break;
                }
            }
        }));
    }

    /// Closes the subscription if open. Idempotent.
    pub fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
        set_phase(&self.phase, ViewPhase::Stopped);
    }
}

impl<S: ViewSource> Drop for LiveView<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn set_phase(phase: &Arc<Mutex<ViewPhase>>, value: ViewPhase) {
    *phase
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner) = value;
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;
    use crate::live::{ChangeNotification, ChangeOp};
    use crate::services::errors::ServiceError;

    /// Fake source counting fetches and failing on selected calls.
    struct CountingSource {
        rows: Vec<&'static str>,
        fail_on: Vec<usize>,
        fetches: AtomicUsize,
    }

    impl CountingSource {
        fn new(rows: Vec<&'static str>) -> Arc<Self> {
            Self::flaky(rows, vec![])
        }

        fn failing() -> Arc<Self> {
            Self::flaky(vec![], vec![1])
        }

        /// Fails on the 1-based fetch numbers in `fail_on`.
        fn flaky(rows: Vec<&'static str>, fail_on: Vec<usize>) -> Arc<Self> {
            Arc::new(Self {
                rows,
                fail_on,
                fetches: AtomicUsize::new(0),
            })
        }
    }

    impl ViewSource for Arc<CountingSource> {
        type Output = Vec<&'static str>;

        fn entities(&self) -> &'static [EntityKind] {
            &[EntityKind::Chat]
        }

        fn fetch(&self, _company_id: i32) -> ServiceResult<Self::Output> {
            let call = self.fetches.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail_on.contains(&call) {
                Err(ServiceError::Internal("backend unavailable".to_string()))
            } else {
                Ok(self.rows.clone())
            }
        }
    }

    fn chat_change(company_id: i32) -> ChangeNotification {
        ChangeNotification {
            company_id,
            entity: EntityKind::Chat,
            op: ChangeOp::Update,
        }
    }

    async fn settle() {
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
    }

    async fn recv<T>(rx: &mut mpsc::Receiver<ViewUpdate<T>>) -> ViewUpdate<T> {
        timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("timed out waiting for view update")
            .expect("update channel closed")
    }

    #[tokio::test]
    async fn initial_render_matches_fetch_result() {
        let source = CountingSource::new(vec!["a", "b", "c"]);
        let feed = ChangeFeed::default();
        let mut view = LiveView::new(Arc::clone(&source), feed.clone());
        let (tx, mut rx) = mpsc::channel(8);

        view.start(7, tx).await;

        match recv(&mut rx).await {
            ViewUpdate::Rendered { seq, data } => {
                assert_eq!(seq, 1);
                assert_eq!(data.len(), 3);
            }
            other => panic!("expected rendered update, got {other:?}"),
        }
        assert_eq!(view.phase(), ViewPhase::RenderedSubscribed);
        assert_eq!(feed.receiver_count(), 1);
    }

    #[tokio::test]
    async fn notification_triggers_exactly_one_refetch() {
        let source = CountingSource::new(vec!["a"]);
        let feed = ChangeFeed::default();
        let mut view = LiveView::new(Arc::clone(&source), feed.clone());
        let (tx, mut rx) = mpsc::channel(8);

        view.start(7, tx).await;
        let _ = recv(&mut rx).await;
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);

        feed.publish(chat_change(7));

        let update = recv(&mut rx).await;
        assert_eq!(update.seq(), 2);
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);

        // No further renders without further notifications.
        settle().await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn notifications_for_other_tenants_are_ignored() {
        let source = CountingSource::new(vec!["a"]);
        let feed = ChangeFeed::default();
        let mut view = LiveView::new(Arc::clone(&source), feed.clone());
        let (tx, mut rx) = mpsc::channel(8);

        view.start(7, tx).await;
        let _ = recv(&mut rx).await;

        feed.publish(chat_change(99));
        settle().await;

        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn stop_then_start_leaves_one_subscription() {
        let source = CountingSource::new(vec!["a"]);
        let feed = ChangeFeed::default();
        let mut view = LiveView::new(Arc::clone(&source), feed.clone());

        let (tx, mut rx) = mpsc::channel(8);
        view.start(7, tx).await;
        let _ = recv(&mut rx).await;
        assert_eq!(feed.receiver_count(), 1);

        view.stop();
        view.stop(); // idempotent
        settle().await;
        assert_eq!(feed.receiver_count(), 0);
        assert_eq!(view.phase(), ViewPhase::Stopped);

        let (tx, mut rx) = mpsc::channel(8);
        view.start(7, tx).await;
        let _ = recv(&mut rx).await;
        settle().await;
        assert_eq!(feed.receiver_count(), 1);
    }

    #[tokio::test]
    async fn restart_without_stop_replaces_the_subscription() {
        let source = CountingSource::new(vec!["a"]);
        let feed = ChangeFeed::default();
        let mut view = LiveView::new(Arc::clone(&source), feed.clone());

        let (tx1, mut rx1) = mpsc::channel(8);
        view.start(7, tx1).await;
        let _ = recv(&mut rx1).await;

        let (tx2, mut rx2) = mpsc::channel(8);
        view.start(7, tx2).await;
        let _ = recv(&mut rx2).await;
        settle().await;

        assert_eq!(feed.receiver_count(), 1);
    }

    #[tokio::test]
    async fn failed_initial_fetch_renders_error_and_subscribes_nothing() {
        let source = CountingSource::failing();
        let feed = ChangeFeed::default();
        let mut view = LiveView::new(Arc::clone(&source), feed.clone());
        let (tx, mut rx) = mpsc::channel(8);

        view.start(7, tx).await;

        match recv(&mut rx).await {
            ViewUpdate::Error { seq, message } => {
                assert_eq!(seq, 1);
                assert!(message.contains("backend unavailable"));
            }
            other => panic!("expected error update, got {other:?}"),
        }
        assert_eq!(view.phase(), ViewPhase::RenderedError);
        assert_eq!(feed.receiver_count(), 0);

        // No retry is scheduled; a notification reaches nobody.
        feed.publish(chat_change(7));
        settle().await;
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_refetch_keeps_the_subscription_and_recovers() {
        let source = CountingSource::flaky(vec!["a"], vec![2]);
        let feed = ChangeFeed::default();
        let mut view = LiveView::new(Arc::clone(&source), feed.clone());
        let (tx, mut rx) = mpsc::channel(8);

        view.start(7, tx).await;
        let _ = recv(&mut rx).await;

        feed.publish(chat_change(7));
        match recv(&mut rx).await {
            ViewUpdate::Error { seq, message } => {
                assert_eq!(seq, 2);
                assert!(message.contains("backend unavailable"));
            }
            other => panic!("expected error update, got {other:?}"),
        }
        assert_eq!(view.phase(), ViewPhase::RenderedError);
        // The subscription stays open so the view can recover.
        assert_eq!(feed.receiver_count(), 1);

        feed.publish(chat_change(7));
        match recv(&mut rx).await {
            ViewUpdate::Rendered { seq, data } => {
                assert_eq!(seq, 3);
                assert_eq!(data, vec!["a"]);
            }
            other => panic!("expected rendered update, got {other:?}"),
        }
        assert_eq!(view.phase(), ViewPhase::RenderedSubscribed);
    }

    #[tokio::test]
    async fn feed_lag_coalesces_into_a_single_refetch() {
        let source = CountingSource::new(vec!["a"]);
        let feed = ChangeFeed::new(1);
        let mut view = LiveView::new(Arc::clone(&source), feed.clone());
        let (tx, mut rx) = mpsc::channel(8);

        view.start(7, tx).await;
        let _ = recv(&mut rx).await;
        assert_eq!(source.fetches.load(Ordering::SeqCst), 1);

        // The refresh task has not run yet; with a one-slot buffer all but
        // the last notification are dropped before it wakes. The last one is
        // for another tenant so only the lag itself can trigger a refresh.
        for _ in 0..4 {
            feed.publish(chat_change(7));
        }
        feed.publish(chat_change(99));

        let update = recv(&mut rx).await;
        assert_eq!(update.seq(), 2);
        settle().await;
        assert_eq!(source.fetches.load(Ordering::SeqCst), 2);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn dropping_the_view_tears_the_subscription_down() {
        let source = CountingSource::new(vec!["a"]);
        let feed = ChangeFeed::default();
        let (tx, mut rx) = mpsc::channel(8);

        {
            let mut view = LiveView::new(Arc::clone(&source), feed.clone());
            view.start(7, tx).await;
            let _ = recv(&mut rx).await;
            assert_eq!(feed.receiver_count(), 1);
        }

        settle().await;
        assert_eq!(feed.receiver_count(), 0);
    }

    #[tokio::test]
    async fn sequence_numbers_strictly_increase() {
        let source = CountingSource::new(vec!["a"]);
        let feed = ChangeFeed::default();
        let mut view = LiveView::new(Arc::clone(&source), feed.clone());
        let (tx, mut rx) = mpsc::channel(8);

        view.start(7, tx).await;
        let mut last = recv(&mut rx).await.seq();

        for _ in 0..3 {
            feed.publish(chat_change(7));
            let seq = recv(&mut rx).await.seq();
            assert!(seq > last);
            last = seq;
        }
    }
}
