//! Server-sent events delivery for live views.
//!
//! Each connection owns its [`LiveView`]; when the browser disconnects the
//! stream is dropped, which stops the refresh task and releases the feed
//! subscription.

use std::pin::Pin;
use std::task::{Context, Poll};

use actix_web::web::Bytes;
use futures_util::Stream;
use serde::Serialize;
use tokio::sync::mpsc;

use crate::live::ChangeFeed;
use crate::live::view::{LiveView, ViewSource, ViewUpdate};

const CHANNEL_CAPACITY: usize = 8;

#[derive(Serialize)]
struct RenderEvent<'a> {
    seq: u64,
    html: &'a str,
}

#[derive(Serialize)]
struct ErrorEvent<'a> {
    seq: u64,
    message: &'a str,
}

/// Formats one update as an SSE frame.
fn format_event(update: &ViewUpdate<String>) -> Bytes {
    let (event, payload) = match update {
        ViewUpdate::Rendered { seq, data } => (
            "render",
            serde_json::to_string(&RenderEvent {
                seq: *seq,
                html: data,
            }),
        ),
        ViewUpdate::Error { seq, message } => (
            "error",
            serde_json::to_string(&ErrorEvent {
                seq: *seq,
                message,
            }),
        ),
    };
    match payload {
        Ok(json) => Bytes::from(format!("event: {event}\ndata: {json}\n\n")),
        Err(err) => {
            log::error!("Failed to serialize SSE payload: {err}");
            Bytes::from_static(b"event: error\ndata: {\"seq\":0,\"message\":\"serialization\"}\n\n")
        }
    }
}

/// Stream of SSE frames for one connected view.
pub struct LiveViewStream<S: ViewSource<Output = String>> {
    rx: mpsc::Receiver<ViewUpdate<String>>,
    // Held so the refresh task lives exactly as long as the connection.
    _view: LiveView<S>,
}

impl<S: ViewSource<Output = String>> LiveViewStream<S> {
    /// Starts the view for the tenant and wraps it in a stream.
    pub async fn start(source: S, feed: ChangeFeed, company_id: i32) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let mut view = LiveView::new(source, feed);
        view.start(company_id, tx).await;
        Self { rx, _view: view }
    }
}

impl<S: ViewSource<Output = String>> Stream for LiveViewStream<S> {
    type Item = Result<Bytes, actix_web::Error>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.rx.poll_recv(cx) {
            Poll::Ready(Some(update)) => Poll::Ready(Some(Ok(format_event(&update)))),
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Pending => Poll::Pending,
        }
    }
}
