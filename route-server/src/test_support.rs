//! Scripted upstream HTTP server for tests.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum::http::{StatusCode, Uri, header};

/// Reply function: receives the 1-based request number.
type Reply = dyn Fn(usize) -> (StatusCode, String) + Send + Sync;

/// A local HTTP server whose replies are scripted per request number.
pub(crate) struct FakeUpstream {
    pub(crate) base_url: String,
    hits: Arc<AtomicUsize>,
    uris: Arc<Mutex<Vec<String>>>,
}

impl FakeUpstream {
    /// Serve `reply` immediately for every request.
    pub(crate) async fn start<R>(reply: R) -> Self
    where
        R: Fn(usize) -> (StatusCode, String) + Send + Sync + 'static,
    {
        Self::start_delayed(Duration::ZERO, reply).await
    }

    /// Serve `reply` after holding each request for `delay`.
    pub(crate) async fn start_delayed<R>(delay: Duration, reply: R) -> Self
    where
        R: Fn(usize) -> (StatusCode, String) + Send + Sync + 'static,
    {
        let reply: Arc<Reply> = Arc::new(reply);
        let hits = Arc::new(AtomicUsize::new(0));
        let uris = Arc::new(Mutex::new(Vec::new()));

        let app = {
            let hits = hits.clone();
            let uris = uris.clone();
            Router::new().fallback(move |uri: Uri| {
                let reply = reply.clone();
                let hits = hits.clone();
                let uris = uris.clone();
                async move {
                    let n = hits.fetch_add(1, Ordering::SeqCst) + 1;
                    uris.lock().unwrap().push(uri.to_string());
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    let (status, body) = reply(n);
                    (status, [(header::CONTENT_TYPE, "application/json")], body)
                }
            })
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            hits,
            uris,
        }
    }

    /// Number of requests received so far.
    pub(crate) fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Path and query of every request received, in order.
    pub(crate) fn uris(&self) -> Vec<String> {
        self.uris.lock().unwrap().clone()
    }
}

/// An address nothing is listening on.
pub(crate) async fn closed_addr() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// A 200 OSRM table body for one source row.
pub(crate) fn table_body(durations: &[f64], distances: &[f64]) -> String {
    serde_json::json!({
        "code": "Ok",
        "durations": [durations],
        "distances": [distances],
    })
    .to_string()
}
