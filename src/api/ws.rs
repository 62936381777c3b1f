//! WebSocket handler for live watchdog status
//!
//! Pushes a fresh `WatchdogView` on connect and after every completed poll.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::IntoResponse,
};
use std::sync::Arc;

use super::handlers::watchdog::current_view;
use super::handlers::LocaleQuery;
use super::AppState;

pub async fn watchdog_stream(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LocaleQuery>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let locale = state.locale(query.locale.as_deref());
    ws.on_upgrade(move |socket| handle_watchdog_stream(socket, state, locale))
}

async fn handle_watchdog_stream(mut socket: WebSocket, state: Arc<AppState>, locale: &'static str) {
    let mut rx = state.watchdog.subscribe();
    rx.mark_unchanged();

    // Send initial status
    if send_view(&mut socket, &state, locale).await.is_err() {
        return;
    }

    loop {
        tokio::select! {
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                if send_view(&mut socket, &state, locale).await.is_err() {
                    break;
                }
            }
            msg = socket.recv() => {
                match msg {
                    Some(Ok(Message::Close(_))) => break,
                    Some(Err(_)) => break,
                    None => break,
                    _ => {}
                }
            }
        }
    }

    tracing::debug!("watchdog stream closed");
}

async fn send_view(
    socket: &mut WebSocket,
    state: &AppState,
    locale: &str,
) -> Result<(), axum::Error> {
    let view = current_view(state, locale);
    let json = serde_json::to_string(&view).unwrap_or_default();
    socket.send(Message::Text(json.into())).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::UpstreamClient;
    use axum::{routing::get, Json, Router};
    use futures::{SinkExt, StreamExt};
    use std::time::Duration;
    use tokio_tungstenite::{connect_async, tungstenite};

    async fn serve(router: Router) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        addr
    }

    async fn next_view<S>(stream: &mut S) -> serde_json::Value
    where
        S: futures::Stream<Item = Result<tungstenite::Message, tungstenite::Error>> + Unpin,
    {
        let frame = tokio::time::timeout(Duration::from_secs(5), stream.next())
            .await
            .expect("no frame received")
            .unwrap()
            .unwrap();
        match frame {
            tungstenite::Message::Text(text) => serde_json::from_str(text.as_str()).unwrap(),
            other => panic!("unexpected frame: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_watchdog_stream_pushes_views() {
        let upstream = serve(Router::new().route(
            "/api/watchdog/status",
            get(|| async {
                Json(serde_json::json!({
                    "deployed": true,
                    "alive": true,
                    "lastCheckAt": chrono::Utc::now().timestamp_millis()
                }))
            }),
        ))
        .await;

        let client =
            UpstreamClient::new(&format!("http://{}", upstream), None, Duration::from_secs(5))
                .unwrap();
        let state = Arc::new(AppState::with_client(
            client,
            "en",
            120_000,
            Duration::from_secs(3600),
        ));

        // Let the first poll land so the initial frame is deterministic
        let mut rx = state.watchdog.subscribe();
        tokio::time::timeout(Duration::from_secs(5), async {
            while rx.borrow_and_update().value.is_none() {
                rx.changed().await.unwrap();
            }
        })
        .await
        .unwrap();

        let addr = serve(crate::api::create_router(state.clone())).await;
        let (mut socket, _) = connect_async(format!("ws://{}/ws/watchdog?locale=zh", addr))
            .await
            .unwrap();

        let initial = next_view(&mut socket).await;
        assert_eq!(initial["health"], "running");
        assert_eq!(initial["last_check"], "刚刚");
        assert!(initial["jobs"].as_array().unwrap().is_empty());

        state.watchdog.refresh();
        let pushed = next_view(&mut socket).await;
        assert_eq!(pushed["health"], "running");

        socket.send(tungstenite::Message::Close(None)).await.unwrap();
        let closed = tokio::time::timeout(Duration::from_secs(5), async {
            while let Some(Ok(msg)) = socket.next().await {
                if msg.is_close() {
                    break;
                }
            }
        })
        .await;
        assert!(closed.is_ok());
    }
}
