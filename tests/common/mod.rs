//! Shared utilities for integration tests: disposable mock backends.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;

/// Bind a mock backend on an ephemeral port and serve it in the background.
pub async fn spawn_backend(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Backend that answers every request with a fixed tag body.
pub async fn tagged_backend(tag: &'static str) -> SocketAddr {
    spawn_backend(Router::new().fallback(move || async move { tag })).await
}

/// Backend that echoes the request method, full URI, and body.
pub async fn echo_backend() -> SocketAddr {
    spawn_backend(Router::new().fallback(
        |method: Method, uri: Uri, body: Bytes| async move {
            let mut echoed = format!("{} {}", method, uri).into_bytes();
            if !body.is_empty() {
                echoed.push(b' ');
                echoed.extend_from_slice(&body);
            }
            echoed
        },
    ))
    .await
}

/// Backend that responds 201 with duplicate `X-Custom` values and the given
/// body bytes.
pub async fn multi_header_backend(body: Vec<u8>) -> SocketAddr {
    spawn_backend(Router::new().fallback(move || {
        let body = body.clone();
        async move {
            let mut response = Response::new(Body::from(body));
            *response.status_mut() = StatusCode::CREATED;
            let headers = response.headers_mut();
            headers.append("x-custom", "a".parse().unwrap());
            headers.append("x-custom", "b".parse().unwrap());
            response
        }
    }))
    .await
}

/// Backend that sleeps before answering, to exercise timeouts and draining.
pub async fn sleeping_backend(delay: Duration) -> SocketAddr {
    spawn_backend(Router::new().fallback(move || async move {
        tokio::time::sleep(delay).await;
        "slow response"
    }))
    .await
}

/// Backend that sends headers and one body chunk, then stalls forever.
pub async fn stalling_backend() -> SocketAddr {
    use futures_util::stream::{self, StreamExt};

    spawn_backend(Router::new().fallback(|| async {
        let chunks = stream::iter([Ok::<_, std::io::Error>(Bytes::from_static(b"partial"))])
            .chain(stream::pending());
        Response::new(Body::from_stream(chunks))
    }))
    .await
}

/// Backend that always fails with a 500 and a recognizable body.
pub async fn failing_backend() -> SocketAddr {
    spawn_backend(Router::new().fallback(|| async {
        (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response()
    }))
    .await
}

/// Reserve an address nothing is listening on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}
