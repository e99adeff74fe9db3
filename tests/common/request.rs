#![allow(dead_code, unused_imports)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Method, Request, header},
};
use http_body_util::BodyExt;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

/// Raw response pieces for assertions
pub struct TestResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Deserialize the body into `T`, panicking with a diagnostic message on failure.
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "Failed to deserialize response into {}\n\
                 Status: {} | Error: {e}\n\
                 Body  : {}",
                std::any::type_name::<T>(),
                self.status,
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn header(&self, name: header::HeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// Send `request` through the router without binding a socket.
pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status().as_u16();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();

    TestResponse { status, headers, body }
}

/// GET `path`, optionally as a cross-origin request from `origin`.
pub async fn get(app: &Router, path: &str, origin: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(Method::GET).uri(path);
    if let Some(origin) = origin {
        builder = builder.header(header::ORIGIN, origin);
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

/// CORS preflight for a GET to `path` from `origin`.
pub async fn preflight(app: &Router, path: &str, origin: &str) -> TestResponse {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(path)
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}
