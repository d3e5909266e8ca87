use axum::{
    http::{HeaderMap, HeaderName, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{Instrument, info, info_span, warn};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Per-request trace id, available to handlers through request extensions.
#[derive(Clone, Copy, Debug)]
pub struct TraceId(pub Uuid);

// Slower requests are logged at warn level.
const SLOW_REQUEST_MS: u128 = 1000;

pub async fn logger<B>(mut req: Request<B>, next: Next<B>) -> Response {
    let trace_id = incoming_request_id(req.headers()).unwrap_or_else(Uuid::new_v4);
    req.extensions_mut().insert(TraceId(trace_id));
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let span = info_span!("request", trace_id = %trace_id);
    let mut response = next.run(req).instrument(span).await;
    let status = response.status().as_u16();
    let elapsed = start.elapsed().as_millis();

    if let Ok(value) = HeaderValue::from_str(&trace_id.to_string()) {
        response
            .headers_mut()
            .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
    }

    if elapsed > SLOW_REQUEST_MS {
        warn!(trace_id = %trace_id, method = %method, uri = %uri, status = status, elapsed_ms = elapsed, "Slow request");
    } else {
        info!(trace_id = %trace_id, method = %method, uri = %uri, status = status, elapsed_ms = elapsed, "Request log");
    }
    response
}

fn incoming_request_id(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| Uuid::parse_str(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuses_well_formed_request_id() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(&id.to_string()).unwrap());
        assert_eq!(incoming_request_id(&headers), Some(id));

        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("not-a-uuid"));
        assert_eq!(incoming_request_id(&headers), None);
    }
}
