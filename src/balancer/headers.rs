//! Header filtering for forwarded requests and relayed responses.
//!
//! Hop-by-hop headers describe a single connection and must not survive the
//! proxy hop in either direction. Everything else — cookies and multi-valued
//! custom headers included — passes through verbatim.

use axum::http::{HeaderMap, HeaderName};

/// Hop-by-hop header set (RFC 9110 §7.6.1).
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.iter().any(|h| name.as_str().eq_ignore_ascii_case(h))
}

/// Filter inbound headers for the outbound request.
///
/// Drops the hop-by-hop set plus `host` and `content-length`: the upstream
/// client derives both from the target URL and the streamed body framing.
pub fn request_headers(inbound: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        if is_hop_by_hop(name) || name.as_str() == "host" || name.as_str() == "content-length" {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Filter upstream response headers for relay to the client.
///
/// Drops only the hop-by-hop set; every other header is appended so
/// multi-valued headers keep all of their values.
pub fn response_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(upstream.len());
    for (name, value) in upstream {
        if is_hop_by_hop(name) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}
