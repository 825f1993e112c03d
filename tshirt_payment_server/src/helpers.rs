use std::net::{IpAddr, SocketAddr};

use actix_web::HttpRequest;
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;

// The first `for=` parameter of a Forwarded header, quoted or not
static FORWARDED_FOR: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)for=(?P<node>"[^"]*"|[^;,\s]+)"#).unwrap());

/// The address a callback came from, for the audit log.
///
/// Proxy headers are only consulted when the deployment says a trusted proxy sets them. `X-Forwarded-For` wins over
/// `Forwarded` when both are enabled. Anything unparseable falls through to the socket peer address.
pub fn get_remote_ip(req: &HttpRequest, use_x_forwarded_for: bool, use_forwarded: bool) -> Option<IpAddr> {
    let from_x_forwarded_for = || {
        let ip = header_str(req, "X-Forwarded-For").and_then(x_forwarded_for_client);
        if let Some(ip) = ip {
            debug!("💻️ Client address {ip} taken from X-Forwarded-For");
        }
        ip
    };
    let from_forwarded = || {
        let ip = header_str(req, "Forwarded").and_then(forwarded_client);
        if let Some(ip) = ip {
            debug!("💻️ Client address {ip} taken from Forwarded");
        }
        ip
    };
    use_x_forwarded_for
        .then(from_x_forwarded_for)
        .flatten()
        .or_else(|| use_forwarded.then(from_forwarded).flatten())
        .or_else(|| {
            let peer = req.peer_addr().map(|a| a.ip());
            trace!("💻️ Using the peer address {peer:?} as the client address");
            peer
        })
}

fn header_str<'r>(req: &'r HttpRequest, name: &str) -> Option<&'r str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// `X-Forwarded-For: client, proxy1, proxy2`. The left-most entry is the original client.
fn x_forwarded_for_client(value: &str) -> Option<IpAddr> {
    value.split(',').next().and_then(parse_node)
}

/// `Forwarded: for=192.0.2.60;proto=http, for=198.51.100.17`. The first `for=` names the original client.
fn forwarded_client(value: &str) -> Option<IpAddr> {
    FORWARDED_FOR.captures(value).and_then(|caps| caps.name("node")).and_then(|m| parse_node(m.as_str()))
}

/// Accepts `1.2.3.4`, `1.2.3.4:80`, `2001:db8::1`, `[2001:db8::1]:443`, optionally wrapped in double quotes.
fn parse_node(node: &str) -> Option<IpAddr> {
    let node = node.trim().trim_matches('"');
    node.parse::<IpAddr>().ok().or_else(|| node.parse::<SocketAddr>().ok().map(|a| a.ip())).or_else(|| {
        let inner = node.strip_prefix('[')?.split(']').next()?;
        inner.parse().ok()
    })
}
