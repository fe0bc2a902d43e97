use std::collections::HashSet;
use std::fs;
use std::io;
use std::net::IpAddr;
use std::path::Path;

use crate::models::{HostSource, SshHost};

const HASHED_HOST_MARKER: &str = "|1|";
const MARKER_LINES: [&str; 2] = ["@cert-authority", "@revoked"];

/// Reads `path` and returns one record per distinct plain hostname.
///
/// A missing file yields an empty list. Invalid UTF-8 is decoded lossily.
pub fn parse_known_hosts(path: &Path) -> io::Result<Vec<SshHost>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!("known_hosts file not found at {:?}", path);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    // Hand-edited files may carry stray non-UTF-8 bytes in comments.
    let content = String::from_utf8_lossy(&bytes);
    let hosts = parse_known_hosts_content(&content);

    tracing::info!("Loaded {} hosts from known_hosts {:?}", hosts.len(), path);
    Ok(hosts)
}

pub fn parse_known_hosts_content(content: &str) -> Vec<SshHost> {
    let mut hosts = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if MARKER_LINES.iter().any(|marker| line.starts_with(*marker)) {
            continue;
        }

        // host[,host2...] key-type key-data [comment]
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 3 {
            continue;
        }

        let host_field = parts[0];
        if host_field.starts_with(HASHED_HOST_MARKER) {
            continue;
        }

        for entry in host_field.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }

            let (host, port) = parse_host_port(entry);
            if seen.contains(host) || is_local_or_ip(host) {
                continue;
            }
            seen.insert(host.to_string());

            let mut record = SshHost::new(host, HostSource::KnownHosts);
            record.host_name = host.to_string();
            record.port = port.to_string();
            hosts.push(record);
        }
    }

    hosts
}

/// Splits a known_hosts host entry into `(host, port)`.
///
/// Accepts `[host]:port`, `host:port` (only when the host has no colon of
/// its own) and a bare `host`. A `[` without a matching `]:` is not an
/// error: the text falls through to the plain colon split, so
/// `[badbracket:2200` becomes `("[badbracket", "2200")`.
pub fn parse_host_port(entry: &str) -> (&str, &str) {
    if entry.starts_with('[') {
        if let Some(end) = entry.find("]:") {
            if end > 1 {
                return (&entry[1..end], &entry[end + 2..]);
            }
        }
    }

    if entry.contains(':') && !entry.contains("::") {
        let mut parts = entry.split(':');
        if let (Some(host), Some(port), None) = (parts.next(), parts.next(), parts.next()) {
            return (host, port);
        }
    }

    (entry, "")
}

fn is_local_or_ip(host: &str) -> bool {
    host == "localhost" || host == "127.0.0.1" || host == "::1" || host.parse::<IpAddr>().is_ok()
}
