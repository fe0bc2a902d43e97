use std::fs;
use std::io;
use std::path::Path;

use crate::models::{HostSource, SshHost};

/// Where the line scanner is relative to `Host` blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionState {
    /// Before the first `Host` line, or after a `Host` line with no names.
    Idle,
    /// Inside a concrete host block; directives accumulate here.
    Open(SshHost),
    /// Inside a wildcard block (`Host *`, `Host web-?`); directives are dropped.
    Discarding,
}

impl SectionState {
    /// Handles a `Host` line. Returns the block that was open before it, if any.
    pub fn on_host(self, names: &[&str]) -> (SectionState, Option<SshHost>) {
        let flushed = self.into_finished();

        let Some((primary, aliases)) = names.split_first() else {
            return (SectionState::Idle, flushed);
        };

        if primary.contains('*') || primary.contains('?') {
            tracing::debug!("Skipping wildcard host block '{}'", primary);
            return (SectionState::Discarding, flushed);
        }

        let mut host = SshHost::new(*primary, HostSource::Config);
        host.aliases = aliases.iter().map(|alias| alias.to_string()).collect();
        (SectionState::Open(host), flushed)
    }

    /// Applies a `HostName`/`User`/`Port` directive to the open block.
    pub fn on_directive(&mut self, key: &str, value: &str) {
        let SectionState::Open(host) = self else {
            return;
        };

        match key {
            "hostname" => host.host_name = value.to_string(),
            "user" => host.user = value.to_string(),
            "port" => host.port = value.to_string(),
            _ => {}
        }
    }

    /// Consumes the state, yielding the open block if it has a name.
    pub fn into_finished(self) -> Option<SshHost> {
        match self {
            SectionState::Open(host) if !host.name.is_empty() => Some(host),
            _ => None,
        }
    }
}

/// Reads `path` and returns its concrete `Host` blocks in file order.
///
/// A missing file yields an empty list. Invalid UTF-8 is decoded lossily.
pub fn parse_ssh_config(path: &Path) -> io::Result<Vec<SshHost>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::warn!("SSH config file not found at {:?}", path);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    // Hand-edited files may carry stray non-UTF-8 bytes in comments.
    let content = String::from_utf8_lossy(&bytes);
    let hosts = parse_ssh_config_content(&content);

    tracing::info!("Loaded {} hosts from SSH config {:?}", hosts.len(), path);
    Ok(hosts)
}

pub fn parse_ssh_config_content(content: &str) -> Vec<SshHost> {
    let mut hosts = Vec::new();
    let mut state = SectionState::Idle;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            continue;
        }

        let key = parts[0].to_lowercase();
        match key.as_str() {
            "host" => {
                let (next, flushed) = state.on_host(&parts[1..]);
                hosts.extend(flushed);
                state = next;
            }
            "hostname" | "user" | "port" => state.on_directive(&key, &parts[1..].join(" ")),
            _ => {}
        }
    }

    hosts.extend(state.into_finished());
    hosts
}
