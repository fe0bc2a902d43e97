//! Host discovery: the user's SSH config and known_hosts merged into one catalog.

mod known_hosts;
mod ssh_config;

use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::DiscoveryError;
use crate::models::SshHost;
use known_hosts::parse_known_hosts;
use ssh_config::parse_ssh_config;

/// Files consulted by [`discover`].
#[derive(Debug, Clone)]
pub struct DiscoverySources {
    pub ssh_config: PathBuf,
    /// `None` leaves known_hosts out of the catalog.
    pub known_hosts: Option<PathBuf>,
}

/// Parses both sources and merges them, config entries first.
///
/// An empty catalog is a valid result.
pub fn discover(sources: &DiscoverySources) -> Result<Vec<SshHost>, DiscoveryError> {
    let config_hosts = parse_ssh_config(&sources.ssh_config).map_err(DiscoveryError::Config)?;

    let known_hosts = match &sources.known_hosts {
        Some(path) => parse_known_hosts(path).map_err(DiscoveryError::KnownHosts)?,
        None => Vec::new(),
    };

    let hosts = merge_hosts(config_hosts, known_hosts);
    tracing::info!("Discovered {} hosts", hosts.len());
    Ok(hosts)
}

/// Concatenates the two lists, dropping any record whose lowercased name was
/// already seen. Input order is kept.
pub fn merge_hosts(config_hosts: Vec<SshHost>, known_hosts: Vec<SshHost>) -> Vec<SshHost> {
    let mut seen = HashSet::new();
    let mut merged = Vec::with_capacity(config_hosts.len() + known_hosts.len());

    for host in config_hosts.into_iter().chain(known_hosts) {
        if seen.insert(host.dedup_key()) {
            merged.push(host);
        } else {
            tracing::debug!("Duplicate host '{}' from {} skipped", host.name, host.source);
        }
    }

    merged
}
