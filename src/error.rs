use std::io;
use thiserror::Error;

/// Failure to read one of the two discovery sources.
///
/// A missing file is not an error; these only surface when a file exists
/// but cannot be opened or read.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("config discovery failed: {0}")]
    Config(#[source] io::Error),

    #[error("known_hosts discovery failed: {0}")]
    KnownHosts(#[source] io::Error),
}

/// Reasons a rendered command line is refused before it reaches the launcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("command is empty")]
    Empty,

    #[error("command must start with 'ssh'")]
    NotSsh,

    #[error("SSH command missing target host")]
    MissingTarget,

    #[error("no target host specified in SSH command")]
    NoTargetHost,

    #[error("invalid host: {0}")]
    InvalidHost(String),

    #[error("invalid port: {0}")]
    InvalidPort(String),

    #[error("options contain shell metacharacters: {0}")]
    UnsafeOptions(String),
}
