use std::fmt;

/// Port that is never rendered into commands or host details.
pub const DEFAULT_SSH_PORT: &str = "22";

/// Where a host record was discovered. Decides how the ssh command is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostSource {
    Config,
    KnownHosts,
    Custom,
}

impl fmt::Display for HostSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            HostSource::Config => "config",
            HostSource::KnownHosts => "known_hosts",
            HostSource::Custom => "custom",
        };
        f.write_str(tag)
    }
}

/// One SSH destination. Built once per discovery pass and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SshHost {
    pub name: String,
    pub host_name: String,
    pub user: String,
    pub port: String,
    pub source: HostSource,
    pub aliases: Vec<String>,
}

impl SshHost {
    pub fn new(name: impl Into<String>, source: HostSource) -> Self {
        Self {
            name: name.into(),
            host_name: String::new(),
            user: String::new(),
            port: String::new(),
            source,
            aliases: Vec::new(),
        }
    }

    /// Case-insensitive key used to merge the config and known_hosts catalogs.
    pub fn dedup_key(&self) -> String {
        self.name.to_lowercase()
    }

    /// Address ssh should dial: `host_name` when it differs from `name`, else `name`.
    pub fn target_host(&self) -> &str {
        if !self.host_name.is_empty() && self.host_name != self.name {
            &self.host_name
        } else {
            &self.name
        }
    }

    /// Port only when it is set and not the default one.
    pub fn explicit_port(&self) -> Option<&str> {
        if self.port.is_empty() || self.port == DEFAULT_SSH_PORT {
            None
        } else {
            Some(&self.port)
        }
    }
}
