use anyhow::{Context, Result};
use crossterm::style::Stylize;
use std::collections::HashSet;
use std::path::PathBuf;
use std::process::Command;

use crate::error::CommandError;
use crate::models::{HostSource, SshHost};
use crate::validation::is_valid_host;

pub const SSH_PROGRAM: &str = "ssh";

/// Renders the command line for `host` with the user's free-form `options`
/// appended verbatim.
///
/// Config hosts are addressed by name only so ssh re-reads their block
/// (HostName, User, Port, ProxyJump...). Everything else gets an explicit
/// `-p` and `user@host` target.
pub fn build_command(host: &SshHost, options: &str) -> String {
    let mut parts = vec![SSH_PROGRAM.to_string()];

    match host.source {
        HostSource::Config => parts.push(host.name.clone()),
        HostSource::KnownHosts | HostSource::Custom => {
            if let Some(port) = host.explicit_port() {
                parts.push("-p".to_string());
                parts.push(port.to_string());
            }

            let target = if host.user.is_empty() {
                host.target_host().to_string()
            } else {
                format!("{}@{}", host.user, host.target_host())
            };
            parts.push(target);
        }
    }

    if !options.is_empty() {
        parts.push(options.to_string());
    }

    parts.join(" ")
}

/// Structural checks run on a command line right before it is launched.
#[derive(Debug, Default, Clone)]
pub struct CommandValidator {
    /// Lowercased names and aliases of config hosts, accepted as targets
    /// even when they are not dotted domains.
    config_names: HashSet<String>,
}

impl CommandValidator {
    pub fn for_catalog(hosts: &[SshHost]) -> Self {
        let config_names = hosts
            .iter()
            .filter(|host| host.source == HostSource::Config)
            .flat_map(|host| std::iter::once(&host.name).chain(&host.aliases))
            .map(|name| name.to_lowercase())
            .collect();

        Self { config_names }
    }

    pub fn validate(&self, command: &str) -> Result<(), CommandError> {
        if command.is_empty() {
            return Err(CommandError::Empty);
        }

        let parts: Vec<&str> = command.split_whitespace().collect();
        if parts.first() != Some(&SSH_PROGRAM) {
            return Err(CommandError::NotSsh);
        }
        if parts.len() < 2 {
            return Err(CommandError::MissingTarget);
        }

        // The target is taken to be the last argument that is not an option.
        let host = parts[1..]
            .iter()
            .rev()
            .find(|part| !part.starts_with('-'))
            .ok_or(CommandError::NoTargetHost)?;

        if !self.accepts_host(host) {
            return Err(CommandError::InvalidHost(host.to_string()));
        }

        for pair in parts[1..].windows(2) {
            if pair[0] == "-p" && !is_valid_port(pair[1]) {
                return Err(CommandError::InvalidPort(pair[1].to_string()));
            }
        }

        Ok(())
    }

    fn accepts_host(&self, host: &str) -> bool {
        is_valid_host(host) || self.config_names.contains(&host.to_lowercase())
    }
}

/// Validates `command` with no catalog knowledge.
pub fn validate_command(command: &str) -> Result<(), CommandError> {
    CommandValidator::default().validate(command)
}

fn is_valid_port(value: &str) -> bool {
    matches!(value.parse::<u32>(), Ok(port) if (1..=65535).contains(&port))
}

/// Arguments handed to the ssh binary: the command line split on
/// whitespace, program name dropped.
pub fn command_argv(command: &str) -> Vec<String> {
    command
        .split_whitespace()
        .skip(1)
        .map(str::to_string)
        .collect()
}

/// Hands an ssh invocation over to the terminal.
pub trait Launcher {
    /// Runs `ssh <args>`. On platforms that can replace the process image
    /// this only returns on failure.
    fn launch(&self, args: &[String]) -> Result<()>;
}

/// Launches the real `ssh` found on `PATH`.
#[derive(Debug, Default)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, args: &[String]) -> Result<()> {
        let ssh_path = check_ssh_available()?;

        println!("{}", format!("{} {}", SSH_PROGRAM, args.join(" ")).cyan().bold());
        tracing::info!("Executing {:?} {:?}", ssh_path, args);

        let mut cmd = Command::new(&ssh_path);
        cmd.args(args);
        run_attached(cmd)
    }
}

/// Prints the command instead of running it (`--dry-run`).
#[derive(Debug, Default)]
pub struct DryRunLauncher;

impl Launcher for DryRunLauncher {
    fn launch(&self, args: &[String]) -> Result<()> {
        println!("{} {}", SSH_PROGRAM, args.join(" "));
        Ok(())
    }
}

#[cfg(unix)]
fn run_attached(mut cmd: Command) -> Result<()> {
    use std::os::unix::process::CommandExt;

    // exec only comes back on error.
    let err = cmd.exec();
    Err(err).context("Failed to execute SSH command")
}

#[cfg(not(unix))]
fn run_attached(mut cmd: Command) -> Result<()> {
    use std::process::Stdio;

    let status = cmd
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .context("Failed to execute SSH command")?;

    if !status.success() {
        anyhow::bail!(
            "SSH connection failed with exit code {}",
            status.code().unwrap_or(-1)
        );
    }
    Ok(())
}

/// Validates `command` and only then passes it to `launcher`.
pub fn launch_command(
    launcher: &dyn Launcher,
    validator: &CommandValidator,
    command: &str,
) -> Result<()> {
    validator
        .validate(command)
        .with_context(|| format!("Invalid SSH command: {command}"))?;

    tracing::info!("Launching: {}", command);
    launcher.launch(&command_argv(command))
}

pub fn check_ssh_available() -> Result<PathBuf> {
    which::which(SSH_PROGRAM)
        .context("SSH is not available on this system. Please install OpenSSH")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::custom_host;
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingLauncher {
        calls: RefCell<Vec<Vec<String>>>,
    }

    impl Launcher for RecordingLauncher {
        fn launch(&self, args: &[String]) -> Result<()> {
            self.calls.borrow_mut().push(args.to_vec());
            Ok(())
        }
    }

    fn known(name: &str, host_name: &str, user: &str, port: &str) -> SshHost {
        SshHost {
            name: name.to_string(),
            host_name: host_name.to_string(),
            user: user.to_string(),
            port: port.to_string(),
            source: HostSource::KnownHosts,
            aliases: Vec::new(),
        }
    }

    #[test]
    fn config_host_uses_name_and_raw_options() {
        let mut host = SshHost::new("cfg", HostSource::Config);
        host.host_name = "cfg.example".to_string();
        host.user = "ignored".to_string();
        host.port = "2222".to_string();

        assert_eq!(
            build_command(&host, "-L 8080:localhost:80"),
            "ssh cfg -L 8080:localhost:80"
        );
        assert_eq!(
            build_command(&host, "-L 8080:localhost:80 -i ~/.ssh/id_rsa"),
            "ssh cfg -L 8080:localhost:80 -i ~/.ssh/id_rsa"
        );
        assert_eq!(build_command(&host, ""), "ssh cfg");
    }

    #[test]
    fn known_host_expands_port_user_and_host_name() {
        let host = known("srv", "srv.example", "admin", "2200");
        assert_eq!(build_command(&host, "-v"), "ssh -p 2200 admin@srv.example -v");
        assert_eq!(build_command(&host, ""), "ssh -p 2200 admin@srv.example");
    }

    #[test]
    fn known_host_with_defaults_is_bare() {
        let host = known("host.local", "host.local", "", "22");
        assert_eq!(build_command(&host, ""), "ssh host.local");
    }

    #[test]
    fn custom_host_round_trips_typed_target() {
        let host = custom_host("user@example.com");
        assert_eq!(build_command(&host, ""), "ssh user@example.com");

        let bare = custom_host("example.com");
        assert_eq!(build_command(&bare, "-v"), "ssh example.com -v");
    }

    #[test]
    fn test_validate_command() {
        let cases = [
            ("", Some(CommandError::Empty)),
            ("notssh host.example.com", Some(CommandError::NotSsh)),
            ("ssh", Some(CommandError::MissingTarget)),
            ("ssh -p -C", Some(CommandError::NoTargetHost)),
            ("ssh user@host.example.com", None),
            ("ssh -p 2222 user@host.example.com", None),
            ("ssh   user@host.example.com", None),
            ("ssh\tuser@host.example.com", None),
            ("ssh -o option=value host.example.com", None),
            ("ssh 10.0.0.1 -v", None),
            (
                "ssh user@bad_host",
                Some(CommandError::InvalidHost("user@bad_host".to_string())),
            ),
            (
                "ssh -p 99999 host.example.com",
                Some(CommandError::InvalidPort("99999".to_string())),
            ),
            (
                "ssh -p abc host.example.com",
                Some(CommandError::InvalidPort("abc".to_string())),
            ),
            (
                "ssh -p 0 host.example.com",
                Some(CommandError::InvalidPort("0".to_string())),
            ),
        ];

        for (command, expected) in cases {
            assert_eq!(validate_command(command).err(), expected, "validate({command:?})");
        }
    }

    #[test]
    fn host_check_runs_before_port_check() {
        assert_eq!(
            validate_command("ssh -p abc"),
            Err(CommandError::InvalidHost("abc".to_string()))
        );
    }

    #[test]
    fn catalog_validator_accepts_config_aliases() {
        let mut web = SshHost::new("web", HostSource::Config);
        web.aliases = vec!["www".to_string()];
        let stray = SshHost::new("stray", HostSource::KnownHosts);
        let validator = CommandValidator::for_catalog(&[web, stray]);

        assert!(validator.validate("ssh web").is_ok());
        assert!(validator.validate("ssh WWW -v").is_ok());
        assert!(validator.validate("ssh stray").is_err());
        assert!(validate_command("ssh web").is_err());
        assert_eq!(
            validator.validate("ssh web -p 70000"),
            Err(CommandError::InvalidPort("70000".to_string()))
        );
    }

    #[test]
    fn argv_drops_program_and_extra_whitespace() {
        assert_eq!(
            command_argv("ssh  -p 2200\tadmin@srv.example -v"),
            vec!["-p", "2200", "admin@srv.example", "-v"]
        );
    }

    #[test]
    fn invalid_command_never_reaches_launcher() {
        let launcher = RecordingLauncher::default();
        let validator = CommandValidator::default();

        assert!(launch_command(&launcher, &validator, "ssh -p 99999 srv.example.com").is_err());
        assert!(launcher.calls.borrow().is_empty());

        launch_command(&launcher, &validator, "ssh -p 2200 admin@srv.example.com").unwrap();
        assert_eq!(
            *launcher.calls.borrow(),
            vec![vec!["-p", "2200", "admin@srv.example.com"]]
        );
    }
}
