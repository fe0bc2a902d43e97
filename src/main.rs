use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    style::Stylize,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::{io, process, time::Duration};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

mod app;
mod config;
mod discovery;
mod error;
mod matcher;
mod models;
mod ssh_service;
mod ui;
mod validation;

use app::App;
use config::ConfigManager;
use ssh_service::{
    check_ssh_available, launch_command, CommandValidator, DryRunLauncher, Launcher,
    SystemLauncher,
};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Pick an SSH host from ~/.ssh/config and known_hosts, then connect.
#[derive(Debug, Parser)]
#[command(name = "ssh-tui", version, about)]
struct Cli {
    /// Read hosts from this ssh config instead of ~/.ssh/config
    #[arg(long, value_name = "FILE")]
    ssh_config: Option<PathBuf>,

    /// Read hosts from this known_hosts instead of ~/.ssh/known_hosts
    #[arg(long, value_name = "FILE")]
    known_hosts: Option<PathBuf>,

    /// Print the ssh command instead of running it
    #[arg(long)]
    dry_run: bool,

    /// Write debug output to the log file
    #[arg(long)]
    verbose: bool,

    /// Arguments passed straight to ssh, skipping the selector
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "SSH_ARGS")]
    ssh_args: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_manager = ConfigManager::new()?;
    init_logging(&config_manager.log_dir(), cli.verbose)?;
    debug!("Starting with {:?}", cli);

    let launcher: Box<dyn Launcher> = if cli.dry_run {
        Box::new(DryRunLauncher)
    } else {
        Box::new(SystemLauncher)
    };

    if !cli.ssh_args.is_empty() {
        tracing::info!("Passing arguments through to ssh: {:?}", cli.ssh_args);
        return launcher.launch(&cli.ssh_args);
    }

    if !cli.dry_run {
        if let Err(e) = check_ssh_available() {
            eprintln!("{}", format!("{e:#}").red());
            process::exit(1);
        }
    }

    let mut app_config = config_manager.load_config()?;
    debug!("Loaded config from {:?}: {:?}", config_manager.config_path(), app_config);
    if let Some(path) = cli.ssh_config {
        app_config.ssh_config_file = path;
    }
    if let Some(path) = cli.known_hosts {
        app_config.known_hosts_file = path;
        app_config.include_known_hosts = true;
    }

    let hosts = match discovery::discover(&app_config.discovery_sources()) {
        Ok(hosts) => hosts,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error discovering SSH hosts: {}", e);
            process::exit(1);
        }
    };

    if hosts.is_empty() {
        println!("{}", "No SSH hosts found!".yellow().bold());
        println!("Hosts are read from:");
        println!("  {}", app_config.ssh_config_file.display());
        if app_config.include_known_hosts {
            println!("  {}", app_config.known_hosts_file.display());
        }
        println!();
        println!("Add one to your ssh config, for example:");
        println!("  Host myserver");
        println!("      HostName server.example.com");
        println!("      User deploy");
        println!("      Port 22");
        process::exit(1);
    }

    let validator = CommandValidator::for_catalog(&hosts);
    let app = App::new(hosts, validator.clone());

    let Some(command) = run_tui(app)? else {
        tracing::info!("Quit without connecting");
        return Ok(());
    };

    launch_command(launcher.as_ref(), &validator, &command)
}

fn init_logging(log_dir: &Path, verbose: bool) -> Result<()> {
    fs::create_dir_all(log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join(format!(
        "ssh-tui_{}.log",
        Local::now().format("%Y%m%d_%H%M%S")
    ));
    let file = File::create(&log_file).context("Failed to create log file")?;

    let level = if verbose { "ssh_tui=debug" } else { "ssh_tui=info" };
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();

    Ok(())
}

/// Runs the selector until the user quits. Returns the confirmed command, if any.
fn run_tui(mut app: App) -> Result<Option<String>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(app.command.take())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw::<B>(f, app))?;

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_args_are_passed_through() {
        let cli = Cli::parse_from(["ssh-tui", "admin@srv.example.com", "-p", "2200"]);
        assert_eq!(cli.ssh_args, vec!["admin@srv.example.com", "-p", "2200"]);
        assert!(!cli.dry_run);
    }

    #[test]
    fn own_flags_come_before_ssh_args() {
        let cli = Cli::parse_from([
            "ssh-tui",
            "--dry-run",
            "--ssh-config",
            "/tmp/cfg",
            "user@host.example.com",
            "-v",
        ]);
        assert!(cli.dry_run);
        assert_eq!(cli.ssh_config, Some(PathBuf::from("/tmp/cfg")));
        assert_eq!(cli.ssh_args, vec!["user@host.example.com", "-v"]);
    }

    #[test]
    fn no_args_opens_selector() {
        let cli = Cli::parse_from(["ssh-tui"]);
        assert!(cli.ssh_args.is_empty());
        assert!(!cli.verbose);
    }
}
