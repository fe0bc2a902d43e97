use ratatui::widgets::ListState;
use std::time::Instant;
use tui_input::Input;

use crate::app::types::{App, Screen};
use crate::error::CommandError;
use crate::matcher::rank_hosts;
use crate::models::SshHost;
use crate::ssh_service::{build_command, CommandValidator};
use crate::validation::{custom_host, is_valid_host, is_valid_ssh_option};

impl App {
    pub fn new(hosts: Vec<SshHost>, validator: CommandValidator) -> Self {
        let mut app = Self {
            should_quit: false,
            screen: Screen::HostSelector,
            hosts,
            validator,
            status_message: None,
            search: Input::default(),
            filtered_hosts: Vec::new(),
            selected: 0,
            host_list_state: ListState::default(),
            target: None,
            options: Input::default(),
            command: None,
        };
        app.apply_filter();
        app
    }

    /// Re-ranks the catalog against the search text and focuses the first row.
    pub fn apply_filter(&mut self) {
        self.filtered_hosts = rank_hosts(&self.hosts, self.search.value());
        self.selected = 0;
        self.host_list_state
            .select((!self.filtered_hosts.is_empty()).then_some(0));
    }

    pub fn clear_search(&mut self) {
        self.search.reset();
        self.apply_filter();
    }

    pub fn visible_hosts(&self) -> impl Iterator<Item = &SshHost> {
        self.filtered_hosts.iter().filter_map(|&i| self.hosts.get(i))
    }

    pub fn current_host(&self) -> Option<&SshHost> {
        self.filtered_hosts
            .get(self.selected)
            .and_then(|&i| self.hosts.get(i))
    }

    pub fn select_next(&mut self) {
        if self.filtered_hosts.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.filtered_hosts.len();
        self.host_list_state.select(Some(self.selected));
    }

    pub fn select_previous(&mut self) {
        if self.filtered_hosts.is_empty() {
            return;
        }
        let total = self.filtered_hosts.len();
        self.selected = (self.selected + total - 1) % total;
        self.host_list_state.select(Some(self.selected));
    }

    /// The focused host, or a custom host built from the search text when
    /// nothing matches and the text is a valid destination.
    pub fn pick_target(&self) -> Option<SshHost> {
        if let Some(host) = self.current_host() {
            return Some(host.clone());
        }

        let typed = self.search.value().trim();
        if !typed.is_empty() && self.filtered_hosts.is_empty() && is_valid_host(typed) {
            return Some(custom_host(typed));
        }
        None
    }

    /// Enter/Tab on the selector: connect right away or open the options screen.
    pub fn confirm_host(&mut self, open_options: bool) {
        let Some(host) = self.pick_target() else {
            let typed = self.search.value().trim();
            if !typed.is_empty() {
                self.set_status(format!("No matching host and '{}' is not a valid host", typed));
            }
            return;
        };

        tracing::info!("Selected host '{}' ({})", host.name, host.source);

        if open_options {
            self.options.reset();
            self.target = Some(host);
            self.screen = Screen::OptionsEntry;
        } else {
            self.submit(&host, "");
        }
    }

    pub fn back_to_selector(&mut self) {
        self.target = None;
        self.options.reset();
        self.screen = Screen::HostSelector;
    }

    /// Command the options screen would run right now.
    pub fn preview_command(&self) -> Option<String> {
        self.target
            .as_ref()
            .map(|host| build_command(host, self.options.value().trim()))
    }

    pub fn confirm_options(&mut self) {
        if let Some(host) = self.target.clone() {
            let options = self.options.value().to_string();
            self.submit(&host, &options);
        }
    }

    /// Builds and validates the command. On success the app quits with the
    /// command ready; on failure the error is shown and the user can retry.
    fn submit(&mut self, host: &SshHost, options: &str) {
        let options = options.trim();
        if !is_valid_ssh_option(options) {
            self.reject(CommandError::UnsafeOptions(options.to_string()));
            return;
        }

        let command = build_command(host, options);
        match self.validator.validate(&command) {
            Ok(()) => {
                tracing::info!("Command ready: {}", command);
                self.command = Some(command);
                self.should_quit = true;
            }
            Err(e) => self.reject(e),
        }
    }

    fn reject(&mut self, error: CommandError) {
        tracing::warn!("Command rejected: {}", error);
        self.set_status(format!("Error: {}", error));
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    pub fn clear_status_message(&mut self) {
        self.status_message = None;
    }
}
