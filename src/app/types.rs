use ratatui::widgets::ListState;
use std::time::Instant;
use tui_input::Input;

use crate::models::SshHost;
use crate::ssh_service::CommandValidator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    HostSelector,
    OptionsEntry,
}

#[derive(Debug)]
pub struct App {
    pub should_quit: bool,
    pub screen: Screen,
    pub hosts: Vec<SshHost>,
    pub validator: CommandValidator,

    pub status_message: Option<(String, Instant)>,

    // Host selector
    pub search: Input,
    pub filtered_hosts: Vec<usize>, // Indices into `hosts`, ranked
    pub selected: usize,
    pub host_list_state: ListState,

    // Options entry
    pub target: Option<SshHost>,
    pub options: Input,

    /// Validated command line, set when the user confirms a connection.
    pub command: Option<String>,
}
