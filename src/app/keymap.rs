use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tui_input::backend::crossterm::EventHandler;

use crate::app::types::{App, Screen};

impl App {
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::HostSelector => self.handle_selector_key(key),
            Screen::OptionsEntry => self.handle_options_key(key),
        }
    }

    fn handle_selector_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                // First Esc clears the search, the second one quits.
                if self.search.value().is_empty() {
                    self.should_quit = true;
                } else {
                    self.clear_search();
                }
            }
            KeyCode::Enter => self.confirm_host(false),
            KeyCode::Tab => self.confirm_host(true),
            KeyCode::Up => self.select_previous(),
            KeyCode::Down => self.select_next(),
            _ => {
                if self.search.handle_event(&Event::Key(key)).is_some() {
                    self.apply_filter();
                }
            }
        }
    }

    fn handle_options_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.back_to_selector(),
            KeyCode::Enter => self.confirm_options(),
            _ => {
                self.options.handle_event(&Event::Key(key));
            }
        }
    }
}
