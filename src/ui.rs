use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use crate::app::{App, Screen};

mod footer;
pub mod hosts_list;
mod options_entry;
mod status_bar;

use footer::draw_footer;
use status_bar::draw_status_bar;

pub fn draw<B: Backend>(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(3),    // Main content
                Constraint::Length(1), // Status bar
                Constraint::Length(1), // Footer
            ]
            .as_ref(),
        )
        .split(f.size());

    draw_screen::<B>(f, app, chunks[0]);
    draw_status_bar::<B>(f, app, chunks[1]);
    draw_footer::<B>(f, app, chunks[2]);
}

fn draw_screen<B: Backend>(f: &mut Frame, app: &mut App, area: Rect) {
    match app.screen {
        Screen::HostSelector => hosts_list::draw::<B>(f, app, area),
        Screen::OptionsEntry => options_entry::draw::<B>(f, app, area),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HostSource, SshHost};
    use crate::ssh_service::CommandValidator;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| draw::<TestBackend>(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> App {
        let mut web = SshHost::new("web", HostSource::Config);
        web.host_name = "web.example.com".to_string();
        web.user = "deploy".to_string();
        web.port = "2222".to_string();

        let mut git = SshHost::new("git.example.com", HostSource::KnownHosts);
        git.host_name = "git.example.com".to_string();

        let hosts = vec![web, git];
        let validator = CommandValidator::for_catalog(&hosts);
        App::new(hosts, validator)
    }

    #[test]
    fn selector_lists_hosts_with_details() {
        let mut app = app();
        let screen = render(&mut app);

        assert!(screen.contains("web"));
        assert!(screen.contains("host: web.example.com"));
        assert!(screen.contains("port: 2222"));
        assert!(screen.contains("[config]"));
        assert!(screen.contains("[known_hosts]"));
    }

    #[test]
    fn options_screen_previews_command() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
        for c in "-v".chars() {
            app.handle_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
        }

        let screen = render(&mut app);
        assert!(screen.contains("ssh web -v"));
    }
}
