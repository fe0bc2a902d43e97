use crate::app::{App, Screen};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

pub fn draw_footer<B: Backend>(f: &mut Frame, app: &App, area: Rect) {
    let footer = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let (nav_text, action_text) = match app.screen {
        Screen::HostSelector => (
            "↑/↓: Move  Type to search",
            "[Enter] Connect  [Tab] Options  [Esc] Clear/Quit",
        ),
        Screen::OptionsEntry => (
            "←/→: Cursor  Ctrl+W/U/K: Delete",
            "[Enter] Connect  [Esc] Back  [Ctrl+C] Quit",
        ),
    };

    let nav_help = Paragraph::new(nav_text).style(Style::default().fg(Color::Gray));
    let action_help = Paragraph::new(action_text)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Right);

    f.render_widget(nav_help, footer[0]);
    f.render_widget(action_help, footer[1]);
}
