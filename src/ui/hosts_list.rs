use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::models::{HostSource, SshHost};
use crate::validation::is_valid_host;

/// Second line of a list row: everything about the host except its name.
pub fn format_host_details(host: &SshHost) -> String {
    let mut details = Vec::new();

    if !host.host_name.is_empty() && host.host_name != host.name {
        details.push(format!("host: {}", host.host_name));
    }
    if !host.user.is_empty() {
        details.push(format!("user: {}", host.user));
    }
    if let Some(port) = host.explicit_port() {
        details.push(format!("port: {}", port));
    }
    if !host.aliases.is_empty() {
        details.push(format!("aka: {}", host.aliases.join(", ")));
    }
    details.push(format!("[{}]", host.source));

    details.join(" • ")
}

pub fn draw<B: Backend>(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3), // Search input
                Constraint::Min(0),    // Results
            ]
            .as_ref(),
        )
        .split(area);

    draw_search_box::<B>(f, app, chunks[0]);
    draw_results::<B>(f, app, chunks[1]);
}

fn draw_search_box<B: Backend>(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 🔍 Search hosts or type user@host ")
        .border_style(Style::default().fg(Color::Yellow));

    let input = Paragraph::new(app.search.value())
        .style(Style::default().fg(Color::White))
        .block(block);
    f.render_widget(input, area);

    f.set_cursor(
        area.x + 1 + app.search.visual_cursor() as u16,
        area.y + 1,
    );
}

fn draw_results<B: Backend>(f: &mut Frame, app: &mut App, area: Rect) {
    let title = format!(
        " 👤 Hosts ({} of {}) ",
        app.filtered_hosts.len(),
        app.hosts.len()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green))
        .title(title);

    if app.filtered_hosts.is_empty() {
        let typed = app.search.value().trim();
        let hint = if is_valid_host(typed) {
            Line::from(vec![
                Span::raw("No match. Press "),
                Span::styled("Enter", Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(format!(" to connect to {}", typed)),
            ])
        } else {
            Line::from(Span::styled(
                "No hosts match your search",
                Style::default().fg(Color::DarkGray),
            ))
        };
        f.render_widget(Paragraph::new(hint).block(block), area);
        return;
    }

    let items: Vec<ListItem> = app
        .visible_hosts()
        .map(|host| {
            let source_color = match host.source {
                HostSource::Config => Color::LightYellow,
                HostSource::KnownHosts => Color::Cyan,
                HostSource::Custom => Color::Magenta,
            };

            ListItem::new(vec![
                Line::from(Span::styled(
                    host.name.clone(),
                    Style::default()
                        .fg(source_color)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    format!("  {}", format_host_details(host)),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_symbol("> ")
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    f.render_stateful_widget(list, area, &mut app.host_list_state);
}
