use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::hosts_list::format_host_details;

/// Suggested options. Each one must still validate when appended after the target.
const EXAMPLE_FLAGS: [&str; 4] = ["-v", "-A", "-X", "-C"];

pub fn draw<B: Backend>(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(4), // Target host
                Constraint::Length(3), // Options input
                Constraint::Length(1), // Examples
                Constraint::Min(3),    // Command preview
            ]
            .as_ref(),
        )
        .split(area);

    if let Some(host) = &app.target {
        let target = Paragraph::new(vec![
            Line::from(Span::styled(
                host.name.as_str(),
                Style::default()
                    .fg(Color::LightYellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format_host_details(host),
                Style::default().fg(Color::Gray),
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Connect to "));
        f.render_widget(target, chunks[0]);
    }

    let input = Paragraph::new(app.options.value())
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" SSH options ")
                .border_style(Style::default().fg(Color::Yellow)),
        );
    f.render_widget(input, chunks[1]);
    f.set_cursor(
        chunks[1].x + 1 + app.options.visual_cursor() as u16,
        chunks[1].y + 1,
    );

    let examples = format!("e.g. {}", EXAMPLE_FLAGS.join("  "));
    f.render_widget(
        Paragraph::new(examples).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );

    let preview = Paragraph::new(app.preview_command().unwrap_or_default())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Command ")
                .border_style(Style::default().fg(Color::Green)),
        );
    f.render_widget(preview, chunks[3]);
}
