use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

const MENU_ITEMS: [&str; 3] = [
    "Mock exam   65 questions · 130 minutes",
    "Drill       one question at a time",
    "Quit",
];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(14),
        Constraint::Fill(1),
    ])
    .split(area);

    let mut content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "CBT PRACTICE",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{} questions in bank", app.bank().len()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    for (index, item) in MENU_ITEMS.iter().enumerate() {
        let selected = index == app.menu_cursor();
        let style = if selected {
            Style::default().fg(Color::Cyan).bold()
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if selected { ">" } else { " " };
        content.push(Line::from(Span::styled(
            format!("{} {}", marker, item),
            style,
        )));
        content.push(Line::from(""));
    }

    match app.menu_notice() {
        Some(notice) => content.push(Line::from(Span::styled(
            notice.to_string(),
            Style::default().fg(Color::Red),
        ))),
        None => content.push(Line::from(Span::styled(
            "j/k navigate  ·  enter select  ·  q quit",
            Style::default().fg(Color::DarkGray),
        ))),
    }

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Color::DarkGray),
    );

    frame.render_widget(widget, chunks[1]);
}
