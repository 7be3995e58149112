use std::time::Duration;

use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::models::Question;
use crate::session::ExamSession;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(session) = app.session() else {
        return;
    };
    let question = app.question(session.current_question());

    let option_rows = (question.options.len().max(1) as u16).saturating_mul(2);
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(option_rows),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_header(frame, chunks[0], session);
    render_prompt(frame, chunks[2], question);
    render_options(frame, chunks[3], question, session, app.option_cursor());
    render_controls(frame, chunks[4]);
}

fn render_header(frame: &mut Frame, area: Rect, session: &ExamSession) {
    let progress = format!("Question {} / {}", session.current() + 1, session.len());
    let widget = Paragraph::new(progress).fg(Color::DarkGray);
    frame.render_widget(widget, area);

    let remaining = session.remaining();
    let timer_color = if remaining < Duration::from_secs(5 * 60) {
        Color::Red
    } else {
        Color::DarkGray
    };
    let timer = Paragraph::new(format_remaining(remaining))
        .alignment(Alignment::Right)
        .fg(timer_color);
    frame.render_widget(timer, area);
}

fn format_remaining(remaining: Duration) -> String {
    let secs = remaining.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

fn render_prompt(frame: &mut Frame, area: Rect, question: &Question) {
    let widget = Paragraph::new(question.text.as_str())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    session: &ExamSession,
    cursor: usize,
) {
    if question.options.is_empty() {
        let widget = Paragraph::new("No options parsed for this question.").fg(Color::Yellow);
        frame.render_widget(widget, area);
        return;
    }

    let chosen = session.current_answer();
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let letter = option.chars().next().unwrap_or(' ');
        let is_cursor = index == cursor;
        let is_chosen = chosen.contains(letter);

        let style = if is_cursor {
            Style::default().fg(Color::Cyan).bold()
        } else if is_chosen {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::Gray)
        };
        let marker = if is_cursor { ">" } else { " " };
        let check = match (question.is_multi_select(), is_chosen) {
            (true, true) => "[x]",
            (true, false) => "[ ]",
            (false, true) => "(x)",
            (false, false) => "( )",
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} {} ", marker, check), style),
            Span::styled(option.as_str(), style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k move  ·  space select  ·  h/l question  ·  f finish  ·  esc menu")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
