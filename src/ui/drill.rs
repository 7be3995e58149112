use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::models::Question;
use crate::report::answers_match;
use crate::session::{DrillPhase, DrillState};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(drill) = app.drill() else {
        return;
    };
    let question = app.question(drill.question());

    let option_rows = (question.options.len().max(1) as u16).saturating_mul(2);
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(option_rows),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    let header = Paragraph::new(format!("Question {}", question.number)).fg(Color::DarkGray);
    frame.render_widget(header, chunks[0]);
    let mode = Paragraph::new("drill")
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(mode, chunks[0]);

    let prompt = Paragraph::new(question.text.as_str())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(prompt, chunks[2]);

    render_options(frame, chunks[3], question, drill, app.option_cursor());
    frame.render_widget(Paragraph::new(verdict_lines(question, drill)), chunks[4]);
    render_controls(frame, chunks[5]);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    drill: &DrillState,
    cursor: usize,
) {
    if question.options.is_empty() {
        let widget = Paragraph::new("No options parsed for this question.").fg(Color::Yellow);
        frame.render_widget(widget, area);
        return;
    }

    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        let letter = option.chars().next().unwrap_or(' ');
        let is_cursor = index == cursor;
        let is_chosen = drill.chosen().contains(letter);

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

fn verdict_lines<'a>(question: &'a Question, drill: &'a DrillState) -> Vec<Line<'a>> {
    let mut lines = Vec::new();

    if drill.phase() != DrillPhase::Unanswered && !drill.chosen().is_empty() {
        let line = if answers_match(drill.chosen(), &question.answer) {
            Line::from(Span::styled(
                "Correct",
                Style::default().fg(Color::Green).bold(),
            ))
        } else {
            Line::from(Span::styled(
                "Incorrect",
                Style::default().fg(Color::Red).bold(),
            ))
        };
        lines.push(line);
    }

    if drill.phase() == DrillPhase::Revealed {
        lines.push(Line::from(Span::styled(
            format!("Answer: {}", question.answer),
            Style::default().fg(Color::Yellow),
        )));
    }

    lines
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k move  ·  space select  ·  a answer  ·  n next  ·  esc menu")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
