mod drill;
mod exam;
mod grading;
mod menu;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::models::AppState;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.state {
        AppState::Menu => menu::render(frame, area, app),
        AppState::MockExam => exam::render(frame, area, app),
        AppState::Drill => drill::render(frame, area, app),
        AppState::Grading => grading::render(frame, area, app),
    }
}
