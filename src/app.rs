//! Top-level application state machine.
//!
//! `App` owns the parsed bank for the life of the process and routes
//! between the menu, the timed mock exam, the drill, and the grading
//! report. Every mutation corresponds to one discrete user action (or
//! the timer tick); nothing is recomputed behind the renderer's back.

use crate::models::{AppState, Question};
use crate::report::Report;
use crate::session::{DrillState, ExamSession, toggle_letter};

/// Entries on the main menu: mock exam, drill, quit.
pub const MENU_ITEM_COUNT: usize = 3;

pub struct App {
    pub state: AppState,
    bank: Vec<Question>,
    session: Option<ExamSession>,
    drill: Option<DrillState>,
    report: Option<Report>,
    menu_cursor: usize,
    option_cursor: usize,
    grading_scroll: usize,
    menu_notice: Option<String>,
}

impl App {
    pub fn new(bank: Vec<Question>) -> Self {
        Self {
            state: AppState::Menu,
            bank,
            session: None,
            drill: None,
            report: None,
            menu_cursor: 0,
            option_cursor: 0,
            grading_scroll: 0,
            menu_notice: None,
        }
    }

    pub fn bank(&self) -> &[Question] {
        &self.bank
    }

    /// Question at a bank index handed out by the session layer.
    pub fn question(&self, index: usize) -> &Question {
        &self.bank[index]
    }

    pub fn session(&self) -> Option<&ExamSession> {
        self.session.as_ref()
    }

    pub fn drill(&self) -> Option<&DrillState> {
        self.drill.as_ref()
    }

    pub fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    pub fn menu_cursor(&self) -> usize {
        self.menu_cursor
    }

    pub fn menu_notice(&self) -> Option<&str> {
        self.menu_notice.as_deref()
    }

    pub fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    pub fn grading_scroll(&self) -> usize {
        self.grading_scroll
    }

    pub fn menu_up(&mut self) {
        self.menu_cursor = (self.menu_cursor + MENU_ITEM_COUNT - 1) % MENU_ITEM_COUNT;
    }

    pub fn menu_down(&mut self) {
        self.menu_cursor = (self.menu_cursor + 1) % MENU_ITEM_COUNT;
    }

    /// Sample a fresh mock exam and switch to it. Refused with a menu
    /// notice when the bank is empty.
    pub fn start_mock_exam(&mut self) {
        if self.bank.is_empty() {
            self.menu_notice = Some("question bank is empty".to_string());
            return;
        }
        self.menu_notice = None;
        self.session = Some(ExamSession::new(self.bank.len()));
        self.option_cursor = 0;
        self.state = AppState::MockExam;
    }

    /// Pick one random question to drill. Refused when the bank is empty.
    pub fn start_drill(&mut self) {
        if self.bank.is_empty() {
            self.menu_notice = Some("question bank is empty".to_string());
            return;
        }
        self.menu_notice = None;
        self.drill = Some(DrillState::random(self.bank.len()));
        self.option_cursor = 0;
        self.state = AppState::Drill;
    }

    fn option_count(&self) -> usize {
        match self.state {
            AppState::MockExam => self
                .session
                .as_ref()
                .filter(|session| !session.is_empty())
                .map_or(0, |session| {
                    self.bank[session.current_question()].options.len()
                }),
            AppState::Drill => self
                .drill
                .as_ref()
                .map_or(0, |drill| self.bank[drill.question()].options.len()),
            AppState::Menu | AppState::Grading => 0,
        }
    }

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.option_cursor = (self.option_cursor + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.option_cursor = (self.option_cursor + count - 1) % count;
        }
    }

    /// Apply the option under the cursor: single-select questions take
    /// it as the answer, multi-select questions toggle its letter.
    pub fn toggle_selected(&mut self) {
        match self.state {
            AppState::MockExam => {
                let Some(session) = self.session.as_mut() else {
                    return;
                };
                let question = &self.bank[session.current_question()];
                let Some(letter) = question.option_letter(self.option_cursor) else {
                    return;
                };
                let next = if question.is_multi_select() {
                    toggle_letter(session.current_answer(), letter)
                } else {
                    letter.to_string()
                };
                session.record_answer(&next);
            }
            AppState::Drill => {
                let Some(drill) = self.drill.as_mut() else {
                    return;
                };
                let question = &self.bank[drill.question()];
                let Some(letter) = question.option_letter(self.option_cursor) else {
                    return;
                };
                let next = if question.is_multi_select() {
                    toggle_letter(drill.chosen(), letter)
                } else {
                    letter.to_string()
                };
                drill.choose(&next);
            }
            AppState::Menu | AppState::Grading => {}
        }
    }

    pub fn next_question(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.advance();
            self.option_cursor = 0;
        }
    }

    pub fn previous_question(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.retreat();
            self.option_cursor = 0;
        }
    }

    /// Grade the session and switch to the report view. Also the
    /// landing point for an exhausted timer.
    pub fn finish_exam(&mut self) {
        if let Some(session) = self.session.take() {
            self.report = Some(session.finish(&self.bank));
            self.grading_scroll = 0;
            self.state = AppState::Grading;
        }
    }

    /// Force-finish once the time budget runs out.
    pub fn tick(&mut self) {
        if self.state == AppState::MockExam
            && self.session.as_ref().is_some_and(ExamSession::is_expired)
        {
            self.finish_exam();
        }
    }

    /// Swap the drilled question for a fresh random one.
    pub fn drill_next_question(&mut self) {
        if !self.bank.is_empty() {
            self.drill = Some(DrillState::random(self.bank.len()));
            self.option_cursor = 0;
        }
    }

    pub fn toggle_reveal(&mut self) {
        if let Some(drill) = self.drill.as_mut() {
            drill.toggle_reveal();
        }
    }

    pub fn scroll_grading_down(&mut self) {
        self.grading_scroll = self.grading_scroll.saturating_add(1);
    }

    pub fn scroll_grading_up(&mut self) {
        self.grading_scroll = self.grading_scroll.saturating_sub(1);
    }

    /// Abandon whatever mode is active and return to the menu.
    pub fn back_to_menu(&mut self) {
        self.session = None;
        self.drill = None;
        self.report = None;
        self.option_cursor = 0;
        self.grading_scroll = 0;
        self.state = AppState::Menu;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_select() -> Question {
        Question {
            number: 1,
            text: "Pick one.".to_string(),
            options: vec!["A. yes".to_string(), "B. no".to_string()],
            answer: "B".to_string(),
        }
    }

    fn multi_select() -> Question {
        Question {
            number: 2,
            text: "Pick two.".to_string(),
            options: vec![
                "A. first".to_string(),
                "B. second".to_string(),
                "C. third".to_string(),
            ],
            answer: "AC".to_string(),
        }
    }

    #[test]
    fn test_empty_bank_refuses_to_start() {
        let mut app = App::new(Vec::new());
        app.start_mock_exam();
        assert_eq!(app.state, AppState::Menu);
        assert!(app.menu_notice().is_some());

        app.start_drill();
        assert_eq!(app.state, AppState::Menu);
    }

    #[test]
    fn test_single_select_replaces_the_answer() {
        let mut app = App::new(vec![single_select()]);
        app.start_mock_exam();
        assert_eq!(app.state, AppState::MockExam);

        app.toggle_selected();
        assert_eq!(app.session().unwrap().current_answer(), "A");

        app.select_next_option();
        app.toggle_selected();
        assert_eq!(app.session().unwrap().current_answer(), "B");
    }

    #[test]
    fn test_multi_select_toggles_letters() {
        let mut app = App::new(vec![multi_select()]);
        app.start_mock_exam();

        app.toggle_selected();
        app.select_next_option();
        app.select_next_option();
        app.toggle_selected();
        assert_eq!(app.session().unwrap().current_answer(), "AC");

        app.toggle_selected();
        assert_eq!(app.session().unwrap().current_answer(), "A");
    }

    #[test]
    fn test_finish_exam_moves_to_grading() {
        let mut app = App::new(vec![single_select()]);
        app.start_mock_exam();
        app.select_next_option();
        app.toggle_selected();
        app.finish_exam();

        assert_eq!(app.state, AppState::Grading);
        let report = app.report().expect("report after finish");
        assert_eq!(report.score(), 1);
        assert_eq!(report.total(), 1);
        assert_eq!(report.percentage(), 100.0);
    }

    #[test]
    fn test_back_to_menu_clears_everything() {
        let mut app = App::new(vec![single_select()]);
        app.start_mock_exam();
        app.finish_exam();
        app.back_to_menu();

        assert_eq!(app.state, AppState::Menu);
        assert!(app.session().is_none());
        assert!(app.report().is_none());
    }

    #[test]
    fn test_option_cursor_wraps_per_question() {
        let mut app = App::new(vec![multi_select()]);
        app.start_mock_exam();
        app.select_previous_option();
        assert_eq!(app.option_cursor(), 2);
        app.select_next_option();
        assert_eq!(app.option_cursor(), 0);
    }
}
