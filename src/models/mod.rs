mod question;

pub use question::Question;

/// Top-level view the application is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Menu,
    MockExam,
    Drill,
    Grading,
}
