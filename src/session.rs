//! Exam and drill session state.
//!
//! The session layer owns which questions are in play and what the user
//! has answered so far; the bank itself stays with the [`App`](crate::App)
//! and is only referenced by index, never copied or mutated.

use std::collections::BTreeSet;
use std::time::{Duration, Instant};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::Question;
use crate::report::{Report, ReportEntry, answers_match};

/// Number of questions sampled into a mock exam, bank permitting.
pub const MOCK_EXAM_SIZE: usize = 65;

/// Fixed time budget for a mock exam.
pub const EXAM_DURATION: Duration = Duration::from_secs(130 * 60);

/// One timed mock-exam attempt over a sampled subset of the bank.
pub struct ExamSession {
    picked: Vec<usize>,
    answers: Vec<String>,
    current: usize,
    started: Instant,
}

impl ExamSession {
    /// Sample `min(MOCK_EXAM_SIZE, bank_len)` distinct questions and
    /// start the clock.
    pub fn new(bank_len: usize) -> Self {
        let mut picked: Vec<usize> = (0..bank_len).collect();
        picked.shuffle(&mut rand::thread_rng());
        picked.truncate(MOCK_EXAM_SIZE);
        Self::with_questions(picked)
    }

    /// Build a session over a fixed set of bank indices.
    pub fn with_questions(picked: Vec<usize>) -> Self {
        let answers = vec![String::new(); picked.len()];
        Self {
            picked,
            answers,
            current: 0,
            started: Instant::now(),
        }
    }

    pub fn len(&self) -> usize {
        self.picked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picked.is_empty()
    }

    /// Bank index of the question at session position `pos`.
    pub fn question_at(&self, pos: usize) -> usize {
        self.picked[pos]
    }

    /// Session position of the cursor, zero-based.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Bank index of the question under the cursor.
    pub fn current_question(&self) -> usize {
        self.picked[self.current]
    }

    pub fn answer_at(&self, pos: usize) -> &str {
        &self.answers[pos]
    }

    pub fn current_answer(&self) -> &str {
        &self.answers[self.current]
    }

    /// Record the current question's answer as sorted, deduplicated
    /// uppercase letters.
    pub fn record_answer(&mut self, letters: &str) {
        self.answers[self.current] = normalize_letters(letters);
    }

    /// Move to the next question; stays put on the last one.
    pub fn advance(&mut self) {
        if self.current + 1 < self.picked.len() {
            self.current += 1;
        }
    }

    /// Move to the previous question; stays put on the first one.
    pub fn retreat(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Time left in the budget, zero once exhausted.
    pub fn remaining(&self) -> Duration {
        EXAM_DURATION.saturating_sub(self.started.elapsed())
    }

    pub fn is_expired(&self) -> bool {
        self.remaining().is_zero()
    }

    /// Grade every recorded answer against the bank.
    pub fn finish(&self, bank: &[Question]) -> Report {
        let entries = self
            .picked
            .iter()
            .zip(self.answers.iter())
            .map(|(&question, user)| ReportEntry {
                question,
                user_answer: user.clone(),
                is_correct: answers_match(user, &bank[question].answer),
            })
            .collect();
        Report::new(entries)
    }
}

/// View-model phase of the single-question drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrillPhase {
    /// Nothing selected yet; no verdict shown.
    Unanswered,
    /// A selection was made; the verdict is visible.
    Answered,
    /// The correct key is shown alongside the verdict.
    Revealed,
}

/// One question being drilled outside the timed exam.
pub struct DrillState {
    question: usize,
    chosen: String,
    phase: DrillPhase,
}

impl DrillState {
    /// Drill a uniformly random bank question.
    pub fn random(bank_len: usize) -> Self {
        Self::for_question(rand::thread_rng().gen_range(0..bank_len))
    }

    pub fn for_question(question: usize) -> Self {
        Self {
            question,
            chosen: String::new(),
            phase: DrillPhase::Unanswered,
        }
    }

    /// Bank index of the drilled question.
    pub fn question(&self) -> usize {
        self.question
    }

    pub fn chosen(&self) -> &str {
        &self.chosen
    }

    pub fn phase(&self) -> DrillPhase {
        self.phase
    }

    /// Record a selection. Shows the verdict unless the key is already
    /// on screen, in which case the reveal stays open.
    pub fn choose(&mut self, letters: &str) {
        self.chosen = normalize_letters(letters);
        if self.phase != DrillPhase::Revealed {
            self.phase = DrillPhase::Answered;
        }
    }

    /// Toggle the correct key on or off.
    pub fn toggle_reveal(&mut self) {
        self.phase = match self.phase {
            DrillPhase::Revealed if self.chosen.is_empty() => DrillPhase::Unanswered,
            DrillPhase::Revealed => DrillPhase::Answered,
            DrillPhase::Unanswered | DrillPhase::Answered => DrillPhase::Revealed,
        };
    }
}

/// Sorted, deduplicated, uppercased letter string (`"ca"` -> `"AC"`).
pub fn normalize_letters(letters: &str) -> String {
    let set: BTreeSet<char> = letters.chars().map(|c| c.to_ascii_uppercase()).collect();
    set.into_iter().collect()
}

/// Add `letter` to the selection, or remove it if already present.
pub(crate) fn toggle_letter(current: &str, letter: char) -> String {
    let mut set: BTreeSet<char> = current.chars().collect();
    if !set.insert(letter) {
        set.remove(&letter);
    }
    set.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn question(number: u32, answer: &str) -> Question {
        Question {
            number,
            text: format!("prompt {number}"),
            options: vec!["A. first".to_string(), "B. second".to_string()],
            answer: answer.to_string(),
        }
    }

    #[test]
    fn test_sample_is_clamped_to_bank_size() {
        let session = ExamSession::new(40);
        assert_eq!(session.len(), 40);
    }

    #[test]
    fn test_sample_caps_at_exam_size() {
        let session = ExamSession::new(200);
        assert_eq!(session.len(), MOCK_EXAM_SIZE);
    }

    #[test]
    fn test_sample_has_no_duplicates() {
        let session = ExamSession::new(200);
        let distinct: HashSet<usize> = (0..session.len()).map(|i| session.question_at(i)).collect();
        assert_eq!(distinct.len(), session.len());
    }

    #[test]
    fn test_recorded_answers_are_normalized() {
        let mut session = ExamSession::with_questions(vec![0]);
        session.record_answer("ba");
        assert_eq!(session.current_answer(), "AB");
        session.record_answer("CCA");
        assert_eq!(session.current_answer(), "AC");
    }

    #[test]
    fn test_navigation_clamps_at_both_ends() {
        let mut session = ExamSession::with_questions(vec![0, 1, 2]);
        session.retreat();
        assert_eq!(session.current(), 0);
        session.advance();
        session.advance();
        session.advance();
        assert_eq!(session.current(), 2);
    }

    #[test]
    fn test_finish_grades_against_the_bank() {
        let bank = vec![question(1, "B"), question(2, "AC"), question(3, "A")];
        let mut session = ExamSession::with_questions(vec![0, 1, 2]);
        session.record_answer("B");
        session.advance();
        session.record_answer("ca");
        session.advance();
        // third question left unanswered

        let report = session.finish(&bank);
        assert_eq!(report.score(), 2);
        assert_eq!(report.total(), 3);
        assert!(report.entries()[0].is_correct);
        assert!(report.entries()[1].is_correct);
        assert!(!report.entries()[2].is_correct);
        assert_eq!(report.entries()[1].user_answer, "AC");
    }

    #[test]
    fn test_fresh_session_has_full_budget() {
        let session = ExamSession::with_questions(vec![0]);
        assert!(!session.is_expired());
        assert!(session.remaining() <= EXAM_DURATION);
        assert!(session.remaining() > EXAM_DURATION - Duration::from_secs(5));
    }

    #[test]
    fn test_drill_phase_walk() {
        let mut drill = DrillState::for_question(0);
        assert_eq!(drill.phase(), DrillPhase::Unanswered);

        drill.choose("a");
        assert_eq!(drill.phase(), DrillPhase::Answered);
        assert_eq!(drill.chosen(), "A");

        drill.toggle_reveal();
        assert_eq!(drill.phase(), DrillPhase::Revealed);

        // Changing the selection while revealed keeps the key visible.
        drill.choose("B");
        assert_eq!(drill.phase(), DrillPhase::Revealed);

        drill.toggle_reveal();
        assert_eq!(drill.phase(), DrillPhase::Answered);
    }

    #[test]
    fn test_reveal_without_selection_returns_to_unanswered() {
        let mut drill = DrillState::for_question(0);
        drill.toggle_reveal();
        assert_eq!(drill.phase(), DrillPhase::Revealed);
        drill.toggle_reveal();
        assert_eq!(drill.phase(), DrillPhase::Unanswered);
    }

    #[test]
    fn test_toggle_letter_round_trip() {
        assert_eq!(toggle_letter("", 'B'), "B");
        assert_eq!(toggle_letter("B", 'A'), "AB");
        assert_eq!(toggle_letter("AB", 'B'), "A");
    }
}
