use std::time::Duration;

use bevy::prelude::*;
use constants::station::{ANSWER_FEEDBACK_DELAY_MS, WELCOME_BACK_LINE};

use crate::engine::assets::station_catalog::{ElderVisit, MathChallenge};

/// Where an elder conversation currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueStep {
    /// Index into the visit's greeting lines.
    Greeting(usize),
    MathChallenge,
    Success,
    /// Elder already completed; shows the welcome-back line only.
    AlreadyVisited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerMark {
    Correct,
    Wrong,
}

/// Mark shown on a chosen answer until its timer runs out.
#[derive(Debug, Clone)]
pub struct AnswerFeedback {
    pub option: usize,
    pub mark: AnswerMark,
    timer: Timer,
}

/// How a conversation was finished from its final screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogueOutcome {
    /// Question answered; the visit counts as progress.
    Completed,
    /// Welcome-back screen closed; nothing to record.
    Dismissed,
}

/// One open conversation with an elder.
///
/// Dropping the session drops any pending answer timer with it, so a
/// closed dialogue can never transition later.
#[derive(Debug, Clone)]
pub struct DialogueSession {
    local_id: usize,
    visit: ElderVisit,
    step: DialogueStep,
    feedback: Option<AnswerFeedback>,
}

impl DialogueSession {
    pub fn start(local_id: usize, visit: ElderVisit, already_completed: bool) -> Self {
        let step = if already_completed {
            DialogueStep::AlreadyVisited
        } else if visit.greetings.is_empty() {
            DialogueStep::MathChallenge
        } else {
            DialogueStep::Greeting(0)
        };
        debug!("Dialogue with {} starts at {:?}", visit.speaker_name, step);

        Self {
            local_id,
            visit,
            step,
            feedback: None,
        }
    }

    pub fn local_id(&self) -> usize {
        self.local_id
    }

    pub fn visit(&self) -> &ElderVisit {
        &self.visit
    }

    pub fn step(&self) -> DialogueStep {
        self.step
    }

    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.feedback.as_ref()
    }

    /// Question shown while in the challenge step.
    pub fn challenge(&self) -> Option<&MathChallenge> {
        (self.step == DialogueStep::MathChallenge).then_some(&self.visit.challenge)
    }

    /// Body text for every step except the challenge.
    pub fn current_line(&self) -> Option<&str> {
        match self.step {
            DialogueStep::Greeting(i) => self.visit.greetings.get(i).map(String::as_str),
            DialogueStep::MathChallenge => None,
            DialogueStep::Success => Some(&self.visit.challenge.success),
            DialogueStep::AlreadyVisited => Some(WELCOME_BACK_LINE),
        }
    }

    /// Move to the next greeting, or on to the question after the last one.
    pub fn advance(&mut self) -> bool {
        let DialogueStep::Greeting(i) = self.step else {
            return false;
        };
        self.step = if i + 1 < self.visit.greetings.len() {
            DialogueStep::Greeting(i + 1)
        } else {
            DialogueStep::MathChallenge
        };
        true
    }

    /// Pick an answer. Ignored outside the question, while a mark is showing, or out of range.
    pub fn select(&mut self, option: usize) -> Option<AnswerMark> {
        if self.step != DialogueStep::MathChallenge || self.feedback.is_some() {
            return None;
        }
        let answer = self.visit.challenge.options.get(option)?;
        let mark = if answer.correct {
            AnswerMark::Correct
        } else {
            AnswerMark::Wrong
        };

        self.feedback = Some(AnswerFeedback {
            option,
            mark,
            timer: Timer::new(
                Duration::from_millis(ANSWER_FEEDBACK_DELAY_MS),
                TimerMode::Once,
            ),
        });
        Some(mark)
    }

    /// Advance the feedback timer. Returns the mark that resolved this tick, if any.
    pub fn tick(&mut self, delta: Duration) -> Option<AnswerMark> {
        let feedback = self.feedback.as_mut()?;
        feedback.timer.tick(delta);
        if !feedback.timer.finished() {
            return None;
        }

        let mark = feedback.mark;
        self.feedback = None;
        if mark == AnswerMark::Correct {
            self.step = DialogueStep::Success;
        }
        Some(mark)
    }

    /// Finish from the success or welcome-back screen. Any other step keeps the session open.
    pub fn acknowledge(&self) -> Option<DialogueOutcome> {
        match self.step {
            DialogueStep::Success => Some(DialogueOutcome::Completed),
            DialogueStep::AlreadyVisited => Some(DialogueOutcome::Dismissed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::assets::station_catalog::AnswerOption;

    const HALF: Duration = Duration::from_millis(ANSWER_FEEDBACK_DELAY_MS / 2);
    const FULL: Duration = Duration::from_millis(ANSWER_FEEDBACK_DELAY_MS);

    fn visit(greetings: usize) -> ElderVisit {
        ElderVisit {
            id: "elder-test".into(),
            speaker_name: "Test Elder".into(),
            speaker_location: "Somewhere".into(),
            greetings: (0..greetings).map(|i| format!("line {i}")).collect(),
            challenge: MathChallenge {
                label: "Counting".into(),
                question: "2 + 2?".into(),
                options: vec![
                    AnswerOption {
                        text: "3".into(),
                        correct: false,
                    },
                    AnswerOption {
                        text: "4".into(),
                        correct: true,
                    },
                ],
                success: "Well done.".into(),
            },
        }
    }

    #[test]
    fn greetings_lead_to_the_question() {
        let mut session = DialogueSession::start(0, visit(3), false);
        assert_eq!(session.step(), DialogueStep::Greeting(0));
        assert_eq!(session.current_line(), Some("line 0"));

        assert!(session.advance());
        assert!(session.advance());
        assert_eq!(session.step(), DialogueStep::Greeting(2));
        assert!(session.advance());
        assert_eq!(session.step(), DialogueStep::MathChallenge);
        assert!(session.challenge().is_some());
        assert!(!session.advance());
    }

    #[test]
    fn no_greetings_starts_at_the_question() {
        let session = DialogueSession::start(1, visit(0), false);
        assert_eq!(session.step(), DialogueStep::MathChallenge);
    }

    #[test]
    fn completed_elder_shows_welcome_back() {
        let session = DialogueSession::start(2, visit(3), true);
        assert_eq!(session.step(), DialogueStep::AlreadyVisited);
        assert_eq!(session.current_line(), Some(WELCOME_BACK_LINE));
        assert_eq!(session.acknowledge(), Some(DialogueOutcome::Dismissed));
    }

    #[test]
    fn correct_answer_succeeds_after_the_delay() {
        let mut session = DialogueSession::start(0, visit(0), false);
        assert_eq!(session.select(1), Some(AnswerMark::Correct));

        assert_eq!(session.tick(HALF), None);
        assert_eq!(session.step(), DialogueStep::MathChallenge);
        assert_eq!(session.tick(HALF), Some(AnswerMark::Correct));
        assert_eq!(session.step(), DialogueStep::Success);
        assert_eq!(session.current_line(), Some("Well done."));
        assert_eq!(session.acknowledge(), Some(DialogueOutcome::Completed));
    }

    #[test]
    fn wrong_answer_clears_and_allows_retry() {
        let mut session = DialogueSession::start(0, visit(0), false);
        assert_eq!(session.select(0), Some(AnswerMark::Wrong));
        assert_eq!(session.feedback().map(|f| f.option), Some(0));

        assert_eq!(session.tick(FULL), Some(AnswerMark::Wrong));
        assert!(session.feedback().is_none());
        assert_eq!(session.step(), DialogueStep::MathChallenge);
        assert_eq!(session.acknowledge(), None);

        assert_eq!(session.select(1), Some(AnswerMark::Correct));
    }

    #[test]
    fn selection_is_ignored_while_feedback_is_pending() {
        let mut session = DialogueSession::start(0, visit(0), false);
        session.select(0);
        assert_eq!(session.select(1), None);
        assert_eq!(session.feedback().map(|f| f.mark), Some(AnswerMark::Wrong));
    }

    #[test]
    fn out_of_range_and_early_selections_are_ignored() {
        let mut session = DialogueSession::start(0, visit(2), false);
        assert_eq!(session.select(1), None);

        session.advance();
        session.advance();
        assert_eq!(session.select(9), None);
        assert!(session.feedback().is_none());
        assert_eq!(session.tick(FULL), None);
    }
}
