use std::fmt;

use log::{debug, info};
use rand::Rng;
use thiserror::Error;

use crate::quiz::{Question, Quiz};

/// Where a session is in its run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Phase {
    Idle,
    InProgress {
        index: usize,
        selected: Option<usize>,
        submitted: bool,
    },
    Finished,
}

/// Review record for one answered question, appended at submission.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserAnswer {
    pub question_text: String,
    pub selected_text: String,
    pub correct_text: String,
    pub explanation: String,
}
impl UserAnswer {
    pub fn is_correct(&self) -> bool {
        self.selected_text == self.correct_text
    }
}

/// How one answer of the current question is shown once it was submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerReveal {
    pub text: String,
    pub is_correct: bool,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinalScore {
    pub correct: usize,
    pub total: usize,
}
impl fmt::Display for FinalScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Test score: {} out of {}.", self.correct, self.total)
    }
}

/// Why a stored session could not be restored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Idle session already has questions or answers")]
    IdleWithProgress,
    #[error("Question order is not a permutation of the quiz")]
    NotAPermutation,
    #[error("Current question {index} is out of range for {len} questions")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Selected answer {selected} is out of range for {len} answers")]
    SelectionOutOfRange { selected: usize, len: usize },
    #[error("Question was submitted without a selection")]
    SubmittedWithoutSelection,
    #[error("Expected {expected} recorded answers, found {found}")]
    AnswerCount { expected: usize, found: usize },
    #[error("Score {score} does not match {correct} correct answers")]
    ScoreMismatch { score: usize, correct: usize },
}

/// One run through a quiz.
///
/// Transitions take the session by value and hand back the next one. A
/// transition that is not valid in the current phase returns the session
/// unchanged, so callers may bind them to user input without checking first.
///
/// Deserializing checks the same invariants the transitions maintain, so a
/// session restored from storage is always safe to drive.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "StoredSession")]
pub struct QuizSession {
    quiz: Quiz,
    shuffled: Vec<Question>,
    phase: Phase,
    score: usize,
    answers: Vec<UserAnswer>,
}

#[derive(serde::Deserialize)]
struct StoredSession {
    quiz: Quiz,
    shuffled: Vec<Question>,
    phase: Phase,
    score: usize,
    answers: Vec<UserAnswer>,
}

impl TryFrom<StoredSession> for QuizSession {
    type Error = SessionError;

    fn try_from(stored: StoredSession) -> Result<Self, Self::Error> {
        let StoredSession {
            quiz,
            shuffled,
            phase,
            score,
            answers,
        } = stored;

        let expected_answers = match phase {
            Phase::Idle => {
                if !shuffled.is_empty() || !answers.is_empty() || score != 0 {
                    return Err(SessionError::IdleWithProgress);
                }
                0
            }
            Phase::InProgress {
                index,
                selected,
                submitted,
            } => {
                let Some(question) = shuffled.get(index) else {
                    return Err(SessionError::IndexOutOfRange {
                        index,
                        len: shuffled.len(),
                    });
                };
                match selected {
                    Some(selected) if selected >= question.answers.len() => {
                        return Err(SessionError::SelectionOutOfRange {
                            selected,
                            len: question.answers.len(),
                        });
                    }
                    None if submitted => return Err(SessionError::SubmittedWithoutSelection),
                    _ => {}
                }
                index + usize::from(submitted)
            }
            Phase::Finished => shuffled.len(),
        };

        if phase != Phase::Idle && !is_permutation(&shuffled, quiz.questions()) {
            return Err(SessionError::NotAPermutation);
        }
        if answers.len() != expected_answers {
            return Err(SessionError::AnswerCount {
                expected: expected_answers,
                found: answers.len(),
            });
        }
        let correct = answers.iter().filter(|a| a.is_correct()).count();
        if score != correct {
            return Err(SessionError::ScoreMismatch { score, correct });
        }

        Ok(Self {
            quiz,
            shuffled,
            phase,
            score,
            answers,
        })
    }
}

fn is_permutation(shuffled: &[Question], canonical: &[Question]) -> bool {
    if shuffled.len() != canonical.len() {
        return false;
    }
    let mut used = vec![false; canonical.len()];
    shuffled.iter().all(|question| {
        let found = canonical
            .iter()
            .enumerate()
            .position(|(i, q)| !used[i] && q == question);
        match found {
            Some(i) => {
                used[i] = true;
                true
            }
            None => false,
        }
    })
}

impl QuizSession {
    pub fn new(quiz: Quiz) -> Self {
        Self {
            quiz,
            shuffled: Vec::new(),
            phase: Phase::Idle,
            score: 0,
            answers: Vec::new(),
        }
    }

    pub fn start(self) -> Self {
        self.start_with_rng(&mut rand::thread_rng())
    }

    /// Begins a fresh run: new question order, score and review log cleared.
    /// Allowed from every phase.
    pub fn start_with_rng<R: Rng>(mut self, rng: &mut R) -> Self {
        let mut shuffled = self.quiz.questions().to_vec();
        shuffle(&mut shuffled, rng);

        self.shuffled = shuffled;
        self.score = 0;
        self.answers.clear();
        self.phase = Phase::InProgress {
            index: 0,
            selected: None,
            submitted: false,
        };
        info!("Starting quiz with {} questions", self.shuffled.len());
        self
    }

    pub fn restart(self) -> Self {
        self.start()
    }

    pub fn restart_with_rng<R: Rng>(self, rng: &mut R) -> Self {
        self.start_with_rng(rng)
    }

    /// Marks `answer` (a position in the current question's answers) as the
    /// pending choice, replacing any earlier one.
    pub fn select_answer(mut self, answer: usize) -> Self {
        match self.phase {
            Phase::InProgress {
                index,
                submitted: false,
                ..
            } if answer < self.shuffled[index].answers.len() => {
                self.phase = Phase::InProgress {
                    index,
                    selected: Some(answer),
                    submitted: false,
                };
            }
            phase => debug!("Ignoring selection of answer {} in {:?}", answer, phase),
        }
        self
    }

    pub fn submit(mut self) -> Self {
        let Phase::InProgress {
            index,
            selected: Some(selected),
            submitted: false,
        } = self.phase
        else {
            debug!("Ignoring submit in {:?}", self.phase);
            return self;
        };

        let question = &self.shuffled[index];
        let Some(correct) = question.correct_answer() else {
            debug!("Question {:?} has no correct answer", question.text);
            return self;
        };
        let chosen = &question.answers[selected];

        if chosen.is_correct {
            self.score += 1;
        }
        let record = UserAnswer {
            question_text: question.text.clone(),
            selected_text: chosen.text.clone(),
            correct_text: correct.text.clone(),
            explanation: question.explanation.clone(),
        };
        debug!(
            "Question {} answered {}",
            index + 1,
            if record.is_correct() { "correctly" } else { "incorrectly" }
        );

        self.answers.push(record);
        self.phase = Phase::InProgress {
            index,
            selected: Some(selected),
            submitted: true,
        };
        self
    }

    pub fn next(mut self) -> Self {
        let Phase::InProgress {
            index,
            submitted: true,
            ..
        } = self.phase
        else {
            debug!("Ignoring next in {:?}", self.phase);
            return self;
        };

        let index = index + 1;
        if index < self.shuffled.len() {
            self.phase = Phase::InProgress {
                index,
                selected: None,
                submitted: false,
            };
        } else {
            self.phase = Phase::Finished;
            info!("Quiz finished: {}", FinalScore { correct: self.score, total: self.total() });
        }
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    /// Questions in presentation order; empty until the first start.
    pub fn questions(&self) -> &[Question] {
        &self.shuffled
    }

    pub fn current_question(&self) -> Option<&Question> {
        match self.phase {
            Phase::InProgress { index, .. } => self.shuffled.get(index),
            _ => None,
        }
    }

    /// Zero-based position of the current question and the question count.
    pub fn position(&self) -> Option<(usize, usize)> {
        match self.phase {
            Phase::InProgress { index, .. } => Some((index, self.shuffled.len())),
            _ => None,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        match self.phase {
            Phase::InProgress { selected, .. } => selected,
            _ => None,
        }
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self.phase, Phase::InProgress { submitted: true, .. })
    }

    /// Correctness of every answer of the current question, available only
    /// after it was submitted.
    pub fn reveal(&self) -> Option<Vec<AnswerReveal>> {
        let Phase::InProgress {
            index,
            selected,
            submitted: true,
        } = self.phase
        else {
            return None;
        };

        let reveal = self.shuffled[index]
            .answers
            .iter()
            .enumerate()
            .map(|(i, answer)| AnswerReveal {
                text: answer.text.clone(),
                is_correct: answer.is_correct,
                selected: selected == Some(i),
            })
            .collect();
        Some(reveal)
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.quiz.len()
    }

    /// Review log in presentation order.
    pub fn answers(&self) -> &[UserAnswer] {
        &self.answers
    }

    pub fn last_answer(&self) -> Option<&UserAnswer> {
        self.answers.last()
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn final_score(&self) -> Option<FinalScore> {
        if !self.is_finished() {
            return None;
        }
        Some(FinalScore {
            correct: self.answers.iter().filter(|a| a.is_correct()).count(),
            total: self.total(),
        })
    }
}

/// Fisher–Yates: walk down from the last slot, swapping each with a uniformly
/// chosen slot at or below it. Same algorithm as `SliceRandom::shuffle`.
fn shuffle<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::Answer;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn quiz(count: usize) -> Quiz {
        Quiz::new(
            (0..count)
                .map(|i| {
                    Question::new(
                        format!("Question {}", i),
                        vec![
                            Answer::new(format!("right {}", i), true),
                            Answer::new(format!("wrong {}", i), false),
                        ],
                        format!("Explanation {}", i),
                    )
                })
                .collect(),
        )
        .unwrap()
    }

    fn started(count: usize) -> QuizSession {
        QuizSession::new(quiz(count)).start_with_rng(&mut StdRng::seed_from_u64(7))
    }

    fn correct_index(session: &QuizSession) -> usize {
        let question = session.current_question().unwrap();
        question.answers.iter().position(|a| a.is_correct).unwrap()
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = QuizSession::new(quiz(3));
        assert_eq!(session.phase(), Phase::Idle);
        assert_eq!(session.current_question(), None);
        assert_eq!(session.position(), None);
        assert!(session.questions().is_empty());
    }

    #[test]
    fn test_start_enters_first_question() {
        let session = started(3);
        assert_eq!(
            session.phase(),
            Phase::InProgress {
                index: 0,
                selected: None,
                submitted: false
            }
        );
        assert_eq!(session.position(), Some((0, 3)));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_start_keeps_canonical_order() {
        let session = started(6);
        let canonical: Vec<_> = session.quiz().questions().iter().map(|q| q.text.clone()).collect();
        let expected: Vec<_> = (0..6).map(|i| format!("Question {}", i)).collect();
        assert_eq!(canonical, expected);
    }

    #[test]
    fn test_shuffle_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in 1..20 {
            let mut items: Vec<usize> = (0..n).collect();
            shuffle(&mut items, &mut rng);
            let mut sorted = items.clone();
            sorted.sort();
            assert_eq!(sorted, (0..n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_shuffle_reaches_every_ordering_of_three() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut counts = std::collections::HashMap::new();
        for _ in 0..6000 {
            let mut items = [0, 1, 2];
            shuffle(&mut items, &mut rng);
            *counts.entry(items).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), 6);
        // 1000 expected per ordering
        assert!(counts.values().all(|&c| (800..1200).contains(&c)), "{:?}", counts);
    }

    #[test]
    fn test_select_overwrites_previous_choice() {
        let session = started(2).select_answer(0).select_answer(1);
        assert_eq!(session.selected(), Some(1));
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let session = started(2).select_answer(0).select_answer(5);
        assert_eq!(session.selected(), Some(0));
    }

    #[test]
    fn test_select_before_start_is_ignored() {
        let session = QuizSession::new(quiz(2)).select_answer(0);
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_submit_without_selection_is_ignored() {
        let before = started(2);
        let after = before.clone().submit();
        assert_eq!(before, after);
        assert!(after.answers().is_empty());
    }

    #[test]
    fn test_submit_records_answer_and_scores() {
        let session = started(2);
        let right = correct_index(&session);
        let session = session.select_answer(right).submit();

        assert!(session.is_submitted());
        assert_eq!(session.score(), 1);
        let record = session.last_answer().unwrap();
        assert!(record.is_correct());
        assert_eq!(record.question_text, session.current_question().unwrap().text);
        assert!(record.explanation.starts_with("Explanation"));
    }

    #[test]
    fn test_second_submit_has_no_effect() {
        let session = started(2);
        let right = correct_index(&session);
        let once = session.select_answer(right).submit();
        let twice = once.clone().submit();
        assert_eq!(once, twice);
        assert_eq!(twice.score(), 1);
        assert_eq!(twice.answers().len(), 1);
    }

    #[test]
    fn test_select_after_submit_is_ignored() {
        let session = started(2);
        let wrong = 1 - correct_index(&session);
        let session = session.select_answer(wrong).submit().select_answer(1 - wrong);
        assert_eq!(session.selected(), Some(wrong));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_reveal_only_after_submit() {
        let session = started(2).select_answer(0);
        assert_eq!(session.reveal(), None);

        let session = session.submit();
        let reveal = session.reveal().unwrap();
        assert_eq!(reveal.len(), 2);
        assert!(reveal[0].selected);
        assert!(!reveal[1].selected);
        assert_eq!(reveal.iter().filter(|r| r.is_correct).count(), 1);
    }

    #[test]
    fn test_next_before_submit_is_ignored() {
        let before = started(2).select_answer(0);
        let after = before.clone().next();
        assert_eq!(before, after);
    }

    #[test]
    fn test_next_advances_and_resets_selection() {
        let session = started(3).select_answer(0).submit().next();
        assert_eq!(
            session.phase(),
            Phase::InProgress {
                index: 1,
                selected: None,
                submitted: false
            }
        );
    }

    #[test]
    fn test_last_next_finishes() {
        let mut session = started(2);
        for _ in 0..2 {
            session = session.select_answer(0).submit().next();
        }
        assert!(session.is_finished());
        assert_eq!(session.current_question(), None);
        assert_eq!(session.final_score().unwrap().total, 2);
        // Nothing moves a finished session but a restart
        assert_eq!(session.clone().next(), session);
        assert_eq!(session.clone().submit(), session);
    }

    #[test]
    fn test_final_score_only_when_finished() {
        let session = started(1).select_answer(0).submit();
        assert_eq!(session.final_score(), None);
        assert!(session.next().final_score().is_some());
    }

    #[test]
    fn test_single_question_quiz() {
        let session = started(1);
        let right = correct_index(&session);
        let session = session.select_answer(right).submit().next();
        assert_eq!(
            session.final_score(),
            Some(FinalScore {
                correct: 1,
                total: 1
            })
        );
    }

    #[test]
    fn test_restart_mid_run_clears_progress() {
        let session = started(3).select_answer(0).submit().next();
        let session = session.restart_with_rng(&mut StdRng::seed_from_u64(3));
        assert_eq!(session.position(), Some((0, 3)));
        assert_eq!(session.score(), 0);
        assert!(session.answers().is_empty());
    }

    fn restore(value: serde_json::Value) -> Result<QuizSession, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn test_stored_session_restores() {
        let session = started(3).select_answer(1).submit();
        let restored = restore(serde_json::to_value(&session).unwrap()).unwrap();
        assert_eq!(restored, session);

        let mut finished = started(2);
        while !finished.is_finished() {
            finished = finished.select_answer(0).submit().next();
        }
        let restored = restore(serde_json::to_value(&finished).unwrap()).unwrap();
        assert_eq!(restored, finished);

        let idle = QuizSession::new(quiz(2));
        assert_eq!(restore(serde_json::to_value(&idle).unwrap()).unwrap(), idle);
    }

    #[test]
    fn test_stored_index_out_of_range_is_rejected() {
        let mut value = serde_json::to_value(started(1)).unwrap();
        value["shuffled"] = serde_json::json!([]);
        value["phase"] = serde_json::json!({
            "InProgress": { "index": 3, "selected": null, "submitted": false }
        });
        assert!(restore(value).is_err());

        let mut value = serde_json::to_value(started(2)).unwrap();
        value["phase"]["InProgress"]["index"] = serde_json::json!(2);
        let err = restore(value).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{}", err);
    }

    #[test]
    fn test_stored_selection_out_of_range_is_rejected() {
        let mut value = serde_json::to_value(started(2).select_answer(1)).unwrap();
        value["phase"]["InProgress"]["selected"] = serde_json::json!(7);
        assert!(restore(value).is_err());
    }

    #[test]
    fn test_stored_submission_without_selection_is_rejected() {
        let mut value = serde_json::to_value(started(2).select_answer(0).submit()).unwrap();
        value["phase"]["InProgress"]["selected"] = serde_json::Value::Null;
        assert!(restore(value).is_err());
    }

    #[test]
    fn test_stored_order_must_match_quiz() {
        let mut value = serde_json::to_value(started(3)).unwrap();
        value["shuffled"][0]["text"] = serde_json::json!("Planted question");
        assert!(restore(value).is_err());

        let mut value = serde_json::to_value(started(3)).unwrap();
        value["shuffled"].as_array_mut().unwrap().pop();
        assert!(restore(value).is_err());
    }

    #[test]
    fn test_stored_score_must_match_answers() {
        let mut value = serde_json::to_value(started(2).select_answer(0).submit()).unwrap();
        value["score"] = serde_json::json!(5);
        assert!(restore(value).is_err());
    }

    #[test]
    fn test_stored_answer_log_must_match_position() {
        let mut value = serde_json::to_value(started(2).select_answer(0).submit()).unwrap();
        value["answers"] = serde_json::json!([]);
        value["score"] = serde_json::json!(0);
        assert!(restore(value).is_err());
    }

    #[test]
    fn test_stored_idle_with_progress_is_rejected() {
        let mut value = serde_json::to_value(QuizSession::new(quiz(2))).unwrap();
        value["score"] = serde_json::json!(1);
        assert!(restore(value).is_err());
    }

    #[test]
    fn test_session_error_message() {
        let err = SessionError::IndexOutOfRange { index: 3, len: 0 };
        assert_eq!(err.to_string(), "Current question 3 is out of range for 0 questions");
    }

    #[test]
    fn test_final_score_display() {
        let score = FinalScore {
            correct: 7,
            total: 10,
        };
        assert_eq!(score.to_string(), "Test score: 7 out of 10.");
    }
}
