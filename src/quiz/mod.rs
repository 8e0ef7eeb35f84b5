pub mod password;
pub mod phishing;
pub mod safe_browsing;
pub mod session;

pub use session::{AnswerReveal, FinalScore, Phase, QuizSession, SessionError, UserAnswer};

use std::collections::HashSet;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    #[error("Quiz has no questions")]
    Empty,
    #[error("Question #{position} (\"{question}\") has no answers")]
    NoAnswers { position: usize, question: String },
    #[error("Question #{position} (\"{question}\") must have exactly one correct answer, found {found}")]
    CorrectAnswerCount {
        position: usize,
        question: String,
        found: usize,
    },
    #[error("Question #{position} (\"{question}\") lists the answer \"{answer}\" more than once")]
    DuplicateAnswer {
        position: usize,
        question: String,
        answer: String,
    },
}

/// A validated, non-empty question set.
///
/// Every question has at least one answer, exactly one correct answer and no
/// two answers with the same text, so a submitted answer can always be scored
/// and the review log can compare answers by text.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<Question>", into = "Vec<Question>")]
pub struct Quiz {
    questions: Vec<Question>,
}

impl Quiz {
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }

        for (i, question) in questions.iter().enumerate() {
            // Positions are reported one-based, the way the quiz counts them
            let position = i + 1;
            if question.answers.is_empty() {
                return Err(QuizError::NoAnswers {
                    position,
                    question: question.text.clone(),
                });
            }

            let found = question.answers.iter().filter(|a| a.is_correct).count();
            if found != 1 {
                return Err(QuizError::CorrectAnswerCount {
                    position,
                    question: question.text.clone(),
                    found,
                });
            }

            let mut seen = HashSet::new();
            if let Some(duplicate) = question.answers.iter().find(|a| !seen.insert(&a.text)) {
                return Err(QuizError::DuplicateAnswer {
                    position,
                    question: question.text.clone(),
                    answer: duplicate.text.clone(),
                });
            }
        }

        Ok(Self { questions })
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl TryFrom<Vec<Question>> for Quiz {
    type Error = QuizError;

    fn try_from(questions: Vec<Question>) -> Result<Self, Self::Error> {
        Self::new(questions)
    }
}

impl From<Quiz> for Vec<Question> {
    fn from(quiz: Quiz) -> Self {
        quiz.questions
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub text: String,
    pub answers: Vec<Answer>,
    pub explanation: String,
}
impl Question {
    pub fn new(text: String, answers: Vec<Answer>, explanation: String) -> Self {
        Self {
            text,
            answers,
            explanation,
        }
    }

    pub fn correct_answer(&self) -> Option<&Answer> {
        self.answers.iter().find(|a| a.is_correct)
    }

    /// Position of the answer labelled `text`, if the question offers it.
    pub fn answer_index(&self, text: &str) -> Option<usize> {
        self.answers.iter().position(|a| a.text == text)
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Answer {
    pub text: String,
    pub is_correct: bool,
}
impl Answer {
    pub fn new(text: String, is_correct: bool) -> Self {
        Self { text, is_correct }
    }
}

/// Question table entry: prompt, answers with their correctness, explanation.
type StaticQuestion = (&'static str, &'static [(&'static str, bool)], &'static str);

fn questions_from_table(table: &[StaticQuestion]) -> Vec<Question> {
    table
        .iter()
        .map(|(text, answers, explanation)| {
            Question::new(
                text.to_string(),
                answers
                    .iter()
                    .map(|(answer, is_correct)| Answer::new(answer.to_string(), *is_correct))
                    .collect(),
                explanation.to_string(),
            )
        })
        .collect()
}

/// The question sets the bot offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum QuizKind {
    Password,
    Phishing,
    SafeBrowsing,
}
impl QuizKind {
    pub fn all() -> [QuizKind; 3] {
        [QuizKind::Password, QuizKind::Phishing, QuizKind::SafeBrowsing]
    }

    pub fn title(&self) -> &'static str {
        match self {
            QuizKind::Password => "Password hygiene quiz",
            QuizKind::Phishing => "Phishing quiz",
            QuizKind::SafeBrowsing => "Safe browsing quiz",
        }
    }

    pub fn from_title(title: &str) -> Option<QuizKind> {
        Self::all().into_iter().find(|kind| kind.title() == title)
    }

    pub fn quiz(&self) -> Result<Quiz, QuizError> {
        let questions = match self {
            QuizKind::Password => password::questions(),
            QuizKind::Phishing => phishing::questions(),
            QuizKind::SafeBrowsing => safe_browsing::questions(),
        };
        Quiz::new(questions)
    }
}
