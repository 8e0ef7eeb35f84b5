//! Telegram HTML for each quiz screen: question, reveal, score and review.

use teloxide::utils::html;

use crate::quiz::{FinalScore, QuizSession, UserAnswer};

// Telegram rejects messages over 4096 characters
const MAX_MESSAGE_LEN: usize = 4000;

// Escaped length caps for one review entry; together with the labels they
// stay under MAX_MESSAGE_LEN
const QUESTION_BUDGET: usize = 1500;
const ANSWER_BUDGET: usize = 500;
const EXPLANATION_BUDGET: usize = 1300;

pub const FINISHED_HINT: &str = "This quiz is over. What would you like to do next?";

const CORRECT_MARK: &str = "✅";
const WRONG_MARK: &str = "❌";

/// Counter and prompt of the current question.
pub fn question_text(session: &QuizSession) -> Option<String> {
    let question = session.current_question()?;
    let (index, total) = session.position()?;
    Some(format!(
        "{}\n\n{}",
        html::bold(&format!("Question {} of {}", index + 1, total)),
        html::escape(&question.text)
    ))
}

/// Keyboard labels for the current question's answers, in order.
pub fn answer_labels(session: &QuizSession) -> Vec<String> {
    session
        .current_question()
        .map(|q| q.answers.iter().map(|a| a.text.clone()).collect())
        .unwrap_or_default()
}

pub fn selection_text(session: &QuizSession) -> Option<String> {
    let question = session.current_question()?;
    let answer = question.answers.get(session.selected()?)?;
    Some(format!("Selected: {}", html::escape(&answer.text)))
}

/// Every answer marked right or wrong, followed by the explanation.
pub fn reveal_text(session: &QuizSession) -> Option<String> {
    let reveal = session.reveal()?;
    let explanation = session.last_answer()?.explanation.as_str();

    let lines = reveal
        .iter()
        .map(|answer| {
            let mark = if answer.is_correct { CORRECT_MARK } else { WRONG_MARK };
            let text = html::escape(&answer.text);
            if answer.selected {
                format!("{} {} {}", mark, html::bold(&text), html::italic("(your answer)"))
            } else {
                format!("{} {}", mark, text)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    Some(format!("{}\n\n{}", lines, html::italic(&html::escape(explanation))))
}

/// Reply for a "Submit" the session refused.
pub fn submit_hint(session: &QuizSession) -> &'static str {
    if session.is_finished() {
        FINISHED_HINT
    } else if session.is_submitted() {
        "This answer is already submitted, go on to the next question"
    } else {
        "Pick an answer first"
    }
}

/// Reply for a "Next" the session refused.
pub fn next_hint(session: &QuizSession) -> &'static str {
    if session.is_finished() {
        FINISHED_HINT
    } else {
        "Submit your answer first"
    }
}

pub fn result_text(score: FinalScore) -> String {
    html::bold(&score.to_string())
}

/// Escapes `text`, cutting it with an ellipsis so the escaped form stays
/// within `budget` characters. Never splits an entity.
fn escape_within(text: &str, budget: usize) -> String {
    let escaped = html::escape(text);
    if escaped.chars().count() <= budget {
        return escaped;
    }

    let mut out = String::new();
    let mut used = 0;
    let mut buf = [0u8; 4];
    for c in text.chars() {
        let piece = html::escape(c.encode_utf8(&mut buf));
        let len = piece.chars().count();
        if used + len >= budget {
            break;
        }
        out.push_str(&piece);
        used += len;
    }
    out.push('…');
    out
}

fn review_entry(position: usize, answer: &UserAnswer) -> String {
    let mark = if answer.is_correct() { CORRECT_MARK } else { WRONG_MARK };
    format!(
        "{}\nYour answer: {} {}\nCorrect answer: {}\n{}",
        html::bold(&format!(
            "Q{}: {}",
            position,
            escape_within(&answer.question_text, QUESTION_BUDGET)
        )),
        escape_within(&answer.selected_text, ANSWER_BUDGET),
        mark,
        escape_within(&answer.correct_text, ANSWER_BUDGET),
        html::italic(&escape_within(&answer.explanation, EXPLANATION_BUDGET))
    )
}

/// The review list, packed into as few messages as Telegram allows. Entries
/// are never split; overlong fields are cut short instead.
pub fn review_messages(answers: &[UserAnswer]) -> Vec<String> {
    let mut messages: Vec<String> = Vec::new();
    let mut current = String::new();

    for (i, answer) in answers.iter().enumerate() {
        let entry = review_entry(i + 1, answer);
        if !current.is_empty()
            && current.chars().count() + entry.chars().count() + 2 > MAX_MESSAGE_LEN
        {
            messages.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push_str("\n\n");
        }
        current.push_str(&entry);
    }

    if !current.is_empty() {
        messages.push(current);
    }
    messages
}
