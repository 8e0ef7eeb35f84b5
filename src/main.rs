use awareness_quiz_bot::{
    config::Config,
    quiz::{QuizKind, QuizSession},
    render,
};
use dotenv::dotenv;
use log::debug;
use teloxide::{
    dispatching::dialogue::{serializer::Json, ErasedStorage, SqliteStorage, Storage},
    prelude::*,
    types::{ChatId, KeyboardButton, KeyboardMarkup, ParseMode},
};

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    ReceiveQuizChoice,
    Quiz {
        session: QuizSession,
    },
}

type DialogueStorage = std::sync::Arc<ErasedStorage<State>>;

#[tokio::main]
async fn main() -> HandlerResult {
    // Variables may come straight from the environment, so a missing .env is fine
    dotenv().ok();

    pretty_env_logger::init();
    log::info!("Starting security awareness quiz bot...");

    let config = Config::from_env()?;
    let bot = Bot::new(config.token);

    log::info!("Opening dialogue storage at {}", config.database_path);
    let storage: DialogueStorage = SqliteStorage::open(&config.database_path, Json)
        .await?
        .erase();

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::ReceiveQuizChoice].endpoint(receive_quiz_choice))
            .branch(dptree::case![State::Quiz { session }].endpoint(quiz)),
    )
    .dependencies(dptree::deps![storage])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;

    Ok(())
}

const SUBMIT: &str = "Submit answer";
const NEXT: &str = "Next question";
const RESTART: &str = "Restart quiz";
const CHOOSE_ANOTHER: &str = "Choose another quiz";

fn choice_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(
        QuizKind::all()
            .iter()
            .map(|kind| vec![KeyboardButton::new(kind.title())])
            .collect::<Vec<_>>(),
    )
}

fn question_keyboard(session: &QuizSession) -> KeyboardMarkup {
    let mut rows = render::answer_labels(session)
        .into_iter()
        .map(|label| vec![KeyboardButton::new(label)])
        .collect::<Vec<_>>();
    rows.push(vec![KeyboardButton::new(SUBMIT)]);
    KeyboardMarkup::new(rows)
}

fn finished_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(RESTART),
        KeyboardButton::new(CHOOSE_ANOTHER),
    ]])
}

const GREETING_TEXT: &str =
    "Hi! I run short security awareness quizzes. Which one would you like to take?";
async fn start(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING_TEXT)
        .reply_markup(choice_keyboard())
        .await?;

    dialogue.update(State::ReceiveQuizChoice).await?;
    Ok(())
}

async fn receive_quiz_choice(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    let Some(kind) = msg.text().and_then(QuizKind::from_title) else {
        bot.send_message(msg.chat.id, "Please choose one of the quizzes")
            .reply_markup(choice_keyboard())
            .await?;
        return Ok(());
    };

    debug!("Chat {} chose {:?}", msg.chat.id.0, kind);
    let session = QuizSession::new(kind.quiz()?).start();
    send_question(&bot, msg.chat.id, &session).await?;

    dialogue.update(State::Quiz { session }).await?;
    Ok(())
}

async fn quiz(
    bot: Bot,
    dialogue: QuizDialogue,
    session: QuizSession,
    msg: Message,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "Please answer using the buttons")
            .await?;
        return Ok(());
    };

    match text {
        CHOOSE_ANOTHER => {
            bot.send_message(msg.chat.id, "Which quiz next?")
                .reply_markup(choice_keyboard())
                .await?;
            dialogue.update(State::ReceiveQuizChoice).await?;
        }
        RESTART => {
            let session = session.restart();
            send_question(&bot, msg.chat.id, &session).await?;
            dialogue.update(State::Quiz { session }).await?;
        }
        SUBMIT => {
            let before = session.phase();
            let session = session.submit();
            if session.phase() == before {
                send_hint(&bot, msg.chat.id, &session, render::submit_hint(&session)).await?;
                return Ok(());
            }

            if let Some(reveal) = render::reveal_text(&session) {
                bot.send_message(msg.chat.id, reveal)
                    .parse_mode(ParseMode::Html)
                    .reply_markup(KeyboardMarkup::new(vec![vec![KeyboardButton::new(NEXT)]]))
                    .await?;
            }
            dialogue.update(State::Quiz { session }).await?;
        }
        NEXT => {
            let before = session.phase();
            let session = session.next();
            if session.phase() == before {
                send_hint(&bot, msg.chat.id, &session, render::next_hint(&session)).await?;
                return Ok(());
            }

            if session.is_finished() {
                send_results(&bot, msg.chat.id, &session).await?;
            } else {
                send_question(&bot, msg.chat.id, &session).await?;
            }
            dialogue.update(State::Quiz { session }).await?;
        }
        label => {
            if session.is_finished() {
                bot.send_message(msg.chat.id, render::FINISHED_HINT)
                    .reply_markup(finished_keyboard())
                    .await?;
                return Ok(());
            }

            let index = session
                .current_question()
                .and_then(|question| question.answer_index(label));
            let Some(index) = index.filter(|_| !session.is_submitted()) else {
                bot.send_message(msg.chat.id, "Please pick one of the answers")
                    .await?;
                return Ok(());
            };

            let session = session.select_answer(index);
            if let Some(selection) = render::selection_text(&session) {
                bot.send_message(msg.chat.id, selection)
                    .parse_mode(ParseMode::Html)
                    .await?;
            }
            dialogue.update(State::Quiz { session }).await?;
        }
    }
    Ok(())
}

async fn send_hint(
    bot: &Bot,
    chat_id: ChatId,
    session: &QuizSession,
    hint: &'static str,
) -> HandlerResult {
    if session.is_finished() {
        bot.send_message(chat_id, hint)
            .reply_markup(finished_keyboard())
            .await?;
    } else {
        bot.send_message(chat_id, hint).await?;
    }
    Ok(())
}

async fn send_question(bot: &Bot, chat_id: ChatId, session: &QuizSession) -> HandlerResult {
    let Some(text) = render::question_text(session) else {
        return Ok(());
    };

    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(question_keyboard(session))
        .await?;
    Ok(())
}

async fn send_results(bot: &Bot, chat_id: ChatId, session: &QuizSession) -> HandlerResult {
    let Some(score) = session.final_score() else {
        return Ok(());
    };

    bot.send_message(chat_id, render::result_text(score))
        .parse_mode(ParseMode::Html)
        .await?;
    for review in render::review_messages(session.answers()) {
        bot.send_message(chat_id, review)
            .parse_mode(ParseMode::Html)
            .await?;
    }

    bot.send_message(chat_id, "What would you like to do next?")
        .reply_markup(finished_keyboard())
        .await?;
    Ok(())
}
