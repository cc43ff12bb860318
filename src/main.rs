use anyhow::{Context, Result};
use chrono::Local;
use daily_wordle::cli::{LineInput, RendererKind, parse_cli};
use daily_wordle::dictionary::app_data_dir;
use daily_wordle::logging::init_logger;
use daily_wordle::tui::TuiInterface;
use daily_wordle::{
    AsciiStyle, Board, Dictionary, EmojiStyle, GameSession, GameStatus, HttpFetcher, TileStyle,
    day_seed,
};
use std::io::{self, Stdout};
use std::path::PathBuf;

const LOG_FILE_NAME: &str = "daily-wordle.log";

fn main() -> Result<()> {
    let cli = parse_cli();
    let config = cli.to_config();

    // Log lines would tear the full-screen board, so send them to a file there.
    let log_file = (cli.renderer == RendererKind::Tui)
        .then(|| app_data_dir().unwrap_or_else(PathBuf::new).join(LOG_FILE_NAME));
    init_logger(log_file.as_deref()).context("failed to set up logging")?;

    config.validate()?;
    let fetcher = HttpFetcher::new(config.word_list_url.clone());
    let dictionary =
        Dictionary::load_or_fetch(&config.word_list_path, config.word_length, &fetcher)
            .with_context(|| {
                format!(
                    "could not load the word list at {}",
                    config.word_list_path.display()
                )
            })?;

    let today = day_seed(Local::now().date_naive());
    let session =
        GameSession::from_config(dictionary, &config, today).context("could not start a game")?;

    match cli.renderer {
        RendererKind::Ascii => play_in_terminal(session, AsciiStyle),
        RendererKind::Emoji => play_in_terminal(session, EmojiStyle),
        RendererKind::Tui => play_full_screen(session),
    }
}

fn play_in_terminal<S: TileStyle>(mut session: GameSession, style: S) -> Result<()> {
    let mut board: Board<S, Stdout> = Board::new(
        style,
        io::stdout(),
        session.word_length(),
        session.max_attempts(),
    );
    let mut input = LineInput::new(io::stdin().lock(), io::stdout());

    loop {
        let status = session.play(&mut input, &mut board)?;
        if !status.is_terminal() {
            println!("Exiting.");
            return Ok(());
        }
        if !input.ask_play_again()? {
            return Ok(());
        }
        session = session.reset();
        board.reset();
    }
}

fn play_full_screen(mut session: GameSession) -> Result<()> {
    let mut tui = TuiInterface::new(session.word_length(), session.max_attempts())
        .context("failed to initialise the terminal")?;

    loop {
        let status = session.play_interactive(&mut tui)?;
        if !status.is_terminal() || !tui.wait_for_new_game()? {
            break;
        }
        session = session.reset();
    }

    drop(tui);
    match session.answer() {
        Some(answer) if session.status() == GameStatus::Won => {
            println!("You guessed the answer: {answer}!");
        }
        Some(answer) => println!("You failed to guess the answer: {answer}!"),
        None => println!("Exiting."),
    }
    Ok(())
}
