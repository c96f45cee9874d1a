//! Interactive terminal play.
//!
//! Each input line is one [`ShellCommand`]. A bare word is a guess.

use derive_more::{Display, Error};
use lilypad_core::{Oracle, PuzzleSpec, SessionEngine, SessionState, SessionStatus};
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, instrument};

const HELP: &str = "\
Commands:
  <word> | guess <word>   move to a word one edit away
  undo <n>                keep the path up to index n
  solve                   reveal a shortest ladder
  new                     start a generated puzzle
  path                    show the current session
  help                    show this help
  quit                    leave";

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// Submit a guess.
    Guess(String),
    /// Undo to a path index.
    Undo(usize),
    /// Reveal a solution.
    Solve,
    /// Start a generated puzzle.
    New,
    /// Print the session.
    Path,
    /// Print the command list.
    Help,
    /// Leave the shell.
    Quit,
}

/// Input the shell cannot interpret.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ParseCommandError {
    /// Nothing but whitespace.
    #[display("empty input")]
    Empty,
    /// `guess` without a word.
    #[display("usage: guess <word>")]
    MissingWord,
    /// `undo` without a non-negative index.
    #[display("usage: undo <n>, where n is a path index starting at 0")]
    BadIndex,
    /// Anything else.
    #[display("unknown command '{}', type 'help'", _0)]
    Unknown(#[error(not(source))] String),
}

impl FromStr for ShellCommand {
    type Err = ParseCommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut parts = line.split_whitespace();
        let head = parts.next().ok_or(ParseCommandError::Empty)?;
        let rest: Vec<&str> = parts.collect();

        match (head.to_lowercase().as_str(), rest.as_slice()) {
            ("guess", [word]) => Ok(Self::Guess(word.to_string())),
            ("guess", _) => Err(ParseCommandError::MissingWord),
            ("undo", [index]) => index
                .parse()
                .map(Self::Undo)
                .map_err(|_| ParseCommandError::BadIndex),
            ("undo", _) => Err(ParseCommandError::BadIndex),
            ("solve", []) => Ok(Self::Solve),
            ("new", []) => Ok(Self::New),
            ("path", []) => Ok(Self::Path),
            ("help", []) | ("?", []) => Ok(Self::Help),
            ("quit", []) | ("exit", []) => Ok(Self::Quit),
            (_, []) => Ok(Self::Guess(head.to_string())),
            _ => Err(ParseCommandError::Unknown(line.trim().to_string())),
        }
    }
}

/// Renders the session as the shell shows it.
pub fn render_state(state: &SessionState) -> String {
    let mut out = format!(
        "Puzzle: {}\nPath:   {}\nDistance to goal: {} | Guesses left: {}",
        state.spec(),
        state.path(),
        state.last_distance(),
        state.guesses_remaining()
    );
    if let Some(solution) = state.revealed_solution() {
        out.push_str(&format!("\nSolution: {}", solution));
    }
    match state.status() {
        SessionStatus::Won if state.revealed_solution().is_none() => out.push_str(&format!(
            "\nYou reached '{}' in {} moves!",
            state.spec().end_word(),
            state.moves_made()
        )),
        SessionStatus::Lost => out.push_str("\nOut of guesses. Undo to keep playing."),
        _ => {}
    }
    out
}

/// Terminal game loop over one session engine.
pub struct Shell<O> {
    engine: SessionEngine<O>,
}

impl<O: Oracle> Shell<O> {
    /// Creates a shell with no puzzle yet.
    pub fn new(oracle: Arc<O>) -> Self {
        Self {
            engine: SessionEngine::new(oracle),
        }
    }

    /// The engine behind the shell.
    pub fn engine(&self) -> &SessionEngine<O> {
        &self.engine
    }

    /// Starts on `spec`, or on a generated puzzle.
    pub async fn start(&self, spec: Option<PuzzleSpec>) -> String {
        match self.engine.start_session(spec).await {
            Ok(state) => render_state(&state),
            Err(e) => format!("Could not start: {}", e),
        }
    }

    /// Starts from raw words, normalizing them first.
    pub async fn start_with_words(&self, start: &str, end: &str) -> String {
        match self.engine.start_with_words(start, end).await {
            Ok(state) => render_state(&state),
            Err(e) => format!("Could not start: {}", e),
        }
    }

    /// Runs one command and returns the text to print.
    #[instrument(skip(self))]
    pub async fn execute(&self, command: ShellCommand) -> String {
        debug!("Executing shell command");
        match command {
            ShellCommand::Guess(word) => match self.engine.submit_guess(&word).await {
                Ok((_, state)) => render_state(&state),
                Err(e) => format!("Error: {}", e),
            },
            ShellCommand::Undo(index) => match self.engine.undo_to(index).await {
                Ok(state) => render_state(&state),
                Err(e) => format!("Error: {}", e),
            },
            ShellCommand::Solve => match self.engine.solve().await {
                Ok((solution, _)) => {
                    format!("Solution in {} steps: {}", solution.steps(), solution)
                }
                Err(e) => format!("Error: {}", e),
            },
            ShellCommand::New => self.start(None).await,
            ShellCommand::Path => self.describe().await,
            ShellCommand::Help => HELP.to_string(),
            ShellCommand::Quit => "Goodbye.".to_string(),
        }
    }

    async fn describe(&self) -> String {
        match self.engine.snapshot().await {
            Some(state) => render_state(&state),
            None => "No puzzle. Type 'new' to start one.".to_string(),
        }
    }

    /// Reads commands until `quit` or end of input.
    #[instrument(skip_all)]
    pub async fn run<R, W>(&self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        info!("Shell started");
        let mut lines = input.lines();
        loop {
            output.write_all(b"> ").await?;
            output.flush().await?;

            let Some(line) = lines.next_line().await? else {
                break;
            };

            let reply = match line.parse::<ShellCommand>() {
                Ok(ShellCommand::Quit) => {
                    output.write_all(b"Goodbye.\n").await?;
                    break;
                }
                Ok(command) => self.execute(command).await,
                Err(ParseCommandError::Empty) => continue,
                Err(e) => e.to_string(),
            };
            output.write_all(reply.as_bytes()).await?;
            output.write_all(b"\n").await?;
        }
        output.flush().await?;
        info!("Shell finished");
        Ok(())
    }
}
