//! Player backed by an external executable.
//!
//! Every round the executable is started fresh, gets the board in the
//! snapshot format on stdin (seen from its own colour) and must print one
//! move code on stdout. Running out of time counts as waiting. A crash, a
//! non-zero exit or output that is not a move code is an error, which the
//! referee treats as surrender.

use anyhow::{bail, ensure, Context, Result};
use std::ffi::OsString;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;
use tracing::warn;

use crate::actions::Move;
use crate::agents::MoveSelector;
use crate::game_state::GameState;
use crate::render::BoardView;
use crate::snapshot::PlayerColor;

/// Decode a player's stdout into a move.
pub fn parse_move_code(output: &str) -> Result<Move> {
    let text = output.trim();
    let code: u8 = text
        .parse()
        .with_context(|| format!("Player printed {:?} instead of a move code", text))?;
    Move::from_code(code).with_context(|| format!("Move code {} is out of range", code))
}

pub struct ExecAgent {
    program: PathBuf,
    args: Vec<OsString>,
    color: PlayerColor,
    max_round: u32,
    timeout: Duration,
}

impl ExecAgent {
    pub fn new<P: AsRef<Path>>(
        program: P,
        color: PlayerColor,
        max_round: u32,
        timeout: Duration,
    ) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            color,
            max_round,
            timeout,
        }
    }

    /// Extra command-line arguments passed on every run
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// The board text the executable receives for `state`
    pub fn board_text(&self, state: &GameState<'_>) -> String {
        let (red, blue) = match self.color {
            PlayerColor::Red => (state.hero(), state.enemy()),
            PlayerColor::Blue => (state.enemy(), state.hero()),
        };
        let view = BoardView {
            walls: state.walls(),
            projectiles: state.projectiles(),
            red,
            blue,
        };
        let round = self.max_round.saturating_sub(state.rounds_left());
        view.render(round, Some(self.color), false)
    }

    /// Run the executable once. `None` means it ran out of time.
    fn run(&self, input: String) -> Result<Option<String>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start {}", self.program.display()))?;
        let mut stdin = child.stdin.take().context("Player stdin is not piped")?;
        let mut stdout = child.stdout.take().context("Player stdout is not piped")?;

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            // A player may exit without reading its input
            let written = match stdin.write_all(input.as_bytes()) {
                Err(err) if err.kind() != ErrorKind::BrokenPipe => Err(err),
                _ => Ok(()),
            };
            drop(stdin);
            let result = written.and_then(|()| {
                let mut output = String::new();
                stdout.read_to_string(&mut output).map(|_| output)
            });
            // The receiver is gone once the run has timed out
            tx.send(result).ok();
        });

        match rx.recv_timeout(self.timeout) {
            Ok(output) => {
                let output = output
                    .with_context(|| format!("Failed to talk to {}", self.program.display()))?;
                let status = child
                    .wait()
                    .with_context(|| format!("Failed to wait for {}", self.program.display()))?;
                ensure!(
                    status.success(),
                    "{} exited with {}",
                    self.program.display(),
                    status
                );
                Ok(Some(output))
            }
            Err(RecvTimeoutError::Timeout) => {
                if let Err(err) = child.kill().and_then(|()| child.wait()) {
                    warn!(program = %self.program.display(), error = %err, "failed to stop player");
                }
                Ok(None)
            }
            Err(RecvTimeoutError::Disconnected) => {
                bail!("Lost the output of {}", self.program.display())
            }
        }
    }
}

impl MoveSelector for ExecAgent {
    fn select_move(&mut self, state: &GameState<'_>) -> Result<Move> {
        match self.run(self.board_text(state))? {
            Some(output) => parse_move_code(&output),
            None => {
                warn!(
                    program = %self.program.display(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "player hit the timeout, waiting instead"
                );
                Ok(Move::Wait)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::Direction;
    use crate::snapshot::Snapshot;

    const BOARD: &str = "\
5 7
#   #   #   #   #   #   #
#   R    v              #
#       #               #
#               B       #
#   #   #   #   #   #   #
3
R
";

    /// Run a shell snippet as the player
    fn shell_agent(script: &str, color: PlayerColor, timeout_ms: u64) -> ExecAgent {
        ExecAgent::new("/bin/sh", color, 400, Duration::from_millis(timeout_ms))
            .with_args(["-c", script])
    }

    #[test]
    fn test_parse_move_code() {
        assert_eq!(parse_move_code("4\n").unwrap(), Move::Shoot(Direction::Up));
        assert_eq!(parse_move_code(" 8 ").unwrap(), Move::Wait);
        assert!(parse_move_code("9").is_err());
        assert!(parse_move_code("-1").is_err());
        assert!(parse_move_code("up").is_err());
        assert!(parse_move_code("").is_err());
    }

    #[test]
    fn test_board_text_is_seen_from_own_colour() {
        let snapshot: Snapshot = BOARD.parse().unwrap();
        let walls = snapshot.walls();
        let red_view = snapshot.game_state(&walls, 400);

        let red = shell_agent("true", PlayerColor::Red, 500);
        assert_eq!(red.board_text(&red_view), BOARD.replace("#\n", "#   \n"));

        let blue = shell_agent("true", PlayerColor::Blue, 500);
        let seen: Snapshot = blue.board_text(&red_view.swapped()).parse().unwrap();
        assert_eq!(seen.perspective(), PlayerColor::Blue);
        assert_eq!(seen.round(), 3);
        assert_eq!(seen.position(PlayerColor::Red), snapshot.position(PlayerColor::Red));
        assert_eq!(seen.position(PlayerColor::Blue), snapshot.position(PlayerColor::Blue));
    }

    #[cfg(unix)]
    #[test]
    fn test_reads_move_from_stdout() {
        let snapshot: Snapshot = BOARD.parse().unwrap();
        let walls = snapshot.walls();
        let state = snapshot.game_state(&walls, 400);

        // Echo back the round line so the board must have arrived on stdin
        let mut agent = shell_agent("sed -n 7p", PlayerColor::Red, 5000);
        assert_eq!(agent.select_move(&state).unwrap(), Move::Go(Direction::Right));
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_means_wait() {
        let snapshot: Snapshot = BOARD.parse().unwrap();
        let walls = snapshot.walls();
        let state = snapshot.game_state(&walls, 400);

        let mut agent = shell_agent("sleep 5; echo 0", PlayerColor::Red, 100);
        assert_eq!(agent.select_move(&state).unwrap(), Move::Wait);
    }

    #[cfg(unix)]
    #[test]
    fn test_bad_player_is_an_error() {
        let snapshot: Snapshot = BOARD.parse().unwrap();
        let walls = snapshot.walls();
        let state = snapshot.game_state(&walls, 400);

        for script in ["echo 9", "echo fire", "echo 4; exit 3", "exit 1"] {
            let mut agent = shell_agent(script, PlayerColor::Red, 5000);
            assert!(agent.select_move(&state).is_err(), "accepted player {:?}", script);
        }

        let mut missing = ExecAgent::new(
            "/nonexistent/player",
            PlayerColor::Red,
            400,
            Duration::from_millis(500),
        );
        assert!(missing.select_move(&state).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_referee_counts_bad_output_as_surrender() {
        use crate::game_runner::{play_match, MatchEnd, MatchOutcome};
        use crate::grid::{start_cells, GridDims, Walls};

        let walls = Walls::bordered(GridDims::new(5, 6));
        let (red_start, blue_start) = start_cells(walls.dims());
        let mut red = shell_agent("cat >/dev/null; echo 8", PlayerColor::Red, 5000);
        let mut blue = shell_agent("cat >/dev/null; echo surrender", PlayerColor::Blue, 5000);

        let result = play_match(&walls, red_start, blue_start, &mut red, &mut blue, 400, |_, _| {});
        assert_eq!(result.outcome, MatchOutcome::RedWins);
        assert_eq!(result.end, MatchEnd::Surrender);
        assert_eq!(result.rounds, 1);
    }
}
