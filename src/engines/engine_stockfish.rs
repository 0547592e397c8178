//! Stockfish as an opponent, driven over its UCI text interface.
//!
//! Only the handful of commands needed to obtain one move are used:
//! `uci`, `setoption`, `isready`, `position fen`, `go movetime` and `quit`.
//! Engine output is read on a background thread and forwarded line by line
//! through a channel, so every wait can be bounded by a timeout.

use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::engines::engine_trait::{Opponent, OpponentError};
use crate::game_state::chess_types::Move;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::legal_moves;
use crate::utils::long_algebraic::parse_long_algebraic;

const QUIT_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockfishSettings {
    /// Passed through as the `Skill Level` option (1 to 20).
    pub skill_level: u8,
    pub movetime: Duration,
    /// Upper bound on any single wait for engine output, on top of
    /// `movetime` while searching.
    pub reply_timeout: Duration,
}

impl Default for StockfishSettings {
    fn default() -> Self {
        Self {
            skill_level: 2,
            movetime: Duration::from_millis(100),
            reply_timeout: Duration::from_secs(10),
        }
    }
}

pub struct StockfishOpponent {
    name: String,
    settings: StockfishSettings,
    writer: Box<dyn Write + Send>,
    replies: Receiver<String>,
    child: Option<Child>,
}

impl StockfishOpponent {
    /// Start the executable at `path` and complete the handshake.
    pub fn spawn(path: &Path, settings: StockfishSettings) -> Result<Self, OpponentError> {
        let mut child = Command::new(path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()?;

        let stdin = child.stdin.take().ok_or(OpponentError::Disconnected)?;
        let stdout = child.stdout.take().ok_or(OpponentError::Disconnected)?;

        let mut opponent = Self::attach(BufReader::new(stdout), stdin, settings);
        opponent.child = Some(child);
        opponent.handshake()?;
        info!(engine = %opponent.name, path = %path.display(), "engine ready");
        Ok(opponent)
    }

    /// Talk to an engine over arbitrary streams and complete the handshake.
    pub fn from_streams<R, W>(reader: R, writer: W, settings: StockfishSettings) -> Result<Self, OpponentError>
    where
        R: BufRead + Send + 'static,
        W: Write + Send + 'static,
    {
        let mut opponent = Self::attach(reader, writer, settings);
        opponent.handshake()?;
        Ok(opponent)
    }

    fn attach<R, W>(reader: R, writer: W, settings: StockfishSettings) -> Self
    where
        R: BufRead + Send + 'static,
        W: Write + Send + 'static,
    {
        Self {
            name: "Stockfish".to_owned(),
            settings,
            writer: Box::new(writer),
            replies: spawn_reader(reader),
            child: None,
        }
    }

    fn handshake(&mut self) -> Result<(), OpponentError> {
        self.send("uci")?;
        let budget = self.settings.reply_timeout;
        let deadline = Instant::now() + budget;
        loop {
            let line = self.next_line("uciok", deadline, budget)?;
            if let Some(name) = line.strip_prefix("id name ") {
                self.name = name.trim().to_owned();
            } else if line == "uciok" {
                break;
            }
        }

        self.send(&format!(
            "setoption name Skill Level value {}",
            self.settings.skill_level
        ))?;
        self.send("isready")?;
        self.wait_for("readyok", self.settings.reply_timeout)?;
        Ok(())
    }

    fn send(&mut self, command: &str) -> Result<(), OpponentError> {
        debug!(command, "to engine");
        writeln!(self.writer, "{command}")?;
        self.writer.flush()?;
        Ok(())
    }

    fn next_line(
        &self,
        waiting_for: &str,
        deadline: Instant,
        budget: Duration,
    ) -> Result<String, OpponentError> {
        let remaining = deadline.saturating_duration_since(Instant::now());
        match self.replies.recv_timeout(remaining) {
            Ok(line) => {
                debug!(line = %line, "from engine");
                Ok(line)
            }
            Err(RecvTimeoutError::Timeout) => Err(OpponentError::Timeout {
                waiting_for: waiting_for.to_owned(),
                timeout: budget,
            }),
            Err(RecvTimeoutError::Disconnected) => Err(OpponentError::Disconnected),
        }
    }

    /// Skip lines until one whose first token is `token`, and return it.
    fn wait_for(&self, token: &str, budget: Duration) -> Result<String, OpponentError> {
        let deadline = Instant::now() + budget;
        loop {
            let line = self.next_line(token, deadline, budget)?;
            if line.split_whitespace().next() == Some(token) {
                return Ok(line);
            }
        }
    }
}

fn spawn_reader<R>(reader: R) -> Receiver<String>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in reader.lines() {
            let Ok(line) = line else { break };
            let line = line.trim().to_owned();
            if line.is_empty() {
                continue;
            }
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

impl Opponent for StockfishOpponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, game_state: &GameState) -> Result<Move, OpponentError> {
        let legal = legal_moves(game_state)?;
        if legal.is_empty() {
            return Err(OpponentError::NoLegalMoves);
        }

        self.send(&format!("position fen {}", game_state.to_fen()))?;
        self.send(&format!("go movetime {}", self.settings.movetime.as_millis()))?;

        let line = self.wait_for(
            "bestmove",
            self.settings.movetime + self.settings.reply_timeout,
        )?;
        let text = line
            .split_whitespace()
            .nth(1)
            .ok_or_else(|| OpponentError::Protocol(line.clone()))?;
        if text == "(none)" {
            return Err(OpponentError::NoLegalMoves);
        }

        let mv = parse_long_algebraic(text, game_state)
            .map_err(|err| OpponentError::Protocol(format!("{line}: {err}")))?;
        if !legal.contains(&mv) {
            return Err(OpponentError::Protocol(format!("{line}: not a legal move")));
        }
        Ok(mv)
    }
}

impl Drop for StockfishOpponent {
    fn drop(&mut self) {
        let _ = self.send("quit");
        if let Some(mut child) = self.child.take() {
            let deadline = Instant::now() + QUIT_GRACE;
            while matches!(child.try_wait(), Ok(None)) && Instant::now() < deadline {
                thread::sleep(Duration::from_millis(10));
            }
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{StockfishOpponent, StockfishSettings};
    use crate::engines::engine_trait::{Opponent, OpponentError};
    use crate::game_state::chess_types::{Move, Square};
    use crate::game_state::game_state::GameState;
    use std::io::{self, Cursor, Read, Write};
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::Duration;

    /// Writer whose contents stay inspectable after being moved into the
    /// opponent.
    #[derive(Clone, Default)]
    struct SharedWriter(Arc<Mutex<Vec<u8>>>);

    impl SharedWriter {
        fn commands(&self) -> Vec<String> {
            let bytes = self.0.lock().expect("writer lock").clone();
            String::from_utf8(bytes)
                .expect("commands are utf-8")
                .lines()
                .map(str::to_owned)
                .collect()
        }
    }

    impl Write for SharedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("writer lock").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Engine that keeps printing `info` lines and never answers.
    struct Chatter;

    impl Read for Chatter {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            thread::sleep(Duration::from_millis(5));
            let line = b"info string thinking\n";
            let n = line.len().min(buf.len());
            buf[..n].copy_from_slice(&line[..n]);
            Ok(n)
        }
    }

    fn settings() -> StockfishSettings {
        StockfishSettings {
            skill_level: 5,
            movetime: Duration::from_millis(50),
            reply_timeout: Duration::from_secs(2),
        }
    }

    fn scripted(transcript: &str) -> (Result<StockfishOpponent, OpponentError>, SharedWriter) {
        let writer = SharedWriter::default();
        let reader = Cursor::new(transcript.to_owned().into_bytes());
        (
            StockfishOpponent::from_streams(reader, writer.clone(), settings()),
            writer,
        )
    }

    #[test]
    fn handshake_then_best_move() {
        let (opponent, writer) = scripted(
            "Stockfish 16 by the Stockfish developers\n\
             id name Stockfish 16\n\
             option name Skill Level type spin default 20 min 0 max 20\n\
             uciok\n\
             readyok\n\
             info depth 1 score cp 30 pv e2e4\n\
             bestmove e2e4 ponder e7e5\n",
        );
        let mut opponent = opponent.expect("handshake should succeed");
        assert_eq!(opponent.name(), "Stockfish 16");

        let game = GameState::new_game();
        let mv = opponent.choose_move(&game).expect("engine answered");
        let e2: Square = "e2".parse().expect("e2");
        let e4: Square = "e4".parse().expect("e4");
        assert_eq!(mv, Move::new(e2, e4));

        let commands = writer.commands();
        assert_eq!(
            commands,
            [
                "uci".to_owned(),
                "setoption name Skill Level value 5".to_owned(),
                "isready".to_owned(),
                format!("position fen {}", game.to_fen()),
                "go movetime 50".to_owned(),
            ]
        );

        drop(opponent);
        assert_eq!(writer.commands().last().map(String::as_str), Some("quit"));
    }

    #[test]
    fn illegal_suggestion_is_a_protocol_error() {
        let (opponent, _) = scripted("uciok\nreadyok\nbestmove e2e5\n");
        let mut opponent = opponent.expect("handshake should succeed");
        assert!(matches!(
            opponent.choose_move(&GameState::new_game()),
            Err(OpponentError::Protocol(_))
        ));
    }

    #[test]
    fn engine_without_a_move_reports_none() {
        let (opponent, _) = scripted("uciok\nreadyok\nbestmove (none)\n");
        let mut opponent = opponent.expect("handshake should succeed");
        assert!(matches!(
            opponent.choose_move(&GameState::new_game()),
            Err(OpponentError::NoLegalMoves)
        ));
    }

    #[test]
    fn closed_output_is_a_disconnect() {
        let (opponent, _) = scripted("id name Broken\n");
        assert!(matches!(opponent, Err(OpponentError::Disconnected)));
    }

    #[test]
    fn silent_engine_times_out() {
        let quick = StockfishSettings {
            reply_timeout: Duration::from_millis(100),
            ..settings()
        };
        let result = StockfishOpponent::from_streams(
            io::BufReader::new(Chatter),
            SharedWriter::default(),
            quick,
        );
        assert!(matches!(result, Err(OpponentError::Timeout { .. })));
    }
}
