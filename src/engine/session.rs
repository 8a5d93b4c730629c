//! The turn loop: read both boards, ask the strategy, write the target.

use std::io::{self, BufRead, Write};

use crate::engine::bot_strategy::BotStrategy;
use crate::games::puyo::protocol::{write_name, write_target, ReadError, TokenReader};
use crate::games::puyo::{Board, BoardConfig};

/// How a session went, for logging and tests.
#[derive(Debug)]
pub struct SessionSummary {
    /// `None` if the stream ended before the bootstrap line.
    pub config: Option<BoardConfig>,
    pub turns: usize,
    /// The read failure that ended the session.
    pub end: ReadError,
}

/// Run until the input stream ends.
///
/// A read failure at any point is the end-of-session signal and is returned
/// inside the summary, not as an error. Only write failures are errors.
pub fn run_session<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    strategy: &dyn BotStrategy,
) -> io::Result<SessionSummary> {
    let mut reader = TokenReader::new(input);

    let config = match reader.read_config() {
        Ok(c) => c,
        Err(end) => {
            tracing::debug!(reason = %end, "session ended before configuration");
            return Ok(SessionSummary { config: None, turns: 0, end });
        }
    };
    tracing::info!(
        width = config.width,
        height = config.height,
        threshold = config.threshold,
        colors = config.colors,
        strategy = strategy.name(),
        "session started"
    );
    write_name(output, strategy.name())?;

    let mut turns = 0;
    loop {
        let (own, rival) = match read_turn(&mut reader, &config) {
            Ok(b) => b,
            Err(end) => {
                tracing::debug!(turns, reason = %end, "session ended");
                return Ok(SessionSummary { config: Some(config), turns, end });
            }
        };

        let target = strategy.choose_target(&own, &rival);
        match target {
            Some(p) => tracing::debug!(turn = turns, x = p.x, y = p.y, "target chosen"),
            None => tracing::warn!(turn = turns, "no colorful cell on board"),
        }
        write_target(output, target)?;
        turns += 1;
    }
}

/// Own board first, then the rival's.
fn read_turn<R: BufRead>(
    reader: &mut TokenReader<R>,
    config: &BoardConfig,
) -> Result<(Board, Board), ReadError> {
    let own = reader.read_board(config)?;
    let rival = reader.read_board(config)?;
    Ok((own, rival))
}
