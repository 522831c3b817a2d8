//! Game session: the contract a presentation shell drives.
//!
//! A shell creates a `Game`, renders `game.board().tiles()`, maps arrow
//! keys to `apply_move` and the restart key to `restart`, and overlays a
//! loss prompt while `outcome()` is `Lost`.
//!
//! ```
//! use tile_merge::{Direction, Game, MoveOutcome};
//!
//! let mut game = Game::seeded(42);
//! assert_eq!(game.board().len(), 2);
//!
//! let before = game.board().value_sum();
//! let outcome = game.apply_move(Direction::Left);
//! assert_eq!(outcome, MoveOutcome::Continue);
//! // Merging conserves value; only the spawned 2 or 4 adds to it.
//! let gained = game.board().value_sum() - before;
//! assert!(gained == 2 || gained == 4);
//! ```

use log::debug;
use rand::Rng;

use crate::core::{Board, EngineConfig, EngineError, GameRng};
use crate::rules::{Direction, MoveOutcome, MoveResolver};

/// Start a new board with the default configuration.
#[must_use]
pub fn new_game<R: Rng + ?Sized>(rng: &mut R) -> Board {
    Board::spawn_initial(&EngineConfig::default(), rng)
}

/// Resolve one move on `board` in place and return the outcome.
pub fn apply_move<R: Rng + ?Sized>(
    board: &mut Board,
    direction: Direction,
    rng: &mut R,
) -> MoveOutcome {
    MoveResolver::new().resolve(board, direction, rng)
}

/// A single-player session.
#[derive(Clone, Debug)]
pub struct Game {
    config: EngineConfig,
    board: Board,
    resolver: MoveResolver,
    rng: GameRng,
    outcome: MoveOutcome,
    moves: u64,
}

impl Game {
    /// Start a game with the given configuration and random source.
    pub fn new(config: EngineConfig, rng: GameRng) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Self::start(config, rng))
    }

    /// Start a game with the default configuration and a fixed seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::start(EngineConfig::default(), GameRng::new(seed))
    }

    fn start(config: EngineConfig, mut rng: GameRng) -> Self {
        let board = Board::spawn_initial(&config, &mut rng);
        debug!("new game (seed {})\n{board}", rng.seed());
        Self {
            config,
            board,
            resolver: MoveResolver::new(),
            rng,
            outcome: MoveOutcome::Continue,
            moves: 0,
        }
    }

    /// Resolve a move and record its outcome.
    pub fn apply_move(&mut self, direction: Direction) -> MoveOutcome {
        self.outcome = self.resolver.resolve(&mut self.board, direction, &mut self.rng);
        self.moves += 1;
        self.outcome
    }

    /// Parse a direction name and resolve it.
    pub fn apply_named(&mut self, direction: &str) -> Result<MoveOutcome, EngineError> {
        let direction: Direction = direction.parse()?;
        Ok(self.apply_move(direction))
    }

    /// Throw the board away and start over with fresh starting tiles.
    pub fn restart(&mut self) {
        self.board = Board::spawn_initial(&self.config, &mut self.rng);
        self.outcome = MoveOutcome::Continue;
        self.moves = 0;
        debug!("restarted\n{}", self.board);
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Outcome of the latest move; `Continue` before the first move.
    #[must_use]
    pub fn outcome(&self) -> MoveOutcome {
        self.outcome
    }

    /// Moves applied since the last (re)start.
    #[must_use]
    pub fn moves(&self) -> u64 {
        self.moves
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Seed of the game's random source, for replays.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }
}
