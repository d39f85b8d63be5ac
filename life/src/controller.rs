use std::time::Duration;

use thiserror::Error;

use crate::grid::{CellChange, Grid, OutOfRange};

/// Default delay between automatic advances, matching the speed control's
/// initial position.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Idle,
    Running,
    Paused,
}

/// Command refused by the current playback state, or a coordinate bug from
/// the grid. Neither is fatal: re-check state (or coordinates) and retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("command not allowed while playback is {0:?}")]
    InvalidState(Playback),
    #[error(transparent)]
    OutOfRange(#[from] OutOfRange),
}

/// Everything a frontend needs to render after a state-affecting command.
/// `changed` lists only the cells that differ from the previous report,
/// except for clear/randomize/initial renders where it covers the whole
/// grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub generation: u64,
    pub playback: Playback,
    pub changed: Vec<CellChange>,
}

/// Sequences frontend commands against the grid: owns the generation
/// counter and the playback state machine, and enforces that edits only
/// happen between generations, never during continuous playback.
///
/// The controller never schedules anything itself. `play` only flips state;
/// the frontend's event loop is expected to call [`tick`](Self::tick) once
/// per elapsed interval while playback is `Running`.
pub struct SimulationController {
    grid: Grid,
    generation: u64,
    playback: Playback,
    interval: Duration,
}

impl SimulationController {
    pub fn new(width: usize, height: usize) -> Self {
        SimulationController {
            grid: Grid::new(width, height),
            generation: 0,
            playback: Playback::Idle,
            interval: DEFAULT_INTERVAL,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Any non-negative delay is accepted; zero means "advance on every
    /// scheduler pass". Takes effect on the next scheduled advance.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    fn report(&self, changed: Vec<CellChange>) -> Report {
        Report {
            generation: self.generation,
            playback: self.playback,
            changed,
        }
    }

    /// Full-grid report, for the frontend's first paint.
    pub fn snapshot_report(&self) -> Report {
        self.report(self.grid.snapshot())
    }

    /// Start continuous playback. A no-op when already `Running`, so a
    /// toggle button racing a repaint cannot misfire.
    pub fn play(&mut self) -> Report {
        self.playback = Playback::Running;
        self.report(Vec::new())
    }

    /// Stop scheduling automatic advances. Takes effect between
    /// generations; an advance already inside [`tick`](Self::tick) always
    /// runs to completion first.
    pub fn pause(&mut self) -> Report {
        if self.playback == Playback::Running {
            self.playback = Playback::Paused;
        }
        self.report(Vec::new())
    }

    fn require_editable(&self) -> Result<(), CommandError> {
        if self.playback == Playback::Running {
            Err(CommandError::InvalidState(self.playback))
        } else {
            Ok(())
        }
    }

    fn advance(&mut self) -> Report {
        let changed = self.grid.advance();
        self.generation += 1;
        self.report(changed)
    }

    /// One scheduled advance. Returns `None` when playback is not
    /// `Running`, so a timer firing after `pause` is harmless.
    pub fn tick(&mut self) -> Option<Report> {
        if self.playback == Playback::Running {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Advance exactly one generation while idle or paused.
    pub fn step(&mut self) -> Result<Report, CommandError> {
        self.require_editable()?;
        Ok(self.advance())
    }

    /// Flip one cell by user action. Refused while `Running`: a manual edit
    /// must never land in the middle of an in-flight generation.
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Result<Report, CommandError> {
        self.require_editable()?;
        let state = self.grid.toggle(x, y)?;
        Ok(self.report(vec![CellChange { x, y, state }]))
    }

    /// Kill every cell and reset the generation counter to zero.
    pub fn clear(&mut self) -> Result<Report, CommandError> {
        self.require_editable()?;
        self.grid.clear_all();
        self.generation = 0;
        Ok(self.snapshot_report())
    }

    /// Seed a fresh random pattern. Counts as a new starting position, so
    /// the generation counter resets like it does for `clear`.
    pub fn randomize(&mut self) -> Result<Report, CommandError> {
        self.require_editable()?;
        self.grid.randomize();
        self.generation = 0;
        Ok(self.snapshot_report())
    }
}
