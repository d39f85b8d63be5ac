/**
* A live cell dies if it has fewer than two live neighbors.
* A live cell with two or three live neighbors lives on to the next generation.
* A live cell with more than three live neighbors dies.
* A dead cell will be brought back to live if it has exactly three live neighbors.
*
* The grid is toroidal: edges wrap around, so every cell has exactly eight neighbors.
*/

pub mod controller;
pub mod grid;

pub use controller::{CommandError, Playback, Report, SimulationController};
pub use grid::{CellChange, CellState, Grid, OutOfRange};
