pub mod food;
pub mod game;
pub mod grid;
pub mod snake;

pub use food::{place_random_food, PlaceError};
pub use game::{Game, Status};
pub use grid::{CellState, Grid, Pos, PosDelta};
pub use snake::{Direction, Snake};
