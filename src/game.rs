use log::info;
use rand::Rng;

use crate::food::{place_random_food, PlaceError};
use crate::grid::{CellState, Grid, Pos};
use crate::snake::{Direction, Snake};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    /// Boundary exit or self-collision. Terminal.
    Dead,
    /// The snake fills the grid and food has nowhere to go. Terminal.
    Won,
}

/// One game's worth of state: the authoritative snake, the occupancy grid
/// derived from it, and whether the game is still going. Owned by the
/// caller; every operation reads and writes this single value.
#[derive(Clone, Debug)]
pub struct Game {
    grid: Grid,
    snake: Snake,
    status: Status,
}

impl Game {
    /// Fresh running game with the given body stamped and one food cell
    /// placed. The body must fit the grid.
    pub fn new(
        size: usize,
        body: impl IntoIterator<Item = Pos>,
        heading: Direction,
        rng: &mut impl Rng,
    ) -> Self {
        let snake = Snake::new(body, heading);
        let grid = Grid::new(size);
        for pos in snake.cells() {
            assert!(
                grid.contains(pos),
                "initial body segment {:?} outside {}x{} grid",
                pos,
                size,
                size
            );
        }
        let grid = grid.stamped(snake.cells());
        let grid =
            place_random_food(&grid, rng).expect("fresh board must have room for food");

        info!("new {size}x{size} game, snake length {}", snake.len());
        Game {
            grid,
            snake,
            status: Status::Running,
        }
    }

    /// Stores the heading verbatim; reversals are not rejected here. Their
    /// fatal outcome is realized by the self-collision rule on the next tick.
    pub fn set_direction(&mut self, direction: Direction) {
        self.snake.set_heading(direction);
    }

    /// Advances the simulation one step. Ignored once the game is over. A
    /// fatal move leaves both grid and body exactly as they were.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        if self.status != Status::Running {
            return;
        }

        let target = self.snake.next_head();
        if !self.grid.contains(target) {
            info!("snake left the board at {:?}", target);
            self.status = Status::Dead;
            return;
        }

        match self.grid.cell(target) {
            CellState::Snake => {
                info!("snake ran into itself at {:?}", target);
                self.status = Status::Dead;
            }
            CellState::Food => {
                self.snake = self.snake.advanced(true);
                self.redraw();
                // Place against the redrawn grid so the new body rejects.
                match place_random_food(&self.grid, rng) {
                    Ok(grid) => self.grid = grid,
                    Err(PlaceError::GridFull) => {
                        info!("snake fills the board, game won");
                        self.status = Status::Won;
                    }
                }
            }
            CellState::Empty => {
                self.snake = self.snake.advanced(false);
                self.redraw();
            }
        }
    }

    /// Read-only view for rendering.
    pub fn snapshot(&self) -> (&Grid, bool) {
        (&self.grid, self.status == Status::Running)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    fn redraw(&mut self) {
        self.grid = self.grid.cleared_of_snake().stamped(self.snake.cells());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    // Hand-built game so tests control the food cell exactly.
    fn game_with(grid: Grid, snake: Snake) -> Game {
        Game {
            grid,
            snake,
            status: Status::Running,
        }
    }

    fn row_body() -> Vec<Pos> {
        vec![Pos::new(4, 4), Pos::new(5, 4), Pos::new(6, 4)]
    }

    #[test]
    fn test_new_game_grid_matches_body_with_one_food() {
        let game = Game::new(8, row_body(), Direction::Left, &mut rng());
        let (grid, alive) = game.snapshot();

        assert!(alive);
        let body: HashSet<Pos> = row_body().into_iter().collect();
        assert_eq!(grid.cells_in_state(CellState::Snake), body);
        let food = grid.cells_in_state(CellState::Food);
        assert_eq!(food.len(), 1);
        assert!(food.is_disjoint(&grid.cells_in_state(CellState::Snake)));
    }

    #[test]
    fn test_new_game_rejects_body_outside_grid() {
        let result = std::panic::catch_unwind(|| {
            Game::new(4, row_body(), Direction::Left, &mut rng());
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_tick_keeps_grid_consistent_with_body() {
        let mut game = Game::new(8, row_body(), Direction::Left, &mut rng());
        let mut r = rng();

        for _ in 0..3 {
            game.tick(&mut r);
            let (grid, alive) = game.snapshot();
            assert!(alive);
            let body: HashSet<Pos> = game.snake.cells().collect();
            assert_eq!(grid.cells_in_state(CellState::Snake), body);
            assert_eq!(grid.cells_in_state(CellState::Food).len(), 1);
        }
    }

    #[test]
    fn test_boundary_exit_dies_without_mutation() {
        let body = vec![Pos::new(0, 4), Pos::new(1, 4), Pos::new(2, 4)];
        let snake = Snake::new(body.clone(), Direction::Left);
        let grid = Grid::new(8)
            .stamped(snake.cells())
            .with_cell(Pos::new(7, 7), CellState::Food);
        let mut game = game_with(grid.clone(), snake.clone());

        game.tick(&mut rng());

        assert_eq!(game.status(), Status::Dead);
        let (after, alive) = game.snapshot();
        assert!(!alive);
        assert_eq!(*after, grid);
        assert_eq!(game.snake, snake);
    }

    #[test]
    fn test_self_collision_dies() {
        // Square loop; heading Right sends the head onto (6,5).
        let body = vec![
            Pos::new(5, 5),
            Pos::new(6, 5),
            Pos::new(6, 6),
            Pos::new(5, 6),
        ];
        let snake = Snake::new(body, Direction::Right);
        let grid = Grid::new(10)
            .stamped(snake.cells())
            .with_cell(Pos::new(0, 0), CellState::Food);
        let mut game = game_with(grid, snake);

        game.tick(&mut rng());

        assert_eq!(game.status(), Status::Dead);
        assert_eq!(game.snake.len(), 4);
    }

    #[test]
    fn test_reversal_is_fatal_on_next_tick() {
        let snake = Snake::new([Pos::new(4, 4), Pos::new(5, 4)], Direction::Left);
        let grid = Grid::new(8)
            .stamped(snake.cells())
            .with_cell(Pos::new(0, 0), CellState::Food);
        let mut game = game_with(grid, snake);

        // Reversal is accepted as heading...
        game.set_direction(Direction::Right);
        let (_, alive) = game.snapshot();
        assert!(alive);

        // ...and kills on the advance.
        game.tick(&mut rng());
        assert_eq!(game.status(), Status::Dead);
    }

    #[test]
    fn test_dead_game_ignores_further_ticks() {
        let snake = Snake::new([Pos::new(0, 0)], Direction::Left);
        let grid = Grid::new(4)
            .stamped(snake.cells())
            .with_cell(Pos::new(3, 3), CellState::Food);
        let mut game = game_with(grid, snake);
        let mut r = rng();

        game.tick(&mut r);
        assert_eq!(game.status(), Status::Dead);

        let before = game.grid.clone();
        game.tick(&mut r);
        game.tick(&mut r);
        assert_eq!(game.status(), Status::Dead);
        assert_eq!(game.grid, before);
    }

    #[test]
    fn test_eating_the_last_cell_wins() {
        // 2x2 board, snake covers three cells, food on the fourth.
        let snake = Snake::new(
            [Pos::new(0, 0), Pos::new(0, 1), Pos::new(1, 1)],
            Direction::Right,
        );
        let grid = Grid::new(2)
            .stamped(snake.cells())
            .with_cell(Pos::new(1, 0), CellState::Food);
        let mut game = game_with(grid, snake);

        game.tick(&mut rng());

        assert_eq!(game.status(), Status::Won);
        assert_eq!(game.snake.len(), 4);
        let (after, alive) = game.snapshot();
        assert!(!alive);
        assert_eq!(after.cells_in_state(CellState::Snake).len(), 4);
    }

    #[test]
    fn test_move_then_eat_scenario() {
        // 8x8 board, three-long snake heading left, food parked well away.
        let snake = Snake::new(row_body(), Direction::Left);
        let grid = Grid::new(8)
            .stamped(snake.cells())
            .with_cell(Pos::new(0, 0), CellState::Food);
        let mut game = game_with(grid, snake);
        let mut r = rng();

        game.tick(&mut r);
        assert_eq!(game.snake.head(), Pos::new(3, 4));
        assert_eq!(game.snake.len(), 3);
        assert_eq!(game.grid.cell(Pos::new(6, 4)), CellState::Empty);

        // Force the food onto (3,3), straight above the head.
        game.grid = game
            .grid
            .with_cell(Pos::new(0, 0), CellState::Empty)
            .with_cell(Pos::new(3, 3), CellState::Food);
        game.set_direction(Direction::Up);
        game.tick(&mut r);

        assert_eq!(game.snake.head(), Pos::new(3, 3));
        assert_eq!(game.snake.len(), 4);
        assert_eq!(game.grid.cell(Pos::new(3, 3)), CellState::Snake);

        let food = game.grid.cells_in_state(CellState::Food);
        assert_eq!(food.len(), 1);
        assert!(food.is_disjoint(&game.grid.cells_in_state(CellState::Snake)));
    }

    #[test]
    fn test_snapshot_is_idempotent() {
        let mut game = Game::new(8, row_body(), Direction::Left, &mut rng());
        game.tick(&mut rng());

        let (first, first_alive) = {
            let (g, a) = game.snapshot();
            (g.clone(), a)
        };
        let (second, second_alive) = game.snapshot();

        assert_eq!(*second, first);
        assert_eq!(second_alive, first_alive);
    }
}
