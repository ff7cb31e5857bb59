use std::collections::VecDeque;

use crate::grid::{Pos, PosDelta};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl From<Direction> for PosDelta {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Up => PosDelta { x: 0, y: -1 },
            Direction::Down => PosDelta { x: 0, y: 1 },
            Direction::Left => PosDelta { x: -1, y: 0 },
            Direction::Right => PosDelta { x: 1, y: 0 },
        }
    }
}

/// Ordered chain of grid cells, head at the front, plus the heading the head
/// will take on the next advance.
#[derive(Clone, Debug, PartialEq)]
pub struct Snake {
    body: VecDeque<Pos>,
    heading: Direction,
}

impl Snake {
    pub fn new(body: impl IntoIterator<Item = Pos>, heading: Direction) -> Self {
        let body: VecDeque<Pos> = body.into_iter().collect();
        assert!(!body.is_empty(), "snake body must have at least one segment");
        Snake { body, heading }
    }

    pub fn head(&self) -> Pos {
        *self.body.front().unwrap()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Stores the heading verbatim. A 180° reversal is accepted here; with a
    /// body of length >= 2 it becomes a self-collision on the next advance.
    pub fn set_heading(&mut self, heading: Direction) {
        self.heading = heading;
    }

    /// Head offset one unit along the heading. Pure; does not consult the grid.
    pub fn next_head(&self) -> Pos {
        self.head().offset(self.heading.into())
    }

    /// New body with the next head prepended; the tail is dropped unless the
    /// snake grew, so a plain move keeps the length unchanged.
    pub fn advanced(&self, grew: bool) -> Snake {
        let mut body = self.body.clone();
        body.push_front(self.next_head());
        if !grew {
            body.pop_back();
        }
        Snake {
            body,
            heading: self.heading,
        }
    }

    pub fn occupies(&self, pos: Pos) -> bool {
        self.body.contains(&pos)
    }

    pub fn cells(&self) -> impl Iterator<Item = Pos> + '_ {
        self.body.iter().copied()
    }
}
