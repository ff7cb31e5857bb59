use std::collections::HashSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub x: i32,
    pub y: i32,
}

impl Pos {
    pub fn new(x: i32, y: i32) -> Self {
        Pos { x, y }
    }

    pub fn offset(&self, delta: PosDelta) -> Pos {
        Pos {
            x: self.x + delta.x,
            y: self.y + delta.y,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PosDelta {
    pub x: i32,
    pub y: i32,
}

/// Occupancy state of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellState {
    #[default]
    Empty,
    Snake,
    Food,
}

/// Square occupancy matrix, row-major. The grid is a rendering cache derived
/// from the snake body and the current food cell; the `Snake` value is
/// authoritative. All transformations return a new grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    size: usize,
    cells: Vec<CellState>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "grid size must be positive");
        Grid {
            size,
            cells: vec![CellState::Empty; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Pos) -> bool {
        let size = self.size as i32;
        (0..size).contains(&pos.x) && (0..size).contains(&pos.y)
    }

    fn index(&self, pos: Pos) -> usize {
        assert!(
            self.contains(pos),
            "coordinate {:?} outside {}x{} grid",
            pos,
            self.size,
            self.size
        );
        pos.y as usize * self.size + pos.x as usize
    }

    pub fn cell(&self, pos: Pos) -> CellState {
        self.cells[self.index(pos)]
    }

    pub fn with_cell(&self, pos: Pos, state: CellState) -> Grid {
        let mut next = self.clone();
        let index = next.index(pos);
        next.cells[index] = state;
        next
    }

    /// Every Snake cell becomes Empty; Food and Empty cells are untouched.
    /// Run at the start of a redraw so a stale trail does not linger.
    pub fn cleared_of_snake(&self) -> Grid {
        let mut next = self.clone();
        for cell in &mut next.cells {
            if *cell == CellState::Snake {
                *cell = CellState::Empty;
            }
        }
        next
    }

    /// Marks every coordinate Snake. Must come after `cleared_of_snake` in
    /// the same tick.
    pub fn stamped(&self, coords: impl IntoIterator<Item = Pos>) -> Grid {
        let mut next = self.clone();
        for pos in coords {
            let index = next.index(pos);
            next.cells[index] = CellState::Snake;
        }
        next
    }

    pub fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        let size = self.size as i32;
        (0..size).flat_map(move |y| (0..size).map(move |x| Pos { x, y }))
    }

    pub fn cells_in_state(&self, state: CellState) -> HashSet<Pos> {
        self.positions().filter(|&p| self.cell(p) == state).collect()
    }
}
