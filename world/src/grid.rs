use cellsnake_core::{Cell, CellCoord, Direction, FieldSize, Point};

/// Dense toroidal cell storage indexed as `x + y * width`.
#[derive(Clone, Debug)]
pub(crate) struct Grid {
    size: FieldSize,
    cells: Vec<Cell>,
}

impl Grid {
    pub(crate) fn new(size: FieldSize) -> Self {
        Self {
            size,
            cells: vec![Cell::default(); size.cell_count()],
        }
    }

    pub(crate) const fn size(&self) -> FieldSize {
        self.size
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    pub(crate) fn cell_mut(&mut self, index: usize) -> &mut Cell {
        &mut self.cells[index]
    }

    fn width(&self) -> usize {
        self.size.width() as usize
    }

    pub(crate) fn index_of(&self, cell: CellCoord) -> usize {
        cell.x() as usize + cell.y() as usize * self.width()
    }

    pub(crate) fn coord_of(&self, index: usize) -> CellCoord {
        let width = self.width();
        CellCoord::new((index % width) as u32, (index / width) as u32)
    }

    /// Wraps an arbitrary point onto the field.
    pub(crate) fn normalize(&self, point: Point) -> CellCoord {
        let x = point.x.rem_euclid(i64::from(self.size.width()));
        let y = point.y.rem_euclid(i64::from(self.size.height()));
        CellCoord::new(x as u32, y as u32)
    }

    /// Index of the toroidally adjacent cell in `direction`.
    pub(crate) fn neighbor(&self, index: usize, direction: Direction) -> usize {
        let width = self.width();
        let len = self.cells.len();
        match direction {
            Direction::North if index < width => len - width + index,
            Direction::North => index - width,
            Direction::South if index >= len - width => index - (len - width),
            Direction::South => index + width,
            Direction::East if (index + 1) % width == 0 => index + 1 - width,
            Direction::East => index + 1,
            Direction::West if index % width == 0 => index + width - 1,
            Direction::West => index - 1,
        }
    }

    pub(crate) fn empty_indices(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.color.is_empty())
            .map(|(index, _)| index)
            .collect()
    }
}
