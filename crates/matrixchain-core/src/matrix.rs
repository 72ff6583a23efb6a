//! 8x8 bit patterns and the pure transforms applied to them.
//!
//! Cells are addressed column-major as `(x, y)`: `x` selects the column
//! (digit register), `y` the row (bit inside the column byte).

pub const SIZE: usize = 8;

/// Quarter-turn orientation of a pattern or of every module in a chain.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Rotation {
    #[default]
    None,
    Clockwise,
    CounterClockwise,
    HalfTurn,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Flip {
    #[default]
    None,
    /// Mirrors the column axis.
    Horizontal,
    /// Mirrors the row axis.
    Vertical,
}

/// One module's worth of LEDs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Matrix8x8 {
    cells: [[bool; SIZE]; SIZE],
}

impl Matrix8x8 {
    /// All LEDs off.
    pub const fn empty() -> Self {
        Self {
            cells: [[false; SIZE]; SIZE],
        }
    }

    pub const fn filled() -> Self {
        Self {
            cells: [[true; SIZE]; SIZE],
        }
    }

    /// Unpacks column bytes, bit `y` of `columns[x]` becoming cell `(x, y)`.
    pub fn from_columns(columns: [u8; SIZE]) -> Self {
        let mut matrix = Self::empty();
        for (x, column) in columns.iter().enumerate() {
            for y in 0..SIZE {
                matrix.cells[x][y] = column & (1 << y) != 0;
            }
        }
        matrix
    }

    /// Packs the pattern back into column bytes.
    pub fn to_columns(&self) -> [u8; SIZE] {
        let mut columns = [0u8; SIZE];
        for (column, cells) in columns.iter_mut().zip(self.cells.iter()) {
            for (y, on) in cells.iter().enumerate() {
                if *on {
                    *column |= 1 << y;
                }
            }
        }
        columns
    }

    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        if x >= SIZE || y >= SIZE {
            return None;
        }

        Some(self.cells[x][y])
    }

    /// Sets a cell.
    ///
    /// Returns `true` when the cell is in bounds, `false` otherwise.
    pub fn set(&mut self, x: usize, y: usize, on: bool) -> bool {
        if x >= SIZE || y >= SIZE {
            return false;
        }

        self.cells[x][y] = on;
        true
    }

    /// Flips one cell; same bounds contract as [`Self::set`].
    pub fn toggle(&mut self, x: usize, y: usize) -> bool {
        if x >= SIZE || y >= SIZE {
            return false;
        }

        self.cells[x][y] = !self.cells[x][y];
        true
    }

    pub fn lit_count(&self) -> usize {
        self.cells.iter().flatten().filter(|on| **on).count()
    }

    pub fn is_empty(&self) -> bool {
        self.lit_count() == 0
    }

    pub fn rotated(&self, rotation: Rotation) -> Self {
        rotate(self, rotation)
    }

    pub fn flipped(&self, flip: Flip) -> Self {
        self::flip(self, flip)
    }

    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        shift(self, dx, dy)
    }

    pub fn inverted(&self) -> Self {
        invert(self)
    }
}

/// Rotates a pattern by quarter turns.
///
/// Clockwise moves `(x, y)` to `(7 - y, x)`. Each of the 16 cells of one
/// quadrant is cycled through its four images, touching all 64 cells once.
pub fn rotate(matrix: &Matrix8x8, rotation: Rotation) -> Matrix8x8 {
    const E: usize = SIZE - 1;

    if rotation == Rotation::None {
        return *matrix;
    }

    let a = &matrix.cells;
    let mut m = [[false; SIZE]; SIZE];
    for x in 0..SIZE / 2 {
        for y in 0..SIZE / 2 {
            match rotation {
                Rotation::Clockwise => {
                    m[E - y][x] = a[x][y];
                    m[E - x][E - y] = a[E - y][x];
                    m[y][E - x] = a[E - x][E - y];
                    m[x][y] = a[y][E - x];
                }
                Rotation::CounterClockwise => {
                    m[y][E - x] = a[x][y];
                    m[E - x][E - y] = a[y][E - x];
                    m[E - y][x] = a[E - x][E - y];
                    m[x][y] = a[E - y][x];
                }
                Rotation::HalfTurn => {
                    m[E - x][E - y] = a[x][y];
                    m[x][y] = a[E - x][E - y];
                    m[E - y][x] = a[y][E - x];
                    m[y][E - x] = a[E - y][x];
                }
                Rotation::None => {}
            }
        }
    }

    Matrix8x8 { cells: m }
}

pub fn flip(matrix: &Matrix8x8, flip: Flip) -> Matrix8x8 {
    const E: usize = SIZE - 1;

    let a = &matrix.cells;
    let mut m = [[false; SIZE]; SIZE];
    match flip {
        Flip::None => return *matrix,
        Flip::Horizontal => {
            for x in 0..SIZE {
                m[x] = a[E - x];
            }
        }
        Flip::Vertical => {
            for x in 0..SIZE {
                for y in 0..SIZE {
                    m[x][y] = a[x][E - y];
                }
            }
        }
    }

    Matrix8x8 { cells: m }
}

/// Moves every cell by `(dx, dy)`; cells pushed past an edge are dropped.
pub fn shift(matrix: &Matrix8x8, dx: i32, dy: i32) -> Matrix8x8 {
    if dx == 0 && dy == 0 {
        return *matrix;
    }

    let mut shifted = Matrix8x8::empty();
    for x in 0..SIZE {
        for y in 0..SIZE {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            if (0..SIZE as i32).contains(&nx) && (0..SIZE as i32).contains(&ny) {
                shifted.cells[nx as usize][ny as usize] = matrix.cells[x][y];
            }
        }
    }
    shifted
}

pub fn invert(matrix: &Matrix8x8) -> Matrix8x8 {
    let mut inverted = *matrix;
    for cell in inverted.cells.iter_mut().flatten() {
        *cell = !*cell;
    }
    inverted
}
