/// Boolean occupancy matrix over the animation surface.
///
/// A cell is claimed the instant a walker accepts a move into it and is
/// never released individually; the whole grid clears on rebuild.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Grid {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// A zero-area grid; ticking against it is inert.
    pub fn empty() -> Self {
        Grid::new(0, 0)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    pub fn occupied(&self, x: i32, y: i32) -> bool {
        debug_assert!(self.in_bounds(x, y));
        self.cells[y as usize * self.width + x as usize]
    }

    pub fn claim(&mut self, x: i32, y: i32) {
        debug_assert!(self.in_bounds(x, y));
        self.cells[y as usize * self.width + x as usize] = true;
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn open_count(&self) -> usize {
        self.cells.iter().filter(|&&c| !c).count()
    }

    /// Coordinates of every unclaimed cell.
    pub fn open_cells(&self) -> Vec<(i32, i32)> {
        let mut open = Vec::with_capacity(self.open_count());
        for y in 0..self.height {
            for x in 0..self.width {
                if !self.cells[y * self.width + x] {
                    open.push((x as i32, y as i32));
                }
            }
        }
        open
    }
}
