//! Logical cell grid and doubled-resolution pixel grid used while carving one chunk.

/// `n × n` carving cells, indexed `x * n + y`.
pub(super) struct CellGrid {
    cells_per_grid: usize,
    visited: Vec<bool>,
    connections: Vec<Vec<usize>>,
}

impl CellGrid {
    pub(super) fn new(cells_per_grid: usize) -> Self {
        let count = cells_per_grid * cells_per_grid;
        Self { cells_per_grid, visited: vec![false; count], connections: vec![Vec::new(); count] }
    }

    pub(super) fn cell(&self, x: usize, y: usize) -> usize {
        x * self.cells_per_grid + y
    }

    pub(super) fn position(&self, cell: usize) -> (usize, usize) {
        (cell / self.cells_per_grid, cell % self.cells_per_grid)
    }

    pub(super) fn visit(&mut self, cell: usize) {
        self.visited[cell] = true;
    }

    /// In-bounds neighbors ordered top, right, bottom, left.
    fn neighbors(&self, cell: usize) -> Vec<usize> {
        let (x, y) = self.position(cell);
        let last = self.cells_per_grid - 1;
        let mut neighbors = Vec::with_capacity(4);
        if y > 0 {
            neighbors.push(self.cell(x, y - 1));
        }
        if x < last {
            neighbors.push(self.cell(x + 1, y));
        }
        if y < last {
            neighbors.push(self.cell(x, y + 1));
        }
        if x > 0 {
            neighbors.push(self.cell(x - 1, y));
        }
        neighbors
    }

    pub(super) fn unvisited_neighbors(&self, cell: usize) -> Vec<usize> {
        self.neighbors(cell).into_iter().filter(|&n| !self.visited[n]).collect()
    }

    pub(super) fn disconnected_visited_neighbors(&self, cell: usize) -> Vec<usize> {
        self.neighbors(cell)
            .into_iter()
            .filter(|n| !self.connections[cell].contains(n))
            .filter(|&n| self.visited[n])
            .collect()
    }

    pub(super) fn connect(&mut self, a: usize, b: usize) {
        self.connections[a].push(b);
        self.connections[b].push(a);
    }
}

/// `(2n) × (2n - 1)` corridor/wall pixels, column-major. Cells sit on even
/// coordinates; odd coordinates are walls until two cells are connected.
pub(super) struct PixelGrid {
    width: usize,
    height: usize,
    corridor: Vec<bool>,
}

impl PixelGrid {
    pub(super) fn new(cells_per_grid: usize) -> Self {
        let width = cells_per_grid * 2;
        let height = cells_per_grid * 2 - 1;
        let mut corridor = vec![false; width * height];
        for x in (0..width).step_by(2) {
            for y in (0..height).step_by(2) {
                corridor[x * height + y] = true;
            }
        }
        Self { width, height, corridor }
    }

    pub(super) fn width(&self) -> usize {
        self.width
    }

    pub(super) fn open(&mut self, x: usize, y: usize) {
        debug_assert!(x < self.width && y < self.height);
        self.corridor[x * self.height + y] = true;
    }

    pub(super) fn corridors(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.corridor
            .iter()
            .enumerate()
            .filter(|(_, open)| **open)
            .map(|(index, _)| (index / self.height, index % self.height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_cells_have_two_neighbors_in_top_right_bottom_left_order() {
        let grid = CellGrid::new(4);
        let origin = grid.cell(0, 0);
        assert_eq!(grid.unvisited_neighbors(origin), vec![grid.cell(1, 0), grid.cell(0, 1)]);

        let far = grid.cell(3, 3);
        assert_eq!(grid.unvisited_neighbors(far), vec![grid.cell(3, 2), grid.cell(2, 3)]);
    }

    #[test]
    fn disconnected_visited_neighbors_skip_connected_and_unvisited_cells() {
        let mut grid = CellGrid::new(3);
        let center = grid.cell(1, 1);
        let top = grid.cell(1, 0);
        let right = grid.cell(2, 1);
        for cell in [center, top, right] {
            grid.visit(cell);
        }
        grid.connect(center, top);
        assert_eq!(grid.disconnected_visited_neighbors(center), vec![right]);
    }

    #[test]
    fn fresh_pixel_grid_only_opens_cell_pixels() {
        let pixels = PixelGrid::new(3);
        let open: Vec<_> = pixels.corridors().collect();
        assert_eq!(open.len(), 9);
        assert!(open.iter().all(|(x, y)| x % 2 == 0 && y % 2 == 0));
    }
}
