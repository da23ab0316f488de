//! Chunk carving: randomized depth-first search plus boundary wall breaks.

use crate::config::GameConfig;
use crate::random::{RandomStream, UnitRandom, chunk_maze_suffix, chunk_wall_break_suffix};
use crate::types::Coord;

use super::grid::{CellGrid, PixelGrid};
use super::model::GeneratedChunk;

#[derive(Clone, Debug)]
pub struct ChunkGenerator {
    base_seed: String,
    cells_per_grid: usize,
    dead_end_wall_break_ratio: f64,
    chunk_connecting_wall_break_ratio: f64,
    maze_origin_x: i32,
}

impl ChunkGenerator {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            base_seed: config.base_seed.clone(),
            cells_per_grid: config.chunk_cells_per_grid,
            dead_end_wall_break_ratio: config.dead_end_wall_break_ratio,
            chunk_connecting_wall_break_ratio: config.chunk_connecting_wall_break_ratio,
            maze_origin_x: config.maze_origin_x(),
        }
    }

    pub fn chunk_pixel_width(&self) -> i32 {
        (self.cells_per_grid * 2) as i32
    }

    pub fn wall_breaks_between_chunks(&self) -> usize {
        let breaks = (self.cells_per_grid as f64 * self.chunk_connecting_wall_break_ratio).ceil();
        (breaks as usize).min(self.cells_per_grid)
    }

    pub fn chunk_x_start(&self, chunk_index: u32) -> i32 {
        self.maze_origin_x + chunk_index as i32 * self.chunk_pixel_width()
    }

    pub fn generate(&self, chunk_index: u32) -> GeneratedChunk {
        let mut maze_rng = RandomStream::derive(&self.base_seed, &chunk_maze_suffix(chunk_index));
        let mut wall_rng =
            RandomStream::derive(&self.base_seed, &chunk_wall_break_suffix(chunk_index));

        let mut cells = CellGrid::new(self.cells_per_grid);
        let mut pixels = PixelGrid::new(self.cells_per_grid);

        self.carve_with_randomized_dfs(&mut cells, &mut pixels, &mut maze_rng, &mut wall_rng);
        self.open_wall_towards_next_chunk(&mut pixels, &mut wall_rng);

        let x_start = self.chunk_x_start(chunk_index);
        let corridors = pixels
            .corridors()
            .map(|(px, py)| Coord { x: x_start + px as i32, y: 1 + py as i32 })
            .collect();

        GeneratedChunk {
            index: chunk_index,
            x_start,
            x_end: x_start + self.chunk_pixel_width(),
            corridors,
        }
    }

    fn carve_with_randomized_dfs(
        &self,
        cells: &mut CellGrid,
        pixels: &mut PixelGrid,
        maze_rng: &mut impl UnitRandom,
        wall_rng: &mut impl UnitRandom,
    ) {
        let initial = cells.cell(0, 0);
        cells.visit(initial);
        let mut stack = vec![initial];
        let mut last_carved = None;

        while let Some(current) = stack.pop() {
            let unvisited = cells.unvisited_neighbors(current);
            if unvisited.is_empty() {
                // Only the tip of a freshly carved corridor is a real dead end.
                if last_carved == Some(current)
                    && maze_rng.next_unit() < self.dead_end_wall_break_ratio
                {
                    connect_to_random_visited_neighbor(cells, pixels, current, wall_rng);
                }
                continue;
            }

            if unvisited.len() > 1 {
                stack.push(current);
            }

            let next = unvisited[maze_rng.pick_index(unvisited.len())];
            last_carved = Some(next);
            connect_cells(cells, pixels, current, next);
            cells.visit(next);
            stack.push(next);
        }
    }

    fn open_wall_towards_next_chunk(&self, pixels: &mut PixelGrid, wall_rng: &mut impl UnitRandom) {
        let mut rows: Vec<usize> = (0..self.cells_per_grid).collect();
        let boundary_x = pixels.width() - 1;
        for _ in 0..self.wall_breaks_between_chunks() {
            let row = rows.remove(wall_rng.pick_index(rows.len()));
            pixels.open(boundary_x, 2 * row);
        }
    }
}

fn connect_to_random_visited_neighbor(
    cells: &mut CellGrid,
    pixels: &mut PixelGrid,
    cell: usize,
    wall_rng: &mut impl UnitRandom,
) {
    let candidates = cells.disconnected_visited_neighbors(cell);
    if candidates.is_empty() {
        return;
    }
    let neighbor = candidates[wall_rng.pick_index(candidates.len())];
    connect_cells(cells, pixels, cell, neighbor);
}

fn connect_cells(cells: &mut CellGrid, pixels: &mut PixelGrid, a: usize, b: usize) {
    cells.connect(a, b);
    let (ax, ay) = cells.position(a);
    let (bx, by) = cells.position(b);
    // Midpoint between the two cell pixels in the doubled grid.
    pixels.open(ax + bx, ay + by);
}
