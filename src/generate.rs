//! Maze generation: the generator seam and a seeded growing-tree impl.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{DaedalusError, Result};
use crate::maze::{Maze3d, Position, OPEN};

/// Generation collaborator: dimensions in, populated maze out.
pub trait MazeGenerator: Send + Sync {
    fn generate(&self, width: u32, height: u32, depth: u32) -> Result<Maze3d>;
}

/// Randomized depth-first carver on the odd lattice.
///
/// Cells with all-odd coordinates are tree nodes; carving opens a node and
/// the wall cell between it and its parent, so the result is a spanning
/// tree and every generated maze is solvable. A fixed seed reproduces the
/// same maze, which the tests rely on.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrowingTreeGenerator {
    pub seed: Option<u64>,
}

impl GrowingTreeGenerator {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }
}

impl MazeGenerator for GrowingTreeGenerator {
    fn generate(&self, width: u32, height: u32, depth: u32) -> Result<Maze3d> {
        if width < 3 || height < 3 || depth < 3 {
            return Err(DaedalusError::InvalidArgument(format!(
                "invalid dimensions {width}x{height}x{depth}: each axis needs at least 3 cells"
            )));
        }
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut maze = Maze3d::filled(width, height, depth)?;

        let start = Position::new(1, 1, 1);
        maze.set_cell(start, OPEN)?;
        let mut stack = vec![start];
        let mut last_carved = start;

        const DIRS: [(i64, i64, i64); 6] = [
            (-2, 0, 0),
            (2, 0, 0),
            (0, -2, 0),
            (0, 2, 0),
            (0, 0, -2),
            (0, 0, 2),
        ];

        while let Some(&current) = stack.last() {
            let mut dirs = DIRS;
            dirs.shuffle(&mut rng);
            let mut advanced = false;
            for (dx, dy, dz) in dirs {
                let nx = current.x as i64 + dx;
                let ny = current.y as i64 + dy;
                let nz = current.z as i64 + dz;
                if nx < 0 || ny < 0 || nz < 0 {
                    continue;
                }
                let next = Position::new(nx as u32, ny as u32, nz as u32);
                if !maze.in_bounds(next) || maze.is_open(next) {
                    continue;
                }
                let between = Position::new(
                    (current.x as i64 + dx / 2) as u32,
                    (current.y as i64 + dy / 2) as u32,
                    (current.z as i64 + dz / 2) as u32,
                );
                maze.set_cell(between, OPEN)?;
                maze.set_cell(next, OPEN)?;
                stack.push(next);
                last_carved = next;
                advanced = true;
                break;
            }
            if !advanced {
                stack.pop();
            }
        }

        maze.set_start(start);
        // last node carved is a dead end of the spanning tree
        maze.set_goal(last_carved);
        Ok(maze)
    }
}
