//! 3D maze grid and its canonical byte form.
//!
//! The canonical form is nine big-endian 32-bit integers (goal x,y,z;
//! start x,y,z; width,height,depth) followed by one byte per cell in
//! x-major order. Every persistence and wire operation in the crate goes
//! through this layout.

use std::io::Cursor;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use serde::{Deserialize, Serialize};

use crate::error::{DaedalusError, Result};

/// Length of the canonical header: nine 32-bit integers.
pub const HEADER_LEN: usize = 36;

/// Byte offset of the width/height/depth triple inside the header.
pub const DIMS_OFFSET: usize = 24;

/// Cell value for a wall.
pub const WALL: u8 = 1;
/// Cell value for an open passage.
pub const OPEN: u8 = 0;

/// Cross-section axis selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl std::str::FromStr for Axis {
    type Err = DaedalusError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "X" | "x" => Ok(Axis::X),
            "Y" | "y" => Ok(Axis::Y),
            "Z" | "z" => Ok(Axis::Z),
            _ => Err(DaedalusError::InvalidArgument(
                "axis must be X, Y, or Z".into(),
            )),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "X"),
            Axis::Y => write!(f, "Y"),
            Axis::Z => write!(f, "Z"),
        }
    }
}

/// A cell coordinate inside a maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl Position {
    pub fn new(x: u32, y: u32, z: u32) -> Self {
        Self { x, y, z }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Fixed-size 3D grid of wall/open cells with a start and a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze3d {
    width: u32,
    height: u32,
    depth: u32,
    start: Position,
    goal: Position,
    cells: Vec<u8>,
}

impl Maze3d {
    /// Build a maze from parts. Cell count must match the dimensions.
    pub fn new(
        width: u32,
        height: u32,
        depth: u32,
        start: Position,
        goal: Position,
        cells: Vec<u8>,
    ) -> Result<Self> {
        if width == 0 || height == 0 || depth == 0 {
            return Err(DaedalusError::InvalidArgument(
                "maze dimensions must be positive".into(),
            ));
        }
        let expected = cell_count(width, height, depth).ok_or_else(|| {
            DaedalusError::InvalidArgument(format!(
                "dimensions {width}x{height}x{depth} overflow the cell count"
            ))
        })?;
        if cells.len() != expected {
            return Err(DaedalusError::InvalidArgument(format!(
                "cell count {} does not match {}x{}x{}",
                cells.len(),
                width,
                height,
                depth
            )));
        }
        Ok(Self {
            width,
            height,
            depth,
            start,
            goal,
            cells,
        })
    }

    /// An all-wall maze of the given dimensions.
    pub fn filled(width: u32, height: u32, depth: u32) -> Result<Self> {
        let count = cell_count(width, height, depth).ok_or_else(|| {
            DaedalusError::InvalidArgument(format!(
                "dimensions {width}x{height}x{depth} overflow the cell count"
            ))
        })?;
        Self::new(
            width,
            height,
            depth,
            Position::new(0, 0, 0),
            Position::new(0, 0, 0),
            vec![WALL; count],
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn start(&self) -> Position {
        self.start
    }

    pub fn goal(&self) -> Position {
        self.goal
    }

    pub fn set_start(&mut self, start: Position) {
        self.start = start;
    }

    pub fn set_goal(&mut self, goal: Position) {
        self.goal = goal;
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height && pos.z < self.depth
    }

    fn index(&self, pos: Position) -> usize {
        (pos.x as usize * self.height as usize + pos.y as usize) * self.depth as usize
            + pos.z as usize
    }

    /// Cell value at `pos`; `InvalidArgument` when out of bounds.
    pub fn cell(&self, pos: Position) -> Result<u8> {
        if !self.in_bounds(pos) {
            return Err(DaedalusError::InvalidArgument(format!(
                "position {} outside {}x{}x{}",
                pos, self.width, self.height, self.depth
            )));
        }
        Ok(self.cells[self.index(pos)])
    }

    pub fn is_open(&self, pos: Position) -> bool {
        self.in_bounds(pos) && self.cells[self.index(pos)] == OPEN
    }

    pub fn set_cell(&mut self, pos: Position, value: u8) -> Result<()> {
        if !self.in_bounds(pos) {
            return Err(DaedalusError::InvalidArgument(format!(
                "position {} outside {}x{}x{}",
                pos, self.width, self.height, self.depth
            )));
        }
        let idx = self.index(pos);
        self.cells[idx] = value;
        Ok(())
    }

    /// Canonical byte form: 36-byte header followed by the cell body.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + self.cells.len());
        for v in [
            self.goal.x,
            self.goal.y,
            self.goal.z,
            self.start.x,
            self.start.y,
            self.start.z,
            self.width,
            self.height,
            self.depth,
        ] {
            out.write_u32::<BigEndian>(v).expect("vec write");
        }
        out.extend_from_slice(&self.cells);
        out
    }

    /// Rebuild a maze from its canonical byte form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < HEADER_LEN {
            return Err(DaedalusError::Format(format!(
                "maze header needs {} bytes, got {}",
                HEADER_LEN,
                bytes.len()
            )));
        }
        let mut rdr = Cursor::new(&bytes[..HEADER_LEN]);
        let mut ints = [0u32; 9];
        for slot in ints.iter_mut() {
            let v = rdr.read_i32::<BigEndian>().expect("bounded header read");
            if v < 0 {
                return Err(DaedalusError::Format(format!(
                    "negative header field: {v}"
                )));
            }
            *slot = v as u32;
        }
        let (goal, start) = (
            Position::new(ints[0], ints[1], ints[2]),
            Position::new(ints[3], ints[4], ints[5]),
        );
        let (width, height, depth) = (ints[6], ints[7], ints[8]);
        if width == 0 || height == 0 || depth == 0 {
            return Err(DaedalusError::Format(format!(
                "non-positive dimensions {width}x{height}x{depth}"
            )));
        }
        let body_len = cell_count(width, height, depth).ok_or_else(|| {
            DaedalusError::Format(format!(
                "dimensions {width}x{height}x{depth} overflow the body length"
            ))
        })?;
        if bytes.len() != HEADER_LEN + body_len {
            return Err(DaedalusError::Format(format!(
                "body length {} does not match {}x{}x{}",
                bytes.len() - HEADER_LEN,
                width,
                height,
                depth
            )));
        }
        Self::new(
            width,
            height,
            depth,
            start,
            goal,
            bytes[HEADER_LEN..].to_vec(),
        )
    }

    /// Length of the canonical encoding without materializing it.
    pub fn byte_len(&self) -> usize {
        HEADER_LEN + self.cells.len()
    }

    /// 2D slice along `axis` at `index`.
    pub fn cross_section(&self, axis: Axis, index: u32) -> Result<Vec<Vec<u8>>> {
        match axis {
            Axis::X => self.cross_section_x(index),
            Axis::Y => self.cross_section_y(index),
            Axis::Z => self.cross_section_z(index),
        }
    }

    /// 2D slice at `x = index`, indexed `[y][z]`.
    pub fn cross_section_x(&self, index: u32) -> Result<Vec<Vec<u8>>> {
        if index >= self.width {
            return Err(out_of_range("x", index, self.width));
        }
        let mut plane = Vec::with_capacity(self.height as usize);
        for y in 0..self.height {
            let mut row = Vec::with_capacity(self.depth as usize);
            for z in 0..self.depth {
                row.push(self.cells[self.index(Position::new(index, y, z))]);
            }
            plane.push(row);
        }
        Ok(plane)
    }

    /// 2D slice at `y = index`, indexed `[x][z]`.
    pub fn cross_section_y(&self, index: u32) -> Result<Vec<Vec<u8>>> {
        if index >= self.height {
            return Err(out_of_range("y", index, self.height));
        }
        let mut plane = Vec::with_capacity(self.width as usize);
        for x in 0..self.width {
            let mut row = Vec::with_capacity(self.depth as usize);
            for z in 0..self.depth {
                row.push(self.cells[self.index(Position::new(x, index, z))]);
            }
            plane.push(row);
        }
        Ok(plane)
    }

    /// 2D slice at `z = index`, indexed `[x][y]`.
    pub fn cross_section_z(&self, index: u32) -> Result<Vec<Vec<u8>>> {
        if index >= self.depth {
            return Err(out_of_range("z", index, self.depth));
        }
        let mut plane = Vec::with_capacity(self.width as usize);
        for x in 0..self.width {
            let mut row = Vec::with_capacity(self.height as usize);
            for y in 0..self.height {
                row.push(self.cells[self.index(Position::new(x, y, index))]);
            }
            plane.push(row);
        }
        Ok(plane)
    }
}

fn cell_count(width: u32, height: u32, depth: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(depth as usize))
}

fn out_of_range(axis: &str, index: u32, limit: u32) -> DaedalusError {
    DaedalusError::InvalidArgument(format!(
        "{axis} index {index} out of range 0..{limit}"
    ))
}
