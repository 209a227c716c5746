//! Run-length codec for maze byte streams.
//!
//! The stream is a sequence of `(value, run)` byte pairs with runs capped
//! at 255; it carries no terminator and no length field, so every decode
//! must be told how many bytes to produce. Loading a maze file therefore
//! bootstraps in two passes: decode exactly the 36-byte header, read the
//! dimensions out of it, then re-decode the whole stream with the now-known
//! full length.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::{DaedalusError, Result};
use crate::maze::{Maze3d, DIMS_OFFSET, HEADER_LEN};

/// Longest run a single pair can carry.
const MAX_RUN: usize = 255;

/// Run-length encode `raw` into `(value, run)` pairs.
///
/// Runs longer than 255 split across pairs. Deterministic; `encode` of an
/// empty slice is an empty stream.
pub fn encode(raw: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut iter = raw.iter();
    let Some(&first) = iter.next() else {
        return out;
    };
    let mut value = first;
    let mut run = 1usize;
    for &byte in iter {
        if byte == value && run < MAX_RUN {
            run += 1;
        } else {
            out.push(value);
            out.push(run as u8);
            value = byte;
            run = 1;
        }
    }
    out.push(value);
    out.push(run as u8);
    out
}

/// Expand `compressed` until exactly `expected_len` bytes have accumulated.
///
/// A pair that would overrun the target is truncated at the boundary, and
/// anything after the target is ignored. Running out of pairs first is a
/// `Format` error.
pub fn decode(compressed: &[u8], expected_len: usize) -> Result<Vec<u8>> {
    // fail fast before allocating: a stream of n pairs can never yield
    // more than n * 255 bytes
    let max_yield = (compressed.len() / 2) * MAX_RUN;
    if expected_len > max_yield {
        return Err(DaedalusError::Format(format!(
            "{}-byte stream cannot yield {} bytes",
            compressed.len(),
            expected_len
        )));
    }
    let mut out = Vec::with_capacity(expected_len);
    let mut offset = 0;
    while out.len() < expected_len {
        if offset + 2 > compressed.len() {
            return Err(DaedalusError::Format(format!(
                "stream exhausted at byte {} of {}",
                out.len(),
                expected_len
            )));
        }
        let value = compressed[offset];
        let run = compressed[offset + 1] as usize;
        offset += 2;
        if run == 0 {
            return Err(DaedalusError::Format("zero-length run".into()));
        }
        let take = run.min(expected_len - out.len());
        out.extend(std::iter::repeat(value).take(take));
    }
    Ok(out)
}

/// Run-length encode a maze's canonical byte form.
pub fn encode_maze(maze: &Maze3d) -> Vec<u8> {
    encode(&maze.to_bytes())
}

/// Encode `maze` and overwrite `path` with the compressed stream.
pub fn write_maze_file(maze: &Maze3d, path: &Path) -> Result<()> {
    fs::write(path, encode_maze(maze))?;
    Ok(())
}

/// Load a maze file written by [`write_maze_file`].
///
/// Pass one decodes the 36-byte header; the width/height/depth triple at
/// offset 24 then bounds pass two, which re-decodes the same stream from
/// its start for the full header+body. Nothing past the declared body
/// length is ever materialized.
pub fn decode_maze_file(path: &Path) -> Result<Maze3d> {
    let compressed = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            DaedalusError::NotFound(format!("maze file {}", path.display()))
        } else {
            DaedalusError::Io(e)
        }
    })?;
    let maze = decode_maze_bytes(&compressed)?;
    Ok(maze)
}

/// Two-pass decode of an in-memory compressed stream.
pub fn decode_maze_bytes(compressed: &[u8]) -> Result<Maze3d> {
    let header = decode(compressed, HEADER_LEN)?;
    let mut rdr = Cursor::new(&header[DIMS_OFFSET..]);
    let mut dims = [0usize; 3];
    for d in dims.iter_mut() {
        let v = rdr.read_i32::<BigEndian>().expect("bounded header read");
        if v <= 0 {
            return Err(DaedalusError::Format(format!(
                "non-positive dimension {v} in header"
            )));
        }
        *d = v as usize;
    }
    let body_len = dims[0]
        .checked_mul(dims[1])
        .and_then(|v| v.checked_mul(dims[2]))
        .ok_or_else(|| {
            DaedalusError::Format(format!(
                "dimensions {}x{}x{} overflow the body length",
                dims[0], dims[1], dims[2]
            ))
        })?;
    let full = decode(compressed, HEADER_LEN + body_len)?;
    Maze3d::from_bytes(&full)
}
