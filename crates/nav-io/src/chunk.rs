//! Raw field dumps.
//!
//! A chunk file is `W·H` fixed-size cells in row-major order, each cell's
//! fields laid out back to back in native endianness.  The codec below is
//! the single source of truth for that layout on both the write and read
//! side, which is the whole contract: a chunk is only readable by the
//! build that wrote it (or one with identical layout).

use std::fs;
use std::path::Path;

use nav_core::{Field, IVec2, Vec2};
use nav_field::VectorCell;
use nav_mesh::{PathDisCell, PathNavCell};

use crate::error::IoResult;

/// Fixed-size binary layout of one field cell.
pub trait CellCodec: Sized {
    const SIZE: usize;

    /// Write exactly [`Self::SIZE`] bytes into `out`.
    fn encode(&self, out: &mut [u8]);

    /// Read exactly [`Self::SIZE`] bytes from `buf`.
    fn decode(buf: &[u8]) -> Self;
}

impl CellCodec for i32 {
    const SIZE: usize = 4;

    fn encode(&self, out: &mut [u8]) {
        out[..4].copy_from_slice(&self.to_ne_bytes());
    }

    fn decode(buf: &[u8]) -> Self {
        i32::from_ne_bytes(buf[..4].try_into().unwrap())
    }
}

impl CellCodec for f32 {
    const SIZE: usize = 4;

    fn encode(&self, out: &mut [u8]) {
        out[..4].copy_from_slice(&self.to_ne_bytes());
    }

    fn decode(buf: &[u8]) -> Self {
        f32::from_ne_bytes(buf[..4].try_into().unwrap())
    }
}

impl CellCodec for VectorCell {
    const SIZE: usize = 16;

    fn encode(&self, out: &mut [u8]) {
        self.dir.x.encode(&mut out[0..]);
        self.dir.y.encode(&mut out[4..]);
        self.pos.x.encode(&mut out[8..]);
        self.pos.y.encode(&mut out[12..]);
    }

    fn decode(buf: &[u8]) -> Self {
        VectorCell {
            dir: Vec2::new(f32::decode(&buf[0..]), f32::decode(&buf[4..])),
            pos: Vec2::new(f32::decode(&buf[8..]), f32::decode(&buf[12..])),
        }
    }
}

impl CellCodec for PathDisCell {
    const SIZE: usize = 16;

    fn encode(&self, out: &mut [u8]) {
        self.first.encode(&mut out[0..]);
        self.second.encode(&mut out[4..]);
        self.distance.encode(&mut out[8..]);
        self.index.encode(&mut out[12..]);
    }

    fn decode(buf: &[u8]) -> Self {
        PathDisCell {
            first: i32::decode(&buf[0..]),
            second: i32::decode(&buf[4..]),
            distance: f32::decode(&buf[8..]),
            index: i32::decode(&buf[12..]),
        }
    }
}

impl CellCodec for PathNavCell {
    const SIZE: usize = 12;

    fn encode(&self, out: &mut [u8]) {
        self.target.x.encode(&mut out[0..]);
        self.target.y.encode(&mut out[4..]);
        self.cost.encode(&mut out[8..]);
    }

    fn decode(buf: &[u8]) -> Self {
        PathNavCell {
            target: IVec2::new(i32::decode(&buf[0..]), i32::decode(&buf[4..])),
            cost: f32::decode(&buf[8..]),
        }
    }
}

// ── Field dump / load ─────────────────────────────────────────────────────────

/// Dump a field as a chunk file.
pub fn save_field<T: CellCodec>(field: &Field<T>, path: &Path) -> IoResult<()> {
    let cells = field.as_slice();
    let mut buf = vec![0u8; cells.len() * T::SIZE];
    for (i, cell) in cells.iter().enumerate() {
        cell.encode(&mut buf[i * T::SIZE..]);
    }
    fs::write(path, buf)?;
    Ok(())
}

/// Load a chunk file into a `width × height` field.
///
/// Returns `None` when the file is absent or its size does not match the
/// expected cell count (a malformed mesh directory, not an I/O error).
pub fn load_field<T: CellCodec + Clone>(
    width: i32,
    height: i32,
    fill: T,
    path: &Path,
) -> IoResult<Option<Field<T>>> {
    let buf = match fs::read(path) {
        Ok(buf) => buf,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let expected = width as usize * height as usize * T::SIZE;
    if buf.len() != expected {
        log::warn!(
            "{}: expected {expected} bytes, found {}",
            path.display(),
            buf.len()
        );
        return Ok(None);
    }

    let mut field = Field::new(width, height, fill);
    for (i, cell) in field.as_mut_slice().iter_mut().enumerate() {
        *cell = T::decode(&buf[i * T::SIZE..]);
    }
    Ok(Some(field))
}
