//! Obstacle points file: one `"<x> <y>"` pair per line.

use std::fs;
use std::path::Path;

use nav_core::Vec2;

use crate::error::IoResult;

/// Write points, one per line.
pub fn save_points(points: &[Vec2], path: &Path) -> IoResult<()> {
    let mut text = String::new();
    for p in points {
        text.push_str(&format!("{} {}\n", p.x, p.y));
    }
    fs::write(path, text)?;
    Ok(())
}

/// Read points back.  Unparseable lines are skipped.
pub fn load_points(path: &Path) -> IoResult<Vec<Vec2>> {
    let text = fs::read_to_string(path)?;
    let mut points = Vec::new();
    for line in text.lines() {
        let mut it = line.split_whitespace();
        if let (Some(Ok(x)), Some(Ok(y))) =
            (it.next().map(str::parse), it.next().map(str::parse))
        {
            points.push(Vec2::new(x, y));
        }
    }
    Ok(points)
}
