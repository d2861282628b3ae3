//! Level file loading
//!
//! A level is a grid of integers, one row per line:
//! `0` empty, `1` solid brick, `2..=5` colored breakable brick, anything
//! higher a white breakable brick. Brick width is the field width divided by
//! the column count; height is width / 1.5.

use std::path::Path;

use glam::Vec2;
use thiserror::Error;

use super::state::Obstacle;
use crate::consts::BRICK_ASPECT;
use crate::{Color, colors};

/// Error type for level parsing
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Token that is not an unsigned integer
    #[error("line {line}: bad tile `{token}`")]
    BadTile { line: usize, token: String },
    /// Row width differs from the first row
    #[error("line {line}: expected {expected} tiles, found {found}")]
    RaggedRow {
        line: usize,
        expected: usize,
        found: usize,
    },
}

fn tile_color(code: u32) -> Color {
    match code {
        2 => colors::BRICK_BLUE,
        3 => colors::BRICK_GREEN,
        4 => colors::BRICK_YELLOW,
        5 => colors::BRICK_ORANGE,
        _ => colors::WHITE,
    }
}

/// Parse level text into obstacles laid out across `field_width`
pub fn parse_level(text: &str, field_width: f32) -> Result<Vec<Obstacle>, LevelError> {
    let mut rows: Vec<Vec<u32>> = Vec::new();

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<u32>().map_err(|_| LevelError::BadTile {
                    line: i + 1,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(first) = rows.first() {
            if row.len() != first.len() {
                return Err(LevelError::RaggedRow {
                    line: i + 1,
                    expected: first.len(),
                    found: row.len(),
                });
            }
        }
        rows.push(row);
    }

    let Some(columns) = rows.first().map(Vec::len) else {
        return Ok(Vec::new());
    };

    let brick_width = field_width / columns as f32;
    let brick_height = brick_width / BRICK_ASPECT;
    let size = Vec2::new(brick_width, brick_height);

    let mut obstacles = Vec::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, &code) in row.iter().enumerate() {
            if code == 0 {
                continue;
            }
            let pos = Vec2::new(brick_width * x as f32, brick_height * y as f32);
            let obstacle = if code == 1 {
                Obstacle::new(pos, size, colors::BRICK_SOLID, true)
            } else {
                Obstacle::new(pos, size, tile_color(code), false)
            };
            obstacles.push(obstacle);
        }
    }

    Ok(obstacles)
}

/// Read and parse a level file
pub fn load_level(path: impl AsRef<Path>, field_width: f32) -> Result<Vec<Obstacle>, LevelError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let obstacles = parse_level(&text, field_width)?;
    log::info!("Loaded level {} ({} bricks)", path.display(), obstacles.len());
    Ok(obstacles)
}

/// Load a level, falling back to an empty one if it is missing or malformed
pub fn load_level_or_empty(path: impl AsRef<Path>, field_width: f32) -> Vec<Obstacle> {
    let path = path.as_ref();
    match load_level(path, field_width) {
        Ok(obstacles) => obstacles,
        Err(err) => {
            log::warn!("Level {} unusable, starting empty: {}", path.display(), err);
            Vec::new()
        }
    }
}
