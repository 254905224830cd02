#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for cellsnake adapters.
//!
//! Frames are plain character grids so that any backend able to print text
//! can present them.

use std::{fmt, io::Write};

use anyhow::{Context, Result as AnyResult};
use cellsnake_core::{Cell, CellColor, FieldSize};

/// Glyph drawn for a cell without content.
pub const EMPTY_GLYPH: char = '.';
/// Glyph drawn for an apple.
pub const APPLE_GLYPH: char = '@';
/// Glyph drawn for a wall.
pub const WALL_GLYPH: char = '#';
/// Glyph drawn for a snake whose color has no usable initial.
const UNNAMED_SNAKE_GLYPH: char = '?';

/// Selects the glyph that represents `cell`.
///
/// Snakes are drawn with the initial of their color: uppercase for the head
/// and lowercase for the body.
#[must_use]
pub fn glyph(cell: &Cell) -> char {
    match &cell.color {
        CellColor::Empty => EMPTY_GLYPH,
        CellColor::Apple => APPLE_GLYPH,
        CellColor::Wall => WALL_GLYPH,
        CellColor::Snake(color) => {
            let Some(initial) = color.as_str().chars().find(|c| c.is_alphanumeric()) else {
                return UNNAMED_SNAKE_GLYPH;
            };
            if cell.is_head() {
                initial.to_ascii_uppercase()
            } else {
                initial.to_ascii_lowercase()
            }
        }
    }
}

/// Text snapshot of the field at a given tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// Tick the snapshot was taken after.
    pub tick: u64,
    /// Whether the game was paused when the snapshot was taken.
    pub paused: bool,
    /// One string per field row, top to bottom.
    pub rows: Vec<String>,
}

impl Frame {
    /// Builds a frame from the field's cells in row-major order.
    #[must_use]
    pub fn from_cells(size: FieldSize, cells: &[Cell], tick: u64, paused: bool) -> Self {
        let rows = cells
            .chunks(size.width() as usize)
            .map(|row| row.iter().map(glyph).collect())
            .collect();
        Self { tick, paused, rows }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tick {}", self.tick)?;
        if self.paused {
            f.write_str(" (paused)")?;
        }
        for row in &self.rows {
            write!(f, "\n{row}")?;
        }
        Ok(())
    }
}

/// Backend capable of presenting cellsnake frames.
pub trait Presenter {
    /// Presents a single frame.
    fn present(&mut self, frame: &Frame) -> AnyResult<()>;
}

/// Presenter that prints frames as text to any writer.
#[derive(Debug)]
pub struct TextPresenter<W> {
    writer: W,
}

impl<W: Write> TextPresenter<W> {
    /// Creates a presenter that writes frames to `writer`.
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the presenter, returning the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn present(&mut self, frame: &Frame) -> AnyResult<()> {
        writeln!(self.writer, "{frame}\n").context("failed to write frame")?;
        self.writer.flush().context("failed to flush frame")
    }
}
