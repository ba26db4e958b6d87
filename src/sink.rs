//! Output sinks for emitted cells
//!
//! A sink receives every cell as a ring plus the originating site's
//! attributes and is responsible for persisting it in whatever format it
//! speaks.

use glam::DVec2;
use std::fmt::Display;
use std::io::Write;

use crate::error::Result;

/// Receiver of emitted cells
pub trait CellSink<A> {
    /// Accept one cell: an open counter-clockwise ring of at least three
    /// vertices and the site's attributes
    fn accept(&mut self, ring: &[DVec2], attributes: &A) -> Result<()>;
}

impl<A: Clone> CellSink<A> for Vec<(Vec<DVec2>, A)> {
    fn accept(&mut self, ring: &[DVec2], attributes: &A) -> Result<()> {
        self.push((ring.to_vec(), attributes.clone()));
        Ok(())
    }
}

/// Writes one tab-separated line per cell: the attributes, then a WKT polygon
///
/// ```text
/// 3	POLYGON ((0 0, 1 0, 1 1, 0 0))
/// ```
#[derive(Debug)]
pub struct WktWriter<W: Write> {
    writer: W,
    precision: Option<usize>,
}

impl<W: Write> WktWriter<W> {
    /// Write coordinates with their shortest round-trip representation
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            precision: None,
        }
    }

    /// Write coordinates with a fixed number of decimals
    pub fn with_precision(writer: W, precision: usize) -> Self {
        Self {
            writer,
            precision: Some(precision),
        }
    }

    /// Flush and return the underlying writer
    pub fn into_inner(mut self) -> Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }

    fn write_coordinate(&mut self, v: DVec2) -> Result<()> {
        match self.precision {
            Some(p) => write!(self.writer, "{:.*} {:.*}", p, v.x, p, v.y)?,
            None => write!(self.writer, "{} {}", v.x, v.y)?,
        }
        Ok(())
    }
}

impl<W: Write, A: Display> CellSink<A> for WktWriter<W> {
    fn accept(&mut self, ring: &[DVec2], attributes: &A) -> Result<()> {
        write!(self.writer, "{}\tPOLYGON ((", attributes)?;
        for (i, &vertex) in ring.iter().chain(ring.first()).enumerate() {
            if i > 0 {
                write!(self.writer, ", ")?;
            }
            self.write_coordinate(vertex)?;
        }
        writeln!(self.writer, "))")?;
        Ok(())
    }
}
