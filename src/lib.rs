//! Planar Voronoi diagrams by radial half-plane intersection
//!
//! Computes a bounded convex polygon for every input site such that every
//! location inside the polygon is closer to that site than to any other.
//! Each cell is built independently: the site's perpendicular bisectors and
//! four fence lines around the site extent are walked counter-clockwise,
//! starting from the closest one, until the walk closes.
//!
//! The construction is deliberately brute force (O(n³) overall) and keeps
//! each site's attribute payload attached to its cell.
//!
//! # Quick Start
//!
//! ```rust
//! use radial_voronoi::*;
//!
//! let sites = sites_from_records(vec![
//!     (0.0, 0.0, "a"),
//!     (10.0, 0.0, "b"),
//!     (5.0, 10.0, "c"),
//! ]);
//!
//! let diagram = VoronoiDiagram::build(sites, DiagramConfig::default()).unwrap();
//! for cell in diagram.cells() {
//!     println!("{}: {} vertices", cell.attributes, cell.vertex_count());
//! }
//! ```
//!
//! # Features
//!
//! - `parallel` (default): Runs the per-site pipeline on the rayon thread pool
//! - `spatial-index` (default): Enables O(log n) position-to-cell lookups using KD-tree
//! - `serde`: Enables serialization support for configuration, sites and cells

// Modules
pub mod error;
pub mod config;
pub mod site;
pub mod extent;
pub mod cell;
pub mod generation;
pub mod progress;
pub mod sink;
pub mod diagram;

#[cfg(feature = "spatial-index")]
pub mod spatial;

// Re-export core types for convenience
pub use error::{VoronoiError, Result};
pub use config::{DiagramConfig, DiagramConfigBuilder, DEFAULT_FENCE_OFFSET_RATIO};
pub use site::{Site, sites_from_records, sites_from_points};
pub use extent::{Extent, MIN_SITES};
pub use cell::VoronoiCell;
pub use diagram::{VoronoiDiagram, BuildStatus};
pub use progress::{ProgressSink, NoProgress, ChannelProgress, CancelToken};
pub use sink::{CellSink, WktWriter};
pub use generation::{LloydOptions, SiteContext};

#[cfg(feature = "spatial-index")]
pub use spatial::SpatialIndex;

// Re-export glam::DVec2 for convenience
pub use glam::DVec2;
