//! VoronoiDiagram main structure and builder

use glam::DVec2;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::cell::VoronoiCell;
use crate::config::DiagramConfig;
use crate::error::Result;
use crate::extent::Extent;
use crate::generation::SiteContext;
use crate::progress::{CancelToken, NoProgress, ProgressSink};
use crate::sink::CellSink;
use crate::site::Site;

#[cfg(feature = "spatial-index")]
use crate::spatial::SpatialIndex;

/// How a build ended
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStatus {
    /// Every site was processed
    Complete,
    /// Cancellation stopped the build; the diagram holds the cells finished before
    Cancelled,
}

/// Result of the per-site pipeline
enum SiteOutcome {
    Emitted(Vec<DVec2>),
    Rejected,
    Skipped,
}

/// A complete planar Voronoi diagram
///
/// Generic over the site attribute type `A`, which is moved unchanged from
/// each site onto its cell. The diagram is immutable once built; cells are
/// stored in site order.
///
/// # Examples
///
/// ```
/// use radial_voronoi::*;
///
/// let sites = sites_from_records(vec![
///     (0.0, 0.0, "west"),
///     (10.0, 0.0, "east"),
///     (5.0, 10.0, "north"),
/// ]);
///
/// let diagram = VoronoiDiagram::build(sites, DiagramConfig::default()).unwrap();
/// assert_eq!(diagram.cell_count(), 3);
/// assert_eq!(diagram.status(), BuildStatus::Complete);
///
/// let cell = diagram.find_cell_containing(glam::DVec2::new(9.0, 1.0)).unwrap();
/// assert_eq!(cell.attributes, "east");
/// ```
#[derive(Clone)]
pub struct VoronoiDiagram<A> {
    /// Configuration used to build this diagram
    config: DiagramConfig,

    /// Bounding rectangle of the input sites
    extent: Extent,

    /// Distance of the fences outside the extent
    fence_offset: f64,

    /// Number of input sites
    site_count: usize,

    /// Emitted cells, in site order
    cells: Vec<VoronoiCell<A>>,

    /// Ids of sites whose cell was degenerate
    rejected: Vec<usize>,

    status: BuildStatus,

    /// Nearest-site index over the emitted cells (optional, requires spatial-index feature)
    #[cfg(feature = "spatial-index")]
    spatial_index: Option<SpatialIndex>,
}

impl<A> VoronoiDiagram<A> {
    /// Build a diagram without progress reporting or cancellation
    ///
    /// # Errors
    ///
    /// Returns `InsufficientInput` if fewer than three sites are given
    pub fn build(sites: Vec<Site<A>>, config: DiagramConfig) -> Result<Self> {
        Self::build_with(sites, config, &NoProgress, &CancelToken::new())
    }

    /// Build a diagram, reporting progress after every site
    ///
    /// The extent is computed once, then every site runs through constraint
    /// generation, the radial sweep and ring assembly, independently of the
    /// others. Sites whose ring collapses are skipped and recorded in
    /// [`VoronoiDiagram::rejected_sites`]. Cancellation is checked before each
    /// site; a cancelled build returns the cells finished so far with
    /// [`BuildStatus::Cancelled`].
    ///
    /// # Errors
    ///
    /// Returns `InsufficientInput` if fewer than three sites are given
    pub fn build_with<P>(
        sites: Vec<Site<A>>,
        config: DiagramConfig,
        progress: &P,
        cancel: &CancelToken,
    ) -> Result<Self>
    where
        P: ProgressSink + ?Sized,
    {
        let start = Instant::now();
        let total = sites.len();
        let positions: Vec<DVec2> = sites.iter().map(|s| s.position).collect();
        let context = SiteContext::new(&positions, &config)?;

        tracing::info!(
            sites = total,
            fence_offset = context.fence_offset,
            parallel = config.parallel,
            "building voronoi diagram"
        );

        let processed = AtomicUsize::new(0);
        let process = |index: usize| -> SiteOutcome {
            if cancel.is_cancelled() {
                return SiteOutcome::Skipped;
            }

            let outcome = match context.cell_ring(index) {
                Ok(ring) => SiteOutcome::Emitted(ring),
                Err(e) => {
                    tracing::debug!(site = index, error = %e, "site skipped");
                    SiteOutcome::Rejected
                }
            };

            let done = processed.fetch_add(1, Ordering::Relaxed) + 1;
            progress.report(done, total);
            outcome
        };

        let outcomes = run_sites(total, config.parallel, process);

        let mut cells = Vec::with_capacity(total);
        let mut rejected = Vec::new();
        let mut skipped = 0;
        for (site, outcome) in sites.into_iter().zip(outcomes) {
            match outcome {
                SiteOutcome::Emitted(ring) => {
                    cells.push(VoronoiCell::new(site.id, site.position, ring, site.attributes))
                }
                SiteOutcome::Rejected => rejected.push(site.id),
                SiteOutcome::Skipped => skipped += 1,
            }
        }

        let status = if skipped > 0 {
            BuildStatus::Cancelled
        } else {
            BuildStatus::Complete
        };

        tracing::info!(
            cells = cells.len(),
            rejected = rejected.len(),
            skipped,
            status = ?status,
            elapsed = ?start.elapsed(),
            "voronoi diagram built"
        );

        // Build spatial index (requires spatial-index feature)
        #[cfg(feature = "spatial-index")]
        let spatial_index = {
            let centers: Vec<DVec2> = cells.iter().map(|c| c.site).collect();
            SpatialIndex::new(&centers)
        };

        Ok(Self {
            config,
            extent: context.extent,
            fence_offset: context.fence_offset,
            site_count: total,
            cells,
            rejected,
            status,
            #[cfg(feature = "spatial-index")]
            spatial_index,
        })
    }

    /// Get the configuration used to build this diagram
    #[inline]
    pub fn config(&self) -> &DiagramConfig {
        &self.config
    }

    /// Bounding rectangle of the input sites
    #[inline]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// The rectangle enclosed by the fences; complete diagrams partition it
    #[inline]
    pub fn fenced_extent(&self) -> Extent {
        self.extent.expanded(self.fence_offset)
    }

    /// Number of input sites, emitted or not
    #[inline]
    pub fn site_count(&self) -> usize {
        self.site_count
    }

    /// Number of emitted cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn status(&self) -> BuildStatus {
        self.status
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.status == BuildStatus::Complete
    }

    /// Ids of the sites that produced a degenerate cell
    #[inline]
    pub fn rejected_sites(&self) -> &[usize] {
        &self.rejected
    }

    /// Get all cells as a slice, in site order
    #[inline]
    pub fn cells(&self) -> &[VoronoiCell<A>] {
        &self.cells
    }

    /// Consume the diagram, keeping only its cells
    pub fn into_cells(self) -> Vec<VoronoiCell<A>> {
        self.cells
    }

    /// Get a cell by its position in [`VoronoiDiagram::cells`]
    #[inline]
    pub fn get_cell(&self, index: usize) -> Option<&VoronoiCell<A>> {
        self.cells.get(index)
    }

    /// Get the cell of the first site with this id
    pub fn cell_for_site(&self, site_id: usize) -> Option<&VoronoiCell<A>> {
        self.cells.iter().find(|c| c.site_id == site_id)
    }

    /// Find the first cell whose polygon contains the point
    ///
    /// Linear scan over all cells.
    pub fn find_cell_containing(&self, point: DVec2) -> Option<&VoronoiCell<A>> {
        self.cells.iter().find(|c| c.contains(point))
    }

    /// Find the cell of the emitted site nearest to a position (requires spatial-index feature)
    ///
    /// For points inside the fenced extent this is the containing cell. Points
    /// outside the fences still map to their nearest site.
    #[cfg(feature = "spatial-index")]
    pub fn find_cell_at(&self, position: DVec2) -> Option<&VoronoiCell<A>> {
        let index = self.spatial_index.as_ref()?.find_nearest(position);
        self.cells.get(index)
    }

    /// Sum of all cell areas
    pub fn total_area(&self) -> f64 {
        self.cells.iter().map(|c| c.area()).sum()
    }

    /// Hand every cell to a sink, in site order
    ///
    /// Returns the number of cells written.
    pub fn emit_to<S>(&self, sink: &mut S) -> Result<usize>
    where
        S: CellSink<A> + ?Sized,
    {
        for cell in &self.cells {
            sink.accept(&cell.vertices, &cell.attributes)?;
        }
        Ok(self.cells.len())
    }
}

/// Run the per-site pipeline over every site index, keeping results in order
#[cfg(feature = "parallel")]
fn run_sites<F>(total: usize, parallel: bool, process: F) -> Vec<SiteOutcome>
where
    F: Fn(usize) -> SiteOutcome + Sync + Send,
{
    if parallel {
        (0..total).into_par_iter().map(process).collect()
    } else {
        (0..total).map(process).collect()
    }
}

/// Run the per-site pipeline over every site index, keeping results in order
#[cfg(not(feature = "parallel"))]
fn run_sites<F>(total: usize, _parallel: bool, process: F) -> Vec<SiteOutcome>
where
    F: Fn(usize) -> SiteOutcome,
{
    (0..total).map(process).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DiagramConfigBuilder;
    use crate::error::VoronoiError;
    use crate::site::sites_from_records;
    use std::sync::Mutex;

    fn triangle_sites() -> Vec<Site<&'static str>> {
        sites_from_records(vec![(0.0, 0.0, "a"), (10.0, 0.0, "b"), (5.0, 10.0, "c")])
    }

    fn grid_sites(n: usize) -> Vec<Site<usize>> {
        // Slightly sheared grid, so that no four sites are cocircular
        let mut sites = Vec::new();
        for i in 0..n {
            for j in 0..n {
                let id = sites.len();
                let x = i as f64 * 10.0 + j as f64 * 0.37;
                let y = j as f64 * 10.0 + (i * i) as f64 * 0.11;
                sites.push(Site::new(id, x, y, id));
            }
        }
        sites
    }

    fn sequential() -> DiagramConfig {
        DiagramConfigBuilder::new().parallel(false).build()
    }

    #[test]
    fn test_diagram_generation() {
        let diagram = VoronoiDiagram::build(triangle_sites(), DiagramConfig::default()).unwrap();

        assert_eq!(diagram.site_count(), 3);
        assert_eq!(diagram.cell_count(), 3);
        assert!(diagram.is_complete());
        assert!(diagram.rejected_sites().is_empty());

        let attributes: Vec<&str> = diagram.cells().iter().map(|c| c.attributes).collect();
        assert_eq!(attributes, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_insufficient_input() {
        let sites = sites_from_records(vec![(0.0, 0.0, ()), (1.0, 1.0, ())]);
        let result = VoronoiDiagram::build(sites, DiagramConfig::default());
        assert!(matches!(result, Err(VoronoiError::InsufficientInput { count: 2 })));

        let result = VoronoiDiagram::<()>::build(Vec::new(), DiagramConfig::default());
        assert!(matches!(result, Err(VoronoiError::InsufficientInput { count: 0 })));
    }

    #[test]
    fn test_fenced_extent_is_partitioned() {
        let diagram = VoronoiDiagram::build(triangle_sites(), DiagramConfig::default()).unwrap();

        let fenced = diagram.fenced_extent();
        assert!((fenced.area() - 10.2 * 10.2).abs() < 1e-9);
        assert!((diagram.total_area() - fenced.area()).abs() < 1e-9);
    }

    #[test]
    fn test_progress_reports_every_site() {
        let updates = Mutex::new(Vec::new());
        let progress = |processed: usize, total: usize| {
            updates.lock().unwrap().push((processed, total));
        };

        VoronoiDiagram::build_with(grid_sites(3), sequential(), &progress, &CancelToken::new()).unwrap();

        let updates = updates.into_inner().unwrap();
        let expected: Vec<(usize, usize)> = (1..=9).map(|i| (i, 9)).collect();
        assert_eq!(updates, expected);
    }

    #[test]
    fn test_parallel_progress_counts_every_site() {
        let updates = Mutex::new(Vec::new());
        let progress = |processed: usize, _total: usize| {
            updates.lock().unwrap().push(processed);
        };

        VoronoiDiagram::build_with(grid_sites(4), DiagramConfig::default(), &progress, &CancelToken::new())
            .unwrap();

        let mut updates = updates.into_inner().unwrap();
        updates.sort_unstable();
        assert_eq!(updates, (1..=16).collect::<Vec<usize>>());
    }

    #[test]
    fn test_cancelled_before_start() {
        let cancel = CancelToken::new();
        cancel.cancel();

        let diagram =
            VoronoiDiagram::build_with(grid_sites(3), DiagramConfig::default(), &NoProgress, &cancel).unwrap();

        assert_eq!(diagram.status(), BuildStatus::Cancelled);
        assert_eq!(diagram.cell_count(), 0);
        assert_eq!(diagram.site_count(), 9);
    }

    #[test]
    fn test_cancelled_midway_keeps_finished_cells() {
        let cancel = CancelToken::new();
        let progress = |processed: usize, _total: usize| {
            if processed == 4 {
                cancel.cancel();
            }
        };

        let diagram = VoronoiDiagram::build_with(grid_sites(3), sequential(), &progress, &cancel).unwrap();

        assert_eq!(diagram.status(), BuildStatus::Cancelled);
        assert_eq!(diagram.cell_count(), 4);
        let ids: Vec<usize> = diagram.cells().iter().map(|c| c.site_id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);

        // Finished cells are whole
        let complete = VoronoiDiagram::build(grid_sites(3), sequential()).unwrap();
        for (partial, full) in diagram.cells().iter().zip(complete.cells()) {
            assert_eq!(partial.vertices, full.vertices);
        }
    }

    #[test]
    fn test_degenerate_sites_are_rejected() {
        let sites = sites_from_records(vec![(2.0, 2.0, 'x'), (2.0, 2.0, 'y'), (2.0, 2.0, 'z')]);
        let diagram = VoronoiDiagram::build(sites, DiagramConfig::default()).unwrap();

        assert_eq!(diagram.cell_count(), 0);
        assert_eq!(diagram.rejected_sites(), &[0, 1, 2]);
        assert!(diagram.is_complete());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let parallel = VoronoiDiagram::build(grid_sites(5), DiagramConfig::default()).unwrap();
        let serial = VoronoiDiagram::build(grid_sites(5), sequential()).unwrap();

        assert_eq!(parallel.cells(), serial.cells());
    }

    #[test]
    fn test_cell_lookup() {
        let diagram = VoronoiDiagram::build(triangle_sites(), DiagramConfig::default()).unwrap();

        assert_eq!(diagram.cell_for_site(2).unwrap().attributes, "c");
        assert!(diagram.cell_for_site(99).is_none());
        assert!(diagram.get_cell(0).is_some());
        assert!(diagram.get_cell(diagram.cell_count()).is_none());

        let cell = diagram.find_cell_containing(DVec2::new(1.0, 1.0)).unwrap();
        assert_eq!(cell.attributes, "a");
        let cell = diagram.find_cell_containing(DVec2::new(5.0, 9.0)).unwrap();
        assert_eq!(cell.attributes, "c");
        assert!(diagram.find_cell_containing(DVec2::new(50.0, 50.0)).is_none());
    }

    #[cfg(feature = "spatial-index")]
    #[test]
    fn test_find_cell_at() {
        let diagram = VoronoiDiagram::build(grid_sites(4), DiagramConfig::default()).unwrap();

        for cell in diagram.cells() {
            let found = diagram.find_cell_at(cell.centroid()).unwrap();
            assert_eq!(found.site_id, cell.site_id);

            let scanned = diagram.find_cell_containing(cell.centroid()).unwrap();
            assert_eq!(scanned.site_id, cell.site_id);
        }
    }

    #[test]
    fn test_emit_to_vec_sink() {
        let diagram = VoronoiDiagram::build(triangle_sites(), DiagramConfig::default()).unwrap();

        let mut sink: Vec<(Vec<DVec2>, &str)> = Vec::new();
        let written = diagram.emit_to(&mut sink).unwrap();

        assert_eq!(written, 3);
        assert_eq!(sink[1].1, "b");
        assert_eq!(sink[1].0, diagram.cells()[1].vertices);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_build_status_serialization() {
        for status in [BuildStatus::Complete, BuildStatus::Cancelled] {
            let json = serde_json::to_string(&status).unwrap();
            let restored: BuildStatus = serde_json::from_str(&json).unwrap();
            assert_eq!(status, restored);
        }
    }
}
