//! Example: Build a Voronoi diagram from random sites
//!
//! Demonstrates the basic pipeline: random sites, optional Lloyd relaxation,
//! a parallel build reporting progress over a channel, and WKT output.

use std::io;
use std::thread;

use radial_voronoi::generation::{generate_random_points, lloyd_relaxation};
use radial_voronoi::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("Radial Voronoi Diagram Example");
    println!("==============================\n");

    let extent = Extent::new(DVec2::ZERO, DVec2::new(200.0, 100.0));
    let config = DiagramConfigBuilder::new()
        .duplicate_vertex_epsilon(1e-9)?
        .build();

    let points = generate_random_points(150, &extent, 42);
    let points = lloyd_relaxation(points, &config, 2)?;

    // Build on a worker thread and follow progress from here
    let (sender, receiver) = crossbeam_channel::unbounded();
    let sites = sites_from_points(&points);
    let worker = thread::spawn(move || {
        VoronoiDiagram::build_with(sites, config, &ChannelProgress(sender), &CancelToken::new())
    });

    let mut last = 0;
    for (processed, total) in receiver {
        if processed * 4 / total > last {
            last = processed * 4 / total;
            println!("  {}/{} sites", processed, total);
        }
    }

    let diagram = match worker.join() {
        Ok(result) => result?,
        Err(_) => {
            eprintln!("diagram worker panicked");
            return Ok(());
        }
    };

    let total_vertices: usize = diagram.cells().iter().map(|c| c.vertex_count()).sum();
    println!("\nStatistics:");
    println!("  Cells: {} of {} sites", diagram.cell_count(), diagram.site_count());
    println!("  Rejected: {:?}", diagram.rejected_sites());
    println!(
        "  Average vertices per cell: {:.2}",
        total_vertices as f64 / diagram.cell_count().max(1) as f64
    );
    println!(
        "  Covered area: {:.3} of {:.3}",
        diagram.total_area(),
        diagram.fenced_extent().area()
    );

    if let Some(cell) = diagram.find_cell_containing(DVec2::new(100.0, 50.0)) {
        println!("  Cell at (100, 50): site #{}", cell.site_id);
    }

    println!("\nFirst cells as WKT:");
    let mut writer = WktWriter::with_precision(io::stdout().lock(), 3);
    for cell in diagram.cells().iter().take(5) {
        writer.accept(&cell.vertices, &cell.attributes)?;
    }
    writer.into_inner()?;

    Ok(())
}
