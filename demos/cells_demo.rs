//! Complete workflow demonstration for voronoi_cells
//!
//! Run with `RUST_LOG=debug` to see per-phase timings.

use voronoi_cells::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("=== voronoi_cells Complete Demo ===\n");

    // Step 1: Configure sketch
    println!("Step 1: Configuring sketch...");
    let config = SketchConfigBuilder::new()
        .seed(12345)
        .preset(SketchPreset::CellsWalkers)
        .lloyd_iterations(2)?
        .build()?;

    println!("  Seed: {}", config.seed);
    println!(
        "  Preset: {} ({}x{}, {} sites)",
        config.preset.name(),
        config.width(),
        config.height(),
        config.point_count()
    );
    println!("  Style: {:?}", config.cell_style);

    // Step 2: Generate sketch
    println!("\nStep 2: Generating sketch...");
    let sketch = Sketch::generate(config)?;
    println!("  Sites: {}", sketch.sites().len());
    println!("  Triangles: {}", sketch.triangles().len());
    println!("  Voronoi edges: {}", sketch.voronoi_edges().len());
    println!("  Closed cells: {}", sketch.cell_count());

    // Step 3: Cell statistics
    println!("\nStep 3: Cell statistics:");
    if sketch.cell_count() > 0 {
        let total_area: f64 = sketch.cells().iter().map(|c| c.area()).sum();
        let mean_corners = sketch.cells().iter().map(|c| c.vertex_count()).sum::<usize>() as f64
            / sketch.cell_count() as f64;
        println!("  Covered area: {:.1}", total_area);
        println!("  Mean corners per cell: {:.2}", mean_corners);
    }

    // Step 4: Texture
    println!("\nStep 4: Texture:");
    let strokes: usize = sketch.textures().iter().map(|t| t.strokes.len()).sum();
    let curves: usize = sketch.textures().iter().map(|t| t.outline.curves.len()).sum();
    println!("  Rounded corners: {}", curves);
    println!("  Walker strokes: {}", strokes);

    // Step 5: Query spatial index
    #[cfg(feature = "spatial-index")]
    {
        println!("\nStep 5: Spatial queries:");
        let center = Point::new(config.width() / 2.0, config.height() / 2.0);
        match sketch.find_cell_at(center) {
            Some(cell) => {
                println!("  ({}, {}) -> Cell {}", center.x, center.y, cell.id);
                println!("  Cell has {} neighbors", cell.neighbor_count());
                let nearby = sketch.find_cells_within_radius(cell.id, 2)?;
                println!("  {} cells within 2 hops", nearby.len());
            }
            None => println!("  ({}, {}) lies in an open region", center.x, center.y),
        }
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
