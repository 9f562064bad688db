//! Section Field Example - Tapered Box Girder

use section_field::prelude::*;

/// Closed rectangular box centred on the origin, encoded as one slit ring
fn box_ring(name: &str, width: f64, depth: f64, t: f64) -> SectionResult<Polygon> {
    let (bx, by) = (width / 2.0, depth / 2.0);
    let (ix, iy) = (bx - t, by - t);
    let vertices = vec![
        Point::new(-bx, -by),
        Point::new(bx, -by),
        Point::new(bx, by),
        Point::new(-bx, by),
        Point::new(-bx, -by),
        Point::new(-ix, -iy),
        Point::new(-ix, iy),
        Point::new(ix, iy),
        Point::new(ix, -iy),
        Point::new(-ix, -iy),
    ];
    Ok(Polygon::new(name, vertices, 1.0)?.with_cell(Thickness::Explicit(t)))
}

/// Cantilever fins welded under the bottom flange
fn fin(name: &str, x: f64, depth: f64, height: f64, t: f64) -> SectionResult<Polygon> {
    Ok(Polygon::rectangle(name, x - t / 2.0, -depth / 2.0 - height, t, height, 1.0)?.with_wall(Thickness::Explicit(t)))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== Section Field Example: Tapered Box Girder ===\n");

    // Box 1.2 m wide, 2.0 m deep at the support, 1.2 m deep at midspan
    //
    //   z = 0            z = 30
    //   +--------+       +--------+
    //   |  +--+  |       | +----+ |
    //   |  |  |  |       | +----+ |
    //   |  +--+  |       +--------+
    //   +--------+          |  |
    //     |    |
    let width = 1.2;
    let t = 0.04;
    let (d0, d1) = (2.0, 1.2);
    let (z0, z1) = (0.0, 30.0);

    let start = Section::new(
        z0,
        vec![
            box_ring("box", width, d0, t)?,
            fin("fin_l", -0.4, d0, 0.3, 0.02)?,
            fin("fin_r", 0.4, d0, 0.3, 0.02)?,
        ],
    )?;
    let end = Section::new(
        z1,
        vec![
            box_ring("box", width, d1, t)?,
            fin("fin_l", -0.4, d1, 0.15, 0.02)?,
            fin("fin_r", 0.4, d1, 0.15, 0.02)?,
        ],
    )?;

    let mut field = ContinuousSectionField::new(start, end)?;

    // Fins lose effectiveness towards midspan
    field.set_weight_laws(&[
        "fin_l,fin_l : w0 * (1 - 0.3 * z / L)",
        "fin_r,fin_r : w0 * (1 - 0.3 * z / L)",
    ])?;

    let options = AnalysisOptions::default().with_e_ref(210e9);

    println!("Stations:");
    println!(
        "{:>8} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "z [m]", "A [m2]", "Cy [m]", "Ix [m4]", "J_cell [m4]", "Q_na [m3]"
    );
    for section in field.stations(7)? {
        let result = full_analysis(&section, &options)?;
        println!(
            "{:>8.2} {:>12.5e} {:>12.4} {:>12.5e} {:>12.5e} {:>12.5e}",
            section.z(),
            result.get(AnalysisKey::Area),
            result.get(AnalysisKey::CentroidY),
            result.get(AnalysisKey::Ixx),
            result.get(AnalysisKey::JCell),
            result.get(AnalysisKey::QNeutralAxis),
        );
        for warning in &result.warnings {
            println!("         warning: {warning}");
        }
    }

    let mid = field.full_analysis_at(15.0, &options)?;
    mid.print_summary();

    let k = centroidal_stiffness_matrix(&field.section(15.0)?, &options)?;
    println!("\nCentroidal stiffness at z = 15 m [N, N·m, N·m²]:");
    for row in k.row_iter() {
        println!("  [{:>12.4e} {:>12.4e} {:>12.4e}]", row[0], row[1], row[2]);
    }

    let steel_volume = integrate_volume(&field, &QuadratureSpec::gauss_legendre(4), &AnalysisOptions::default())?;
    println!("Steel volume: {:.4} m3 ({:.1} t at 7850 kg/m3)", steel_volume, steel_volume * 7.85);

    println!("\n=== Example Complete ===");
    Ok(())
}
