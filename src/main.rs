use std::{
    fs::File,
    io::{self, BufWriter, Write},
    time::Instant,
};

use log::info;

use tour_core::{Result, Tour, TourMetrics, TourOptions, logging, read_points};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = TourOptions::from_args()?;
    logging::init_logger(&options)?;
    info!("options: {options}");

    let points = read_points(&options)?;
    info!("input: n={} heuristic={}", points.len(), options.heuristic);

    let tour = Tour::from_points(options.heuristic, points);

    let mut out: Box<dyn Write> = match options.output_path() {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    write!(out, "{tour}")?;
    out.flush()?;

    info!(
        "output: n={} length={:.4} time={:.2}s",
        tour.size(),
        tour.length(),
        now.elapsed().as_secs_f32()
    );
    TourMetrics::from_tour(&tour, options.outlier_factor);

    Ok(())
}
