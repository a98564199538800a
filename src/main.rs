use std::time::Instant;

use log::info;

use tour_route_core::{Result, TourOptions, logging, optimize_tour, read_waypoints, write_plan};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = TourOptions::from_args()?;
    logging::init_logger(&options)?;

    info!("options: {options}");

    let waypoints = read_waypoints(&options)?;
    let plan = optimize_tour(&waypoints, &options.request()?)?;
    write_plan(&plan, &options)?;

    info!(
        "output: n={} rejected={} time={:.2}s",
        plan.order.len(),
        plan.rejected.len(),
        now.elapsed().as_secs_f32()
    );
    if let Some(message) = &plan.message {
        log::warn!("output: {message}");
    }

    Ok(())
}
