use crate::{
    Result,
    algo::budget::Budget,
    constants::TWO_OPT_IMPROVEMENT_EPSILON,
    geo::{coord::LatLng, distance::haversine_m},
};

const STAGE: &str = "optimizer.2opt";
const MIN_PATH_SIZE_FOR_2OPT: usize = 4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct TwoOptStats {
    pub(crate) passes: usize,
    pub(crate) swaps: usize,
}

/// Improves an open path in place by reversing sub-segments.
///
/// `path[0]` never moves. The last stop may change because a segment running
/// to the end of the path can be reversed without a closing edge.
#[tour_route_derive::timer("optimizer.2opt")]
pub(crate) fn two_opt_open(
    points: &[LatLng],
    path: &mut [usize],
    max_passes: usize,
    budget: &Budget,
) -> Result<TwoOptStats> {
    let n = path.len();
    let mut stats = TwoOptStats::default();
    if n < MIN_PATH_SIZE_FOR_2OPT || max_passes == 0 {
        log::debug!("{STAGE}: skip n={n} passes={max_passes} reason=insufficient_input");
        return Ok(stats);
    }

    let d = |a: usize, b: usize| haversine_m(points[a], points[b]);

    for pass_idx in 0..max_passes {
        budget.check(STAGE)?;
        stats.passes = pass_idx + 1;
        let mut pass_swaps = 0usize;

        for i in 0..n - 2 {
            for k in (i + 2)..n {
                let a = path[i];
                let b = path[i + 1];
                let c = path[k];

                let (cur_dist, new_dist) = if k + 1 < n {
                    let e = path[k + 1];
                    (d(a, b) + d(c, e), d(a, c) + d(b, e))
                } else {
                    (d(a, b), d(a, c))
                };

                if new_dist < cur_dist - TWO_OPT_IMPROVEMENT_EPSILON {
                    path[(i + 1)..=k].reverse();
                    pass_swaps += 1;
                }
            }
        }

        stats.swaps += pass_swaps;
        log::debug!("{STAGE}: pass={} swaps={pass_swaps}", pass_idx + 1);
        if pass_swaps == 0 {
            break;
        }
    }

    log::info!(
        "{STAGE}: complete n={n} passes={} swaps={}",
        stats.passes,
        stats.swaps
    );
    Ok(stats)
}
