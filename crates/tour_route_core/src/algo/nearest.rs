//! Greedy nearest-unvisited-neighbor ordering.
//!
//! Starts at position 0 and repeatedly moves to the closest remaining point,
//! breaking distance ties toward the smaller position. O(n²) distance
//! evaluations. The result is a heuristic tour with no approximation
//! guarantee; [`super::two_opt`] can improve it afterwards.

use rayon::prelude::*;

use crate::{Result, algo::budget::Budget, geo::coord::LatLng, geo::distance::haversine_m};

const STAGE: &str = "optimizer";

#[derive(Clone, Copy, Debug)]
struct Candidate {
    slot: usize,
    pos: usize,
    dist: f64,
}

/// Strict total order on (distance, position); both reductions use it so the
/// sequential and parallel paths pick the same candidate.
fn closer(a: Candidate, b: Candidate) -> Candidate {
    match a.dist.total_cmp(&b.dist).then(a.pos.cmp(&b.pos)) {
        std::cmp::Ordering::Greater => b,
        _ => a,
    }
}

fn nearest_sequential(points: &[LatLng], from: LatLng, remaining: &[usize]) -> Option<Candidate> {
    remaining
        .iter()
        .enumerate()
        .map(|(slot, &pos)| Candidate {
            slot,
            pos,
            dist: haversine_m(from, points[pos]),
        })
        .reduce(closer)
}

fn nearest_parallel(points: &[LatLng], from: LatLng, remaining: &[usize]) -> Option<Candidate> {
    remaining
        .par_iter()
        .enumerate()
        .map(|(slot, &pos)| Candidate {
            slot,
            pos,
            dist: haversine_m(from, points[pos]),
        })
        .reduce_with(closer)
}

/// Orders every position of `points`, starting from position 0.
///
/// Steps whose remaining set holds at least `parallel_threshold` candidates
/// evaluate distances on the rayon pool.
#[tour_route_derive::timer("optimizer.greedy")]
pub(crate) fn greedy_order(
    points: &[LatLng],
    parallel_threshold: usize,
    budget: &Budget,
) -> Result<Vec<usize>> {
    let n = points.len();
    if n == 0 {
        return Ok(Vec::new());
    }

    let mut order = Vec::with_capacity(n);
    order.push(0);
    let mut remaining: Vec<usize> = (1..n).collect();
    let mut current = points[0];

    while !remaining.is_empty() {
        budget.check(STAGE)?;

        let best = if remaining.len() >= parallel_threshold.max(1) {
            nearest_parallel(points, current, &remaining)
        } else {
            nearest_sequential(points, current, &remaining)
        };
        let Some(best) = best else {
            break;
        };

        remaining.swap_remove(best.slot);
        order.push(best.pos);
        current = points[best.pos];
        log::trace!("{STAGE}: step={} pos={} dist_m={:.1}", order.len() - 1, best.pos, best.dist);
    }

    Ok(order)
}
