//! Growing a set of points by adjacent shifts

use std::collections::BTreeSet;

use rand::Rng;

use super::point::ConfigurationSearchPoint;
use crate::error::{ConfigurationError, ConfigurationResult};

/// Extend `sources` to exactly `size` points by adjacent shifting.
///
/// Sources are visited round-robin, each contributing one neighbour per pass. When a
/// whole pass adds nothing, every point collected so far becomes a source, so that
/// neighbours of neighbours are reached. The result is a superset of `sources`.
pub fn make_extended_set_by_shifting<R: Rng + ?Sized>(
    sources: &BTreeSet<ConfigurationSearchPoint>,
    size: usize,
    rng: &mut R,
) -> ConfigurationResult<BTreeSet<ConfigurationSearchPoint>> {
    let first = sources.iter().next().ok_or_else(|| {
        ConfigurationError::InvalidArgument("at least one source point is required".to_string())
    })?;
    if size < sources.len() {
        return Err(ConfigurationError::InvalidArgument(format!(
            "cannot extend {} sources to only {} points",
            sources.len(),
            size
        )));
    }
    let total_points = first.space().total_points();
    if size > total_points {
        return Err(ConfigurationError::DegenerateSpace(format!(
            "{} points requested from a space of {} points",
            size, total_points
        )));
    }

    let mut expanded_sources = sources.clone();
    let mut result = sources.clone();
    while result.len() < size {
        let previous_size = result.len();
        for source in &expanded_sources {
            if result.len() >= size {
                break;
            }
            result.insert(source.make_adjacent_shifted(rng)?);
        }
        if result.len() == previous_size {
            log::trace!("no new point from {} sources, expanding", expanded_sources.len());
            expanded_sources.extend(result.iter().cloned());
        }
    }
    log::debug!("extended {} sources to {} points", sources.len(), result.len());
    Ok(result)
}
