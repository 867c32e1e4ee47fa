//! Era filter for recommendation candidates.
//!
//! A modern original (released in or after [`MODERN_ERA_START`]) only gets modern
//! recommendations with a known year. Older originals, or originals without a
//! release date, are left untouched.

use crate::models::{Axes, MovieSummary, MovieYear};

pub const MODERN_ERA_START: i32 = 2000;

/// Drops pre-modern and undated candidates from every axis when the original is modern
pub fn apply_year_filter(original_year: MovieYear, candidates: &mut Axes<MovieSummary>) {
    let Some(year) = original_year.known() else {
        return;
    };
    if year < MODERN_ERA_START {
        return;
    }

    let before = candidates.total_len();
    candidates.retain_all(|movie| {
        movie
            .year
            .known()
            .is_some_and(|candidate_year| candidate_year >= MODERN_ERA_START)
    });

    let removed = before - candidates.total_len();
    if removed > 0 {
        tracing::debug!(
            original_year = year,
            removed = removed,
            "Year filter removed pre-modern candidates"
        );
    }
}
