use crate::types::{RawMovie, ScoredMovie};
use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

/// Merges per-provider rankings into one list, unique by title and sorted
/// by rating.
pub struct Reconciler;

impl Reconciler {
    pub fn reconcile(batches: Vec<Vec<RawMovie>>) -> Vec<ScoredMovie> {
        let mut movies = Self::score(batches);
        let scored = movies.len();

        Self::sort_by_rating(&mut movies);
        let reconciled = Self::deduplicate(movies);

        debug!(
            "Reconciled {} scored titles into {} unique titles",
            scored,
            reconciled.len()
        );
        reconciled
    }

    /// Flattens batches in provider order and attaches the numeric rating.
    pub fn score(batches: Vec<Vec<RawMovie>>) -> Vec<ScoredMovie> {
        batches
            .into_iter()
            .flatten()
            .map(|movie| ScoredMovie {
                rating_value: parse_rating(&movie.rating),
                title: movie.title,
                rating: movie.rating,
                provider_name: movie.provider_name,
            })
            .collect()
    }

    /// Stable, descending. Unparseable ratings go last.
    pub fn sort_by_rating(movies: &mut [ScoredMovie]) {
        movies.sort_by(|a, b| rating_order(b.rating_value, a.rating_value));
    }

    /// Keeps one record per exact title. A later record only replaces the
    /// kept one when its rating is strictly higher; the kept record stays at
    /// the position where its title was first seen.
    pub fn deduplicate(movies: Vec<ScoredMovie>) -> Vec<ScoredMovie> {
        let mut kept: Vec<ScoredMovie> = Vec::new();
        let mut positions: HashMap<String, usize> = HashMap::new();

        for movie in movies {
            match positions.get(&movie.title) {
                Some(&idx) => {
                    if rating_order(movie.rating_value, kept[idx].rating_value)
                        == Ordering::Greater
                    {
                        kept[idx] = movie;
                    }
                }
                None => {
                    positions.insert(movie.title.clone(), kept.len());
                    kept.push(movie);
                }
            }
        }

        kept
    }
}

/// Parses a comma-decimal rating such as `8,5`. Reads the longest leading
/// number after the first comma is replaced by a period; `NaN` when there
/// is none.
pub fn parse_rating(text: &str) -> f64 {
    let normalized = text.replacen(',', ".", 1);
    let trimmed = normalized.trim_start();
    let number = leading_number(trimmed);

    number.parse::<f64>().unwrap_or(f64::NAN)
}

fn leading_number(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = if digits > 0 { frac_end } else { end };
    }

    if digits == 0 {
        return "";
    }

    // Exponent only counts when followed by at least one digit.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    &text[..end]
}

/// Total order over ratings with `NaN` below every number.
pub fn rating_order(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}
