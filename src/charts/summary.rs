//! Chart Summary Module
//! Group counts behind the bar, pie and line charts.

use crate::data::{column_text, COURSE_COL, STATUS_COL, YEAR_COL};
use polars::prelude::DataFrame;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::f64::consts::TAU;

/// Aggregated counts for one filtered data set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartSummary {
    /// Admissions per course, most frequent first
    pub by_course: Vec<(String, usize)>,
    /// Admissions per status, most frequent first
    pub by_status: Vec<(String, usize)>,
    /// Admissions per year, ascending year
    pub by_year: Vec<(String, usize)>,
    pub total: usize,
}

impl ChartSummary {
    pub fn from_frame(df: &DataFrame) -> Self {
        let courses = column_text(df, COURSE_COL);
        let statuses = column_text(df, STATUS_COL);
        let years = column_text(df, YEAR_COL);

        let mut by_year = count_values(&years);
        sort_years(&mut by_year);

        Self {
            by_course: value_counts(&courses),
            by_status: value_counts(&statuses),
            by_year,
            total: df.height(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

/// Counts in first-appearance order. Nulls are not counted.
fn count_values(values: &[Option<String>]) -> Vec<(String, usize)> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for value in values.iter().flatten() {
        match index.get(value.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(value.as_str(), counts.len());
                counts.push((value.clone(), 1));
            }
        }
    }
    counts
}

/// Counts sorted by descending frequency; ties keep first appearance.
pub fn value_counts(values: &[Option<String>]) -> Vec<(String, usize)> {
    let mut counts = count_values(values);
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Numeric order when every year parses as a number, lexical otherwise.
fn sort_years(counts: &mut [(String, usize)]) {
    let all_numeric = counts.iter().all(|(y, _)| y.trim().parse::<f64>().is_ok());

    if all_numeric {
        counts.sort_by(|a, b| {
            let x = a.0.trim().parse::<f64>().unwrap_or(f64::NAN);
            let y = b.0.trim().parse::<f64>().unwrap_or(f64::NAN);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        });
    } else {
        counts.sort_by(|a, b| a.0.cmp(&b.0));
    }
}

/// One wedge of the status pie. Angles are in radians, counter-clockwise
/// from the positive x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    pub fraction: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSlice {
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    /// Percentage label, e.g. "42.9%".
    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }
}

/// Lay out contiguous pie wedges starting at angle 0.
pub fn pie_slices(counts: &[(String, usize)]) -> Vec<PieSlice> {
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut angle = 0.0;
    counts
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(label, n)| {
            let fraction = *n as f64 / total as f64;
            let start = angle;
            angle += fraction * TAU;
            PieSlice {
                label: label.clone(),
                count: *n,
                fraction,
                start_angle: start,
                end_angle: angle,
            }
        })
        .collect()
}
