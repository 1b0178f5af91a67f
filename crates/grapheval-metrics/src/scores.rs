//! Scoring primitives: zero-safe precision/recall/F1 and multiset overlap.

use serde::Serialize;

/// `tp / (tp + fp)`, or `0.0` when the denominator is zero.
pub fn precision(tp: usize, fp: usize) -> f64 {
    if tp + fp > 0 {
        tp as f64 / (tp + fp) as f64
    } else {
        0.0
    }
}

/// `tp / (tp + fn)`, or `0.0` when the denominator is zero.
pub fn recall(tp: usize, fn_: usize) -> f64 {
    if tp + fn_ > 0 {
        tp as f64 / (tp + fn_) as f64
    } else {
        0.0
    }
}

/// Harmonic mean of precision and recall, or `0.0` when both are zero.
pub fn f1(tp: usize, fp: usize, fn_: usize) -> f64 {
    let p = precision(tp, fp);
    let r = recall(tp, fn_);
    if p + r > 0.0 {
        2.0 * p * r / (p + r)
    } else {
        0.0
    }
}

/// Arithmetic mean, `0.0` on empty input.
pub fn mean(scores: &[f64]) -> f64 {
    if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// Elements common to both sequences, respecting duplicates: for each
/// distinct value the result holds `min(count in a, count in b)` copies.
///
/// Sort + two-pointer merge scan, `O(n log n + m log m)`. This is not set
/// intersection: `[a, a, b]` vs `[a]` overlaps to one element, while
/// `[a, a]` vs `[a, a, a]` overlaps to two.
pub fn multiset_overlap<T: Ord + Clone>(a: &[T], b: &[T]) -> Vec<T> {
    let mut sorted_a: Vec<&T> = a.iter().collect();
    let mut sorted_b: Vec<&T> = b.iter().collect();
    sorted_a.sort();
    sorted_b.sort();

    let mut overlap = Vec::new();
    let mut i = 0;
    let mut j = 0;
    while i < sorted_a.len() && j < sorted_b.len() {
        match sorted_a[i].cmp(sorted_b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                overlap.push(sorted_a[i].clone());
                i += 1;
                j += 1;
            }
        }
    }
    overlap
}

/// A tp/fp/fn/tn count bundle with derived precision, recall and F1.
///
/// `tn` is always zero: no true-negative class is modeled for open-world
/// graph comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricRecord {
    pub tp: usize,
    pub fp: usize,
    #[serde(rename = "fn")]
    pub fn_: usize,
    pub tn: usize,
    pub p: f64,
    pub r: f64,
    pub f1: f64,
}

impl MetricRecord {
    pub fn from_counts(tp: usize, fp: usize, fn_: usize) -> Self {
        MetricRecord {
            tp,
            fp,
            fn_,
            tn: 0,
            p: precision(tp, fp),
            r: recall(tp, fn_),
            f1: f1(tp, fp, fn_),
        }
    }
}
