// Cryptoplex Analysis - Complexity versus market data
// Copyright (c) 2025 David Martin Venti
//
// Dual-licensed under AGPL-3.0 and Commercial License.
// See LICENSE file for details.

//! Mutual information between equal-width binned series.
//!
//! Each series is cut into `bins` right-closed intervals spanning its own
//! range, with the lowest edge moved down by 0.1% of the range so the
//! minimum falls inside the first bin. A constant series is given a range of
//! ±0.1% around its value (±0.001 around zero).

use crate::error::{AnalysisError, Result};
use nalgebra::DMatrix;

/// Bin edges for `bins` equal-width intervals over `values`.
///
/// `None` when no value is finite.
pub fn bin_edges(values: &[f64], bins: usize) -> Result<Option<Vec<f64>>> {
    if bins == 0 {
        return Err(AnalysisError::InvalidBins(bins));
    }
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let Some((mut lo, mut hi)) = finite.fold(None, |acc: Option<(f64, f64)>, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    }) else {
        return Ok(None);
    };

    let widen = |v: f64| if v == 0.0 { 0.001 } else { 0.001 * v.abs() };
    let constant = lo == hi;
    if constant {
        lo -= widen(lo);
        hi += widen(hi);
    }

    let step = (hi - lo) / bins as f64;
    let mut edges: Vec<f64> = (0..=bins)
        .map(|k| if k == bins { hi } else { lo + k as f64 * step })
        .collect();
    if !constant {
        edges[0] -= (hi - lo) * 0.001;
    }
    Ok(Some(edges))
}

/// Bin index of every value; `None` for non-finite values.
pub fn equal_width_bins(values: &[f64], bins: usize) -> Result<Vec<Option<usize>>> {
    let Some(edges) = bin_edges(values, bins)? else {
        return Ok(vec![None; values.len()]);
    };
    Ok(values
        .iter()
        .map(|v| {
            if !v.is_finite() {
                return None;
            }
            // first edge >= v closes the interval (edges[i-1], edges[i]]
            let i = edges.partition_point(|e| e < v);
            (1..=bins).contains(&i).then(|| i - 1)
        })
        .collect())
}

/// Mutual information (nats) between two label sequences of equal length.
///
/// `I = sum p_ij ln(p_ij / (p_i p_j))` over the contingency table,
/// clipped at zero.
pub fn mutual_information(x: &[usize], y: &[usize]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return 0.0;
    }
    let rows = x[..n].iter().max().map_or(0, |m| m + 1);
    let cols = y[..n].iter().max().map_or(0, |m| m + 1);

    let mut table = DMatrix::<f64>::zeros(rows, cols);
    for (i, j) in x[..n].iter().zip(&y[..n]) {
        table[(*i, *j)] += 1.0;
    }

    let total = n as f64;
    let row_sums: Vec<f64> = table.row_iter().map(|r| r.sum()).collect();
    let col_sums: Vec<f64> = table.column_iter().map(|c| c.sum()).collect();

    let mut mi = 0.0;
    for i in 0..rows {
        for j in 0..cols {
            let count = table[(i, j)];
            if count > 0.0 {
                let p_ij = count / total;
                mi += p_ij * (count * total / (row_sums[i] * col_sums[j])).ln();
            }
        }
    }
    mi.max(0.0)
}

/// Bin both series and return their mutual information.
///
/// Pairs where either value falls outside the bins are dropped.
pub fn binned_mutual_information(x: &[f64], y: &[f64], bins: usize) -> Result<f64> {
    let bx = equal_width_bins(x, bins)?;
    let by = equal_width_bins(y, bins)?;
    let (lx, ly): (Vec<usize>, Vec<usize>) = bx
        .into_iter()
        .zip(by)
        .filter_map(|(a, b)| Some((a?, b?)))
        .unzip();
    Ok(mutual_information(&lx, &ly))
}
