//! Weighted sampling and entropy arithmetic shared by the solver

use num_traits::Float;

/// Pick an index from a weight distribution using a single uniform draw
///
/// Walks the cumulative weights and returns the first positive-weight index
/// whose running sum reaches `draw * total`. Zero-weight entries are never
/// returned, so a draw of exactly zero still lands on a live entry.
/// Returns 0 when every weight is zero.
pub fn weighted_index<F: Float>(weights: &[F], draw: F) -> usize {
    let total = weights.iter().fold(F::zero(), |acc, &weight| acc + weight);
    let threshold = draw * total;

    let mut partial = F::zero();
    for (index, &weight) in weights.iter().enumerate() {
        partial = partial + weight;
        if weight > F::zero() && partial >= threshold {
            return index;
        }
    }

    weights
        .iter()
        .rposition(|&weight| weight > F::zero())
        .unwrap_or(0)
}

/// Contribution `w ln w` of a single weight to the entropy numerator
pub fn weight_log_weight<F: Float>(weight: F) -> F {
    weight * weight.ln()
}

/// Shannon entropy of a weighted set from its running sums
///
/// Computes `ln(S) - (Σ w ln w) / S`. An exhausted set (`S <= 0`) has zero entropy.
pub fn entropy_from_sums<F: Float>(sum_of_weights: F, sum_of_weight_log_weights: F) -> F {
    if sum_of_weights <= F::zero() {
        return F::zero();
    }
    sum_of_weights.ln() - sum_of_weight_log_weights / sum_of_weights
}

/// Shannon entropy of a weight list computed from scratch
pub fn entropy_of<F: Float>(weights: &[F]) -> F {
    let (sum, sum_log) = weights
        .iter()
        .filter(|&&weight| weight > F::zero())
        .fold((F::zero(), F::zero()), |(sum, sum_log), &weight| {
            (sum + weight, sum_log + weight_log_weight(weight))
        });
    entropy_from_sums(sum, sum_log)
}
