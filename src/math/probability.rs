use rand::Rng;

/// Draw an index with probability proportional to its integer weight
///
/// Uses an exact integer cumulative walk so a seeded generator reproduces the
/// same choice on every platform. Returns `None` when every weight is zero.
pub fn weighted_index<R: Rng + ?Sized>(rng: &mut R, weights: &[usize]) -> Option<usize> {
    let total: usize = weights.iter().sum();
    if total == 0 {
        return None;
    }

    let mut remaining = rng.random_range(0..total);
    for (index, &weight) in weights.iter().enumerate() {
        if remaining < weight {
            return Some(index);
        }
        remaining -= weight;
    }
    None
}

/// Shannon entropy (natural log) of a distribution given by integer weights
///
/// Zero weights contribute nothing; an all-zero input has zero entropy.
pub fn shannon_entropy<I>(weights: I) -> f64
where
    I: IntoIterator<Item = usize>,
{
    let weights: Vec<f64> = weights
        .into_iter()
        .filter(|&weight| weight > 0)
        .map(|weight| weight as f64)
        .collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 {
        return 0.0;
    }

    // H = ln(W) - sum(w ln w) / W
    let weighted_log_sum: f64 = weights.iter().map(|&weight| weight * weight.ln()).sum();
    total.ln() - weighted_log_sum / total
}
