// summary figures over per-node and per-edge values
// an empty slice has deviation 0 and no max

pub fn sum(data:&[f64]) -> f64 {
    data.iter().sum()
}

// average |x - center|
pub fn mean_absolute_deviation(data:&[f64],center:f64) -> f64 {
    if data.is_empty() {
        return 0.0
    }
    data.iter().map(|x| (x - center).abs()).sum::<f64>()/data.len() as f64
}

pub fn l2_norm(data:&[f64]) -> f64 {
    data.iter().map(|x| x*x).sum::<f64>().sqrt()
}

pub fn max(data:&[f64]) -> Option<f64> {
    data.iter().copied().reduce(f64::max)
}
