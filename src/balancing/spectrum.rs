use tracing::debug;

use crate::linear_algebra::eigen::EigenSolver;
use crate::linear_algebra::matrix::{Matrix, Result};

pub const DEFAULT_EIGENVALUE_DIGITS:i32 = 9;

// only meant for reasonably small numbers, value*10^digits must stay finite
pub fn round(value:f64,digits:i32) -> f64 {
    let scale = 10f64.powi(digits);
    let rounded = (value*scale).round()/scale;
    // -0.0 and 0.0 are the same eigenvalue
    if rounded == 0.0 {0.0} else {rounded}
}

// rounds to `digits`, drops duplicates and zeros, sorts ascending
pub fn distinct_nonzero(values:&[f64],digits:i32) -> Vec<f64> {
    let mut distinct:Vec<f64> = values.iter()
        .map(|v| round(*v, digits))
        .filter(|v| *v != 0.0)
        .collect();
    distinct.sort_by(|a,b| a.total_cmp(b));
    distinct.dedup();
    distinct
}

// center first, then alternating sides outwards
// even counts step down first (2,1,3,0), odd counts step up first (1,2,0)
pub fn center_out_order<T:Copy>(sorted:&[T]) -> Vec<T> {
    let count = sorted.len() as isize;
    let half = count/2;
    let mut divider:isize = if count%2 == 0 {2} else {-2};
    let mut result = Vec::with_capacity(sorted.len());
    for i in 0..count {
        let index = half + (i + 1)/divider;
        debug_assert!(index >= 0 && index < count);
        result.push(sorted[index as usize]);
        divider = -divider;
    }
    result
}

// the eigenvalues driving the diffusion rounds, one round each
#[derive(Clone,Debug,PartialEq)]
pub struct Schedule {
    eigenvalues:Vec<f64>
}

impl Schedule {
    pub fn from_eigenvalues(values:&[f64],digits:i32) -> Self {
        let sorted = distinct_nonzero(values, digits);
        Self { eigenvalues: center_out_order(&sorted) }
    }
    pub fn from_laplacian<S:EigenSolver + ?Sized>(laplacian:&Matrix,solver:&S,digits:i32) -> Result<Self> {
        let values = solver.eigenvalues(laplacian)?;
        let schedule = Self::from_eigenvalues(&values, digits);
        debug!(raw = values.len(), distinct = schedule.len(), "laplacian spectrum computed");
        Ok(schedule)
    }
    pub fn from_adjacency<S:EigenSolver + ?Sized>(adjacency:&Matrix,solver:&S,digits:i32) -> Result<Self> {
        Self::from_laplacian(&adjacency.laplacian()?, solver, digits)
    }
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }
    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }
    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::{center_out_order, distinct_nonzero, round, Schedule};
    use crate::linear_algebra::eigen::JacobiEigenSolver;
    use crate::linear_algebra::matrix::Matrix;

    #[test]
    fn test_round() {
        assert_eq!(round(1.0000000001, 9),1.0);
        assert_eq!(round(2.0000000004, 9),2.0);
        assert_eq!(round(0.1234567891, 3),0.123);
        assert!(round(-1e-15, 9).is_sign_positive());
    }
    #[test]
    fn test_distinct_nonzero() {
        let values = [3.0,0.0,-1e-14,1.0,3.0000000000001,1e-13,2.0];
        assert_eq!(distinct_nonzero(&values, 9),vec![1.0,2.0,3.0]);
        assert!(distinct_nonzero(&[0.0,0.0,-0.0], 9).is_empty());
    }
    #[test]
    fn test_small_orders() {
        assert_eq!(center_out_order(&[0]),vec![0]);
        assert_eq!(center_out_order(&[0,1]),vec![1,0]);
        assert_eq!(center_out_order(&[0,1,2]),vec![1,2,0]);
        assert_eq!(center_out_order(&[0,1,2,3]),vec![2,1,3,0]);
        assert_eq!(center_out_order(&[0,1,2,3,4]),vec![2,3,1,4,0]);
        assert!(center_out_order::<usize>(&[]).is_empty());
    }
    #[test]
    fn test_order_is_alternating_permutation() {
        let mut rng = rand::rng();
        for n in 1..200usize {
            let indices:Vec<usize> = (0..n).collect();
            let order = center_out_order(&indices);
            let mut seen = order.clone();
            seen.sort_unstable();
            assert_eq!(seen,indices,"n = {n} is not a permutation");
            assert!(order[0] == n/2 || order[0] + 1 == n/2,"n = {n} starts at {}",order[0]);
            // strictly alternating around the start
            for w in order.windows(3) {
                let first = w[1] as isize - w[0] as isize;
                let second = w[2] as isize - w[1] as isize;
                assert!(first.signum() == -second.signum(),"n = {n}: {w:?}");
            }
            // same shape for arbitrary sorted values
            let mut values:Vec<f64> = (0..n).map(|_| rng.random_range(0.0..100.0)).collect();
            values.sort_by(|a,b| a.total_cmp(b));
            let reordered = center_out_order(&values);
            let expected:Vec<f64> = order.iter().map(|i| values[*i]).collect();
            assert_eq!(reordered,expected);
        }
    }
    #[test]
    fn test_schedule_complete_graph() {
        // K4 laplacian spectrum is {0,4,4,4}
        let mut rows = vec![vec![1.0;4];4];
        for i in 0..4 {rows[i][i] = 0.0}
        let adjacency = Matrix::from_rows(&rows).unwrap();
        let schedule = Schedule::from_adjacency(&adjacency, &JacobiEigenSolver::new(), 9).unwrap();
        assert_eq!(schedule.eigenvalues(),&[4.0]);
    }
    #[test]
    fn test_schedule_disconnected() {
        // two separate edges, spectrum {0,0,2,2}
        let adjacency = Matrix::from_rows(&[
            vec![0.0,1.0,0.0,0.0],
            vec![1.0,0.0,0.0,0.0],
            vec![0.0,0.0,0.0,1.0],
            vec![0.0,0.0,1.0,0.0],
        ]).unwrap();
        let schedule = Schedule::from_adjacency(&adjacency, &JacobiEigenSolver::new(), 9).unwrap();
        assert_eq!(schedule.eigenvalues(),&[2.0]);
    }
    #[test]
    fn test_schedule_path() {
        // path on 4 nodes: 2-sqrt2, 2, 2+sqrt2 reordered around the median
        let adjacency = Matrix::from_rows(&[
            vec![0.0,1.0,0.0,0.0],
            vec![1.0,0.0,1.0,0.0],
            vec![0.0,1.0,0.0,1.0],
            vec![0.0,0.0,1.0,0.0],
        ]).unwrap();
        let schedule = Schedule::from_adjacency(&adjacency, &JacobiEigenSolver::new(), 9).unwrap();
        assert_eq!(schedule.len(),3);
        let expected = [2.0,2.0 + 2f64.sqrt(),2.0 - 2f64.sqrt()];
        for (got,want) in schedule.eigenvalues().iter().zip(expected) {
            assert!((got - want).abs() < 1e-8,"got {got}, want {want}");
        }
    }
}
