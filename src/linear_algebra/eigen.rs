use super::matrix::{Matrix, MatrixError, Result};

// anything that can produce the real eigenvalues of a real symmetric matrix
// order of the returned values is unspecified
pub trait EigenSolver {
    fn eigenvalues(&self,matrix:&Matrix) -> Result<Vec<f64>>;
}

// cyclic jacobi rotations, annihilating off diagonal entries row by row
// until the off diagonal frobenius norm drops below tolerance*|A|
#[derive(Clone,Copy,Debug)]
pub struct JacobiEigenSolver {
    pub max_sweeps:usize,
    pub tolerance:f64,
    // input is rejected if |a(i,j) - a(j,i)| exceeds this
    pub symmetry_tolerance:f64
}

impl Default for JacobiEigenSolver {
    fn default() -> Self {
        Self {
            max_sweeps:100,
            tolerance:1e-14,
            symmetry_tolerance:1e-9
        }
    }
}

impl JacobiEigenSolver {
    pub fn new() -> Self {
        Self::default()
    }
}

fn off_diagonal_norm(a:&[f64],size:usize) -> f64 {
    let mut sum = 0.0;
    for p in 0..size {
        for q in p+1..size {
            let apq = a[p*size + q];
            sum += 2.0*apq*apq;
        }
    }
    sum.sqrt()
}

// rotates rows/columns p and q so that a(p,q) becomes zero
fn rotate(a:&mut [f64],size:usize,p:usize,q:usize) {
    let apq = a[p*size + q];
    if apq == 0.0 {
        return;
    }
    let app = a[p*size + p];
    let aqq = a[q*size + q];
    let theta = (aqq - app)/(2.0*apq);
    // smaller root of t^2 + 2*theta*t - 1 = 0, keeps the rotation angle below pi/4
    let t = theta.signum()/(theta.abs() + (theta*theta + 1.0).sqrt());
    let c = 1.0/(t*t + 1.0).sqrt();
    let s = t*c;

    // A*J
    for k in 0..size {
        let akp = a[k*size + p];
        let akq = a[k*size + q];
        a[k*size + p] = c*akp - s*akq;
        a[k*size + q] = s*akp + c*akq;
    }
    // J^T*(A*J)
    for k in 0..size {
        let apk = a[p*size + k];
        let aqk = a[q*size + k];
        a[p*size + k] = c*apk - s*aqk;
        a[q*size + k] = s*apk + c*aqk;
    }
    // exact zeros, rounding would leave ~1e-17 behind
    a[p*size + q] = 0.0;
    a[q*size + p] = 0.0;
}

impl EigenSolver for JacobiEigenSolver {
    fn eigenvalues(&self,matrix:&Matrix) -> Result<Vec<f64>> {
        if !matrix.is_square() {
            let (row,col) = matrix.dimension();
            return Err(MatrixError::NonSquareError { row, col })
        }
        matrix.check_finite()?;
        matrix.check_symmetric(self.symmetry_tolerance)?;
        if matrix.is_empty() {
            return Ok(vec![])
        }
        let (size,_) = matrix.dimension();
        let mut a = matrix.as_slice().to_vec();

        let scale = a.iter().map(|x| x*x).sum::<f64>().sqrt();
        let threshold = self.tolerance*scale.max(f64::MIN_POSITIVE);

        for _ in 0..self.max_sweeps {
            if off_diagonal_norm(&a, size) <= threshold {
                return Ok((0..size).map(|i| a[i*size + i]).collect())
            }
            for p in 0..size {
                for q in p+1..size {
                    rotate(&mut a, size, p, q);
                }
            }
        }
        if off_diagonal_norm(&a, size) <= threshold {
            return Ok((0..size).map(|i| a[i*size + i]).collect())
        }
        Err(MatrixError::NoConvergence { sweeps: self.max_sweeps })
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::{EigenSolver, JacobiEigenSolver};
    use crate::linear_algebra::matrix::{Matrix, MatrixError};

    fn sorted(mut v:Vec<f64>) -> Vec<f64> {
        v.sort_by(|a,b| a.total_cmp(b));
        v
    }

    #[test]
    fn test_diagonal() {
        let m = Matrix::from_rows(&[
            vec![3.0,0.0,0.0],
            vec![0.0,-1.0,0.0],
            vec![0.0,0.0,2.0],
        ]).unwrap();
        let values = sorted(JacobiEigenSolver::new().eigenvalues(&m).unwrap());
        assert_eq!(values,vec![-1.0,2.0,3.0]);
    }
    #[test]
    fn test_two_node_laplacian() {
        let m = Matrix::from_rows(&[vec![1.0,-1.0],vec![-1.0,1.0]]).unwrap();
        let values = sorted(JacobiEigenSolver::new().eigenvalues(&m).unwrap());
        assert!(values[0].abs() < 1e-12);
        assert!((values[1] - 2.0).abs() < 1e-12);
    }
    #[test]
    fn test_path_laplacian() {
        // path on 3 nodes has spectrum {0,1,3}
        let adjacency = Matrix::from_rows(&[
            vec![0.0,1.0,0.0],
            vec![1.0,0.0,1.0],
            vec![0.0,1.0,0.0],
        ]).unwrap();
        let values = sorted(JacobiEigenSolver::new().eigenvalues(&adjacency.laplacian().unwrap()).unwrap());
        for (got,want) in values.iter().zip([0.0,1.0,3.0]) {
            assert!((got - want).abs() < 1e-10,"got {got}, want {want}");
        }
    }
    #[test]
    fn test_random_symmetric_trace() {
        // eigenvalues sum to the trace and their squares sum to the frobenius norm
        let mut rng = rand::rng();
        let size:usize = rng.random_range(2..40);
        let m = Matrix::rand_symmetric(size, &mut rng);
        let values = JacobiEigenSolver::new().eigenvalues(&m).unwrap();
        assert_eq!(values.len(),size);
        let trace:f64 = m.diagonal().iter().sum();
        let sum:f64 = values.iter().sum();
        assert!((trace - sum).abs() < 1e-8*size as f64,"trace {trace} vs {sum}");
        let frobenius:f64 = (0..size).flat_map(|i| m.row(i).unwrap().to_vec()).map(|x| x*x).sum();
        let squares:f64 = values.iter().map(|x| x*x).sum();
        assert!((frobenius - squares).abs() < 1e-7*frobenius.max(1.0));
    }
    #[test]
    fn test_rejects_asymmetric() {
        let m = Matrix::from_rows(&[vec![0.0,1.0],vec![0.0,0.0]]).unwrap();
        let err = JacobiEigenSolver::new().eigenvalues(&m).unwrap_err();
        assert!(matches!(err,MatrixError::Asymmetric { .. }));
    }
    #[test]
    fn test_empty() {
        assert!(JacobiEigenSolver::new().eigenvalues(&Matrix::new()).unwrap().is_empty());
    }
}
