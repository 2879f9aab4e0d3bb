use rand::Rng;
use thiserror::Error;

#[derive(Error,Debug)]
pub enum MatrixError {
    #[error("Matrix size is:{matrix_size:?},but index at {accessed_index:?} was accessed")]
    IndexOutOfBounds{matrix_size:(usize,usize),accessed_index:(usize,usize)},
    #[error("This operation (laplacian, eigenvalues) requires ({row},{col}) to be square, which isn't")]
    NonSquareError{row:usize,col:usize},
    #[error("attempted to create {row}*{col} matrix from vector/iterator with length {len}")]
    SizeMisMatch{row:usize,col:usize,len:usize},
    #[error("Matrix is not symmetric: ({row},{col}) is {upper} but ({col},{row}) is {lower}")]
    Asymmetric{row:usize,col:usize,upper:f64,lower:f64},
    #[error("Matrix entry ({row},{col}) is not a finite number: {value}")]
    NonFinite{row:usize,col:usize,value:f64},
    #[error("Eigenvalue iteration did not converge after {sweeps} sweeps")]
    NoConvergence{sweeps:usize}
}

pub type Result<T> = std::result::Result<T,MatrixError>;

// A double precision matrix, row major order
// which means rows are stored continuously
#[derive(Clone,Debug,PartialEq)]
pub struct Matrix {
    row_count:usize,
    col_count:usize,
    //row*col must equal elements.len()
    // otherwise invariants are broken, panics allowed
    elements:Vec<f64>
}

impl Default for Matrix {
    fn default() -> Self {
        Self {
            row_count:0,
            col_count:0,
            elements:vec![]
        }
    }
}

//public implementations
impl Matrix {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn new_with_vec(v:Vec<f64>,row:usize,col:usize) -> Result<Self> {
        if row*col > v.len() {
            return Err(MatrixError::SizeMisMatch { row, col,len: v.len() })
        }
        if row*col == 0 {
            return Ok(Self::default())
        }
        let mut v = v;
        v.truncate(row*col);
        debug_assert_eq!(row*col,v.len());
        Ok(Self { row_count: row, col_count: col, elements: v })
    }
    // every row must have the same length
    pub fn from_rows(rows:&[Vec<f64>]) -> Result<Self> {
        let row = rows.len();
        let col = rows.first().map(|r| r.len()).unwrap_or(0);
        let mut v = Vec::with_capacity(row*col);
        for r in rows {
            if r.len() != col {
                return Err(MatrixError::SizeMisMatch { row, col, len: v.len() + r.len() })
            }
            v.extend_from_slice(r);
        }
        Self::new_with_vec(v, row, col)
    }
    fn get_unchecked(&self,row:usize,col:usize) -> f64 {
        self.elements[row*self.col_count + col]
    }
    pub fn get(&self,row:usize,col:usize) -> Result<f64> {
        debug_assert_eq!(self.row_count*self.col_count,self.elements.len());
        let out_of_bounds = MatrixError::IndexOutOfBounds { matrix_size:
            (self.row_count,self.col_count),
            accessed_index: (row,col)
        };
        if row >= self.row_count || col >= self.col_count {
            return Err(out_of_bounds)
        }
        self.elements.get(row*self.col_count + col).map(|n| *n).ok_or(out_of_bounds)
    }
    pub fn get_mut(&mut self,row:usize,col:usize) -> Result<&mut f64> {
        debug_assert_eq!(self.row_count*self.col_count,self.elements.len());
        let out_of_bounds = MatrixError::IndexOutOfBounds { matrix_size:
            (self.row_count,self.col_count),
            accessed_index: (row,col)
        };
        if row >= self.row_count || col >= self.col_count {
            return Err(out_of_bounds)
        }
        self.elements.get_mut(row*self.col_count + col).ok_or(out_of_bounds)
    }
    pub fn zeros(row:usize,col:usize) -> Self {
        if row*col == 0 {
            return Self::default()
        }
        Self {
            row_count:row,
            col_count:col,
            elements:vec![0.0;row*col]
        }
    }
    // 0-1 rand
    pub fn rand<T:Rng>(row:usize,col:usize,rng:&mut T) -> Self {
        if row*col == 0 {
            return Self::default()
        }
        let mut dest = Vec::with_capacity(row*col);
        for _ in 0..row*col {
            dest.push(rng.random_range(0.0..=1.0));
        }
        debug_assert_eq!(dest.len(),row*col);
        Self {
            row_count:row,
            col_count:col,
            elements:dest
        }
    }
    // m + m^T, always symmetric
    pub fn rand_symmetric<T:Rng>(size:usize,rng:&mut T) -> Self {
        let m = Self::rand(size, size, rng);
        let t = m.transpose();
        let elements = m.elements.iter().zip(t.elements.iter()).map(|(a,b)| a+b).collect();
        Self { row_count: m.row_count, col_count: m.col_count, elements }
    }

    pub fn is_empty(&self) -> bool {
        self.col_count == 0 || self.row_count == 0 || self.elements.is_empty()
    }

    pub fn dimension(&self) -> (usize,usize) {
        if self.is_empty() {return (0,0)}
        (self.row_count,self.col_count)
    }

    pub fn is_square(&self) -> bool {
        self.row_count == self.col_count
    }

    pub fn row(&self,row:usize) -> Option<&[f64]> {
        if row >= self.row_count {return None}
        let start = row*self.col_count;
        self.elements.get(start..start + self.col_count)
    }

    pub fn diagonal(&self) -> Vec<f64> {
        let size = self.row_count.min(self.col_count);
        (0..size).map(|i| self.get_unchecked(i, i)).collect()
    }

    pub fn transpose(&self) -> Self {
        let t_row = self.col_count;
        let t_col = self.row_count;

        let mut new_vec = Vec::with_capacity(t_col*t_row);

        for index in 0..(t_col*t_row) {
            // index in new matrix is j*t_col + i;
            let j = index/t_col;
            let i = index%t_col;
            new_vec.push(self.get_unchecked(i,j))
        }

        Self {
            row_count:t_row,
            col_count:t_col,
            elements:new_vec
        }
    }

    pub fn check_finite(&self) -> Result<()> {
        for (index,value) in self.elements.iter().enumerate() {
            if !value.is_finite() {
                return Err(MatrixError::NonFinite {
                    row: index/self.col_count,
                    col: index%self.col_count,
                    value: *value
                })
            }
        }
        Ok(())
    }

    // compares (i,j) against (j,i) with absolute tolerance
    pub fn check_symmetric(&self,tolerance:f64) -> Result<()> {
        if !self.is_square() {
            return Err(MatrixError::NonSquareError { row: self.row_count, col: self.col_count })
        }
        for i in 0..self.row_count {
            for j in i+1..self.col_count {
                let upper = self.get_unchecked(i, j);
                let lower = self.get_unchecked(j, i);
                if (upper - lower).abs() > tolerance {
                    return Err(MatrixError::Asymmetric { row: i, col: j, upper, lower })
                }
            }
        }
        Ok(())
    }

    // graph laplacian of an adjacency matrix
    // off diagonal: -adjacency[i][j], diagonal: weighted degree of i
    // the degree is the whole row sum, a self loop adds its weight to it
    // although no edge ever carries load around it
    pub fn laplacian(&self) -> Result<Self> {
        if !self.is_square() {
            return Err(MatrixError::NonSquareError { row: self.row_count, col: self.col_count })
        }
        let size = self.row_count;
        let mut elements = Vec::with_capacity(size*size);
        for i in 0..size {
            let degree:f64 = (0..size).map(|j| self.get_unchecked(i, j)).sum();
            for j in 0..size {
                elements.push(if i == j {degree} else {-self.get_unchecked(i, j)});
            }
        }
        Self::new_with_vec(elements, size, size)
    }

    pub(crate) fn as_slice(&self) -> &[f64] {
        &self.elements
    }
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::{Matrix, MatrixError};

    #[test]
    fn test_transpose() {
        let mut rng = rand::rng();
        let size1:usize = rng.random_range(20..100);
        let size2:usize = rng.random_range(30..300);
        let test_matrix = Matrix::rand(size1, size2, &mut rng);
        let transpose = test_matrix.transpose();
        for i in 0..size1 {
            for j in 0..size2 {
                assert_eq!(test_matrix.get(i, j).unwrap(),transpose.get(j, i).unwrap(),"index:({i},{j})")
            }
        }
    }
    #[test]
    fn test_out_of_bounds() {
        let m = Matrix::zeros(3, 4);
        assert!(matches!(m.get(3, 0),Err(MatrixError::IndexOutOfBounds { .. })));
        assert!(matches!(m.get(0, 4),Err(MatrixError::IndexOutOfBounds { .. })));
        assert_eq!(m.get(2, 3).unwrap(),0.0);
    }
    #[test]
    fn test_from_rows_ragged() {
        let rows = vec![vec![0.0,1.0],vec![1.0]];
        assert!(matches!(Matrix::from_rows(&rows),Err(MatrixError::SizeMisMatch { .. })));
    }
    #[test]
    fn test_symmetric() {
        let mut rng = rand::rng();
        let size:usize = rng.random_range(2..50);
        let mut m = Matrix::rand_symmetric(size, &mut rng);
        m.check_symmetric(0.0).unwrap();
        *m.get_mut(0, 1).unwrap() += 1.0;
        let err = m.check_symmetric(1e-9).unwrap_err();
        assert!(matches!(err,MatrixError::Asymmetric { row: 0, col: 1, .. }));
        assert!(matches!(Matrix::zeros(2, 3).check_symmetric(0.0),Err(MatrixError::NonSquareError { .. })));
    }
    #[test]
    fn test_laplacian() {
        // path 0 - 1 - 2
        let adjacency = Matrix::from_rows(&[
            vec![0.0,1.0,0.0],
            vec![1.0,0.0,1.0],
            vec![0.0,1.0,0.0],
        ]).unwrap();
        let l = adjacency.laplacian().unwrap();
        assert_eq!(l.diagonal(),vec![1.0,2.0,1.0]);
        assert_eq!(l.get(0, 1).unwrap(),-1.0);
        assert_eq!(l.get(0, 2).unwrap(),0.0);
        for i in 0..3 {
            let row_sum:f64 = l.row(i).unwrap().iter().sum();
            assert_eq!(row_sum,0.0,"laplacian row {i} must sum to zero");
        }
    }
    #[test]
    fn test_laplacian_counts_self_loops() {
        let adjacency = Matrix::from_rows(&[vec![1.0,1.0],vec![1.0,0.0]]).unwrap();
        let l = adjacency.laplacian().unwrap();
        assert_eq!(l.diagonal(),vec![2.0,1.0]);
        assert_eq!(l.get(0, 1).unwrap(),-1.0);
        assert_eq!(l.get(1, 0).unwrap(),-1.0);
    }
    #[test]
    fn test_non_finite() {
        let m = Matrix::new_with_vec(vec![0.0,f64::NAN,0.0,0.0], 2, 2).unwrap();
        assert!(matches!(m.check_finite(),Err(MatrixError::NonFinite { row: 0, col: 1, .. })));
    }
}
