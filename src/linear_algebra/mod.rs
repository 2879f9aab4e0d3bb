pub mod eigen;
pub mod matrix;
