// diffusion load-balancing simulator
// nodes of an interconnection graph exchange tasks with their neighbours,
// one round per distinct non-zero laplacian eigenvalue, followed by
// error correcting rounds against the fully divisible (optimal) scheme

pub mod balancing;
pub mod config;
pub mod dsa;
pub mod input;
pub mod linear_algebra;
pub mod report;
pub mod scientific_computing;

pub use balancing::simulation::{Simulation, SimulationError};
pub use config::{Policy, SimulationConfig};
pub use input::GraphDescription;
pub use linear_algebra::eigen::{EigenSolver, JacobiEigenSolver};
pub use report::SimulationReport;
