pub mod edge;
pub mod network;
pub mod node;
pub mod simulation;
pub mod spectrum;
pub mod task;
