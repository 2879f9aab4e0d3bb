use std::fmt::Display;

use serde::Serialize;

use crate::config::Policy;

#[derive(Clone,Debug,PartialEq,Serialize)]
pub struct EdgeFlow {
    pub a:usize,
    pub b:usize,
    // total load ever sent over the edge, in both directions
    pub load:f64
}

// plain numbers only, formatting is left to Display / serde
#[derive(Clone,Debug,PartialEq,Serialize)]
pub struct SimulationReport {
    pub policy:Policy,
    pub node_count:usize,
    pub edge_count:usize,
    pub connected_components:usize,
    // in the order they drove the rounds
    pub eigenvalues:Vec<f64>,
    pub spectral_rounds:usize,
    pub correction_rounds:usize,
    pub edge_flows:Vec<EdgeFlow>,
    pub flow_l2_norm:f64,
    pub total_flow:f64,
    pub node_loads:Vec<f64>,
    // optimal load delta left on every node
    pub remaining_errors:Vec<f64>,
    pub initial_total_load:f64,
    pub final_total_load:f64,
    pub average_load:f64,
    // mean |load - average_load|
    pub average_deviation:f64
}

impl SimulationReport {
    pub fn total_rounds(&self) -> usize {
        self.spectral_rounds + self.correction_rounds
    }
}

impl Display for SimulationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f,"Iterations: {} ({} standard, {} error correcting)",
            self.total_rounds(),self.spectral_rounds,self.correction_rounds)?;
        writeln!(f,"Flow cost as l2-norm: {} (total load sum: {})",self.flow_l2_norm,self.total_flow)?;
        writeln!(f,"Node loads (average {}, average variation {}) :",self.average_load,self.average_deviation)?;
        for (load,error) in self.node_loads.iter().zip(self.remaining_errors.iter()) {
            writeln!(f,"{load} (remaining error {error})")?;
        }
        Ok(())
    }
}
