use thiserror::Error;
use tracing::{debug, info, warn};

use super::edge::EdgeId;
use super::network::Network;
use super::node::{LoadHolder, NodeId};
use super::spectrum::Schedule;
use crate::config::SimulationConfig;
use crate::dsa::graph::UnDirectedGraph;
use crate::input::GraphDescription;
use crate::linear_algebra::eigen::EigenSolver;
use crate::linear_algebra::matrix::MatrixError;
use crate::report::{EdgeFlow, SimulationReport};
use crate::scientific_computing::statistics;

#[derive(Error,Debug)]
pub enum SimulationError {
    #[error("spectral decomposition failed: {0}")]
    Matrix(#[from] MatrixError),
    #[error("error correction did not converge within {rounds} rounds")]
    CorrectionDidNotConverge{rounds:usize}
}

type Result<T> = std::result::Result<T,SimulationError>;

// one run of the diffusion scheme over a single graph
// rounds can be driven one at a time or all at once with run()
pub struct Simulation {
    config:SimulationConfig,
    network:Network,
    schedule:Schedule,
    // weighted degree, the laplacian diagonal
    degrees:Vec<f64>,
    max_task_size:f64,
    initial_total_load:f64,
    connected_components:usize,
    spectral_rounds:usize,
    correction_rounds:usize
}

impl Simulation {
    pub fn new<S:EigenSolver + ?Sized>(description:&GraphDescription,config:SimulationConfig,solver:&S) -> Result<Self> {
        let adjacency = description.adjacency();
        let mut network = Network::new(config.policy, description.node_count());
        for (node,sizes) in description.tasks().iter().enumerate() {
            for size in sizes {
                network.add_task(NodeId(node), *size);
            }
        }

        let graph = UnDirectedGraph::from_adjacency(adjacency)?;
        for (a,b) in graph.edges() {
            network.connect(NodeId(a), NodeId(b));
        }
        let connected_components = graph.connected_components().len();
        if connected_components > 1 {
            warn!(components = connected_components, "graph is disconnected, load will not cross components");
        }

        let laplacian = adjacency.laplacian()?;
        let degrees = laplacian.diagonal();
        let schedule = Schedule::from_laplacian(&laplacian, solver, config.eigenvalue_digits)?;

        Ok(Self {
            initial_total_load:network.total_load(),
            max_task_size:description.max_task_size(),
            config,
            network,
            schedule,
            degrees,
            connected_components,
            spectral_rounds:0,
            correction_rounds:0
        })
    }

    pub fn network(&self) -> &Network {
        &self.network
    }
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }
    pub fn spectral_rounds(&self) -> usize {
        self.spectral_rounds
    }
    pub fn correction_rounds(&self) -> usize {
        self.correction_rounds
    }
    pub fn initial_total_load(&self) -> f64 {
        self.initial_total_load
    }

    // runs the round of the next scheduled eigenvalue, None once all are used up
    pub fn spectral_round(&mut self) -> Option<f64> {
        let eigenvalue = *self.schedule.eigenvalues().get(self.spectral_rounds)?;

        // loads are frozen so the tasks moved below do not change later edges' decisions
        self.network.freeze_iteration_loads();
        for i in 0..self.network.edges().len() {
            let edge = self.network.edge(EdgeId(i));
            let a = self.network.node(edge.a()).iteration_load();
            let b = self.network.node(edge.b()).iteration_load();
            self.network.process_edge(EdgeId(i), (a - b)/eigenvalue);
        }
        // every sender has picked its tasks, now deliver
        self.network.flush_edges();

        self.spectral_rounds += 1;
        debug!(round = self.spectral_rounds, eigenvalue, pending = self.network.total_pending_error(), "spectral round done");
        Some(eigenvalue)
    }

    // only the pending errors are exchanged
    pub fn correction_round(&mut self) {
        for i in 0..self.network.edges().len() {
            self.network.process_edge(EdgeId(i), 0.0);
        }
        self.network.flush_edges();

        self.correction_rounds += 1;
        debug!(round = self.correction_rounds, pending = self.network.total_pending_error(), "error correction round done");
    }

    // true while some node is further from its optimal load than
    // one biggest task per incident edge
    pub fn needs_correction(&self) -> bool {
        self.degrees.iter().enumerate().any(|(i,degree)| {
            degree*self.max_task_size < self.network.optimal_load_delta(NodeId(i)).abs()
        })
    }

    pub fn run(&mut self) -> Result<SimulationReport> {
        info!(
            policy = %self.config.policy,
            nodes = self.network.nodes().len(),
            edges = self.network.edges().len(),
            eigenvalues = self.schedule.len(),
            "simulation started"
        );
        while self.spectral_round().is_some() {}

        while self.needs_correction() {
            if let Some(max) = self.config.max_correction_rounds {
                if self.correction_rounds >= max {
                    warn!(rounds = self.correction_rounds, pending = self.network.total_pending_error(), "error correction gave up");
                    return Err(SimulationError::CorrectionDidNotConverge { rounds: self.correction_rounds })
                }
            }
            self.correction_round();
        }

        let report = self.report();
        info!(
            spectral = report.spectral_rounds,
            correction = report.correction_rounds,
            flow = report.total_flow,
            deviation = report.average_deviation,
            "simulation finished"
        );
        Ok(report)
    }

    // summary of the current state, valid after any number of rounds
    pub fn report(&self) -> SimulationReport {
        let edge_flows:Vec<EdgeFlow> = self.network.edges().iter()
            .map(|e| EdgeFlow { a: e.a().0, b: e.b().0, load: e.overall_load() })
            .collect();
        let flows:Vec<f64> = edge_flows.iter().map(|f| f.load).collect();
        let node_loads:Vec<f64> = self.network.nodes().iter().map(|n| n.load()).collect();
        let remaining_errors = (0..node_loads.len())
            .map(|i| self.network.optimal_load_delta(NodeId(i)))
            .collect();
        // average of the initial load, the final loads must conserve it
        let average_load = if node_loads.is_empty() {0.0} else {self.initial_total_load/node_loads.len() as f64};

        SimulationReport {
            policy:self.config.policy,
            node_count:node_loads.len(),
            edge_count:edge_flows.len(),
            connected_components:self.connected_components,
            eigenvalues:self.schedule.eigenvalues().to_vec(),
            spectral_rounds:self.spectral_rounds,
            correction_rounds:self.correction_rounds,
            flow_l2_norm:statistics::l2_norm(&flows),
            total_flow:statistics::sum(&flows),
            final_total_load:statistics::sum(&node_loads),
            average_deviation:statistics::mean_absolute_deviation(&node_loads, average_load),
            initial_total_load:self.initial_total_load,
            average_load,
            edge_flows,
            node_loads,
            remaining_errors
        }
    }
}
