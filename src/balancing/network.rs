use tracing::trace;

use super::edge::{Edge, EdgeId};
use super::node::{LoadHolder, Node, NodeId};
use super::task::IdAllocator;
use crate::config::Policy;

// arena of nodes and edges, everything refers to each other through ids
// nodes are only mutated through their own LoadHolder methods, called from here
#[derive(Debug)]
pub struct Network {
    nodes:Vec<Node>,
    edges:Vec<Edge>,
    ids:IdAllocator
}

impl Network {
    pub fn new(policy:Policy,node_count:usize) -> Self {
        Self {
            nodes:(0..node_count).map(|i| Node::new(NodeId(i), policy)).collect(),
            edges:vec![],
            ids:IdAllocator::new()
        }
    }
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
    pub fn node(&self,id:NodeId) -> &Node {
        &self.nodes[id.0]
    }
    pub fn edge(&self,id:EdgeId) -> &Edge {
        &self.edges[id.0]
    }
    pub fn add_task(&mut self,node:NodeId,size:f64) {
        let task = self.ids.task(size);
        self.nodes[node.0].add_task(task);
    }
    // both ends learn about the new edge
    pub fn connect(&mut self,a:NodeId,b:NodeId) -> EdgeId {
        let id = EdgeId(self.edges.len());
        self.edges.push(Edge::new(a, b));
        self.nodes[a.0].attach_edge(id);
        self.nodes[b.0].attach_edge(id);
        id
    }
    pub fn total_load(&self) -> f64 {
        self.nodes.iter().map(|n| n.load()).sum()
    }
    pub fn optimal_load_delta(&self,node:NodeId) -> f64 {
        self.nodes[node.0].optimal_load_delta(&self.edges)
    }
    pub fn total_pending_error(&self) -> f64 {
        self.edges.iter().map(|e| e.pending_error().abs()).sum()
    }
    // snapshot of the optimal load every node would have right now
    pub fn freeze_iteration_loads(&mut self) {
        for node in self.nodes.iter_mut() {
            let delta = node.optimal_load_delta(&self.edges);
            let load = node.load() + delta;
            node.set_iteration_load(load);
        }
    }
    // load_to_send > 0 means a -> b
    // picks tasks from the sender into the edge buffer and records the shortfall
    // returns the load actually staged
    pub fn process_edge(&mut self,id:EdgeId,load_to_send:f64) -> f64 {
        let edge = &mut self.edges[id.0];
        // try to repay what was not delivered before
        let mut load_to_send = load_to_send + edge.pending_error();
        if load_to_send >= 0.0 {
            edge.set_to_a(false);
        } else {
            edge.set_to_a(true);
            load_to_send = -load_to_send;
        }
        let sender = edge.sender();

        let tasks = self.nodes[sender.0].remove_tasks(load_to_send);
        let load_sent:f64 = tasks.iter().map(|t| t.size()).sum();

        let edge = &mut self.edges[id.0];
        edge.stage(tasks);
        let error = if edge.is_to_a() {load_sent - load_to_send} else {load_to_send - load_sent};
        edge.set_pending_error(error);
        trace!(edge = id.0, from = sender.0, to = edge.receiver().0, wanted = load_to_send, sent = load_sent, error, "edge processed");
        load_sent
    }
    // second phase of a round, every staged task reaches its receiver
    pub fn flush_edges(&mut self) {
        for edge in self.edges.iter_mut() {
            let receiver = edge.receiver();
            let tasks = edge.take_in_flight();
            self.nodes[receiver.0].add_tasks(tasks);
        }
    }
}
