use std::collections::BTreeSet;

use super::edge::{Edge, EdgeId};
use super::task::Task;
use crate::config::Policy;

#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash,PartialOrd,Ord)]
pub struct NodeId(pub usize);

// what every load policy can do with the work it holds
pub trait LoadHolder {
    fn add_task(&mut self,task:Task);
    fn add_tasks<I:IntoIterator<Item = Task>>(&mut self,tasks:I) {
        for task in tasks {
            self.add_task(task);
        }
    }
    fn load(&self) -> f64;
    // removes tasks with total size <= max_total_load
    fn remove_tasks(&mut self,max_total_load:f64) -> Vec<Task>;
}

// indivisible tasks, greedy knapsack on removal
#[derive(Clone,Debug,Default)]
pub struct DiscreteLoad {
    tasks:BTreeSet<Task>
}

impl DiscreteLoad {
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }
    pub fn len(&self) -> usize {
        self.tasks.len()
    }
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl LoadHolder for DiscreteLoad {
    fn add_task(&mut self,task:Task) {
        self.tasks.insert(task);
    }
    fn load(&self) -> f64 {
        self.tasks.iter().map(|t| t.size()).sum()
    }
    // repeatedly takes the biggest task that still fits
    fn remove_tasks(&mut self,max_total_load:f64) -> Vec<Task> {
        let mut result = vec![];
        let mut budget = max_total_load;
        while let Some(task) = self.tasks.range(..=Task::dummy(budget)).next_back().copied() {
            self.tasks.remove(&task);
            budget -= task.size();
            result.push(task);
        }
        result
    }
}

// divisible load, only the total is tracked
#[derive(Clone,Debug,Default)]
pub struct ContinuousLoad {
    load:f64
}

impl LoadHolder for ContinuousLoad {
    fn add_task(&mut self,task:Task) {
        self.load += task.size();
    }
    fn load(&self) -> f64 {
        self.load
    }
    // may drive the load negative, the optimal scheme sends whatever it is asked for
    fn remove_tasks(&mut self,max_total_load:f64) -> Vec<Task> {
        self.load -= max_total_load;
        vec![Task::dummy(max_total_load)]
    }
}

// divisible load that never sends more than it holds
#[derive(Clone,Debug,Default)]
pub struct ClampedLoad {
    inner:ContinuousLoad
}

impl LoadHolder for ClampedLoad {
    fn add_task(&mut self,task:Task) {
        self.inner.add_task(task);
    }
    fn load(&self) -> f64 {
        self.inner.load()
    }
    fn remove_tasks(&mut self,max_total_load:f64) -> Vec<Task> {
        let amount = max_total_load.min(self.inner.load());
        self.inner.remove_tasks(amount)
    }
}

#[derive(Clone,Debug)]
pub enum Holdings {
    Discrete(DiscreteLoad),
    Continuous(ContinuousLoad),
    ContinuousModified(ClampedLoad)
}

impl Holdings {
    pub fn new(policy:Policy) -> Self {
        match policy {
            Policy::Discrete => Self::Discrete(DiscreteLoad::default()),
            Policy::Continuous => Self::Continuous(ContinuousLoad::default()),
            Policy::ContinuousModified => Self::ContinuousModified(ClampedLoad::default())
        }
    }
    pub fn policy(&self) -> Policy {
        match self {
            Self::Discrete(_) => Policy::Discrete,
            Self::Continuous(_) => Policy::Continuous,
            Self::ContinuousModified(_) => Policy::ContinuousModified
        }
    }
}

impl LoadHolder for Holdings {
    fn add_task(&mut self,task:Task) {
        match self {
            Self::Discrete(h) => h.add_task(task),
            Self::Continuous(h) => h.add_task(task),
            Self::ContinuousModified(h) => h.add_task(task)
        }
    }
    fn add_tasks<I:IntoIterator<Item = Task>>(&mut self,tasks:I) {
        match self {
            Self::Discrete(h) => h.add_tasks(tasks),
            Self::Continuous(h) => h.add_tasks(tasks),
            Self::ContinuousModified(h) => h.add_tasks(tasks)
        }
    }
    fn load(&self) -> f64 {
        match self {
            Self::Discrete(h) => h.load(),
            Self::Continuous(h) => h.load(),
            Self::ContinuousModified(h) => h.load()
        }
    }
    fn remove_tasks(&mut self,max_total_load:f64) -> Vec<Task> {
        match self {
            Self::Discrete(h) => h.remove_tasks(max_total_load),
            Self::Continuous(h) => h.remove_tasks(max_total_load),
            Self::ContinuousModified(h) => h.remove_tasks(max_total_load)
        }
    }
}

#[derive(Clone,Debug)]
pub struct Node {
    id:NodeId,
    holdings:Holdings,
    // load the optimal scheme would have, frozen at the start of a round
    iteration_load:f64,
    edges:Vec<EdgeId>
}

impl Node {
    pub fn new(id:NodeId,policy:Policy) -> Self {
        Self {
            id,
            holdings:Holdings::new(policy),
            iteration_load:0.0,
            edges:vec![]
        }
    }
    pub fn id(&self) -> NodeId {
        self.id
    }
    pub fn holdings(&self) -> &Holdings {
        &self.holdings
    }
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }
    pub(crate) fn attach_edge(&mut self,edge:EdgeId) {
        self.edges.push(edge);
    }
    pub fn iteration_load(&self) -> f64 {
        self.iteration_load
    }
    pub fn set_iteration_load(&mut self,load:f64) {
        self.iteration_load = load;
    }
    // optimal load is load() + optimal_load_delta()
    // all_edges is the arena the stored edge ids point into
    pub fn optimal_load_delta(&self,all_edges:&[Edge]) -> f64 {
        let mut delta = 0.0;
        for edge_id in self.edges.iter() {
            let edge = &all_edges[edge_id.0];
            if edge.a() == self.id {
                // this node sent less
                delta -= edge.pending_error();
            } else {
                // this node received less
                delta += edge.pending_error();
            }
        }
        delta
    }
}

impl LoadHolder for Node {
    fn add_task(&mut self,task:Task) {
        self.holdings.add_task(task);
    }
    fn add_tasks<I:IntoIterator<Item = Task>>(&mut self,tasks:I) {
        self.holdings.add_tasks(tasks);
    }
    fn load(&self) -> f64 {
        self.holdings.load()
    }
    fn remove_tasks(&mut self,max_total_load:f64) -> Vec<Task> {
        self.holdings.remove_tasks(max_total_load)
    }
}
