use super::node::NodeId;
use super::task::Task;

#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash,PartialOrd,Ord)]
pub struct EdgeId(pub usize);

#[derive(Clone,Debug)]
pub struct Edge {
    a:NodeId,
    b:NodeId,
    // positive: a sent less to b than the optimal scheme would have, negative: the opposite
    pending_error:f64,
    // direction of the current round, true means b -> a
    to_a:bool,
    // empty at round boundaries
    in_flight:Vec<Task>,
    overall_load:f64
}

impl Edge {
    pub fn new(a:NodeId,b:NodeId) -> Self {
        Self {
            a,
            b,
            pending_error:0.0,
            to_a:false,
            in_flight:vec![],
            overall_load:0.0
        }
    }
    pub fn a(&self) -> NodeId {
        self.a
    }
    pub fn b(&self) -> NodeId {
        self.b
    }
    pub fn pending_error(&self) -> f64 {
        self.pending_error
    }
    pub fn set_pending_error(&mut self,error:f64) {
        self.pending_error = error;
    }
    pub fn is_to_a(&self) -> bool {
        self.to_a
    }
    pub fn set_to_a(&mut self,to_a:bool) {
        self.to_a = to_a;
    }
    pub fn sender(&self) -> NodeId {
        if self.to_a {self.b} else {self.a}
    }
    pub fn receiver(&self) -> NodeId {
        if self.to_a {self.a} else {self.b}
    }
    // total load delivered over this edge so far
    pub fn overall_load(&self) -> f64 {
        self.overall_load
    }
    pub fn in_flight(&self) -> &[Task] {
        &self.in_flight
    }
    pub fn stage<I:IntoIterator<Item = Task>>(&mut self,tasks:I) {
        self.in_flight.extend(tasks);
    }
    // empties the buffer, the caller hands the tasks to receiver()
    pub fn take_in_flight(&mut self) -> Vec<Task> {
        let tasks = std::mem::take(&mut self.in_flight);
        self.overall_load += tasks.iter().map(|t| t.size()).sum::<f64>();
        tasks
    }
}

#[cfg(test)]
mod tests {
    use super::Edge;
    use crate::balancing::node::NodeId;
    use crate::balancing::task::{IdAllocator, Task};

    #[test]
    fn test_direction() {
        let mut edge = Edge::new(NodeId(0), NodeId(1));
        assert_eq!(edge.sender(),NodeId(0));
        assert_eq!(edge.receiver(),NodeId(1));
        edge.set_to_a(true);
        assert_eq!(edge.sender(),NodeId(1));
        assert_eq!(edge.receiver(),NodeId(0));
    }
    #[test]
    fn test_take_accumulates_overall_load() {
        let mut ids = IdAllocator::new();
        let mut edge = Edge::new(NodeId(0), NodeId(1));
        edge.stage([ids.task(2.0),ids.task(1.5)]);
        assert_eq!(edge.in_flight().len(),2);
        let tasks = edge.take_in_flight();
        assert_eq!(tasks.len(),2);
        assert!(edge.in_flight().is_empty());
        assert_eq!(edge.overall_load(),3.5);
        edge.stage([Task::dummy(0.5)]);
        edge.take_in_flight();
        assert_eq!(edge.overall_load(),4.0);
        assert!(edge.take_in_flight().is_empty());
        assert_eq!(edge.overall_load(),4.0);
    }
}
