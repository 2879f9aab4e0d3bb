use std::cmp::Ordering;

// Dummy stands for an arbitrary slice of divisible load
// it orders below every real id, which makes it the biggest of equal sized tasks
#[derive(Clone,Copy,Debug,PartialEq,Eq,Hash,PartialOrd,Ord)]
pub enum TaskId {
    Dummy,
    Real(u64)
}

#[derive(Clone,Copy,Debug)]
pub struct Task {
    id:TaskId,
    size:f64
}

impl Task {
    pub fn dummy(size:f64) -> Self {
        Self { id: TaskId::Dummy, size }
    }
    pub fn id(&self) -> TaskId {
        self.id
    }
    pub fn size(&self) -> f64 {
        self.size
    }
    pub fn is_dummy(&self) -> bool {
        self.id == TaskId::Dummy
    }
}

// size ascending, equal sizes by descending id
// floor(dummy(x)) therefore finds every real task of size exactly x
impl Ord for Task {
    fn cmp(&self, other: &Self) -> Ordering {
        self.size.total_cmp(&other.size)
            .then_with(|| other.id.cmp(&self.id))
    }
}

impl PartialOrd for Task {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Task {}

// hands out task ids for one simulation, starting at 1
#[derive(Debug,Default)]
pub struct IdAllocator {
    last:u64
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn task(&mut self,size:f64) -> Task {
        self.last += 1;
        Task { id: TaskId::Real(self.last), size }
    }
    pub fn allocated(&self) -> u64 {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{IdAllocator, Task, TaskId};

    #[test]
    fn test_dummy_is_largest_of_equals() {
        let mut ids = IdAllocator::new();
        let real = ids.task(4.0);
        let dummy = Task::dummy(4.0);
        assert!(dummy > real);
        assert!(real < dummy);
        assert!(ids.task(4.1) > dummy);
    }
    #[test]
    fn test_equal_sizes_descending_id() {
        let mut ids = IdAllocator::new();
        let first = ids.task(2.0);
        let second = ids.task(2.0);
        assert_eq!(first.id(),TaskId::Real(1));
        assert!(second < first);
        assert_ne!(first,second);
    }
    #[test]
    fn test_floor_lookup() {
        let mut ids = IdAllocator::new();
        let set:BTreeSet<Task> = [1.0,3.0,3.0,7.0].into_iter().map(|s| ids.task(s)).collect();
        assert_eq!(set.len(),4);
        let floor = set.range(..=Task::dummy(3.0)).next_back().unwrap();
        assert_eq!(floor.size(),3.0);
        let floor = set.range(..=Task::dummy(2.9)).next_back().unwrap();
        assert_eq!(floor.size(),1.0);
        assert!(set.range(..=Task::dummy(0.5)).next_back().is_none());
    }
    #[test]
    fn test_allocators_are_isolated() {
        let mut a = IdAllocator::new();
        let mut b = IdAllocator::new();
        a.task(1.0);
        a.task(1.0);
        assert_eq!(b.task(1.0).id(),TaskId::Real(1));
        assert_eq!(a.allocated(),2);
    }
}
