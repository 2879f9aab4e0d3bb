use std::borrow::Borrow;

use crate::linear_algebra::matrix::{Matrix, MatrixError};

type HashMap<K,V> = std::collections::hash_map::HashMap<K,V,nohash::BuildNoHashHasher<usize>>;
type HashSet<K> = std::collections::hash_set::HashSet<K,nohash::BuildNoHashHasher<usize>>;

#[derive(Clone)]
struct Visited {
    visited_nodes:HashSet<usize>,
    unvisited_nodes:HashSet<usize>
}

impl Visited {
    fn new() -> Self {
        Self {visited_nodes:HashSet::with_hasher(nohash::BuildNoHashHasher::default()),
        unvisited_nodes:HashSet::with_hasher(nohash::BuildNoHashHasher::default())}
    }
    fn with_capacity(capacity:usize) -> Self {
        if capacity == 0 {
            return Self::new();
        }
        Self {visited_nodes:HashSet::with_capacity_and_hasher(capacity,nohash::BuildNoHashHasher::default()),
            unvisited_nodes:HashSet::with_capacity_and_hasher(capacity,nohash::BuildNoHashHasher::default())
        }
    }
    fn push_node(&mut self,node:&usize) {
        if self.visited_nodes.contains(node) {
            debug_assert!(!self.unvisited_nodes.contains(node));
            return;
        }
        self.unvisited_nodes.insert(*node);
    }
    // returns false if the node was already visited or is unknown
    fn visit(&mut self,node:&usize) -> bool {
        if !self.unvisited_nodes.remove(node) {
            return false
        };
        self.visited_nodes.insert(*node);
        true
    }
    // any node not yet visited, in no particular order
    fn next_unvisited(&self) -> Option<usize> {
        self.unvisited_nodes.iter().next().copied()
    }
}

impl<A:Borrow<usize>> FromIterator<A> for Visited {
    fn from_iter<T: IntoIterator<Item = A>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let size = match iter.size_hint() {
            (_,Some(higher)) => {higher},
            (lower,None) => {lower}
        };
        let mut v = Self::with_capacity(size);
        for elem in iter {
            v.push_node(elem.borrow());
        }
        v
    }
}

// undirected interconnection graph over nodes 0..n
// edges are unweighted here, weights only matter for the laplacian
pub struct UnDirectedGraph {
    edges_len:usize,
    adjacency_list:HashMap<usize,HashSet<usize>>
}

impl UnDirectedGraph {
    pub fn edges_len(&self) -> usize {
        self.edges_len
    }
    pub fn nodes_len(&self) -> usize {
        self.adjacency_list.len()
    }
    pub fn with_capacity(capacity:usize) -> Self {
        Self {
            edges_len:0,
            adjacency_list:HashMap::with_capacity_and_hasher(
                capacity,
                nohash::BuildNoHashHasher::default())
        }
    }
    // every non-zero entry above the diagonal is an edge, the diagonal is ignored
    pub fn from_adjacency(adjacency:&Matrix) -> Result<Self,MatrixError> {
        if !adjacency.is_square() {
            let (row,col) = adjacency.dimension();
            return Err(MatrixError::NonSquareError { row, col })
        }
        let (size,_) = adjacency.dimension();
        let mut new_graph = Self::with_capacity(size);
        for i in 0..size {
            new_graph.push_node(i);
        }
        for i in 0..size {
            for j in i+1..size {
                if adjacency.get(i, j)? != 0.0 {
                    new_graph.push_edge((i,j));
                }
            }
        }
        Ok(new_graph)
    }
    // only push node, not adding edges
    pub fn push_node<B:Borrow<usize>>(&mut self,node:B) {
        let node = node.borrow();
        if self.adjacency_list.contains_key(node) {
            return;
        }
        let adj_nodes:HashSet<usize> = HashSet::with_hasher(nohash::BuildNoHashHasher::default());
        self.adjacency_list.insert(*node,adj_nodes);
    }
    pub fn push_edge<B:Borrow<(usize,usize)>>(&mut self,edge:B) {
        let (node1,node2) = edge.borrow();
        let mut is_edge_present= false;
        // adj_nodes.insert() return false if the other end is found, which means edge already present
        if !self.adjacency_list.entry(*node1)
            .or_insert_with(|| HashSet::with_hasher(nohash::BuildNoHashHasher::default()))
            .insert(*node2) {is_edge_present = true};
        if !self.adjacency_list.entry(*node2)
            .or_insert_with(|| HashSet::with_hasher(nohash::BuildNoHashHasher::default()))
            .insert(*node1) {is_edge_present = true};
        // edge not present, increase edge count
        if !is_edge_present {
            self.edges_len += 1;
        }
    }
    pub fn degree(&self,node:usize) -> Option<usize> {
        self.adjacency_list.get(&node).map(|adj| adj.len())
    }
    // each edge once, as (smaller,larger), sorted
    pub fn edges(&self) -> Vec<(usize,usize)> {
        let mut edges = Vec::with_capacity(self.edges_len);
        for (node,adj_nodes) in self.adjacency_list.iter() {
            for other in adj_nodes.iter() {
                if node < other {
                    edges.push((*node,*other));
                }
            }
        }
        edges.sort_unstable();
        debug_assert_eq!(edges.len(),self.edges_len);
        edges
    }
    // connected components, each sorted, ordered by their smallest node
    pub fn connected_components(&self) -> Vec<Vec<usize>> {
        let mut visited:Visited = self.adjacency_list.keys().collect();
        let mut components = vec![];
        let mut stack = Vec::with_capacity(self.nodes_len());
        while let Some(start) = visited.next_unvisited() {
            let mut component = vec![];
            stack.push(start);
            while let Some(current) = stack.pop() {
                if !visited.visit(&current) {
                    continue;
                }
                component.push(current);
                if let Some(adj_nodes) = self.adjacency_list.get(&current) {
                    stack.extend(adj_nodes.iter().copied());
                }
            }
            component.sort_unstable();
            components.push(component);
        }
        components.sort_unstable_by_key(|c| c.first().copied());
        components
    }
    pub fn is_connected(&self) -> bool {
        self.connected_components().len() <= 1
    }
}

impl<B:Borrow<(usize,usize)>> FromIterator<B> for UnDirectedGraph {
    fn from_iter<T: IntoIterator<Item = B>>(iter: T) -> Self {
        let iter = iter.into_iter();
        let size_estimation = match iter.size_hint() {
            (_,Some(n)) => {n},
            (n,None) => {n}
        };
        let mut new_graph = Self::with_capacity(size_estimation);
        for b in iter {
            new_graph.push_edge(b.borrow());
        }
        new_graph
    }
}
