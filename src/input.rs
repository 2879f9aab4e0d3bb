// input file layout:
//   <node count>
//   <task sizes of node 0, whitespace separated, may be empty>
//   ...
//   <task sizes of node n-1>
//   <adjacency matrix, one row per line, ends at a blank line or eof>

use std::io::BufRead;
use std::path::Path;

use rand::Rng;
use thiserror::Error;

use crate::linear_algebra::matrix::{Matrix, MatrixError};
use crate::scientific_computing::statistics;

#[derive(Error,Debug)]
pub enum InputError {
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
    #[error("input is empty, expected the node count on the first line")]
    MissingNodeCount,
    #[error("line {line}: {value:?} is not a valid node count")]
    InvalidNodeCount{line:usize,value:String},
    #[error("node count must be at least 1")]
    NoNodes,
    #[error("expected a task line for node {node}, found end of input")]
    MissingTaskLine{node:usize},
    #[error("line {line}: task size {token:?} of node {node} is not a number")]
    InvalidTaskSize{line:usize,node:usize,token:String},
    #[error("line {line}: task size {size} of node {node} must be finite and non-negative")]
    NegativeTaskSize{line:usize,node:usize,size:f64},
    #[error("task size {size} of node {node} must be finite and non-negative")]
    InvalidTask{node:usize,size:f64},
    #[error("line {line}: adjacency entry {token:?} is not a number")]
    InvalidMatrixEntry{line:usize,token:String},
    #[error("line {line}: adjacency row has {found} entries, expected {expected}")]
    RaggedRow{line:usize,expected:usize,found:usize},
    #[error("adjacency matrix is {rows}x{cols}, expected {nodes}x{nodes}")]
    AdjacencyDimension{nodes:usize,rows:usize,cols:usize},
    #[error("invalid adjacency matrix: {0}")]
    Matrix(#[from] MatrixError)
}

type Result<T> = std::result::Result<T,InputError>;

const SYMMETRY_TOLERANCE:f64 = 1e-9;

#[derive(Clone,Debug,PartialEq)]
pub struct GraphDescription {
    tasks:Vec<Vec<f64>>,
    adjacency:Matrix
}

impl GraphDescription {
    // one task list per node, adjacency must be square, symmetric, finite and match the node count
    pub fn new(tasks:Vec<Vec<f64>>,adjacency:Matrix) -> Result<Self> {
        let nodes = tasks.len();
        if nodes == 0 {
            return Err(InputError::NoNodes)
        }
        for (node,sizes) in tasks.iter().enumerate() {
            for size in sizes {
                if !size.is_finite() || *size < 0.0 {
                    return Err(InputError::InvalidTask { node, size: *size })
                }
            }
        }
        let (rows,cols) = adjacency.dimension();
        if rows != nodes || cols != nodes {
            return Err(InputError::AdjacencyDimension { nodes, rows, cols })
        }
        adjacency.check_finite()?;
        adjacency.check_symmetric(SYMMETRY_TOLERANCE)?;
        Ok(Self { tasks, adjacency })
    }

    pub fn parse(text:&str) -> Result<Self> {
        let mut lines = text.lines().enumerate().map(|(i,l)| (i + 1,l));

        let (line,first) = lines.by_ref()
            .find(|(_,l)| !l.trim().is_empty())
            .ok_or(InputError::MissingNodeCount)?;
        let nodes:usize = first.trim().parse()
            .map_err(|_| InputError::InvalidNodeCount { line, value: first.trim().to_string() })?;
        if nodes == 0 {
            return Err(InputError::NoNodes)
        }

        let mut tasks = Vec::with_capacity(nodes);
        for node in 0..nodes {
            let (line,text) = lines.next().ok_or(InputError::MissingTaskLine { node })?;
            let mut sizes = vec![];
            for token in text.split_whitespace() {
                let size:f64 = token.parse()
                    .map_err(|_| InputError::InvalidTaskSize { line, node, token: token.to_string() })?;
                if !size.is_finite() || size < 0.0 {
                    return Err(InputError::NegativeTaskSize { line, node, size })
                }
                sizes.push(size);
            }
            tasks.push(sizes);
        }

        let mut rows:Vec<Vec<f64>> = Vec::with_capacity(nodes);
        for (line,text) in lines.skip_while(|(_,l)| l.trim().is_empty()) {
            if text.trim().is_empty() {
                break;
            }
            let row = text.split_whitespace()
                .map(|token| token.parse::<f64>()
                    .map_err(|_| InputError::InvalidMatrixEntry { line, token: token.to_string() }))
                .collect::<Result<Vec<f64>>>()?;
            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(InputError::RaggedRow { line, expected: first.len(), found: row.len() })
                }
            }
            rows.push(row);
        }
        let cols = rows.first().map(|r| r.len()).unwrap_or(0);
        if rows.len() != nodes || cols != nodes {
            return Err(InputError::AdjacencyDimension { nodes, rows: rows.len(), cols })
        }
        let adjacency = Matrix::from_rows(&rows)?;
        Self::new(tasks, adjacency)
    }

    pub fn from_reader<R:BufRead>(mut reader:R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::parse(&text)
    }

    pub fn from_path<P:AsRef<Path>>(path:P) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    // ring over all nodes plus random chords, so always connected
    pub fn random<R:Rng>(nodes:usize,chord_probability:f64,max_tasks:usize,max_task_size:f64,rng:&mut R) -> Self {
        let nodes = nodes.max(1);
        let mut adjacency = Matrix::zeros(nodes, nodes);
        let link = |m:&mut Matrix,i:usize,j:usize| {
            if i == j {return}
            for (r,c) in [(i,j),(j,i)] {
                if let Ok(entry) = m.get_mut(r, c) {
                    *entry = 1.0;
                }
            }
        };
        for i in 0..nodes {
            link(&mut adjacency, i, (i + 1)%nodes);
        }
        for i in 0..nodes {
            for j in i+1..nodes {
                if rng.random_bool(chord_probability.clamp(0.0, 1.0)) {
                    link(&mut adjacency, i, j);
                }
            }
        }
        let tasks = (0..nodes).map(|_| {
            let count = rng.random_range(0..=max_tasks);
            (0..count).map(|_| rng.random_range(0.0..=max_task_size)).collect()
        }).collect();
        Self { tasks, adjacency }
    }

    pub fn node_count(&self) -> usize {
        self.tasks.len()
    }
    pub fn tasks(&self) -> &[Vec<f64>] {
        &self.tasks
    }
    pub fn adjacency(&self) -> &Matrix {
        &self.adjacency
    }
    // 0 when no node holds any task
    pub fn max_task_size(&self) -> f64 {
        statistics::max(&self.task_sizes()).unwrap_or(0.0)
    }
    pub fn total_load(&self) -> f64 {
        statistics::sum(&self.task_sizes())
    }
    fn task_sizes(&self) -> Vec<f64> {
        self.tasks.iter().flatten().copied().collect()
    }
}
