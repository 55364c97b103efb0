//! Road network storage and shortest-path queries
//!
//! The network is undirected in cost terms: every route is stored as two
//! directed edges with the same distance and congestion. Points are created
//! on first reference and never removed.

use crate::core::error::{suggest_closest, Error, Result};
use log::debug;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// Per-direction edge payload
#[derive(Debug, Clone, Copy, PartialEq)]
struct RouteWeight {
    distance: f64,
    congestion: f64,
}

/// One directed entry of a road between two points
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub from: String,
    pub to: String,
    pub distance: f64,
    /// Descriptive only, path cost uses `distance` alone
    pub congestion: f64,
}

/// Result of a successful shortest-path query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Path {
    /// Points from source to destination, both included
    pub nodes: Vec<String>,
    pub distance: f64,
}

// Frontier entry for Dijkstra
#[derive(Clone, Copy, Debug)]
struct SearchState {
    cost: f64,
    node: NodeIndex,
}

impl PartialEq for SearchState {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SearchState {}

impl PartialOrd for SearchState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SearchState {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering for min-heap; equal costs pop the older point first
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Bidirectional weighted road network keyed by point name
#[derive(Debug, Default)]
pub struct RouteGraph {
    graph: DiGraph<String, RouteWeight>,
    node_map: HashMap<String, NodeIndex>,
}

fn validate(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidDistance { field, value })
    }
}

impl RouteGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a road between `from` and `to`.
    ///
    /// Both values are checked before anything is touched, so a rejected call
    /// leaves the network exactly as it was. Adding the same pair twice keeps
    /// both roads; queries consider every parallel road.
    pub fn add_route(&mut self, from: &str, to: &str, distance: f64, congestion: f64) -> Result<()> {
        validate("distance", distance)?;
        validate("congestion", congestion)?;

        let a = self.ensure_node(from);
        let b = self.ensure_node(to);
        let weight = RouteWeight {
            distance,
            congestion,
        };
        self.graph.add_edge(a, b, weight);
        self.graph.add_edge(b, a, weight);

        debug!("Added route {from} <-> {to} (distance {distance}, congestion {congestion})");
        Ok(())
    }

    fn ensure_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.node_map.insert(name.to_string(), idx);
        idx
    }

    fn index_of(&self, name: &str) -> Result<NodeIndex> {
        self.node_map.get(name).copied().ok_or_else(|| Error::UnknownNode {
            node: name.to_string(),
            suggestion: suggest_closest(name, self.nodes()),
        })
    }

    /// Whether `name` has been referenced by any route
    pub fn contains(&self, name: &str) -> bool {
        self.node_map.contains_key(name)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of roads added (each road is stored once per direction)
    pub fn route_count(&self) -> usize {
        self.graph.edge_count() / 2
    }

    /// Point names in creation order
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_weights().map(String::as_str)
    }

    /// Directed entries leaving `name`, in insertion order
    pub fn routes_from(&self, name: &str) -> Vec<Route> {
        let Some(&idx) = self.node_map.get(name) else {
            return Vec::new();
        };
        let mut edges: Vec<_> = self.graph.edges(idx).collect();
        edges.sort_by_key(|e| e.id());
        edges
            .into_iter()
            .map(|e| Route {
                from: name.to_string(),
                to: self.graph[e.target()].clone(),
                distance: e.weight().distance,
                congestion: e.weight().congestion,
            })
            .collect()
    }

    /// Shortest path from `source` to `destination` by total distance.
    ///
    /// Dijkstra with a binary heap, O((V+E) log V). Ties are resolved
    /// deterministically: a point's predecessor only changes on a strictly
    /// shorter distance, and frontier entries of equal distance are settled in
    /// point creation order, so among equal-cost alternatives the predecessor
    /// settled first wins.
    ///
    /// Fails with [`Error::UnknownNode`] if either end was never added and
    /// with [`Error::NoPath`] if both exist but are not connected.
    pub fn shortest_path(&self, source: &str, destination: &str) -> Result<Path> {
        let start = self.index_of(source)?;
        let goal = self.index_of(destination)?;

        if start == goal {
            return Ok(Path {
                nodes: vec![source.to_string()],
                distance: 0.0,
            });
        }

        let n = self.graph.node_count();
        let mut dist = vec![f64::INFINITY; n];
        let mut previous: Vec<Option<NodeIndex>> = vec![None; n];
        let mut settled = vec![false; n];
        let mut frontier = BinaryHeap::new();

        dist[start.index()] = 0.0;
        frontier.push(SearchState {
            cost: 0.0,
            node: start,
        });

        let mut iterations = 0usize;
        while let Some(SearchState { cost, node }) = frontier.pop() {
            if settled[node.index()] {
                continue;
            }
            settled[node.index()] = true;
            iterations += 1;

            if node == goal {
                debug!("Shortest path {source} -> {destination}: {cost} after settling {iterations} points");
                return Ok(Path {
                    nodes: self.reconstruct(&previous, goal),
                    distance: cost,
                });
            }

            for edge in self.graph.edges(node) {
                let next = edge.target();
                if settled[next.index()] {
                    continue;
                }
                let next_cost = cost + edge.weight().distance;
                if next_cost < dist[next.index()] {
                    dist[next.index()] = next_cost;
                    previous[next.index()] = Some(node);
                    frontier.push(SearchState {
                        cost: next_cost,
                        node: next,
                    });
                }
            }
        }

        debug!("No path {source} -> {destination} after settling {iterations} points");
        Err(Error::NoPath {
            from: source.to_string(),
            to: destination.to_string(),
        })
    }

    fn reconstruct(&self, previous: &[Option<NodeIndex>], goal: NodeIndex) -> Vec<String> {
        let mut path = vec![self.graph[goal].clone()];
        let mut current = goal;
        while let Some(prev) = previous[current.index()] {
            path.push(self.graph[prev].clone());
            current = prev;
        }
        path.reverse();
        path
    }
}
