use priority_queue::PriorityQueue;

use std::cmp::{Ord, Ordering, PartialOrd, Reverse};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::config::SearchConfig;
use crate::error::Error;
use crate::expand::expand;
use crate::metric::{delivery_cost, distance_cost, time_cost, Metric};
use crate::route::{assemble, Hop, RouteResult};
use crate::types::{LocationTable, NodeId, RoadGraph, Segment};

// Frontier key. `total_cmp` gives every f64 a place in the order, so no
// comparison can fail even if a NaN sneaks in through the data.
#[derive(Clone, Copy)]
struct Cost(f64);

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Cost {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Cost {}

impl fmt::Debug for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cost({})", self.0)
    }
}

/// Running totals of every metric, kept whichever metric drives the search.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Totals {
    pub segments: u32,
    pub miles: f64,
    pub hours: f64,
    pub delivery_hours: f64,
}

impl Totals {
    fn after(&self, segment: &Segment) -> Totals {
        Totals {
            segments: self.segments + 1,
            miles: self.miles + distance_cost(segment),
            hours: self.hours + time_cost(segment),
            delivery_hours: self.delivery_hours + delivery_cost(segment, self.delivery_hours),
        }
    }
}

/// One partial route. Never modified once created; moving on produces a new node.
#[derive(Clone, Debug)]
pub struct SearchNode {
    pub id: NodeId,
    /// Cost so far under the active metric.
    pub g: f64,
    /// Estimated remaining cost to the goal.
    pub h: f64,
    pub route: Vec<Hop>,
    pub totals: Totals,
}

impl SearchNode {
    pub fn start(city: &str, goal: &str, metric: Metric, locations: &LocationTable) -> Self {
        SearchNode {
            id: city.to_string(),
            g: 0.0,
            h: metric.heuristic(city, goal, locations),
            route: Vec::new(),
            totals: Totals::default(),
        }
    }

    pub fn f(&self) -> f64 {
        self.g + self.h
    }

    /// The node reached by driving `segment` out of this one. A hop is only
    /// recorded when the segment ends in a city.
    pub fn traverse(
        &self,
        segment: &Segment,
        goal: &str,
        metric: Metric,
        locations: &LocationTable,
    ) -> SearchNode {
        let mut route = self.route.clone();
        if locations.is_city(&segment.end) {
            route.push(Hop {
                city: segment.end.clone(),
                description: segment.describe(),
            });
        }
        SearchNode {
            id: segment.end.clone(),
            g: self.g + metric.cost(segment, self.g),
            h: metric.heuristic(&segment.end, goal, locations),
            route,
            totals: self.totals.after(segment),
        }
    }
}

/// Min-queue on `g + h`. Equal keys come out in the order they went in.
struct Frontier {
    queue: PriorityQueue<u64, Reverse<(Cost, u64)>>,
    nodes: HashMap<u64, SearchNode>,
    next_ticket: u64,
}

impl Frontier {
    fn new() -> Self {
        Frontier {
            queue: PriorityQueue::new(),
            nodes: HashMap::new(),
            next_ticket: 0,
        }
    }

    fn push(&mut self, node: SearchNode) {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.queue.push(ticket, Reverse((Cost(node.f()), ticket)));
        self.nodes.insert(ticket, node);
    }

    fn pop(&mut self) -> Option<SearchNode> {
        let (ticket, _) = self.queue.pop()?;
        self.nodes.remove(&ticket)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }
}

pub fn find_route(
    start: &str,
    end: &str,
    metric: Metric,
    locations: &LocationTable,
    graph: &RoadGraph,
) -> Result<RouteResult, Error> {
    find_route_with(start, end, metric, locations, graph, &SearchConfig::default())
}

/// A* from `start` to `end` over cities, with junctions folded into the edges.
///
/// A city is finalised the first time it is popped and never expanded again,
/// even if a cheaper way to it shows up later. That is exact for the
/// segment, distance and time metrics. The delivery cost depends on the time
/// already driven, so its borrowed time heuristic may not be consistent and
/// delivery routes can come out slightly suboptimal.
pub fn find_route_with(
    start: &str,
    end: &str,
    metric: Metric,
    locations: &LocationTable,
    graph: &RoadGraph,
    config: &SearchConfig,
) -> Result<RouteResult, Error> {
    for city in [start, end] {
        if !locations.is_city(city) {
            return Err(Error::UnknownCity(city.to_string()));
        }
    }
    log::info!("Routing {} to {} by {}", start, end, metric);

    let mut frontier = Frontier::new();
    let mut explored: HashSet<NodeId> = HashSet::new();
    frontier.push(SearchNode::start(start, end, metric, locations));

    let mut expansions = 0;
    while let Some(node) = frontier.pop() {
        if node.id == end {
            log::info!(
                "Reached {} with cost {} after {} expansions",
                end,
                node.g,
                expansions
            );
            return Ok(assemble(node));
        }
        if explored.contains(&node.id) {
            continue;
        }
        if let Some(limit) = config.max_expansions {
            if expansions >= limit {
                log::info!("Expansion budget of {} spent", limit);
                return Err(Error::BudgetExceeded { expansions });
            }
        }
        expansions += 1;

        let successors = expand(&node, end, &explored, metric, locations, graph);
        log::debug!(
            "Expanded {} (g {}, h {}) into {} successors; frontier {}",
            node.id,
            node.g,
            node.h,
            successors.len(),
            frontier.len()
        );
        for successor in successors {
            frontier.push(successor);
        }
        explored.insert(node.id);
    }

    log::info!("Frontier empty after {} expansions", expansions);
    Err(Error::SearchExhausted {
        start: start.to_string(),
        end: end.to_string(),
    })
}
