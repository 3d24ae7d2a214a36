use std::collections::HashMap;

use crate::error::Error;
use crate::graph::find_route;
use crate::metric::Metric;
use crate::route::RouteResult;

// ** Coordinates **

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

// ** Road network **

/// Name of a graph node. A node is a city iff the `LocationTable` knows it,
/// everything else is an unnamed junction.
pub type NodeId = String;

// One road segment as seen from one of its endpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub end: NodeId,
    pub length_miles: f64,
    pub speed_limit_mph: f64,
    pub road: String,
}

impl Segment {
    /// Driving time at the speed limit.
    pub fn hours(&self) -> f64 {
        self.length_miles / self.speed_limit_mph
    }

    pub fn describe(&self) -> String {
        format!("{} for {} miles", self.road, self.length_miles)
    }
}

#[derive(Clone, Debug, Default)]
pub struct LocationTable {
    cities: HashMap<NodeId, Location>,
}

impl LocationTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, city: impl Into<NodeId>, location: Location) {
        self.cities.insert(city.into(), location);
    }

    pub fn get(&self, city: &str) -> Option<&Location> {
        self.cities.get(city)
    }

    pub fn is_city(&self, node: &str) -> bool {
        self.cities.contains_key(node)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

/// Undirected adjacency lists. Every segment is stored once per endpoint.
#[derive(Clone, Debug, Default)]
pub struct RoadGraph {
    adjacency: HashMap<NodeId, Vec<Segment>>,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_segment(
        &mut self,
        a: impl Into<NodeId>,
        b: impl Into<NodeId>,
        length_miles: f64,
        speed_limit_mph: f64,
        road: impl Into<String>,
    ) {
        let (a, b, road) = (a.into(), b.into(), road.into());
        self.adjacency.entry(a.clone()).or_default().push(Segment {
            end: b.clone(),
            length_miles,
            speed_limit_mph,
            road: road.clone(),
        });
        self.adjacency.entry(b).or_default().push(Segment {
            end: a,
            length_miles,
            speed_limit_mph,
            road,
        });
    }

    /// Segments leaving `node`, in insertion order. Unknown nodes have none.
    pub fn neighbors(&self, node: &str) -> &[Segment] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn segment_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }
}

/// Both lookup tables of a loaded data set.
#[derive(Clone, Debug, Default)]
pub struct RoadNetwork {
    pub locations: LocationTable,
    pub graph: RoadGraph,
}

impl RoadNetwork {
    pub fn new(locations: LocationTable, graph: RoadGraph) -> Self {
        Self { locations, graph }
    }

    pub fn route(&self, start: &str, end: &str, metric: Metric) -> Result<RouteResult, Error> {
        find_route(start, end, metric, &self.locations, &self.graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segments_are_stored_for_both_endpoints() {
        let mut graph = RoadGraph::new();
        graph.add_segment("A", "B", 12.0, 55.0, "IN_37");

        assert_eq!(graph.neighbors("A").len(), 1);
        assert_eq!(graph.neighbors("A")[0].end, "B");
        assert_eq!(graph.neighbors("B")[0].end, "A");
        assert_eq!(graph.segment_count(), 1);
        assert!(graph.neighbors("C").is_empty());
    }

    #[test]
    fn segment_description_uses_plain_miles() {
        let segment = Segment {
            end: "B".into(),
            length_miles: 12.0,
            speed_limit_mph: 60.0,
            road: "I-69".into(),
        };
        assert_eq!(segment.describe(), "I-69 for 12 miles");
        assert!((segment.hours() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn only_located_nodes_are_cities() {
        let mut locations = LocationTable::new();
        locations.insert("Bloomington,_Indiana", Location { latitude: 39.16, longitude: -86.52 });
        assert!(locations.is_city("Bloomington,_Indiana"));
        assert!(!locations.is_city("Jct_I-69_&_IN_37"));
    }
}
