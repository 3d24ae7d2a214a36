use geo::{Coord, LineString};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};
use serde::Serialize;
use serde_json::{json, Map, Value as JsonValue};
use std::fmt;

use crate::graph::SearchNode;
use crate::types::{LocationTable, NodeId};

/// One city-to-city leg of a route.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Hop {
    pub city: NodeId,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RouteResult {
    pub segments_count: u32,
    pub total_miles: f64,
    pub total_hours: f64,
    pub total_delivery_hours: f64,
    pub hops: Vec<Hop>,
}

pub fn assemble(node: SearchNode) -> RouteResult {
    RouteResult {
        segments_count: node.totals.segments,
        total_miles: node.totals.miles,
        total_hours: node.totals.hours,
        total_delivery_hours: node.totals.delivery_hours,
        hops: node.route,
    }
}

impl RouteResult {
    pub fn cities(&self) -> impl Iterator<Item = &str> + '_ {
        self.hops.iter().map(|hop| hop.city.as_str())
    }

    /// The route as a line through `start` and every hop, plus one point per hop.
    pub fn to_geojson(&self, start: &str, locations: &LocationTable) -> GeoJson {
        let coords: Vec<Coord<f64>> = std::iter::once(start)
            .chain(self.cities())
            .filter_map(|city| locations.get(city))
            .map(|loc| Coord { x: loc.longitude, y: loc.latitude })
            .collect();

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for coord in &coords {
            min_x = min_x.min(coord.x);
            min_y = min_y.min(coord.y);
            max_x = max_x.max(coord.x);
            max_y = max_y.max(coord.y);
        }

        let mut features = Vec::with_capacity(self.hops.len() + 1);
        if coords.len() > 1 {
            let line = LineString::from(coords.clone());
            features.push(Feature {
                geometry: Some(Geometry::new(Value::from(&line))),
                properties: properties(json!({
                    "segments": self.segments_count,
                    "miles": self.total_miles,
                    "hours": self.total_hours,
                    "delivery_hours": self.total_delivery_hours,
                })),
                ..Default::default()
            });
        }
        for hop in &self.hops {
            let Some(loc) = locations.get(&hop.city) else { continue };
            features.push(Feature {
                geometry: Some(Geometry::new(Value::Point(vec![loc.longitude, loc.latitude]))),
                properties: properties(json!({
                    "city": hop.city,
                    "description": hop.description,
                })),
                ..Default::default()
            });
        }

        GeoJson::FeatureCollection(FeatureCollection {
            bbox: (!coords.is_empty()).then(|| vec![min_x, min_y, max_x, max_y]),
            features,
            foreign_members: None,
        })
    }
}

fn properties(value: JsonValue) -> Option<Map<String, JsonValue>> {
    match value {
        JsonValue::Object(map) => Some(map),
        _ => None,
    }
}

impl fmt::Display for RouteResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for hop in &self.hops {
            writeln!(f, "   Then go to {} via {}", hop.city, hop.description)?;
        }
        writeln!(f)?;
        writeln!(f, "          Total segments: {:4}", self.segments_count)?;
        writeln!(f, "             Total miles: {:8.3}", self.total_miles)?;
        writeln!(f, "             Total hours: {:8.3}", self.total_hours)?;
        write!(f, "Total hours for delivery: {:8.3}", self.total_delivery_hours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Totals;
    use crate::types::Location;

    fn finished() -> SearchNode {
        SearchNode {
            id: "Indianapolis,_Indiana".into(),
            g: 51.0,
            h: 0.0,
            route: vec![
                Hop { city: "Martinsville,_Indiana".into(), description: "IN_37 for 21 miles".into() },
                Hop { city: "Indianapolis,_Indiana".into(), description: "IN_37 for 30 miles".into() },
            ],
            totals: Totals { segments: 3, miles: 51.0, hours: 0.85, delivery_hours: 0.9 },
        }
    }

    fn indiana() -> LocationTable {
        let mut locations = LocationTable::new();
        locations.insert("Bloomington,_Indiana", Location { latitude: 39.165325, longitude: -86.5263857 });
        locations.insert("Martinsville,_Indiana", Location { latitude: 39.4278, longitude: -86.4284 });
        locations.insert("Indianapolis,_Indiana", Location { latitude: 39.7684030, longitude: -86.1580680 });
        locations
    }

    #[test]
    fn assembly_projects_the_totals() {
        let route = assemble(finished());
        assert_eq!(route.segments_count, 3);
        assert_eq!(route.total_miles, 51.0);
        assert_eq!(route.total_hours, 0.85);
        assert_eq!(route.total_delivery_hours, 0.9);
        assert_eq!(
            route.cities().collect::<Vec<_>>(),
            vec!["Martinsville,_Indiana", "Indianapolis,_Indiana"]
        );
    }

    #[test]
    fn report_lists_hops_then_totals() {
        let report = assemble(finished()).to_string();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "   Then go to Martinsville,_Indiana via IN_37 for 21 miles");
        assert_eq!(lines[3], "          Total segments:    3");
        assert_eq!(lines[4], "             Total miles:   51.000");
        assert_eq!(lines[6], "Total hours for delivery:    0.900");
    }

    #[test]
    fn geojson_has_a_line_and_a_point_per_hop() {
        let geojson = assemble(finished()).to_geojson("Bloomington,_Indiana", &indiana());
        let GeoJson::FeatureCollection(collection) = geojson else {
            panic!("expected a feature collection");
        };
        assert_eq!(collection.features.len(), 3);
        match &collection.features[0].geometry.as_ref().unwrap().value {
            Value::LineString(points) => assert_eq!(points.len(), 3),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            collection.features[2].properties.as_ref().unwrap()["city"],
            "Indianapolis,_Indiana"
        );
        let bbox = collection.bbox.unwrap();
        assert_eq!(bbox[1], 39.165325);
        assert_eq!(bbox[3], 39.7684030);
    }

    #[test]
    fn empty_route_is_only_a_bbox() {
        let route = RouteResult {
            segments_count: 0,
            total_miles: 0.0,
            total_hours: 0.0,
            total_delivery_hours: 0.0,
            hops: Vec::new(),
        };
        let GeoJson::FeatureCollection(collection) = route.to_geojson("Bloomington,_Indiana", &indiana()) else {
            panic!("expected a feature collection");
        };
        assert!(collection.features.is_empty());
        assert!(collection.bbox.is_some());
    }
}
