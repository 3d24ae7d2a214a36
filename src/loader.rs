use reqwest::Client;
use std::path::Path;

use crate::error::Error;
use crate::types::{Location, LocationTable, RoadGraph, RoadNetwork};

pub const CITY_FILE: &str = "city-gps.txt";
pub const SEGMENT_FILE: &str = "road-segments.txt";

fn invalid(source_name: &str, line: usize, reason: impl Into<String>) -> Error {
    Error::InvalidData {
        source_name: source_name.to_string(),
        line,
        reason: reason.into(),
    }
}

fn number(source_name: &str, line: usize, field: &str, raw: &str) -> Result<f64, Error> {
    raw.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| invalid(source_name, line, format!("{} is not a number: {:?}", field, raw)))
}

// One `name latitude longitude` record per line.
pub fn parse_locations(text: &str, source_name: &str) -> Result<LocationTable, Error> {
    let mut locations = LocationTable::new();
    for (i, line) in text.lines().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        let [city, latitude, longitude] = fields[..] else {
            return Err(invalid(source_name, i + 1, format!("expected 3 fields, got {}", fields.len())));
        };
        let latitude = number(source_name, i + 1, "latitude", latitude)?;
        let longitude = number(source_name, i + 1, "longitude", longitude)?;
        locations.insert(city, Location { latitude, longitude });
    }
    Ok(locations)
}

// One `a b miles mph road` record per line. Road names never contain spaces in
// the published data, but any trailing words are kept as part of the name.
pub fn parse_segments(text: &str, source_name: &str) -> Result<RoadGraph, Error> {
    let mut graph = RoadGraph::new();
    for (i, line) in text.lines().enumerate() {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }
        if fields.len() < 5 {
            return Err(invalid(source_name, i + 1, format!("expected 5 fields, got {}", fields.len())));
        }
        let length_miles = number(source_name, i + 1, "length", fields[2])?;
        if length_miles < 0.0 {
            return Err(invalid(source_name, i + 1, "negative length"));
        }
        let speed_limit_mph = number(source_name, i + 1, "speed limit", fields[3])?;
        if speed_limit_mph <= 0.0 {
            return Err(invalid(source_name, i + 1, "speed limit must be positive"));
        }
        graph.add_segment(fields[0], fields[1], length_miles, speed_limit_mph, fields[4..].join(" "));
    }
    Ok(graph)
}

pub fn parse_network(cities: &str, segments: &str) -> Result<RoadNetwork, Error> {
    let locations = parse_locations(cities, CITY_FILE)?;
    let graph = parse_segments(segments, SEGMENT_FILE)?;
    log::info!(
        "Loaded {} cities and {} segments over {} nodes",
        locations.len(),
        graph.segment_count(),
        graph.node_count()
    );
    Ok(RoadNetwork::new(locations, graph))
}

/// Reads `city-gps.txt` and `road-segments.txt` from `dir`.
pub fn load_network(dir: impl AsRef<Path>) -> Result<RoadNetwork, Error> {
    let dir = dir.as_ref();
    let cities = std::fs::read_to_string(dir.join(CITY_FILE))?;
    let segments = std::fs::read_to_string(dir.join(SEGMENT_FILE))?;
    parse_network(&cities, &segments)
}

async fn fetch_text(client: &Client, url: &str) -> Result<String, Error> {
    log::info!("Fetching {}", url);
    let text = client.get(url).send().await?.error_for_status()?.text().await?;
    Ok(text)
}

/// Downloads both data files from `base_url`.
pub async fn fetch_network(base_url: &str) -> Result<RoadNetwork, Error> {
    let base_url = base_url.trim_end_matches('/');
    let client = Client::new();
    let cities = fetch_text(&client, &format!("{}/{}", base_url, CITY_FILE)).await?;
    let segments = fetch_text(&client, &format!("{}/{}", base_url, SEGMENT_FILE)).await?;
    parse_network(&cities, &segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CITIES: &str = "\
Bloomington,_Indiana 39.165325 -86.5263857
Martinsville,_Indiana 39.4278 -86.4284

Indianapolis,_Indiana 39.7684030 -86.1580680
";

    const SEGMENTS: &str = "\
Bloomington,_Indiana Jct_I-69_&_IN_39 20 65 I-69
Jct_I-69_&_IN_39 Martinsville,_Indiana 3 45 IN_39
Martinsville,_Indiana Indianapolis,_Indiana 30 55 IN_37
";

    #[test]
    fn parses_both_tables() {
        let network = parse_network(CITIES, SEGMENTS).unwrap();
        assert_eq!(network.locations.len(), 3);
        assert_eq!(network.graph.segment_count(), 3);
        assert_eq!(network.graph.node_count(), 4);
        assert!(!network.locations.is_city("Jct_I-69_&_IN_39"));

        let first = &network.graph.neighbors("Bloomington,_Indiana")[0];
        assert_eq!(first.end, "Jct_I-69_&_IN_39");
        assert_eq!(first.length_miles, 20.0);
        assert_eq!(first.speed_limit_mph, 65.0);
        assert_eq!(first.road, "I-69");
    }

    #[test]
    fn loaded_network_routes_through_junctions() {
        let network = parse_network(CITIES, SEGMENTS).unwrap();
        let route = network
            .route("Bloomington,_Indiana", "Indianapolis,_Indiana", crate::metric::Metric::Distance)
            .unwrap();
        assert_eq!(
            route.cities().collect::<Vec<_>>(),
            vec!["Martinsville,_Indiana", "Indianapolis,_Indiana"]
        );
        assert_eq!(route.segments_count, 3);
        assert_eq!(route.total_miles, 53.0);
    }

    #[test]
    fn bad_records_report_their_line() {
        match parse_locations("A 1 2\nB 1\n", CITY_FILE) {
            Err(Error::InvalidData { source_name, line, .. }) => {
                assert_eq!(source_name, CITY_FILE);
                assert_eq!(line, 2);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(
            parse_segments("A B ten 55 US_50\n", SEGMENT_FILE),
            Err(Error::InvalidData { line: 1, .. })
        ));
        assert!(matches!(
            parse_segments("A B 10 55 US_50\nA C 10 0 US_50\n", SEGMENT_FILE),
            Err(Error::InvalidData { line: 2, .. })
        ));
        assert!(matches!(
            parse_segments("A B -1 55 US_50\n", SEGMENT_FILE),
            Err(Error::InvalidData { line: 1, .. })
        ));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        assert!(matches!(
            load_network("/nonexistent/road-data"),
            Err(Error::Io(_))
        ));
    }
}
