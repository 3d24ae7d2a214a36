use geojson::GeoJson;
use log::Level;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use wasm_bindgen_futures::js_sys;

pub mod config;
pub mod error;
pub mod expand;
pub mod graph;
pub mod loader;
pub mod metric;
pub mod route;
pub mod types;

pub use self::config::{RouteParams, SearchConfig};
pub use self::error::Error;
pub use self::graph::{find_route, find_route_with, SearchNode, Totals};
pub use self::loader::{fetch_network, load_network, parse_network};
pub use self::metric::{great_circle_miles, Metric};
pub use self::route::{Hop, RouteResult};
pub use self::types::{Location, LocationTable, NodeId, RoadGraph, RoadNetwork, Segment};

#[wasm_bindgen]
pub fn rust_init() {
    if console_log::init_with_level(Level::Error).is_ok() {
        log::info!("Logger initialized from library");
    }
}

#[derive(Serialize)]
struct RouteResponse<'a> {
    route: &'a RouteResult,
    geojson: GeoJson,
}

/// Answers a JSON `RouteParams` request against an already loaded network.
pub fn route_json(params_json: &str, network: &RoadNetwork) -> Result<String, Error> {
    let params: RouteParams = serde_json::from_str(params_json)?;
    let metric = params.metric()?;
    let route = find_route_with(
        &params.start_city,
        &params.end_city,
        metric,
        &network.locations,
        &network.graph,
        &params.search_config(),
    )?;
    let geojson = route.to_geojson(&params.start_city, &network.locations);
    Ok(serde_json::to_string(&RouteResponse {
        route: &route,
        geojson,
    })?)
}

pub async fn plan_route_async(data_url: &str, params_json: &str) -> Result<String, String> {
    let network = fetch_network(data_url).await.map_err(|e| e.to_string())?;
    route_json(params_json, &network).map_err(|e| e.to_string())
}

/// Downloads the road data from `data_url` and answers one route request.
#[wasm_bindgen]
pub fn plan_route(data_url: String, params: String) -> js_sys::Promise {
    future_to_promise(async move {
        match plan_route_async(&data_url, &params).await {
            Ok(json) => Ok(JsValue::from_str(&json)),
            Err(e) => Err(JsValue::from_str(&e)),
        }
    })
}

/// Same as `plan_route`, for callers that already hold the two data files.
#[wasm_bindgen]
pub fn plan_route_from_text(cities: &str, segments: &str, params: &str) -> Result<String, JsValue> {
    parse_network(cities, segments)
        .and_then(|network| route_json(params, &network))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
