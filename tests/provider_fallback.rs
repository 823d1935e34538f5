//! Fallback chain against local mock providers.

use std::time::Duration;

use route_planner::geo::haversine_distance_km;
use route_planner::model::{Coordinate, CustomAddress, Destination, ProviderUsed, StartLocation};
use route_planner::BatchAggregator;

mod common;

const START: Coordinate = Coordinate::new(48.78, 9.18);
const END: Coordinate = Coordinate::new(48.80, 9.20);

fn start() -> StartLocation {
    StartLocation::new(START, "Königstraße 1, Stuttgart")
}

fn destination() -> Vec<Destination> {
    vec![CustomAddress::new("c1", "Depot", "Industriestraße 4", END).into()]
}

#[tokio::test]
async fn test_second_mirror_answers_after_first_fails() {
    let (broken, broken_hits) = common::start_mock_backend(500, r#"{"message":"boom"}"#).await;
    let (healthy, healthy_hits) =
        common::start_programmable_backend(|_| async { (200, common::osrm_body(12345.0, 900.0)) }).await;

    let config = common::planner_config(&[broken, healthy], None);
    let aggregator = BatchAggregator::from_config(&config).unwrap();

    let batch = aggregator.compute_batch(&start(), &destination()).await;

    assert_eq!(batch.len(), 1);
    let row = &batch[0];
    assert!((row.distance_km - 12.345).abs() < 1e-9);
    assert_eq!(row.duration_minutes, 15);
    assert_eq!(row.provider_used, ProviderUsed::Provider("OSRM".into()));
    assert_eq!(row.geometry.len(), 3);
    assert_eq!(broken_hits.count(), 1);
    assert_eq!(healthy_hits.count(), 1);
}

#[tokio::test]
async fn test_osrm_request_shape() {
    let (mirror, _) = common::start_programmable_backend(|request| async move {
        let request_line = request.lines().next().unwrap_or_default().to_string();
        if request_line.starts_with("GET /route/v1/driving/9.18,48.78;9.2,48.8?overview=full&geometries=geojson ") {
            (200, common::osrm_body(1000.0, 60.0))
        } else {
            (400, format!(r#"{{"unexpected":"{request_line}"}}"#))
        }
    })
    .await;

    let aggregator = BatchAggregator::from_config(&common::planner_config(&[mirror], None)).unwrap();
    let batch = aggregator.compute_batch(&start(), &destination()).await;

    assert_eq!(batch[0].provider_used.as_str(), "OSRM");
}

#[tokio::test]
async fn test_valhalla_after_every_mirror_fails() {
    let (mirror, _) = common::start_mock_backend(502, "{}").await;
    let (valhalla, valhalla_hits) = common::start_programmable_backend(|request| async move {
        if request.starts_with("POST /route ")
            && request.contains(r#""costing":"auto""#)
            && request.contains(r#""shape_match":"edge_walk""#)
        {
            (
                200,
                r#"{"trip":{"legs":[{"shape":"_p~iF~ps|U_ulLnnqC_mqNvxq`@","summary":{"length":3.2,"time":420.0}}]}}"#
                    .to_string(),
            )
        } else {
            (400, "{}".to_string())
        }
    })
    .await;

    let config = common::planner_config(&[mirror], Some(valhalla));
    let aggregator = BatchAggregator::from_config(&config).unwrap();

    let batch = aggregator.compute_batch(&start(), &destination()).await;

    let row = &batch[0];
    assert_eq!(row.provider_used.as_str(), "Valhalla");
    assert!((row.distance_km - 3.2).abs() < 1e-9);
    assert_eq!(row.duration_minutes, 7);
    assert_eq!(row.geometry.points()[0], Coordinate::new(38.5, -120.2));
    assert_eq!(row.geometry.len(), 3);
    assert_eq!(valhalla_hits.count(), 1);
}

#[tokio::test]
async fn test_every_provider_failing_gives_direct_distance() {
    let (mirror_a, _) = common::start_mock_backend(500, "{}").await;
    let (mirror_b, _) = common::start_mock_backend(200, r#"{"code":"NoRoute","routes":[]}"#).await;
    let (valhalla, _) = common::start_mock_backend(503, "{}").await;

    let config = common::planner_config(&[mirror_a, mirror_b], Some(valhalla));
    let aggregator = BatchAggregator::from_config(&config).unwrap();

    let batch = aggregator.compute_batch(&start(), &destination()).await;

    let row = &batch[0];
    let expected = haversine_distance_km(START, END);
    assert!((row.distance_km - expected).abs() < 1e-9);
    assert!((row.distance_km - 2.66).abs() < 0.01);
    assert_eq!(row.provider_used, ProviderUsed::Direct);
    assert_eq!(row.geometry.points(), &[START, END]);
    assert_eq!(row.estimated_fuel_liters, row.distance_km * 0.095);
    assert_eq!(row.estimated_cost, row.estimated_fuel_liters * 1.75);
}

#[tokio::test]
async fn test_slow_mirror_times_out() {
    let (slow, _) = common::start_programmable_backend(|_| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (200, common::osrm_body(1.0, 1.0))
    })
    .await;
    let (fast, _) = common::start_mock_backend(200, r#"{"routes":[{"geometry":{"coordinates":[[9.18,48.78],[9.2,48.8]]},"distance":4200.0,"duration":360.0}]}"#).await;

    let aggregator = BatchAggregator::from_config(&common::planner_config(&[slow, fast], None)).unwrap();
    let started = std::time::Instant::now();

    let batch = aggregator.compute_batch(&start(), &destination()).await;

    assert!((batch[0].distance_km - 4.2).abs() < 1e-9);
    assert!(started.elapsed() < Duration::from_secs(3));
}

#[tokio::test]
async fn test_repeated_batch_makes_no_network_calls() {
    let (mirror, hits) =
        common::start_programmable_backend(|_| async { (200, common::osrm_body(5000.0, 300.0)) }).await;
    let aggregator = BatchAggregator::from_config(&common::planner_config(&[mirror], None)).unwrap();

    let destinations: Vec<Destination> = vec![
        CustomAddress::new("c1", "Depot", "", END).into(),
        CustomAddress::new("c2", "Yard", "", Coordinate::new(48.75, 9.10)).into(),
    ];

    let first = aggregator.compute_batch(&start(), &destinations).await;
    assert_eq!(hits.count(), 2);

    let second = aggregator.compute_batch(&start(), &destinations).await;
    assert_eq!(hits.count(), 2);
    assert_eq!(first, second);
}
