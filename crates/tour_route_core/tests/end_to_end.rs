use tour_route_core::{
    AxisOrder, CoordinateError, Jitter, LatLng, RawWaypoint, RouteSynthesizer, TourRequest,
    TransportMode, haversine_m, normalize, optimize_tour, parse_waypoints,
};

#[test]
fn square_from_text_input_visits_adjacent_corners_first() {
    let waypoints = parse_waypoints("0,0 0,0.009 0.009,0.009 0.009,0").expect("parse");
    let plan = optimize_tour(&waypoints, &TourRequest::default()).expect("plan");

    assert_eq!(plan.order, vec![0, 1, 2, 3]);
    let side = haversine_m(LatLng::new(0.0, 0.0), LatLng::new(0.0, 0.009));
    let diagonal = haversine_m(LatLng::new(0.0, 0.0), LatLng::new(0.009, 0.009));
    assert!(plan.total_distance_meters < (2.0 * side + diagonal) * 1.3);
    assert!((plan.total_distance_meters / 1.3 - 3.0 * side).abs() < 1.0);

    let first = plan.segment(0, 1).expect("first leg");
    assert!((first.distance_meters - side * 1.3).abs() < 1e-6);
    assert!((first.duration_seconds.car - first.distance_meters / 8.3).abs() < 1e-6);
}

#[test]
fn normalizer_examples() {
    assert!(matches!(
        normalize(200.0, 45.0),
        Err(CoordinateError::OutOfRange { .. })
    ));
    assert!(matches!(
        normalize(45.0, 200.0),
        Err(CoordinateError::OutOfRange { .. })
    ));
    let swapped = normalize(95.0, 40.0).expect("swap");
    assert_eq!(swapped.point, LatLng::new(40.0, 95.0));
    assert_eq!(swapped.order, AxisOrder::Swapped);
}

#[test]
fn mixed_json_input_reports_dropped_indices() {
    let waypoints = parse_waypoints(
        r#"[[52.52, 13.40], [13.41, 52.53], ["abc", 1], [52.51, 13.39], [500, 500]]"#,
    )
    .expect("parse");
    let plan = optimize_tour(&waypoints, &TourRequest::default()).expect("plan");

    assert_eq!(plan.order.len(), 3);
    assert_eq!(plan.skipped(waypoints.len()), vec![2, 4]);
    assert_eq!(plan.rejected.iter().map(|r| r.index).collect::<Vec<_>>(), vec![2, 4]);
    // (52.52, 13.40) and (52.51, 13.39) both fit the latitude range.
    assert!(plan.ambiguous.contains(&0));
}

#[test]
fn plan_serializes_geometry_as_lng_lat_pairs() {
    let waypoints: Vec<RawWaypoint> = vec![
        (48.8566, 2.3522).into(),
        (48.8606, 2.3376).into(),
        (48.8530, 2.3499).into(),
    ];
    let request = TourRequest::default()
        .with_mode(TransportMode::Bike)
        .with_geometry(true)
        .with_jitter(Jitter::Seeded(5));
    let plan = optimize_tour(&waypoints, &request).expect("plan");
    let json = serde_json::to_value(&plan).expect("json");

    assert_eq!(json["mode"], "bike");
    let first_leg = &json["geometries"][0]["coordinates"];
    assert_eq!(first_leg[0][0], 2.3522);
    assert_eq!(first_leg[0][1], 48.8566);
}

#[test]
fn synthesizer_distance_never_undercuts_straight_line() {
    let synth = RouteSynthesizer::default();
    let pairs = [
        (LatLng::new(0.0, 0.0), LatLng::new(0.0, 0.0)),
        (LatLng::new(-33.86, 151.21), LatLng::new(51.5, -0.12)),
        (LatLng::new(89.0, 10.0), LatLng::new(-89.0, -170.0)),
    ];
    for (a, b) in pairs {
        let est = synth.estimate(a, b, TransportMode::Car);
        assert!(est.distance_m >= haversine_m(a, b));
        assert!(est.duration_s >= 0.0);
    }
}
