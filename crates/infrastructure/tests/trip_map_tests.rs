//! End-to-end map scenarios against a mocked trip service

use std::sync::Arc;

use application::{
    CommandOutcome, ErrorCategory, MapSession, SessionConfig, TripOrchestrator, TripTransportPort,
};
use domain::{FormField, GeoPoint, MapCommand, MarkerRef};
use infrastructure::{HeadlessSurface, TripServiceAdapter, load_sample_trip};
use integration_transit::{SAMPLE_DEPARTURES_JSON, TransitConfig};
use parking_lot::Mutex;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DEPARTURES_PATH: &str = "/public_transport/city/Wroclaw/closest_departures";

fn point(lat: f64, lon: f64) -> GeoPoint {
    GeoPoint::new(lat, lon).unwrap()
}

fn orchestrator(server: &MockServer) -> TripOrchestrator<HeadlessSurface> {
    let transport: Arc<dyn TripTransportPort> = Arc::new(
        TripServiceAdapter::from_config(&TransitConfig::for_testing(server.uri())).unwrap(),
    );
    let config = SessionConfig {
        result_limit: 3,
        ..SessionConfig::default()
    };
    let session = MapSession::new(HeadlessSurface::new(), config);
    TripOrchestrator::new(Arc::new(Mutex::new(session)), transport)
}

async fn plan(orchestrator: &TripOrchestrator<HeadlessSurface>) {
    for command in [
        MapCommand::Click {
            point: point(51.1090, 17.0410),
        },
        MapCommand::Click {
            point: point(51.1045, 17.0285),
        },
        MapCommand::FieldEdit {
            field: FormField::Departure,
            value: "2025-04-02T08:30:00Z".to_string(),
        },
    ] {
        assert_eq!(
            orchestrator.dispatch(command).await.unwrap(),
            CommandOutcome::Applied
        );
    }
}

#[tokio::test]
async fn test_submit_renders_stops_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DEPARTURES_PATH))
        .and(query_param("start_coordinates", "51.10900,17.04100"))
        .and(query_param("end_coordinates", "51.10450,17.02850"))
        .and(query_param("start_time", "2025-04-02T08:30:00Z"))
        .and(query_param("limit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_DEPARTURES_JSON))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = orchestrator(&server);
    plan(&orchestrator).await;

    let outcome = orchestrator.dispatch(MapCommand::Submit).await.unwrap();
    assert_eq!(outcome, CommandOutcome::Rendered { stops: 3 });

    let session = orchestrator.session();
    let session = session.lock();
    assert!(session.notice().is_none());
    assert!(session.has_marker(MarkerRef::Start));
    assert!(session.has_marker(MarkerRef::End));

    let surface = session.surface();
    assert_eq!(surface.marker_count(), 5);
    assert_eq!(surface.line_count(), 2);

    let route = surface
        .lines()
        .find(|line| line.style.color == "#e74c3c")
        .unwrap();
    assert_eq!(
        route.points,
        [
            point(51.1092, 17.0415),
            point(51.1099, 17.0335),
            point(51.1040, 17.0280),
        ]
    );

    let geojson = serde_json::to_value(surface.to_geojson()).unwrap();
    let features = geojson["features"].as_array().unwrap();
    let points = features
        .iter()
        .filter(|f| f["geometry"]["type"] == "Point")
        .count();
    let lines = features
        .iter()
        .filter(|f| f["geometry"]["type"] == "LineString")
        .count();
    assert_eq!((points, lines), (5, 2));

    let stop_popups: Vec<&str> = features
        .iter()
        .filter(|f| f["properties"]["icon"] == "bus_stop")
        .map(|f| f["properties"]["popup"].as_str().unwrap())
        .collect();
    assert_eq!(stop_popups.len(), 3);
    assert!(stop_popups[0].starts_with("Plac Grunwaldzki\nLine: A"));
    assert!(stop_popups[2].starts_with("Renoma"));

    assert!(geojson["viewport"]["bounds"].is_array());
}

#[tokio::test]
async fn test_unsupported_city_keeps_markers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(DEPARTURES_PATH))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"error": "City not supported"}"#),
        )
        .mount(&server)
        .await;

    let orchestrator = orchestrator(&server);
    plan(&orchestrator).await;

    let err = orchestrator.dispatch(MapCommand::Submit).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Server);

    let session = orchestrator.session();
    let session = session.lock();
    let notice = session.notice().unwrap();
    assert_eq!(notice.category, ErrorCategory::Server);
    assert!(notice.message.contains("not supported"));

    let surface = session.surface();
    assert_eq!(surface.marker_count(), 2);
    assert_eq!(surface.line_count(), 1);
    assert!(!session.is_submitting());
}

#[tokio::test]
async fn test_validation_failure_never_calls_service() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_DEPARTURES_JSON))
        .expect(0)
        .mount(&server)
        .await;

    let orchestrator = orchestrator(&server);
    orchestrator
        .dispatch(MapCommand::Click {
            point: point(51.1090, 17.0410),
        })
        .await
        .unwrap();

    let err = orchestrator.dispatch(MapCommand::Submit).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert_eq!(orchestrator.session().lock().surface().marker_count(), 1);
}

#[tokio::test]
async fn test_unreachable_service_is_request_error() {
    let transport: Arc<dyn TripTransportPort> = Arc::new(
        TripServiceAdapter::from_config(&TransitConfig::for_testing("http://127.0.0.1:9")).unwrap(),
    );
    let session = MapSession::new(HeadlessSurface::new(), SessionConfig::default());
    let orchestrator = TripOrchestrator::new(Arc::new(Mutex::new(session)), transport);

    assert!(!orchestrator.is_available().await);

    plan(&orchestrator).await;
    let err = orchestrator.dispatch(MapCommand::Submit).await.unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Request);

    let session = orchestrator.session();
    let session = session.lock();
    assert_eq!(session.notice().unwrap().category, ErrorCategory::Request);
    assert_eq!(session.surface().marker_count(), 2);
}

#[tokio::test]
async fn test_sample_renders_without_service() {
    let session = MapSession::new(HeadlessSurface::new(), SessionConfig::default());
    let transport: Arc<dyn TripTransportPort> = Arc::new(
        TripServiceAdapter::from_config(&TransitConfig::for_testing("http://127.0.0.1:9")).unwrap(),
    );
    let orchestrator = TripOrchestrator::new(Arc::new(Mutex::new(session)), transport)
        .with_sample(load_sample_trip().unwrap());

    let outcome = orchestrator.dispatch(MapCommand::ShowSample).await.unwrap();
    assert_eq!(outcome, CommandOutcome::Rendered { stops: 3 });

    let session = orchestrator.session();
    let session = session.lock();
    assert_eq!(session.surface().marker_count(), 5);

    let start = session.surface().markers().find(|m| m.title == "start").unwrap();
    assert_eq!(start.position, point(51.1090, 17.0410));
    assert!(start.popup.starts_with("Start: "));
}
