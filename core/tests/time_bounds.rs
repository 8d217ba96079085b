//! Simulation time-bound lookups.

mod common;

use common::{analytics, analytics_with, Fixture};
use fuelcycle_core::{AnalyticsConfig, QueryError, TimeSpan};

#[test]
fn end_month_is_last_zero_based_index() {
    let fixture = Fixture::new();
    fixture.time_info(1, 0, 120);
    let store = fixture.into_store();
    let a = analytics(&store);

    assert_eq!(a.start_month(None).unwrap(), 0);
    assert_eq!(a.month_count(None).unwrap(), 120);
    assert_eq!(a.end_month(None).unwrap(), 119);
    assert_eq!(a.simulation_span(None).unwrap(), TimeSpan::new(0, Some(119)));
}

#[test]
fn end_month_identity_holds_for_each_simulation() {
    let fixture = Fixture::new();
    fixture
        .time_info(1, 0, 120)
        .time_info(2, 12, 600)
        .time_info(3, 5, 6);
    let store = fixture.into_store();
    let a = analytics(&store);

    for sim_id in 1..=3 {
        let start = a.start_month(Some(sim_id)).unwrap();
        let count = a.month_count(Some(sim_id)).unwrap();
        assert_eq!(a.end_month(Some(sim_id)).unwrap(), count - start - 1);
    }
    assert_eq!(a.end_month(Some(2)).unwrap(), 587);
}

#[test]
fn configured_default_sim_id_is_used() {
    let fixture = Fixture::new();
    fixture.time_info(1, 0, 120).time_info(4, 2, 24);
    let store = fixture.into_store();
    let config = AnalyticsConfig {
        default_sim_id: 4,
        ..AnalyticsConfig::default()
    };

    assert_eq!(analytics_with(&store, config).month_count(None).unwrap(), 24);
}

#[test]
fn missing_sim_id_is_a_cardinality_fault() {
    let fixture = Fixture::new();
    fixture.time_info(1, 0, 120);
    let store = fixture.into_store();
    let a = analytics(&store);

    let err = a.start_month(Some(9)).unwrap_err();
    assert!(matches!(err, QueryError::Cardinality { sim_id: 9, rows: 0 }));
    assert!(err.to_string().contains("sim id 9"));

    assert!(matches!(
        a.month_count(Some(9)),
        Err(QueryError::Cardinality { sim_id: 9, rows: 0 })
    ));
}

#[test]
fn duplicated_sim_id_is_a_cardinality_fault() {
    let fixture = Fixture::new();
    fixture.time_info(1, 0, 120).time_info(1, 0, 240);
    let store = fixture.into_store();
    let a = analytics(&store);

    assert!(matches!(
        a.start_month(None),
        Err(QueryError::Cardinality { sim_id: 1, rows: 2 })
    ));
    assert!(matches!(
        a.month_count(None),
        Err(QueryError::Cardinality { sim_id: 1, rows: 2 })
    ));
    assert!(a.end_month(None).is_err());
}

#[test]
fn default_helpers_use_configured_sim_id() {
    let fixture = Fixture::new();
    fixture.time_info(1, 0, 120).time_info(4, 2, 24);
    let store = fixture.into_store();

    let a = analytics(&store);
    assert_eq!(a.start_month_default().unwrap(), 0);
    assert_eq!(a.month_count_default().unwrap(), 120);
    assert_eq!(a.end_month_default().unwrap(), 119);

    let config = AnalyticsConfig {
        default_sim_id: 4,
        ..AnalyticsConfig::default()
    };
    let a = analytics_with(&store, config);
    assert_eq!(a.start_month_default().unwrap(), 2);
    assert_eq!(a.month_count_default().unwrap(), 24);
    assert_eq!(a.end_month_default().unwrap(), 21);
}

#[test]
fn default_helpers_fault_on_missing_sim() {
    let store = Fixture::new().into_store();
    assert!(matches!(
        analytics(&store).end_month_default(),
        Err(QueryError::Cardinality { sim_id: 1, rows: 0 })
    ));
}
