use std::path::PathBuf;

use stormlens::query::{DateRange, EventQueries, HailQueries, TornadoQueries, WindQueries};
use stormlens::storage::{StormStore, TableStore, Value};

fn load_test_store() -> TableStore {
    let samples_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("samples");
    let mut store = TableStore::new();

    store
        .load(&samples_dir.join("wind.csv"), "wind")
        .expect("Failed to load wind.csv");
    store
        .load(&samples_dir.join("tornado.csv"), "tornado")
        .expect("Failed to load tornado.csv");
    store
        .load(&samples_dir.join("hail.csv"), "hail")
        .expect("Failed to load hail.csv");

    store
}

fn range(start: &str, end: &str) -> DateRange {
    DateRange::parse(start, end).unwrap()
}

fn event_ids(records: &[stormlens::Record]) -> Vec<f64> {
    records
        .iter()
        .filter_map(|r| r.get("EVENT_ID").and_then(Value::as_number))
        .collect()
}

#[test]
fn test_wind_gust_counts() {
    let store = load_test_store();
    let wind = WindQueries::new(&store);

    assert_eq!(wind.count_wind_gusts(50.0, &range("2011-01-01", "2012-12-31")), 5);
    assert_eq!(wind.count_wind_gusts(60.0, &range("01/01/2012", "12/31/2012")), 1);
}

#[test]
fn test_wind_percentile_rank() {
    let store = load_test_store();
    let wind = WindQueries::new(&store);

    // 50, 40 and 55 of eight rows; the missing magnitude still counts in the total.
    assert_eq!(wind.get_percentile_rank(60.0), 37.5);
}

#[test]
fn test_wind_breakdowns() {
    let store = load_test_store();
    let wind = WindQueries::new(&store);

    assert_eq!(
        wind.monthly_breakdown(),
        vec![
            ("01".to_string(), 2),
            ("03".to_string(), 2),
            ("07".to_string(), 2)
        ]
    );
    assert_eq!(
        wind.yearly_breakdown(),
        vec![("2011".to_string(), 3), ("2012".to_string(), 3)]
    );
}

#[test]
fn test_wind_top_property_damage() {
    let store = load_test_store();
    let wind = WindQueries::new(&store);

    let top = wind.top_property_damage(Some(&range("2011-01-01", "2012-12-31")), 2);
    assert_eq!(event_ids(&top), vec![1003.0, 1005.0]);

    // Whole table: missing damage sorts last, in file order.
    let all = wind.top_property_damage(None, 10);
    assert_eq!(
        event_ids(&all),
        vec![1006.0, 1003.0, 1005.0, 1008.0, 1001.0, 1004.0, 1002.0, 1007.0]
    );
}

#[test]
fn test_wind_time_range_half() {
    let store = load_test_store();
    let wind = WindQueries::new(&store);

    assert_eq!(wind.percent_of_events_in_time_range("0000", "1200"), 50.0);
    assert_eq!(wind.percent_of_events_in_time_range("0000", "2359"), 100.0);
}

#[test]
fn test_tornado_counts() {
    let store = load_test_store();
    let tornado = TornadoQueries::new(&store);
    let all_years = range("2011-01-01", "2013-12-31");

    assert_eq!(tornado.count_ef_tornadoes_exact("EF5", &all_years), 2);
    assert_eq!(tornado.count_ef_tornadoes_at_least("EF2", &all_years), 4);
    assert_eq!(tornado.count_ef_tornadoes_at_least("EF0", &all_years), 5);
    assert_eq!(tornado.count_ef_tornadoes_at_least("XX", &all_years), 5);
    assert_eq!(tornado.count_ef_tornadoes_at_least("EFU", &all_years), 6);
    // The F5 row carries an ISO date and never matches a range.
    assert_eq!(
        tornado.count_ef_tornadoes_exact("F5", &range("1900-01-01", "2100-01-01")),
        0
    );
}

#[test]
fn test_tornado_rankings() {
    let store = load_test_store();
    let tornado = TornadoQueries::new(&store);

    assert_eq!(
        event_ids(&tornado.top_tornado_length(3)),
        vec![2002.0, 2008.0, 2003.0]
    );
    assert_eq!(
        event_ids(&tornado.top_property_damage(Some(&range("2011-04-27", "2011-05-31")), 2)),
        vec![2004.0, 2003.0]
    );
}

#[test]
fn test_tornado_breakdowns_and_times() {
    let store = load_test_store();
    let tornado = TornadoQueries::new(&store);

    assert_eq!(
        tornado.monthly_breakdown(),
        vec![
            ("04".to_string(), 3),
            ("05".to_string(), 3),
            ("06".to_string(), 1)
        ]
    );
    assert_eq!(
        tornado.yearly_breakdown(),
        vec![("2011".to_string(), 5), ("2013".to_string(), 2)]
    );
    assert_eq!(tornado.percent_of_tornadoes_between_times("1200", "1659"), 75.0);
}

#[test]
fn test_hail_queries() {
    let store = load_test_store();
    let hail = HailQueries::new(&store);

    assert_eq!(hail.count_hail_above_size(1.0, &range("2010-01-01", "2012-12-31")), 5);
    assert_eq!(hail.count_hail_above_size(2.0, &range("2011-01-01", "2011-12-31")), 1);
    assert_eq!(
        hail.monthly_breakdown(),
        vec![
            ("05".to_string(), 1),
            ("06".to_string(), 2),
            ("07".to_string(), 2),
            ("08".to_string(), 1)
        ]
    );
    assert_eq!(
        hail.yearly_breakdown(),
        vec![
            ("2010".to_string(), 3),
            ("2011".to_string(), 2),
            ("2012".to_string(), 1)
        ]
    );

    let morning = hail.percent_of_hail_in_time_range("0000", "1200");
    assert!((morning - 100.0 / 6.0).abs() < 1e-9);
    let afternoon = hail.percent_of_hail_in_time_range("1200", "2359");
    assert!((afternoon - 400.0 / 6.0).abs() < 1e-9);
}

#[test]
fn test_unloaded_tables_return_empty_values() {
    let store = TableStore::new();
    let any = range("1950-01-01", "2050-12-31");
    let wind = WindQueries::new(&store);
    let tornado = TornadoQueries::new(&store);
    let hail = HailQueries::new(&store);

    assert_eq!(wind.count_wind_gusts(0.0, &any), 0);
    assert_eq!(wind.get_percentile_rank(100.0), 0.0);
    assert_eq!(tornado.count_ef_tornadoes_exact("EF1", &any), 0);
    assert_eq!(tornado.count_ef_tornadoes_at_least("EF1", &any), 0);
    assert!(tornado.top_tornado_length(5).is_empty());
    assert_eq!(hail.count_hail_above_size(0.0, &any), 0);

    let domains: [&dyn EventQueries; 3] = [&wind, &tornado, &hail];
    for domain in domains {
        assert!(domain.monthly_breakdown().is_empty());
        assert!(domain.yearly_breakdown().is_empty());
        assert!(domain.top_property_damage(Some(&any), 5).is_empty());
        assert_eq!(domain.percent_of_events_in_time_range("0000", "2359"), 0.0);
    }
}

#[test]
fn test_header_only_table_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wind.csv");
    std::fs::write(&path, "DATE,BEGIN_TIME,MAGNITUDE (Knots),DAMAGE_PROPERTY_NUM\n").unwrap();

    let mut store = TableStore::new();
    store.load(&path, "wind").unwrap();
    let wind = WindQueries::new(&store);

    assert!(store.get("wind").is_some());
    assert_eq!(wind.get_percentile_rank(50.0), 0.0);
    assert_eq!(wind.percent_of_events_in_time_range("0000", "2359"), 0.0);
    assert!(wind.monthly_breakdown().is_empty());
}

#[test]
fn test_queries_are_repeatable() {
    let store = load_test_store();
    let tornado = TornadoQueries::new(&store);
    let spring = range("2011-04-01", "2011-05-31");

    assert_eq!(
        tornado.top_property_damage(Some(&spring), 3),
        tornado.top_property_damage(Some(&spring), 3)
    );
    assert_eq!(tornado.monthly_breakdown(), tornado.monthly_breakdown());
    assert_eq!(
        tornado.count_ef_tornadoes_at_least("EF3", &spring),
        tornado.count_ef_tornadoes_at_least("EF3", &spring)
    );
    assert_eq!(store.get("tornado").unwrap().row_count(), 8);
}

#[test]
fn test_many_components_share_one_store() {
    let store = load_test_store();
    let first = WindQueries::new(&store);
    let second = WindQueries::with_table(&store, "wind");

    assert_eq!(first.yearly_breakdown(), second.yearly_breakdown());
    assert_eq!(second.table_name(), "wind");
}
