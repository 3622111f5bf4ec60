use chrono::{NaiveDate, Timelike};
use collision_explorer::data::{
    DataLoader, DatasetCache, DatasetError, LoadError, DATE_TIME, REQUIRED_COLUMNS,
};
use collision_explorer::query::{filter_by_hour, min_injured_points, minute_histogram};
use polars::prelude::DataType;
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn drops_rows_without_coordinates() {
    let ds = DataLoader::load(&fixture("collisions.csv"), 100).unwrap();
    assert_eq!(ds.len(), 5);
    assert_eq!(ds.frame().height(), 5);
    assert!(ds
        .records()
        .iter()
        .all(|r| r.latitude.is_finite() && r.longitude.is_finite()));
    assert!(ds
        .records()
        .iter()
        .all(|r| r.on_street_name.as_deref() != Some("QUEENS BOULEVARD")));
}

#[test]
fn normalizes_column_names() {
    let ds = DataLoader::load(&fixture("collisions.csv"), 100).unwrap();
    let columns = ds.column_names();

    assert_eq!(columns[0], DATE_TIME);
    assert!(columns.iter().all(|c| *c == c.to_lowercase()));
    assert!(!columns.iter().any(|c| c == "crash_date" || c == "crash_time"));
    for required in ["latitude", "longitude", "injured_persons", "on_street_name", "borough"] {
        assert!(columns.iter().any(|c| c == required), "missing {required}");
    }
}

#[test]
fn merges_date_and_time() {
    let ds = DataLoader::load(&fixture("collisions.csv"), 100).unwrap();
    let first = &ds.records()[0];
    assert_eq!(
        first.timestamp,
        NaiveDate::from_ymd_opt(2019, 7, 13)
            .unwrap()
            .and_hms_opt(8, 5, 0)
            .unwrap()
    );
    assert_eq!(first.injured_persons, Some(2));
    assert_eq!(first.on_street_name.as_deref(), Some("ATLANTIC AVENUE"));

    let last = ds.records().last().unwrap();
    assert_eq!(last.injured_persons, None);
    assert_eq!(last.timestamp.hour(), 8);
}

#[test]
fn row_cap_applies_before_coordinate_filter() {
    let ds = DataLoader::load(&fixture("collisions.csv"), 2).unwrap();
    assert_eq!(ds.len(), 2);

    // The third row has no coordinates.
    let ds = DataLoader::load(&fixture("collisions.csv"), 3).unwrap();
    assert_eq!(ds.len(), 2);
}

#[test]
fn header_case_is_ignored() {
    let ds = DataLoader::load(&fixture("mixed_case.csv"), 10).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.records()[1].timestamp.hour(), 14);
    assert_eq!(ds.records()[0].injured_pedestrians, Some(1));
    assert!(ds.column_names().iter().any(|c| c == "on_street_name"));
}

#[test]
fn missing_file_is_a_load_error() {
    let err = DataLoader::load(&fixture("absent.csv"), 10).unwrap_err();
    assert!(matches!(err, DatasetError::Load(LoadError::NotFound(_))));
}

#[test]
fn missing_column_is_a_load_error() {
    let err = DataLoader::load(&fixture("missing_column.csv"), 10).unwrap_err();
    assert!(matches!(
        err,
        DatasetError::Load(LoadError::MissingColumn("injured_motorists"))
    ));
    assert!(REQUIRED_COLUMNS.contains(&"injured_motorists"));
}

#[test]
fn zero_row_cap_is_rejected() {
    let err = DataLoader::load(&fixture("collisions.csv"), 0).unwrap_err();
    assert!(matches!(err, DatasetError::Load(LoadError::InvalidRowCap)));
}

#[test]
fn unparsable_timestamp_fails_whole_load() {
    let err = DataLoader::load(&fixture("bad_timestamp.csv"), 10).unwrap_err();
    match err {
        DatasetError::Parse(parse) => {
            assert_eq!(parse.row, 2);
            assert!(parse.value.contains("not a date"));
        }
        other => panic!("expected parse error, got {other}"),
    }

    // The bad row is outside the cap.
    assert_eq!(DataLoader::load(&fixture("bad_timestamp.csv"), 1).unwrap().len(), 1);
}

#[test]
fn missing_time_fails_whole_load() {
    let err = DataLoader::load(&fixture("empty_time.csv"), 10).unwrap_err();
    match err {
        DatasetError::Parse(parse) => {
            assert_eq!(parse.row, 2);
            assert!(parse.value.contains("<null>"));
        }
        other => panic!("expected parse error, got {other}"),
    }
}

#[test]
fn text_coordinates_are_dropped_with_their_rows() {
    let ds = DataLoader::load(&fixture("text_latitude.csv"), 10).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.frame().height(), 2);

    let latitude = ds.frame().column("latitude").unwrap();
    assert_eq!(latitude.dtype(), &DataType::Float64);

    let streets = ds
        .frame()
        .column("on_street_name")
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .clone();
    for (i, record) in ds.records().iter().enumerate() {
        assert_eq!(streets.get(i), record.on_street_name.as_deref());
    }
    assert_eq!(ds.records()[0].latitude, 40.7506);
}

#[test]
fn repeated_loads_are_equal() {
    let path = fixture("collisions.csv");
    let a = DataLoader::load(&path, 100).unwrap();
    let b = DataLoader::load(&path, 100).unwrap();
    assert_eq!(a, b);

    let cache = DatasetCache::new();
    let c = cache.load(&path, 100).unwrap();
    let d = cache.load(&path, 100).unwrap();
    assert!(c.ptr_eq(&d));
    assert_eq!(a, c);
    assert_eq!(cache.len(), 1);

    let e = cache.load(&path, 2).unwrap();
    assert_eq!(e.len(), 2);
    assert_eq!(cache.len(), 2);
}

#[test]
fn queries_over_loaded_data() {
    let ds = DataLoader::load(&fixture("collisions.csv"), 100).unwrap();
    let all = ds.view();

    assert_eq!(min_injured_points(&all, 0).len(), 4);
    assert_eq!(min_injured_points(&all, 2).len(), 2);
    assert!(min_injured_points(&all, 19).is_empty());

    let eight = filter_by_hour(&all, 8);
    assert_eq!(eight.len(), 3);
    let histogram = minute_histogram(&eight);
    assert_eq!(histogram.total(), 3);
    assert_eq!(histogram.bins()[5], 1);
    assert_eq!(histogram.bins()[30], 1);
    assert_eq!(histogram.bins()[47], 1);
}
