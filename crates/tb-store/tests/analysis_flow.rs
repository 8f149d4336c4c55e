//! Integration tests driving the analysis engines through the in-memory
//! store with a month of mixed bookings: multiple projects and activities,
//! weekday and weekend work, an open booking and (in one test) overlaps.

use chrono::{NaiveDate, NaiveTime};
use tb_core::{Activity, AnalysisService, Booking, StoreError};
use tb_store::MemoryStore;

fn day(d: u32) -> NaiveDate {
    // March 2017: the 1st is a Wednesday, the 4th a Saturday.
    NaiveDate::from_ymd_opt(2017, 3, d).unwrap()
}

fn april_first() -> NaiveDate {
    NaiveDate::from_ymd_opt(2017, 4, 1).unwrap()
}

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

struct Fixture {
    store: MemoryStore,
    deploy: i64,
    backend: i64,
}

/// One user, three activities across two projects, bookings spread over
/// March 2017 with one still-open booking on the 24th.
fn march_fixture() -> Fixture {
    let mut store = MemoryStore::new();
    let frontend = store.add_activity(
        Activity::new("freya", "Website Relaunch", "WEB", "Frontend", "FE").unwrap(),
    );
    let deploy = store.add_activity(
        Activity::new("freya", "Internal Tools", "INT", "Deployment", "DEP").unwrap(),
    );
    let backend = store.add_activity(
        Activity::new("freya", "Website Relaunch", "WEB", "Backend", "BE").unwrap(),
    );

    let mut book = |d: u32, start: NaiveTime, end: Option<NaiveTime>, activity: i64, comment| {
        store.add_booking(
            Booking::new("freya", day(d), start, end, activity, comment).unwrap(),
        );
    };
    book(1, at(12, 34), Some(at(13, 57)), frontend, "sprint review");
    book(1, at(13, 57), Some(at(14, 35)), deploy, "");
    book(6, at(8, 15), Some(at(9, 42)), backend, "api sketch");
    book(6, at(15, 39), Some(at(18, 45)), frontend, "layout fixes");
    book(9, at(9, 42), Some(at(14, 35)), deploy, "");
    book(9, at(14, 35), Some(at(17, 25)), backend, "");
    book(15, at(8, 15), Some(at(15, 39)), frontend, "api sketch");
    book(15, at(15, 39), Some(at(18, 45)), deploy, "layout fixes");
    book(24, at(8, 15), None, backend, "");
    book(28, at(9, 42), Some(at(18, 45)), frontend, "");

    Fixture {
        store,
        deploy,
        backend,
    }
}

#[test]
fn hour_analysis_over_a_month() {
    let fixture = march_fixture();
    let service = AnalysisService::new(&fixture.store, &fixture.store);
    let rows = service
        .run_hour_analysis("freya", day(1), april_first())
        .unwrap();
    assert_eq!(rows.len(), 6);

    let first = &rows[0];
    assert_eq!(first.bookingday, "2017-03-01");
    assert_eq!(first.starttime, "12:34");
    assert_eq!(first.endtime, "14:35");
    assert_eq!(first.presence, " 02:01");
    assert_eq!(first.worktime, " 02:01");
    assert_eq!(first.breaktime, " 00:00");
    assert_eq!(first.total, " 02:01");
    assert_eq!(first.overtime, "-05:59");
    assert_eq!(first.comment, "");

    let unfinished = &rows[4];
    assert_eq!(unfinished.bookingday, "2017-03-24");
    assert_eq!(unfinished.comment, "Day has unfinished bookings!");
    assert_eq!(unfinished.worktime, "");
    assert_eq!(unfinished.overtime, "");

    let last = &rows[5];
    assert_eq!(last.bookingday, "2017-03-28");
    assert_eq!(last.total, " 33:50");
    assert_eq!(last.overtime, "-06:10");
    assert_eq!(last.comment, "Break too short!");
}

#[test]
fn hour_analysis_month_snapshot() {
    let fixture = march_fixture();
    let service = AnalysisService::new(&fixture.store, &fixture.store);
    let rows = service
        .run_hour_analysis("freya", day(1), april_first())
        .unwrap();

    let lines: Vec<String> = rows
        .iter()
        .map(|r| {
            format!(
                "{} | {} | {} | [{}]",
                r.bookingday, r.worktime, r.overtime, r.comment
            )
        })
        .collect();
    insta::assert_snapshot!(lines.join("\n"), @r"
    2017-03-01 |  02:01 | -05:59 | []
    2017-03-06 |  04:33 | -09:26 | []
    2017-03-09 |  07:43 | -09:43 | [Break too short!]
    2017-03-15 |  10:30 | -07:13 | [> 10 hours worktime!]
    2017-03-24 |  |  | [Day has unfinished bookings!]
    2017-03-28 |  09:03 | -06:10 | [Break too short!]
    ");
}

#[test]
fn activity_analysis_over_a_month() {
    let fixture = march_fixture();
    let service = AnalysisService::new(&fixture.store, &fixture.store);
    let rows = service
        .run_activity_analysis("freya", day(1), april_first())
        .unwrap();
    assert_eq!(rows.len(), 4);

    // Sorted by (project id, activity id), total last.
    assert_eq!(rows[0].project_id, "INT");
    assert_eq!(rows[0].activity_id, "DEP");
    assert_eq!(rows[0].minutes, " 08:37");
    assert_eq!(rows[0].percentage, "25.5%");

    assert_eq!(rows[1].project_id, "WEB");
    assert_eq!(rows[1].activity_id, "BE");
    assert_eq!(rows[1].minutes, " 04:17");
    assert_eq!(rows[1].percentage, "12.7%");

    assert_eq!(rows[2].project_id, "WEB");
    assert_eq!(rows[2].activity_id, "FE");
    assert_eq!(rows[2].minutes, " 20:56");
    assert_eq!(rows[2].percentage, "61.9%");

    assert_eq!(rows[3].project_name, "Total");
    assert_eq!(rows[3].minutes, " 33:50");
    assert_eq!(rows[3].percentage, "100.0%");

    // Multi-day range: comments are suppressed everywhere.
    assert!(rows.iter().all(|r| r.comment.is_empty()));
}

#[test]
fn project_analysis_over_a_month() {
    let fixture = march_fixture();
    let service = AnalysisService::new(&fixture.store, &fixture.store);
    let rows = service
        .run_project_analysis("freya", day(1), april_first())
        .unwrap();
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].project_id, "INT");
    assert_eq!(rows[0].project_name, "Internal Tools");
    assert_eq!(rows[0].minutes, " 08:37");
    assert_eq!(rows[0].percentage, "25.5%");

    assert_eq!(rows[1].project_id, "WEB");
    assert_eq!(rows[1].project_name, "Website Relaunch");
    assert_eq!(rows[1].minutes, " 25:13");
    assert_eq!(rows[1].percentage, "74.5%");

    assert_eq!(rows[2].project_name, "Total");
    assert_eq!(rows[2].project_id, "");
    assert_eq!(rows[2].minutes, " 33:50");
    assert_eq!(rows[2].percentage, "100.0%");
}

#[test]
fn single_day_activity_analysis_rolls_up_comments() {
    let fixture = march_fixture();
    let service = AnalysisService::new(&fixture.store, &fixture.store);
    let rows = service
        .run_activity_analysis("freya", day(15), day(16))
        .unwrap();
    assert_eq!(rows.len(), 3);

    assert_eq!(rows[0].activity_id, "DEP");
    assert_eq!(rows[0].minutes, " 03:06");
    assert_eq!(rows[0].percentage, "29.5%");
    assert_eq!(rows[0].comment, "layout fixes");

    assert_eq!(rows[1].activity_id, "FE");
    assert_eq!(rows[1].minutes, " 07:24");
    assert_eq!(rows[1].percentage, "70.5%");
    assert_eq!(rows[1].comment, "api sketch");

    assert_eq!(rows[2].minutes, " 10:30");
}

#[test]
fn overlapping_bookings_flag_only_their_day() {
    let mut fixture = march_fixture();
    // A second afternoon booking on the 6th overlaps the existing one; the
    // late shift on the 9th pushes that day beyond ten hours.
    fixture.store.add_booking(
        Booking::new("freya", day(6), at(14, 35), Some(at(17, 25)), fixture.backend, "")
            .unwrap(),
    );
    fixture.store.add_booking(
        Booking::new("freya", day(9), at(18, 45), Some(at(21, 45)), fixture.deploy, "")
            .unwrap(),
    );

    let service = AnalysisService::new(&fixture.store, &fixture.store);
    let rows = service.run_hour_analysis("freya", day(6), day(13)).unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].bookingday, "2017-03-06");
    assert_eq!(rows[0].comment, "Day has overlapping bookings!");
    assert_eq!(rows[0].worktime, "");

    assert_eq!(rows[1].bookingday, "2017-03-09");
    assert_eq!(rows[1].worktime, " 10:43");
    assert_eq!(rows[1].presence, " 12:03");
    assert_eq!(rows[1].breaktime, " 01:20");
    assert_eq!(rows[1].comment, "> 10 hours worktime!");
    // The flagged 6th contributed nothing, so the 9th carries the whole range.
    assert_eq!(rows[1].total, " 10:43");
    assert_eq!(rows[1].overtime, " 02:43");
}

#[test]
fn unfinished_day_does_not_move_the_running_totals() {
    let fixture = march_fixture();
    let service = AnalysisService::new(&fixture.store, &fixture.store);
    let rows = service.run_hour_analysis("freya", day(24), day(29)).unwrap();
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].comment, "Day has unfinished bookings!");
    assert_eq!(rows[1].bookingday, "2017-03-28");
    assert_eq!(rows[1].total, " 09:03");
    assert_eq!(rows[1].overtime, " 01:03");
}

#[test]
fn analyses_are_repeatable() {
    let fixture = march_fixture();
    let service = AnalysisService::new(&fixture.store, &fixture.store);

    let hours_a = service
        .run_hour_analysis("freya", day(1), april_first())
        .unwrap();
    let hours_b = service
        .run_hour_analysis("freya", day(1), april_first())
        .unwrap();
    assert_eq!(hours_a, hours_b);

    let acts_a = service
        .run_activity_analysis("freya", day(1), april_first())
        .unwrap();
    let acts_b = service
        .run_activity_analysis("freya", day(1), april_first())
        .unwrap();
    assert_eq!(acts_a, acts_b);
}

#[test]
fn other_users_see_nothing() {
    let fixture = march_fixture();
    let service = AnalysisService::new(&fixture.store, &fixture.store);
    let rows = service
        .run_hour_analysis("loki", day(1), april_first())
        .unwrap();
    assert_eq!(rows, vec![]);
}

#[test]
fn dangling_activity_reference_fails_the_analysis() {
    let mut store = MemoryStore::new();
    store.add_booking(
        Booking::new("freya", day(1), at(8, 0), Some(at(9, 0)), 42, "").unwrap(),
    );

    let service = AnalysisService::new(&store, &store);
    let result = service.run_activity_analysis("freya", day(1), day(2));
    assert_eq!(result, Err(StoreError::NotFound { id: 42 }));
}

#[test]
fn inverted_range_fails_every_analysis() {
    let fixture = march_fixture();
    let service = AnalysisService::new(&fixture.store, &fixture.store);
    assert!(matches!(
        service.run_hour_analysis("freya", day(2), day(1)),
        Err(StoreError::InvalidRange { .. })
    ));
    assert!(matches!(
        service.run_project_analysis("freya", day(2), day(2)),
        Err(StoreError::InvalidRange { .. })
    ));
}
