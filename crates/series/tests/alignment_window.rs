//! Integration tests for series windows across two sensors.

use linkrain_series::{PointSeries, TimeWindow};

fn series(times: &[i64]) -> PointSeries {
    PointSeries::new(times.to_vec(), vec![1.0; times.len()]).unwrap()
}

#[test]
fn overlap_of_link_and_gauge() {
    let link = series(&[0, 60, 120, 180, 240, 300, 360]);
    let gauge = series(&[120, 420, 720]);

    let window = TimeWindow::intersect(link.window().unwrap(), gauge.window().unwrap()).unwrap();
    assert_eq!(window.start(), 120);
    assert_eq!(window.end(), 360);

    assert_eq!(link.slice_window(&window).len(), 5);
    assert_eq!(gauge.slice_window(&window).timestamps(), &[120]);
}

#[test]
fn no_overlap_yields_no_window() {
    let a = series(&[0, 100]);
    let b = series(&[200, 300]);
    assert!(TimeWindow::intersect(a.window().unwrap(), b.window().unwrap()).is_none());
}
