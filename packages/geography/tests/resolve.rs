use global_api_geography::{GeoError, city_boundary, resolve_locodes};
use global_api_test_utils::{empty_store, insert_boundary, insert_rect_boundary};

/// A right triangle with its right angle at the origin, so its bbox's
/// upper-right half is outside the geometry.
const TRIANGLE: &str = "POLYGON ((0 0, 10 0, 0 10, 0 0))";

fn store() -> global_api_database::Store {
    let store = empty_store();
    insert_boundary(&store, "BR TRI", TRIANGLE, 10.0, 0.0, 10.0, 0.0);
    insert_rect_boundary(&store, "BR SQA", 5.0, -5.0, 20.0, 5.0);
    insert_rect_boundary(&store, "AR FAR", -60.0, -40.0, -55.0, -35.0);
    store
}

#[test]
fn point_inside_polygon_resolves() {
    let store = store();

    let locodes = resolve_locodes(&store, 1.0, 1.0).unwrap();

    assert_eq!(locodes.into_iter().collect::<Vec<_>>(), vec!["BR TRI"]);
}

#[test]
fn point_in_bbox_but_outside_polygon_is_excluded() {
    let store = store();

    assert!(resolve_locodes(&store, 9.0, 9.0).unwrap().is_empty());
}

#[test]
fn overlapping_boundaries_both_resolve() {
    let store = store();

    let locodes = resolve_locodes(&store, 2.0, 6.0).unwrap();

    assert_eq!(
        locodes.into_iter().collect::<Vec<_>>(),
        vec!["BR SQA", "BR TRI"]
    );
}

#[test]
fn point_on_edge_counts_as_inside() {
    let store = store();

    let locodes = resolve_locodes(&store, 0.0, 20.0).unwrap();

    assert!(locodes.contains("BR SQA"));
}

#[test]
fn point_far_away_resolves_to_nothing() {
    let store = store();

    assert!(resolve_locodes(&store, 60.0, 120.0).unwrap().is_empty());
    assert!(resolve_locodes(&store, 400.0, -400.0).unwrap().is_empty());
}

#[test]
fn corrupt_candidate_geometry_is_an_error() {
    let store = store();
    insert_boundary(&store, "XX BAD", "POLYGON ((1 1,", 50.0, 40.0, 50.0, 40.0);

    let err = resolve_locodes(&store, 45.0, 45.0).unwrap_err();
    assert!(matches!(err, GeoError::Geometry { .. }));

    // The corrupt row is never decoded for points outside its bbox.
    assert_eq!(resolve_locodes(&store, 1.0, 1.0).unwrap().len(), 1);
}

#[test]
fn boundary_lookup_by_locode() {
    let store = store();

    let boundary = city_boundary(&store, "BR TRI").unwrap();

    assert_eq!(boundary.geometry, TRIANGLE);
    assert_eq!(boundary.bbox.east, 10.0);
}

#[test]
fn boundary_lookup_reports_missing_and_blank() {
    let store = store();

    assert!(matches!(
        city_boundary(&store, "ZZ NOP"),
        Err(GeoError::NotFound { .. })
    ));
    assert!(matches!(
        city_boundary(&store, "  "),
        Err(GeoError::InvalidInput { .. })
    ));
}
