use super::*;

#[test]
fn from_flat_groups_triples_in_order() {
    let tris = Triangle::from_flat(&[0, 1, 2, 2, 3, 0]).unwrap();
    assert_eq!(tris, vec![Triangle::new(0, 1, 2), Triangle::new(2, 3, 0)]);
}

#[test]
fn from_flat_rejects_partial_triples() {
    let err = Triangle::from_flat(&[0, 1, 2, 3]).unwrap_err();
    assert!(err.to_string().contains("multiple of 3"));
}

#[test]
fn vertices_out_of_range_is_none() {
    let pts = [Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
    assert!(Triangle::new(0, 1, 2).vertices(&pts).is_none());
    let pts = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(0.0, 1.0),
    ];
    assert_eq!(
        Triangle::new(2, 0, 1).vertices(&pts),
        Some([pts[2], pts[0], pts[1]])
    );
}
