use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        LowPolyError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        LowPolyError::triangulation("x")
            .to_string()
            .contains("triangulation error:")
    );
    assert!(LowPolyError::codec("x").to_string().contains("codec error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = LowPolyError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
