use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WheelError::invalid_selection(99, 4)
            .to_string()
            .contains("invalid selection:")
    );
    assert!(WheelError::EmptyInput.to_string().contains("empty input:"));
    assert!(
        WheelError::asset_load("x")
            .to_string()
            .contains("asset load failure:")
    );
    assert!(
        WheelError::encoding("x")
            .to_string()
            .contains("encoding error:")
    );
    assert!(
        WheelError::validation("x")
            .to_string()
            .contains("validation error:")
    );
}

#[test]
fn invalid_selection_reports_index_and_len() {
    let msg = WheelError::invalid_selection(99, 4).to_string();
    assert!(msg.contains("99"));
    assert!(msg.contains('4'));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = WheelError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
