use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        CardError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        CardError::missing_asset("x")
            .to_string()
            .contains("missing asset:")
    );
    assert!(CardError::locked("x").to_string().contains("locked element:"));
    assert!(
        CardError::session_state("x")
            .to_string()
            .contains("session state error:")
    );
    assert!(CardError::decode("x").to_string().contains("decode error:"));
    assert!(CardError::render("x").to_string().contains("render error:"));
    assert!(CardError::upload("x").to_string().contains("upload error:"));
    assert!(
        CardError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn transient_classification() {
    assert!(CardError::decode("x").is_transient());
    assert!(CardError::render("x").is_transient());
    assert!(CardError::upload("x").is_transient());
    assert!(!CardError::validation("x").is_transient());
    assert!(!CardError::missing_asset("x").is_transient());
    assert!(!CardError::locked("x").is_transient());
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = CardError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
