use super::*;

#[test]
fn create_resolve_revoke_lifecycle() {
    let mut reg = ObjectUrlRegistry::new();
    let blob = Blob::new("image/png", vec![1u8, 2, 3]);
    let url = reg.create(blob.clone());

    assert!(url.as_str().starts_with("blob:cardkit/"));
    assert_eq!(reg.resolve(&url), Some(&blob));
    assert_eq!(reg.live_count(), 1);

    assert!(reg.revoke(&url));
    assert!(!reg.revoke(&url));
    assert!(reg.resolve(&url).is_none());
    assert_eq!(reg.live_count(), 0);
}

#[test]
fn urls_are_unique_per_create() {
    let mut reg = ObjectUrlRegistry::new();
    let blob = Blob::new("image/png", vec![1u8]);
    let a = reg.create(blob.clone());
    let b = reg.create(blob);
    assert_ne!(a, b);
    assert_eq!(reg.revoke_all(), 2);
    assert_eq!(reg.live_count(), 0);
}
