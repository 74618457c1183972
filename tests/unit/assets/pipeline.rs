use std::io::Cursor;

use super::*;
use crate::assets::upload::InMemoryUploader;
use crate::document::element::TextKind;
use crate::document::model::NewElement;
use crate::document::placement::PlacementConfig;
use crate::foundation::core::Point;

fn png_file(name: &str, w: u32, h: u32) -> SelectedFile {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([30, 60, 90, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    SelectedFile::new(name, "image/png", buf)
}

fn viewport() -> Size {
    Size::new(600.0, 400.0)
}

fn pipeline() -> AssetPipeline {
    AssetPipeline::new(CropConfig::default())
}

#[test]
fn non_image_file_creates_nothing() {
    let mut p = pipeline();
    let file = SelectedFile::new("notes.txt", "text/plain", b"hello".to_vec());
    let err = p
        .select_file(AssetRole::Headshot, &file, CropShape::Circle, viewport())
        .unwrap_err();
    assert!(matches!(err, CardError::Validation(_)));
    assert_eq!(p.live_urls(), 0);
    assert!(!p.crop_session().is_open());
    assert!(p.pending_role().is_none());
}

#[test]
fn undecodable_image_releases_its_url() {
    let mut p = pipeline();
    let file = SelectedFile::new("broken.png", "image/png", b"nope".to_vec());
    let err = p
        .select_file(AssetRole::Logo, &file, CropShape::Rectangle, viewport())
        .unwrap_err();
    assert!(matches!(err, CardError::Decode(_)));
    assert_eq!(p.live_urls(), 0);
    assert!(!p.crop_session().is_open());
    assert!(p.pending_role().is_none());
}

#[test]
fn second_select_while_pending_is_rejected() {
    let mut p = pipeline();
    p.select_file(
        AssetRole::Headshot,
        &png_file("a.png", 50, 50),
        CropShape::Circle,
        viewport(),
    )
    .unwrap();
    let err = p
        .select_file(
            AssetRole::Logo,
            &png_file("b.png", 50, 50),
            CropShape::Rectangle,
            viewport(),
        )
        .unwrap_err();
    assert!(matches!(err, CardError::SessionState(_)));
    assert_eq!(p.pending_role(), Some(AssetRole::Headshot));
    assert_eq!(p.live_urls(), 1);
}

#[test]
fn background_commit_resizes_canvas_and_releases_source() {
    let mut p = pipeline();
    let mut doc = CanvasDocument::default();
    let source = p
        .select_file(
            AssetRole::Background,
            &png_file("bg.png", 800, 300),
            CropShape::Rectangle,
            viewport(),
        )
        .unwrap();
    assert_eq!((source.width, source.height), (800, 300));

    let asset = p.commit_pending(&mut doc).unwrap();
    assert!(p.resolve_url(&source.local_preview_url).is_none());
    assert_eq!(p.live_urls(), 1);
    assert_eq!(doc.canvas().width, asset.width);
    assert_eq!(doc.canvas().height, asset.height);
    assert_eq!(asset.width, 1200);
    assert_eq!(doc.background_asset(), Some(&asset.id));
    assert!(p.resolve(&asset.id).is_some());
}

fn exhausted_document() -> CanvasDocument {
    let mut snap = CanvasDocument::default().snapshot();
    snap.next_id = u64::MAX;
    CanvasDocument::restore(snap)
}

#[test]
fn failed_background_routing_keeps_cropped_blob_for_retry() {
    let mut p = pipeline();
    let source = p
        .select_file(
            AssetRole::Background,
            &png_file("bg.png", 800, 300),
            CropShape::Rectangle,
            viewport(),
        )
        .unwrap();

    let mut full = exhausted_document();
    let err = p.commit_pending(&mut full).unwrap_err();
    assert!(matches!(err, CardError::Validation(_)));
    assert_eq!(p.pending_role(), Some(AssetRole::Background));
    assert!(p.resolve_url(&source.local_preview_url).is_some());
    assert_eq!(p.live_urls(), 1);
    assert!(p.background().is_none());

    let mut doc = CanvasDocument::default();
    let asset = p.commit_pending(&mut doc).unwrap();
    assert!(p.pending_role().is_none());
    assert!(p.resolve_url(&source.local_preview_url).is_none());
    assert_eq!(p.live_urls(), 1);
    assert_eq!(doc.background_asset(), Some(&asset.id));
    assert_eq!(asset.width, 1200);
}

#[test]
fn cancel_after_failed_routing_discards_cropped_blob() {
    let mut p = pipeline();
    p.select_file(
        AssetRole::Background,
        &png_file("bg.png", 200, 100),
        CropShape::Rectangle,
        viewport(),
    )
    .unwrap();
    assert!(p.commit_pending(&mut exhausted_document()).is_err());

    assert!(p.cancel_crop().unwrap());
    assert!(p.pending_role().is_none());
    assert_eq!(p.live_urls(), 0);
}

#[test]
fn cancel_leaves_document_and_assets_untouched() {
    let mut p = pipeline();
    let mut doc = CanvasDocument::default();
    p.commit_crop(
        AssetRole::Logo,
        Blob::new("image/png", png_file("l.png", 20, 10).bytes),
        &mut doc,
    )
    .unwrap();
    let before = doc.clone();
    let logo = p.test_assets().logo.clone();

    p.select_file(
        AssetRole::Background,
        &png_file("bg.png", 100, 100),
        CropShape::Rectangle,
        viewport(),
    )
    .unwrap();
    assert!(p.cancel_crop().unwrap());
    assert!(!p.cancel_crop().unwrap());

    assert_eq!(doc, before);
    assert_eq!(p.test_assets().logo, logo);
    assert_eq!(p.live_urls(), 1);
    assert!(!p.crop_session().is_open());
}

#[test]
fn superseded_test_asset_url_is_revoked() {
    let mut p = pipeline();
    let mut doc = CanvasDocument::default();
    let first = p
        .commit_crop(
            AssetRole::Headshot,
            Blob::new("image/png", png_file("h1.png", 40, 40).bytes),
            &mut doc,
        )
        .unwrap();
    let second = p
        .commit_crop(
            AssetRole::Headshot,
            Blob::new("image/png", png_file("h2.png", 40, 40).bytes),
            &mut doc,
        )
        .unwrap();

    assert!(p.resolve_url(&first.local_preview_url).is_none());
    assert!(p.resolve_url(&second.local_preview_url).is_some());
    assert_eq!(p.live_urls(), 1);
    assert!(doc.elements().is_empty());
}

#[test]
fn headshot_placement_needs_committed_test_asset() {
    let mut p = pipeline();
    let mut doc = CanvasDocument::default();
    let placement = PlacementConfig::default();
    let center = doc.canvas().center();

    assert!(
        doc.add_element(NewElement::Headshot, center, p.test_assets(), &placement)
            .is_err()
    );
    assert!(doc.elements().is_empty());

    p.select_file(
        AssetRole::Headshot,
        &png_file("me.png", 300, 200),
        CropShape::Circle,
        viewport(),
    )
    .unwrap();
    let asset = p.commit_pending(&mut doc).unwrap();
    assert_eq!((asset.width, asset.height), (400, 400));

    let id = doc
        .add_element(NewElement::Headshot, center, p.test_assets(), &placement)
        .unwrap();
    assert_eq!(doc.elements().len(), 1);
    assert_eq!(doc.element(id).unwrap().asset_ref(), Some(&asset.id));

    doc.add_element(
        NewElement::Text(TextKind::Name),
        Point::ZERO,
        p.test_assets(),
        &placement,
    )
    .unwrap();
    assert_eq!(doc.elements().len(), 2);
}

#[test]
fn upload_records_remote_url_and_failure_keeps_asset_local() {
    let mut p = pipeline();
    let mut doc = CanvasDocument::default();
    let mut uploader = InMemoryUploader::new();

    assert!(matches!(
        p.upload(AssetRole::Logo, &mut uploader),
        Err(CardError::MissingAsset(_))
    ));

    p.commit_crop(
        AssetRole::Logo,
        Blob::new("image/png", png_file("l.png", 20, 10).bytes),
        &mut doc,
    )
    .unwrap();

    uploader.fail_next("offline");
    let err = p.upload(AssetRole::Logo, &mut uploader).unwrap_err();
    assert!(matches!(err, CardError::Upload(_)));
    assert!(p.test_assets().logo.as_ref().unwrap().remote_url.is_none());

    let receipt = p.upload(AssetRole::Logo, &mut uploader).unwrap();
    let logo = p.test_assets().logo.as_ref().unwrap();
    assert_eq!(logo.remote_url.as_deref(), Some(receipt.remote_url.as_str()));
    assert_eq!(logo.server_id.as_deref(), Some(receipt.asset_id.as_str()));
    let (meta, _) = &uploader.uploads()[&receipt.remote_url];
    assert_eq!(meta.asset_id, logo.id);
    assert!(meta.file_name.ends_with(".png"));
}

#[test]
fn remove_background_and_release_all() {
    let mut p = pipeline();
    let mut doc = CanvasDocument::default();
    p.commit_crop(
        AssetRole::Background,
        Blob::new("image/png", png_file("bg.png", 64, 32).bytes),
        &mut doc,
    )
    .unwrap();
    p.commit_crop(
        AssetRole::Headshot,
        Blob::new("image/png", png_file("h.png", 8, 8).bytes),
        &mut doc,
    )
    .unwrap();
    assert_eq!(p.live_urls(), 2);

    assert!(p.remove_background(&mut doc));
    assert!(doc.background_element().is_none());
    assert_eq!(doc.canvas().width, 64);
    assert_eq!(p.live_urls(), 1);

    p.select_file(
        AssetRole::Logo,
        &png_file("l.png", 10, 10),
        CropShape::Rectangle,
        viewport(),
    )
    .unwrap();
    assert_eq!(p.release_all(), 2);
    assert_eq!(p.live_urls(), 0);
    assert!(p.test_assets().headshot.is_none());
    assert!(!p.crop_session().is_open());
}
