use std::io::Cursor;

use approx::assert_abs_diff_eq;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use darkroom_app::{AppError, CoreToUi, Session, dispatch_json};
use darkroom_core::scopes::Channel;
use darkroom_io::FetchOutcome;
use image::{DynamicImage, GrayImage, ImageFormat, RgbImage};

fn png_of(img: DynamicImage) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

fn send(session: &mut Session, json: serde_json::Value) -> Vec<CoreToUi> {
    dispatch_json(session, &json.to_string())
}

#[test]
fn test_upload_process_analyze_export() {
    let mut session = Session::default();
    let img = RgbImage::from_fn(120, 80, |x, y| image::Rgb([(x * 2) as u8, (y * 3) as u8, 100]));
    let upload = STANDARD.encode(png_of(DynamicImage::ImageRgb8(img)));

    let replies = send(
        &mut session,
        serde_json::json!({"type": "LoadUpload", "data": {"name": "photo.png", "data": upload}}),
    );
    match &replies[..] {
        [CoreToUi::ImageLoaded { info }, CoreToUi::Status { has_current: true, has_processed: false }] => {
            assert_eq!((info.width, info.height), (120, 80));
        }
        other => panic!("unexpected replies: {other:?}"),
    }

    let replies = send(
        &mut session,
        serde_json::json!({"type": "Process", "data": {"request": {
            "filter": {"kind": "Invert", "intensity": 2.5},
            "resize": {"width": 60, "height": 50}
        }}}),
    );
    assert!(matches!(
        &replies[..],
        [CoreToUi::Processed { width: 60, height: 50, .. }, CoreToUi::Status { has_processed: true, .. }]
    ));

    let replies = send(&mut session, serde_json::json!({"type": "Analyze"}));
    let [CoreToUi::Analysis { current, processed, charts }] = &replies[..] else {
        panic!("unexpected replies: {replies:?}");
    };
    let processed = processed.as_ref().unwrap();
    assert_eq!(charts.len(), 2);
    assert_abs_diff_eq!(current.stats.mean(Channel::Blue).unwrap(), 100.0);
    assert_abs_diff_eq!(processed.stats.mean(Channel::Blue).unwrap(), 155.0);
    assert_eq!(processed.stats.pixel_count, 60 * 50 * 3);

    let replies = send(&mut session, serde_json::json!({"type": "Export"}));
    let [CoreToUi::ExportReady { file_name, mime, data }] = &replies[..] else {
        panic!("unexpected replies: {replies:?}");
    };
    assert_eq!(file_name, "processed_image.png");
    assert_eq!(mime, "image/png");
    let png = STANDARD.decode(data).unwrap();
    let decoded = darkroom_io::decode_png(&png).unwrap();
    assert_eq!(&decoded, session.processed().unwrap());
}

#[test]
fn test_fetched_failure_is_a_warning_and_keeps_state() {
    let mut session = Session::default();
    let img = GrayImage::from_pixel(64, 64, image::Luma([42]));
    session
        .load_upload("a.png", Some("image/png"), &png_of(DynamicImage::ImageLuma8(img)))
        .unwrap();

    let replies = send(
        &mut session,
        serde_json::json!({"type": "LoadFetched", "data": {
            "url": "https://example.com/missing.png",
            "outcome": {"kind": "Response", "status": 404, "body": ""}
        }}),
    );
    assert!(matches!(&replies[..], [CoreToUi::Warning { .. }]));
    assert_eq!(session.current().unwrap().width(), 64);
}

#[test]
fn test_empty_url_is_a_warning() {
    let mut session = Session::default();
    let replies = send(
        &mut session,
        serde_json::json!({"type": "LoadFetched", "data": {"url": "", "outcome": {"kind": "Timeout"}}}),
    );
    assert!(matches!(&replies[..], [CoreToUi::Warning { .. }]));
}

#[test]
fn test_in_process_remote_source() {
    let mut session = Session::default();
    let body = png_of(DynamicImage::ImageLuma8(GrayImage::from_pixel(50, 70, image::Luma([9]))));
    let remote = move |_: &str| FetchOutcome::Response {
        status: 200,
        body: body.clone(),
    };
    let info = session.load_url(&remote, "http://example.com/g.png").unwrap();
    assert_eq!((info.width, info.height), (50, 70));

    let err = session
        .load_url(&|_: &str| FetchOutcome::Network("dns failure".into()), "http://nope.invalid/x.png")
        .unwrap_err();
    assert!(err.is_warning());
    assert!(matches!(err, AppError::Io(_)));
    assert_eq!(session.current().unwrap().height(), 70);
}

#[test]
fn test_export_before_processing_warns() {
    let mut session = Session::default();
    let img = GrayImage::from_pixel(50, 50, image::Luma([1]));
    session
        .load_upload("a.png", None, &png_of(DynamicImage::ImageLuma8(img)))
        .unwrap();
    let replies = send(&mut session, serde_json::json!({"type": "Export"}));
    assert!(matches!(&replies[..], [CoreToUi::Warning { .. }]));
}
