use std::time::{Duration, Instant};

use crate::capture::core::{is_significant, CaptureSession, Decision, FrameSize};
use crate::config::{CaptureConfig, Config};
use crate::detector::interface::{BoundingBox, Detection};

fn config() -> CaptureConfig {
    Config::default().capture
}

fn frame() -> FrameSize {
    FrameSize::new(640, 480)
}

fn small_pothole(confidence: f32) -> Detection {
    Detection::pothole(confidence, BoundingBox::new(10, 10, 50, 50))
}

#[test]
fn test_low_confidence_is_not_annotated() {
    assert!(!is_significant(&small_pothole(0.69), frame(), &config()));
    assert!(is_significant(&small_pothole(0.7), frame(), &config()));
}

#[test]
fn test_large_box_is_not_annotated() {
    // 30720 / 307200 is exactly the limit
    let at_limit = Detection::pothole(0.95, BoundingBox::new(0, 0, 160, 192));
    let over_limit = Detection::pothole(0.95, BoundingBox::new(0, 0, 161, 192));

    assert!(is_significant(&at_limit, frame(), &config()));
    assert!(!is_significant(&over_limit, frame(), &config()));
}

#[test]
fn test_area_limit_is_not_widened() {
    // 0.1000000001 of the frame, above the limit but below 0.1f32
    let huge_frame = FrameSize::new(100_000, 100_000);
    let sliver = Detection::pothole(0.95, BoundingBox::new(0, 0, 1, 1_000_000_001));

    assert!(!is_significant(&sliver, huge_frame, &config()));
}

#[test]
fn test_box_below_cutoff_line_is_not_annotated() {
    let tall_frame = FrameSize::new(1920, 1080);
    let above = Detection::pothole(0.95, BoundingBox::new(100, 599, 40, 40));
    let on_line = Detection::pothole(0.95, BoundingBox::new(100, 600, 40, 40));

    assert!(is_significant(&above, tall_frame, &config()));
    assert!(!is_significant(&on_line, tall_frame, &config()));
}

#[test]
fn test_empty_frame_size_is_never_significant() {
    assert!(!is_significant(
        &small_pothole(0.99),
        FrameSize::new(0, 0),
        &config()
    ));
}

#[test]
fn test_first_detection_is_saved_at_index_zero() {
    let mut session = CaptureSession::new();

    let decisions = session.decide(&[small_pothole(0.9)], frame(), Instant::now(), &config());

    assert_eq!(decisions, vec![Decision::AnnotateAndSave { index: 0 }]);
    assert_eq!(session.saved_count(), 1);
}

#[test]
fn test_insignificant_detection_never_saves() {
    let mut session = CaptureSession::new();

    let decisions = session.decide(&[small_pothole(0.5)], frame(), Instant::now(), &config());

    assert_eq!(decisions, vec![Decision::Ignore]);
    assert_eq!(session.saved_count(), 0);
    assert_eq!(session.last_save, None);
}

#[test]
fn test_detection_inside_cooldown_is_annotated_only() {
    let mut session = CaptureSession::new();
    let t0 = Instant::now();

    session.decide(&[small_pothole(0.9)], frame(), t0, &config());
    let decisions = session.decide(
        &[small_pothole(0.9)],
        frame(),
        t0 + Duration::from_millis(1999),
        &config(),
    );

    assert_eq!(decisions, vec![Decision::Annotate]);
    assert!(decisions[0].is_annotated());
    assert_eq!(session.saved_count(), 1);
    assert_eq!(session.last_save, Some(t0));
}

#[test]
fn test_detections_after_cooldown_get_consecutive_indices() {
    let mut session = CaptureSession::new();
    let t0 = Instant::now();
    let cfg = config();

    let first = session.decide(&[small_pothole(0.9)], frame(), t0, &cfg);
    let second = session.decide(&[small_pothole(0.9)], frame(), t0 + Duration::from_secs(2), &cfg);
    let third = session.decide(&[small_pothole(0.9)], frame(), t0 + Duration::from_secs(5), &cfg);

    assert_eq!(first, vec![Decision::AnnotateAndSave { index: 0 }]);
    assert_eq!(second, vec![Decision::AnnotateAndSave { index: 1 }]);
    assert_eq!(third, vec![Decision::AnnotateAndSave { index: 2 }]);
    assert_eq!(session.last_save, Some(t0 + Duration::from_secs(5)));
}

#[test]
fn test_cooldown_is_measured_from_latest_save() {
    let mut session = CaptureSession::new();
    let t0 = Instant::now();
    let cfg = config();

    session.decide(&[small_pothole(0.9)], frame(), t0, &cfg);
    session.decide(&[small_pothole(0.9)], frame(), t0 + Duration::from_secs(3), &cfg);
    let decisions = session.decide(&[small_pothole(0.9)], frame(), t0 + Duration::from_secs(4), &cfg);

    assert_eq!(decisions, vec![Decision::Annotate]);
}

#[test]
fn test_multiple_detections_in_one_frame() {
    let mut session = CaptureSession::new();
    let t0 = Instant::now();
    let detections = vec![
        small_pothole(0.3),
        small_pothole(0.9),
        small_pothole(0.8),
        Detection::pothole(0.9, BoundingBox::new(0, 700, 10, 10)),
    ];

    let decisions = session.decide(&detections, FrameSize::new(1280, 720), t0, &config());

    assert_eq!(
        decisions,
        vec![
            Decision::Ignore,
            Decision::AnnotateAndSave { index: 0 },
            Decision::Annotate,
            Decision::Ignore,
        ]
    );
}

#[test]
fn test_one_save_per_frame_after_cooldown() {
    let mut session = CaptureSession::new();
    let t0 = Instant::now();
    let pair = [small_pothole(0.9), small_pothole(0.9)];

    session.decide(&pair, frame(), t0, &config());
    let decisions = session.decide(&pair, frame(), t0 + Duration::from_secs(2), &config());

    assert_eq!(
        decisions,
        vec![Decision::AnnotateAndSave { index: 1 }, Decision::Annotate]
    );
    assert_eq!(session.saved_count(), 2);
}

#[test]
fn test_begin_frame_counts_from_one() {
    let mut session = CaptureSession::new();
    assert_eq!(session.begin_frame(), 1);
    assert_eq!(session.begin_frame(), 2);
    assert_eq!(session.frame_counter, 2);
}
