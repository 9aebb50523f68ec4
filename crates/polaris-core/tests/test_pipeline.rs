mod common;

use image::GrayImage;

use polaris_core::align::{find_transform, line, KdTree, MatchConfig};
use polaris_core::detection::normalize::log_stretch;
use polaris_core::detection::detect_stars;
use polaris_core::error::PolarisError;
use polaris_core::io::image_io::{frame_from_pixels, load_grayscale};
use polaris_core::pipeline::{run_stack, StackConfig};

use common::{shifted, star_field, write_png, FIELD_POSITIONS};

fn test_config(star_count: usize) -> StackConfig {
    StackConfig {
        subsample: 0.5,
        min_line_length: 10.0,
        star_dist_cutoff: 2.0,
        star_count,
        ..StackConfig::default()
    }
}

#[test]
fn fewer_than_two_images_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "only.png", &star_field(64, &FIELD_POSITIONS[..3], 4));

    let err = run_stack(&[path], &StackConfig::default(), |_| {}).unwrap_err();
    assert!(matches!(err, PolarisError::TooFewImages { got: 1 }));
}

#[test]
fn identical_frames_stack_to_the_reference() {
    let dir = tempfile::tempdir().unwrap();
    let img = star_field(200, &FIELD_POSITIONS[..5], 4);
    let a = write_png(dir.path(), "a.png", &img);
    let b = write_png(dir.path(), "b.png", &img);

    let config = test_config(5);
    let (result, summary) = run_stack(&[a, b.clone()], &config, |_| {}).unwrap();

    assert_eq!(summary.stacked, 2);
    assert_eq!(summary.dropped, 0);
    assert_eq!(summary.reference_stars, 5);

    // Numerically equal to the subsampled, float-converted reference.
    let reference = frame_from_pixels(&load_grayscale(&b, config.subsample).unwrap());
    assert_eq!(result.data.dim(), reference.data.dim());
    for (a, b) in result.data.iter().zip(reference.data.iter()) {
        assert!((a - b).abs() < 1e-6);
    }
}

#[test]
fn translated_frame_recovers_the_offset() {
    // Second frame shifted by (+7, -3) full-resolution pixels; after 0.5x
    // subsampling the alignment must find (+3.5, -1.5) within half a pixel.
    let dir = tempfile::tempdir().unwrap();
    let base = write_png(dir.path(), "base.png", &star_field(200, &FIELD_POSITIONS, 4));
    let moved = write_png(
        dir.path(),
        "moved.png",
        &star_field(200, &shifted(&FIELD_POSITIONS, 7, -3), 4),
    );

    let config = test_config(8);

    let ref_pixels = load_grayscale(&base, config.subsample).unwrap();
    let ref_det = detect_stars(&log_stretch(&ref_pixels), config.threshold, config.star_count);
    assert_eq!(ref_det.stars.len(), 8);

    let src_pixels = load_grayscale(&moved, config.subsample).unwrap();
    let src_det = detect_stars(&log_stretch(&src_pixels), ref_det.threshold, config.star_count);
    assert_eq!(src_det.stars.len(), 8);

    let ref_points: Vec<(f64, f64)> = ref_det.stars.iter().map(|s| (s.x, s.y)).collect();
    let tree = KdTree::build(&ref_points).unwrap();
    let mut ref_lines = line::lines_between(&ref_det.stars);
    line::sort_ascending(&mut ref_lines);
    let mut src_lines = line::lines_between(&src_det.stars);
    line::sort_descending(&mut src_lines);

    // The moved frame is the source; its stars sit at +3.5/-1.5 relative
    // to the reference, so the transform must undo that.
    let t = find_transform(
        &src_det.stars,
        &src_lines,
        &ref_lines,
        &tree,
        &MatchConfig {
            min_line_length: config.min_line_length,
            relative_length_tolerance: config.relative_length_tolerance,
            star_dist_cutoff: config.star_dist_cutoff,
            percent_stars_required: config.percent_stars_required,
        },
    )
    .expect("translated field should align");

    let (cx, cy) = (50.0, 50.0);
    let (tx, ty) = t.apply(cx, cy);
    let (dx, dy) = (tx - cx, ty - cy);
    assert!((dx + 3.5).abs() <= 0.5, "dx = {dx}");
    assert!((dy - 1.5).abs() <= 0.5, "dy = {dy}");
}

#[test]
fn garbage_frame_drops_out_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let img = star_field(200, &FIELD_POSITIONS[..6], 4);
    let a = write_png(dir.path(), "a.png", &img);
    let r = write_png(dir.path(), "r.png", &img);
    let black = write_png(dir.path(), "black.png", &GrayImage::new(200, 200));

    let config = test_config(6);

    let mut progress_calls = Vec::new();
    let (with_garbage, summary) = run_stack(
        &[a.clone(), r.clone(), black],
        &config,
        |done| progress_calls.push(done),
    )
    .unwrap();

    assert_eq!(progress_calls, vec![1, 2]);
    assert_eq!(summary.stacked, 2);
    assert_eq!(summary.dropped, 1);

    let (without, _) = run_stack(&[a, r], &config, |_| {}).unwrap();

    for (x, y) in with_garbage.data.iter().zip(without.data.iter()) {
        assert!((x - y).abs() < 1e-6);
    }
}

#[test]
fn outfile_is_written_when_configured() {
    let dir = tempfile::tempdir().unwrap();
    let img = star_field(200, &FIELD_POSITIONS[..5], 4);
    let a = write_png(dir.path(), "a.png", &img);
    let b = write_png(dir.path(), "b.png", &img);
    let out = dir.path().join("stacked.png");

    let config = StackConfig {
        outfile: Some(out.clone()),
        ..test_config(5)
    };
    run_stack(&[a, b], &config, |_| {}).unwrap();

    assert!(out.exists());
    let written = load_grayscale(&out, 1.0).unwrap();
    assert_eq!(written.dim(), (100, 100));
}
