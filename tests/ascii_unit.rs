//! Integration tests for the ASCII converter.
//!
//! These tests verify the conversion contract end to end:
//! - Output grid dimensions
//! - Luminance to palette mapping
//! - Determinism
//! - Boundary images and decode failures

use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma, Rgba, RgbaImage};
use photo_ascii_bot::ascii::*;

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, format).unwrap();
    out.into_inner()
}

fn solid_png(width: u32, height: u32, value: u8) -> Vec<u8> {
    encode(
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([value]))),
        ImageFormat::Png,
    )
}

fn expected_rows(width: u32, img_w: u32, img_h: u32) -> usize {
    ((width as f64 * (img_h as f64 / img_w as f64) * 0.55).floor() as usize).max(1)
}

// ==================== Dimension Tests ====================

#[test]
fn test_grid_dimensions_follow_formula() {
    let cases = [
        (640, 480, 100),
        (480, 640, 100),
        (1280, 853, 100),
        (37, 91, 60),
        (10, 10, 7),
        (3000, 20, 100),
    ];

    for (w, h, width) in cases {
        let text = convert(&solid_png(w, h, 128), width).unwrap();
        let rows: Vec<&str> = text.split('\n').collect();
        assert_eq!(
            rows.len(),
            expected_rows(width, w, h),
            "row count for {}x{} at width {}",
            w,
            h,
            width
        );
        assert!(
            rows.iter().all(|r| r.chars().count() == width as usize),
            "column count for {}x{} at width {}",
            w,
            h,
            width
        );
    }
}

#[test]
fn test_image_to_ascii_reports_dimensions() {
    let art = image_to_ascii(&solid_png(640, 480, 0), 100).unwrap();
    assert_eq!(art.width(), 100);
    assert_eq!(art.height(), 41);
    assert_eq!(art.lines().len(), 41);
}

#[test]
fn test_output_has_no_trailing_newline() {
    let text = convert(&solid_png(20, 20, 0), 10).unwrap();
    assert!(!text.ends_with('\n'));
}

#[test]
fn test_wide_image_keeps_one_row() {
    let text = convert(&solid_png(2000, 1, 0), 100).unwrap();
    assert_eq!(text.split('\n').count(), 1);
    assert_eq!(text.chars().count(), 100);
}

#[test]
fn test_small_image_is_upscaled() {
    let text = convert(&solid_png(2, 2, 0), 100).unwrap();
    assert_eq!(text.split('\n').count(), 55);
    assert!(text.split('\n').all(|r| r.len() == 100));
}

#[test]
fn test_width_one_gives_at_least_one_cell() {
    for (w, h) in [(1, 1), (500, 10), (10, 500)] {
        let art = image_to_ascii(&solid_png(w, h, 200), 1).unwrap();
        assert_eq!(art.width(), 1);
        assert!(art.height() >= 1);
    }
}

#[test]
fn test_default_width_is_100() {
    assert_eq!(DEFAULT_WIDTH, 100);
}

// ==================== Mapping Tests ====================

#[test]
fn test_index_matches_bucket_formula_for_every_sample() {
    let palette = Palette::STANDARD;
    let bucket = 256 / palette.len();
    for p in 0..=255u8 {
        let expected = (p as usize / bucket).min(palette.len() - 1);
        assert_eq!(palette.index_for(p), expected, "sample {}", p);
        assert_eq!(palette.char_for(p), STANDARD_PALETTE[expected]);
    }
}

#[test]
fn test_horizontal_gradient_maps_column_by_column() {
    // 256 columns, one per luminance value, constant down each column
    let img = GrayImage::from_fn(256, 10, |x, _| Luma([x as u8]));
    let bytes = encode(DynamicImage::ImageLuma8(img), ImageFormat::Png);

    let art = image_to_ascii(&bytes, 256).unwrap();
    assert_eq!(art.width(), 256);
    assert_eq!(art.height(), 5);

    for y in 0..art.height() {
        for x in 0..art.width() {
            assert_eq!(
                art.get(x, y),
                Some(Palette::STANDARD.char_for(x as u8)),
                "cell ({}, {})",
                x,
                y
            );
        }
    }
}

#[test]
fn test_black_image_scenario() {
    // 200 wide, 100 tall, all samples 0
    let art = image_to_ascii(&solid_png(200, 100, 0), 100).unwrap();
    assert_eq!(art.width(), 100);
    assert_eq!(art.height(), 27);
    assert!(art.to_string().split('\n').all(|row| row == "@".repeat(100)));
}

#[test]
fn test_white_pixel_is_last_palette_entry() {
    let text = convert(&solid_png(1, 1, 255), 1).unwrap();
    assert_eq!(text, " ");
    assert_eq!(text.chars().next(), Some(Palette::STANDARD.lightest()));
}

#[test]
fn test_color_is_reduced_to_bt601_luminance() {
    // Pure red has luminance 76 -> bucket 3 ('*')
    let img = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));
    let bytes = encode(DynamicImage::ImageRgba8(img), ImageFormat::Png);
    let text = convert(&bytes, 8).unwrap();
    assert!(text.split('\n').all(|row| row == "********"));
}

#[test]
fn test_alpha_is_discarded() {
    // Fully transparent red still renders as red's luminance
    let img = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 0]));
    let bytes = encode(DynamicImage::ImageRgba8(img), ImageFormat::Png);
    let text = convert(&bytes, 8).unwrap();
    assert!(text.chars().filter(|c| *c != '\n').all(|c| c == '*'));
}

#[test]
fn test_jpeg_input() {
    let img = DynamicImage::ImageLuma8(GrayImage::from_pixel(64, 64, Luma([0])));
    let bytes = encode(img.to_rgb8().into(), ImageFormat::Jpeg);
    let text = convert(&bytes, 16).unwrap();
    assert!(text.chars().filter(|c| *c != '\n').all(|c| c == '@'));
}

#[test]
fn test_custom_palette() {
    static TWO: &[char] = &['#', '.'];
    let palette = Palette::new(TWO).unwrap();
    let art = image_to_ascii_with_palette(&solid_png(4, 4, 200), 4, &palette).unwrap();
    assert!(art.to_string().chars().filter(|c| *c != '\n').all(|c| c == '.'));
}

// ==================== Determinism ====================

#[test]
fn test_conversion_is_deterministic() {
    let img = GrayImage::from_fn(123, 77, |x, y| Luma([((x * 7 + y * 13) % 256) as u8]));
    let bytes = encode(DynamicImage::ImageLuma8(img), ImageFormat::Png);

    let first = convert(&bytes, 100).unwrap();
    let second = convert(&bytes, 100).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_conversions_agree() {
    let bytes = std::sync::Arc::new(solid_png(300, 200, 90));
    let expected = convert(&bytes, 50).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let bytes = bytes.clone();
            std::thread::spawn(move || convert(&bytes, 50).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

// ==================== Errors ====================

#[test]
fn test_empty_buffer_is_decode_error() {
    assert!(matches!(convert(&[], 100), Err(ConvertError::Decode(_))));
}

#[test]
fn test_truncated_png_is_decode_error() {
    let bytes = solid_png(50, 50, 10);
    let truncated = &bytes[..bytes.len() / 2];
    assert!(matches!(convert(truncated, 100), Err(ConvertError::Decode(_))));
}

#[test]
fn test_zero_width_is_invalid_argument() {
    assert!(matches!(
        convert(&solid_png(5, 5, 0), 0),
        Err(ConvertError::InvalidArgument(_))
    ));
}

#[test]
fn test_extreme_aspect_ratio_is_rejected_before_resize() {
    // 1000 * 40000 * 0.55 rows would need billions of cells
    let bytes = solid_png(1, 40_000, 0);
    match convert(&bytes, 1000) {
        Err(ConvertError::InvalidArgument(msg)) => assert!(msg.contains("exceeds")),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_huge_width_is_rejected_before_decoding() {
    let width = u32::try_from(MAX_CELLS + 1).unwrap();
    assert!(matches!(
        convert(&[], width),
        Err(ConvertError::InvalidArgument(_))
    ));
}

#[test]
fn test_wide_grid_within_cell_limit_is_accepted() {
    // 8192 columns of a 4096x1 strip keep a single row
    let art = image_to_ascii(&solid_png(4096, 1, 255), 8192).unwrap();
    assert_eq!(art.height(), 1);
    assert!(u64::from(art.width()) * u64::from(art.height()) <= MAX_CELLS);
}

#[test]
fn test_convert_file_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("photo.png");
    std::fs::write(&path, solid_png(10, 10, 0)).unwrap();

    let text = convert_file(&path, 10).unwrap();
    assert_eq!(text, vec!["@".repeat(10); 5].join("\n"));
}

#[test]
fn test_convert_file_with_wrong_extension_still_decodes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("image.jpg");
    std::fs::write(&path, solid_png(10, 10, 255)).unwrap();

    let text = convert_file(&path, 10).unwrap();
    assert!(text.chars().filter(|c| *c != '\n').all(|c| c == ' '));
}
