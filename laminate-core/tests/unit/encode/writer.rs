use std::path::PathBuf;

use super::*;

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "laminate_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn solid(width: u32, height: u32, px: [u8; 4]) -> ImageRgba8 {
    ImageRgba8::from_raw(width, height, px.repeat((width * height) as usize)).unwrap()
}

#[test]
fn output_file_name_formats_index_and_extension() {
    assert_eq!(output_file_name(0, OutputFormat::Png), "Combined_0.png");
    assert_eq!(output_file_name(12, OutputFormat::Jpg), "Combined_12.jpg");
    assert_eq!(output_file_name(3, OutputFormat::Tif), "Combined_3.tif");
}

#[test]
fn png_preserves_straight_alpha() {
    let tmp = temp_dir("writer_png");
    // Premultiplied half-transparent red.
    let combined = solid(2, 2, [128, 0, 0, 128]);

    let path = write_composite(&combined, OutputFormat::Png, &tmp, 0).unwrap();
    assert_eq!(path.file_name().unwrap(), "Combined_0.png");

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 128]);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn bmp_flattens_over_white() {
    let tmp = temp_dir("writer_bmp");
    let combined = solid(2, 2, [128, 0, 0, 128]);

    let path = write_composite(&combined, OutputFormat::Bmp, &tmp, 1).unwrap();
    assert_eq!(path.file_name().unwrap(), "Combined_1.bmp");

    let decoded = image::open(&path).unwrap().to_rgb8();
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 127, 127]);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn existing_output_is_overwritten() {
    let tmp = temp_dir("writer_overwrite");
    let red = solid(1, 1, [255, 0, 0, 255]);
    let blue = solid(1, 1, [0, 0, 255, 255]);

    write_composite(&red, OutputFormat::Png, &tmp, 0).unwrap();
    let path = write_composite(&blue, OutputFormat::Png, &tmp, 0).unwrap();

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 255, 255]);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_output_directory_is_an_encode_error() {
    let combined = solid(1, 1, [255, 0, 0, 255]);
    let err = write_composite(
        &combined,
        OutputFormat::Png,
        std::path::Path::new("/definitely/not/here"),
        0,
    )
    .unwrap_err();
    assert!(err.to_string().contains("encode error"));
}
