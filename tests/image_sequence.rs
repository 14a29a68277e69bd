use std::path::Path;

use image::{Rgb, RgbImage};
use tempfile::TempDir;

use slitscan::{render_file, Bgr, Error, SlitScanBuilder};

fn write_frames(dir: &Path, colors: &[[u8; 3]]) {
    for (i, rgb) in colors.iter().enumerate() {
        RgbImage::from_pixel(8, 6, Rgb(*rgb))
            .save(dir.join(format!("frame_{:04}.png", i)))
            .expect("write frame");
    }
}

fn frames_dir(colors: &[[u8; 3]]) -> TempDir {
    let root = TempDir::new().expect("temp dir");
    std::fs::create_dir(root.path().join("frames")).expect("frames dir");
    write_frames(&root.path().join("frames"), colors);
    root
}

#[test]
fn renders_stripes_next_to_input() {
    let root = frames_dir(&[[255, 0, 0], [255, 0, 0], [0, 0, 255], [0, 0, 255], [0, 0, 255]]);
    let builder = SlitScanBuilder::new(10, 2).unwrap();

    let output = render_file(&root.path().join("frames"), None, &builder).expect("render");
    assert_eq!(output, root.path().join("slitscan.png"));

    let image = image::open(&output).expect("read output").to_rgb8();
    assert_eq!(image.dimensions(), (3, 10));
    for y in 0..10 {
        assert_eq!(image.get_pixel(0, y), &Rgb([255, 0, 0]));
        assert_eq!(image.get_pixel(1, y), &Rgb([0, 0, 255]));
        assert_eq!(image.get_pixel(2, y), &Rgb([0, 0, 255]));
    }
}

#[test]
fn outfile_is_relative_to_input_directory() {
    let root = frames_dir(&[[10, 20, 30]]);
    let builder = SlitScanBuilder::new(1, 5).unwrap();

    let output = render_file(
        &root.path().join("frames"),
        Some(Path::new("scans/../barcode.PNG")),
        &builder,
    )
    .expect("render");

    assert_eq!(output, root.path().join("barcode.PNG"));
    let image = image::open(&output).expect("read output").to_rgb8();
    assert_eq!(image.get_pixel(0, 0), &Rgb([10, 20, 30]));
}

#[test]
fn non_png_outfile_is_rejected_before_reading() {
    let root = frames_dir(&[[10, 20, 30]]);
    let builder = SlitScanBuilder::new(1, 5).unwrap();

    let result = render_file(
        &root.path().join("frames"),
        Some(Path::new("scan.jpg")),
        &builder,
    );
    assert!(matches!(result, Err(Error::InvalidArgument(_))));
    assert!(!root.path().join("scan.jpg").exists());
}

#[test]
fn empty_sequence_writes_nothing() {
    let root = frames_dir(&[]);
    let builder = SlitScanBuilder::new(400, 5).unwrap();

    let result = render_file(&root.path().join("frames"), None, &builder);
    assert!(matches!(result, Err(Error::EmptyImage)));
    assert!(!root.path().join("slitscan.png").exists());
}

#[test]
fn corrupt_frame_ends_the_sequence() {
    let root = frames_dir(&[[0, 0, 100], [0, 0, 200], [0, 0, 60]]);
    std::fs::write(root.path().join("frames/frame_0001.png"), b"garbage").unwrap();

    let raster = SlitScanBuilder::new(2, 2)
        .unwrap()
        .build(slitscan::open_source(root.path().join("frames")).unwrap())
        .unwrap();
    assert_eq!(raster.colors(), &[Bgr([100, 0, 0])]);

    let strict = SlitScanBuilder::new(2, 2).unwrap().strict(true);
    let result = strict.build(slitscan::open_source(root.path().join("frames")).unwrap());
    assert!(matches!(result, Err(Error::Image(_))));
}

#[cfg(not(feature = "ffmpeg"))]
#[test]
fn video_files_need_ffmpeg() {
    let root = TempDir::new().unwrap();
    let video = root.path().join("movie.mp4");
    std::fs::write(&video, b"").unwrap();
    assert!(matches!(slitscan::open_source(&video), Err(Error::Static(_))));
}
