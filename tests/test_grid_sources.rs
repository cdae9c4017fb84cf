// tests/test_grid_sources.rs
// BitGrid construction and image-mask loading: thresholding, cell accessors,
// and the square power-of-two shape check on the disk loader.
// RELEVANT FILES:src/grid.rs,src/error.rs

use image::{DynamicImage, GrayImage, Luma};
use quadnav::{BitGrid, GridSource, QuadnavError, Quadtree};

fn gradient_image(width: u32, height: u32) -> DynamicImage {
    let mut img = GrayImage::new(width, height);
    for y in 0..height {
        for x in 0..width {
            img.put_pixel(x, y, Luma([(x * 255 / width.max(1)) as u8]));
        }
    }
    DynamicImage::ImageLuma8(img)
}

#[test]
fn from_fn_and_setters_agree() {
    let mut grid = BitGrid::from_fn(4, 4, |x, y| x == y);
    assert!(grid.get(2, 2));
    assert!(!grid.get(3, 0));
    grid.set(3, 0, true);
    assert!(grid.get(3, 0));
    assert_eq!(grid.width(), 4);
    assert_eq!(grid.height(), 4);
    assert!(grid.is_valid(0), "linear index 0 is cell (0, 0)");
    assert_eq!(grid.is_valid(3), grid.get(3, 0));
}

#[test]
fn image_threshold_splits_dark_from_light() {
    let img = gradient_image(8, 8);
    let grid = BitGrid::from_image(&img, 128);
    for y in 0..8 {
        for x in 0..8 {
            let luma = x as u32 * 255 / 8;
            assert_eq!(
                grid.get(x, y),
                luma >= 128,
                "threshold mismatch at ({x}, {y})"
            );
        }
    }

    // The thresholded mask feeds a build directly.
    let mut tree = Quadtree::new(3);
    tree.build(&grid).unwrap();
    assert!(tree.query_valid_region(0, 0) == -1, "dark side is blocked");
    assert!(tree.query_valid_region(7, 0) >= 0, "light side is traversable");
}

#[test]
fn disk_loader_round_trips_and_rejects_bad_shapes() {
    let dir = std::env::temp_dir();

    let square = dir.join("quadnav_test_mask_8x8.png");
    gradient_image(8, 8).save(&square).unwrap();
    let grid = BitGrid::from_image_path(&square, 128).unwrap();
    assert_eq!((grid.width(), grid.height()), (8, 8));

    let oblong = dir.join("quadnav_test_mask_8x4.png");
    gradient_image(8, 4).save(&oblong).unwrap();
    match BitGrid::from_image_path(&oblong, 128) {
        Err(QuadnavError::Grid(msg)) => assert!(msg.contains("8x4"), "got: {msg}"),
        other => panic!("expected a grid shape error, got {other:?}"),
    }

    match BitGrid::from_image_path(dir.join("quadnav_test_missing.png"), 128) {
        Err(QuadnavError::Image(_) | QuadnavError::Io(_)) => {}
        other => panic!("expected an image or IO error, got {other:?}"),
    }
}
