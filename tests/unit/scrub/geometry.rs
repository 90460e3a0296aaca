use super::*;

fn assert_cover(container: Size, image: Size, g: &SurfaceGeometry) {
    let eps = 1e-9;
    assert!(g.display.width + eps >= container.width);
    assert!(g.display.height + eps >= container.height);
    let fits_one_axis = (g.display.width - container.width).abs() < eps
        || (g.display.height - container.height).abs() < eps;
    assert!(fits_one_axis);
    let got = g.display.width / g.display.height;
    let want = image.width / image.height;
    assert!((got - want).abs() < 1e-9, "aspect {got} != {want}");
}

#[test]
fn wide_container_fits_width_and_overflows_vertically() {
    let container = Size::new(1920.0, 800.0);
    let image = Size::new(1600.0, 900.0);
    let g = compute_geometry(container, image, 1.0).unwrap();
    assert_eq!(g.display.width, 1920.0);
    assert!((g.display.height - 1080.0).abs() < 1e-9);
    assert_eq!(g.crop_origin.x, 0.0);
    assert!((g.crop_origin.y + 140.0).abs() < 1e-9);
    assert_cover(container, image, &g);
}

#[test]
fn tall_container_fits_height_and_overflows_horizontally() {
    let container = Size::new(390.0, 844.0);
    let image = Size::new(1600.0, 900.0);
    let g = compute_geometry(container, image, 3.0).unwrap();
    assert_eq!(g.display.height, 844.0);
    assert!((g.display.width - 844.0 * 16.0 / 9.0).abs() < 1e-9);
    assert!(g.crop_origin.x < 0.0);
    assert_eq!(g.crop_origin.y, 0.0);
    assert_cover(container, image, &g);
}

#[test]
fn equal_aspect_fits_both_axes() {
    let g = compute_geometry(Size::new(1280.0, 720.0), Size::new(1920.0, 1080.0), 1.0).unwrap();
    assert!((g.display.width - 1280.0).abs() < 1e-9);
    assert_eq!(g.display.height, 720.0);
    assert!(g.crop_origin.x.abs() < 1e-9);
    assert_eq!(g.crop_origin.y, 0.0);
}

#[test]
fn cover_fit_holds_over_many_shapes() {
    let images = [Size::new(1600.0, 900.0), Size::new(900.0, 1600.0), Size::new(1.0, 1.0)];
    for image in images {
        for w in [1.0, 320.0, 777.0, 1920.0, 3840.0] {
            for h in [1.0, 240.0, 601.0, 1080.0, 2160.0] {
                let c = Size::new(w, h);
                let g = compute_geometry(c, image, 2.0).unwrap();
                assert_cover(c, image, &g);
            }
        }
    }
}

#[test]
fn backing_store_scales_by_dpr_and_truncates() {
    let g = compute_geometry(Size::new(100.0, 50.0), Size::new(2.0, 1.0), 2.0).unwrap();
    assert_eq!(g.backing_size(), (200, 100));
    assert_eq!(g.display_rect(), Rect::new(0.0, 0.0, 100.0, 50.0));

    let g = compute_geometry(Size::new(101.0, 50.5), Size::new(2.0, 1.0), 1.5).unwrap();
    assert_eq!(g.backing_size(), (151, 75));
}

#[test]
fn invalid_dpr_falls_back_to_one() {
    let g = compute_geometry(Size::new(100.0, 50.0), Size::new(2.0, 1.0), 0.0).unwrap();
    assert_eq!(g.dpr, 1.0);
    assert_eq!(g.backing_size(), (100, 50));
}

#[test]
fn degenerate_inputs_are_rejected() {
    assert!(compute_geometry(Size::new(0.0, 10.0), Size::new(1.0, 1.0), 1.0).is_err());
    assert!(compute_geometry(Size::new(10.0, 10.0), Size::new(1.0, 0.0), 1.0).is_err());
    assert!(compute_geometry(Size::new(f64::NAN, 10.0), Size::new(1.0, 1.0), 1.0).is_err());
}

#[test]
fn tiny_displays_keep_a_one_pixel_backing_store() {
    let g = compute_geometry(Size::new(0.25, 0.25), Size::new(1.0, 1.0), 1.0).unwrap();
    assert_eq!(g.backing_size(), (1, 1));
}
