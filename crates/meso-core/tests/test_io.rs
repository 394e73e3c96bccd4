mod common;

use std::path::Path;

use approx::assert_abs_diff_eq;
use image::GenericImageView;
use ndarray::Array2;

use meso_core::color::process::ColorPlanes;
use meso_core::error::MesoError;
use meso_core::frame::{ChannelId, Unit};
use meso_core::io::band::{read_band, BandDtype, BandLayout};
use meso_core::io::image_io::save_composite;
use meso_core::io::manifest::{load_scene, SceneManifest};
use meso_core::package::package;

use common::{plains_extent, scan_time, uniform_frame, write_band_f32, write_band_i16};

const MANIFEST: &str = r#"
timestamp = "2024-05-20T18:01:24Z"
width = 3
height = 2

[grid]
x_origin = -0.001
dx = 0.001
y_origin = 0.0005
dy = -0.001

[extent]
north = 36.5
south = 26.0
east = -92.0
west = -104.0

[platform]
platform_id = "G16"
scene_id = "Mesoscale"

[[channels]]
id = 13
unit = "K"
file = "C13.bin"
dtype = "i16"
scale_factor = 0.5
add_offset = 100.0
fill_value = -1

[[channels]]
id = 2
unit = "1"
file = "bands/C02.bin"
dtype = "f32"
"#;

fn write_scene(dir: &Path) -> std::path::PathBuf {
    std::fs::create_dir_all(dir.join("bands")).unwrap();
    write_band_i16(&dir.join("C13.bin"), &[300, 310, 320, -1, 340, 350]);
    write_band_f32(&dir.join("bands/C02.bin"), &[0.0, 0.1, 0.2, 0.3, 0.4, 0.5]);
    let path = dir.join("scene.toml");
    std::fs::write(&path, MANIFEST).unwrap();
    path
}

// ---------------------------------------------------------------------------
// Manifest loader
// ---------------------------------------------------------------------------

#[test]
fn test_load_scene_applies_scale_and_offset() {
    let dir = tempfile::tempdir().unwrap();
    let frame = load_scene(&write_scene(dir.path())).unwrap();

    assert_eq!(frame.shape(), (2, 3));
    assert_eq!(frame.timestamp(), scan_time());
    assert_eq!(*frame.extent(), plains_extent());
    assert_eq!(frame.platform().platform_id, "G16");

    let c13 = frame.channel(ChannelId::C13).unwrap();
    assert_eq!(c13.unit, Unit::Kelvin);
    assert_abs_diff_eq!(c13.data[[0, 0]], 250.0, epsilon = 1e-4);
    assert_abs_diff_eq!(c13.data[[1, 2]], 275.0, epsilon = 1e-4);
    assert!(c13.data[[1, 0]].is_nan());

    let c02 = frame.channel(ChannelId::C02).unwrap();
    assert_eq!(c02.unit, Unit::Reflectance);
    assert_abs_diff_eq!(c02.data[[1, 1]], 0.4, epsilon = 1e-6);
}

#[test]
fn test_load_scene_builds_axes_from_grid() {
    let dir = tempfile::tempdir().unwrap();
    let frame = load_scene(&write_scene(dir.path())).unwrap();
    assert_abs_diff_eq!(frame.x()[0], -0.001, epsilon = 1e-12);
    assert_abs_diff_eq!(frame.x()[2], 0.001, epsilon = 1e-12);
    assert_abs_diff_eq!(frame.y()[1], -0.0005, epsilon = 1e-12);
}

#[test]
fn test_load_scene_wrong_band_size() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scene(dir.path());
    write_band_i16(&dir.path().join("C13.bin"), &[1, 2, 3]);
    let err = load_scene(&path).unwrap_err();
    assert!(matches!(err, MesoError::InvalidManifest(_)), "got {err:?}");
}

#[test]
fn test_load_scene_missing_band_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_scene(dir.path());
    std::fs::remove_file(dir.path().join("bands/C02.bin")).unwrap();
    let err = load_scene(&path).unwrap_err();
    assert!(matches!(err, MesoError::Io(_)), "got {err:?}");
}

#[test]
fn test_manifest_validation() {
    let zero = MANIFEST.replace("width = 3", "width = 0");
    assert!(matches!(
        SceneManifest::from_toml(&zero),
        Err(MesoError::InvalidManifest(_))
    ));

    let flat = MANIFEST.replace("dx = 0.001", "dx = 0.0");
    assert!(matches!(
        SceneManifest::from_toml(&flat),
        Err(MesoError::InvalidManifest(_))
    ));

    let bad_channel = MANIFEST.replace("id = 13", "id = 17");
    assert!(matches!(SceneManifest::from_toml(&bad_channel), Err(MesoError::Toml(_))));
}

#[test]
fn test_manifest_defaults() {
    let manifest = SceneManifest::from_toml(MANIFEST).unwrap();
    let c02 = &manifest.channels[1];
    assert_eq!(c02.dtype, BandDtype::F32);
    assert_eq!(c02.scale_factor, 1.0);
    assert_eq!(c02.add_offset, 0.0);
    assert_eq!(c02.fill_value, None);
    assert_eq!(manifest.projection.longitude_of_projection_origin, -75.0);
}

// ---------------------------------------------------------------------------
// Band reader
// ---------------------------------------------------------------------------

#[test]
fn test_read_png_band_as_16_bit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("C07.png");
    let img = image::ImageBuffer::<image::Luma<u16>, Vec<u16>>::from_raw(
        2,
        2,
        vec![0, 1000, 2000, 65535],
    )
    .unwrap();
    img.save(&path).unwrap();

    let layout = BandLayout {
        width: 2,
        height: 2,
        dtype: BandDtype::U16,
        scale_factor: 0.01,
        add_offset: 200.0,
        fill_value: Some(65535.0),
    };
    let data = read_band(&path, &layout).unwrap();
    assert_abs_diff_eq!(data[[0, 0]], 200.0, epsilon = 1e-4);
    assert_abs_diff_eq!(data[[0, 1]], 210.0, epsilon = 1e-4);
    assert_abs_diff_eq!(data[[1, 0]], 220.0, epsilon = 1e-4);
    assert!(data[[1, 1]].is_nan());

    let wrong = BandLayout { width: 3, ..layout };
    assert!(matches!(
        read_band(&path, &wrong),
        Err(MesoError::InvalidManifest(_))
    ));
}

// ---------------------------------------------------------------------------
// Image writer
// ---------------------------------------------------------------------------

fn test_image() -> meso_core::package::CompositeImage {
    let frame = uniform_frame(4, 6, &[(ChannelId::C13, Unit::Kelvin, 250.0)]);
    let mut red = Array2::from_elem((4, 6), 1.0f32);
    red[[0, 0]] = f32::NAN;
    let planes = ColorPlanes::new(
        red,
        Array2::from_elem((4, 6), 0.5),
        Array2::from_elem((4, 6), 0.0),
    )
    .unwrap();
    package(&frame, &planes, "Test").unwrap()
}

#[test]
fn test_save_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.png");
    save_composite(&test_image(), &path).unwrap();

    let img = image::open(&path).unwrap();
    assert_eq!(img.dimensions(), (6, 4));
    let rgb = img.to_rgb8();
    assert_eq!(rgb.get_pixel(1, 1).0, [255, 128, 0]);
    assert_eq!(rgb.get_pixel(0, 0).0, [0, 128, 0]);
}

#[test]
fn test_save_tiff_is_16_bit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.tiff");
    save_composite(&test_image(), &path).unwrap();

    let img = image::open(&path).unwrap();
    assert_eq!(img.dimensions(), (6, 4));
    let rgb = img.to_rgb16();
    assert_eq!(rgb.get_pixel(2, 3).0, [65535, 32768, 0]);
}

#[test]
fn test_save_jpeg_and_default_format() {
    let dir = tempfile::tempdir().unwrap();
    let jpeg = dir.path().join("out.JPG");
    save_composite(&test_image(), &jpeg).unwrap();
    assert_eq!(image::open(&jpeg).unwrap().dimensions(), (6, 4));

    let unknown = dir.path().join("out.dat");
    save_composite(&test_image(), &unknown).unwrap();
    let bytes = std::fs::read(&unknown).unwrap();
    assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Tiff);
}
