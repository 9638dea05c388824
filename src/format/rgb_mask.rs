//! RGB mask synthesis.
//!
//! Packs, per pixel, the object id into the red channel and the class id into
//! the green channel of an RGB raster; blue stays 0. Object ids are the
//! 1-based positions of the instance masks sorted by file name, and class ids
//! come from looking up the semantic mask color in a [`ColorTable`].
//!
//! Output files, relative to the dataset session:
//!
//! ```text
//! RGB/<side>_rgb.png        packed mask
//! RGB/<side>_objects.json   {"1": "<instance file stem>", ...}
//! ```

use std::path::{Path, PathBuf};

use image::{GrayImage, Rgb, RgbImage};
use serde_json::{Map, Value};

use crate::data::{DatasetLayout, file_stem, load_gray, load_rgb};
use crate::error::{Error, Result};
use crate::format::color_map::{ColorMap, ColorTable};
use crate::model::Side;

/// Files written by [`synthesize_side`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbMaskOutput {
    /// Packed RGB mask image
    pub mask_path: PathBuf,
    /// Object id → name side-car
    pub objects_path: PathBuf,
    /// Number of objects packed
    pub object_count: usize,
}

/// Pack instance ids and class ids into an RGB raster.
///
/// Instances are applied in list order, so later masks overwrite earlier ones
/// where they overlap. Pixels outside every instance stay (0, 0, 0).
pub fn synthesize_rgb_mask(
    semantic_colors: &RgbImage,
    instances: &[GrayImage],
    table: &ColorTable,
) -> Result<RgbImage> {
    if instances.len() > usize::from(u8::MAX) {
        return Err(Error::TooManyObjects {
            count: instances.len(),
        });
    }

    let (width, height) = semantic_colors.dimensions();
    let mut out = RgbImage::new(width, height);

    for (index, mask) in instances.iter().enumerate() {
        if mask.dimensions() != (width, height) {
            return Err(Error::DimensionMismatch {
                what: format!("instance mask {}", index + 1),
                expected: (width, height),
                found: mask.dimensions(),
            });
        }
        let object_id = u8::try_from(index + 1).map_err(|_| Error::TooManyObjects {
            count: instances.len(),
        })?;

        for (x, y, pixel) in mask.enumerate_pixels() {
            if pixel[0] > 0 {
                let class_id = table.class_of(semantic_colors.get_pixel(x, y).0);
                out.put_pixel(x, y, Rgb([object_id, class_id, 0]));
            }
        }
    }

    Ok(out)
}

/// Side-car JSON mapping 1-based object ids to names.
pub fn object_names_json(names: &[String]) -> Result<String> {
    let map: Map<String, Value> = names
        .iter()
        .enumerate()
        .map(|(i, name)| ((i + 1).to_string(), Value::String(name.clone())))
        .collect();
    Ok(serde_json::to_string_pretty(&Value::Object(map))?)
}

/// Synthesize and write the RGB mask of one dataset session.
///
/// Reads the first image in `semantic/` as colors and every image in
/// `instance/` sorted by file name. Unlike interactive loading, a missing
/// `instance/` folder is an error.
pub fn synthesize_side(session: &Path, side: Side, color_map: &ColorMap) -> Result<RgbMaskOutput> {
    let layout = DatasetLayout::from_session(session.to_path_buf())?;
    let instance_dir = layout.instance_dir();
    if !instance_dir.is_dir() {
        return Err(Error::missing_path(instance_dir));
    }
    let instance_paths = layout.sorted_instances();

    let table = ColorTable::from_color_map(color_map)?;
    let semantic = load_rgb(&layout.semantic)?;
    let instances = instance_paths
        .iter()
        .map(|path| load_gray(path))
        .collect::<Result<Vec<_>>>()?;
    let names: Vec<String> = instance_paths.iter().map(|p| file_stem(p)).collect();

    let packed = synthesize_rgb_mask(&semantic, &instances, &table)?;

    let out_dir = layout.rgb_output_dir();
    std::fs::create_dir_all(&out_dir)?;
    let mask_path = out_dir.join(format!("{}_rgb.png", side.name()));
    let objects_path = out_dir.join(format!("{}_objects.json", side.name()));

    packed.save(&mask_path)?;
    std::fs::write(&objects_path, object_names_json(&names)?)?;

    log::info!(
        "💾 Saved {} RGB mask with {} objects to {:?}",
        side,
        names.len(),
        mask_path
    );

    Ok(RgbMaskOutput {
        mask_path,
        objects_path,
        object_count: names.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BASE_DIR, INSTANCE_DIR, RGB_OUTPUT_DIR, SEMANTIC_DIR};
    use image::Luma;

    fn table_with(color: [u8; 3], id: usize) -> ColorTable {
        // Pad with filler classes so `color` lands on `id`
        let mut entries: Vec<(String, [u8; 3])> = (1..id)
            .map(|i| (format!("filler{}", i), [0, 0, u8::try_from(i).unwrap()]))
            .collect();
        entries.push(("known".to_string(), color));
        ColorTable::from_color_map(&ColorMap::new(entries)).unwrap()
    }

    #[test]
    fn test_two_by_two_packing() {
        let known = [10, 20, 30];
        let unknown = [200, 100, 50];
        let table = table_with(known, 3);

        let mut semantic = RgbImage::new(2, 2);
        semantic.put_pixel(0, 0, Rgb(known));
        semantic.put_pixel(1, 0, Rgb(unknown));
        semantic.put_pixel(0, 1, Rgb(known));
        semantic.put_pixel(1, 1, Rgb(known));

        let mut top_row = GrayImage::new(2, 2);
        top_row.put_pixel(0, 0, Luma([255]));
        top_row.put_pixel(1, 0, Luma([255]));

        let out = synthesize_rgb_mask(&semantic, &[top_row], &table).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [1, 3, 0]);
        assert_eq!(out.get_pixel(1, 0).0, [1, 0, 0]);
        assert_eq!(out.get_pixel(0, 1).0, [0, 0, 0]);
        assert_eq!(out.get_pixel(1, 1).0, [0, 0, 0]);
    }

    #[test]
    fn test_later_instance_wins_on_overlap() {
        let table = table_with([5, 5, 5], 1);
        let semantic = RgbImage::from_pixel(2, 1, Rgb([5, 5, 5]));

        let mut first = GrayImage::new(2, 1);
        first.put_pixel(0, 0, Luma([1]));
        first.put_pixel(1, 0, Luma([1]));
        let mut second = GrayImage::new(2, 1);
        second.put_pixel(1, 0, Luma([1]));

        let out = synthesize_rgb_mask(&semantic, &[first, second], &table).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [1, 1, 0]);
        assert_eq!(out.get_pixel(1, 0).0, [2, 1, 0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let table = ColorTable::default();
        let semantic = RgbImage::new(2, 2);
        let result = synthesize_rgb_mask(&semantic, &[GrayImage::new(3, 2)], &table);
        assert!(matches!(result, Err(Error::DimensionMismatch { .. })));
    }

    #[test]
    fn test_no_instances_is_all_zero() {
        let semantic = RgbImage::from_pixel(3, 3, Rgb([1, 2, 3]));
        let out = synthesize_rgb_mask(&semantic, &[], &ColorTable::default()).unwrap();
        assert!(out.pixels().all(|p| p.0 == [0, 0, 0]));
    }

    #[test]
    fn test_object_names_json() {
        let json = object_names_json(&["car_01".to_string(), "tree".to_string()]).unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["1"], "car_01");
        assert_eq!(value["2"], "tree");
        assert!(json.find("\"1\"").unwrap() < json.find("\"2\"").unwrap());
    }

    fn temp_session(name: &str) -> PathBuf {
        let session =
            std::env::temp_dir().join(format!("cpat_rgb_{}_{}", std::process::id(), name));
        let _ = std::fs::remove_dir_all(&session);
        for dir in [BASE_DIR, SEMANTIC_DIR] {
            std::fs::create_dir_all(session.join(dir)).unwrap();
        }
        session
    }

    #[test]
    fn test_missing_instance_dir_aborts() {
        let session = temp_session("missing");
        RgbImage::new(1, 1)
            .save(session.join(BASE_DIR).join("base.png"))
            .unwrap();
        RgbImage::new(1, 1)
            .save(session.join(SEMANTIC_DIR).join("sem.png"))
            .unwrap();

        let err = synthesize_side(&session, Side::Model, &ColorMap::default()).unwrap_err();
        assert!(matches!(err, Error::MissingPath { ref path } if path.ends_with(INSTANCE_DIR)));
        assert!(!session.join(RGB_OUTPUT_DIR).exists());

        let _ = std::fs::remove_dir_all(session);
    }

    #[test]
    fn test_object_ids_follow_file_names() {
        let session = temp_session("order");
        let color = [7, 7, 7];
        RgbImage::new(2, 1)
            .save(session.join(BASE_DIR).join("base.png"))
            .unwrap();
        RgbImage::from_pixel(2, 1, Rgb(color))
            .save(session.join(SEMANTIC_DIR).join("sem.png"))
            .unwrap();
        std::fs::create_dir_all(session.join(INSTANCE_DIR)).unwrap();
        // Written out of name order; both cover pixel (1, 0)
        let mut zeta = GrayImage::new(2, 1);
        zeta.put_pixel(1, 0, Luma([255]));
        zeta.save(session.join(INSTANCE_DIR).join("zeta.png")).unwrap();
        let mut alpha = GrayImage::new(2, 1);
        alpha.put_pixel(0, 0, Luma([255]));
        alpha.put_pixel(1, 0, Luma([255]));
        alpha.save(session.join(INSTANCE_DIR).join("alpha.png")).unwrap();

        let map = ColorMap::new(vec![("thing".to_string(), color)]);
        let output = synthesize_side(&session, Side::Real, &map).unwrap();
        assert_eq!(output.object_count, 2);
        assert_eq!(output.mask_path, session.join(RGB_OUTPUT_DIR).join("real_rgb.png"));

        let packed = image::open(&output.mask_path).unwrap().to_rgb8();
        assert_eq!(packed.get_pixel(0, 0).0, [1, 1, 0]);
        assert_eq!(packed.get_pixel(1, 0).0, [2, 1, 0]);

        let objects: Value =
            serde_json::from_str(&std::fs::read_to_string(&output.objects_path).unwrap()).unwrap();
        assert_eq!(objects["1"], "alpha");
        assert_eq!(objects["2"], "zeta");

        let _ = std::fs::remove_dir_all(session);
    }
}
