//! End-to-end tests over dataset folders written to a temporary directory.


use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use image::{GrayImage, Luma, Rgb, RgbImage};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

/// Temporary dataset root removed on drop.
struct TempDataset {
    root: PathBuf,
}

impl TempDataset {
    fn new(name: &str) -> Self {
        let root = std::env::temp_dir().join(format!(
            "cpat_it_{}_{}_{}",
            std::process::id(),
            NEXT_ID.fetch_add(1, Ordering::Relaxed),
            name
        ));
        let _ = std::fs::remove_dir_all(&root);
        std::fs::create_dir_all(root.join("session")).unwrap();
        Self { root }
    }

    fn session(&self) -> PathBuf {
        self.root.join("session")
    }

    fn write_base(&self, img: &RgbImage) {
        img.save(prepare(self.session().join("ir/frame.png"))).unwrap();
    }

    fn write_semantic_ids(&self, img: &GrayImage) {
        img.save(prepare(self.session().join("semantic/classes.png")))
            .unwrap();
    }

    fn write_semantic_colors(&self, img: &RgbImage) {
        img.save(prepare(self.session().join("semantic/classes.png")))
            .unwrap();
    }

    fn write_instance(&self, name: &str, img: &GrayImage) {
        img.save(prepare(self.session().join("instance").join(name)))
            .unwrap();
    }
}

impl Drop for TempDataset {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

/// Create the parent folder of `path` and return it.
fn prepare(path: PathBuf) -> PathBuf {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    path
}

fn mask(w: u32, h: u32, on: &[(u32, u32)]) -> GrayImage {
    let mut m = GrayImage::new(w, h);
    for &(x, y) in on {
        m.put_pixel(x, y, Luma([255]));
    }
    m
}

/// Model side: 4x4, class 5 on the left column, one object.
fn model_dataset() -> TempDataset {
    let ds = TempDataset::new("model");
    ds.write_base(&RgbImage::from_pixel(4, 4, Rgb([40, 40, 40])));
    let mut semantic = GrayImage::new(4, 4);
    for y in 0..4 {
        semantic.put_pixel(0, y, Luma([5]));
    }
    ds.write_semantic_ids(&semantic);
    ds.write_instance("car_02.png", &mask(4, 4, &[(0, 1)]));
    ds
}

/// Real side: 2x2, class 5 everywhere, no instances.
fn real_dataset() -> TempDataset {
    let ds = TempDataset::new("real");
    ds.write_base(&RgbImage::from_pixel(2, 2, Rgb([128, 129, 129])));
    ds.write_semantic_ids(&GrayImage::from_pixel(2, 2, Luma([5])));
    ds
}
