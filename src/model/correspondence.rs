//! Click data and recorded correspondence rows.

use serde::{Deserialize, Serialize};

/// What a click on one side captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClickInfo {
    /// File stem of the first instance mask covering the pixel
    pub object_name: Option<String>,
    /// 1-based index of that instance mask
    pub object_id: Option<u32>,
    /// Raw semantic value at the pixel (0 is a valid recorded value)
    pub class_id: u8,
    /// Mean of the three base image channels, rounded to 2 decimals
    pub mean_luminance: f64,
}

impl ClickInfo {
    /// Create click info for a pixel without instance coverage.
    pub fn new(class_id: u8, mean_luminance: f64) -> Self {
        Self {
            object_name: None,
            object_id: None,
            class_id,
            mean_luminance,
        }
    }

    /// Attach the covering instance.
    pub fn with_object(mut self, name: impl Into<String>, id: u32) -> Self {
        self.object_name = Some(name.into());
        self.object_id = Some(id);
        self
    }
}

/// Mean of an RGB triple rounded to two decimal places.
pub fn mean_luminance(rgb: [u8; 3]) -> f64 {
    let mean = rgb.iter().map(|&c| f64::from(c)).sum::<f64>() / 3.0;
    (mean * 100.0).round() / 100.0
}

/// One recorded model/real correspondence.
///
/// Column order follows the exported table. The fourth column carries the
/// real side's mean luminance, same as the seventh, to stay compatible with
/// tables produced by earlier versions of the tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrespondenceRow {
    /// Object name from the model side
    pub name: String,
    /// Object id on the model side
    pub object_id_model: Option<u32>,
    /// Class id on the model side
    pub class_id_model: u8,
    /// Real side mean luminance (duplicated column)
    pub mean_lum_model_column: f64,
    /// Object id on the real side
    pub object_id_real: Option<u32>,
    /// Class id on the real side
    pub class_id_real: u8,
    /// Real side mean luminance
    pub mean_lum_real: f64,
}

impl CorrespondenceRow {
    /// Merge a model click and a real click into one row.
    pub fn from_clicks(model: &ClickInfo, real: &ClickInfo) -> Self {
        Self {
            name: model.object_name.clone().unwrap_or_default(),
            object_id_model: model.object_id,
            class_id_model: model.class_id,
            mean_lum_model_column: real.mean_luminance,
            object_id_real: real.object_id,
            class_id_real: real.class_id,
            mean_lum_real: real.mean_luminance,
        }
    }

    /// Cell values in table column order. Absent ids are empty strings.
    pub fn cells(&self) -> [String; 7] {
        let id = |v: Option<u32>| v.map(|v| v.to_string()).unwrap_or_default();
        [
            self.name.clone(),
            id(self.object_id_model),
            self.class_id_model.to_string(),
            format!("{:.2}", self.mean_lum_model_column),
            id(self.object_id_real),
            self.class_id_real.to_string(),
            format!("{:.2}", self.mean_lum_real),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_luminance_rounding() {
        assert_eq!(mean_luminance([128, 128, 128]), 128.0);
        // 385 / 3 = 128.333...
        assert_eq!(mean_luminance([128, 129, 128]), 128.33);
        // 386 / 3 = 128.666...
        assert_eq!(mean_luminance([128, 129, 129]), 128.67);
        assert_eq!(mean_luminance([0, 0, 0]), 0.0);
    }

    #[test]
    fn test_row_from_clicks() {
        let model = ClickInfo::new(5, 77.0).with_object("car_02", 2);
        let real = ClickInfo::new(5, 128.47);

        let row = CorrespondenceRow::from_clicks(&model, &real);

        assert_eq!(row.name, "car_02");
        assert_eq!(row.object_id_model, Some(2));
        assert_eq!(row.class_id_model, 5);
        assert_eq!(row.mean_lum_model_column, 128.47);
        assert_eq!(row.object_id_real, None);
        assert_eq!(row.class_id_real, 5);
        assert_eq!(row.mean_lum_real, 128.47);
        assert_eq!(
            row.cells(),
            ["car_02", "2", "5", "128.47", "", "5", "128.47"].map(String::from)
        );
    }

    #[test]
    fn test_row_without_model_object() {
        let model = ClickInfo::new(0, 10.0);
        let real = ClickInfo::new(1, 20.5).with_object("tree", 4);

        let row = CorrespondenceRow::from_clicks(&model, &real);
        assert_eq!(row.name, "");
        assert_eq!(row.object_id_model, None);
        assert_eq!(row.class_id_model, 0);
        assert_eq!(row.object_id_real, Some(4));
    }
}
