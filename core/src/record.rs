use crate::extraction::AuxMetadata;
use crate::types::{Landmark, LandmarkPoint, LandmarkRow, OutputLayout, Segment};
use serde_json::{json, Map, Value};

/// Unit of the landmark coordinates
pub const UNIT: &str = "mm";

/// JSON value stored for one key of the output document
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRecord {
    pub landmarks: [LandmarkPoint; 6],
    pub segments: [Segment; 4],
    pub original_height: i64,
    pub original_width: i64,
    pub info: Vec<(String, String)>,
}

impl OutputRecord {
    /// Assembles a record from a parsed row and its resolved metadata
    ///
    /// Dimensions are truncated toward zero; unresolved dimensions are 0.
    pub fn build(row: &LandmarkRow, metadata: &AuxMetadata) -> Self {
        let (original_height, original_width) = metadata
            .dimensions
            .map(|d| d.truncated())
            .unwrap_or((0, 0));

        Self {
            landmarks: row.points(),
            segments: Segment::ALL,
            original_height,
            original_width,
            info: metadata.tags.clone(),
        }
    }

    /// Segment names in `drawLines` order
    pub fn measure_names(&self, layout: OutputLayout) -> Vec<&'static str> {
        self.segments.iter().map(|s| s.name(layout)).collect()
    }

    /// Renders the record in the given layout
    pub fn to_json(&self, layout: OutputLayout) -> Value {
        let landmarks: Vec<Value> = Landmark::output_order(layout)
            .iter()
            .filter_map(|landmark| self.landmarks.iter().find(|p| p.landmark == *landmark))
            .map(|p| json!({ p.name(): { "x": p.x, "y": p.y } }))
            .collect();

        let lines: Vec<Value> = self
            .segments
            .iter()
            .map(|s| {
                json!({
                    s.name(layout): {
                        "start": s.start().name(),
                        "end": s.end().name(),
                    }
                })
            })
            .collect();

        let mut record = Map::new();
        record.insert("landmarks".to_string(), Value::from(landmarks));
        record.insert(layout.draw_lines_field().to_string(), Value::from(lines));
        record.insert(
            layout.measure_names_field().to_string(),
            Value::from(self.measure_names(layout)),
        );
        record.insert(
            layout.height_field().to_string(),
            Value::from(self.original_height),
        );
        record.insert(
            layout.width_field().to_string(),
            Value::from(self.original_width),
        );

        if layout.has_metadata_fields() {
            let info: Map<String, Value> = self
                .info
                .iter()
                .map(|(name, value)| (name.clone(), Value::from(value.as_str())))
                .collect();
            record.insert("unit".to_string(), Value::from(UNIT));
            record.insert("info".to_string(), Value::Object(info));
        }

        Value::Object(record)
    }
}
