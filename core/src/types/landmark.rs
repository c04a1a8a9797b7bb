use crate::error::{Csv2JsonError, Result};
use crate::types::OutputLayout;
use std::fmt;

/// Number of fields in a landmark CSV row (key + 12 coordinates)
pub const ROW_WIDTH: usize = 13;

/// Anatomical landmark predicted by the upstream inference step
///
/// Declaration order is the CSV column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Landmark {
    LeftFemurHead,
    RightFemurHead,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
}

impl Landmark {
    /// All landmarks in column order
    pub const ALL: [Landmark; 6] = [
        Landmark::LeftFemurHead,
        Landmark::RightFemurHead,
        Landmark::LeftKnee,
        Landmark::RightKnee,
        Landmark::LeftAnkle,
        Landmark::RightAnkle,
    ];

    /// Legacy documents list the left leg before the right leg
    const LEGACY_ORDER: [Landmark; 6] = [
        Landmark::LeftFemurHead,
        Landmark::LeftKnee,
        Landmark::LeftAnkle,
        Landmark::RightFemurHead,
        Landmark::RightKnee,
        Landmark::RightAnkle,
    ];

    /// Order of the `landmarks` array for a layout
    pub fn output_order(layout: OutputLayout) -> [Landmark; 6] {
        match layout {
            OutputLayout::Current => Self::ALL,
            OutputLayout::Legacy => Self::LEGACY_ORDER,
        }
    }

    /// Name used in the output document
    pub fn name(&self) -> &'static str {
        match self {
            Landmark::LeftFemurHead => "leftFemurHead",
            Landmark::RightFemurHead => "rightFemurHead",
            Landmark::LeftKnee => "leftKnee",
            Landmark::RightKnee => "rightKnee",
            Landmark::LeftAnkle => "leftAnkle",
            Landmark::RightAnkle => "rightAnkle",
        }
    }

    /// Index of the x coordinate within [`LandmarkRow::coords`]
    fn x_index(&self) -> usize {
        match self {
            Landmark::LeftFemurHead => 0,
            Landmark::RightFemurHead => 2,
            Landmark::LeftKnee => 4,
            Landmark::RightKnee => 6,
            Landmark::LeftAnkle => 8,
            Landmark::RightAnkle => 10,
        }
    }
}

impl fmt::Display for Landmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Named 2D point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LandmarkPoint {
    pub landmark: Landmark,
    pub x: f64,
    pub y: f64,
}

impl LandmarkPoint {
    pub fn name(&self) -> &'static str {
        self.landmark.name()
    }
}

/// One parsed CSV record: a primary key and twelve coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkRow {
    pub key: String,
    pub coords: [f64; 12],
}

impl LandmarkRow {
    /// Parses a row from its raw fields
    ///
    /// `line` is the 1-based line number used for error reporting.
    ///
    /// # Errors
    ///
    /// Returns [`Csv2JsonError::MalformedRow`] if the row does not have
    /// exactly 13 fields or a coordinate is not a finite number.
    pub fn from_fields<S: AsRef<str>>(fields: &[S], line: u64) -> Result<Self> {
        let key = fields.first().map(|f| f.as_ref());

        if fields.len() != ROW_WIDTH {
            return Err(Csv2JsonError::malformed(
                line,
                key,
                format!("expected {} fields, found {}", ROW_WIDTH, fields.len()),
            ));
        }

        let mut coords = [0.0; 12];
        for (i, field) in fields[1..].iter().enumerate() {
            coords[i] = parse_coordinate(field.as_ref())
                .map_err(|reason| Csv2JsonError::malformed(line, key, reason))?;
        }

        Ok(Self {
            key: fields[0].as_ref().to_string(),
            coords,
        })
    }

    /// Returns the point for a landmark
    pub fn point(&self, landmark: Landmark) -> LandmarkPoint {
        let i = landmark.x_index();
        LandmarkPoint {
            landmark,
            x: self.coords[i],
            y: self.coords[i + 1],
        }
    }

    /// Returns all six points in column order
    pub fn points(&self) -> [LandmarkPoint; 6] {
        Landmark::ALL.map(|landmark| self.point(landmark))
    }
}

fn parse_coordinate(field: &str) -> std::result::Result<f64, String> {
    let trimmed = field.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| format!("'{}' is not a number", field))?;

    if !value.is_finite() {
        return Err(format!("'{}' is not a finite number", field));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn fields(line: &str) -> Vec<String> {
        line.split(',').map(str::to_string).collect()
    }

    #[test]
    fn test_parse_row_column_order() {
        let row = LandmarkRow::from_fields(
            &fields("P001,1.0,2.0,3.0,4.0,5.0,6.0,7.0,8.0,9.0,10.0,11.0,12.0"),
            1,
        )
        .unwrap();

        assert_eq!(row.key, "P001");
        let points = row.points();
        let expected = [
            ("leftFemurHead", 1.0, 2.0),
            ("rightFemurHead", 3.0, 4.0),
            ("leftKnee", 5.0, 6.0),
            ("rightKnee", 7.0, 8.0),
            ("leftAnkle", 9.0, 10.0),
            ("rightAnkle", 11.0, 12.0),
        ];
        for (point, (name, x, y)) in points.iter().zip(expected) {
            assert_eq!(point.name(), name);
            assert_eq!(point.x, x);
            assert_eq!(point.y, y);
        }
    }

    #[rstest]
    #[case(OutputLayout::Current)]
    #[case(OutputLayout::Legacy)]
    fn test_output_order_is_permutation(#[case] layout: OutputLayout) {
        let order = Landmark::output_order(layout);
        for landmark in Landmark::ALL {
            assert_eq!(order.iter().filter(|l| **l == landmark).count(), 1);
        }
    }

    #[test]
    fn test_legacy_order_lists_left_leg_first() {
        assert_eq!(
            Landmark::output_order(OutputLayout::Legacy).map(|l| l.name()),
            [
                "leftFemurHead",
                "leftKnee",
                "leftAnkle",
                "rightFemurHead",
                "rightKnee",
                "rightAnkle"
            ]
        );
        assert_eq!(Landmark::output_order(OutputLayout::Current), Landmark::ALL);
    }

    #[test]
    fn test_parse_row_scientific_and_whitespace() {
        let row = LandmarkRow::from_fields(
            &fields("K, 1.5e2 ,-2E-1,3,4,5,6,7,8,9,10,11,+12"),
            7,
        )
        .unwrap();
        assert_eq!(row.coords[0], 150.0);
        assert_eq!(row.coords[1], -0.2);
        assert_eq!(row.coords[11], 12.0);
    }

    #[rstest]
    #[case("P001,1,2,3")]
    #[case("P001,1,2,3,4,5,6,7,8,9,10,11,12,13")]
    #[case("P001")]
    fn test_wrong_arity_is_malformed(#[case] line: &str) {
        let err = LandmarkRow::from_fields(&fields(line), 4).unwrap_err();
        match err {
            Csv2JsonError::MalformedRow { line, key, reason } => {
                assert_eq!(line, 4);
                assert_eq!(key.as_deref(), Some("P001"));
                assert!(reason.starts_with("expected 13 fields"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[rstest]
    #[case("P001,1,2,3,4,5,6,7,8,9,10,11,abc")]
    #[case("P001,1,2,3,4,5,6,7,8,9,10,11,")]
    #[case("P001,1,2,3,4,5,6,7,8,9,10,11,nan")]
    #[case("P001,inf,2,3,4,5,6,7,8,9,10,11,12")]
    fn test_bad_coordinate_is_malformed(#[case] line: &str) {
        let err = LandmarkRow::from_fields(&fields(line), 2).unwrap_err();
        assert!(err.is_row_error());
    }

    #[test]
    fn test_landmark_names_are_unique() {
        let mut names: Vec<_> = Landmark::ALL.iter().map(|l| l.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 6);
    }
}
