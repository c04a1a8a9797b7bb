use crate::types::{Landmark, OutputLayout};

/// Line segment connecting two landmarks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment {
    LeftFemur,
    LeftTibia,
    RightFemur,
    RightTibia,
}

impl Segment {
    /// All segments in output order
    pub const ALL: [Segment; 4] = [
        Segment::LeftFemur,
        Segment::LeftTibia,
        Segment::RightFemur,
        Segment::RightTibia,
    ];

    pub fn start(&self) -> Landmark {
        match self {
            Segment::LeftFemur => Landmark::LeftFemurHead,
            Segment::LeftTibia => Landmark::LeftKnee,
            Segment::RightFemur => Landmark::RightFemurHead,
            Segment::RightTibia => Landmark::RightKnee,
        }
    }

    pub fn end(&self) -> Landmark {
        match self {
            Segment::LeftFemur => Landmark::LeftKnee,
            Segment::LeftTibia => Landmark::LeftAnkle,
            Segment::RightFemur => Landmark::RightKnee,
            Segment::RightTibia => Landmark::RightAnkle,
        }
    }

    /// Segment name as written by the given layout
    pub fn name(&self, layout: OutputLayout) -> &'static str {
        match layout {
            OutputLayout::Current => match self {
                Segment::LeftFemur => "Left femur",
                Segment::LeftTibia => "Left tibia",
                Segment::RightFemur => "Right femur",
                Segment::RightTibia => "Right tibia",
            },
            OutputLayout::Legacy => match self {
                Segment::LeftFemur => "leftTopLeg",
                Segment::LeftTibia => "leftBottomLeg",
                Segment::RightFemur => "rightTopLeg",
                Segment::RightTibia => "rightBottomLeg",
            },
        }
    }
}
