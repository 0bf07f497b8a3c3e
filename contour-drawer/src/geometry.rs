use std::fmt;

use egui::Pos2;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

macro_rules! space_point {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
        #[serde(from = "[f32; 2]", into = "[f32; 2]")]
        pub struct $name {
            pub x: f32,
            pub y: f32,
        }

        impl $name {
            pub const fn new(x: f32, y: f32) -> Self {
                Self { x, y }
            }

            pub fn distance(self, other: Self) -> f32 {
                (self.x - other.x).hypot(self.y - other.y)
            }
        }

        impl From<[f32; 2]> for $name {
            fn from([x, y]: [f32; 2]) -> Self {
                Self { x, y }
            }
        }

        impl From<$name> for [f32; 2] {
            fn from(p: $name) -> Self {
                [p.x, p.y]
            }
        }
    };
}

space_point!(
    /// Pointer position as reported by the host, relative to the page
    PagePoint
);
space_point!(
    /// Image-intrinsic coordinate. Everything that is stored uses this space.
    PixelPoint
);
space_point!(
    /// On-screen coordinate after the current viewport transform
    DisplayPoint
);

impl From<DisplayPoint> for Pos2 {
    fn from(p: DisplayPoint) -> Self {
        Pos2::new(p.x, p.y)
    }
}

impl From<Pos2> for DisplayPoint {
    fn from(p: Pos2) -> Self {
        DisplayPoint::new(p.x, p.y)
    }
}

impl From<Pos2> for PagePoint {
    fn from(p: Pos2) -> Self {
        PagePoint::new(p.x, p.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContourKind {
    Circle,
    Polygon,
}

impl fmt::Display for ContourKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContourKind::Circle => f.write_str("circle"),
            ContourKind::Polygon => f.write_str("polygon"),
        }
    }
}

/// Stored annotation shape in pixel space.
///
/// Polygons are closed implicitly, the last point connects back to the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Contour {
    Circle { center: PixelPoint, edge: PixelPoint },
    Polygon { points: Vec<PixelPoint> },
}

pub const MIN_POLYGON_POINTS: usize = 3;

impl Contour {
    pub fn circle(center: PixelPoint, edge: PixelPoint) -> Self {
        Self::Circle { center, edge }
    }

    pub fn polygon(points: Vec<PixelPoint>) -> Result<Self> {
        if points.len() < MIN_POLYGON_POINTS {
            return Err(Error::TooFewPoints {
                kind: ContourKind::Polygon,
                min: MIN_POLYGON_POINTS,
                got: points.len(),
            });
        }
        Ok(Self::Polygon { points })
    }

    /// Builds a contour from the points a draw gesture produced.
    pub fn from_points(kind: ContourKind, points: Vec<PixelPoint>) -> Result<Self> {
        match kind {
            ContourKind::Circle => match points.as_slice() {
                [center, edge] => Ok(Self::circle(*center, *edge)),
                _ => Err(Error::WrongPointCount {
                    kind,
                    expected: 2,
                    got: points.len(),
                }),
            },
            ContourKind::Polygon => Self::polygon(points),
        }
    }

    pub fn kind(&self) -> ContourKind {
        match self {
            Contour::Circle { .. } => ContourKind::Circle,
            Contour::Polygon { .. } => ContourKind::Polygon,
        }
    }

    /// Radius of a circle contour, `None` for polygons
    pub fn radius(&self) -> Option<f32> {
        match self {
            Contour::Circle { center, edge } => Some(center.distance(*edge)),
            Contour::Polygon { .. } => None,
        }
    }

    /// Absolute area. Circles use their radius, polygons the shoelace formula.
    pub fn area(&self) -> f32 {
        match self {
            Contour::Circle { center, edge } => {
                let r = center.distance(*edge);
                std::f32::consts::PI * r * r
            }
            Contour::Polygon { points } => polygon_area(points),
        }
    }
}

impl AsRef<Contour> for Contour {
    fn as_ref(&self) -> &Contour {
        self
    }
}

pub(crate) fn polygon_area(points: &[PixelPoint]) -> f32 {
    use itertools::Itertools;

    let twice = points
        .iter()
        .circular_tuple_windows()
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum::<f32>();
    (twice * 0.5).abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<PixelPoint> {
        vec![
            PixelPoint::new(0.0, 0.0),
            PixelPoint::new(10.0, 0.0),
            PixelPoint::new(10.0, 10.0),
            PixelPoint::new(0.0, 10.0),
        ]
    }

    #[test]
    fn circle_radius_is_center_to_edge() {
        let c = Contour::circle(PixelPoint::new(50.0, 50.0), PixelPoint::new(53.0, 54.0));
        assert_eq!(c.radius(), Some(5.0));
    }

    #[test]
    fn polygon_needs_three_points() {
        let err = Contour::polygon(square()[..2].to_vec()).unwrap_err();
        assert_eq!(
            err,
            Error::TooFewPoints {
                kind: ContourKind::Polygon,
                min: 3,
                got: 2
            }
        );
    }

    #[test]
    fn circle_from_points_needs_exactly_two() {
        assert!(Contour::from_points(ContourKind::Circle, square()).is_err());
        let c = Contour::from_points(ContourKind::Circle, square()[..2].to_vec()).unwrap();
        assert_eq!(c.kind(), ContourKind::Circle);
    }

    #[test]
    fn square_area() {
        let c = Contour::polygon(square()).unwrap();
        assert_eq!(c.area(), 100.0);
    }

    #[test]
    fn contour_serializes_with_kind_tag() {
        let c = Contour::circle(PixelPoint::new(1.0, 2.0), PixelPoint::new(3.0, 4.0));
        let json = serde_json::to_string(&c).unwrap();
        assert_eq!(json, r#"{"kind":"circle","center":[1.0,2.0],"edge":[3.0,4.0]}"#);
        assert_eq!(serde_json::from_str::<Contour>(&json).unwrap(), c);
    }
}
