use crate::common::CrownPoint;

/// Axis-aligned bounding extent of a point set, bounds inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    /// `None` for an empty set.
    pub fn of(points: &[CrownPoint]) -> Option<Self> {
        let first = points.first()?;
        let start = Extent { min_x: first.x, min_y: first.y, max_x: first.x, max_y: first.y };
        Some(points.iter().fold(start, |e, p| Extent {
            min_x: e.min_x.min(p.x),
            min_y: e.min_y.min(p.y),
            max_x: e.max_x.max(p.x),
            max_y: e.max_y.max(p.y),
        }))
    }

    /// Shared area of two extents, `None` when they do not touch.
    pub fn intersection(&self, other: &Extent) -> Option<Self> {
        let e = Extent {
            min_x: self.min_x.max(other.min_x),
            min_y: self.min_y.max(other.min_y),
            max_x: self.max_x.min(other.max_x),
            max_y: self.max_y.min(other.max_y),
        };
        (e.min_x <= e.max_x && e.min_y <= e.max_y).then_some(e)
    }

    pub fn expand(&self, margin: f64) -> Self {
        Extent {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }

    pub fn contains(&self, p: &CrownPoint) -> bool {
        (self.min_x..=self.max_x).contains(&p.x) && (self.min_y..=self.max_y).contains(&p.y)
    }
}

/// Keeps actual points inside the extent both sets share and predicted points
/// inside that extent grown by `margin`.
///
/// An empty set leaves the other untouched. Disjoint extents leave nothing.
pub(crate) fn clip_to_common_extent(actual: &[CrownPoint], predicted: &[CrownPoint],
                                    margin: f64) -> (Vec<CrownPoint>, Vec<CrownPoint>) {
    let (Some(a), Some(p)) = (Extent::of(actual), Extent::of(predicted)) else {
        return (actual.to_vec(), predicted.to_vec());
    };
    let Some(common) = a.intersection(&p) else {
        return (vec![], vec![]);
    };
    let widened = common.expand(margin);

    (
        actual.iter().filter(|pt| common.contains(pt)).copied().collect(),
        predicted.iter().filter(|pt| widened.contains(pt)).copied().collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<CrownPoint> {
        coords.iter().map(|&c| CrownPoint::from(c)).collect()
    }

    #[test]
    fn test_extent_of() {
        let e = Extent::of(&pts(&[(3.0, -1.0), (-2.0, 4.0), (0.0, 0.0)])).unwrap();
        assert_eq!(e, Extent { min_x: -2.0, min_y: -1.0, max_x: 3.0, max_y: 4.0 });
        assert!(Extent::of(&[]).is_none());
    }

    #[test]
    fn test_clip_keeps_margin_for_predicted() {
        let actual = pts(&[(0.0, 0.0), (10.0, 10.0)]);
        let predicted = pts(&[(-1.0, -1.0), (0.5, 0.5), (12.0, 9.0), (500.0, 500.0)]);
        let (a, p) = clip_to_common_extent(&actual, &predicted, 3.0);
        assert_eq!(a, actual);
        assert_eq!(p, pts(&[(-1.0, -1.0), (0.5, 0.5), (12.0, 9.0)]));

        let (_, tight) = clip_to_common_extent(&actual, &predicted, 0.0);
        assert_eq!(tight, pts(&[(0.5, 0.5)]));
    }

    #[test]
    fn test_clip_disjoint_and_empty() {
        let actual = pts(&[(0.0, 0.0), (1.0, 1.0)]);
        let far = pts(&[(50.0, 50.0), (60.0, 60.0)]);
        assert_eq!(clip_to_common_extent(&actual, &far, 3.0), (vec![], vec![]));
        assert_eq!(clip_to_common_extent(&actual, &[], 3.0), (actual.clone(), vec![]));
    }
}
