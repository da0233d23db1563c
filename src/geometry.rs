//! Tangent-offset ribbon geometry.
//!
//! Each input sample gets two boundary points, offset by `±half_width` along the
//! perpendicular of its local tangent. Walking the left points forward and the
//! right points backward gives a closed polygon approximating the stroke.

use crate::types::Point;

/// Boundary points of a stroke, one pair per non-degenerate sample.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ribbon {
    pub left: Vec<Point>,
    pub right: Vec<Point>,
}

impl Ribbon {
    /// Rebuild from the full sample path.
    pub fn from_path(path: &[Point], half_width: f32) -> Self {
        let (left, right) = ribbon_offsets(path, half_width).into_iter().unzip();
        Self { left, right }
    }

    /// Number of offset pairs.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Fewer than two pairs can't enclose any area.
    pub fn is_degenerate(&self) -> bool {
        self.len() < 2
    }

    /// Closed outline: left side in sample order, then right side reversed.
    pub fn polygon(&self) -> Vec<Point> {
        self.left.iter().chain(self.right.iter().rev()).copied().collect()
    }
}

/// Local tangent at `i`: forward difference at the start, backward at the end,
/// and the plain sum of both legs in between (legs are not normalized first).
fn tangent(path: &[Point], i: usize) -> Option<(f32, f32)> {
    let here = *path.get(i)?;
    let prev = i.checked_sub(1).and_then(|j| path.get(j)).copied();
    let next = path.get(i + 1).copied();
    let leg = |a: Point, b: Point| (b.x - a.x, b.y - a.y);
    match (prev, next) {
        (None, Some(n)) => Some(leg(here, n)),
        (Some(p), None) => Some(leg(p, here)),
        (Some(p), Some(n)) => {
            let (ix, iy) = leg(p, here);
            let (ox, oy) = leg(here, n);
            Some(((ix + ox) * 0.5, (iy + oy) * 0.5))
        }
        (None, None) => None,
    }
}

/// Unit perpendicular `(-dy, dx) / |d|`; `None` for a zero-length tangent.
pub fn unit_normal(dx: f32, dy: f32) -> Option<(f32, f32)> {
    let len = (dx * dx + dy * dy).sqrt();
    if len == 0.0 || !len.is_finite() {
        return None;
    }
    Some((-dy / len, dx / len))
}

/// (left, right) boundary pair for every sample with a usable tangent.
/// Samples whose tangent has zero length are skipped.
pub fn ribbon_offsets(path: &[Point], half_width: f32) -> Vec<(Point, Point)> {
    if path.len() < 2 {
        return Vec::new();
    }
    path.iter()
        .enumerate()
        .filter_map(|(i, p)| {
            let (dx, dy) = tangent(path, i)?;
            let n = unit_normal(dx, dy)?;
            Some((p.offset(n, half_width), p.offset(n, -half_width)))
        })
        .collect()
}

/// Centers of the round caps: the first sample, and the last one unless it
/// sits exactly on the first.
pub fn cap_centers(path: &[Point]) -> Vec<Point> {
    match (path.first(), path.last()) {
        (Some(first), Some(last)) if first == last => vec![*first],
        (Some(first), Some(last)) => vec![*first, *last],
        _ => Vec::new(),
    }
}

/// Direction of travel at each end of the path, used by flat caps.
/// `None` when the end has no non-zero leg.
pub fn end_directions(path: &[Point]) -> (Option<(f32, f32)>, Option<(f32, f32)>) {
    let unit = |a: &Point, b: &Point| {
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        let len = (dx * dx + dy * dy).sqrt();
        (len > 0.0).then(|| (dx / len, dy / len))
    };
    let start = path.windows(2).find_map(|w| unit(&w[0], &w[1]));
    let end = path.windows(2).rev().find_map(|w| unit(&w[0], &w[1]));
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(f32, f32)]) -> Vec<Point> {
        raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn horizontal_line_offsets_by_half_width() {
        let ribbon = Ribbon::from_path(&pts(&[(0.0, 0.0), (10.0, 0.0), (20.0, 0.0)]), 5.0);
        assert_eq!(ribbon.len(), 3);
        for (i, (l, r)) in ribbon.left.iter().zip(&ribbon.right).enumerate() {
            assert_eq!(l.x, i as f32 * 10.0);
            assert_eq!(l.y, 5.0);
            assert_eq!(r.y, -5.0);
        }
    }

    #[test]
    fn polygon_walks_left_then_right_reversed() {
        let ribbon = Ribbon::from_path(&pts(&[(0.0, 0.0), (10.0, 0.0)]), 1.0);
        let poly = ribbon.polygon();
        assert_eq!(
            poly,
            pts(&[(0.0, 1.0), (10.0, 1.0), (10.0, -1.0), (0.0, -1.0)])
        );
    }

    #[test]
    fn corner_uses_averaged_tangent() {
        // Right then down: tangent at the corner is (5, 5), normal points (-1, 1)/sqrt2.
        let ribbon = Ribbon::from_path(&pts(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]), 2.0);
        let corner = ribbon.left[1];
        let k = 2.0 / 2f32.sqrt();
        assert!((corner.x - (10.0 - k)).abs() < 1e-5);
        assert!((corner.y - k).abs() < 1e-5);
    }

    #[test]
    fn degenerate_paths_have_no_ribbon() {
        assert!(Ribbon::from_path(&[], 3.0).is_empty());
        assert!(Ribbon::from_path(&pts(&[(4.0, 4.0)]), 3.0).is_empty());
        let same = Ribbon::from_path(&pts(&[(4.0, 4.0), (4.0, 4.0), (4.0, 4.0)]), 3.0);
        assert!(same.is_empty());
        assert!(same.is_degenerate());
    }

    #[test]
    fn reversal_skips_the_turning_sample() {
        let ribbon = Ribbon::from_path(&pts(&[(0.0, 0.0), (10.0, 0.0), (0.0, 0.0)]), 1.0);
        assert_eq!(ribbon.len(), 2);
    }

    #[test]
    fn caps_collapse_when_closed_on_start() {
        assert_eq!(cap_centers(&[]), vec![]);
        assert_eq!(cap_centers(&pts(&[(1.0, 2.0)])), pts(&[(1.0, 2.0)]));
        assert_eq!(cap_centers(&pts(&[(1.0, 2.0), (5.0, 5.0), (1.0, 2.0)])), pts(&[(1.0, 2.0)]));
        assert_eq!(cap_centers(&pts(&[(1.0, 2.0), (5.0, 5.0)])), pts(&[(1.0, 2.0), (5.0, 5.0)]));
    }

    #[test]
    fn end_directions_skip_repeated_samples() {
        let (start, end) = end_directions(&pts(&[(0.0, 0.0), (0.0, 0.0), (3.0, 0.0), (3.0, 4.0), (3.0, 4.0)]));
        assert_eq!(start, Some((1.0, 0.0)));
        assert_eq!(end, Some((0.0, 1.0)));
        assert_eq!(end_directions(&pts(&[(2.0, 2.0)])), (None, None));
    }
}
