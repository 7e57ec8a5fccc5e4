//! Point-in-target hit testing

use glam::Vec2;

use super::state::Target;

/// Signed distance to a circle
#[inline]
pub fn sd_circle(p: Vec2, center: Vec2, radius: f32) -> f32 {
    (p - center).length() - radius
}

/// Find the target under `point`.
///
/// Targets may overlap; the smallest id under the point wins.
pub fn resolve<'a, I>(point: Vec2, targets: I) -> Option<&'a Target>
where
    I: IntoIterator<Item = &'a Target>,
{
    targets
        .into_iter()
        .filter(|t| t.contains(point))
        .min_by_key(|t| t.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(id: u32, x: f32, y: f32) -> Target {
        Target::new(id, Vec2::new(x, y), 24.0)
    }

    #[test]
    fn test_sd_circle() {
        assert_eq!(sd_circle(Vec2::new(10.0, 0.0), Vec2::ZERO, 4.0), 6.0);
        assert!(sd_circle(Vec2::new(1.0, 1.0), Vec2::ZERO, 4.0) < 0.0);
    }

    #[test]
    fn test_edge_counts_as_hit() {
        let targets = [target(1, 100.0, 100.0)];
        assert!(resolve(Vec2::new(124.0, 100.0), &targets).is_some());
        assert!(resolve(Vec2::new(124.5, 100.0), &targets).is_none());
    }

    #[test]
    fn test_overlap_picks_smallest_id() {
        let targets = [target(5, 110.0, 100.0), target(2, 100.0, 100.0)];
        let hit = resolve(Vec2::new(105.0, 100.0), &targets).unwrap();
        assert_eq!(hit.id, 2);
    }

    #[test]
    fn test_empty_board_misses() {
        let targets: [Target; 0] = [];
        assert!(resolve(Vec2::new(1.0, 1.0), &targets).is_none());
    }
}
