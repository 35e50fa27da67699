//! Picks the neighbour viewpoint behind each navigation button.
//!
//! Candidates are bucketed by comparing camera positions with the active
//! camera. A viewpoint below the active one wins outright: the first one met
//! is returned alone and the other buckets are ignored for that frame.
//! Otherwise up, left and right each take the candidate with the smallest
//! `|z|` (distance of the candidate from the z = 0 plane, not from the
//! active camera).

use crate::render::renderer::camera::Camera;

use super::viewpoint::{Viewpoint, ViewpointId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn label(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionTarget {
    pub direction: Direction,
    pub viewpoint: ViewpointId,
}

pub fn resolve_directions(active: &Camera, viewpoints: &[Viewpoint]) -> Vec<DirectionTarget> {
    let a = active.position;

    let mut up = Vec::new();
    let mut left = Vec::new();
    let mut right = Vec::new();

    for vp in viewpoints {
        let c = vp.camera.position;

        if c.y < a.y {
            return vec![DirectionTarget { direction: Direction::Down, viewpoint: vp.id() }];
        }
        if c.y > a.y {
            up.push(vp);
        }
        if c.y == a.y {
            if c.z > a.z {
                left.push(vp);
            } else if c.z < a.z {
                right.push(vp);
            }
        }
    }

    [(Direction::Up, up), (Direction::Left, left), (Direction::Right, right)]
        .into_iter()
        .filter_map(|(direction, mut bucket)| {
            bucket.sort_by(|l, r| l.camera.position.z.abs().total_cmp(&r.camera.position.z.abs()));
            bucket.first().map(|vp| DirectionTarget { direction, viewpoint: vp.id() })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::navigation::registry::NavigationRegistry;
    use crate::navigation::viewpoint::MarkerShape;

    fn registry_with(positions: &[Vec3]) -> (NavigationRegistry, Vec<ViewpointId>) {
        let mut reg = NavigationRegistry::new(Camera::default(), Camera::default());
        let ids = positions
            .iter()
            .map(|p| reg.add_viewpoint(*p, Vec3::ZERO, MarkerShape::Cone).id())
            .collect();
        (reg, ids)
    }

    fn target(targets: &[DirectionTarget], direction: Direction) -> Option<ViewpointId> {
        targets.iter().find(|t| t.direction == direction).map(|t| t.viewpoint)
    }

    #[test]
    fn down_short_circuits_on_first_encountered() {
        let (reg, ids) = registry_with(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, -1.0, 0.0),
            Vec3::new(0.0, -2.0, 0.0),
            Vec3::new(0.0, 4.0, 0.0),
        ]);
        let active = &reg.viewpoint(ids[0]).unwrap().camera;

        let got = resolve_directions(active, reg.viewpoints());
        assert_eq!(got, vec![DirectionTarget { direction: Direction::Down, viewpoint: ids[1] }]);
    }

    #[test]
    fn left_prefers_smallest_abs_z() {
        let (reg, ids) = registry_with(&[
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::new(0.0, 0.0, 2.0),
        ]);
        let active = &reg.viewpoint(ids[0]).unwrap().camera;

        let got = resolve_directions(active, reg.viewpoints());
        assert_eq!(target(&got, Direction::Left), Some(ids[2]));
        assert_eq!(target(&got, Direction::Right), None);
    }

    #[test]
    fn up_ignores_height_equality_for_sides() {
        let (reg, ids) = registry_with(&[
            Vec3::new(3.0, 0.23, 0.0),
            Vec3::new(3.0, 3.3, 0.0),
            Vec3::new(3.0, 0.23, -1.1),
        ]);
        let active = &reg.viewpoint(ids[0]).unwrap().camera;

        let got = resolve_directions(active, reg.viewpoints());
        assert_eq!(
            got,
            vec![
                DirectionTarget { direction: Direction::Up, viewpoint: ids[1] },
                DirectionTarget { direction: Direction::Right, viewpoint: ids[2] },
            ]
        );
    }

    #[test]
    fn empty_and_singleton_sets_resolve_to_nothing() {
        let cam = Camera::default();
        assert!(resolve_directions(&cam, &[]).is_empty());

        let (reg, ids) = registry_with(&[Vec3::new(1.0, 1.0, 1.0)]);
        let active = &reg.viewpoint(ids[0]).unwrap().camera;
        assert!(resolve_directions(active, reg.viewpoints()).is_empty());
    }
}
