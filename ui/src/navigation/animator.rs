use glam::Vec3;

use super::clock::ClockSample;
use super::viewpoint::{Marker, MarkerId};

/// Idle bob + hover bounce + constant spin for viewpoint markers.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerAnimator {
    pub yaw_rate: f32, // radians per second
    pub inactive_tint: Vec3,
    pub hover_tint: Vec3,
}

impl Default for MarkerAnimator {
    fn default() -> Self {
        Self {
            yaw_rate: 30f32.to_radians(),
            inactive_tint: Vec3::new(0.0, 1.0, 0.0),
            hover_tint: Vec3::new(1.0, 0.82, 0.25),
        }
    }
}

impl MarkerAnimator {
    pub fn animate<'a>(
        &self,
        markers: impl IntoIterator<Item = &'a mut Marker>,
        clock: ClockSample,
        hovered: Option<MarkerId>,
    ) {
        for marker in markers {
            self.animate_one(marker, clock, hovered == Some(marker.id()));
        }
    }

    pub fn animate_one(&self, marker: &mut Marker, clock: ClockSample, hovered: bool) {
        if hovered {
            marker.position.y = marker.baseline_y + (clock.elapsed * 10.0).sin() / 100.0;
            marker.tint = self.hover_tint;
        } else {
            marker.baseline_y += clock.elapsed.sin() / 1000.0;
            marker.position.y = marker.baseline_y;
            marker.tint = self.inactive_tint;
        }

        marker.rotation.y += self.yaw_rate * clock.delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::registry::NavigationRegistry;
    use crate::navigation::viewpoint::MarkerShape;
    use crate::render::renderer::camera::Camera;
    use approx::assert_relative_eq;

    fn marker() -> Marker {
        let mut reg = NavigationRegistry::new(Camera::default(), Camera::default());
        reg.add_viewpoint(Vec3::new(3.0, 0.23, 0.0), Vec3::ZERO, MarkerShape::Cone)
            .marker
            .clone()
    }

    fn sample(frame: u32) -> ClockSample {
        ClockSample { elapsed: frame as f32 * 0.016, delta: 0.016 }
    }

    #[test]
    fn hover_leaves_idle_baseline_untouched() {
        let anim = MarkerAnimator::default();
        let mut idle_only = marker();
        let mut hovered = marker();

        for f in 0..40 {
            anim.animate_one(&mut idle_only, sample(f), false);
            anim.animate_one(&mut hovered, sample(f), false);
        }
        anim.animate_one(&mut hovered, sample(40), true);

        assert_eq!(hovered.baseline_y(), idle_only.baseline_y());
        assert_eq!(hovered.tint, anim.hover_tint);

        anim.animate_one(&mut hovered, sample(41), false);
        anim.animate_one(&mut idle_only, sample(41), false);
        assert_eq!(hovered.position.y, idle_only.position.y);
    }

    #[test]
    fn yaw_spins_regardless_of_hover() {
        let anim = MarkerAnimator::default();
        let mut m = marker();

        anim.animate_one(&mut m, ClockSample { elapsed: 1.0, delta: 1.0 }, false);
        anim.animate_one(&mut m, ClockSample { elapsed: 2.0, delta: 1.0 }, true);

        assert_relative_eq!(m.rotation.y, 60f32.to_radians(), epsilon = 1e-6);
    }

    #[test]
    fn only_the_hovered_marker_is_tinted() {
        let anim = MarkerAnimator::default();
        let mut reg = NavigationRegistry::new(Camera::default(), Camera::default());
        let a = reg.add_viewpoint(Vec3::ZERO, Vec3::ZERO, MarkerShape::Cone).marker.id();
        reg.add_viewpoint(Vec3::X, Vec3::ZERO, MarkerShape::Sphere);

        anim.animate(reg.markers_mut(), sample(1), Some(a));

        let tints: Vec<_> = reg.markers().map(|m| m.tint).collect();
        assert_eq!(tints, vec![anim.hover_tint, anim.inactive_tint]);
    }
}
