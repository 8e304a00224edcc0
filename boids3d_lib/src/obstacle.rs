use glam::f32::Vec3;

use crate::options::ConfigError;

/// An axis-aligned box blocking part of the world.
///
/// `position` is the box center, `size` holds the half-extents along each
/// axis, so the box spans `[position - size, position + size]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub position: Vec3,
    pub size: Vec3,
}

impl Obstacle {
    pub fn new(position: Vec3, size: Vec3) -> Self {
        Obstacle { position, size }
    }

    /// True iff `point` lies inside the box, faces included.
    pub fn contains_point(&self, point: Vec3) -> bool {
        let min = self.position - self.size;
        let max = self.position + self.size;

        point.x >= min.x
            && point.x <= max.x
            && point.y >= min.y
            && point.y <= max.y
            && point.z >= min.z
            && point.z <= max.z
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.position.is_finite() {
            return Err(ConfigError::ObstacleCenter {
                x: self.position.x,
                y: self.position.y,
                z: self.position.z,
            });
        }

        if !self.size.is_finite() || self.size.min_element() < 0. {
            return Err(ConfigError::ObstacleHalfExtent {
                x: self.size.x,
                y: self.size.y,
                z: self.size.z,
            });
        }

        Ok(())
    }
}

impl Default for Obstacle {
    fn default() -> Self {
        Obstacle {
            position: Vec3::ZERO,
            size: Vec3::ONE,
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::f32::Vec3;
    use rstest::rstest;

    use super::Obstacle;

    fn unit_box_at_5() -> Obstacle {
        Obstacle::new(Vec3::new(5., 5., 5.), Vec3::new(1., 1., 1.))
    }

    #[rstest]
    #[case(Vec3::new(5., 5., 5.), true)]
    #[case(Vec3::new(5., 5., 6.), true)]
    #[case(Vec3::new(6., 5., 5.), true)]
    #[case(Vec3::new(6., 6., 6.), true)]
    #[case(Vec3::new(4., 4., 4.), true)]
    #[case(Vec3::new(5., 5., 6.01), false)]
    #[case(Vec3::new(3.99, 5., 5.), false)]
    #[case(Vec3::new(6., 6., 6.1), false)]
    fn containment_is_inclusive(#[case] point: Vec3, #[case] expected: bool) {
        assert_eq!(unit_box_at_5().contains_point(point), expected);
    }

    #[test]
    fn default_box_is_unit_around_origin() {
        let obstacle = Obstacle::default();

        assert!(obstacle.contains_point(Vec3::new(1., 1., 1.)));
        assert!(!obstacle.contains_point(Vec3::new(1., 1., 1.01)));
    }

    #[test]
    fn zero_size_contains_only_its_center() {
        let obstacle = Obstacle::new(Vec3::new(2., 2., 2.), Vec3::ZERO);

        assert!(obstacle.contains_point(Vec3::new(2., 2., 2.)));
        assert!(!obstacle.contains_point(Vec3::new(2., 2., 2.001)));
    }

    #[test]
    fn validates_reference_scene() {
        assert!(unit_box_at_5().validate().is_ok());
        assert!(Obstacle::new(Vec3::new(2., 2., 7.), Vec3::new(0.8, 0.8, 0.8))
            .validate()
            .is_ok());
    }

    #[test]
    fn rejects_negative_half_extent() {
        let obstacle = Obstacle::new(Vec3::ZERO, Vec3::new(1., -1., 1.));

        assert!(obstacle.validate().is_err());
    }

    #[test]
    fn rejects_non_finite_center() {
        let obstacle = Obstacle::new(Vec3::new(f32::INFINITY, 0., 0.), Vec3::ONE);

        assert!(obstacle.validate().is_err());
    }
}
