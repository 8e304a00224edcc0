use crate::boid::Boid;

pub fn distance_boid(b1: &Boid, b2: &Boid) -> f32 {
    distance_sq_boid(b1, b2).sqrt()
}

pub fn distance_sq_boid(b1: &Boid, b2: &Boid) -> f32 {
    (b1.position - b2.position).length_squared()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::f32::Vec3;

    use super::{distance_boid, distance_sq_boid};
    use crate::boid::Boid;

    macro_rules! assert_eqf32 {
        ($x:expr, $y:expr) => {
            assert_relative_eq!($x, $y, epsilon = 1e-3_f32)
        };
    }

    fn boid_at(position: Vec3, id: usize) -> Boid {
        Boid::new(position, Vec3::ZERO, id, 2.0, 0.05)
    }

    #[test]
    fn pythagorean_quadruple() {
        let b1 = boid_at(Vec3::new(1., 1., 1.), 0);
        let b2 = boid_at(Vec3::new(2., 3., 3.), 1);

        assert_eqf32!(distance_boid(&b1, &b2), 3.);
        assert_eqf32!(distance_sq_boid(&b1, &b2), 9.);
    }

    #[test]
    fn distance_is_symmetric() {
        let b1 = boid_at(Vec3::new(0.5, 9.5, 2.), 0);
        let b2 = boid_at(Vec3::new(7., 0.25, 4.5), 1);

        assert_eqf32!(distance_boid(&b1, &b2), distance_boid(&b2, &b1));
    }

    #[test]
    fn coincident_boids_have_zero_distance() {
        let b1 = boid_at(Vec3::new(5., 5., 5.), 0);
        let b2 = boid_at(Vec3::new(5., 5., 5.), 1);

        assert_eqf32!(distance_boid(&b1, &b2), 0.);
    }
}
