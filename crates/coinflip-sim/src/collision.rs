use crate::state::RigidBody;
use coinflip_math::Vec3;

/// Outcome of testing a [`RigidBody`] against the ground plane.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CollisionResult {
    pub colliding: bool,
    pub normal: Option<Vec3>,
    pub penetration_depth: Option<f64>,
    pub contact_point: Option<Vec3>,
}

impl CollisionResult {
    pub fn none() -> Self {
        CollisionResult::default()
    }
}

/// Ground-plane collision detector. Models the ground as the implicit plane
/// `y = 0` and the coin as a disc whose two face centers are
/// `C +/- (h/2)*n_hat`, `n_hat = q * (0,1,0)`.
#[derive(Clone, Copy, Debug)]
pub struct CollisionDetector {
    /// Penetrations shallower than this are reported as non-colliding, to
    /// suppress jitter at rest.
    pub penetration_tolerance: f64,
}

impl Default for CollisionDetector {
    fn default() -> Self {
        CollisionDetector { penetration_tolerance: 1e-4 }
    }
}

impl CollisionDetector {
    /// Radius is deliberately unused here; the rim-contact case for tilted
    /// discs is approximated by the face-center test (see DESIGN.md).
    pub fn detect(&self, body: &RigidBody) -> CollisionResult {
        let n_hat = body.state.orientation.rotate_vector(Vec3::UP);
        let half_h = 0.5 * body.thickness;
        let face_a = body.state.position + n_hat.scale(half_h);
        let face_b = body.state.position - n_hat.scale(half_h);
        let lower_face = if face_a.y < face_b.y { face_a } else { face_b };

        let penetration = 0.0 - lower_face.y;
        if penetration <= self.penetration_tolerance {
            return CollisionResult::none();
        }

        CollisionResult {
            colliding: true,
            normal: Some(Vec3::UP),
            penetration_depth: Some(penetration),
            contact_point: Some(Vec3::new(lower_face.x, 0.0, lower_face.z)),
        }
    }
}

/// Impulse-based collision responder: restitution along the normal, clamped
/// Coulomb friction tangentially, and positional projection out of
/// penetration.
#[derive(Clone, Copy, Debug)]
pub struct CollisionResponder {
    pub restitution: f64,
    pub friction: f64,
}

impl Default for CollisionResponder {
    fn default() -> Self {
        CollisionResponder { restitution: 0.5, friction: 0.3 }
    }
}

impl CollisionResponder {
    pub fn respond(&self, body: &mut RigidBody, collision: &CollisionResult) {
        let (Some(normal), Some(penetration), Some(contact_point)) =
            (collision.normal, collision.penetration_depth, collision.contact_point)
        else {
            return;
        };
        if !collision.colliding {
            return;
        }

        let r = contact_point - body.state.position;
        let v_point = body.state.linear_velocity + body.state.angular_velocity.cross(r);
        let v_n_scalar = v_point.dot(normal);
        let v_n = normal.scale(v_n_scalar);
        let v_t = v_point - v_n;

        let inverse_inertia_world = body.inverse_inertia_world();
        let angular_term = {
            let r_cross_n = r.cross(normal);
            r_cross_n.dot(inverse_inertia_world.mul_vec3(r_cross_n))
        };
        let inverse_mass = 1.0 / body.mass;

        let mut impulse = Vec3::ZERO;

        if v_n_scalar < 0.0 {
            // Kills infinite bouncing from near-zero-velocity micro-collisions.
            let effective_restitution = if v_n_scalar > -0.1 { 0.0 } else { self.restitution };
            let denom = inverse_mass + angular_term;
            if denom > 1e-12 {
                let j_n = -(1.0 + effective_restitution) * v_n_scalar / denom;
                impulse += normal.scale(j_n);
            }
        }

        let v_t_sq = v_t.magnitude_squared();
        if v_t_sq > 1e-12 {
            let t_hat = v_t.normalize();
            let j_n_magnitude = impulse.magnitude();
            let friction_magnitude = self.friction * j_n_magnitude;
            // Never exceed the impulse that would reverse tangential motion.
            // This is the tangential analogue of `angular_term` above, taken
            // about t_hat rather than the normal — the two differ by orders
            // of magnitude for a flat contact (r x n ~ 0, r x t_hat != 0) and
            // must not be conflated.
            let r_cross_t = r.cross(t_hat);
            let tangential_term = r_cross_t.dot(inverse_inertia_world.mul_vec3(r_cross_t));
            let max_magnitude = v_t_sq.sqrt() / (inverse_mass + tangential_term).max(1e-12);
            let clamped = friction_magnitude.min(max_magnitude);
            impulse -= t_hat.scale(clamped);
        }

        body.state.linear_velocity += impulse.scale(inverse_mass);
        body.state.angular_velocity += inverse_inertia_world.mul_vec3(r.cross(impulse));

        if penetration > 0.0 {
            body.state.position += normal.scale(penetration);
        }
    }
}
