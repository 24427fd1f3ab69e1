use bevy_ecs::prelude::Component;
use bevy_math::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Component)]
pub struct BoxCollider {
    pub size: Vec2,
    pub offset: Vec2,
}

impl BoxCollider {
    /// Create a BoxCollider with given size, anchored at its min corner.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            offset: Vec2::ZERO,
        }
    }

    /// Create a BoxCollider centered on the entity position.
    pub fn centered(width: f32, height: f32) -> Self {
        Self::new(width, height).with_offset(Vec2::new(-width * 0.5, -height * 0.5))
    }

    /// Modify BoxCollider with given offset
    pub fn with_offset(mut self, offset: Vec2) -> Self {
        self.offset = offset;
        self
    }

    /// Returns (min, max) of the collider AABB for a given entity position.
    /// Handles negative size by normalizing to proper min/max.
    pub fn aabb(&self, position: Vec2) -> (Vec2, Vec2) {
        let p0 = position + self.offset;
        let p1 = p0 + self.size;
        (p0.min(p1), p0.max(p1))
    }

    pub fn center(&self, position: Vec2) -> Vec2 {
        let (min, max) = self.aabb(position);
        (min + max) * 0.5
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size.abs() * 0.5
    }

    /// AABB vs AABB overlap test against another BoxCollider at a different entity position.
    pub fn overlaps(&self, position: Vec2, other: &Self, other_position: Vec2) -> bool {
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);
        min_a.x < max_b.x && max_a.x > min_b.x && min_a.y < max_b.y && max_a.y > min_b.y
    }

    /// Point containment in world space.
    pub fn contains_point(&self, position: Vec2, point: Vec2) -> bool {
        let (min, max) = self.aabb(position);
        point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
    }

    /// Minimum translation that moves `self` out of `other`.
    ///
    /// Returns `None` when the boxes do not overlap. The push is along the
    /// axis of least penetration.
    pub fn penetration(&self, position: Vec2, other: &Self, other_position: Vec2) -> Option<Vec2> {
        if !self.overlaps(position, other, other_position) {
            return None;
        }
        let (min_a, max_a) = self.aabb(position);
        let (min_b, max_b) = other.aabb(other_position);

        let push_left = max_a.x - min_b.x;
        let push_right = max_b.x - min_a.x;
        let push_down = max_a.y - min_b.y;
        let push_up = max_b.y - min_a.y;

        let x = if push_left < push_right { -push_left } else { push_right };
        let y = if push_down < push_up { -push_down } else { push_up };

        if x.abs() < y.abs() {
            Some(Vec2::new(x, 0.0))
        } else {
            Some(Vec2::new(0.0, y))
        }
    }

    /// Slab ray cast against the collider AABB.
    ///
    /// `direction` must be non-zero. Returns the distance along the normalized
    /// direction to the first hit within `max_distance`, or `None`. A ray
    /// starting inside the box hits at distance zero.
    pub fn raycast(
        &self,
        position: Vec2,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
    ) -> Option<f32> {
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO {
            return None;
        }
        let (min, max) = self.aabb(position);

        let mut t_enter = 0.0_f32;
        let mut t_exit = max_distance;
        for axis in 0..2 {
            let (o, d, lo, hi) = (origin[axis], dir[axis], min[axis], max[axis]);
            if d.abs() < f32::EPSILON {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let t0 = (lo - o) / d;
            let t1 = (hi - o) / d;
            t_enter = t_enter.max(t0.min(t1));
            t_exit = t_exit.min(t0.max(t1));
            if t_enter > t_exit {
                return None;
            }
        }
        Some(t_enter)
    }
}
