use glam::Vec2;

pub trait Vec2Ext
where
    Self: Sized,
{
    /// Returns whether this uv-coordinate lays inside the `<0.0, 1.0>` square.
    fn is_inside_unit(self) -> bool;

    /// Returns distance from this uv-coordinate to the nearest border of the
    /// `<0.0, 1.0>` square; zero at (or past) the border, `0.5` at the center.
    fn border_distance(self) -> f32;
}

impl Vec2Ext for Vec2 {
    fn is_inside_unit(self) -> bool {
        self.x >= 0.0 && self.y >= 0.0 && self.x <= 1.0 && self.y <= 1.0
    }

    fn border_distance(self) -> f32 {
        let near = self.min_element();
        let far = 1.0 - self.max_element();

        near.min(far).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::vec2;

    use super::*;

    #[test]
    fn border_distance() {
        assert_relative_eq!(0.5, vec2(0.5, 0.5).border_distance());
        assert_relative_eq!(0.1, vec2(0.1, 0.5).border_distance());
        assert_relative_eq!(0.2, vec2(0.5, 0.8).border_distance());
        assert_relative_eq!(0.0, vec2(-0.3, 0.5).border_distance());
    }

    #[test]
    fn is_inside_unit() {
        assert!(vec2(0.0, 1.0).is_inside_unit());
        assert!(vec2(0.25, 0.75).is_inside_unit());
        assert!(!vec2(-0.01, 0.5).is_inside_unit());
        assert!(!vec2(0.5, 1.01).is_inside_unit());
        assert!(!vec2(f32::NAN, 0.5).is_inside_unit());
    }
}
