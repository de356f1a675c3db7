use glam::Vec3;

pub trait Vec3Ext
where
    Self: Sized,
{
    /// Reflects this direction-vector around `other`.
    fn reflect(self, other: Self) -> Self;
}

impl Vec3Ext for Vec3 {
    fn reflect(self, other: Self) -> Self {
        self - 2.0 * other.dot(self) * other
    }
}

#[cfg(test)]
mod tests {
    use glam::vec3;

    use super::*;

    #[test]
    fn reflect() {
        let dir = vec3(1.0, -1.0, 0.0).reflect(Vec3::Y);

        assert_eq!(vec3(1.0, 1.0, 0.0), dir);
    }
}
