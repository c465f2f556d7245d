use glam::Vec3;

/// One sample of a morphology reconstruction.
///
/// `t` is the sample type tag as found in the source data, `pos` the 3D
/// position and `r` the radius at that position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub t: u8,
    pub pos: Vec3,
    pub r: f32,
}

impl Point {
    pub fn new(t: u8, x: f32, y: f32, z: f32, r: f32) -> Self {
        Self {
            t,
            pos: Vec3::new(x, y, z),
            r,
        }
    }

    /// `[x, y, z, r]`, the layout used by flattened point arrays.
    pub fn xyzr(&self) -> [f32; 4] {
        [self.pos.x, self.pos.y, self.pos.z, self.r]
    }
}

/// Sum of the distances between consecutive points.
pub fn path_length<'a, I>(points: I) -> f32
where
    I: IntoIterator<Item = &'a Point>,
{
    let mut iter = points.into_iter();
    let Some(mut prev) = iter.next() else {
        return 0.0;
    };

    let mut total = 0.0;
    for p in iter {
        total += prev.pos.distance(p.pos);
        prev = p;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_length_sums_consecutive_distances() {
        let pts = [
            Point::new(3, 0.0, 0.0, 0.0, 1.0),
            Point::new(3, 3.0, 4.0, 0.0, 1.0),
            Point::new(3, 3.0, 4.0, 2.0, 1.0),
        ];
        assert!((path_length(&pts) - 7.0).abs() < 1e-6);
    }

    #[test]
    fn path_length_of_short_inputs_is_zero() {
        assert_eq!(path_length(&Vec::<Point>::new()), 0.0);
        assert_eq!(path_length(&[Point::new(1, 5.0, 5.0, 5.0, 1.0)]), 0.0);
    }
}
