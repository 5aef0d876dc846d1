use glam::Vec3;
use smallvec::SmallVec;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Always unit length.
    pub direction: Vec3,
}

/// One ray intersection; `distance` is measured along the ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit<T> {
    pub target: T,
    pub distance: f32,
    pub point: Vec3,
}

pub type Hits<T> = SmallVec<[Hit<T>; 4]>;

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance to the first non-negative intersection with a sphere. From
    /// inside the sphere this is the exit point.
    #[inline]
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let oc = self.origin - center;
        let b = oc.dot(self.direction);
        let c = oc.dot(oc) - radius * radius;
        let disc = b * b - c;
        if disc < 0.0 {
            return None;
        }
        let root = disc.sqrt();
        let near = -b - root;
        let far = -b + root;
        if near >= 0.0 {
            Some(near)
        } else {
            (far >= 0.0).then_some(far)
        }
    }

    /// Point primitives within `threshold` of the ray, nearest first.
    ///
    /// Equal distances keep the input order.
    pub fn intersect_points<T, I>(&self, points: I, threshold: f32) -> Hits<T>
    where
        T: Copy,
        I: IntoIterator<Item = (T, Vec3)>,
    {
        let threshold_sq = threshold * threshold;
        let mut hits: Hits<T> = points
            .into_iter()
            .filter_map(|(target, p)| {
                let t = (p - self.origin).dot(self.direction);
                if t < 0.0 {
                    return None;
                }
                let closest = self.at(t);
                (closest.distance_squared(p) <= threshold_sq).then_some(Hit {
                    target,
                    distance: t,
                    point: closest,
                })
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}
