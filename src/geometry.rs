use serde::{Deserialize, Serialize};

/// Denominators below this are treated as zero.
pub const EPSILON: f32 = 1e-6;

/// A point (or vector) in normalized image space. Image Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    pub fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }

    #[inline(always)]
    pub fn dot(self, other: Point) -> f32 {
        self.x * other.x + self.y * other.y
    }

    #[inline(always)]
    pub fn magnitude(self) -> f32 {
        self.dot(self).sqrt()
    }
}

#[inline(always)]
pub fn distance(a: Point, b: Point) -> f32 {
    a.sub(b).magnitude()
}

#[inline(always)]
pub fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

/// Angle at vertex `b` between the rays `b->a` and `b->c`, in degrees.
///
/// The cosine is clamped to [-1, 1] before `acos` so floating point drift
/// cannot leave the domain. A zero-length ray (or any non-finite input)
/// yields 0.0, so the result is always within [0, 180].
pub fn angle_between(a: Point, b: Point, c: Point) -> f32 {
    let ba = a.sub(b);
    let bc = c.sub(b);
    let denom = ba.magnitude() * bc.magnitude();
    if !denom.is_finite() || denom < EPSILON {
        return 0.0;
    }

    let cos = (ba.dot(bc) / denom).clamp(-1.0, 1.0);
    let deg = cos.acos().to_degrees();
    if deg.is_finite() {
        deg.clamp(0.0, 180.0)
    } else {
        0.0
    }
}

/// `num / den`, or 0.0 when the denominator vanishes or the quotient is not finite.
#[inline(always)]
pub fn safe_ratio(num: f32, den: f32) -> f32 {
    if den.abs() < EPSILON {
        return 0.0;
    }
    let r = num / den;
    if r.is_finite() {
        r
    } else {
        0.0
    }
}

/// Relative difference of two lengths: `|a - b| / max(a, b)`.
pub fn relative_asymmetry(a: f32, b: f32) -> f32 {
    safe_ratio((a - b).abs(), a.max(b))
}

/// Inclination of the segment `from -> to` measured against the horizontal
/// axis, in degrees within [-90, 90]. Facing left or right gives the same
/// magnitude.
pub fn angle_from_horizontal(from: Point, to: Point) -> f32 {
    let v = to.sub(from);
    if v.magnitude() < EPSILON {
        return 0.0;
    }

    let raw = v.y.atan2(v.x).to_degrees();
    let folded = if raw > 90.0 {
        180.0 - raw
    } else if raw < -90.0 {
        -180.0 - raw
    } else {
        raw
    };

    if folded.is_finite() {
        folded
    } else {
        0.0
    }
}
