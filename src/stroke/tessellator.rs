use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::{DVec2, Vec2};

use super::vertices::CommittedVertices;
use crate::resources::{HALF_TEXTURE_SIZE, TEXTURE_SIZE};

/// Radius of the rounded corner fan at a joint.
pub const CORNER_RADIUS: f64 = 8.0;

/// First and last points closer than this on both axes close the path.
pub const CLOSED_PATH_EPSILON: f32 = 0.1;

/// Slack allowed when folding joint angles into `[0, PI]`.
const FOLD_EPSILON: f64 = f32::EPSILON as f64;

const SIZE: f64 = TEXTURE_SIZE as f64;
const HALF: f64 = HALF_TEXTURE_SIZE as f64;

/// Extra texture-space offset pulling the fan center toward the line core.
const FAN_CORE_ADJUST: f64 = 1.5;

/// Stroke settings captured when geometry is emitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    /// Half-width of the stroke.
    pub thickness: f32,
    pub color: [f32; 4],
}

/// Direction of `from -> to`, in `[0, 2*PI)`.
pub fn direction_angle(from: DVec2, to: DVec2) -> f64 {
    let d = to - from;
    let angle = d.y.atan2(d.x);
    if angle < 0.0 {
        angle + TAU
    } else {
        angle
    }
}

/// Fold an angle difference into `[0, PI]` by whole steps of `PI`.
///
/// The modulus is `PI`, not `2 * PI`, so direction is lost: a turn of `-x`
/// folds to `PI - x`, and a full turn lands on the reversal bound `PI`.
pub fn fold_joint_angle(mut delta: f64) -> f64 {
    while delta > PI + FOLD_EPSILON {
        delta -= PI;
    }
    while delta < -FOLD_EPSILON {
        delta += PI;
    }
    delta
}

/// How far a segment is pulled back from a joint to make room for the fan.
pub fn joint_shortening(delta: f64) -> f64 {
    let half = fold_joint_angle(delta) / 2.0;
    CORNER_RADIUS * half.sin() / half.cos()
}

/// Intermediate fan angles at 1/4, 2/4 and 3/4 of the sweep from `from` to
/// `to`, each flipped by `PI` when the naive midpoint lands on the far side.
pub fn fan_angles(from: f64, to: f64) -> [f64; 3] {
    let mut a1 = (to + from) / 2.0;
    if (a1 - to).abs() > FRAC_PI_2 {
        a1 += PI;
    }
    let mut a0 = (a1 + from) / 2.0;
    if (a0 - a1).abs() > FRAC_PI_2 {
        a0 += PI;
    }
    let mut a2 = (a1 + to) / 2.0;
    if (a2 - a1).abs() > FRAC_PI_2 {
        a2 += PI;
    }
    [a0, a1, a2]
}

/// Whether the path's last point coincides with its first.
pub fn is_closed_path(points: &[Vec2]) -> bool {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => {
            (first.x - last.x).abs() < CLOSED_PATH_EPSILON
                && (first.y - last.y).abs() < CLOSED_PATH_EPSILON
        }
        _ => false,
    }
}

/// Left/right offset corners of one segment.
#[derive(Debug, Clone, Copy)]
struct SegmentQuad {
    dir: DVec2,
    p0: DVec2,
    p1: DVec2,
    l0: DVec2,
    r0: DVec2,
    l1: DVec2,
    r1: DVec2,
}

impl SegmentQuad {
    fn new(p0: DVec2, p1: DVec2, angle: f64, t: f64) -> Self {
        let (sin_a, cos_a) = angle.sin_cos();
        let left = DVec2::new(sin_a, -cos_a) * t;
        Self {
            dir: DVec2::new(cos_a, sin_a),
            p0,
            p1,
            l0: p0 + left,
            r0: p0 - left,
            l1: p1 + left,
            r1: p1 - left,
        }
    }

    fn shorten_start(&mut self, amount: f64) {
        let d = self.dir * amount;
        self.l0 += d;
        self.r0 += d;
        self.p0 += d;
    }

    fn shorten_end(&mut self, amount: f64) {
        let d = self.dir * amount;
        self.l1 -= d;
        self.r1 -= d;
        self.p1 -= d;
    }
}

/// Emits glow-textured triangles for strokes into a [`CommittedVertices`].
///
/// Every vertex takes its color from the style held here, so the style in
/// effect at emission time is baked into the geometry.
pub struct StrokeTessellator<'a> {
    style: StrokeStyle,
    out: &'a mut CommittedVertices,
}

impl<'a> StrokeTessellator<'a> {
    pub fn new(style: StrokeStyle, out: &'a mut CommittedVertices) -> Self {
        Self { style, out }
    }

    #[inline]
    fn point(&mut self, p: DVec2, u: f64, v: f64) {
        self.out.push_tex_point(p.x, p.y, u, v, self.style.color);
    }

    /// Tessellate a polyline of at least two points.
    ///
    /// Interior joints (and the wrap-around joint of a closed path) get a
    /// four-triangle corner fan; open ends get square caps.
    pub fn path(&mut self, points: &[Vec2]) {
        let n = points.len();
        if n < 2 {
            return;
        }

        let closed = is_closed_path(points);
        let t = self.style.thickness as f64;
        let p = |i: usize| points[i].as_dvec2();

        for i in 1..n {
            let has_prev_connect = i != 1 || closed;
            let has_next_connect = i != n - 1 || closed;

            let prev_start = if i == 1 { n - 2 } else { i - 2 };
            let pa = direction_angle(p(prev_start), p(i - 1));

            let a = direction_angle(p(i - 1), p(i));

            let next_end = if i + 1 != n { i + 1 } else { 1 };
            let na = direction_angle(p(i), p(next_end));

            let mut quad = SegmentQuad::new(p(i - 1), p(i), a, t);

            if has_prev_connect {
                quad.shorten_start(joint_shortening(a - pa));
                self.corner_fan(&quad, pa, a, t);
            }

            if has_next_connect {
                quad.shorten_end(joint_shortening(na - a));
            }

            self.body(&quad);

            if !has_next_connect {
                self.cap(quad.l1, quad.r1, quad.dir * t);
            }

            if !has_prev_connect {
                self.cap(quad.l0, quad.r0, -quad.dir * t);
            }
        }
    }

    /// Tessellate an isolated segment with square caps at both ends.
    pub fn segment(&mut self, from: Vec2, to: Vec2) {
        let t = self.style.thickness as f64;
        let (p0, p1) = (from.as_dvec2(), to.as_dvec2());
        let a = direction_angle(p0, p1);
        let quad = SegmentQuad::new(p0, p1, a, t);

        // left half
        self.point(quad.p1, HALF, HALF);
        self.point(quad.p0, HALF, HALF);
        self.point(quad.l1, 0.0, HALF);

        self.point(quad.l0, 0.0, HALF);
        self.point(quad.p0, HALF, HALF);
        self.point(quad.l1, 0.0, HALF);

        // right half
        self.point(quad.p0, HALF, HALF);
        self.point(quad.p1, HALF, HALF);
        self.point(quad.r1, SIZE, HALF);

        self.point(quad.p0, HALF, HALF);
        self.point(quad.r1, SIZE, HALF);
        self.point(quad.r0, SIZE, HALF);

        self.cap(quad.l0, quad.r0, -quad.dir * t);
        self.cap(quad.l1, quad.r1, quad.dir * t);
    }

    /// Rounded wedge at the start of `quad`, sweeping from `pa` to `a`.
    fn corner_fan(&mut self, quad: &SegmentQuad, pa: f64, a: f64, t: f64) {
        let (sin_a, cos_a) = a.sin_cos();
        let center = quad.p0 + DVec2::new(-sin_a, cos_a) * CORNER_RADIUS;
        let radius = t + CORNER_RADIUS;
        let center_v = HALF - ((CORNER_RADIUS + FAN_CORE_ADJUST) / t * HALF);

        let [a0, a1, a2] = fan_angles(pa, a);
        let sweep = [pa, a0, a1, a2, a];
        let rim = |angle: f64| {
            let (s, c) = angle.sin_cos();
            center + DVec2::new(s, -c) * radius
        };

        for pair in sweep.windows(2) {
            self.point(center, HALF, center_v);
            self.point(rim(pair[0]), HALF, SIZE);
            self.point(rim(pair[1]), HALF, SIZE);
        }
    }

    /// Segment body: glow falls off across the width, not along the length.
    fn body(&mut self, quad: &SegmentQuad) {
        self.point(quad.r1, HALF, SIZE);
        self.point(quad.r0, HALF, SIZE);
        self.point(quad.l1, HALF, 0.0);

        self.point(quad.l1, HALF, 0.0);
        self.point(quad.r0, HALF, SIZE);
        self.point(quad.l0, HALF, 0.0);
    }

    /// Square cap on the edge `left -> right`, extended by `extent`.
    fn cap(&mut self, left: DVec2, right: DVec2, extent: DVec2) {
        let left_tip = left + extent;
        let right_tip = right + extent;

        self.point(left_tip, 0.0, 0.0);
        self.point(left, 0.0, HALF);
        self.point(right, SIZE, HALF);

        self.point(left_tip, 0.0, 0.0);
        self.point(right, SIZE, HALF);
        self.point(right_tip, SIZE, 0.0);
    }
}
