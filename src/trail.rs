//! Cursor trail: a chain of points that chase the pointer with easing.

pub const TRAIL_POINTS: usize = 32;
const FOLLOW_EASING: f64 = 0.3;
const POINT_RADIUS: f64 = 12.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// HSL triple as stored in the `--cursor-trail` custom property (`"217 90% 54%"`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    pub const FALLBACK: Self = Self {
        h: 217.0,
        s: 90.0,
        l: 54.0,
    };

    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw
            .split_whitespace()
            .map(|part| part.trim_end_matches('%').parse::<f64>());

        let h = parts.next()?.ok()?;
        let s = parts.next()?.ok()?;
        let l = parts.next()?.ok()?;
        Some(Self { h, s, l })
    }

    pub fn parse_or_fallback(raw: &str) -> Self {
        Self::parse(raw).unwrap_or(Self::FALLBACK)
    }

    /// Six lowercase hex digits without `#`, as embed widgets expect in query strings.
    pub fn to_hex(self) -> String {
        let s = (self.s / 100.0).clamp(0.0, 1.0);
        let l = (self.l / 100.0).clamp(0.0, 1.0);
        let h = self.h.rem_euclid(360.0);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - chroma / 2.0;
        let (r, g, b) = match (h / 60.0) as u8 {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        let channel = |value: f64| ((value + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        format!("{:02x}{:02x}{:02x}", channel(r), channel(g), channel(b))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CursorTrail {
    pointer: Point,
    positions: Vec<Point>,
    started: bool,
}

impl CursorTrail {
    pub fn new(origin: Point) -> Self {
        Self {
            pointer: origin,
            positions: vec![origin; TRAIL_POINTS],
            started: false,
        }
    }

    /// Records the pointer. Returns `true` on the first move, when the frame loop should start.
    pub fn pointer_moved(&mut self, x: f64, y: f64) -> bool {
        self.pointer = Point { x, y };
        !std::mem::replace(&mut self.started, true)
    }

    /// Advances one frame and returns where each point is drawn.
    pub fn step(&mut self) -> Vec<Point> {
        let count = self.positions.len();
        let mut drawn = Vec::with_capacity(count);
        let mut cursor = self.pointer;

        for index in 0..count {
            drawn.push(cursor);
            self.positions[index] = cursor;

            let next = self
                .positions
                .get(index + 1)
                .copied()
                .unwrap_or(self.positions[0]);
            cursor.x += (next.x - cursor.x) * FOLLOW_EASING;
            cursor.y += (next.y - cursor.y) * FOLLOW_EASING;
        }

        drawn
    }

    pub fn scale(index: usize, count: usize) -> f64 {
        if count == 0 {
            return 0.0;
        }
        count.saturating_sub(index) as f64 / count as f64
    }

    pub fn transform(point: Point, index: usize, count: usize) -> String {
        format!(
            "translate3d({:.1}px, {:.1}px, 0) scale({:.3})",
            point.x - POINT_RADIUS,
            point.y - POINT_RADIUS,
            Self::scale(index, count)
        )
    }

    /// Per-point colour: hue drifts along the chain, tail fades out.
    pub fn color(index: usize, count: usize, base: Hsl, dark: bool) -> String {
        let t = if count > 1 {
            index as f64 / (count - 1) as f64
        } else {
            0.0
        };
        let hue_drift = if dark { -6.0 } else { 8.0 };
        let h = base.h + hue_drift * t;
        let s = if dark {
            base.s + 8.0 * (1.0 - t)
        } else {
            base.s - 6.0 * t
        }
        .clamp(20.0, 100.0);
        let l = if dark {
            base.l + 10.0 * (1.0 - t)
        } else {
            base.l - 14.0 * t
        }
        .clamp(8.0, 95.0);
        let alpha = (0.15 + (1.0 - t) * 0.6).clamp(0.15, 0.75);

        format!("hsl({h:.1} {s:.1}% {l:.1}% / {alpha:.3})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_custom_property_triples() {
        assert_eq!(
            Hsl::parse("217 91% 48%"),
            Some(Hsl { h: 217.0, s: 91.0, l: 48.0 })
        );
        assert_eq!(Hsl::parse("  142 71%  45% "), Some(Hsl { h: 142.0, s: 71.0, l: 45.0 }));
        assert_eq!(Hsl::parse("blue"), None);
        assert_eq!(Hsl::parse_or_fallback(""), Hsl::FALLBACK);
    }

    #[test]
    fn converts_to_hex() {
        assert_eq!(Hsl { h: 0.0, s: 100.0, l: 50.0 }.to_hex(), "ff0000");
        assert_eq!(Hsl { h: 0.0, s: 0.0, l: 100.0 }.to_hex(), "ffffff");
        assert_eq!(Hsl::FALLBACK.to_hex(), "2071f3");
    }

    #[test]
    fn first_pointer_move_starts_the_loop_once() {
        let mut trail = CursorTrail::new(Point { x: 640.0, y: 360.0 });
        assert!(trail.pointer_moved(10.0, 10.0));
        assert!(!trail.pointer_moved(20.0, 20.0));
    }

    #[test]
    fn head_snaps_to_pointer_and_tail_eases_behind() {
        let mut trail = CursorTrail::new(Point::default());
        trail.pointer_moved(100.0, 0.0);

        let drawn = trail.step();
        assert_eq!(drawn.len(), TRAIL_POINTS);
        assert_eq!(drawn[0], Point { x: 100.0, y: 0.0 });
        assert!((drawn[1].x - 70.0).abs() < 1e-9);
        assert!(drawn.windows(2).all(|pair| pair[1].x <= pair[0].x));
    }

    #[test]
    fn trail_converges_on_a_still_pointer() {
        let mut trail = CursorTrail::new(Point::default());
        trail.pointer_moved(50.0, 80.0);
        let mut drawn = Vec::new();
        for _ in 0..400 {
            drawn = trail.step();
        }
        let tail = drawn[TRAIL_POINTS - 1];
        assert!((tail.x - 50.0).abs() < 0.5);
        assert!((tail.y - 80.0).abs() < 0.5);
    }

    #[test]
    fn scale_shrinks_toward_the_tail() {
        assert_eq!(CursorTrail::scale(0, 32), 1.0);
        assert_eq!(CursorTrail::scale(16, 32), 0.5);
        assert_eq!(CursorTrail::scale(0, 0), 0.0);
        assert_eq!(
            CursorTrail::transform(Point { x: 12.0, y: 20.0 }, 0, 4),
            "translate3d(0.0px, 8.0px, 0) scale(1.000)"
        );
    }

    #[test]
    fn colors_fade_along_the_chain() {
        let head = CursorTrail::color(0, 32, Hsl::FALLBACK, false);
        let tail = CursorTrail::color(31, 32, Hsl::FALLBACK, false);
        assert_eq!(head, "hsl(217.0 90.0% 54.0% / 0.750)");
        assert_eq!(tail, "hsl(225.0 84.0% 40.0% / 0.150)");

        let dark_head = CursorTrail::color(0, 32, Hsl::FALLBACK, true);
        assert_eq!(dark_head, "hsl(217.0 98.0% 64.0% / 0.750)");
    }
}
