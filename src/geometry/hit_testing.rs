use egui::{Pos2, Vec2};

/// Distance from `point` to the segment `start..end`.
///
/// A zero-length segment degrades to the distance to `start`.
pub fn distance_to_segment(point: Pos2, start: Pos2, end: Pos2) -> f32 {
    let line_vec = end - start;
    let point_vec = point - start;

    let len_sq = line_vec.length_sq();
    if len_sq == 0.0 {
        return point_vec.length();
    }

    let t = (point_vec.dot(line_vec) / len_sq).clamp(0.0, 1.0);
    let projection = start + line_vec * t;
    (point - projection).length()
}

/// Distance from `point` to the nearest segment of an open polyline.
pub fn distance_to_polyline(point: Pos2, points: &[Pos2]) -> f32 {
    match points {
        [] => f32::INFINITY,
        [only] => point.distance(*only),
        _ => points
            .windows(2)
            .map(|pair| distance_to_segment(point, pair[0], pair[1]))
            .fold(f32::INFINITY, f32::min),
    }
}

/// The three corners of an arrow head whose tip sits at `tip`, pointing away
/// from `from`. `None` when the two points coincide and no direction exists.
pub fn arrow_head(from: Pos2, tip: Pos2, length: f32) -> Option<[Pos2; 3]> {
    let dir = tip - from;
    if dir.length_sq() == 0.0 {
        return None;
    }

    let back = -dir.normalized() * length;
    let (sin, cos) = ARROW_HEAD_HALF_ANGLE.sin_cos();
    let left = rotate(back, cos, sin);
    let right = rotate(back, cos, -sin);
    Some([tip, tip + left, tip + right])
}

const ARROW_HEAD_HALF_ANGLE: f32 = std::f32::consts::PI / 6.0;

fn rotate(v: Vec2, cos: f32, sin: f32) -> Vec2 {
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn segment_distance_projects_inside() {
        let d = distance_to_segment(pos2(5.0, 3.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-5);
    }

    #[test]
    fn segment_distance_clamps_to_endpoints() {
        let d = distance_to_segment(pos2(13.0, 4.0), pos2(0.0, 0.0), pos2(10.0, 0.0));
        assert!((d - 5.0).abs() < 1e-5);
    }

    #[test]
    fn zero_length_segment_is_point_distance() {
        let d = distance_to_segment(pos2(3.0, 4.0), pos2(0.0, 0.0), pos2(0.0, 0.0));
        assert!((d - 5.0).abs() < 1e-5);
    }

    #[test]
    fn arrow_head_needs_direction() {
        assert!(arrow_head(pos2(1.0, 1.0), pos2(1.0, 1.0), 10.0).is_none());

        let head = arrow_head(pos2(0.0, 0.0), pos2(10.0, 0.0), 5.0).unwrap();
        assert_eq!(head[0], pos2(10.0, 0.0));
        assert!(head[1].x < 10.0 && head[2].x < 10.0);
        assert!((head[1].y + head[2].y).abs() < 1e-5);
    }
}
