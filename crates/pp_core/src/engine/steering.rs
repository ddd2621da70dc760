//! Steering helpers
//!
//! These return acceleration-like vectors that the AI blends and scales into
//! velocity changes. Nothing here moves a body directly.

use super::body::Player;
use super::field::FieldGeometry;
use super::types::{Vec2, EPSILON};

/// Seek: unit direction toward `target` scaled by `speed`.
pub fn seek(current: Vec2, target: Vec2, speed: f32) -> Vec2 {
    if speed <= 0.0 {
        return Vec2::ZERO;
    }
    (target - current).normalized_or(Vec2::ZERO) * speed
}

/// Linear repulsion from every edge closer than `avoid_dist`, plus a radial
/// push away from nearby corners scaled by `corner_repel / 1200`.
///
/// Each edge contributes at most 1.0; the caller picks the weight.
pub fn wall_avoidance(field: &FieldGeometry, p: Vec2, avoid_dist: f32, corner_repel: f32) -> Vec2 {
    if avoid_dist <= 0.0 {
        return Vec2::ZERO;
    }
    let mut push = Vec2::ZERO;

    let left = p.x - field.left;
    let right = field.right - p.x;
    let top = p.y - field.top;
    let bottom = field.bottom - p.y;
    if left < avoid_dist {
        push.x += 1.0 - left / avoid_dist;
    }
    if right < avoid_dist {
        push.x -= 1.0 - right / avoid_dist;
    }
    if top < avoid_dist {
        push.y += 1.0 - top / avoid_dist;
    }
    if bottom < avoid_dist {
        push.y -= 1.0 - bottom / avoid_dist;
    }

    let corner_scale = corner_repel / 1200.0;
    for corner in field.corners() {
        let away = p - corner;
        let d = away.length();
        if d < avoid_dist {
            let n = away.normalized_or(Vec2::ZERO);
            push += n * ((1.0 - d / avoid_dist) * corner_scale);
        }
    }
    push
}

/// Symmetric soft push between every pair of teammates closer than `radius`.
///
/// Velocity-only; the collision pass handles actual overlap.
pub fn apply_team_separation(players: &mut [Player], radius: f32, strength: f32, dt: f32) {
    if radius <= 0.0 || strength <= 0.0 {
        return;
    }
    for i in 0..players.len() {
        for j in (i + 1)..players.len() {
            let delta = players[i].body.position - players[j].body.position;
            let d = delta.length();
            if d < EPSILON || d >= radius {
                continue;
            }
            let n = delta * (1.0 / d);
            let impulse = n * (strength * (radius - d) / radius * dt);
            players[i].body.velocity += impulse;
            players[j].body.velocity -= impulse;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::body::{Role, Team};

    #[test]
    fn test_seek_direction() {
        let vel = seek(Vec2::ZERO, Vec2::new(10.0, 0.0), 5.0);
        assert!((vel.x - 5.0).abs() < 1e-5);
        assert_eq!(vel.y, 0.0);
        assert_eq!(seek(Vec2::ZERO, Vec2::ZERO, 5.0), Vec2::ZERO);
    }

    #[test]
    fn test_wall_avoidance_zero_in_open_field() {
        let field = FieldGeometry::default();
        assert_eq!(wall_avoidance(&field, field.center(), 50.0, 1300.0), Vec2::ZERO);
    }

    #[test]
    fn test_wall_avoidance_points_inward() {
        let field = FieldGeometry::default();
        let near_left = Vec2::new(field.left + 10.0, field.center().y);
        let push = wall_avoidance(&field, near_left, 50.0, 1300.0);
        assert!((push.x - 0.8).abs() < 1e-5);
        assert_eq!(push.y, 0.0);

        let near_corner = Vec2::new(field.right - 5.0, field.bottom - 5.0);
        let push = wall_avoidance(&field, near_corner, 50.0, 1300.0);
        assert!(push.x < -0.9);
        assert!(push.y < -0.9);
    }

    #[test]
    fn test_team_separation_is_symmetric() {
        let mut players = vec![
            Player::new(Team::A, Role::Midfielder, Vec2::new(100.0, 100.0), 13.0),
            Player::new(Team::A, Role::Midfielder, Vec2::new(120.0, 100.0), 13.0),
        ];
        apply_team_separation(&mut players, 56.0, 950.0, 1.0 / 60.0);
        let a = players[0].body.velocity;
        let b = players[1].body.velocity;
        assert!(a.x < 0.0 && b.x > 0.0);
        assert!((a.x + b.x).abs() < 1e-5);
    }
}
