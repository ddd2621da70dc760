//! Field Geometry - bounds, goal mouths and penalty boxes
//!
//! ## Goal ownership
//! - Left goal (x = `left`) is defended by Team A, attacked by Team B
//! - Right goal (x = `right`) is defended by Team B, attacked by Team A
//!
//! Goal mouths sit *outside* the playable rectangle, `goal_depth` deep and
//! vertically centred. Penalty boxes sit inside it against each goal line.
//! Everything here is pure; the geometry never changes during a match.

use serde::{Deserialize, Serialize};

use super::body::Team;
use super::physics_constants::{field as field_const, goal as goal_const};
use super::types::Vec2;

/// Axis-aligned rectangle; `contains` is strict on every edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn contains(&self, p: Vec2) -> bool {
        p.x > self.x && p.x < self.x + self.w && p.y > self.y && p.y < self.y + self.h
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w * 0.5, self.y + self.h * 0.5)
    }

    /// Same rectangle widened by `pad` on the left and right.
    pub fn padded_x(&self, pad: f32) -> Rect {
        Rect { x: self.x - pad, y: self.y, w: self.w + 2.0 * pad, h: self.h }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalSide {
    Left,
    Right,
}

impl GoalSide {
    /// Goal a team defends.
    pub const fn defended_by(team: Team) -> Self {
        match team {
            Team::A => GoalSide::Left,
            Team::B => GoalSide::Right,
        }
    }

    /// Goal a team shoots at.
    pub const fn attacked_by(team: Team) -> Self {
        match team {
            Team::A => GoalSide::Right,
            Team::B => GoalSide::Left,
        }
    }

    /// Team credited when the ball enters this goal.
    pub const fn scoring_team(self) -> Team {
        match self {
            GoalSide::Left => Team::B,
            GoalSide::Right => Team::A,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldGeometry {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub goal_height: f32,
    pub goal_depth: f32,
    /// Leading edge within this distance of a goal line counts as crossed
    pub goal_line_slack: f32,
    pub box_width: f32,
    pub box_height: f32,
}

impl Default for FieldGeometry {
    fn default() -> Self {
        Self {
            left: field_const::INSET_X,
            right: field_const::CANVAS_W - field_const::INSET_X,
            top: field_const::INSET_Y,
            bottom: field_const::CANVAS_H - field_const::INSET_Y,
            goal_height: goal_const::HEIGHT,
            goal_depth: goal_const::DEPTH,
            goal_line_slack: goal_const::LINE_SLACK,
            box_width: goal_const::BOX_W,
            box_height: goal_const::BOX_H,
        }
    }
}

impl FieldGeometry {
    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new((self.left + self.right) * 0.5, (self.top + self.bottom) * 0.5)
    }

    #[inline]
    pub fn goal_line_x(&self, side: GoalSide) -> f32 {
        match side {
            GoalSide::Left => self.left,
            GoalSide::Right => self.right,
        }
    }

    pub fn goal_mouth(&self, side: GoalSide) -> Rect {
        let y = self.center().y - self.goal_height * 0.5;
        let x = match side {
            GoalSide::Left => self.left - self.goal_depth,
            GoalSide::Right => self.right,
        };
        Rect { x, y, w: self.goal_depth, h: self.goal_height }
    }

    pub fn penalty_box(&self, side: GoalSide) -> Rect {
        let y = self.center().y - self.box_height * 0.5;
        let x = match side {
            GoalSide::Left => self.left,
            GoalSide::Right => self.right - self.box_width,
        };
        Rect { x, y, w: self.box_width, h: self.box_height }
    }

    /// Upper and lower post y coordinates.
    pub fn posts(&self, side: GoalSide) -> (f32, f32) {
        let mouth = self.goal_mouth(side);
        (mouth.y, mouth.y + mouth.h)
    }

    pub fn point_in_goal(&self, side: GoalSide, p: Vec2) -> bool {
        self.goal_mouth(side).contains(p)
    }

    pub fn point_in_penalty_box(&self, side: GoalSide, p: Vec2) -> bool {
        self.penalty_box(side).contains(p)
    }

    /// True when a ball of radius `r` centred at `center` has its leading
    /// edge at or past the goal line, between the posts.
    pub fn ball_entering_goal(&self, side: GoalSide, center: Vec2, r: f32) -> bool {
        let (upper, lower) = self.posts(side);
        let between_posts = center.y > upper && center.y < lower;
        let past_line = match side {
            GoalSide::Left => center.x - r <= self.left + self.goal_line_slack,
            GoalSide::Right => center.x + r >= self.right - self.goal_line_slack,
        };
        between_posts && past_line
    }

    /// Clamp a body centre so a circle of radius `r` stays inside the field.
    pub fn clamp_to_field(&self, p: Vec2, r: f32) -> Vec2 {
        Vec2::new(
            p.x.clamp(self.left + r, self.right - r),
            p.y.clamp(self.top + r, self.bottom - r),
        )
    }

    /// Clamp a body centre so a circle of radius `r` stays inside a penalty box.
    pub fn clamp_to_box(&self, side: GoalSide, p: Vec2, r: f32) -> Vec2 {
        let b = self.penalty_box(side);
        Vec2::new(p.x.clamp(b.x + r, b.x + b.w - r), p.y.clamp(b.y + r, b.y + b.h - r))
    }

    /// Whether a circle of radius `r` lies inside the field (with tolerance).
    pub fn contains_body(&self, p: Vec2, r: f32, tolerance: f32) -> bool {
        p.x >= self.left + r - tolerance
            && p.x <= self.right - r + tolerance
            && p.y >= self.top + r - tolerance
            && p.y <= self.bottom - r + tolerance
    }

    /// Distance from `p` to the nearest field edge.
    pub fn edge_distance(&self, p: Vec2) -> f32 {
        (p.x - self.left).min(self.right - p.x).min(p.y - self.top).min(self.bottom - p.y)
    }

    pub fn corners(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.left, self.top),
            Vec2::new(self.left, self.bottom),
            Vec2::new(self.right, self.top),
            Vec2::new(self.right, self.bottom),
        ]
    }

    /// Distance from `p` to the goal line `team` attacks, along x.
    pub fn distance_to_attacked_goal_line(&self, team: Team, p: Vec2) -> f32 {
        match GoalSide::attacked_by(team) {
            GoalSide::Left => p.x - self.left,
            GoalSide::Right => self.right - p.x,
        }
    }
}
