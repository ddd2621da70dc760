//! Kinematic bodies: players, goalkeepers and the ball.
//!
//! Every moving thing shares [`KinematicBody`]. Bodies are spawned once and
//! reset in place at each kickoff; only kinematics, stun and ball ownership
//! change during play. Team and role are fixed at spawn.

use serde::{Deserialize, Serialize};

use super::field::FieldGeometry;
use super::physics_constants::motion::MOVING_SPEED;
use super::types::Vec2;

/// Field players per team
pub const TEAM_SIZE: usize = 5;

// ============================================================================
// Team / Role
// ============================================================================

/// Team A defends the left goal and attacks right; B the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::A, Team::B];

    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Team::A => 0,
            Team::B => 1,
        }
    }

    #[inline]
    pub const fn opponent(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }

    /// +1 when attacking toward increasing x.
    #[inline]
    pub const fn attack_sign(self) -> f32 {
        match self {
            Team::A => 1.0,
            Team::B => -1.0,
        }
    }

    #[inline]
    pub fn attack_dir(self) -> Vec2 {
        Vec2::new(self.attack_sign(), 0.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Striker,
    Winger,
    Midfielder,
}

// ============================================================================
// KinematicBody
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

impl KinematicBody {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self { position, velocity: Vec2::ZERO, radius }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Distance between centres minus both radii (negative when overlapping).
    #[inline]
    pub fn gap(&self, other: &KinematicBody) -> f32 {
        self.position.distance(other.position) - self.radius - other.radius
    }
}

// ============================================================================
// Player / Goalkeeper
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub body: KinematicBody,
    pub team: Team,
    pub role: Role,
    /// Formation anchor used at kickoff and for off-ball drift
    pub home: Vec2,
    /// Unit heading; used when the player is not moving
    pub facing: Vec2,
    /// Seconds of remaining stun (>0 blocks voluntary action and pickup)
    pub stun: f32,
    pub run_target: Vec2,
}

impl Player {
    pub fn new(team: Team, role: Role, home: Vec2, radius: f32) -> Self {
        Self {
            body: KinematicBody::new(home, radius),
            team,
            role,
            home,
            facing: team.attack_dir(),
            stun: 0.0,
            run_target: home,
        }
    }

    #[inline]
    pub fn is_stunned(&self) -> bool {
        self.stun > 0.0
    }

    /// Direction the player carries the ball in: velocity when moving,
    /// facing otherwise.
    pub fn heading(&self) -> Vec2 {
        if self.body.speed() > MOVING_SPEED {
            self.body.velocity.normalized_or(self.facing)
        } else {
            self.facing
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goalkeeper {
    pub body: KinematicBody,
    pub team: Team,
    pub home: Vec2,
}

impl Goalkeeper {
    pub fn new(team: Team, home: Vec2, radius: f32) -> Self {
        Self { body: KinematicBody::new(home, radius), team, home }
    }
}

/// Formation slots relative to the team's kickoff centre:
/// (offset toward halfway, vertical offset, role).
const LAYOUT: [(f32, f32, Role); TEAM_SIZE] = [
    (0.0, 0.0, Role::Striker),
    (90.0, -130.0, Role::Winger),
    (90.0, 130.0, Role::Winger),
    (190.0, -40.0, Role::Midfielder),
    (190.0, 40.0, Role::Midfielder),
];

/// Distance of the striker's anchor from the halfway line
const KICKOFF_CENTRE_OFFSET: f32 = 280.0;

/// Spawn a team in its formation. Slot 0 is always the striker.
pub fn spawn_team(team: Team, field: &FieldGeometry, radius: f32) -> Vec<Player> {
    let mid = field.center();
    let s = team.attack_sign();
    let cx = mid.x - s * KICKOFF_CENTRE_OFFSET;
    LAYOUT
        .iter()
        .map(|&(depth, dy, role)| {
            let home = Vec2::new(cx + s * depth, mid.y + dy);
            Player::new(team, role, home, radius)
        })
        .collect()
}

/// Keeper anchor: just inside the goal line, vertically centred.
pub fn keeper_home(team: Team, field: &FieldGeometry, radius: f32) -> Vec2 {
    let mid = field.center();
    match team {
        Team::A => Vec2::new(field.left + radius, mid.y),
        Team::B => Vec2::new(field.right - radius, mid.y),
    }
}

// ============================================================================
// Ball
// ============================================================================

/// Identifies one body that can hold the ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BodyRef {
    Field { team: Team, index: usize },
    Keeper { team: Team },
}

impl BodyRef {
    #[inline]
    pub fn team(self) -> Team {
        match self {
            BodyRef::Field { team, .. } | BodyRef::Keeper { team } => team,
        }
    }
}

/// Exclusive ball ownership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum BallOwner {
    #[default]
    Free,
    CarriedBy { team: Team, index: usize },
    CarriedByGoalkeeper { team: Team },
}

impl BallOwner {
    #[inline]
    pub fn is_free(self) -> bool {
        matches!(self, BallOwner::Free)
    }

    pub fn team(self) -> Option<Team> {
        match self {
            BallOwner::Free => None,
            BallOwner::CarriedBy { team, .. } | BallOwner::CarriedByGoalkeeper { team } => {
                Some(team)
            }
        }
    }

    /// Field-player index of the holder when `team` holds it with a field player.
    pub fn field_index_for(self, team: Team) -> Option<usize> {
        match self {
            BallOwner::CarriedBy { team: t, index } if t == team => Some(index),
            _ => None,
        }
    }
}

impl From<BodyRef> for BallOwner {
    fn from(body: BodyRef) -> Self {
        match body {
            BodyRef::Field { team, index } => BallOwner::CarriedBy { team, index },
            BodyRef::Keeper { team } => BallOwner::CarriedByGoalkeeper { team },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub body: KinematicBody,
    pub owner: BallOwner,
    /// Seconds of remaining after-touch steering
    pub after_touch: f32,
    pub last_touch: Team,
    /// Body that last kicked the ball; cannot re-take it during after-touch
    pub kicker: Option<BodyRef>,
    /// Team credited with possession (changes only via pickup or tackle)
    pub possession: Option<Team>,
}

impl Ball {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            body: KinematicBody::new(position, radius),
            owner: BallOwner::Free,
            after_touch: 0.0,
            last_touch: Team::A,
            kicker: None,
            possession: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_opponent_and_sign() {
        assert_eq!(Team::A.opponent(), Team::B);
        assert_eq!(Team::B.opponent(), Team::A);
        assert_eq!(Team::A.attack_sign(), 1.0);
        assert_eq!(Team::B.attack_sign(), -1.0);
        assert_eq!(Team::B.index(), 1);
    }

    #[test]
    fn test_spawn_team_layout() {
        let field = FieldGeometry::default();
        let a = spawn_team(Team::A, &field, 13.0);
        let b = spawn_team(Team::B, &field, 13.0);
        assert_eq!(a.len(), TEAM_SIZE);
        assert_eq!(a[0].role, Role::Striker);
        assert_eq!(a[1].role, Role::Winger);
        assert_eq!(a[4].role, Role::Midfielder);

        let mid = field.center();
        // Whole team in its own half; the striker anchors deepest.
        for p in &a {
            assert!(p.home.x < mid.x);
            assert!(p.home.x >= a[0].home.x);
        }
        for p in &b {
            assert!(p.home.x > mid.x);
        }
        // Mirror symmetry.
        for (pa, pb) in a.iter().zip(b.iter()) {
            assert!((pa.home.x - mid.x + (pb.home.x - mid.x)).abs() < 1e-3);
            assert!((pa.home.y - pb.home.y).abs() < 1e-3);
        }
    }

    #[test]
    fn test_ball_owner_helpers() {
        let owner = BallOwner::CarriedBy { team: Team::B, index: 3 };
        assert_eq!(owner.team(), Some(Team::B));
        assert_eq!(owner.field_index_for(Team::B), Some(3));
        assert_eq!(owner.field_index_for(Team::A), None);
        assert!(!owner.is_free());

        let keeper = BallOwner::from(BodyRef::Keeper { team: Team::A });
        assert_eq!(keeper, BallOwner::CarriedByGoalkeeper { team: Team::A });
        assert_eq!(keeper.field_index_for(Team::A), None);
        assert_eq!(BallOwner::Free.team(), None);
    }

    #[test]
    fn test_heading_prefers_velocity() {
        let mut p = Player::new(Team::A, Role::Striker, Vec2::ZERO, 13.0);
        assert_eq!(p.heading(), Vec2::RIGHT);
        // A drift below the moving threshold keeps the facing.
        p.body.velocity = Vec2::new(0.0, MOVING_SPEED * 0.5);
        assert_eq!(p.heading(), Vec2::RIGHT);
        p.body.velocity = Vec2::new(0.0, 50.0);
        let h = p.heading();
        assert!((h.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_ball_owner_serde_tag() {
        let json = serde_json::to_string(&BallOwner::CarriedBy { team: Team::A, index: 2 }).unwrap();
        assert_eq!(json, r#"{"state":"carried_by","team":"A","index":2}"#);
    }
}
