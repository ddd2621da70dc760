//! Off-ball run planning
//!
//! Each role has one entry in a run table: how far ahead of the carrier it
//! leads and how far it spreads to its own side. Without a teammate on the
//! ball, players drift around their home anchors toward the ball.

use crate::engine::body::{Player, Role, Team};
use crate::engine::config::AiConfig;
use crate::engine::field::FieldGeometry;
use crate::engine::match_state::MatchState;
use crate::engine::physics_constants::ai;
use crate::engine::types::Vec2;

/// Run shape relative to the carrier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleRun {
    /// Distance ahead of the carrier toward the attacked goal
    pub lead: f32,
    /// Vertical offset toward the player's own side of the pitch
    pub lateral: f32,
    /// Hug the touchline when the carrier reaches the attacking third
    pub holds_width: bool,
}

impl RoleRun {
    pub fn for_role(role: Role) -> Self {
        let ((lead, lateral), holds_width) = match role {
            Role::Striker => (ai::STRIKER_RUN, false),
            Role::Winger => (ai::WINGER_RUN, true),
            Role::Midfielder => (ai::MIDFIELDER_RUN, false),
        };
        Self { lead, lateral, holds_width }
    }
}

/// Run target for one player.
///
/// `carrier` is the position of a teammate holding the ball, if any.
pub fn run_target(
    player: &Player,
    carrier: Option<Vec2>,
    ball: Vec2,
    field: &FieldGeometry,
    cfg: &AiConfig,
) -> Vec2 {
    let mid = field.center();
    let Some(carrier) = carrier else {
        return player.home + (ball - mid) * (cfg.ball_bias * ai::DRIFT_SCALE);
    };

    let run = RoleRun::for_role(player.role);
    let side = if player.home.y < mid.y { -1.0 } else { 1.0 };
    let margin = cfg.run_margin;
    let x = (carrier.x + player.team.attack_sign() * run.lead)
        .clamp(field.left + margin, field.right - margin);

    let y = if run.holds_width && in_attacking_third(player.team, carrier, field) {
        if side < 0.0 {
            field.top + margin
        } else {
            field.bottom - margin
        }
    } else {
        (carrier.y + side * run.lateral).clamp(field.top + margin, field.bottom - margin)
    };
    Vec2::new(x, y)
}

fn in_attacking_third(team: Team, p: Vec2, field: &FieldGeometry) -> bool {
    field.distance_to_attacked_goal_line(team, p) < field.width() / 3.0
}

impl MatchState {
    /// Refresh every field player's run target for `team`.
    pub(crate) fn plan_runs(&mut self, team: Team) {
        let field = self.config.field;
        let ball = self.ball.body.position;
        let own = &mut self.teams[team.index()];
        let carrier = self.ball.owner.field_index_for(team).map(|i| own.players[i].body.position);
        for p in own.players.iter_mut() {
            p.run_target = run_target(p, carrier, ball, &field, &self.config.ai);
        }
    }
}
