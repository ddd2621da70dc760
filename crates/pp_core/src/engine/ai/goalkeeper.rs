//! Goalkeeper tracking, claiming and distribution

use tracing::debug;

use crate::engine::body::{BallOwner, BodyRef, Team};
use crate::engine::events::MatchEvent;
use crate::engine::field::GoalSide;
use crate::engine::match_state::{split_teams, MatchState};
use crate::engine::types::Vec2;

use super::passing::best_pass_target;

impl MatchState {
    /// Track, claim and distribute for `team`'s keeper.
    ///
    /// Only velocity is set here; integration clamps the keeper to its box.
    pub(crate) fn step_goalkeeper(&mut self, team: Team, events: &mut Vec<MatchEvent>) {
        let field = self.config.field;
        let cfg = &self.config.ai;
        let side = GoalSide::defended_by(team);
        let area = field.penalty_box(side);
        let ball = self.ball.body;

        let keeper = &mut self.teams[team.index()].goalkeeper;
        let lo = area.y + cfg.keeper_box_inset;
        let hi = area.y + area.h - cfg.keeper_box_inset;
        let ty = ball.position.y.clamp(lo.min(hi), hi.max(lo));
        let max = cfg.keeper_max_speed;
        keeper.body.velocity = Vec2::new(
            ((keeper.home.x - keeper.body.position.x) * cfg.keeper_track_gain).clamp(-max, max),
            ((ty - keeper.body.position.y) * cfg.keeper_track_gain).clamp(-max, max),
        );

        let me = BodyRef::Keeper { team };
        let shielded = self.ball.after_touch > 0.0 && self.ball.kicker == Some(me);
        let claimable = self.ball.owner.is_free()
            && ball.speed() <= self.config.physics.slow_ball_speed
            && keeper.body.position.distance(ball.position) <= keeper.body.radius + cfg.keeper_catch_reach
            && area.padded_x(cfg.keeper_catch_box_pad).contains(ball.position)
            && !shielded;
        if claimable {
            debug!(?team, tick = self.tick, "keeper claim");
            self.take_ball(me, events);
        }

        if self.ball.owner == (BallOwner::CarriedByGoalkeeper { team }) {
            self.distribute(team);
        }
    }

    /// Pass to the best teammate, or clear upfield when nobody is open.
    fn distribute(&mut self, team: Team) {
        let field = self.config.field;
        let cfg = self.config.ai.clone();
        let k = self.teams[team.index()].goalkeeper.body;
        let me = BodyRef::Keeper { team };

        let target = {
            let MatchState { teams, rng, .. } = self;
            let (own, opponents) = split_teams(teams, team);
            best_pass_target(own, opponents, k.position, None, &cfg, rng)
        };

        match target {
            Some(to) => {
                let receiver = self.teams[team.index()].players[to].body.position;
                let dir = (receiver - k.position).normalized_or(team.attack_dir());
                let offset = self.config.physics.carry_offset(k.radius);
                let r = self.ball.body.radius;
                self.ball.body.position = field.clamp_to_field(k.position + dir * offset, r);
                let speed = self.config.physics.pass_speed;
                debug!(?team, to, "keeper pass");
                self.kick(me, dir * speed, cfg.pass_aftertouch);
            }
            None => {
                let toward_centre = (field.center().y - k.position.y).signum();
                let velocity =
                    Vec2::new(team.attack_sign() * cfg.clearance_speed, cfg.clearance_lift * toward_centre);
                debug!(?team, "keeper clearance");
                self.kick(me, velocity, cfg.clearance_aftertouch);
            }
        }
    }
}
