//! Board effects: what happens when a hero lands on an item.
//!
//! The active [`Ruleset`] picks the handler set. Both share the time effect's
//! clock inversion; the extended set layers role and pause side effects on
//! top of it and replaces per-hero theft with a board-wide escape phase.

#[cfg(test)]
#[path = "rules_test.rs"]
mod rules_test;

use tracing::{debug, info};

use crate::board::{CellPos, Color, Item, ItemKind};
use crate::config::Ruleset;
use crate::consts::ROLE_SWAP_MIN_SCENARIO;
use crate::engine::Engine;
use crate::hero::HeroId;
use crate::host::Phase;
use crate::sync::Message;

/// The effect a landing produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ClockInverted,
    ArticleStolen,
    EscapePhase,
    HeroExited { won: bool },
    CameraDisabled,
}

impl Engine {
    /// Apply the effect of the item on `pos` for the hero standing there.
    ///
    /// Returns `None` when nothing applies: no item, wrong color, already
    /// consumed, or a precondition not yet met.
    pub fn evaluate(&mut self, pos: CellPos, hero_id: HeroId) -> Option<Effect> {
        let item = self.board.item(pos)?;
        let hero = self.roster.get(hero_id)?;
        let color = hero.color;
        let carries_article = hero.has_stolen();

        match (self.config.ruleset, item.kind) {
            (_, ItemKind::Time) if !item.used => Some(self.invert_clock(pos)),
            (Ruleset::Basic, ItemKind::Article) if item.color == color && !item.stolen => {
                if let Some(hero) = self.roster.get_mut(hero_id) {
                    hero.steal();
                }
                self.board.set_stolen(pos);
                info!(hero = hero_id, ?pos, "article stolen");
                Some(Effect::ArticleStolen)
            }
            (Ruleset::Extended, ItemKind::Article) if item.color == color => self.try_escape_phase(),
            (Ruleset::Basic, ItemKind::Exit) if self.exit_matches(item, color) && carries_article => {
                Some(self.exit_hero(hero_id))
            }
            (Ruleset::Extended, ItemKind::Exit)
                if self.exit_matches(item, color) && self.host.game.is_phase(Phase::Escape) =>
            {
                Some(self.exit_hero(hero_id))
            }
            (Ruleset::Extended, ItemKind::Camera) if item.color == color && !item.used => {
                self.board.set_used(pos);
                debug!(?pos, "camera disabled");
                Some(Effect::CameraDisabled)
            }
            _ => None,
        }
    }

    /// In the first scenario any exit works for any hero.
    fn exit_matches(&self, item: Item, color: Color) -> bool {
        item.color == color || self.config.scenario == 1
    }

    fn invert_clock(&mut self, pos: CellPos) -> Effect {
        self.host.clock.invert();
        self.outbox.push(Message::ClockInverted);

        if self.config.ruleset == Ruleset::Extended {
            if self.config.pause_on_clock_invert {
                self.host.game.pause();
                self.outbox.push(Message::PauseRequested { paused: true });
            }
            let (players, bots) = (self.host.game.players(), self.host.game.bots());
            if players == 1 && bots == 0 {
                self.player.shuffle_role_pool();
                debug!("role pool shuffled");
            } else if players >= 2 && self.config.scenario >= ROLE_SWAP_MIN_SCENARIO {
                self.outbox.push(Message::RolesSwapRequested);
            }
        }

        self.board.set_used(pos);
        self.outbox.push(Message::CellUsed { x: pos.x, y: pos.y });
        info!(?pos, "clock inverted");
        Effect::ClockInverted
    }

    /// Open the escape phase once every hero stands on an unstolen article
    /// of its own color. Those articles become stolen.
    fn try_escape_phase(&mut self) -> Option<Effect> {
        if self.host.game.is_phase(Phase::Escape) || self.roster.is_empty() {
            return None;
        }
        let articles: Option<Vec<CellPos>> = self
            .roster
            .iter()
            .map(|hero| {
                self.board
                    .item(hero.pos)
                    .filter(|item| item.is(ItemKind::Article, hero.color) && !item.stolen)
                    .map(|_| hero.pos)
            })
            .collect();
        let articles = articles?;

        for pos in articles {
            self.board.set_stolen(pos);
        }
        self.host.game.set_phase(Phase::Escape);
        info!("escape phase");
        Some(Effect::EscapePhase)
    }

    fn exit_hero(&mut self, hero_id: HeroId) -> Effect {
        if let Some(hero) = self.roster.get_mut(hero_id) {
            hero.exit();
        }
        let won = self.host.solver.check_for_win(&self.roster);
        if won {
            self.host.game.win();
        }
        info!(hero = hero_id, won, "hero exited");
        Effect::HeroExited { won }
    }
}
