//! Rules engine trait and its implementation for [`Game`].
//!
//! `RulesEngine` is the single entry point for player requests:
//! - Validate an action against the current state
//! - Apply it atomically and report what changed
//! - Tell whether the game is over

use tracing::debug;

use crate::core::{Action, ActionRecord, ActionResult};
use crate::events::GameEvent;
use crate::game::{Game, Phase};

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameResult {
    /// Single winner.
    Winner(String),
    /// Draw (nobody scored).
    Draw,
    /// Several players tied for the highest score.
    Winners(Vec<String>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: &str) -> bool {
        match self {
            GameResult::Winner(p) => p == player,
            GameResult::Winners(ps) => ps.iter().any(|p| p == player),
            GameResult::Draw => false,
        }
    }

    /// Winner(s) of a final score table.
    #[must_use]
    pub fn from_scores(scores: &[(String, i32)]) -> Self {
        let Some(best) = scores.iter().map(|(_, s)| *s).max() else {
            return GameResult::Draw;
        };
        let mut winners: Vec<String> = scores
            .iter()
            .filter(|(_, s)| *s == best)
            .map(|(name, _)| name.clone())
            .collect();
        if winners.len() == 1 {
            GameResult::Winner(winners.remove(0))
        } else {
            GameResult::Winners(winners)
        }
    }
}

/// Rules engine trait.
///
/// ## Implementation Notes
///
/// - `apply_action`: a rejected action leaves the state untouched
/// - `apply_action`: must be deterministic so mirrors can replay records
/// - `is_terminal`: return `None` while the game continues
pub trait RulesEngine {
    /// Apply `action` on behalf of `player`.
    ///
    /// Returns the events produced by the action, in order.
    fn apply_action(&mut self, player: &str, action: &Action) -> ActionResult<Vec<GameEvent>>;

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self) -> Option<GameResult>;

    // === Convenience Methods ===

    /// Re-apply a committed record.
    fn apply_record(&mut self, record: &ActionRecord) -> ActionResult<Vec<GameEvent>> {
        self.apply_action(&record.player, &record.action)
    }
}

impl RulesEngine for Game {
    fn apply_action(&mut self, player: &str, action: &Action) -> ActionResult<Vec<GameEvent>> {
        let result = match action {
            Action::ChooseBonusTile { tile } => self.choose_bonus_tile(player, *tile),
            Action::ChooseLeader { name } => self.choose_leader(player, name),
            Action::SpendServants { amount } => self.spend_servants(player, *amount),
            Action::GoToSpace {
                space,
                color,
                privileges,
            } => self.go_to_space(player, *space, *color, privileges),
            Action::GoToFloor {
                category,
                floor,
                color,
                cost,
            } => self.go_to_floor(player, *category, *floor, *color, *cost),
            Action::TakeCard { privileges } => self.take_card(player, privileges),
            Action::ActivateCard {
                name,
                conversion,
                privileges,
            } => self.activate_card(player, name, *conversion, privileges),
            Action::FinishActivation => self.finish_activation(player),
            Action::PlayLeader { name } => self.play_leader(player, name),
            Action::DiscardLeader { name, privileges } => self.discard_leader(player, name, privileges),
            Action::ActivateLeader { name, privileges } => self.activate_leader(player, name, privileges),
            Action::EndTurn => self.end_turn(player),
            Action::DecideExcommunication { choice } => self.decide_excommunication(player, *choice),
        };

        match &result {
            Ok(_) => {
                self.history
                    .push_back(ActionRecord::new(player, action.clone(), self.round, self.sequence));
                self.sequence += 1;
            }
            Err(error) => debug!(player, action = action.name(), %error, "action rejected"),
        }
        result
    }

    fn is_terminal(&self) -> Option<GameResult> {
        if self.phase != Phase::GameEnded {
            return None;
        }
        self.final_scores.as_deref().map(GameResult::from_scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::SpaceId;
    use crate::cards::ExcommunicationTile;
    use crate::core::{ActionError, FamilyColor};
    use crate::game::GameSetup;

    fn game() -> Game {
        let setup = GameSetup::new()
            .with_excommunications((1..=3).map(|p| ExcommunicationTile::new(u32::from(p), p)));
        let mut game = Game::new(setup, 17).unwrap();
        game.join("anna").unwrap();
        game.join("bruno").unwrap();
        game.start().unwrap();
        game
    }

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner("bruno".into());
        assert!(!result.is_winner("anna"));
        assert!(result.is_winner("bruno"));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner("anna"));

        let tied = GameResult::Winners(vec!["anna".into(), "carla".into()]);
        assert!(tied.is_winner("anna"));
        assert!(!tied.is_winner("bruno"));
        assert!(tied.is_winner("carla"));
    }

    #[test]
    fn test_result_from_scores() {
        assert_eq!(GameResult::from_scores(&[]), GameResult::Draw);
        assert_eq!(
            GameResult::from_scores(&[("anna".into(), 3), ("bruno".into(), 9)]),
            GameResult::Winner("bruno".into())
        );
        assert_eq!(
            GameResult::from_scores(&[("anna".into(), 9), ("bruno".into(), 9), ("carla".into(), 1)]),
            GameResult::Winners(vec!["anna".into(), "bruno".into()])
        );
    }

    #[test]
    fn test_accepted_actions_are_recorded() {
        let mut game = game();
        game.apply_action("anna", &Action::EndTurn).unwrap();
        assert_eq!(game.sequence(), 1);
        assert_eq!(game.history.len(), 1);
        assert_eq!(game.history[0].player, "anna");
        assert_eq!(game.history[0].sequence, 0);
    }

    #[test]
    fn test_rejected_actions_leave_no_trace() {
        let mut game = game();
        let before = game.clone();

        let result = game.apply_action("bruno", &Action::EndTurn);
        assert!(matches!(result, Err(ActionError::NotAllowed(_))));
        let result = game.apply_action(
            "carla",
            &Action::GoToSpace {
                space: SpaceId::CouncilPalace,
                color: FamilyColor::Black,
                privileges: vec![],
            },
        );
        assert_eq!(result, Err(ActionError::PlayerNotFound("carla".into())));

        assert_eq!(game.sequence(), 0);
        assert!(game.history.is_empty());
        assert_eq!(game.players, before.players);
        assert_eq!(game.phase, before.phase);
    }

    #[test]
    fn test_not_terminal_while_playing() {
        assert!(game().is_terminal().is_none());
    }
}
