use crate::board::GameState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Running results across games, owned by whoever drives the games.
///
/// Game logic never resets it; only [`ScoreTally::reset`] does.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone, Serialize, Deserialize)]
pub struct ScoreTally {
    pub player_wins: u32,
    pub ai_wins: u32,
    pub draws: u32,
}

impl ScoreTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts a finished game. Returns false, leaving the tally untouched, for an ongoing one.
    pub fn record(&mut self, state: GameState) -> bool {
        match state {
            GameState::Ongoing => return false,
            GameState::PlayerWin => self.player_wins += 1,
            GameState::AiWin => self.ai_wins += 1,
            GameState::Draw => self.draws += 1,
        }
        true
    }

    pub fn games_played(&self) -> u32 {
        self.player_wins + self.ai_wins + self.draws
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for ScoreTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Player: {} | AI: {} | Draws: {}",
            self.player_wins, self.ai_wins, self.draws
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::board::GameState;
    use crate::tally::ScoreTally;

    #[test]
    fn counts_only_finished_games() {
        // arrange
        let mut tally = ScoreTally::new();

        // act
        assert!(tally.record(GameState::AiWin));
        assert!(tally.record(GameState::Draw));
        assert!(tally.record(GameState::Draw));
        assert!(!tally.record(GameState::Ongoing));

        // assert
        assert_eq!(tally.ai_wins, 1);
        assert_eq!(tally.draws, 2);
        assert_eq!(tally.player_wins, 0);
        assert_eq!(tally.games_played(), 3);
        assert_eq!(tally.to_string(), "Player: 0 | AI: 1 | Draws: 2");
    }

    #[test]
    fn reset_is_explicit() {
        let mut tally = ScoreTally::new();
        tally.record(GameState::PlayerWin);
        tally.reset();
        assert_eq!(tally, ScoreTally::default());
    }
}
