use serde::{Deserialize, Serialize};

/// The closed set of games the engine recognizes.
///
/// Variant names double as the canonical identifier: the string stored in
/// the database and returned on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Game {
    Travle,
    Connections,
    Wordle,
    GuessTheMovie,
    GuessTheGame,
    FoodGuessr,
    TimeGuessr,
}

/// Raw score bounds and direction for one game, as used by the normalizer.
/// Parsers may emit values outside `[min, max]`; the normalizer clamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameSpec {
    pub min: f64,
    pub max: f64,
    pub lower_is_better: bool,
}

impl Game {
    /// Every supported game, in parser registration order.
    pub const ALL: [Game; 7] = [
        Game::Travle,
        Game::Connections,
        Game::Wordle,
        Game::GuessTheMovie,
        Game::GuessTheGame,
        Game::FoodGuessr,
        Game::TimeGuessr,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Game::Travle => "Travle",
            Game::Connections => "Connections",
            Game::Wordle => "Wordle",
            Game::GuessTheMovie => "GuessTheMovie",
            Game::GuessTheGame => "GuessTheGame",
            Game::FoodGuessr => "FoodGuessr",
            Game::TimeGuessr => "TimeGuessr",
        }
    }

    /// Look up a game by its canonical name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Game> {
        Game::ALL
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(name))
    }

    pub fn spec(self) -> GameSpec {
        match self {
            // -1 is the "(Perfect)" sentinel, one better than zero mistakes.
            Game::Travle => GameSpec {
                min: -1.0,
                max: 20.0,
                lower_is_better: true,
            },
            Game::Connections => GameSpec {
                min: 0.0,
                max: 4.0,
                lower_is_better: true,
            },
            Game::Wordle => GameSpec {
                min: 1.0,
                max: 7.0,
                lower_is_better: true,
            },
            Game::GuessTheMovie => GameSpec {
                min: 1.0,
                max: 7.0,
                lower_is_better: true,
            },
            Game::GuessTheGame => GameSpec {
                min: 1.0,
                max: 7.0,
                lower_is_better: true,
            },
            Game::FoodGuessr => GameSpec {
                min: 0.0,
                max: 15000.0,
                lower_is_better: false,
            },
            Game::TimeGuessr => GameSpec {
                min: 0.0,
                max: 50000.0,
                lower_is_better: false,
            },
        }
    }

    pub fn lower_is_better(self) -> bool {
        self.spec().lower_is_better
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
