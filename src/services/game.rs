use rand::{rngs::StdRng, Rng, SeedableRng};
use std::{fmt, str::FromStr, sync::Mutex};

/// A move in Nuke Foot Cockroach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Choice {
    Nuke,
    Foot,
    Cockroach,
}

impl Choice {
    pub const ALL: [Choice; 3] = [Choice::Nuke, Choice::Foot, Choice::Cockroach];

    pub fn as_str(&self) -> &'static str {
        match self {
            Choice::Nuke => "nuke",
            Choice::Foot => "foot",
            Choice::Cockroach => "cockroach",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Choice::Nuke => "Nuke",
            Choice::Foot => "Foot",
            Choice::Cockroach => "Cockroach",
        }
    }

    /// The move this one defeats.
    pub fn beats(&self) -> Choice {
        match self {
            Choice::Nuke => Choice::Foot,
            Choice::Foot => Choice::Cockroach,
            Choice::Cockroach => Choice::Nuke,
        }
    }
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Choice {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Choice::ALL
            .into_iter()
            .find(|choice| choice.as_str() == s)
            .ok_or_else(|| format!("unknown choice {:?}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
    /// The player's move was missing or unknown.
    Unrecognized,
}

impl Outcome {
    pub fn resolve(player: Option<Choice>, server: Choice) -> Self {
        match player {
            None => Outcome::Unrecognized,
            Some(player) if player.beats() == server => Outcome::Win,
            Some(player) if server.beats() == player => Outcome::Loss,
            Some(_) => Outcome::Draw,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
            Outcome::Draw => "draw",
            Outcome::Unrecognized => "unrecognized",
        }
    }
}

/// Source of the server's move.
pub trait ChoiceSource: Send + Sync {
    fn server_choice(&self) -> Choice;
}

/// Uniform draw over [`Choice::ALL`].
pub struct RandomChoice {
    rng: Mutex<StdRng>,
}

impl RandomChoice {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ChoiceSource for RandomChoice {
    fn server_choice(&self) -> Choice {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        Choice::ALL[rng.random_range(0..Choice::ALL.len())]
    }
}

/// Always plays the same move.
#[cfg(test)]
pub struct FixedChoice(pub Choice);

#[cfg(test)]
impl ChoiceSource for FixedChoice {
    fn server_choice(&self) -> Choice {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beats_relation_forms_a_cycle() {
        assert_eq!(Choice::Nuke.beats(), Choice::Foot);
        assert_eq!(Choice::Foot.beats(), Choice::Cockroach);
        assert_eq!(Choice::Cockroach.beats(), Choice::Nuke);
    }

    #[test]
    fn resolve_covers_all_pairs() {
        for player in Choice::ALL {
            for server in Choice::ALL {
                let outcome = Outcome::resolve(Some(player), server);
                let expected = if player == server {
                    Outcome::Draw
                } else if player.beats() == server {
                    Outcome::Win
                } else {
                    Outcome::Loss
                };
                assert_eq!(outcome, expected, "{player} vs {server}");
            }
        }
    }

    #[test]
    fn nuke_beats_foot_and_foot_loses_to_nuke() {
        assert_eq!(Outcome::resolve(Some(Choice::Nuke), Choice::Foot), Outcome::Win);
        assert_eq!(Outcome::resolve(Some(Choice::Foot), Choice::Nuke), Outcome::Loss);
    }

    #[test]
    fn missing_choice_is_unrecognized() {
        for server in Choice::ALL {
            assert_eq!(Outcome::resolve(None, server), Outcome::Unrecognized);
        }
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!("cockroach".parse::<Choice>(), Ok(Choice::Cockroach));
        assert!("Nuke".parse::<Choice>().is_err());
        assert!("rock".parse::<Choice>().is_err());
    }

    #[test]
    fn seeded_source_is_reproducible_and_covers_all_moves() {
        let a = RandomChoice::seeded(7);
        let b = RandomChoice::seeded(7);
        let first: Vec<Choice> = (0..64).map(|_| a.server_choice()).collect();
        let second: Vec<Choice> = (0..64).map(|_| b.server_choice()).collect();
        assert_eq!(first, second);
        for choice in Choice::ALL {
            assert!(first.contains(&choice), "{choice} never drawn");
        }
    }
}
