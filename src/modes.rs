//! Game modes and wheel dealing
//!
//! Each preset mode owns a prompt deck. A round deals up to eight prompts
//! from the shuffled deck onto the wheel and paints them with the fixed
//! palette.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::consts::{MIN_CUSTOM_ENTRIES, WHEEL_SLOTS};
use crate::error::SpinError;
use crate::spin::{Slice, SliceSet};

/// Wheel palette as (fill, text) pairs, one per slot
pub const PALETTE: [(&str, &str); WHEEL_SLOTS] = [
    ("#ef4444", "#ffffff"), // red
    ("#f97316", "#ffffff"), // orange
    ("#eab308", "#000000"), // yellow
    ("#84cc16", "#000000"), // lime
    ("#06b6d4", "#ffffff"), // cyan
    ("#3b82f6", "#ffffff"), // blue
    ("#a855f7", "#ffffff"), // purple
    ("#ec4899", "#ffffff"), // pink
];

const FUN_DECK: &[&str] = &[
    "Finish your glass",
    "Half a glass",
    "3 sips",
    "5 sips",
    "Pick someone to drink",
    "Everybody drinks",
    "Take a break",
    "Truth or Dare",
    "Left neighbor drinks",
    "Right neighbor drinks",
    "Do your best impression",
    "Speak in rhymes until your next turn",
    "Make up a new rule",
    "Sing the chorus",
];

const HOT_DECK: &[&str] = &[
    "Tell us your crush",
    "Describe your worst date",
    "Reveal your last search",
    "Read your last text aloud",
    "Compliment the player opposite",
    "Slow dance with the left neighbor",
    "Share a secret or drink twice",
    "Most attractive player drinks",
    "Two truths and a lie",
    "Swap seats with someone",
];

const HARD_DECK: &[&str] = &[
    "Bottoms up",
    "Two full glasses",
    "Waterfall",
    "Shot with the right neighbor",
    "Everyone finishes their glass",
    "No hands until your next turn",
    "Drink double next round",
    "Spin again and double it",
    "Lowest glass finishes it",
    "Pick two people to finish",
];

/// Game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GameMode {
    #[default]
    Fun,
    Hot,
    Hard,
    Custom,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Fun => "Fun",
            GameMode::Hot => "Hot",
            GameMode::Hard => "Hard",
            GameMode::Custom => "Custom",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fun" | "funny" => Some(GameMode::Fun),
            "hot" | "18+" => Some(GameMode::Hot),
            "hard" | "hardcore" => Some(GameMode::Hard),
            "custom" => Some(GameMode::Custom),
            _ => None,
        }
    }

    /// Built-in deck (empty for Custom; those come from the player)
    pub fn deck(&self) -> &'static [&'static str] {
        match self {
            GameMode::Fun => FUN_DECK,
            GameMode::Hot => HOT_DECK,
            GameMode::Hard => HARD_DECK,
            GameMode::Custom => &[],
        }
    }
}

/// Shuffle `deck`, keep up to eight entries and paint them
pub fn deal_slices<S, R>(deck: &[S], rng: &mut R) -> Result<SliceSet, SpinError>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let mut labels: Vec<&str> = deck.iter().map(|s| s.as_ref()).collect();
    labels.shuffle(rng);
    labels.truncate(WHEEL_SLOTS);

    let slices = labels
        .into_iter()
        .zip(PALETTE.iter())
        .enumerate()
        .map(|(i, (label, (fill, text)))| Slice::new(i as u32 + 1, label, *fill, *text))
        .collect();
    SliceSet::new(slices)
}

/// Deal a preset mode's deck
pub fn deal_mode<R: Rng + ?Sized>(mode: GameMode, rng: &mut R) -> Result<SliceSet, SpinError> {
    let slices = deal_slices(mode.deck(), rng)?;
    log::info!("Dealt {} prompts for {} mode", slices.len(), mode.as_str());
    Ok(slices)
}

/// Build a wheel from player entries. Blank entries are dropped; at least
/// two and at most eight must remain.
pub fn custom_slices<S, R>(entries: &[S], rng: &mut R) -> Result<SliceSet, SpinError>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    let entries: Vec<&str> = entries
        .iter()
        .map(|e| e.as_ref().trim())
        .filter(|e| !e.is_empty())
        .collect();

    if entries.len() < MIN_CUSTOM_ENTRIES {
        log::warn!("Custom wheel rejected: {} entries", entries.len());
        return Err(SpinError::TooFewEntries {
            found: entries.len(),
            min: MIN_CUSTOM_ENTRIES,
        });
    }
    if entries.len() > WHEEL_SLOTS {
        log::warn!("Custom wheel rejected: {} entries", entries.len());
        return Err(SpinError::TooManyEntries {
            found: entries.len(),
            max: WHEEL_SLOTS,
        });
    }
    deal_slices(&entries, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_mode_names_roundtrip() {
        for mode in [GameMode::Fun, GameMode::Hot, GameMode::Hard, GameMode::Custom] {
            assert_eq!(GameMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(GameMode::from_str("hardcore"), Some(GameMode::Hard));
        assert_eq!(GameMode::from_str("nope"), None);
    }

    #[test]
    fn test_preset_decks_fill_the_wheel() {
        for mode in [GameMode::Fun, GameMode::Hot, GameMode::Hard] {
            assert!(mode.deck().len() >= WHEEL_SLOTS);
            let set = deal_mode(mode, &mut Pcg32::seed_from_u64(1)).unwrap();
            assert_eq!(set.len(), WHEEL_SLOTS);
        }
        assert!(matches!(
            deal_mode(GameMode::Custom, &mut Pcg32::seed_from_u64(1)),
            Err(SpinError::EmptySliceSet)
        ));
    }

    #[test]
    fn test_deal_is_seeded_and_painted() {
        let a = deal_mode(GameMode::Fun, &mut Pcg32::seed_from_u64(9)).unwrap();
        let b = deal_mode(GameMode::Fun, &mut Pcg32::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);

        for (i, slice) in a.iter().enumerate() {
            assert_eq!(slice.id, i as u32 + 1);
            assert_eq!(slice.fill_color, PALETTE[i].0);
            assert_eq!(slice.text_color, PALETTE[i].1);
            assert!(FUN_DECK.contains(&slice.label.as_str()));
        }
    }

    #[test]
    fn test_custom_entries_trimmed() {
        let entries = ["  beer ", "", "   ", "wine", "water"];
        let set = custom_slices(&entries, &mut Pcg32::seed_from_u64(3)).unwrap();
        assert_eq!(set.len(), 3);
        let mut labels: Vec<&str> = set.iter().map(|s| s.label.as_str()).collect();
        labels.sort();
        assert_eq!(labels, vec!["beer", "water", "wine"]);
    }

    #[test]
    fn test_custom_entry_limits() {
        let mut rng = Pcg32::seed_from_u64(5);
        assert!(matches!(
            custom_slices(&["only one", " "], &mut rng),
            Err(SpinError::TooFewEntries { found: 1, min: 2 })
        ));

        let nine: Vec<String> = (0..9).map(|i| format!("entry {i}")).collect();
        assert!(matches!(
            custom_slices(&nine, &mut rng),
            Err(SpinError::TooManyEntries { found: 9, max: 8 })
        ));
        assert!(custom_slices(&nine[..8], &mut rng).is_ok());
    }
}
