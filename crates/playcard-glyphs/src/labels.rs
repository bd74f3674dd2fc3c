//! Rank and suit labels.
//!
//! Rank labels run `1..=13` (`1` = Two, `9` = Ten, `13` = Ace); suit labels
//! run `0..=3` (Hearts, Diamonds, Clubs, Spades).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name returned for codes outside a table.
pub const UNKNOWN: &str = "Unknown";

const RANK_NAMES: [&str; 14] = [
    UNKNOWN, "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Jack",
    "Queen", "King", "Ace",
];

const SUIT_NAMES: [&str; 4] = ["Hearts", "Diamonds", "Clubs", "Spades"];

/// Rank name for a template label, `"Unknown"` when out of range.
pub fn rank_name(code: i64) -> &'static str {
    usize::try_from(code)
        .ok()
        .and_then(|i| RANK_NAMES.get(i))
        .copied()
        .unwrap_or(UNKNOWN)
}

/// Suit name for a template label, `"Unknown"` when out of range.
pub fn suit_name(code: i64) -> &'static str {
    usize::try_from(code)
        .ok()
        .and_then(|i| SUIT_NAMES.get(i))
        .copied()
        .unwrap_or(UNKNOWN)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rank {
    Two = 1,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub fn from_label(label: u32) -> Option<Self> {
        let idx = usize::try_from(label).ok()?.checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }

    #[inline]
    pub fn label(self) -> u32 {
        self as u32
    }

    #[inline]
    pub fn name(self) -> &'static str {
        RANK_NAMES[self as usize]
    }

    /// File stem of the rank's reference glyph (`"0"` for ten).
    pub fn template_stem(self) -> &'static str {
        match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "0",
            Rank::Jack => "jack",
            Rank::Queen => "queen",
            Rank::King => "king",
            Rank::Ace => "ace",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Suit {
    Hearts = 0,
    Diamonds,
    Clubs,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    pub fn from_label(label: u32) -> Option<Self> {
        Self::ALL.get(usize::try_from(label).ok()?).copied()
    }

    #[inline]
    pub fn label(self) -> u32 {
        self as u32
    }

    #[inline]
    pub fn name(self) -> &'static str {
        SUIT_NAMES[self as usize]
    }

    pub fn template_stem(self) -> &'static str {
        match self {
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
            Suit::Spades => "spades",
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
