//! Development card decks.
//!
//! One pile per category. Cards are drawn by period at the start of every
//! round; drawn cards leave the deck for good.

use serde::{Deserialize, Serialize};

use super::category::CardCategory;
use super::development::DevelopmentCard;
use crate::core::GameRng;

/// The undrawn development cards of a game.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevelopmentDeck {
    piles: [Vec<DevelopmentCard>; 4],
}

impl DevelopmentDeck {
    /// Create an empty deck.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a deck from loose cards, keeping their relative order.
    pub fn from_cards(cards: impl IntoIterator<Item = DevelopmentCard>) -> Self {
        let mut deck = Self::new();
        for card in cards {
            deck.add(card);
        }
        deck
    }

    /// Put a card at the bottom of its category pile.
    pub fn add(&mut self, card: DevelopmentCard) {
        self.piles[card.category.index()].push(card);
    }

    /// Shuffle every pile.
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        for pile in &mut self.piles {
            rng.shuffle(pile);
        }
    }

    /// Take up to `count` cards of `category` belonging to `period`, from the top.
    pub fn draw(&mut self, category: CardCategory, period: u8, count: usize) -> Vec<DevelopmentCard> {
        let pile = &mut self.piles[category.index()];
        let mut drawn = Vec::with_capacity(count);
        let mut i = 0;
        while i < pile.len() && drawn.len() < count {
            if pile[i].period == period {
                drawn.push(pile.remove(i));
            } else {
                i += 1;
            }
        }
        drawn
    }

    /// Undrawn cards of a category.
    #[must_use]
    pub fn remaining(&self, category: CardCategory) -> &[DevelopmentCard] {
        &self.piles[category.index()]
    }

    /// Total undrawn cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.piles.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.piles.iter().all(Vec::is_empty)
    }

    /// Iterate over every undrawn card, category by category.
    pub fn iter(&self) -> impl Iterator<Item = &DevelopmentCard> {
        self.piles.iter().flatten()
    }

    /// Find cards matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &DevelopmentCard>
    where
        F: Fn(&DevelopmentCard) -> bool,
    {
        self.iter().filter(move |c| predicate(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, category: CardCategory, period: u8) -> DevelopmentCard {
        DevelopmentCard::new(name, category, period)
    }

    #[test]
    fn test_cards_sorted_into_piles() {
        let deck = DevelopmentDeck::from_cards([
            card("Forest", CardCategory::Territory, 1),
            card("Bishop", CardCategory::Character, 1),
            card("Quarry", CardCategory::Territory, 2),
        ]);

        assert_eq!(deck.len(), 3);
        assert_eq!(deck.remaining(CardCategory::Territory).len(), 2);
        assert_eq!(deck.remaining(CardCategory::Venture).len(), 0);
    }

    #[test]
    fn test_draw_by_period() {
        let mut deck = DevelopmentDeck::from_cards([
            card("A", CardCategory::Territory, 2),
            card("B", CardCategory::Territory, 1),
            card("C", CardCategory::Territory, 1),
            card("D", CardCategory::Territory, 1),
        ]);

        let drawn = deck.draw(CardCategory::Territory, 1, 2);
        let names: Vec<_> = drawn.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
        assert_eq!(deck.len(), 2);

        // Fewer cards left than asked for.
        assert_eq!(deck.draw(CardCategory::Territory, 1, 4).len(), 1);
        assert!(deck.draw(CardCategory::Territory, 3, 4).is_empty());
    }

    #[test]
    fn test_shuffle_is_deterministic() {
        let cards: Vec<_> = (0..12)
            .map(|i| card(&format!("Card {i}"), CardCategory::Building, 1))
            .collect();
        let mut a = DevelopmentDeck::from_cards(cards.clone());
        let mut b = DevelopmentDeck::from_cards(cards);

        a.shuffle(&mut GameRng::new(7));
        b.shuffle(&mut GameRng::new(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_find() {
        let deck = DevelopmentDeck::from_cards([
            card("Forest", CardCategory::Territory, 1),
            card("Mint", CardCategory::Building, 3),
        ]);
        let late: Vec<_> = deck.find(|c| c.period == 3).collect();
        assert_eq!(late.len(), 1);
        assert_eq!(late[0].name, "Mint");
    }
}
