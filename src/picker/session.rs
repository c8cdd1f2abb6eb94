// src/picker/session.rs

use rand::{seq::IndexedRandom, Rng};
use tracing::{debug, trace};

use super::QuestionBank;
use crate::error::{PickstatError, Result};

/// Per-session draw state: the active category and the questions not yet drawn.
///
/// `remaining` is always a sub-multiset of the active category's pool.
/// Owned by exactly one interactive session.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionState {
    active_category: Option<String>,
    remaining: Vec<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_category(&self) -> Option<&str> {
        self.active_category.as_deref()
    }

    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    pub fn remaining_count(&self) -> usize {
        self.remaining.len()
    }

    /// Switch to `category`, refilling the pool only if the category changed.
    /// Returns true when the pool was refilled.
    pub fn select_category(&mut self, bank: &QuestionBank, category: &str) -> bool {
        if self.active_category.as_deref() == Some(category) {
            return false;
        }
        self.active_category = Some(category.to_string());
        self.remaining = bank.pool(category).to_vec();
        debug!(category, pool = self.remaining.len(), "category selected");
        true
    }

    /// Refill the pool of the active category. No-op before any category is selected.
    pub fn reset(&mut self, bank: &QuestionBank) {
        if let Some(cat) = &self.active_category {
            self.remaining = bank.pool(cat).to_vec();
            debug!(category = %cat, pool = self.remaining.len(), "pool reset");
        }
    }

    /// Draw with the thread-local generator.
    pub fn draw(&mut self) -> Result<String> {
        self.draw_with(&mut rand::rng())
    }

    /// Pick one remaining question uniformly at random and remove it.
    ///
    /// Removal is by value: with duplicate texts only one instance goes.
    pub fn draw_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<String> {
        let picked = match self.remaining.choose(rng) {
            Some(q) => q.clone(),
            None => {
                return Err(PickstatError::EmptyPool(
                    self.active_category.clone().unwrap_or_default(),
                ))
            }
        };
        if let Some(pos) = self.remaining.iter().position(|q| *q == picked) {
            self.remaining.swap_remove(pos);
        }
        trace!(left = self.remaining.len(), "drew question");
        Ok(picked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn bank() -> QuestionBank {
        QuestionBank::from_pairs([
            ("Fun", "q1"),
            ("Fun", "q2"),
            ("Fun", "q3"),
            ("Fun", "q4"),
            ("Deep", "d1"),
            ("Deep", "d2"),
        ])
    }

    #[test]
    fn exhausts_pool_with_distinct_draws() {
        let bank = bank();
        let mut rng = StdRng::seed_from_u64(7);
        for cat in bank.categories() {
            let mut s = SessionState::new();
            s.select_category(&bank, cat);
            let n = bank.pool(cat).len();

            let drawn: Vec<String> = (0..n).map(|_| s.draw_with(&mut rng).unwrap()).collect();
            let distinct: HashSet<&String> = drawn.iter().collect();
            let pool: HashSet<&String> = bank.pool(cat).iter().collect();
            assert_eq!(distinct, pool);

            for _ in 0..3 {
                assert!(matches!(
                    s.draw_with(&mut rng),
                    Err(PickstatError::EmptyPool(ref c)) if c == cat
                ));
            }
        }
    }

    #[test]
    fn reset_restores_full_pool_after_partial_draws() {
        let bank = bank();
        let mut rng = StdRng::seed_from_u64(42);
        let mut s = SessionState::new();
        s.select_category(&bank, "Fun");
        s.draw_with(&mut rng).unwrap();
        s.draw_with(&mut rng).unwrap();
        assert_eq!(s.remaining_count(), 2);

        s.reset(&bank);
        assert_eq!(s.remaining_count(), 4);
        let drawn: HashSet<String> = (0..4).map(|_| s.draw_with(&mut rng).unwrap()).collect();
        assert_eq!(drawn.len(), 4);
        assert!(s.draw_with(&mut rng).is_err());
    }

    #[test]
    fn select_same_category_is_idempotent() {
        let bank = bank();
        let mut s = SessionState::new();
        assert!(s.select_category(&bank, "Fun"));
        let before = s.clone();
        assert!(!s.select_category(&bank, "Fun"));
        assert_eq!(s, before);
    }

    #[test]
    fn reselect_keeps_partially_drawn_pool() {
        let bank = bank();
        let mut s = SessionState::new();
        s.select_category(&bank, "Deep");
        s.draw().unwrap();
        s.select_category(&bank, "Deep");
        assert_eq!(s.remaining_count(), 1);
    }

    #[test]
    fn switching_category_refills() {
        let bank = bank();
        let mut s = SessionState::new();
        s.select_category(&bank, "Deep");
        s.draw().unwrap();
        s.select_category(&bank, "Fun");
        assert_eq!(s.active_category(), Some("Fun"));
        assert_eq!(s.remaining_count(), 4);
        s.select_category(&bank, "Deep");
        assert_eq!(s.remaining_count(), 2);
    }

    #[test]
    fn duplicates_are_removed_one_at_a_time() {
        let bank = QuestionBank::from_pairs([("Dup", "same"), ("Dup", "same"), ("Dup", "other")]);
        let mut s = SessionState::new();
        s.select_category(&bank, "Dup");
        let mut drawn: Vec<String> = (0..3).map(|_| s.draw().unwrap()).collect();
        drawn.sort();
        assert_eq!(drawn, ["other", "same", "same"]);
        assert!(s.draw().is_err());
    }

    #[test]
    fn unknown_category_and_no_session() {
        let bank = bank();
        let mut s = SessionState::new();
        assert!(s.draw().is_err());
        s.reset(&bank);
        assert_eq!(s.remaining_count(), 0);

        s.select_category(&bank, "Missing");
        assert!(matches!(s.draw(), Err(PickstatError::EmptyPool(_))));
    }
}
