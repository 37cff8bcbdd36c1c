//! The six-chamber cylinder of one group's game.

use std::str::FromStr;

use rand::Rng;
use rand::seq::index;

use crate::error::{GameError, GameResult};

/// Number of chambers in the cylinder. Fixed.
pub const CHAMBERS: usize = 6;

/// A validated number of live rounds to load, in 1..=6.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BulletCount(u8);

impl BulletCount {
    /// Validate a requested count.
    pub fn new(count: i64) -> GameResult<Self> {
        match u8::try_from(count) {
            Ok(n) if (1..=CHAMBERS as u8).contains(&n) => Ok(Self(n)),
            _ => Err(GameError::InvalidBulletCount(count.to_string())),
        }
    }

    /// Parse a count from command text such as `"3"`.
    pub fn parse(text: &str) -> GameResult<Self> {
        let trimmed = text.trim();
        trimmed
            .parse::<i64>()
            .map_err(|_| GameError::InvalidBulletCount(trimmed.to_string()))
            .and_then(Self::new)
    }

    /// The count as a plain number.
    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for BulletCount {
    fn default() -> Self {
        Self(1)
    }
}

impl FromStr for BulletCount {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for BulletCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What came out of one pull of the trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fired {
    /// Index of the chamber that was fired.
    pub chamber: usize,
    /// Whether that chamber held a live round.
    pub live: bool,
}

/// Per-group game state: which chambers are live and where the cursor is.
///
/// Live chambers are chosen once at load time and only ever flip to spent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cylinder {
    chambers: [bool; CHAMBERS],
    cursor: usize,
}

impl Cylinder {
    /// Load `bullets` live rounds into distinct, uniformly chosen chambers.
    pub fn load<R: Rng + ?Sized>(bullets: BulletCount, rng: &mut R) -> Self {
        let mut chambers = [false; CHAMBERS];
        for pos in index::sample(rng, CHAMBERS, usize::from(bullets.get())) {
            chambers[pos] = true;
        }
        Self::from_chambers(chambers)
    }

    /// Build a cylinder with an explicit layout, cursor at chamber 0.
    pub fn from_chambers(chambers: [bool; CHAMBERS]) -> Self {
        Self {
            chambers,
            cursor: 0,
        }
    }

    /// Chamber layout, `true` for live.
    pub fn chambers(&self) -> &[bool; CHAMBERS] {
        &self.chambers
    }

    /// The chamber the next shot fires from.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Live rounds still in the cylinder.
    pub fn live_rounds(&self) -> usize {
        self.chambers.iter().filter(|&&c| c).count()
    }

    /// Whether every live round has been fired.
    pub fn is_spent(&self) -> bool {
        !self.chambers.contains(&true)
    }

    /// Fire the chamber under the cursor, spend it if live, advance the cursor.
    pub fn fire(&mut self) -> Fired {
        let chamber = self.cursor;
        let live = std::mem::take(&mut self.chambers[chamber]);
        self.cursor = (self.cursor + 1) % CHAMBERS;
        Fired { chamber, live }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn bullet_count_bounds() {
        assert!(BulletCount::new(0).is_err());
        assert_eq!(BulletCount::new(1).unwrap().get(), 1);
        assert_eq!(BulletCount::new(6).unwrap().get(), 6);
        assert!(BulletCount::new(7).is_err());
        assert!(BulletCount::new(-3).is_err());
        assert!(BulletCount::new(i64::from(u8::MAX) + 1).is_err());
    }

    #[test]
    fn bullet_count_parse() {
        assert_eq!(BulletCount::parse(" 4 ").unwrap().get(), 4);
        assert_eq!(
            BulletCount::parse("two"),
            Err(GameError::InvalidBulletCount("two".to_string()))
        );
        assert!(BulletCount::parse("2.5").is_err());
        assert!(BulletCount::parse("").is_err());
        assert_eq!("3".parse::<BulletCount>().unwrap().to_string(), "3");
    }

    #[test]
    fn full_cylinder_always_hits() {
        let mut c = Cylinder::from_chambers([true; CHAMBERS]);
        let shot = c.fire();
        assert_eq!(shot, Fired { chamber: 0, live: true });
        assert_eq!(c.live_rounds(), 5);
        assert_eq!(c.cursor(), 1);
    }

    #[test]
    fn miss_keeps_live_count() {
        let mut c = Cylinder::from_chambers([false, true, false, false, false, false]);
        assert!(!c.fire().live);
        assert_eq!(c.live_rounds(), 1);
        assert!(c.fire().live);
        assert!(c.is_spent());
    }

    #[test]
    fn cursor_wraps() {
        let mut c = Cylinder::from_chambers([false; CHAMBERS]);
        for _ in 0..CHAMBERS {
            c.fire();
        }
        assert_eq!(c.cursor(), 0);
    }

    #[test]
    fn positions_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut hits = [0u32; CHAMBERS];
        let trials = 6000;
        for _ in 0..trials {
            let c = Cylinder::load(BulletCount::new(1).unwrap(), &mut rng);
            for (i, live) in c.chambers().iter().enumerate() {
                if *live {
                    hits[i] += 1;
                }
            }
        }
        // Expected 1000 per chamber.
        for count in hits {
            assert!((800..=1200).contains(&count), "biased chamber: {hits:?}");
        }
    }

    proptest! {
        #[test]
        fn load_places_exact_count(n in 1i64..=6, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let c = Cylinder::load(BulletCount::new(n).unwrap(), &mut rng);
            prop_assert_eq!(c.live_rounds() as i64, n);
            prop_assert_eq!(c.cursor(), 0);
        }

        #[test]
        fn cursor_tracks_shot_count(n in 1i64..=6, shots in 0usize..20, seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut c = Cylinder::load(BulletCount::new(n).unwrap(), &mut rng);
            let before = c.live_rounds();
            let mut hits = 0;
            for _ in 0..shots {
                if c.fire().live {
                    hits += 1;
                }
            }
            prop_assert_eq!(c.cursor(), shots % CHAMBERS);
            prop_assert_eq!(c.live_rounds(), before - hits);
        }
    }
}
