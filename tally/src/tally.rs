use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign};

use common::div_or_zero;
use serde::Serialize;

use super::{Sample, Sign};

/// Player the tally filters on when none is given. Samples written by self-play
/// mark the second mover with -1.
pub const DEFAULT_PLAYER: i32 = -1;

/// Counts of sample values by sign. `total` is always the sum of the other three.
#[derive(Serialize, Default, Clone, Copy, PartialEq, Eq, Debug)]
pub struct Tally {
    positive: usize,
    negative: usize,
    zero: usize,
    total: usize,
}

impl Tally {
    pub fn new(positive: usize, negative: usize, zero: usize) -> Self {
        Self {
            positive,
            negative,
            zero,
            total: positive + negative + zero,
        }
    }

    pub fn record(&mut self, sign: Sign) {
        match sign {
            Sign::Positive => self.positive += 1,
            Sign::Negative => self.negative += 1,
            Sign::Zero => self.zero += 1,
        }

        self.total += 1;
    }

    pub fn positive(&self) -> usize {
        self.positive
    }

    pub fn negative(&self) -> usize {
        self.negative
    }

    pub fn zero(&self) -> usize {
        self.zero
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn count(&self, sign: Sign) -> usize {
        match sign {
            Sign::Positive => self.positive,
            Sign::Negative => self.negative,
            Sign::Zero => self.zero,
        }
    }

    /// Share of the tallied samples with the given sign, 0 for an empty tally.
    pub fn fraction(&self, sign: Sign) -> f32 {
        div_or_zero(self.count(sign) as f32, self.total as f32)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}

impl Add for Tally {
    type Output = Tally;

    fn add(self, rhs: Tally) -> Tally {
        Tally::new(
            self.positive + rhs.positive,
            self.negative + rhs.negative,
            self.zero + rhs.zero,
        )
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, rhs: Tally) {
        *self = *self + rhs;
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "positive: {} ({:.1}%), negative: {} ({:.1}%), zero: {} ({:.1}%), total: {}",
            self.positive,
            self.fraction(Sign::Positive) * 100.0,
            self.negative,
            self.fraction(Sign::Negative) * 100.0,
            self.zero,
            self.fraction(Sign::Zero) * 100.0,
            self.total
        )
    }
}

/// Counts the values of the samples where `player` was to move, by sign.
pub fn analyze<I>(dataset: I, player: i32) -> Tally
where
    I: IntoIterator,
    I::Item: Sample,
{
    let mut tally = Tally::default();

    for sample in dataset {
        if sample.current_player() == player {
            tally.record(Sign::of(sample.value()));
        }
    }

    tally
}

pub fn analyze_default<I>(dataset: I) -> Tally
where
    I: IntoIterator,
    I::Item: Sample,
{
    analyze(dataset, DEFAULT_PLAYER)
}

/// One tally for every player that appears in the dataset.
pub fn analyze_by_player<I>(dataset: I) -> BTreeMap<i32, Tally>
where
    I: IntoIterator,
    I::Item: Sample,
{
    let mut tallies = BTreeMap::<i32, Tally>::new();

    for sample in dataset {
        tallies
            .entry(sample.current_player())
            .or_default()
            .record(Sign::of(sample.value()));
    }

    tallies
}
