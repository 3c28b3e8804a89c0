use crate::metrics::MetricKind;

/// Quote tiers for one metric.
///
/// `yearly` and `monthly` hold strictly increasing upper bounds. A value
/// strictly below `bounds[i]` gets `tiers[i]`; anything at or above the last
/// bound gets the final tier. Monthly bounds are tuned per metric and are not
/// a fixed fraction of the yearly ones.
#[derive(Debug)]
pub struct QuoteTable {
    pub zero: &'static str,
    pub yearly: [f64; 4],
    pub monthly: [f64; 4],
    pub tiers: [&'static str; 5],
}

impl QuoteTable {
    pub fn bounds(&self, is_month: bool) -> &[f64; 4] {
        if is_month {
            &self.monthly
        } else {
            &self.yearly
        }
    }
}

const STEPS: QuoteTable = QuoteTable {
    zero: "Your sneakers are still waiting for their big debut.",
    yearly: [500_000.0, 1_000_000.0, 2_000_000.0, 3_000_000.0],
    monthly: [40_000.0, 85_000.0, 170_000.0, 260_000.0],
    tiers: [
        "Every journey starts with a single step. You've taken the first ones.",
        "Steady strides! Your feet know the neighbourhood by heart.",
        "You've put a few serious miles behind you.",
        "Walking is basically your superpower at this point.",
        "Legendary. You could have walked across a continent.",
    ],
};

const SWIM: QuoteTable = QuoteTable {
    zero: "The pool misses you.",
    yearly: [10_000.0, 50_000.0, 100_000.0, 200_000.0],
    monthly: [1_000.0, 4_500.0, 9_000.0, 18_000.0],
    tiers: [
        "A splash here and there keeps things fresh.",
        "You're making waves in the water.",
        "Part human, part dolphin.",
        "Lane one is basically reserved for you.",
        "Olympic energy. The ocean is jealous.",
    ],
};

const CALORIES: QuoteTable = QuoteTable {
    zero: "Saving your energy for something big?",
    yearly: [100_000.0, 200_000.0, 300_000.0, 400_000.0],
    monthly: [8_000.0, 17_000.0, 26_000.0, 35_000.0],
    tiers: [
        "A warm little campfire of effort.",
        "You've been burning steady all along.",
        "That's a bonfire of hard work.",
        "Your metabolism is running at full throttle.",
        "An absolute furnace. Nothing could cool you down.",
    ],
};

const SLEEP: QuoteTable = QuoteTable {
    zero: "Sleep is for the weak? We'd disagree.",
    yearly: [2_000.0, 2_500.0, 2_900.0, 3_300.0],
    monthly: [165.0, 205.0, 240.0, 275.0],
    tiers: [
        "Burning the midnight oil a little too often.",
        "Getting there. Your pillow wants more quality time.",
        "Well rested and ready for anything.",
        "A true champion of recovery.",
        "Sleeping beauty would be proud.",
    ],
};

const FLIGHTS: QuoteTable = QuoteTable {
    zero: "Elevators are nice, but stairs are calling.",
    yearly: [500.0, 1_500.0, 3_000.0, 6_000.0],
    monthly: [45.0, 130.0, 260.0, 520.0],
    tiers: [
        "A few steps up at a time.",
        "You climbed your way to new heights.",
        "That's a skyscraper or two behind you.",
        "Mountain goat mode: unlocked.",
        "You've basically scaled Everest. Twice.",
    ],
};

const EXERCISE: QuoteTable = QuoteTable {
    zero: "Your workout playlist is gathering dust.",
    yearly: [3_000.0, 8_000.0, 15_000.0, 25_000.0],
    monthly: [250.0, 700.0, 1_300.0, 2_200.0],
    tiers: [
        "Every minute of movement counts.",
        "Consistency is clearly your thing.",
        "You put the work in, and it shows.",
        "Training like an athlete.",
        "Unstoppable. The gym should name a wing after you.",
    ],
};

pub fn table(kind: MetricKind) -> &'static QuoteTable {
    match kind {
        MetricKind::Steps => &STEPS,
        MetricKind::Swim => &SWIM,
        MetricKind::Calories => &CALORIES,
        MetricKind::Sleep => &SLEEP,
        MetricKind::Flights => &FLIGHTS,
        MetricKind::Exercise => &EXERCISE,
    }
}
