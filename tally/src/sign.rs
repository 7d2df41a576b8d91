#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Sign {
    Positive,
    Negative,
    Zero,
}

impl Sign {
    /// NaN is neither above nor below zero so it lands in `Zero`.
    pub fn of(value: f64) -> Self {
        if value > 0.0 {
            Sign::Positive
        } else if value < 0.0 {
            Sign::Negative
        } else {
            Sign::Zero
        }
    }
}
