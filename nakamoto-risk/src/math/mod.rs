pub mod double_spend;
pub mod table;
pub mod window;

pub use self::{
    double_spend::DoubleSpend,
    table::{Binomial, Combinations, Triangle},
    window::{
        BinomialTerms, ExactTerms, ExactWindow, ProbabilisticWindow, WindowDeficit, WindowTerms,
        MAX_EXACT_WINDOW,
    },
};
