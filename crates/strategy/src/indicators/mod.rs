pub mod bollinger;
pub mod rsi;
pub mod stochastic;

pub use bollinger::{BollingerBands, BollingerIndicator};
pub use rsi::RsiIndicator;
pub use stochastic::{StochasticIndicator, StochasticValue};
