pub mod calculations;
pub mod models;
pub mod state;

pub use calculations::{
    CalculatorConfigError, DEFAULT_TIP_PERCENT, ParseAmountError, TipCalculator,
    TipCalculatorConfig, TipResult, compute, parse_amount, tip_amount, try_parse_amount,
};
pub use models::*;
pub use state::{InputState, SubscriptionId};
