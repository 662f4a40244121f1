//! Input state for the "cost of service" field.

mod input_state;

pub use input_state::{InputState, Listener, SubscriptionId};
