pub mod reactivity;

pub use reactivity::{ReactiveState, SubscriptionId};
