//! Test-side tooling for observing spy output.
//!
//! - [`subscribe_spy_to`] - Subscribe a recorder to an observable
//! - [`SubscriberSpy`] - Inspect the values, error and completion it received
//!
//! # Example
//!
//! ```rust
//! use testkit_autospy::assertions::subscribe_spy_to;
//! use testkit_autospy::observable::Observable;
//!
//! let spy = subscribe_spy_to(&Observable::<&str, ()>::of("FAKE"));
//! assert_eq!(spy.last_value(), Some("FAKE"));
//! assert!(spy.received_complete());
//! ```

mod subscriber_spy;

pub use subscriber_spy::{subscribe_spy_to, SubscriberSpy};
