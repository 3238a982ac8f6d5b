//! Class-level spy generation.
//!
//! Reflection is out of scope: a [`ClassDescriptor`] supplies each member's
//! name and [`MemberKind`](crate::spy::MemberKind), with inherited members
//! already flattened in. [`ClassShape`] is a hand-written descriptor.
//!
//! - [`ClassSpy`] - One spy per member
//! - [`PropertySpy`] - Spy for an observable-valued property
//! - [`SpyOptions`] - Extra members and the mismatch reporter
//!
//! # Example
//!
//! ```rust
//! use testkit_autospy::args;
//! use testkit_autospy::assertions::subscribe_spy_to;
//! use testkit_autospy::class::{ClassShape, ClassSpy, SpyOptions};
//! use serde_json::json;
//!
//! let parent = ClassShape::new("FakeClass").observable_method("getObservable");
//! let child = ClassShape::new("FakeChildClass")
//!     .observable_method("anotherObservableMethod")
//!     .extends(parent);
//!
//! let fake: ClassSpy = ClassSpy::with_options(
//!     &child,
//!     SpyOptions::new().observable_props(["observableProp"]),
//! );
//!
//! // Inherited methods work like declared ones.
//! let inherited = fake.observable_method("getObservable")?;
//! inherited.and().next_with(json!("FAKE"));
//! let spy = subscribe_spy_to(&inherited.invoke_observable(args![]).unwrap());
//! assert_eq!(spy.last_value(), Some(json!("FAKE")));
//!
//! // Observable properties are configured directly.
//! let prop = fake.property("observableProp")?;
//! prop.throw_with(json!("BOOM"));
//! assert_eq!(subscribe_spy_to(&prop.observable()).error(), Some(json!("BOOM")));
//! # Ok::<(), testkit_autospy::Error>(())
//! ```

mod class_spy;
mod options;
mod property;
mod shape;

pub use class_spy::ClassSpy;
pub use options::SpyOptions;
pub use property::PropertySpy;
pub use shape::{ClassDescriptor, ClassShape, MemberDescriptor};
