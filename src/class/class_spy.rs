//! Spies generated for every member of a class.

use std::collections::BTreeMap;

use serde_json::Value;

use super::{ClassDescriptor, PropertySpy, SpyOptions};
use crate::error::{Error, Result};
use crate::observable::Payload;
use crate::spy::{MemberKind, SpyMethod};

/// A spy for every method and observable property of a class.
///
/// Members come flattened from a [`ClassDescriptor`], so inherited members
/// behave exactly like declared ones. Each member owns its own call log and
/// configuration.
///
/// # Example
///
/// ```rust
/// use testkit_autospy::args;
/// use testkit_autospy::assertions::subscribe_spy_to;
/// use testkit_autospy::class::{ClassShape, ClassSpy};
/// use serde_json::json;
///
/// let shape = ClassShape::new("FakeClass").observable_method("getObservable");
/// let fake: ClassSpy = ClassSpy::new(&shape);
///
/// let method = fake.observable_method("getObservable")?;
/// method.and().next_with(json!("FAKE"));
///
/// let spy = subscribe_spy_to(&method.invoke_observable(args![]).unwrap());
/// assert_eq!(spy.last_value(), Some(json!("FAKE")));
/// # Ok::<(), testkit_autospy::Error>(())
/// ```
#[derive(Debug)]
pub struct ClassSpy<T = Value, E = Value> {
    class_name: String,
    methods: BTreeMap<String, SpyMethod<T, E>>,
    properties: BTreeMap<String, PropertySpy<T, E>>,
}

impl<T: Payload, E: Payload> ClassSpy<T, E> {
    /// Spy on every member of `class` with default options.
    pub fn new<C: ClassDescriptor + ?Sized>(class: &C) -> Self {
        Self::with_options(class, SpyOptions::default())
    }

    /// Spy on every member of `class` plus the extra members in `options`.
    pub fn with_options<C: ClassDescriptor + ?Sized>(class: &C, options: SpyOptions) -> Self {
        let mut methods = BTreeMap::new();
        let mut properties = BTreeMap::new();

        let extra_methods = options
            .methods
            .iter()
            .map(|name| (name.clone(), MemberKind::PlainMethod));
        let extra_props = options
            .observable_props
            .iter()
            .map(|name| (name.clone(), MemberKind::ObservableProperty));
        let members = class
            .members()
            .into_iter()
            .map(|m| (m.name, m.kind))
            .chain(extra_methods)
            .chain(extra_props);

        for (name, kind) in members {
            let spy = SpyMethod::with_reporter(name.clone(), kind, options.reporter.clone());
            match kind {
                MemberKind::ObservableProperty => {
                    methods.remove(&name);
                    properties.insert(name, PropertySpy::from_spy(spy));
                }
                MemberKind::PlainMethod | MemberKind::ObservableMethod => {
                    properties.remove(&name);
                    methods.insert(name, spy);
                }
            }
        }

        tracing::debug!(
            class = class.class_name(),
            methods = methods.len(),
            properties = properties.len(),
            "class spy created"
        );

        Self {
            class_name: class.class_name().to_string(),
            methods,
            properties,
        }
    }

    /// The spied class name.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// The spy for a method of any kind.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMember`] if the class has no such member, or
    /// [`Error::WrongMemberKind`] if it is a property.
    pub fn method(&self, name: &str) -> Result<&SpyMethod<T, E>> {
        if let Some(spy) = self.methods.get(name) {
            return Ok(spy);
        }
        if self.properties.contains_key(name) {
            return Err(Error::wrong_member_kind(
                name,
                MemberKind::PlainMethod,
                MemberKind::ObservableProperty,
            ));
        }
        Err(Error::unknown_member(name))
    }

    /// The spy for an observable-returning method.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMember`] if the class has no such member, or
    /// [`Error::WrongMemberKind`] if it is not an observable method.
    pub fn observable_method(&self, name: &str) -> Result<&SpyMethod<T, E>> {
        let spy = self.method(name).map_err(|e| match e {
            Error::WrongMemberKind { name, actual, .. } => {
                Error::wrong_member_kind(name, MemberKind::ObservableMethod, actual)
            }
            other => other,
        })?;
        match spy.kind() {
            MemberKind::ObservableMethod => Ok(spy),
            actual => Err(Error::wrong_member_kind(
                name,
                MemberKind::ObservableMethod,
                actual,
            )),
        }
    }

    /// The spy for an observable property.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownMember`] if the class has no such member, or
    /// [`Error::WrongMemberKind`] if it is a method.
    pub fn property(&self, name: &str) -> Result<&PropertySpy<T, E>> {
        if let Some(prop) = self.properties.get(name) {
            return Ok(prop);
        }
        match self.methods.get(name) {
            Some(spy) => Err(Error::wrong_member_kind(
                name,
                MemberKind::ObservableProperty,
                spy.kind(),
            )),
            None => Err(Error::unknown_member(name)),
        }
    }

    /// Names of all spied members, sorted.
    #[must_use]
    pub fn member_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .methods
            .keys()
            .chain(self.properties.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names
    }

    /// Whether the class has a spied member with this name.
    #[must_use]
    pub fn has_member(&self, name: &str) -> bool {
        self.methods.contains_key(name) || self.properties.contains_key(name)
    }

    /// Clear the call log of every member.
    pub fn reset_calls(&self) {
        for spy in self.methods.values() {
            spy.reset_calls();
        }
        for prop in self.properties.values() {
            prop.spy().reset_calls();
        }
    }
}
