//! Member classification supplied by reflection.

use crate::spy::MemberKind;

/// One member of a class and how it is exposed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDescriptor {
    /// Member name.
    pub name: String,
    /// Member classification.
    pub kind: MemberKind,
}

impl MemberDescriptor {
    /// Describe a member.
    pub fn new(name: impl Into<String>, kind: MemberKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Source of a class's spyable members.
///
/// Implementations return the full member list, inherited members included.
/// How that list is derived is up to the implementation.
pub trait ClassDescriptor {
    /// The class name, used in diagnostics.
    fn class_name(&self) -> &str;

    /// Own and inherited members, without duplicates.
    fn members(&self) -> Vec<MemberDescriptor>;
}

/// A hand-written class description with optional parent.
///
/// # Example
///
/// ```rust
/// use testkit_autospy::class::{ClassDescriptor, ClassShape};
///
/// let parent = ClassShape::new("FakeClass")
///     .method("getSyncValue")
///     .observable_method("getObservable");
/// let child = ClassShape::new("FakeChildClass")
///     .observable_method("anotherObservableMethod")
///     .extends(parent);
///
/// let names: Vec<_> = child.members().into_iter().map(|m| m.name).collect();
/// assert_eq!(names, ["anotherObservableMethod", "getSyncValue", "getObservable"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassShape {
    name: String,
    own: Vec<MemberDescriptor>,
    parent: Option<Box<ClassShape>>,
}

impl ClassShape {
    /// Start describing a class.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            own: Vec::new(),
            parent: None,
        }
    }

    /// Add a member. A later member with the same name replaces the earlier one.
    #[must_use]
    pub fn member(mut self, name: impl Into<String>, kind: MemberKind) -> Self {
        let member = MemberDescriptor::new(name, kind);
        self.own.retain(|m| m.name != member.name);
        self.own.push(member);
        self
    }

    /// Add a plain method.
    #[must_use]
    pub fn method(self, name: impl Into<String>) -> Self {
        self.member(name, MemberKind::PlainMethod)
    }

    /// Add an observable-returning method.
    #[must_use]
    pub fn observable_method(self, name: impl Into<String>) -> Self {
        self.member(name, MemberKind::ObservableMethod)
    }

    /// Add an observable property.
    #[must_use]
    pub fn observable_property(self, name: impl Into<String>) -> Self {
        self.member(name, MemberKind::ObservableProperty)
    }

    /// Inherit every member of `parent` not declared here.
    #[must_use]
    pub fn extends(mut self, parent: ClassShape) -> Self {
        self.parent = Some(Box::new(parent));
        self
    }

    /// The parent class, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&ClassShape> {
        self.parent.as_deref()
    }
}

impl ClassDescriptor for ClassShape {
    fn class_name(&self) -> &str {
        &self.name
    }

    fn members(&self) -> Vec<MemberDescriptor> {
        let mut members = self.own.clone();
        let mut ancestor = self.parent.as_deref();
        while let Some(class) = ancestor {
            for member in &class.own {
                if !members.iter().any(|m| m.name == member.name) {
                    members.push(member.clone());
                }
            }
            ancestor = class.parent.as_deref();
        }
        members
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_shadows_parent() {
        let parent = ClassShape::new("Parent").method("load");
        let child = ClassShape::new("Child")
            .observable_method("load")
            .extends(parent);

        assert_eq!(
            child.members(),
            vec![MemberDescriptor::new("load", MemberKind::ObservableMethod)]
        );
    }

    #[test]
    fn test_grandparent_members_flattened() {
        let grandparent = ClassShape::new("A").method("a");
        let parent = ClassShape::new("B").method("b").extends(grandparent);
        let child = ClassShape::new("C").method("c").extends(parent);

        let names: Vec<_> = child.members().into_iter().map(|m| m.name).collect();
        assert_eq!(names, ["c", "b", "a"]);
        assert_eq!(child.parent().unwrap().class_name(), "B");
    }

    #[test]
    fn test_redeclared_member_replaced() {
        let shape = ClassShape::new("X").method("m").observable_method("m");
        assert_eq!(
            shape.members(),
            vec![MemberDescriptor::new("m", MemberKind::ObservableMethod)]
        );
    }
}
