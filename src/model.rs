//! Structural descriptors of component declarations and consumer classes.
//!
//! These are produced by the scanner (or by the derive front end) before
//! resolution starts, and are immutable afterwards.

use serde::Serialize;

use crate::diagnostic::Diagnostic;
use crate::error::GenError;
use crate::naming;

/// A type name split into package and simple name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeRef {
    /// Package, empty for the unnamed package.
    pub package: String,
    /// Simple class name.
    pub simple: String,
}

impl TypeRef {
    pub fn new(package: impl Into<String>, simple: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            simple: simple.into(),
        }
    }

    /// Builds a type reference from a qualified name such as `com.example.Foo`.
    pub fn parse(qualified: &str) -> Self {
        let (package, simple) = naming::split_qualified(qualified);
        Self::new(package, simple)
    }

    /// Fully qualified name.
    pub fn qualified(&self) -> String {
        naming::qualify(&self.package, &self.simple)
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.qualified())
    }
}

/// A preference component declaration and the wrappers it owns.
///
/// The wrapper list is the only source of truth for what counts as a wrapper
/// reference during resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDeclaration {
    package_name: String,
    class_name: String,
    wrapper_names: Vec<String>,
}

impl ComponentDeclaration {
    /// Starts a declaration for `class_name` in `package_name`.
    pub fn builder(
        package_name: impl Into<String>,
        class_name: impl Into<String>,
    ) -> ComponentBuilder {
        ComponentBuilder {
            package_name: package_name.into(),
            class_name: class_name.into(),
            wrapper_names: Vec::new(),
        }
    }

    /// Builds a declaration from its wrapper names in declaration order.
    pub fn new<I, S>(
        package_name: impl Into<String>,
        class_name: impl Into<String>,
        wrappers: I,
    ) -> Result<Self, GenError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        wrappers
            .into_iter()
            .fold(Self::builder(package_name, class_name), |b, w| b.wrapper(w))
            .build()
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Wrapper simple names in declaration order.
    pub fn wrapper_names(&self) -> &[String] {
        &self.wrapper_names
    }

    /// Whether `simple_name` denotes one of this component's wrappers.
    pub fn owns_wrapper(&self, simple_name: &str) -> bool {
        self.wrapper_names.iter().any(|w| w == simple_name)
    }

    /// `PreferenceComponent_<ClassName>`.
    pub fn singleton_name(&self) -> String {
        naming::component_singleton_name(&self.class_name)
    }

    /// The generated singleton class, in the component's package.
    pub fn singleton_type(&self) -> TypeRef {
        TypeRef::new(self.package_name.clone(), self.singleton_name())
    }

    /// Qualified name of the declared component itself.
    pub fn qualified_name(&self) -> String {
        naming::qualify(&self.package_name, &self.class_name)
    }
}

/// Collects wrapper names for a [`ComponentDeclaration`].
#[derive(Debug, Clone)]
pub struct ComponentBuilder {
    package_name: String,
    class_name: String,
    wrapper_names: Vec<String>,
}

impl ComponentBuilder {
    /// Adds a wrapper; repeated names keep their first position.
    pub fn wrapper(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        if !self.wrapper_names.contains(&name) {
            self.wrapper_names.push(name);
        }
        self
    }

    /// Validates and freezes the declaration.
    pub fn build(self) -> Result<ComponentDeclaration, GenError> {
        if self.class_name.trim().is_empty() {
            return Err(Diagnostic::malformed(format!(
                "component in package '{}' has no class name",
                self.package_name
            ))
            .raise());
        }

        if let Some(bad) = self
            .wrapper_names
            .iter()
            .find(|w| naming::wrapper_accessor(w).is_none())
        {
            return Err(Diagnostic::malformed(format!(
                "component {} lists '{}', which is not a {}<Model> wrapper",
                self.class_name,
                bad,
                naming::WRAPPER_PREFIX
            ))
            .raise());
        }

        Ok(ComponentDeclaration {
            package_name: self.package_name,
            class_name: self.class_name,
            wrapper_names: self.wrapper_names,
        })
    }
}

/// A field declared on a consumer class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    /// Field simple name.
    pub name: String,
    /// Declared type as written, possibly qualified.
    pub declared_type: String,
    /// Whether the field carries the injection marker.
    pub injected: bool,
}

impl FieldDecl {
    /// A field marked for injection.
    pub fn injected(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            injected: true,
        }
    }

    /// A field without the injection marker.
    pub fn plain(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            injected: false,
        }
    }
}

/// A class whose marked fields get populated by a generated injector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsumerClass {
    pub package_name: String,
    pub simple_name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldDecl>,
}

impl ConsumerClass {
    pub fn new(package_name: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            simple_name: simple_name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldDecl) -> Self {
        self.fields.push(field);
        self
    }

    pub fn qualified_name(&self) -> String {
        naming::qualify(&self.package_name, &self.simple_name)
    }

    pub fn type_ref(&self) -> TypeRef {
        TypeRef::new(self.package_name.clone(), self.simple_name.clone())
    }

    /// Fields carrying the injection marker, in declaration order.
    pub fn marked_fields(&self) -> impl Iterator<Item = &FieldDecl> {
        self.fields.iter().filter(|f| f.injected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_keeps_declaration_order() {
        let component = ComponentDeclaration::new(
            "com.example",
            "AppComponent",
            ["Preference_User", "Preference_Device", "Preference_Pet"],
        )
        .unwrap();

        assert_eq!(
            component.wrapper_names(),
            &["Preference_User", "Preference_Device", "Preference_Pet"]
        );
        assert!(component.owns_wrapper("Preference_Device"));
        assert!(!component.owns_wrapper("Preference_Other"));
    }

    #[test]
    fn test_component_ignores_repeated_wrapper() {
        let component = ComponentDeclaration::builder("", "Foo")
            .wrapper("Preference_A")
            .wrapper("Preference_B")
            .wrapper("Preference_A")
            .build()
            .unwrap();

        assert_eq!(component.wrapper_names(), &["Preference_A", "Preference_B"]);
    }

    #[test]
    fn test_component_singleton_type() {
        let component = ComponentDeclaration::new("com.example", "Foo", ["Preference_Bar"]).unwrap();
        assert_eq!(component.singleton_name(), "PreferenceComponent_Foo");
        assert_eq!(
            component.singleton_type().qualified(),
            "com.example.PreferenceComponent_Foo"
        );
        assert_eq!(component.qualified_name(), "com.example.Foo");
    }

    #[test]
    fn test_component_in_unnamed_package() {
        let component = ComponentDeclaration::new("", "Foo", Vec::<String>::new()).unwrap();
        assert_eq!(component.singleton_type().qualified(), "PreferenceComponent_Foo");
    }

    #[test]
    fn test_component_without_name_is_rejected() {
        let result = ComponentDeclaration::new("com.example", "  ", ["Preference_Bar"]);
        assert!(matches!(result, Err(GenError::MalformedDeclaration(_))));
    }

    #[test]
    fn test_component_with_unprefixed_wrapper_is_rejected() {
        let result = ComponentDeclaration::new("com.example", "Foo", ["UserProfile"]);
        assert!(matches!(result, Err(GenError::MalformedDeclaration(_))));
    }

    #[test]
    fn test_marked_fields_filters_unmarked() {
        let consumer = ConsumerClass::new("com.example", "Baz")
            .with_field(FieldDecl::plain("title", "String"))
            .with_field(FieldDecl::injected("bar", "Preference_Bar"));

        let marked: Vec<_> = consumer.marked_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(marked, vec!["bar"]);
        assert_eq!(consumer.qualified_name(), "com.example.Baz");
    }

    #[test]
    fn test_type_ref_parse() {
        let ty = TypeRef::parse("com.example.Baz");
        assert_eq!(ty.package, "com.example");
        assert_eq!(ty.simple, "Baz");
        assert_eq!(ty.to_string(), "com.example.Baz");
    }
}
