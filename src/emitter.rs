//! Injector synthesis from resolved bindings.
//!
//! The emitter does no validation of its own: every binding it receives was
//! already checked by the resolver, so building the class cannot fail.

use serde::Serialize;

use crate::model::{ComponentDeclaration, ConsumerClass, TypeRef};
use crate::naming;
use crate::resolver::{ResolutionKind, ResolvedBinding};

/// Right-hand side of an injector assignment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceExpression {
    /// The component singleton class.
    pub singleton: TypeRef,
    /// Wrapper accessor invoked on the singleton, if any.
    pub accessor: Option<String>,
}

impl SourceExpression {
    /// Expression with the singleton written fully qualified.
    pub fn qualified(&self) -> String {
        self.render(&self.singleton.qualified())
    }

    fn render(&self, singleton: &str) -> String {
        match &self.accessor {
            Some(accessor) => format!(
                "{}.{}().{}()",
                singleton,
                naming::SINGLETON_ACCESSOR,
                accessor
            ),
            None => format!("{}.{}()", singleton, naming::SINGLETON_ACCESSOR),
        }
    }
}

/// Written with the singleton's simple name, as it appears in generated
/// source once the singleton is imported.
impl std::fmt::Display for SourceExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render(&self.singleton.simple))
    }
}

/// One `field = expression` statement of the injector constructor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Assignment {
    pub field: String,
    pub source: SourceExpression,
}

impl std::fmt::Display for Assignment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.field, self.source)
    }
}

/// A synthesized injector class: one constructor taking the consumer and
/// assigning each marked field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InjectorClass {
    /// `<Consumer>_Injector`.
    pub name: String,
    /// Package the injector is generated into (the consumer's).
    pub package_name: String,
    /// Constructor parameter type.
    pub parameter: TypeRef,
    /// Component singleton the assignments read from.
    pub component: TypeRef,
    /// Assignments in field declaration order.
    pub assignments: Vec<Assignment>,
}

impl InjectorClass {
    pub fn qualified_name(&self) -> String {
        naming::qualify(&self.package_name, &self.name)
    }
}

/// Builds the injector for `consumer` from its resolved bindings.
pub fn emit(
    consumer: &ConsumerClass,
    component: &ComponentDeclaration,
    bindings: &[ResolvedBinding<'_>],
) -> InjectorClass {
    let singleton = component.singleton_type();

    let assignments = bindings
        .iter()
        .map(|binding| Assignment {
            field: binding.field.name.clone(),
            source: SourceExpression {
                singleton: singleton.clone(),
                accessor: match &binding.kind {
                    ResolutionKind::WrapperAccess { accessor } => Some(accessor.clone()),
                    ResolutionKind::ComponentSelf => None,
                },
            },
        })
        .collect();

    InjectorClass {
        name: naming::injector_name(&consumer.simple_name),
        package_name: consumer.package_name.clone(),
        parameter: consumer.type_ref(),
        component: singleton,
        assignments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldDecl;
    use crate::resolver::FieldResolver;

    fn generate(consumer: &ConsumerClass) -> InjectorClass {
        let component = ComponentDeclaration::new("pkg", "Foo", ["Preference_Bar"]).unwrap();
        let bindings = FieldResolver::new(&component).resolve(consumer).unwrap();
        emit(consumer, &component, &bindings)
    }

    #[test]
    fn test_wrapper_assignment() {
        let consumer =
            ConsumerClass::new("app", "Baz").with_field(FieldDecl::injected("bar", "pkg.Preference_Bar"));
        let injector = generate(&consumer);

        assert_eq!(injector.name, "Baz_Injector");
        assert_eq!(injector.assignments.len(), 1);
        assert_eq!(
            injector.assignments[0].to_string(),
            "bar = PreferenceComponent_Foo.getInstance().Bar()"
        );
        assert_eq!(
            injector.assignments[0].source.qualified(),
            "pkg.PreferenceComponent_Foo.getInstance().Bar()"
        );
    }

    #[test]
    fn test_self_assignment() {
        let consumer = ConsumerClass::new("app", "Baz")
            .with_field(FieldDecl::injected("component", "PreferenceComponent_Foo"));
        let injector = generate(&consumer);

        assert_eq!(
            injector.assignments[0].to_string(),
            "component = PreferenceComponent_Foo.getInstance()"
        );
    }

    #[test]
    fn test_empty_injector() {
        let consumer = ConsumerClass::new("app", "Baz").with_field(FieldDecl::plain("title", "String"));
        let injector = generate(&consumer);

        assert!(injector.assignments.is_empty());
        assert_eq!(injector.qualified_name(), "app.Baz_Injector");
        assert_eq!(injector.parameter.qualified(), "app.Baz");
    }

    #[test]
    fn test_duplicate_fields_get_own_assignments() {
        let consumer = ConsumerClass::new("app", "Baz")
            .with_field(FieldDecl::injected("first", "Preference_Bar"))
            .with_field(FieldDecl::injected("second", "pkg.Preference_Bar"));
        let injector = generate(&consumer);

        let lines: Vec<_> = injector.assignments.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec![
                "first = PreferenceComponent_Foo.getInstance().Bar()",
                "second = PreferenceComponent_Foo.getInstance().Bar()",
            ]
        );
    }

    #[test]
    fn test_injector_serializes() {
        let consumer =
            ConsumerClass::new("app", "Baz").with_field(FieldDecl::injected("bar", "Preference_Bar"));
        let json = serde_json::to_value(generate(&consumer)).unwrap();

        assert_eq!(json["name"], "Baz_Injector");
        assert_eq!(json["component"]["simple"], "PreferenceComponent_Foo");
        assert_eq!(json["assignments"][0]["source"]["accessor"], "Bar");
    }
}
