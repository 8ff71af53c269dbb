//! Field resolution: maps marked consumer fields to component accessors.
//!
//! A marked field resolves to one of two shapes:
//! - a wrapper owned by the component (`Preference_<Model>`), fetched through
//!   the component accessor named after the model, or
//! - the component singleton itself (`PreferenceComponent_<Component>`).
//!
//! Type names are compared by simple name only, so `pkg.Preference_User` and
//! `Preference_User` resolve identically.

use serde::Serialize;

use crate::diagnostic::Diagnostic;
use crate::error::GenError;
use crate::model::{ComponentDeclaration, ConsumerClass, FieldDecl};
use crate::naming;

/// How a marked field obtains its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionKind {
    /// `<Singleton>.getInstance().<accessor>()`
    WrapperAccess { accessor: String },
    /// `<Singleton>.getInstance()`
    ComponentSelf,
}

/// A marked field paired with its resolved target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBinding<'a> {
    pub field: &'a FieldDecl,
    pub kind: ResolutionKind,
}

/// Resolves marked fields of consumers against one component.
#[derive(Debug, Clone, Copy)]
pub struct FieldResolver<'a> {
    component: &'a ComponentDeclaration,
}

impl<'a> FieldResolver<'a> {
    pub fn new(component: &'a ComponentDeclaration) -> Self {
        Self { component }
    }

    /// Resolves every marked field of `consumer`, in declaration order.
    ///
    /// Stops at the first unresolvable field.
    pub fn resolve<'c>(
        &self,
        consumer: &'c ConsumerClass,
    ) -> Result<Vec<ResolvedBinding<'c>>, GenError> {
        let bindings = consumer
            .marked_fields()
            .map(|field| {
                self.resolve_field(field)
                    .map(|kind| ResolvedBinding { field, kind })
                    .ok_or_else(|| {
                        Diagnostic::unresolvable(
                            &consumer.qualified_name(),
                            &field.name,
                            naming::simple_name(&field.declared_type),
                        )
                        .raise()
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            consumer = %consumer.qualified_name(),
            component = %self.component.qualified_name(),
            bindings = bindings.len(),
            "resolved injection targets"
        );

        Ok(bindings)
    }

    /// Resolves one field's declared type, or `None` if it names neither an
    /// owned wrapper nor the component singleton.
    pub fn resolve_field(&self, field: &FieldDecl) -> Option<ResolutionKind> {
        let simple = naming::simple_name(&field.declared_type);

        if self.component.owns_wrapper(simple) {
            return naming::wrapper_accessor(simple).map(|accessor| ResolutionKind::WrapperAccess {
                accessor: accessor.to_string(),
            });
        }

        if simple == self.component.singleton_name() {
            return Some(ResolutionKind::ComponentSelf);
        }

        None
    }
}
