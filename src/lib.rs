//! prefgen - Preference injector generator
//!
//! Resolves fields marked for injection on consumer classes against the
//! preference wrappers owned by a component, and emits injector classes that
//! wire them from the component singleton.

pub mod cli;
pub mod config;
pub mod diagnostic;
pub mod emitter;
pub mod error;
pub mod java;
pub mod model;
pub mod naming;
pub mod pipeline;
pub mod resolver;
pub mod scan;

pub use emitter::{emit, Assignment, InjectorClass, SourceExpression};
pub use error::GenError;
pub use model::{ComponentDeclaration, ConsumerClass, FieldDecl, TypeRef};
pub use resolver::{FieldResolver, ResolutionKind, ResolvedBinding};
