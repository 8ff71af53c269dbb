//! Two-phase generation pass.
//!
//! Phase one registers every component and consumer class from every file.
//! Phase two resolves each injected consumer against its component and builds
//! the injector. Nothing is materialized until the whole pass succeeded.

use std::collections::HashMap;

use serde::Serialize;

use crate::emitter::{self, InjectorClass};
use crate::error::GenError;
use crate::model::{ComponentDeclaration, ConsumerClass};
use crate::resolver::FieldResolver;
use crate::scan::{ComponentEntry, DeclarationFile};

/// All declarations of a pass, indexed by qualified name.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    components: Vec<ComponentEntry>,
    consumers: HashMap<String, ConsumerClass>,
}

impl ComponentRegistry {
    /// Registers every declaration of every file.
    ///
    /// Fails on a component or class declared twice under the same
    /// qualified name.
    pub fn build(files: Vec<DeclarationFile>) -> Result<Self, GenError> {
        let mut registry = Self::default();

        for file in files {
            for entry in file.components {
                registry.add_component(entry)?;
            }
            for class in file.classes {
                registry.add_consumer(class)?;
            }
        }

        tracing::debug!(
            components = registry.components.len(),
            consumers = registry.consumers.len(),
            "registered declarations"
        );

        Ok(registry)
    }

    pub fn add_component(&mut self, entry: ComponentEntry) -> Result<(), GenError> {
        let name = entry.component.qualified_name();
        if self
            .components
            .iter()
            .any(|e| e.component.qualified_name() == name)
        {
            return Err(GenError::DuplicateDeclaration(format!("component {}", name)));
        }
        self.components.push(entry);
        Ok(())
    }

    pub fn add_consumer(&mut self, class: ConsumerClass) -> Result<(), GenError> {
        let name = class.qualified_name();
        if self.consumers.contains_key(&name) {
            return Err(GenError::DuplicateDeclaration(format!("class {}", name)));
        }
        self.consumers.insert(name, class);
        Ok(())
    }

    /// Components in registration order.
    pub fn components(&self) -> impl Iterator<Item = &ComponentDeclaration> {
        self.components.iter().map(|e| &e.component)
    }

    pub fn consumer(&self, qualified_name: &str) -> Option<&ConsumerClass> {
        self.consumers.get(qualified_name)
    }

    /// Pairs every injected consumer with its owning component.
    ///
    /// A consumer may be owned by a single component only.
    fn bindings(&self) -> Result<Vec<(&ComponentDeclaration, &ConsumerClass)>, GenError> {
        let mut owners: HashMap<&str, &ComponentDeclaration> = HashMap::new();
        let mut pairs = Vec::new();

        for entry in &self.components {
            let component = &entry.component;
            for target in &entry.injects {
                let consumer =
                    self.consumer(target)
                        .ok_or_else(|| GenError::UnknownInjectTarget {
                            component: component.qualified_name(),
                            target: target.clone(),
                        })?;

                match owners.insert(target.as_str(), component) {
                    Some(first) if std::ptr::eq(first, component) => {
                        return Err(GenError::DuplicateDeclaration(format!(
                            "inject {} in component {}",
                            target,
                            component.qualified_name()
                        )));
                    }
                    Some(first) => {
                        return Err(GenError::MultipleComponents {
                            consumer: target.clone(),
                            first: first.qualified_name(),
                            second: component.qualified_name(),
                        });
                    }
                    None => {}
                }

                pairs.push((component, consumer));
            }
        }

        for name in self.consumers.keys() {
            if !owners.contains_key(name.as_str()) {
                tracing::debug!(consumer = %name, "no component injects this class, skipping");
            }
        }

        Ok(pairs)
    }
}

/// The injectors produced by one successful pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GenerationPlan {
    pub injectors: Vec<InjectorClass>,
}

impl GenerationPlan {
    pub fn len(&self) -> usize {
        self.injectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.injectors.is_empty()
    }
}

/// Resolves and emits every injector of the registry.
///
/// Stops at the first failure; a failed pass yields no plan at all.
pub fn plan(registry: &ComponentRegistry) -> Result<GenerationPlan, GenError> {
    let mut injectors = Vec::new();

    for (component, consumer) in registry.bindings()? {
        let bindings = FieldResolver::new(component).resolve(consumer)?;
        let injector = emitter::emit(consumer, component, &bindings);
        tracing::debug!(
            injector = %injector.qualified_name(),
            assignments = injector.assignments.len(),
            "emitted injector"
        );
        injectors.push(injector);
    }

    Ok(GenerationPlan { injectors })
}

/// Runs both phases over already scanned files.
pub fn run(files: Vec<DeclarationFile>) -> Result<GenerationPlan, GenError> {
    let registry = ComponentRegistry::build(files)?;
    plan(&registry)
}
