//! Pest parser turning declaration text into descriptors.

use std::path::Path;

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

use crate::error::GenError;
use crate::model::{ComponentDeclaration, ConsumerClass, FieldDecl};
use crate::naming;

use super::{ComponentEntry, DeclarationFile, INJECT_MARKER};

#[derive(Parser)]
#[grammar = "scan/prefs.pest"]
struct DeclarationParser;

/// Parses one declaration file.
///
/// `path` is only used for error messages and recorded on the result.
pub fn parse_declarations(path: &Path, source: &str) -> Result<DeclarationFile, GenError> {
    let file = DeclarationParser::parse(Rule::File, source)
        .map_err(|e| GenError::Parse {
            path: path.to_path_buf(),
            message: e.with_path(&path.display().to_string()).to_string(),
        })?
        .next()
        .ok_or_else(|| GenError::Parse {
            path: path.to_path_buf(),
            message: "empty parse tree".to_string(),
        })?;

    let mut result = DeclarationFile {
        path: path.to_path_buf(),
        package: String::new(),
        components: Vec::new(),
        classes: Vec::new(),
    };

    for pair in file.into_inner() {
        match pair.as_rule() {
            Rule::PackageDecl => {
                result.package = first_inner_str(pair);
            }
            Rule::Component => {
                let entry = parse_component(pair, &result.package)?;
                result.components.push(entry);
            }
            Rule::Class => {
                result.classes.push(parse_class(pair, &result.package));
            }
            _ => {}
        }
    }

    Ok(result)
}

fn parse_component(pair: Pair<Rule>, package: &str) -> Result<ComponentEntry, GenError> {
    let mut inner = pair.into_inner();
    let name = inner.next().map(|p| p.as_str()).unwrap_or_default();

    let mut builder = ComponentDeclaration::builder(package, name);
    let mut injects = Vec::new();

    for entry in inner {
        match entry.as_rule() {
            Rule::Entities => {
                for wrapper in entry.into_inner() {
                    builder = builder.wrapper(naming::simple_name(wrapper.as_str()));
                }
            }
            Rule::Inject => {
                for target in entry.into_inner() {
                    injects.push(qualify_target(package, target.as_str()));
                }
            }
            _ => {}
        }
    }

    Ok(ComponentEntry {
        component: builder.build()?,
        injects,
    })
}

fn parse_class(pair: Pair<Rule>, package: &str) -> ConsumerClass {
    let mut inner = pair.into_inner();
    let name = inner.next().map(|p| p.as_str()).unwrap_or_default();

    inner
        .filter(|p| p.as_rule() == Rule::Field)
        .map(parse_field)
        .fold(ConsumerClass::new(package, name), ConsumerClass::with_field)
}

fn parse_field(pair: Pair<Rule>) -> FieldDecl {
    let mut injected = false;
    let mut declared_type = String::new();
    let mut name = String::new();

    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::Annotation => {
                let annotation = first_inner_str(inner);
                if naming::simple_name(&annotation) == INJECT_MARKER {
                    injected = true;
                }
            }
            Rule::TypeName => {
                declared_type = inner.as_str().trim().to_string();
            }
            Rule::Identifier => {
                name = inner.as_str().to_string();
            }
            _ => {}
        }
    }

    FieldDecl {
        name,
        declared_type,
        injected,
    }
}

/// Inject targets written without a package refer to the component's package.
fn qualify_target(package: &str, target: &str) -> String {
    if target.contains(naming::PACKAGE_SEPARATOR) {
        target.to_string()
    } else {
        naming::qualify(package, target)
    }
}

fn first_inner_str(pair: Pair<Rule>) -> String {
    pair.into_inner()
        .next()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default()
}
