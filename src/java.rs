//! Java source rendering of injector classes.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::JavaConfig;
use crate::emitter::InjectorClass;
use crate::error::GenError;
use crate::naming;
use crate::pipeline::GenerationPlan;

/// Renders one injector as a Java compilation unit.
pub fn render(injector: &InjectorClass, options: &JavaConfig) -> String {
    let indent = &options.indent;
    let mut out = String::new();

    if !injector.package_name.is_empty() {
        let _ = writeln!(out, "package {};\n", injector.package_name);
    }

    let imports = imports(injector, options);
    for import in &imports {
        let _ = writeln!(out, "import {};", import);
    }
    if !imports.is_empty() {
        out.push('\n');
    }

    if !options.javadoc.is_empty() {
        out.push_str("/**\n");
        for line in options.javadoc.lines() {
            let _ = writeln!(out, " * {}", line.replace("*/", "*&#47;"));
        }
        out.push_str(" */\n");
    }

    let annotation = if options.non_null_annotation.is_empty() {
        String::new()
    } else {
        format!("@{} ", naming::simple_name(&options.non_null_annotation))
    };

    let _ = writeln!(out, "public class {} {{", injector.name);
    let _ = writeln!(
        out,
        "{}public {}({}{} {}) {{",
        indent,
        injector.name,
        annotation,
        injector.parameter.simple,
        naming::INJECT_OBJECT
    );
    for assignment in &injector.assignments {
        let _ = writeln!(
            out,
            "{}{}{}.{};",
            indent,
            indent,
            naming::INJECT_OBJECT,
            assignment
        );
    }
    let _ = writeln!(out, "{}}}", indent);
    out.push_str("}\n");

    out
}

/// Types referenced by simple name that live outside the injector's package.
fn imports(injector: &InjectorClass, options: &JavaConfig) -> BTreeSet<String> {
    let mut imports = BTreeSet::new();

    let (annotation_package, _) = naming::split_qualified(&options.non_null_annotation);
    if !annotation_package.is_empty() && annotation_package != injector.package_name {
        imports.insert(options.non_null_annotation.clone());
    }

    let component = &injector.component;
    if !component.package.is_empty() && component.package != injector.package_name {
        imports.insert(component.qualified());
    }

    imports
}

/// Path of the generated file below `out_dir`.
pub fn source_path(out_dir: &Path, injector: &InjectorClass) -> PathBuf {
    let mut path = out_dir.to_path_buf();
    if !injector.package_name.is_empty() {
        path.extend(injector.package_name.split(naming::PACKAGE_SEPARATOR));
    }
    path.join(format!("{}.java", injector.name))
}

/// Writes every injector of a completed plan, returning the written paths.
///
/// On an I/O error the files written so far are removed again.
pub fn write_plan(
    plan: &GenerationPlan,
    out_dir: &Path,
    options: &JavaConfig,
) -> Result<Vec<PathBuf>, GenError> {
    let sources: Vec<(PathBuf, String)> = plan
        .injectors
        .iter()
        .map(|injector| (source_path(out_dir, injector), render(injector, options)))
        .collect();

    let mut written = Vec::with_capacity(sources.len());
    for (path, source) in sources {
        if let Err(e) = write_source(&path, &source) {
            tracing::error!("Failed to write {}: {}", path.display(), e);
            remove_written(&written);
            return Err(e.into());
        }
        tracing::debug!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

fn write_source(path: &Path, source: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, source)
}

/// Best-effort rollback of a partially written plan.
fn remove_written(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            tracing::warn!("Could not remove {}: {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emitter::emit;
    use crate::model::{ComponentDeclaration, ConsumerClass, FieldDecl};
    use crate::resolver::FieldResolver;

    fn injector(component_package: &str, consumer: ConsumerClass) -> InjectorClass {
        let component =
            ComponentDeclaration::new(component_package, "Foo", ["Preference_Bar"]).unwrap();
        let bindings = FieldResolver::new(&component).resolve(&consumer).unwrap();
        emit(&consumer, &component, &bindings)
    }

    #[test]
    fn test_render_full_injector() {
        let consumer = ConsumerClass::new("app", "Baz")
            .with_field(FieldDecl::injected("bar", "pkg.Preference_Bar"))
            .with_field(FieldDecl::injected("component", "PreferenceComponent_Foo"));

        let source = render(&injector("pkg", consumer), &JavaConfig::default());

        let expected = "\
package app;

import android.support.annotation.NonNull;
import pkg.PreferenceComponent_Foo;

/**
 * Generated by PreferenceRoom. (https://github.com/skydoves/PreferenceRoom).
 */
public class Baz_Injector {
  public Baz_Injector(@NonNull Baz injectObject) {
    injectObject.bar = PreferenceComponent_Foo.getInstance().Bar();
    injectObject.component = PreferenceComponent_Foo.getInstance();
  }
}
";
        assert_eq!(source, expected);
    }

    #[test]
    fn test_render_same_package_without_annotation() {
        let options = JavaConfig {
            javadoc: String::new(),
            non_null_annotation: String::new(),
            indent: "    ".to_string(),
        };
        let source = render(&injector("app", ConsumerClass::new("app", "Baz")), &options);

        let expected = "\
package app;

public class Baz_Injector {
    public Baz_Injector(Baz injectObject) {
    }
}
";
        assert_eq!(source, expected);
    }

    #[test]
    fn test_render_unnamed_package() {
        let source = render(
            &injector("", ConsumerClass::new("", "Baz")),
            &JavaConfig::default(),
        );
        assert!(source.starts_with("import android.support.annotation.NonNull;\n\n/**"));
        assert!(!source.contains("package"));
    }

    #[test]
    fn test_render_escapes_comment_terminator_in_javadoc() {
        let options = JavaConfig {
            javadoc: "Generated */ class Evil {}\nsecond line".to_string(),
            ..JavaConfig::default()
        };
        let source = render(&injector("app", ConsumerClass::new("app", "Baz")), &options);

        assert!(source.contains("/**\n * Generated *&#47; class Evil {}\n * second line\n */\n"));
        assert_eq!(source.matches("*/").count(), 1);
    }

    #[test]
    fn test_write_plan_removes_files_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        fs::create_dir_all(&out).unwrap();
        // A file where the second injector's package directory should go.
        fs::write(out.join("com"), "").unwrap();

        let plan = GenerationPlan {
            injectors: vec![
                injector("pkg", ConsumerClass::new("app", "Baz")),
                injector("pkg", ConsumerClass::new("com.example", "Qux")),
            ],
        };

        let err = write_plan(&plan, &out, &JavaConfig::default()).unwrap_err();
        assert!(matches!(err, GenError::Io(_)));
        assert!(!out.join("app/Baz_Injector.java").exists());
    }

    #[test]
    fn test_source_path() {
        let path = source_path(
            Path::new("out"),
            &injector("pkg", ConsumerClass::new("com.example", "Baz")),
        );
        assert_eq!(path, Path::new("out/com/example/Baz_Injector.java"));
    }
}
