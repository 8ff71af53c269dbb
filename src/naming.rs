//! Naming conventions shared with the wrapper and component generators.
//!
//! These names are a compatibility contract: the wrapper generator emits
//! `Preference_<Model>`, the component generator emits
//! `PreferenceComponent_<Component>` with a `getInstance()` singleton accessor
//! and one accessor per wrapper, and the injector generator emits
//! `<Consumer>_Injector`.

/// Prefix of every generated preference wrapper class.
pub const WRAPPER_PREFIX: &str = "Preference_";

/// Prefix of every generated component singleton class.
pub const COMPONENT_PREFIX: &str = "PreferenceComponent_";

/// Suffix appended to a consumer's simple name to name its injector.
pub const INJECTOR_SUFFIX: &str = "_Injector";

/// Static accessor returning the component singleton.
pub const SINGLETON_ACCESSOR: &str = "getInstance";

/// Name of the injector constructor parameter.
pub const INJECT_OBJECT: &str = "injectObject";

/// Separator between package segments in qualified type names.
pub const PACKAGE_SEPARATOR: char = '.';

/// Returns the simple name of a possibly qualified type name.
///
/// `com.example.Preference_User` and `Preference_User` both yield
/// `Preference_User`.
pub fn simple_name(type_name: &str) -> &str {
    type_name
        .rsplit(PACKAGE_SEPARATOR)
        .next()
        .unwrap_or(type_name)
}

/// Splits a qualified name into `(package, simple_name)`.
///
/// The package is empty for unqualified names.
pub fn split_qualified(type_name: &str) -> (&str, &str) {
    match type_name.rfind(PACKAGE_SEPARATOR) {
        Some(idx) => (&type_name[..idx], &type_name[idx + 1..]),
        None => ("", type_name),
    }
}

/// Joins a package and a simple name, leaving unnamed-package names bare.
pub fn qualify(package: &str, simple: &str) -> String {
    if package.is_empty() {
        simple.to_string()
    } else {
        format!("{}{}{}", package, PACKAGE_SEPARATOR, simple)
    }
}

/// Singleton class name for a component: `PreferenceComponent_<Component>`.
pub fn component_singleton_name(component: &str) -> String {
    format!("{}{}", COMPONENT_PREFIX, component)
}

/// Injector class name for a consumer: `<Consumer>_Injector`.
pub fn injector_name(consumer: &str) -> String {
    format!("{}{}", consumer, INJECTOR_SUFFIX)
}

/// Component accessor method for a wrapper: the wrapper name minus its prefix.
///
/// Returns `None` when the name does not carry the wrapper prefix.
pub fn wrapper_accessor(wrapper: &str) -> Option<&str> {
    wrapper
        .strip_prefix(WRAPPER_PREFIX)
        .filter(|accessor| !accessor.is_empty())
}
