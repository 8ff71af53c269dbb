//! Compile-time preference injector derive for prefgen.
//!
//! `#[derive(Injector)]` runs the prefgen field resolver while the consumer
//! struct is being compiled. An unresolvable field becomes a compile error
//! on that field's type, so a broken injector can never be built.

use proc_macro::TokenStream;

mod injector;

/// Derive macro generating `<Struct>_Injector`.
///
/// Fields marked `#[inject_preference]` are resolved against the component
/// named in `#[injector(...)]`:
/// - a wrapper listed in `wrappers(...)` is fetched through the component
///   accessor named after its model, in snake_case
/// - `PreferenceComponent_<Component>` receives the singleton itself
///
/// Any other marked type fails the build.
///
/// # Example
///
/// ```ignore
/// use prefgen_macros::Injector;
///
/// #[derive(Injector)]
/// #[injector(
///     component = "crate::prefs::AppComponent",
///     wrappers(Preference_UserProfile, Preference_UserDevice)
/// )]
/// pub struct MainActivity {
///     #[inject_preference]
///     profile: Preference_UserProfile,
///     #[inject_preference]
///     component: PreferenceComponent_AppComponent,
///     title: String,
/// }
///
/// // Generated:
/// // pub struct MainActivity_Injector;
/// // impl MainActivity_Injector {
/// //     pub fn new(inject_object: &mut MainActivity) -> Self {
/// //         inject_object.profile =
/// //             crate::prefs::PreferenceComponent_AppComponent::get_instance().user_profile();
/// //         inject_object.component =
/// //             crate::prefs::PreferenceComponent_AppComponent::get_instance();
/// //         Self
/// //     }
/// // }
/// ```
#[proc_macro_derive(Injector, attributes(injector, inject_preference))]
pub fn derive_injector(input: TokenStream) -> TokenStream {
    injector::derive_injector_impl(input)
}
