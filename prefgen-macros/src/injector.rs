//! Implementation of #[derive(Injector)] proc-macro.

use prefgen::model::{ComponentDeclaration, ConsumerClass, FieldDecl};
use prefgen::{emit, FieldResolver, GenError};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields, Ident, Path, Type};

/// Field attribute marking an injection target.
const MARKER: &str = "inject_preference";

pub fn derive_injector_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Parsed `#[injector(component = "...", wrappers(...))]`.
struct InjectorArgs {
    component: Path,
    wrappers: Vec<Ident>,
}

pub(crate) fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let vis = &input.vis;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields: Vec<&Field> = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => fields.named.iter().collect(),
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Injector can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Injector can only be derived for structs",
            ));
        }
    };

    let args = parse_injector_args(input)?;
    let component = component_declaration(&args)?;

    let consumer = fields
        .iter()
        .map(|field| FieldDecl {
            name: field_name(field),
            declared_type: declared_type(&field.ty),
            injected: field.attrs.iter().any(|a| a.path().is_ident(MARKER)),
        })
        .fold(
            ConsumerClass::new("", name.to_string()),
            ConsumerClass::with_field,
        );

    let bindings = FieldResolver::new(&component)
        .resolve(&consumer)
        .map_err(|err| resolution_error(err, &fields, input))?;
    let injector = emit(&consumer, &component, &bindings);

    let injector_ident = format_ident!("{}", injector.name);
    let singleton = singleton_path(&args.component, &component.singleton_name());

    let assignments = injector.assignments.iter().map(|assignment| {
        let field = fields
            .iter()
            .find(|f| field_name(f) == assignment.field)
            .and_then(|f| f.ident.clone())
            .unwrap_or_else(|| format_ident!("{}", assignment.field));

        match &assignment.source.accessor {
            Some(accessor) => {
                let accessor = format_ident!("{}", snake_case(accessor));
                quote! {
                    inject_object.#field = #singleton::get_instance().#accessor();
                }
            }
            None => quote! {
                inject_object.#field = #singleton::get_instance();
            },
        }
    });

    Ok(quote! {
        #[allow(non_camel_case_types)]
        #vis struct #injector_ident;

        impl #injector_ident {
            /// Populates every `#[inject_preference]` field of `inject_object`.
            #[allow(unused_variables)]
            #vis fn new #impl_generics (inject_object: &mut #name #ty_generics) -> Self #where_clause {
                #(#assignments)*
                Self
            }
        }
    })
}

fn parse_injector_args(input: &DeriveInput) -> syn::Result<InjectorArgs> {
    let attr = input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("injector"))
        .ok_or_else(|| {
            syn::Error::new_spanned(
                &input.ident,
                "missing #[injector(component = \"path::To::Component\")] attribute",
            )
        })?;

    let mut component: Option<Path> = None;
    let mut wrappers = Vec::new();

    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("component") {
            let value: syn::LitStr = meta.value()?.parse()?;
            component = Some(value.parse()?);
            Ok(())
        } else if meta.path.is_ident("wrappers") {
            meta.parse_nested_meta(|wrapper| {
                let ident = wrapper
                    .path
                    .get_ident()
                    .ok_or_else(|| wrapper.error("expected a wrapper type name"))?;
                wrappers.push(ident.clone());
                Ok(())
            })
        } else {
            Err(meta.error("unsupported injector attribute, expected `component` or `wrappers`"))
        }
    })?;

    let component = component
        .ok_or_else(|| syn::Error::new_spanned(attr, "injector attribute requires `component`"))?;

    Ok(InjectorArgs {
        component,
        wrappers,
    })
}

/// `a::b::Component` becomes a declaration of `Component` in package `a.b`.
fn component_declaration(args: &InjectorArgs) -> syn::Result<ComponentDeclaration> {
    let mut segments: Vec<String> = args
        .component
        .segments
        .iter()
        .map(|s| s.ident.to_string())
        .collect();
    let class_name = segments.pop().unwrap_or_default();

    ComponentDeclaration::new(
        segments.join("."),
        class_name,
        args.wrappers.iter().map(ToString::to_string),
    )
    .map_err(|err| syn::Error::new_spanned(&args.component, err.to_string()))
}

/// The component path with its last segment replaced by the singleton name.
fn singleton_path(component: &Path, singleton: &str) -> Path {
    let mut path = component.clone();
    if let Some(last) = path.segments.last_mut() {
        last.ident = Ident::new(singleton, last.ident.span());
    }
    path
}

fn field_name(field: &Field) -> String {
    field
        .ident
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_default()
}

/// Path types are written with `.` separators so the resolver sees the same
/// qualified form as a declaration file would give it.
fn declared_type(ty: &Type) -> String {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path
            .path
            .segments
            .iter()
            .map(|s| s.ident.to_string())
            .collect::<Vec<_>>()
            .join("."),
        other => quote!(#other).to_string(),
    }
}

/// Points resolution failures at the offending field's type.
fn resolution_error(err: GenError, fields: &[&Field], input: &DeriveInput) -> syn::Error {
    let message = err.to_string();
    match &err {
        GenError::UnresolvableInjectionTarget { field, .. } => {
            match fields.iter().find(|f| field_name(f) == *field) {
                Some(f) => syn::Error::new_spanned(&f.ty, message),
                None => syn::Error::new_spanned(&input.ident, message),
            }
        }
        _ => syn::Error::new_spanned(&input.ident, message),
    }
}

/// `UserProfile` -> `user_profile`, `URLCache` -> `url_cache`.
fn snake_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() {
            let prev = i.checked_sub(1).map(|p| chars[p]);
            let next = chars.get(i + 1).copied();
            let boundary = match prev {
                Some(p) if p == '_' => false,
                Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
                Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
                _ => false,
            };
            if boundary {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    out
}
