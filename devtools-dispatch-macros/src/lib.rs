//! Procedural macros for devtools-dispatch

use darling::{FromDeriveInput, FromVariant};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use std::collections::HashMap;
use syn::{parse_macro_input, DeriveInput};

/// Container-level attributes for #[derive(Action)]
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(action), supports(enum_any))]
struct ActionOpts {
    ident: syn::Ident,
    generics: syn::Generics,
    data: darling::ast::Data<ActionVariant, ()>,

    /// Also implement `ActionSummary` with its default `Debug` rendering
    #[darling(default)]
    summary: bool,
}

/// Variant-level attributes
#[derive(Debug, FromVariant)]
#[darling(attributes(action))]
struct ActionVariant {
    ident: syn::Ident,
    fields: darling::ast::Fields<()>,

    /// Explicit tag override
    #[darling(default)]
    tag: Option<String>,
}

/// Convert PascalCase to SCREAMING_SNAKE_CASE
///
/// Runs of capitals stay together: `ReloadURLList` -> `RELOAD_URL_LIST`.
fn to_screaming_snake(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut result = String::with_capacity(s.len() + 4);

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_lower)
            {
                result.push('_');
            }
        }
        result.extend(ch.to_uppercase());
    }
    result
}

fn variant_pattern(name: &syn::Ident, variant: &ActionVariant) -> TokenStream2 {
    let variant_name = &variant.ident;
    match &variant.fields.style {
        darling::ast::Style::Unit => quote! { #name::#variant_name },
        darling::ast::Style::Tuple => quote! { #name::#variant_name(..) },
        darling::ast::Style::Struct => quote! { #name::#variant_name { .. } },
    }
}

/// Derive macro for the Action trait
///
/// Generates a `name()` method that returns the variant's tag: the variant
/// name in SCREAMING_SNAKE_CASE, unless overridden with
/// `#[action(tag = "...")]`. Tags must be unique within the enum.
///
/// With `#[action(summary)]` on the enum, also implements `ActionSummary`
/// using its default `Debug` rendering.
///
/// # Example
/// ```ignore
/// #[derive(Action, Clone, Debug)]
/// #[action(summary)]
/// enum Action {
///     RequestTabsStart,
///     RequestTabsSuccess { tabs: Vec<Tab> },
///     #[action(tag = "PAGE_SELECTED")]
///     SelectPage(Page),
/// }
///
/// assert_eq!(Action::RequestTabsStart.name(), "REQUEST_TABS_START");
/// assert_eq!(Action::SelectPage(Page::Connect).name(), "PAGE_SELECTED");
/// ```
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let opts = match ActionOpts::from_derive_input(&input) {
        Ok(opts) => opts,
        Err(e) => return e.write_errors().into(),
    };

    let name = &opts.ident;
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    let variants = match &opts.data {
        darling::ast::Data::Enum(variants) => variants,
        _ => {
            return syn::Error::new_spanned(&input, "Action can only be derived for enums")
                .to_compile_error()
                .into();
        }
    };

    let mut seen: HashMap<String, &syn::Ident> = HashMap::new();
    let mut name_arms = Vec::with_capacity(variants.len());

    for v in variants.iter() {
        let tag = v
            .tag
            .clone()
            .unwrap_or_else(|| to_screaming_snake(&v.ident.to_string()));

        if let Some(first) = seen.insert(tag.clone(), &v.ident) {
            let message = format!("action tag `{}` is already used by `{}`", tag, first);
            return syn::Error::new_spanned(&v.ident, message)
                .to_compile_error()
                .into();
        }

        let pattern = variant_pattern(name, v);
        name_arms.push(quote! { #pattern => #tag });
    }

    let name_body = if name_arms.is_empty() {
        quote! { match *self {} }
    } else {
        quote! {
            match self {
                #(#name_arms),*
            }
        }
    };

    let mut expanded = quote! {
        impl #impl_generics ::devtools_dispatch::Action for #name #ty_generics #where_clause {
            fn name(&self) -> &'static str {
                #name_body
            }
        }
    };

    if opts.summary {
        expanded.extend(quote! {
            impl #impl_generics ::devtools_dispatch::ActionSummary for #name #ty_generics #where_clause {}
        });
    }

    TokenStream::from(expanded)
}
