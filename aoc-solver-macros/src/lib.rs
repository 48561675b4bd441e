//! `#[derive(AocSolver)]` and `#[derive(AutoRegisterSolver)]` for `aoc_solver`

use proc_macro::TokenStream;
use proc_macro2::Literal;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::punctuated::Punctuated;
use syn::{Attribute, DeriveInput, LitInt, LitStr, Token, parse_macro_input};

/// Implements `Solver` by routing each part to its `PartSolver<N>`
///
/// `#[aoc_solver(max_parts = N)]` sets `PARTS` and requires
/// `PartSolver<1>` through `PartSolver<N>`. Any other part answers
/// `SolveError::PartNotImplemented`.
///
/// ```ignore
/// #[derive(AocSolver)]
/// #[aoc_solver(max_parts = 2)]
/// struct Registers;
///
/// impl AocParser for Registers { /* .. */ }
/// impl PartSolver<1> for Registers { /* .. */ }
/// impl PartSolver<2> for Registers { /* .. */ }
/// ```
#[proc_macro_derive(AocSolver, attributes(aoc_solver))]
pub fn derive_aoc_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_aoc_solver(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_aoc_solver(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let attr = find_attr(input, "aoc_solver", "AocSolver requires #[aoc_solver(max_parts = N)]")?;

    let mut max_parts = None::<u8>;
    attr.parse_nested_meta(|meta| {
        if !meta.path.is_ident("max_parts") {
            return Err(meta.error("expected `max_parts`"));
        }
        max_parts = Some(meta.value()?.parse::<LitInt>()?.base10_parse()?);
        Ok(())
    })?;

    let max_parts = match max_parts {
        Some(0) => return Err(syn::Error::new_spanned(attr, "`max_parts` must be at least 1")),
        Some(n) => n,
        None => return Err(syn::Error::new_spanned(attr, "missing `max_parts`")),
    };

    let arms = (1..=max_parts).map(|part| {
        let part = Literal::u8_unsuffixed(part);
        quote! {
            #part => <Self as ::aoc_solver::PartSolver<#part>>::solve(shared),
        }
    });
    let parts = Literal::u8_unsuffixed(max_parts);

    Ok(quote! {
        impl #impl_generics ::aoc_solver::Solver for #name #ty_generics #where_clause {
            const PARTS: u8 = #parts;

            fn solve_part(
                shared: &mut <Self as ::aoc_solver::AocParser>::SharedData<'_>,
                part: u8,
            ) -> ::core::result::Result<::std::string::String, ::aoc_solver::SolveError> {
                match part {
                    #(#arms)*
                    _ => ::core::result::Result::Err(
                        ::aoc_solver::SolveError::PartNotImplemented(part),
                    ),
                }
            }
        }
    })
}

/// Submits a `SolverPlugin` for the type to `inventory`
///
/// `#[aoc(year = Y, day = D, tags = ["..", ..])]` names the slot; `tags`
/// may be left out. The type must implement `Solver`, usually through
/// `#[derive(AocSolver)]` next to this derive.
///
/// ```ignore
/// #[derive(AocSolver, AutoRegisterSolver)]
/// #[aoc_solver(max_parts = 2)]
/// #[aoc(year = 2017, day = 12, tags = ["2017", "graph"])]
/// struct Plumber;
/// ```
#[proc_macro_derive(AutoRegisterSolver, attributes(aoc))]
pub fn derive_auto_register_solver(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_auto_register(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// `["a", "b", ..]` after `tags =`
fn parse_tags(meta: &ParseNestedMeta) -> syn::Result<Vec<String>> {
    let content;
    let value = meta.value()?;
    syn::bracketed!(content in value);
    let tags = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
    Ok(tags.iter().map(LitStr::value).collect())
}

fn expand_auto_register(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let attr = find_attr(input, "aoc", "AutoRegisterSolver requires #[aoc(year = Y, day = D)]")?;

    let (mut year, mut day, mut tags) = (None::<u16>, None::<u8>, Vec::new());
    attr.parse_nested_meta(|meta| {
        if meta.path.is_ident("year") {
            year = Some(meta.value()?.parse::<LitInt>()?.base10_parse()?);
        } else if meta.path.is_ident("day") {
            day = Some(meta.value()?.parse::<LitInt>()?.base10_parse()?);
        } else if meta.path.is_ident("tags") {
            tags = parse_tags(&meta)?;
        } else {
            return Err(meta.error("expected `year`, `day` or `tags`"));
        }
        Ok(())
    })?;

    let year = year.ok_or_else(|| syn::Error::new_spanned(attr, "missing `year`"))?;
    let day = match day {
        Some(day @ 1..=25) => day,
        Some(_) => return Err(syn::Error::new_spanned(attr, "`day` must be in 1..=25")),
        None => return Err(syn::Error::new_spanned(attr, "missing `day`")),
    };
    let year = Literal::u16_unsuffixed(year);
    let day = Literal::u8_unsuffixed(day);

    Ok(quote! {
        const _: () = {
            fn registered_type_implements_solver<S: ::aoc_solver::Solver>() {}
            let _ = registered_type_implements_solver::<#name>;
        };

        ::aoc_solver::inventory::submit! {
            ::aoc_solver::SolverPlugin {
                year: #year,
                day: #day,
                solver: &#name,
                tags: &[#(#tags),*],
            }
        }
    })
}

fn find_attr<'a>(
    input: &'a DeriveInput,
    ident: &str,
    missing: &str,
) -> syn::Result<&'a Attribute> {
    input
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident(ident))
        .ok_or_else(|| syn::Error::new_spanned(&input.ident, missing))
}
