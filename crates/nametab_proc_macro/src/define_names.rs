use std::collections::HashSet;

use proc_macro::TokenStream;
use proc_macro2::Span;
use proc_macro_crate::{FoundCrate, crate_name};
use quote::quote;
use syn::{Expr, ExprLit, Ident, Lit, Member};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Group {
    Names,
    Constants,
}

struct Entry {
    group: Group,
    ident: Ident,
    text: String,
}

fn core_path() -> proc_macro2::TokenStream {
    match crate_name("nametab_core") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident::name_ref)
        }
        // invoked from within nametab_core itself
        Ok(FoundCrate::Itself) | Err(_) => quote!(crate::name_ref),
    }
}

pub fn define_names_impl(tt: TokenStream) -> TokenStream {
    let Expr::Array(arr) = syn::parse_macro_input!(tt as syn::Expr) else {
        panic!("must be an array");
    };

    let mut entries = Vec::new();

    for expr in arr.elems {
        let Expr::Struct(strukt) = expr else {
            panic!("must be a struct")
        };

        let Some(segment) = strukt.path.segments.last() else {
            panic!("name group must be named")
        };

        let group = match segment.ident.to_string().as_ref() {
            "Names" => Group::Names,
            "Constants" => Group::Constants,
            other => panic!("unknown name group: {}", other),
        };

        for field in strukt.fields {
            let Member::Named(ident) = field.member else {
                panic!("name entries must be named")
            };

            let text = if let Expr::Lit(ExprLit {
                lit: Lit::Str(string), ..
            }) = field.expr
            {
                // alias, e.g. `self_: "<self>"`
                string.value()
            } else {
                ident.to_string()
            };

            entries.push(Entry { group, ident, text });
        }
    }

    let mut rust_idents = HashSet::new();
    let mut name_texts = HashSet::new();
    let mut constant_texts = HashSet::new();
    for entry in &entries {
        if !rust_idents.insert(entry.ident.to_string()) {
            panic!("duplicate rust ident: {}", entry.ident);
        }
        let texts = match entry.group {
            Group::Names => &mut name_texts,
            Group::Constants => &mut constant_texts,
        };
        if !texts.insert(entry.text.clone()) {
            panic!("duplicate {:?} text: {:?}", entry.group, entry.text);
        }
    }

    // utf8 names come first, in declaration order. constants whose text was not declared
    // as a plain name get an anonymous utf8 slot appended after them.
    let mut utf8_texts: Vec<String> = entries
        .iter()
        .filter(|e| e.group == Group::Names)
        .map(|e| e.text.clone())
        .collect();

    let path = core_path();

    let mut consts = proc_macro2::TokenStream::new();
    let mut utf8_index = 0u32;
    for entry in entries.iter().filter(|e| e.group == Group::Names) {
        let ident = &entry.ident;
        consts.extend(quote! {
            pub const #ident: #path::NameRef = #path::NameRef::from_parts(#path::NameKind::Utf8, #utf8_index);
        });
        utf8_index += 1;
    }

    let mut constant_originals = proc_macro2::TokenStream::new();
    let mut constant_index = 0u32;
    for entry in entries.iter().filter(|e| e.group == Group::Constants) {
        let original = match utf8_texts.iter().position(|t| *t == entry.text) {
            Some(position) => position as u32,
            None => {
                utf8_texts.push(entry.text.clone());
                (utf8_texts.len() - 1) as u32
            }
        };

        let ident = &entry.ident;
        consts.extend(quote! {
            pub const #ident: #path::NameRef = #path::NameRef::from_parts(#path::NameKind::Constant, #constant_index);
        });
        constant_originals.extend(quote! {
            #path::NameRef::from_parts(#path::NameKind::Utf8, #original),
        });
        constant_index += 1;
    }

    let utf8_array = utf8_texts.iter().map(|t| quote!(#t,)).collect::<proc_macro2::TokenStream>();

    quote! {
        #consts

        pub const PREINTERNED_UTF8: &[&str] = &[
            #utf8_array
        ];

        pub const PREINTERNED_CONSTANTS: &[#path::NameRef] = &[
            #constant_originals
        ];
    }
    .into()
}
