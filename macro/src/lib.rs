#![allow(non_snake_case)]

use proc_macro::TokenStream;
use quote::quote;
use rowguard_attr::{TableMeta, ValidateMeta};
use syn::{parse_macro_input, DeriveInput};

mod codegen;
mod util;

/// Derive macro for `#[derive(Validate)]`. Reads `#[validate(...)]` on the struct and its fields.
#[proc_macro_derive(Validate, attributes(validate))]
pub fn expand_validate(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    let meta = match ValidateMeta::from_derive(&ast) {
        Ok(meta) => meta,
        Err(e) => return e.to_compile_error().into(),
    };
    codegen::validate::impl_Validate(&ast, &meta).into()
}

/// Derive macro for `#[derive(Model)]`. It additionally generates FromRow for the struct, since
/// Model requires FromRow.
#[proc_macro_derive(Model, attributes(rowguard))]
pub fn expand_model(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    if !ast.generics.params.is_empty() {
        return syn::Error::new_spanned(&ast.generics, "#[derive(Model)] doesn't support generic structs")
            .to_compile_error()
            .into();
    }
    let meta = match TableMeta::from_derive(&ast) {
        Ok(meta) => meta,
        Err(e) => return e.to_compile_error().into(),
    };

    let impl_TableMeta = codegen::meta::impl_TableMeta(&meta);
    let impl_FromRow = codegen::from_row::impl_FromRow(&meta);
    let impl_Model = codegen::model::impl_Model(&meta);
    let impl_unique_finders = codegen::model::impl_unique_finders(&ast, &meta);
    let struct_InsertModel = codegen::insert_model::struct_InsertModel(&ast, &meta);
    let impl_InsertModel = codegen::insert_model::impl_InsertModel(&meta);

    TokenStream::from(quote! {
        #impl_TableMeta
        #impl_FromRow
        #impl_Model
        #impl_unique_finders

        #struct_InsertModel
        #impl_InsertModel
    })
}
