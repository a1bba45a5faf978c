use crate::codegen::model::fetch_returning;
use crate::util::{box_future, size_check, sqlite};
use proc_macro2::TokenStream;
use quote::quote;
use rowguard_attr::{ColumnMeta, TableMeta};
use syn::DeriveInput;

/// Columns with a database default become optional; `None` leaves them out of the INSERT.
fn defaults_to_database(c: &ColumnMeta) -> bool {
    c.default_value.is_some()
}

pub fn struct_InsertModel(ast: &DeriveInput, meta: &TableMeta) -> TokenStream {
    let Some(insert_model) = &meta.insert_struct else {
        return TokenStream::new();
    };
    let vis = &ast.vis;
    let extra_derives = meta
        .extra_derives
        .iter()
        .filter(|d| !matches!(d.as_str(), "Debug" | "Clone"));
    let struct_fields = meta.insertable_columns().map(|c| {
        let id = &c.ident;
        let ty = &c.ty;
        if defaults_to_database(c) && !c.ty.is_option() {
            quote! { pub #id: ::std::option::Option<#ty> }
        } else {
            quote! { pub #id: #ty }
        }
    });
    quote! {
        #[derive(Debug, Clone, #(#extra_derives,)*)]
        #vis struct #insert_model {
            #(#struct_fields,)*
        }
    }
}

pub fn impl_InsertModel(meta: &TableMeta) -> TokenStream {
    let Some(insert_model) = &meta.insert_struct else {
        return TokenStream::new();
    };
    let model = &meta.ident;
    let box_future = box_future();
    let db = sqlite();

    let size_checks = meta
        .insertable_columns()
        .filter(|c| c.size.is_some())
        .map(|c| {
            let id = &c.ident;
            size_check(c, quote! { &self.#id })
        })
        .collect::<Vec<_>>();
    let check_sizes = if size_checks.is_empty() {
        TokenStream::new()
    } else {
        quote! {
            let mut errors = ::rowguard::validate::ValidationErrors::new();
            #(#size_checks)*
            errors.into_result()?;
        }
    };

    let binds = meta.insertable_columns().map(|c| {
        let id = &c.ident;
        let name = &c.name;
        if defaults_to_database(c) {
            quote! {
                if let ::std::option::Option::Some(value) = self.#id {
                    columns.push(#name);
                    ::rowguard::Arguments::add(&mut arguments, value).map_err(::rowguard::SqlxError::Encode)?;
                }
            }
        } else {
            quote! {
                columns.push(#name);
                ::rowguard::Arguments::add(&mut arguments, self.#id).map_err(::rowguard::SqlxError::Encode)?;
            }
        }
    });
    let fetch = fetch_returning(quote! { ::rowguard::query_as_with::<_, #model, _>(&sql, arguments) });

    quote! {
        impl ::rowguard::model::Insertable for #insert_model {
            type Model = #model;

            fn insert<'e, E>(self, db: E) -> #box_future<'e, ::rowguard::Result<#model>>
            where
                E: 'e + ::rowguard::Executor<'e, Database = #db>,
            {
                Box::pin(async move {
                    #check_sizes
                    let mut columns: ::std::vec::Vec<&'static str> = ::std::vec::Vec::new();
                    let mut arguments = ::rowguard::sqlite::SqliteArguments::default();
                    #(#binds)*
                    let sql = ::rowguard::__private::statement::insert(
                        <#model as ::rowguard::model::TableMeta>::table_name(),
                        &columns,
                        <#model as ::rowguard::model::TableMeta>::table_columns(),
                    );
                    #fetch
                    Ok(model)
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extra_derives_skip_builtin() {
        let ast: DeriveInput = syn::parse_str(
            r#"
#[rowguard(insert = "InsertForm", extra_derives(Clone, PartialEq))]
pub struct Form {
    #[rowguard(primary_key, auto_increment)]
    pub id: i64,
    #[rowguard(default_value = "<NAME>")]
    pub name: String,
}
"#,
        )
        .unwrap();
        let meta = TableMeta::from_derive(&ast).unwrap();
        let code = struct_InsertModel(&ast, &meta).to_string();
        assert_eq!(code.matches("Clone").count(), 1, "{code}");
        assert_eq!(code.matches("PartialEq").count(), 1, "{code}");
        assert!(code.contains("Option < String >"), "{code}");
        assert!(!code.contains("pub id"));
    }
}
