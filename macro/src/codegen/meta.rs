use proc_macro2::TokenStream;
use quote::quote;
use rowguard_attr::{ColumnMeta, SqlKind, TableMeta};

fn sql_type(kind: SqlKind) -> TokenStream {
    match kind {
        SqlKind::Integer => quote!(::rowguard::schema::SqlType::Integer),
        SqlKind::Real => quote!(::rowguard::schema::SqlType::Real),
        SqlKind::Boolean => quote!(::rowguard::schema::SqlType::Boolean),
        SqlKind::Text => quote!(::rowguard::schema::SqlType::Text),
        SqlKind::Blob => quote!(::rowguard::schema::SqlType::Blob),
    }
}

fn column_def(meta: &TableMeta, c: &ColumnMeta) -> TokenStream {
    let name = &c.name;
    let ty = sql_type(c.kind);
    let mut def = quote! { ::rowguard::schema::ColumnDef::new(#name, #ty) };
    if c.name == meta.pkey {
        def = quote! { #def.primary_key() };
    }
    if c.auto_increment {
        def = quote! { #def.auto_increment() };
    }
    if c.nullable() {
        def = quote! { #def.nullable() };
    }
    if c.unique {
        def = quote! { #def.unique() };
    }
    if let Some(size) = c.size {
        def = quote! { #def.size(#size) };
    }
    if let Some(default) = &c.default_value {
        def = quote! { #def.default(#default) };
    }
    def
}

pub fn impl_TableMeta(meta: &TableMeta) -> TokenStream {
    let model = &meta.ident;
    let table_name = &meta.name;
    let pkey = &meta.pkey;
    let field_names = meta.columns.iter().map(|c| &c.name);
    let column_defs = meta.columns.iter().map(|c| column_def(meta, c));

    quote! {
        impl ::rowguard::model::TableMeta for #model {
            fn table_name() -> &'static str {
                #table_name
            }

            fn table_columns() -> &'static [&'static str] {
                &[#(#field_names,)*]
            }

            fn primary_key() -> &'static str {
                #pkey
            }

            fn column_defs() -> &'static [::rowguard::schema::ColumnDef] {
                const COLUMNS: &[::rowguard::schema::ColumnDef] = &[#(#column_defs,)*];
                COLUMNS
            }
        }
    }
}
