use proc_macro2::TokenStream;
use quote::quote;
use rowguard_attr::TableMeta;

pub fn impl_FromRow(meta: &TableMeta) -> TokenStream {
    let model = &meta.ident;
    let fields = meta.columns.iter().map(|c| {
        let id = &c.ident;
        let name = &c.name;
        quote! {
            #id: ::rowguard::Row::try_get(row, #name)?
        }
    });

    quote! {
        impl<'r> ::rowguard::FromRow<'r, ::rowguard::sqlite::SqliteRow> for #model {
            fn from_row(row: &'r ::rowguard::sqlite::SqliteRow) -> ::std::result::Result<Self, ::rowguard::SqlxError> {
                ::std::result::Result::Ok(Self {
                    #(#fields,)*
                })
            }
        }
    }
}
