use proc_macro2::TokenStream;
use quote::quote;
use rowguard_attr::ColumnMeta;

pub fn box_future() -> TokenStream {
    quote!(::rowguard::BoxFuture)
}

pub fn sqlite() -> TokenStream {
    quote!(::rowguard::sqlite::Sqlite)
}

/// Pushes a `MaxLength` violation onto `errors` when `value` is longer than the column allows.
pub fn size_check(column: &ColumnMeta, value: TokenStream) -> TokenStream {
    let Some(size) = column.size else {
        return TokenStream::new();
    };
    let name = &column.name;
    quote! {
        if !::rowguard::validate::check_max_length(#value, #size) {
            errors.push(::rowguard::validate::Violation::new(
                #name,
                ::rowguard::validate::Rule::MaxLength { max: #size },
            ));
        }
    }
}
