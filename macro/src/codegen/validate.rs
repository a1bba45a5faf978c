use proc_macro2::TokenStream;
use quote::quote;
use rowguard_attr::{FieldRules, ValidateMeta};
use syn::DeriveInput;

fn opt_i64(v: Option<i64>) -> TokenStream {
    match v {
        Some(v) => quote! { ::std::option::Option::Some(#v) },
        None => quote! { ::std::option::Option::None },
    }
}

/// `(failure condition, rule)` pairs for one field, in the order they're checked.
fn field_checks(f: &FieldRules) -> Vec<(TokenStream, TokenStream)> {
    let id = &f.ident;
    let mut checks = Vec::new();
    if f.required {
        checks.push((
            quote! { !::rowguard::validate::check_required(&self.#id) },
            quote! { ::rowguard::validate::Rule::Required },
        ));
    }
    if !f.one_of.is_empty() {
        let allowed = &f.one_of;
        checks.push((
            quote! { !::rowguard::validate::check_one_of(&self.#id, &[#(#allowed),*]) },
            quote! { ::rowguard::validate::Rule::OneOf { allowed: &[#(#allowed),*] } },
        ));
    }
    if f.has_range() {
        let min = opt_i64(f.min);
        let max = opt_i64(f.max);
        checks.push((
            quote! { !::rowguard::validate::check_range(&self.#id, #min, #max) },
            quote! { ::rowguard::validate::Rule::Range { min: #min, max: #max } },
        ));
    }
    if let Some(max) = f.max_length {
        checks.push((
            quote! { !::rowguard::validate::check_max_length(&self.#id, #max) },
            quote! { ::rowguard::validate::Rule::MaxLength { max: #max } },
        ));
    }
    checks
}

pub fn impl_Validate(ast: &DeriveInput, meta: &ValidateMeta) -> TokenStream {
    let model = &ast.ident;
    let (impl_generics, ty_generics, where_clause) = ast.generics.split_for_impl();

    let fields = meta.fields.iter().map(|f| {
        let name = &f.name;
        let branches = field_checks(f).into_iter().map(|(failed, rule)| {
            quote! {
                if #failed {
                    errors.push(::rowguard::validate::Violation::new(#name, #rule));
                }
            }
        });
        // only the first failing rule of a field is reported
        quote! {
            #(#branches)else*
        }
    });

    quote! {
        impl #impl_generics ::rowguard::validate::Validate for #model #ty_generics #where_clause {
            fn validate(&self) -> ::std::result::Result<(), ::rowguard::validate::ValidationErrors> {
                let mut errors = ::rowguard::validate::ValidationErrors::new();
                #(#fields)*
                errors.into_result()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_failure_wins() {
        let ast: DeriveInput = syn::parse_str(
            r#"
struct Person {
    #[validate(required, min = 1, max = 100)]
    age: i64,
}
"#,
        )
        .unwrap();
        let meta = ValidateMeta::from_derive(&ast).unwrap();
        let code = impl_Validate(&ast, &meta).to_string();
        assert!(code.contains("check_required"));
        assert!(code.contains("} else if !"));
        assert!(code.contains("Some (1i64)"));
    }
}
