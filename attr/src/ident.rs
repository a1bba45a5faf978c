//! An owned identifier. `proc_macro2::Ident` is tied to a span and can't outlive the macro
//! invocation, so metadata stores names as plain strings.
use proc_macro2::{Span, TokenStream};
use quote::TokenStreamExt;

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Ident(String);

impl Ident {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier as a `proc_macro2::Ident`, emitted raw (`r#type`) for keywords.
    pub fn to_syn(&self) -> proc_macro2::Ident {
        syn::parse_str::<proc_macro2::Ident>(&self.0)
            .unwrap_or_else(|_| proc_macro2::Ident::new_raw(&self.0, Span::call_site()))
    }
}

impl From<&proc_macro2::Ident> for Ident {
    fn from(ident: &proc_macro2::Ident) -> Self {
        Ident(ident.to_string().trim_start_matches("r#").to_string())
    }
}

impl From<&str> for Ident {
    fn from(ident: &str) -> Self {
        Ident(ident.to_string())
    }
}

impl From<String> for Ident {
    fn from(ident: String) -> Self {
        Ident(ident)
    }
}

impl quote::ToTokens for Ident {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        tokens.append(self.to_syn())
    }
}

impl std::fmt::Display for Ident {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl<T> PartialEq<T> for Ident
where
    T: AsRef<str>,
{
    fn eq(&self, t: &T) -> bool {
        self.0.as_str() == t.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    #[test]
    fn test_keyword_is_emitted_raw() {
        let ident = Ident::from("type");
        assert_eq!(quote!(#ident).to_string(), "r#type");
        let ident = Ident::from("name");
        assert_eq!(quote!(#ident).to_string(), "name");
    }
}
