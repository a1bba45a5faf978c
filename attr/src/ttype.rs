use crate::Ident;
use proc_macro2::TokenStream;
use quote::TokenStreamExt;
use syn::PathArguments;

/// The shape of a field type, as far as the derives care about it.
#[derive(Clone, Debug, PartialEq, Hash)]
pub enum Type {
    Option(Box<Type>),
    Vec(Box<Type>),
    Inner(InnerType),
}

/// Storage class of a column in SQLite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SqlKind {
    Integer,
    Real,
    Boolean,
    Text,
    Blob,
}

const INTEGERS: &[&str] = &["i8", "i16", "i32", "i64", "u8", "u16", "u32"];

impl Type {
    pub fn is_option(&self) -> bool {
        matches!(self, Type::Option(_))
    }

    /// Strips any number of `Option` layers.
    pub fn non_null(&self) -> &Type {
        match self {
            Type::Option(ty) => ty.non_null(),
            ty => ty,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self.non_null(), Type::Inner(ty) if ty.ident == "String")
    }

    /// `None` means the type has no column mapping.
    pub fn sql_kind(&self) -> Option<SqlKind> {
        match self.non_null() {
            Type::Vec(inner) => match inner.as_ref() {
                Type::Inner(ty) if ty.ident == "u8" => Some(SqlKind::Blob),
                _ => None,
            },
            Type::Inner(ty) => match ty.ident.as_str() {
                // u64 and isize have no sqlite encoding
                i if INTEGERS.contains(&i) => Some(SqlKind::Integer),
                "f32" | "f64" => Some(SqlKind::Real),
                "bool" => Some(SqlKind::Boolean),
                "String" => Some(SqlKind::Text),
                _ => None,
            },
            Type::Option(_) => None,
        }
    }
}

impl TryFrom<InnerType> for Type {
    type Error = syn::Error;

    fn try_from(value: InnerType) -> syn::Result<Self> {
        let wrap = |args: Option<Box<InnerType>>, ident: &Ident| {
            args.ok_or_else(|| {
                syn::Error::new(proc_macro2::Span::call_site(), format!("{ident} requires a type argument"))
            })
        };
        let name = value.ident.to_string();
        match name.as_str() {
            "Option" => Ok(Type::Option(Box::new(Type::try_from(*wrap(value.args, &value.ident)?)?))),
            "Vec" => Ok(Type::Vec(Box::new(Type::try_from(*wrap(value.args, &value.ident)?)?))),
            _ => Ok(Type::Inner(value)),
        }
    }
}

impl TryFrom<&syn::Type> for Type {
    type Error = syn::Error;

    fn try_from(ty: &syn::Type) -> syn::Result<Self> {
        let syn::Type::Path(path) = ty else {
            return Err(syn::Error::new_spanned(ty, "expected a path type, like `String` or `Option<i64>`"));
        };
        let inner = InnerType::try_from(&path.path)?;
        Type::try_from(inner).map_err(|e| syn::Error::new_spanned(ty, e.to_string()))
    }
}

impl quote::ToTokens for Type {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            Type::Option(ty) => tokens.append_all(quote::quote! { Option<#ty> }),
            Type::Vec(ty) => tokens.append_all(quote::quote! { Vec<#ty> }),
            Type::Inner(ty) => ty.to_tokens(tokens),
        }
    }
}

impl PartialEq<&str> for Type {
    fn eq(&self, other: &&str) -> bool {
        let Type::Inner(t) = self else {
            return false;
        };
        t.ident == other
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InnerType {
    pub path: Vec<Ident>,
    pub ident: Ident,
    pub args: Option<Box<InnerType>>,
}

impl TryFrom<&syn::Path> for InnerType {
    type Error = syn::Error;

    fn try_from(path: &syn::Path) -> syn::Result<Self> {
        let Some(segment) = path.segments.last() else {
            return Err(syn::Error::new_spanned(path, "empty type path"));
        };
        let args = match &segment.arguments {
            PathArguments::AngleBracketed(args) => {
                let Some(syn::GenericArgument::Type(syn::Type::Path(ty))) = args.args.first() else {
                    return Err(syn::Error::new_spanned(args, "expected a type path inside angle brackets"));
                };
                Some(Box::new(InnerType::try_from(&ty.path)?))
            }
            PathArguments::None => None,
            PathArguments::Parenthesized(p) => {
                return Err(syn::Error::new_spanned(p, "function types can't be stored in a column"));
            }
        };
        let mut segments = path.segments.iter().map(|s| Ident::from(&s.ident)).collect::<Vec<_>>();
        let ident = segments.pop().unwrap_or_else(|| Ident::from(&segment.ident));
        Ok(InnerType {
            path: segments,
            ident,
            args,
        })
    }
}

impl quote::ToTokens for InnerType {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let args = if let Some(args) = &self.args {
            quote::quote! { <#args> }
        } else {
            quote::quote! {}
        };
        let path = &self.path;
        let ident = &self.ident;
        tokens.append_all(quote::quote! { #(#path ::)* #ident #args });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Type {
        Type::try_from(&syn::parse_str::<syn::Type>(s).unwrap()).unwrap()
    }

    #[test]
    fn test_sql_kind() {
        assert_eq!(parse("i64").sql_kind(), Some(SqlKind::Integer));
        assert_eq!(parse("Option<String>").sql_kind(), Some(SqlKind::Text));
        assert_eq!(parse("Vec<u8>").sql_kind(), Some(SqlKind::Blob));
        assert_eq!(parse("bool").sql_kind(), Some(SqlKind::Boolean));
        assert_eq!(parse("u64").sql_kind(), None);
        assert_eq!(parse("Vec<String>").sql_kind(), None);
        assert_eq!(parse("uuid::Uuid").sql_kind(), None);
    }

    #[test]
    fn test_option_layers() {
        let ty = parse("Option<i32>");
        assert!(ty.is_option());
        assert_eq!(ty.sql_kind(), Some(SqlKind::Integer));
        assert!(!ty.is_string());
        assert_eq!(*ty.non_null(), "i32");
    }

    #[test]
    fn test_qualified_type_to_quote() {
        let Type::Inner(ty) = parse("std::string::String") else {
            panic!("expected an inner type");
        };
        assert_eq!(ty.ident, "String");
        assert_eq!(ty.path.len(), 2);
        let z = quote::quote!(#ty);
        assert_eq!(z.to_string(), "std :: string :: String");
    }

    #[test]
    fn test_reference_is_rejected() {
        let ty = syn::parse_str::<syn::Type>("&str").unwrap();
        assert!(Type::try_from(&ty).is_err());
    }
}
