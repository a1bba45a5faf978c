use crate::{DeriveInputExt, FieldExt, Ident};
use convert_case::{Case, Casing};
use structmeta::{Flag, StructMeta};
use syn::{Attribute, DeriveInput, Field, LitInt, LitStr};

/// The rules declared on one field. Rules are checked in a fixed order: required, one_of,
/// range, max_length; the first failure is the one reported.
#[derive(Clone, Debug)]
pub struct FieldRules {
    pub ident: Ident,
    /// Name used in violations.
    pub name: String,
    pub required: bool,
    pub one_of: Vec<String>,
    pub min: Option<i64>,
    pub max: Option<i64>,
    pub max_length: Option<usize>,
}

impl FieldRules {
    pub fn is_empty(&self) -> bool {
        !self.required && self.one_of.is_empty() && self.min.is_none() && self.max.is_none() && self.max_length.is_none()
    }

    pub fn has_range(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    fn from_field(f: &Field, rename_all: Option<Case>) -> syn::Result<Self> {
        let ident = f
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(f, "validated fields must be named"))?;
        let name = match rename_all {
            Some(case) => f.name().to_case(case),
            None => f.name(),
        };
        let mut rules = FieldRules {
            ident: Ident::from(ident),
            name,
            required: false,
            one_of: Vec::new(),
            min: None,
            max: None,
            max_length: None,
        };
        for attr in ValidateAttr::from_attrs(&f.attrs)? {
            rules.required |= attr.required.value();
            if let Some(values) = attr.one_of {
                if values.is_empty() {
                    return Err(syn::Error::new_spanned(ident, "one_of needs at least one value"));
                }
                rules.one_of.extend(values.iter().map(LitStr::value));
            }
            if let Some(min) = attr.min {
                rules.min = Some(min.base10_parse()?);
            }
            if let Some(max) = attr.max {
                rules.max = Some(max.base10_parse()?);
            }
            if let Some(max_length) = attr.max_length {
                rules.max_length = Some(crate::metadata::parse_usize(&max_length)?);
            }
            if let Some(rename) = attr.rename {
                rules.name = rename.value();
            }
        }
        if let (Some(min), Some(max)) = (rules.min, rules.max) {
            if min > max {
                return Err(syn::Error::new_spanned(ident, format!("min ({min}) is greater than max ({max})")));
            }
        }
        Ok(rules)
    }
}

#[derive(Clone, Debug)]
pub struct ValidateMeta {
    pub ident: Ident,
    /// Only fields that carry at least one rule.
    pub fields: Vec<FieldRules>,
}

impl ValidateMeta {
    pub fn from_derive(ast: &DeriveInput) -> syn::Result<Self> {
        let mut rename_all = None;
        for attr in ValidateStructAttr::from_attrs(&ast.attrs)? {
            if let Some(case) = attr.rename_all {
                rename_all = Some(parse_case(&case)?);
            }
        }
        let fields = ast
            .fields()?
            .map(|f| FieldRules::from_field(f, rename_all))
            .filter(|r| !matches!(r, Ok(r) if r.is_empty()))
            .collect::<syn::Result<Vec<_>>>()?;
        Ok(Self {
            ident: Ident::from(&ast.ident),
            fields,
        })
    }
}

fn parse_case(lit: &LitStr) -> syn::Result<Case> {
    let case = match lit.value().as_str() {
        "PascalCase" => Case::Pascal,
        "camelCase" => Case::Camel,
        "snake_case" => Case::Snake,
        "SCREAMING_SNAKE_CASE" => Case::UpperSnake,
        "kebab-case" => Case::Kebab,
        "lowercase" => Case::Flat,
        "UPPERCASE" => Case::UpperFlat,
        other => return Err(syn::Error::new_spanned(lit, format!("unknown rename_all case: {other}"))),
    };
    Ok(case)
}

/// Available attributes on a validated field
#[derive(StructMeta)]
pub struct ValidateAttr {
    /// Rejects the zero value: empty strings, 0, false, None.
    pub required: Flag,
    /// Example:
    /// #[validate(one_of("male", "female"))]
    pub one_of: Option<Vec<LitStr>>,
    /// Inclusive lower bound for integers.
    pub min: Option<LitInt>,
    /// Inclusive upper bound for integers.
    pub max: Option<LitInt>,
    /// Upper bound on string length, in characters.
    pub max_length: Option<LitInt>,
    /// Name reported in violations, overriding `rename_all`.
    pub rename: Option<LitStr>,
}

impl ValidateAttr {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Vec<Self>> {
        attrs
            .iter()
            .filter(|a| a.path().is_ident("validate"))
            .map(|a| a.parse_args())
            .collect()
    }
}

/// Available attributes on a validated struct
#[derive(StructMeta)]
pub struct ValidateStructAttr {
    /// Example:
    /// #[validate(rename_all = "PascalCase")]
    pub rename_all: Option<LitStr>,
}

impl ValidateStructAttr {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Vec<Self>> {
        attrs
            .iter()
            .filter(|a| a.path().is_ident("validate"))
            .map(|a| a.parse_args())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_person_rules() {
        let ast: DeriveInput = syn::parse_str(
            r#"
#[validate(rename_all = "PascalCase")]
pub struct Person {
    #[validate(required)]
    pub name: String,
    #[validate(required, one_of("male", "female"))]
    pub gender: String,
    #[validate(required, min = 1, max = 100)]
    pub age: i64,
    pub nickname: Option<String>,
}
"#,
        )
        .unwrap();
        let meta = ValidateMeta::from_derive(&ast).unwrap();
        assert_eq!(meta.ident, "Person");
        let names = meta.fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, ["Name", "Gender", "Age"]);
        let gender = &meta.fields[1];
        assert!(gender.required);
        assert_eq!(gender.one_of, ["male", "female"]);
        let age = &meta.fields[2];
        assert_eq!((age.min, age.max), (Some(1), Some(100)));
        assert!(age.has_range());
        assert_eq!(age.ident, "age");
    }

    #[test]
    fn test_rename_overrides_rename_all() {
        let ast: DeriveInput = syn::parse_str(
            r#"
#[validate(rename_all = "camelCase")]
struct Signup { #[validate(required, rename = "e-mail")] email_address: String, #[validate(max_length = 8)] user_name: String }
"#,
        )
        .unwrap();
        let meta = ValidateMeta::from_derive(&ast).unwrap();
        assert_eq!(meta.fields[0].name, "e-mail");
        assert_eq!(meta.fields[1].name, "userName");
        assert_eq!(meta.fields[1].max_length, Some(8));
    }

    #[test]
    fn test_attr_parse() {
        let attr: Attribute = parse_quote!(#[validate(required, one_of("a"), max_length = 3)]);
        let args: ValidateAttr = attr.parse_args().unwrap();
        assert!(args.required.value());
        assert_eq!(args.one_of.unwrap().len(), 1);
        assert!(args.min.is_none());
    }

    #[test]
    fn test_inverted_range() {
        let ast: DeriveInput = syn::parse_str("struct A { #[validate(min = 10, max = 1)] n: i32 }").unwrap();
        assert!(ValidateMeta::from_derive(&ast).is_err());
    }

    #[test]
    fn test_unknown_case() {
        let ast: DeriveInput =
            syn::parse_str(r#"#[validate(rename_all = "Title Case")] struct A { #[validate(required)] n: i32 }"#)
                .unwrap();
        assert!(ValidateMeta::from_derive(&ast).is_err());
    }
}
