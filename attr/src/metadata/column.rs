use crate::{FieldExt, Ident, SqlKind, Type};
use structmeta::{Flag, StructMeta};
use syn::{Attribute, Field, LitInt, LitStr};

/// All the metadata we can capture about a column
#[derive(Clone, Debug)]
pub struct ColumnMeta {
    /// Name of the column in the database
    pub name: String,
    /// Identifier used in Rust to refer to the column
    pub ident: Ident,
    pub ty: Type,
    pub kind: SqlKind,
    /// Only says whether the primary key is marked. Use `TableMeta::pkey` to definitively know the primary key.
    pub marked_primary_key: bool,
    pub auto_increment: bool,
    pub not_null: bool,
    pub unique: bool,
    /// Maximum length in characters, only for text columns.
    pub size: Option<usize>,
    /// Literal default applied by the database when the column is omitted from an insert.
    pub default_value: Option<String>,
}

impl ColumnMeta {
    pub fn nullable(&self) -> bool {
        self.ty.is_option() && !self.not_null
    }

    pub fn from_fields<'a>(fields: impl Iterator<Item = &'a Field>) -> syn::Result<Vec<Self>> {
        fields.map(ColumnMeta::from_field).collect()
    }

    pub fn from_field(f: &Field) -> syn::Result<Self> {
        let ident = f
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(f, "columns must be named fields"))?;
        let ty = Type::try_from(&f.ty)?;
        let Some(kind) = ty.sql_kind() else {
            return Err(syn::Error::new_spanned(
                &f.ty,
                "unsupported column type; expected an integer, float, bool, String, Vec<u8>, or an Option of one of those",
            ));
        };
        let mut column = ColumnMeta {
            name: f.name(),
            ident: Ident::from(ident),
            ty,
            kind,
            marked_primary_key: false,
            auto_increment: false,
            not_null: false,
            unique: false,
            size: None,
            default_value: None,
        };
        for attr in ColumnAttr::from_attrs(&f.attrs)? {
            column.marked_primary_key |= attr.primary_key.value();
            column.auto_increment |= attr.auto_increment.value();
            column.not_null |= attr.not_null.value();
            column.unique |= attr.unique.value();
            if let Some(c) = attr.column {
                column.name = c.value();
            }
            if let Some(size) = attr.size {
                if !column.ty.is_string() {
                    return Err(syn::Error::new_spanned(size, "size only applies to String columns"));
                }
                column.size = Some(crate::metadata::parse_usize(&size)?);
            }
            if let Some(default_value) = attr.default_value {
                let value = default_value.value();
                if column.kind == SqlKind::Integer && value.parse::<i64>().is_err() {
                    return Err(syn::Error::new_spanned(default_value, "default_value must be an integer literal"));
                }
                column.default_value = Some(value);
            }
        }
        if column.auto_increment && column.kind != SqlKind::Integer {
            return Err(syn::Error::new_spanned(&f.ty, "auto_increment requires an integer column"));
        }
        Ok(column)
    }
}

/// Available attributes on a column (struct field)
#[derive(StructMeta)]
pub struct ColumnAttr {
    pub primary_key: Flag,
    /// The database assigns increasing values. Only valid on an integer primary key.
    pub auto_increment: Flag,
    /// Emit NOT NULL even when the field is an `Option`.
    pub not_null: Flag,
    pub unique: Flag,
    /// Maximum length, in characters.
    /// Example:
    /// pub struct Form {
    ///     #[rowguard(size = 255)]
    ///     pub name: String,
    /// }
    pub size: Option<LitInt>,
    /// Database level default, written as a literal.
    /// Example:
    /// pub struct Form {
    ///     #[rowguard(default_value = "<NAME>")]
    ///     pub name: String,
    /// }
    pub default_value: Option<LitStr>,
    /// The name of the column in the database. Defaults to the field name.
    pub column: Option<LitStr>,
}

impl ColumnAttr {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Vec<Self>> {
        attrs
            .iter()
            .filter(|a| a.path().is_ident("rowguard"))
            .map(|a| a.parse_args())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::{parse_quote, Fields, ItemStruct};

    fn first_field(src: &str) -> Field {
        let item: ItemStruct = syn::parse_str(src).unwrap();
        let Fields::Named(fields) = item.fields else {
            panic!();
        };
        fields.named.into_iter().next().unwrap()
    }

    #[test]
    fn test_from_field() {
        let field = first_field(
            r#"
struct Form {
    #[rowguard(not_null, size = 255, default_value = "<NAME>", unique)]
    pub name: String
}
"#,
        );
        let column = ColumnMeta::from_field(&field).unwrap();
        assert_eq!(column.name, "name");
        assert_eq!(column.ty, "String");
        assert_eq!(column.kind, SqlKind::Text);
        assert!(column.not_null);
        assert!(column.unique);
        assert!(!column.nullable());
        assert_eq!(column.size, Some(255));
        assert_eq!(column.default_value.as_deref(), Some("<NAME>"));
    }

    #[test]
    fn test_primary_key_flags() {
        let attr: Attribute = parse_quote!(#[rowguard(primary_key, auto_increment, not_null)]);
        let args: ColumnAttr = attr.parse_args().unwrap();
        assert!(args.primary_key.value());
        assert!(args.auto_increment.value());
        assert!(args.not_null.value());
        assert!(!args.unique.value());
    }

    #[test]
    fn test_column_rename() {
        let field = first_field(
            r#"
struct User {
    #[rowguard(column = "type")]
    ty: Option<i32>
}
"#,
        );
        let column = ColumnMeta::from_field(&field).unwrap();
        assert_eq!(column.name, "type");
        assert_eq!(column.ident, "ty");
        assert!(column.nullable());
    }

    #[test]
    fn test_size_on_integer_is_rejected() {
        let field = first_field("struct A { #[rowguard(size = 3)] n: i32 }");
        assert!(ColumnMeta::from_field(&field).is_err());
    }

    #[test]
    fn test_auto_increment_on_text_is_rejected() {
        let field = first_field("struct A { #[rowguard(auto_increment)] id: String }");
        assert!(ColumnMeta::from_field(&field).is_err());
    }

    #[test]
    fn test_unsupported_type() {
        let field = first_field("struct A { at: chrono::DateTime<chrono::Utc> }");
        assert!(ColumnMeta::from_field(&field).is_err());
    }
}
