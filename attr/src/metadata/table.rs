use crate::metadata::column::ColumnMeta;
use crate::{DeriveInputExt, Ident, SqlKind};
use convert_case::{Case, Casing};
use structmeta::StructMeta;
use syn::{Attribute, DeriveInput, LitStr};

/// Metadata used for TableMeta, FromRow, Model and the insertion struct.
#[derive(Debug, Clone)]
pub struct TableMeta {
    pub name: String,
    pub ident: Ident,
    pub columns: Vec<ColumnMeta>,
    /// Column name of the primary key.
    pub pkey: String,
    pub insert_struct: Option<Ident>,
    pub extra_derives: Vec<Ident>,
}

impl TableMeta {
    pub fn new(ast: &DeriveInput, attrs: &[TableAttr]) -> syn::Result<Self> {
        let ident = &ast.ident;
        let name = if let Some(value) = attrs.iter().find_map(|a| a.table.as_ref()) {
            value.value()
        } else {
            ident.to_string().to_case(Case::Snake)
        };
        let columns = ColumnMeta::from_fields(ast.fields()?)?;
        let marked = columns.iter().filter(|c| c.marked_primary_key).collect::<Vec<_>>();
        let pkey = match marked.as_slice() {
            [c] => c.name.clone(),
            [] => match columns.iter().find(|c| c.name == "id") {
                Some(c) => c.name.clone(),
                None => {
                    return Err(syn::Error::new_spanned(
                        ident,
                        "no column marked with #[rowguard(primary_key)], and no column named id",
                    ))
                }
            },
            _ => return Err(syn::Error::new_spanned(ident, "only one column can be the primary key")),
        };
        if let Some(c) = columns.iter().find(|c| c.auto_increment && c.name != pkey) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("auto_increment is only valid on the primary key, but is set on {}", c.name),
            ));
        }
        let insert_struct = attrs
            .iter()
            .find_map(|a| a.insert.as_ref())
            .map(|s| Ident::from(s.value()));
        let extra_derives = attrs
            .iter()
            .flat_map(|a| a.extra_derives.iter().flatten())
            .map(Ident::from)
            .collect();
        Ok(Self {
            name,
            ident: Ident::from(ident),
            columns,
            pkey,
            insert_struct,
            extra_derives,
        })
    }

    pub fn from_derive(ast: &DeriveInput) -> syn::Result<Self> {
        let attrs = TableAttr::from_attrs(&ast.attrs)?;
        Self::new(ast, &attrs)
    }

    pub fn pkey_column(&self) -> &ColumnMeta {
        self.columns
            .iter()
            .find(|c| c.name == self.pkey)
            .expect("primary key is always one of the columns")
    }

    /// Columns an insertion struct carries: everything but an auto-increment key.
    pub fn insertable_columns(&self) -> impl Iterator<Item = &ColumnMeta> + '_ {
        self.columns.iter().filter(|c| !c.auto_increment)
    }

    pub fn unique_columns(&self) -> impl Iterator<Item = &ColumnMeta> + '_ {
        self.columns.iter().filter(|c| c.unique && c.name != self.pkey)
    }

    pub fn sized_columns(&self) -> impl Iterator<Item = &ColumnMeta> + '_ {
        self.columns.iter().filter(|c| c.size.is_some() && c.kind == SqlKind::Text)
    }
}

/// Available attributes on a struct
#[derive(StructMeta)]
pub struct TableAttr {
    /// The name of the table in the database. Defaults to the struct name in snake case.
    /// Example:
    /// #[rowguard(table = "forms")]
    /// pub struct Form {
    ///    pub id: i64,
    /// }
    pub table: Option<LitStr>,

    /// The struct name of an insertion struct.
    /// Example:
    /// #[rowguard(insert = "InsertForm")]
    /// pub struct Form {
    ///   pub id: i64,
    /// }
    pub insert: Option<LitStr>,

    /// Add extra derives to the insertion struct.
    /// Example:
    /// #[rowguard(insert = "InsertForm", extra_derives(Serialize, Deserialize))]
    pub extra_derives: Option<Vec<syn::Ident>>,
}

impl TableAttr {
    pub fn from_attrs(attrs: &[Attribute]) -> syn::Result<Vec<Self>> {
        attrs
            .iter()
            .filter(|&a| a.path().is_ident("rowguard"))
            .map(|a| a.parse_args())
            .collect()
    }
}
