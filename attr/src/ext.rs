use syn::{Data, DataStruct, DeriveInput, Field, Fields, FieldsNamed};

pub trait DeriveInputExt {
    fn fields(&self) -> syn::Result<syn::punctuated::Iter<'_, Field>>;
}

impl DeriveInputExt for DeriveInput {
    fn fields(&self) -> syn::Result<syn::punctuated::Iter<'_, Field>> {
        let fields = match &self.data {
            Data::Struct(DataStruct { ref fields, .. }) => fields,
            _ => return Err(syn::Error::new_spanned(&self.ident, "rowguard derives can only be used on structs")),
        };
        let fields = match fields {
            Fields::Named(FieldsNamed { named, .. }) => named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &self.ident,
                    "rowguard derives can only be used on structs with named fields",
                ))
            }
        };
        Ok(fields.iter())
    }
}

pub trait FieldExt {
    /// Field name with any raw identifier prefix removed.
    fn name(&self) -> String;
}

impl FieldExt for Field {
    fn name(&self) -> String {
        self.ident
            .as_ref()
            .map(|i| i.to_string().replace("r#", ""))
            .unwrap_or_default()
    }
}
