pub use column::*;
pub use table::*;
pub use validate::*;

mod column;
mod table;
mod validate;

pub(crate) fn parse_usize(lit: &syn::LitInt) -> syn::Result<usize> {
    lit.base10_parse::<usize>()
}
