use crate::util::{box_future, size_check, sqlite};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use rowguard_attr::TableMeta;
use syn::DeriveInput;

/// Reads a single row from a `RETURNING` statement. Uses fetch instead of fetch_one and drains
/// the stream, so the statement is always stepped to completion.
pub fn fetch_returning(query: TokenStream) -> TokenStream {
    quote! {
        let mut stream = #query.fetch(db);
        let model = ::rowguard::__private::TryStreamExt::try_next(&mut stream)
            .await?
            .ok_or(::rowguard::SqlxError::RowNotFound)?;
        ::rowguard::__private::TryStreamExt::try_next(&mut stream).await?;
    }
}

fn impl_Model__check_columns(meta: &TableMeta) -> TokenStream {
    if meta.sized_columns().next().is_none() {
        return quote! {
            fn check_columns(&self) -> ::std::result::Result<(), ::rowguard::validate::ValidationErrors> {
                ::std::result::Result::Ok(())
            }
        };
    }
    let checks = meta.sized_columns().map(|c| {
        let id = &c.ident;
        size_check(c, quote! { &self.#id })
    });
    quote! {
        fn check_columns(&self) -> ::std::result::Result<(), ::rowguard::validate::ValidationErrors> {
            let mut errors = ::rowguard::validate::ValidationErrors::new();
            #(#checks)*
            errors.into_result()
        }
    }
}

fn impl_Model__insert(meta: &TableMeta) -> TokenStream {
    let box_future = box_future();
    let db = sqlite();
    let binds = meta.columns.iter().map(|c| {
        let id = &c.ident;
        quote! { .bind(self.#id) }
    });
    let fetch = fetch_returning(quote! { q });
    quote! {
        fn insert<'e, E>(self, db: E) -> #box_future<'e, ::rowguard::Result<Self>>
        where
            E: 'e + ::rowguard::Executor<'e, Database = #db>,
        {
            Box::pin(async move {
                ::rowguard::model::Model::check_columns(&self)?;
                let columns = <Self as ::rowguard::model::TableMeta>::table_columns();
                let sql = ::rowguard::__private::statement::insert(
                    <Self as ::rowguard::model::TableMeta>::table_name(),
                    columns,
                    columns,
                );
                let q = ::rowguard::query_as::<_, Self>(&sql)
                    #(#binds)*;
                #fetch
                Ok(model)
            })
        }
    }
}

fn impl_Model__update_all_fields(meta: &TableMeta) -> TokenStream {
    let box_future = box_future();
    let db = sqlite();
    let binds = meta.columns.iter().map(|c| {
        let id = &c.ident;
        quote! { .bind(self.#id) }
    });
    let pkey = &meta.pkey_column().ident;
    let fetch = fetch_returning(quote! { q });
    quote! {
        fn update_all_fields<'e, E>(self, db: E) -> #box_future<'e, ::rowguard::Result<Self>>
        where
            E: 'e + ::rowguard::Executor<'e, Database = #db>,
        {
            Box::pin(async move {
                ::rowguard::model::Model::check_columns(&self)?;
                let key = self.#pkey.clone();
                let sql = ::rowguard::__private::statement::update(
                    <Self as ::rowguard::model::TableMeta>::table_name(),
                    <Self as ::rowguard::model::TableMeta>::table_columns(),
                    <Self as ::rowguard::model::TableMeta>::primary_key(),
                );
                let q = ::rowguard::query_as::<_, Self>(&sql)
                    #(#binds)*
                    .bind(key);
                #fetch
                Ok(model)
            })
        }
    }
}

fn impl_Model__delete(meta: &TableMeta) -> TokenStream {
    let box_future = box_future();
    let db = sqlite();
    let pkey = &meta.pkey_column().ident;
    quote! {
        fn delete<'e, E>(self, db: E) -> #box_future<'e, ::rowguard::Result<()>>
        where
            E: 'e + ::rowguard::Executor<'e, Database = #db>,
        {
            Box::pin(async move {
                let sql = ::rowguard::__private::statement::delete(
                    <Self as ::rowguard::model::TableMeta>::table_name(),
                    <Self as ::rowguard::model::TableMeta>::primary_key(),
                );
                let result = ::rowguard::query(&sql)
                    .bind(self.#pkey)
                    .execute(db)
                    .await?;
                if result.rows_affected() == 0 {
                    return Err(::rowguard::SqlxError::RowNotFound.into());
                }
                Ok(())
            })
        }
    }
}

fn impl_Model__fetch_one() -> TokenStream {
    let box_future = box_future();
    let db = sqlite();
    quote! {
        fn fetch_one<'e, E>(id: Self::PrimaryKey, db: E) -> #box_future<'e, ::rowguard::Result<Self>>
        where
            E: 'e + ::rowguard::Executor<'e, Database = #db>,
        {
            Box::pin(async move {
                let sql = ::rowguard::__private::statement::select_where(
                    <Self as ::rowguard::model::TableMeta>::table_name(),
                    <Self as ::rowguard::model::TableMeta>::table_columns(),
                    <Self as ::rowguard::model::TableMeta>::primary_key(),
                );
                let model = ::rowguard::query_as::<_, Self>(&sql)
                    .bind(id)
                    .fetch_one(db)
                    .await?;
                Ok(model)
            })
        }
    }
}

pub fn impl_Model(meta: &TableMeta) -> TokenStream {
    let model = &meta.ident;
    let pkey_ty = &meta.pkey_column().ty;
    let check_columns = impl_Model__check_columns(meta);
    let insert = impl_Model__insert(meta);
    let update = impl_Model__update_all_fields(meta);
    let delete = impl_Model__delete(meta);
    let fetch_one = impl_Model__fetch_one();

    quote! {
        impl ::rowguard::model::Model for #model {
            type PrimaryKey = #pkey_ty;

            #check_columns
            #insert
            #update
            #delete
            #fetch_one
        }
    }
}

/// `fetch_by_<column>` for every UNIQUE column.
pub fn impl_unique_finders(ast: &DeriveInput, meta: &TableMeta) -> TokenStream {
    let model = &meta.ident;
    let vis = &ast.vis;
    let box_future = box_future();
    let db = sqlite();
    let finders = meta.unique_columns().map(|c| {
        let method = format_ident!("fetch_by_{}", c.ident.as_str());
        let name = &c.name;
        let ty = &c.ty;
        let doc = format!("Get the row whose `{name}` equals `value`, if there is one.");
        quote! {
            #[doc = #doc]
            #vis fn #method<'e, V, E>(value: V, db: E) -> #box_future<'e, ::rowguard::Result<::std::option::Option<Self>>>
            where
                V: ::std::convert::Into<#ty>,
                E: 'e + ::rowguard::Executor<'e, Database = #db>,
            {
                let value: #ty = value.into();
                Box::pin(async move {
                    let sql = ::rowguard::__private::statement::select_where(
                        <Self as ::rowguard::model::TableMeta>::table_name(),
                        <Self as ::rowguard::model::TableMeta>::table_columns(),
                        #name,
                    );
                    let model = ::rowguard::query_as::<_, Self>(&sql)
                        .bind(value)
                        .fetch_optional(db)
                        .await?;
                    Ok(model)
                })
            }
        }
    });
    if meta.unique_columns().next().is_none() {
        return TokenStream::new();
    }
    quote! {
        impl #model {
            #(#finders)*
        }
    }
}
