use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, Attribute, Data, DataStruct, DeriveInput, Field, Fields, Ident, LitStr,
    Token, Type, TypePath,
};

enum LinkedAttribute {
    CratePath(syn::Path),
    Bridge(Ident),
}

/// Parses `crate_path = "path::to::crate"` or `bridge = "BridgeName"`.
impl Parse for LinkedAttribute {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let key: Ident = input.parse()?;
        let _: Token![=] = input.parse()?;
        let value: LitStr = input.parse()?;

        match key.to_string().as_str() {
            "crate_path" => Ok(LinkedAttribute::CratePath(value.parse()?)),
            "bridge" => Ok(LinkedAttribute::Bridge(value.parse()?)),
            _ => Err(syn::Error::new(
                key.span(),
                "expected attribute `crate_path` or `bridge`",
            )),
        }
    }
}

fn linked_attribute(attrs: &[Attribute]) -> syn::Result<Option<LinkedAttribute>> {
    for attr in attrs {
        if attr.path().is_ident("linked") {
            return attr.parse_args().map(Some);
        }
    }
    Ok(None)
}

fn ensure_link_type(field: &Field) -> syn::Result<()> {
    if let Type::Path(TypePath { path, .. }) = &field.ty {
        if path.segments.last().is_some_and(|segment| segment.ident == "Link") {
            return Ok(());
        }
    }
    Err(syn::Error::new_spanned(
        &field.ty,
        "link fields must be of type `Link`",
    ))
}

/// Derive macro for list hosts.
///
/// - A field named `link` of type `Link` becomes the host's default
///   membership (`Linked`), used by `LinkedList<'_, Host>`.
/// - A `Link` field marked `#[linked(bridge = "Name")]` gets a generated
///   unit struct `Name` implementing `Bridge`, used by
///   `LinkedList<'_, Host, Name>`.
/// - `#[linked(crate_path = "...")]` on the struct overrides the path to
///   `intrusive_ring`.
#[proc_macro_derive(Linked, attributes(linked))]
pub fn linked_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;
    let vis = &input.vis;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    // Find absolute crate path
    let mut crate_path = quote! { ::intrusive_ring };
    match linked_attribute(&input.attrs)? {
        Some(LinkedAttribute::CratePath(path)) => crate_path = quote! { #path },
        Some(LinkedAttribute::Bridge(bridge)) => {
            return Err(syn::Error::new_spanned(
                bridge,
                "`bridge` goes on a link field, not on the struct",
            ));
        }
        None => {}
    }

    let intrusive_path = quote! { #crate_path::linked_list::intrusive };

    let Data::Struct(DataStruct {
        fields: Fields::Named(fields),
        ..
    }) = &input.data
    else {
        return Err(syn::Error::new_spanned(
            input,
            "Linked derive macro only supports structs with named fields",
        ));
    };

    let mut default_link = None;
    let mut bridges = Vec::new();

    for field in fields.named.iter() {
        let Some(ident) = &field.ident else {
            continue;
        };
        match linked_attribute(&field.attrs)? {
            Some(LinkedAttribute::Bridge(bridge)) => {
                ensure_link_type(field)?;
                bridges.push((bridge, ident));
            }
            Some(LinkedAttribute::CratePath(path)) => {
                return Err(syn::Error::new_spanned(
                    path,
                    "`crate_path` goes on the struct, not on a field",
                ));
            }
            None if ident == "link" => {
                ensure_link_type(field)?;
                default_link = Some(ident);
            }
            None => {}
        }
    }

    if default_link.is_none() && bridges.is_empty() {
        return Err(syn::Error::new_spanned(
            struct_name,
            "struct must have a field named `link` or a field marked `#[linked(bridge = \"...\")]`",
        ));
    }
    if !bridges.is_empty() && !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "bridges can only be generated for non-generic hosts",
        ));
    }

    // Generate the `Linked` implementation for the default membership
    let default_impl = default_link.map(|field| {
        quote! {
            unsafe impl #impl_generics #intrusive_path::bridge::Linked for #struct_name #ty_generics #where_clause {
                #[inline]
                fn link(&self) -> &#intrusive_path::link::Link {
                    &self.#field
                }

                #[inline]
                unsafe fn link_ptr(
                    this: ::core::ptr::NonNull<Self>,
                ) -> ::core::ptr::NonNull<#intrusive_path::link::Link> {
                    unsafe { ::core::ptr::NonNull::new_unchecked(&raw mut (*this.as_ptr()).#field) }
                }

                #[inline]
                unsafe fn from_link(
                    link: ::core::ptr::NonNull<#intrusive_path::link::Link>,
                ) -> ::core::ptr::NonNull<Self> {
                    unsafe {
                        #intrusive_path::bridge::container_of(link, ::core::mem::offset_of!(Self, #field))
                    }
                }
            }
        }
    });

    // Generate one bridge type per extra membership
    let bridge_impls = bridges.iter().map(|(bridge, field)| {
        let doc = format!("Bridge over the `{field}` link of [`{struct_name}`].");
        quote! {
            #[doc = #doc]
            #vis struct #bridge;

            unsafe impl #intrusive_path::bridge::Bridge for #bridge {
                type Host = #struct_name;

                #[inline]
                fn link_of(host: &#struct_name) -> &#intrusive_path::link::Link {
                    &host.#field
                }

                #[inline]
                unsafe fn link_ptr(
                    host: ::core::ptr::NonNull<#struct_name>,
                ) -> ::core::ptr::NonNull<#intrusive_path::link::Link> {
                    unsafe { ::core::ptr::NonNull::new_unchecked(&raw mut (*host.as_ptr()).#field) }
                }

                #[inline]
                unsafe fn host_of(
                    link: ::core::ptr::NonNull<#intrusive_path::link::Link>,
                ) -> ::core::ptr::NonNull<#struct_name> {
                    unsafe {
                        #intrusive_path::bridge::container_of(link, ::core::mem::offset_of!(#struct_name, #field))
                    }
                }
            }
        }
    });

    Ok(quote! {
        #default_impl
        #(#bridge_impls)*
    })
}
