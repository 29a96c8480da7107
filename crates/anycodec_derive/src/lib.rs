use proc_macro::TokenStream;
use proc_macro2::{Span, TokenStream as TokenStream2};
use quote::{format_ident, quote};
use syn::{
    Data, DataEnum, DeriveInput, Fields, GenericParam, Ident, Index, parse_macro_input,
    parse_quote,
};

/// Implements `anycodec::Bytes` field by field.
///
/// Structs encode their fields in declaration order. Enums prefix the fields
/// with the variant's position as a varint. Each decoded value counts as one
/// nesting level on the reader. Unions are rejected.
#[proc_macro_derive(Bytes)]
pub fn derive_bytes(input: TokenStream) -> TokenStream {
    let mut input = parse_macro_input!(input as DeriveInput);

    for param in &mut input.generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::anycodec::Bytes));
        }
    }

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let (write_body, read_body) = match &input.data {
        Data::Struct(data) => (
            write_struct(&data.fields),
            construct(quote! { Self }, &data.fields),
        ),
        Data::Enum(data) => (write_enum(data), read_enum(name, data)),
        Data::Union(_) => {
            return syn::Error::new_spanned(name, "Bytes cannot be derived for unions")
                .to_compile_error()
                .into();
        }
    };

    let expanded = quote! {
        impl #impl_generics ::anycodec::Bytes for #name #ty_generics #where_clause {
            fn write_bytes<__W: ::std::io::Write>(
                &self,
                __writer: &mut ::anycodec::ByteWriter<__W>,
            ) -> ::std::result::Result<(), ::anycodec::EncodingError> {
                #write_body
            }

            fn read_bytes(
                __reader: &mut ::anycodec::ByteReader<'_>,
            ) -> ::std::result::Result<Self, ::anycodec::DecodingError> {
                __reader.nested(|__reader| #read_body)
            }
        }
    };

    TokenStream::from(expanded)
}

fn write_struct(fields: &Fields) -> TokenStream2 {
    let writes = fields.iter().enumerate().map(|(i, field)| {
        let access = match &field.ident {
            Some(ident) => quote! { self.#ident },
            None => {
                let index = Index::from(i);
                quote! { self.#index }
            }
        };
        quote! { ::anycodec::Bytes::write_bytes(&#access, __writer)?; }
    });
    quote! {
        #(#writes)*
        Ok(())
    }
}

/// `Ok(path { .. })` with every field read in order.
fn construct(path: TokenStream2, fields: &Fields) -> TokenStream2 {
    let read = quote! { ::anycodec::Bytes::read_bytes(__reader)? };
    match fields {
        Fields::Named(named) => {
            let idents = named.named.iter().map(|f| &f.ident);
            quote! { Ok(#path { #(#idents: #read,)* }) }
        }
        Fields::Unnamed(unnamed) => {
            let reads = unnamed.unnamed.iter().map(|_| &read);
            quote! { Ok(#path(#(#reads,)*)) }
        }
        Fields::Unit => quote! { Ok(#path) },
    }
}

fn bindings(fields: &Fields) -> Vec<Ident> {
    (0..fields.len())
        .map(|i| format_ident!("__field{}", i))
        .collect()
}

fn write_enum(data: &DataEnum) -> TokenStream2 {
    let arms = data.variants.iter().enumerate().map(|(index, variant)| {
        let ident = &variant.ident;
        let index = index as u64;
        let binds = bindings(&variant.fields);
        let pattern = match &variant.fields {
            Fields::Named(named) => {
                let names = named.named.iter().map(|f| &f.ident);
                quote! { Self::#ident { #(#names: #binds),* } }
            }
            Fields::Unnamed(_) => quote! { Self::#ident(#(#binds),*) },
            Fields::Unit => quote! { Self::#ident },
        };
        quote! {
            #pattern => {
                __writer.write_varint(#index)?;
                #(::anycodec::Bytes::write_bytes(#binds, __writer)?;)*
            }
        }
    });

    if data.variants.is_empty() {
        return quote! { match *self {} };
    }
    quote! {
        match self { #(#arms)* }
        Ok(())
    }
}

fn read_enum(name: &Ident, data: &DataEnum) -> TokenStream2 {
    let arms = data.variants.iter().enumerate().map(|(index, variant)| {
        let ident = &variant.ident;
        let index = index as u64;
        let body = construct(quote! { Self::#ident }, &variant.fields);
        quote! { #index => #body, }
    });
    let type_name = name.to_string();
    let index = Ident::new("__index", Span::call_site());

    quote! {
        match __reader.read_varint()? {
            #(#arms)*
            #index => Err(::anycodec::DecodingError::UnknownVariant {
                type_name: #type_name,
                index: #index,
            }),
        }
    }
}
