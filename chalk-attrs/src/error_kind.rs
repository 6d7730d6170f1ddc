use proc_macro2::TokenStream as TokenStream2;
use quote::{quote, quote_spanned, ToTokens};
use syn::{Data, DeriveInput, Expr, Fields, Ident, Result};

/// The tags of the `error` attribute.
#[derive(Debug, Default)]
pub struct ErrorArgs {
    pub message: Option<Expr>,
    pub labels: Option<Expr>,
    pub help: Option<Expr>,
}

impl ErrorArgs {
    /// Reads the tags from the `error` attribute among the given attributes, if there is one.
    fn from_attributes(attributes: &[syn::Attribute]) -> Result<Self> {
        let mut args = Self::default();
        let Some(attr) = attributes.iter().find(|attr| attr.path().is_ident("error")) else {
            return Ok(args);
        };

        attr.parse_nested_meta(|meta| {
            let slot = if meta.path.is_ident("message") {
                &mut args.message
            } else if meta.path.is_ident("labels") {
                &mut args.labels
            } else if meta.path.is_ident("help") {
                &mut args.help
            } else {
                return Err(meta.error("unknown tag; expected `message`, `labels` or `help`"));
            };

            if slot.is_some() {
                return Err(meta.error("this tag is given more than once"));
            }
            *slot = Some(meta.value()?.parse()?);
            Ok(())
        })?;

        Ok(args)
    }
}

/// Builds the statement that brings the fields of `self` into scope by reference.
fn destructure_fields(ident: &Ident, fields: &Fields) -> TokenStream2 {
    match fields {
        Fields::Named(fields) => {
            let names = fields.named.iter().map(|field| &field.ident);
            quote! { let #ident { #(#names),* } = self; }
        },
        Fields::Unnamed(_) => quote_spanned! { ident.span() => compile_error!("`ErrorKind` cannot be derived for tuple structs"); },
        Fields::Unit => quote! {},
    }
}

/// The struct to derive [`ErrorKind`] for.
#[derive(Debug)]
pub struct ErrorKindTarget {
    pub name: Ident,
    pub fields: Fields,
    pub error_args: ErrorArgs,
}

impl TryFrom<DeriveInput> for ErrorKindTarget {
    type Error = syn::Error;

    fn try_from(input: DeriveInput) -> Result<Self> {
        let Data::Struct(data) = input.data else {
            return Err(syn::Error::new_spanned(&input.ident, "`ErrorKind` can only be derived for structs"));
        };

        let error_args = ErrorArgs::from_attributes(&input.attrs)?;
        if error_args.message.is_none() {
            return Err(syn::Error::new_spanned(&input.ident, "missing `message` tag in `error` attribute"));
        }

        Ok(Self { name: input.ident, fields: data.fields, error_args })
    }
}

impl ToTokens for ErrorKindTarget {
    fn to_tokens(&self, tokens: &mut TokenStream2) {
        let destructure = destructure_fields(&self.name, &self.fields);
        let message = &self.error_args.message;
        let labels = match &self.error_args.labels {
            Some(labels) => quote! { (#labels).into_iter().map(|label| label.to_string()).collect() },
            None => quote! { Vec::new() },
        };
        let help = match &self.error_args.help {
            Some(help) => quote! { Some((#help).to_string()) },
            None => quote! { None },
        };

        tokens.extend(quote! {
            #[allow(unused_variables)]
            fn message(&self) -> String {
                #destructure
                (#message).to_string()
            }

            #[allow(unused_variables)]
            fn labels(&self) -> Vec<String> {
                #destructure
                #labels
            }

            #[allow(unused_variables)]
            fn help(&self) -> Option<String> {
                #destructure
                #help
            }
        });
    }
}
