use darling::{ast, FromDeriveInput, FromField};
use proc_macro2::TokenTree;
use quote::{format_ident, quote, ToTokens};
use syn::Meta;

#[derive(Debug, FromDeriveInput)]
#[darling(supports(struct_named), forward_attrs)]
struct ModelInputReceiver {
	ident: syn::Ident,

	generics: syn::Generics,

	data: ast::Data<(), ModelFieldReceiver>,

	attrs: Vec<syn::Attribute>,
}

#[derive(Debug, FromField)]
#[darling(forward_attrs)]
struct ModelFieldReceiver {
	ident: Option<syn::Ident>,

	ty: syn::Type,
	vis: syn::Visibility,

	attrs: Vec<syn::Attribute>,
}

/// Whether the attribute is `#[serde(..)]` containing `skip` or `skip_deserializing`.
fn skips_deserializing(attr: &syn::Attribute) -> bool {
	let Meta::List(ref list) = attr.meta else {
		return false;
	};

	if !list.path.is_ident("serde") {
		return false;
	}

	list.tokens.to_token_stream().into_iter().any(|token| {
		matches!(token, TokenTree::Ident(ref ident) if ident == "skip_deserializing" || ident == "skip")
	})
}

pub fn from_input(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	let input = syn::parse_macro_input!(input as syn::DeriveInput);
	let receiver = match ModelInputReceiver::from_derive_input(&input) {
		Ok(x) => x,
		Err(e) => return e.write_errors().into(),
	};

	let ident = &receiver.ident;
	let vis = &input.vis;
	let generics = &receiver.generics;
	let input_ident = format_ident!("Create{}Input", ident);
	let doc = format!("Request body used to create a [`{ident}`].");

	// Doc comments describe the model, not the input
	let attrs = receiver
		.attrs
		.iter()
		.filter(|attr| !attr.path().is_ident("doc"));

	let Some(fields) = receiver.data.take_struct() else {
		return syn::Error::new_spanned(ident, "expected a struct with named fields")
			.into_compile_error()
			.into();
	};

	let fields = fields.iter().filter_map(|field| {
		let ident = field.ident.as_ref()?;

		if field.attrs.iter().any(skips_deserializing) {
			return None;
		}

		let ty = &field.ty;
		let attrs = &field.attrs;
		let vis = &field.vis;

		Some(quote! {
			#(#attrs)*
			#[serde(default)]
			#vis #ident: #ty,
		})
	});

	quote! {
		#input

		#[doc = #doc]
		#(#attrs)*
		#vis struct #input_ident #generics {
			#(
				#fields
			)*
		}
	}
	.into()
}
