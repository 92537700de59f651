mod model;
mod route;

use proc_macro::TokenStream;

/// Creates a documentation function for the route, named after the original function with the suffix `_docs`.
///
/// The first line of the doc comment becomes the summary, the rest becomes the description.
#[proc_macro_attribute]
pub fn route(args: TokenStream, input: TokenStream) -> TokenStream {
	route::from_input(args, input)
}

/// Creates a `CreateXInput` struct for the model, used as a request body.
///
/// Fields with `#[serde(skip_deserializing)]` or `#[serde(skip)]` are left out. All other
/// fields are copied verbatim (including attributes) and marked `#[serde(default)]`,
/// so a body may omit any of them.
#[proc_macro_attribute]
pub fn model(_args: TokenStream, input: TokenStream) -> TokenStream {
	model::from_input(input)
}
