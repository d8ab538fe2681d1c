use proc_macro::TokenStream;

mod hydrate;

/// Generates the field table (`Hydrate`), name-addressed reads
/// (`FieldValues`), the registry name (`Registered`), nested-entity support
/// (`FieldTarget`, `EntityTarget`) and the `Object` view.
///
/// Container: `#[marshal(name = "...", serializable, storable)]`.
/// Field: `#[marshal(rename = "...", flatten, skip)]`.
#[proc_macro_derive(Hydrate, attributes(marshal))]
pub fn derive_hydrate(input: TokenStream) -> TokenStream {
    hydrate::derive_hydrate(input.into()).into()
}
