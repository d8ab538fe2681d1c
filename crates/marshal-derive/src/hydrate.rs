use convert_case::{Case, Casing};
use darling::{FromDeriveInput, FromField, ast::Data};
use proc_macro2::TokenStream;
use quote::quote;
use std::collections::BTreeSet;
use syn::{DeriveInput, Error, Generics, Ident};

///
/// HydrateInput
///

#[derive(Debug, FromDeriveInput)]
#[darling(attributes(marshal), supports(struct_named))]
struct HydrateInput {
    ident: Ident,
    generics: Generics,
    data: Data<(), HydrateField>,

    #[darling(default)]
    name: Option<String>,

    #[darling(default)]
    serializable: bool,

    #[darling(default)]
    storable: bool,
}

///
/// HydrateField
///

#[derive(Debug, FromField)]
#[darling(attributes(marshal))]
struct HydrateField {
    ident: Option<Ident>,

    #[darling(default)]
    rename: Option<String>,

    #[darling(default)]
    flatten: bool,

    #[darling(default)]
    skip: bool,
}

impl HydrateField {
    // UpperCamelCase of the ident unless renamed
    fn property(&self, ident: &Ident) -> String {
        self.rename.clone().unwrap_or_else(|| {
            let raw = ident.to_string();
            raw.trim_start_matches("r#").to_case(Case::Pascal)
        })
    }
}

// derive_hydrate
pub fn derive_hydrate(input: TokenStream) -> TokenStream {
    let input: DeriveInput = match syn::parse2(input) {
        Ok(input) => input,
        Err(err) => return err.to_compile_error(),
    };

    let input = match HydrateInput::from_derive_input(&input) {
        Ok(input) => input,
        Err(err) => return err.write_errors(),
    };

    match expand(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error(),
    }
}

fn expand(input: &HydrateInput) -> Result<TokenStream, Error> {
    let ident = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "Hydrate cannot be derived for generic types",
        ));
    }

    let Some(fields) = input.data.as_ref().take_struct() else {
        return Err(Error::new_spanned(
            ident,
            "Hydrate can only be derived for structs with named fields",
        ));
    };

    let mut own_idents = Vec::new();
    let mut own_props = Vec::new();
    let mut flat_idents = Vec::new();
    let mut seen = BTreeSet::new();

    for field in fields.fields {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        if field.skip {
            continue;
        }

        if field.flatten {
            if field.rename.is_some() {
                return Err(Error::new_spanned(
                    field_ident,
                    "`flatten` and `rename` cannot be combined",
                ));
            }
            flat_idents.push(field_ident);
            continue;
        }

        let prop = field.property(field_ident);
        if !seen.insert(prop.clone()) {
            return Err(Error::new_spanned(
                field_ident,
                format!("duplicate property name `{prop}`"),
            ));
        }

        own_idents.push(field_ident);
        own_props.push(prop);
    }

    let type_name = match &input.name {
        Some(name) => quote!(#name),
        None => quote!(concat!(module_path!(), "::", stringify!(#ident))),
    };

    let serializable = input.serializable.then(|| {
        quote! {
            fn as_serializable_mut(
                &mut self,
            ) -> ::core::option::Option<&mut dyn ::marshal_core::protocol::Serializable> {
                ::core::option::Option::Some(self)
            }
        }
    });

    let storable = input.storable.then(|| {
        quote! {
            fn as_storable(
                &self,
            ) -> ::core::option::Option<&dyn ::marshal_core::entity::Storable> {
                ::core::option::Option::Some(self)
            }
        }
    });

    Ok(quote! {
        impl ::marshal_core::hydrate::Hydrate for #ident {
            fn field_target(
                &mut self,
                name: &str,
            ) -> ::core::option::Option<&mut dyn ::marshal_core::hydrate::FieldTarget> {
                #(
                    if name == #own_props {
                        return ::core::option::Option::Some(
                            &mut self.#own_idents as &mut dyn ::marshal_core::hydrate::FieldTarget,
                        );
                    }
                )*
                #(
                    if let ::core::option::Option::Some(target) =
                        ::marshal_core::hydrate::Hydrate::field_target(&mut self.#flat_idents, name)
                    {
                        return ::core::option::Option::Some(target);
                    }
                )*

                ::core::option::Option::None
            }

            #[allow(unused_mut)]
            fn field_names(&self) -> ::std::vec::Vec<&'static str> {
                let mut names: ::std::vec::Vec<&'static str> = ::std::vec![#(#own_props),*];
                #(
                    names.extend(::marshal_core::hydrate::Hydrate::field_names(&self.#flat_idents));
                )*

                names
            }
        }

        impl ::marshal_core::traits::FieldValues for #ident {
            fn get_value(&self, field: &str) -> ::core::option::Option<::marshal_core::value::Value> {
                #(
                    if field == #own_props {
                        return ::core::option::Option::Some(
                            ::marshal_core::hydrate::FieldTarget::value(&self.#own_idents),
                        );
                    }
                )*
                #(
                    if let ::core::option::Option::Some(value) =
                        ::marshal_core::traits::FieldValues::get_value(&self.#flat_idents, field)
                    {
                        return ::core::option::Option::Some(value);
                    }
                )*

                ::core::option::Option::None
            }
        }

        impl ::marshal_core::registry::Registered for #ident {
            const TYPE_NAME: &'static str = #type_name;
        }

        impl ::marshal_core::hydrate::FieldTarget for #ident {
            fn slot(&mut self) -> ::marshal_core::hydrate::FieldSlot<'_> {
                ::marshal_core::hydrate::FieldSlot::Entity(self)
            }

            fn value(&self) -> ::marshal_core::value::Value {
                ::marshal_core::value::Value::Map(::marshal_core::hydrate::to_value_map(self))
            }
        }

        impl ::marshal_core::hydrate::EntityTarget for #ident {
            fn registered_name(&self) -> (&'static str, bool) {
                (<Self as ::marshal_core::registry::Registered>::TYPE_NAME, false)
            }

            fn assign_object(
                &mut self,
                property: &str,
                object: ::std::boxed::Box<dyn ::marshal_core::registry::Object>,
            ) -> ::core::result::Result<(), ::marshal_core::error::MarshalError> {
                *self = *::marshal_core::registry::downcast_object::<Self>(property, object)?;

                ::core::result::Result::Ok(())
            }
        }

        impl ::marshal_core::registry::Object for #ident {
            fn type_name(&self) -> &'static str {
                <Self as ::marshal_core::registry::Registered>::TYPE_NAME
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn as_any_mut(&mut self) -> &mut dyn ::core::any::Any {
                self
            }

            fn into_any(
                self: ::std::boxed::Box<Self>,
            ) -> ::std::boxed::Box<dyn ::core::any::Any> {
                self
            }

            fn as_hydrate_mut(
                &mut self,
            ) -> ::core::option::Option<&mut dyn ::marshal_core::hydrate::Hydrate> {
                ::core::option::Option::Some(self)
            }

            #serializable
            #storable
        }
    })
}
