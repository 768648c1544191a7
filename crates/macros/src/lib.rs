use proc_macro::TokenStream;
use quote::quote;

#[derive(deluxe::ParseMetaItem)]
#[deluxe(attributes(similarity_feature))]
struct FeatureAttributes(syn::Ident, #[deluxe(flatten)] FeatureNamedAttributes);

#[derive(deluxe::ParseMetaItem)]
struct FeatureNamedAttributes {
  name: String,
}

/// Declare an attribute scorer from a bare `score_feature` function.
///
/// Generates the unit struct named by the first argument and its `Feature`
/// implementation, reporting `name` as the attribute key the scorer is
/// weighted under.
#[proc_macro_attribute]
pub fn similarity_feature(attrs: TokenStream, input: TokenStream) -> TokenStream {
  let FeatureAttributes(ident, FeatureNamedAttributes { name }) = match deluxe::parse2::<FeatureAttributes>(attrs.into()) {
    Ok(attrs) => attrs,
    Err(err) => return err.into_compile_error().into(),
  };

  let input = proc_macro2::TokenStream::from(input);

  quote! {
      pub struct #ident;

      impl Feature for #ident {
        fn name(&self) -> &'static str {
            #name
        }

        #[tracing::instrument(level = "trace", name = #name, skip_all, fields(site_id = rhs.id))]
        #input
      }
  }
  .into()
}
