//! Key and label enum parsing

use syn::{Data, DeriveInput, Fields};

use super::attributes::parse_label;
use super::metadata::{EnumMetadata, ErrorCollector, VariantMetadata};
use crate::utils::errors;

/// Parse the variants of a `ModelKey` or `AttributeLabel` enum.
///
/// `#[label(..)]` is only read when `labels` is set.
pub fn parse_enum(input: &DeriveInput, derive: &str, labels: bool) -> Result<EnumMetadata, syn::Error> {
    if !input.generics.params.is_empty() {
        return Err(errors::generic_target(input.ident.span(), derive));
    }

    let Data::Enum(data) = &input.data else {
        return Err(errors::not_an_enum(input.ident.span(), derive));
    };

    let mut errors = ErrorCollector::new();
    let mut metadata = EnumMetadata {
        name: input.ident.clone(),
        variants: Vec::with_capacity(data.variants.len()),
        has_data: false,
    };

    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            metadata.has_data = true;
        }

        let label = if labels {
            errors.collect(parse_label(&variant.attrs)).flatten()
        } else {
            None
        };

        metadata.variants.push(VariantMetadata {
            name: variant.ident.clone(),
            label,
        });
    }

    errors.into_result_with(metadata)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_unit_enum() {
        let input: DeriveInput = parse_quote! {
            enum Label {
                #[label(units::Unit)]
                Unit,
                Description,
            }
        };

        let metadata = parse_enum(&input, "AttributeLabel", true).unwrap();
        assert!(!metadata.has_data);
        assert_eq!(metadata.variants[0].label.as_ref().unwrap().value(), "units::Unit");
        assert!(metadata.variants[1].label.is_none());
    }

    #[test]
    fn test_data_variants() {
        let input: DeriveInput = parse_quote! {
            enum Column { Id, Named(String) }
        };

        assert!(parse_enum(&input, "ModelKey", false).unwrap().has_data);
    }

    #[test]
    fn test_structs_are_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Column { id: u32 }
        };

        assert!(parse_enum(&input, "ModelKey", false).is_err());
    }
}
