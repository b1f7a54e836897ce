use syn::{GenericArgument, PathArguments, Type};

/// The `U` of an `Option<U>` type, matched by its last path segment.
pub fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(path) = ty else {
        return None;
    };
    if path.qself.is_some() {
        return None;
    }

    let segment = path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }

    match &segment.arguments {
        PathArguments::AngleBracketed(arguments) if arguments.args.len() == 1 => {
            match arguments.args.first()? {
                GenericArgument::Type(inner) => Some(inner),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Whether a type spells `Self` or the given type name.
pub fn is_self_type(ty: &Type, self_name: &syn::Ident) -> bool {
    let Type::Path(path) = ty else {
        return false;
    };

    path.qself.is_none()
        && path.path.segments.len() == 1
        && path
            .path
            .segments
            .first()
            .is_some_and(|s| s.ident == "Self" || s.ident == *self_name)
        && path
            .path
            .segments
            .first()
            .is_some_and(|s| s.arguments.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_option_inner() {
        let ty: Type = parse_quote!(Option<String>);
        let inner: Type = parse_quote!(String);
        assert_eq!(option_inner(&ty), Some(&inner));

        let ty: Type = parse_quote!(std::option::Option<u8>);
        assert!(option_inner(&ty).is_some());

        let ty: Type = parse_quote!(Vec<u8>);
        assert!(option_inner(&ty).is_none());
    }

    #[test]
    fn test_self_type() {
        let name: syn::Ident = parse_quote!(Car);
        assert!(is_self_type(&parse_quote!(Self), &name));
        assert!(is_self_type(&parse_quote!(Car), &name));
        assert!(!is_self_type(&parse_quote!(Truck), &name));
        assert!(!is_self_type(&parse_quote!(Option<Self>), &name));
    }
}
