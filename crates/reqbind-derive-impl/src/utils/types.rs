// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type shape helpers.

use syn::{GenericArgument, PathArguments, Type};

/// Inner type of `Option<T>`, `std::option::Option<T>` or
/// `core::option::Option<T>`.
///
/// Detection is by last path segment; a type alias hiding `Option` is not
/// recognized.
#[must_use]
pub fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    if type_path.qself.is_some() {
        return None;
    }
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first()? {
        GenericArgument::Type(inner) if args.args.len() == 1 => Some(inner),
        _ => None
    }
}
