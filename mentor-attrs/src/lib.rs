mod error_kind;

use error_kind::ErrorKindTarget;
use proc_macro::TokenStream;
use quote::quote;
use syn::parse_macro_input;

/// Derives the `mentor_error::ErrorKind` trait for the given struct.
///
/// The information of the error is customized using the `error` attribute by adding the
/// corresponding tags to it:
/// ```ignore
/// use mentor_attrs::ErrorKind;
/// use mentor_error::ErrorCategory;
///
/// #[derive(Debug, ErrorKind)]
/// #[error(
///     message = format!("unknown function `{}`", name),
///     labels = ["this function"],
///     category = ErrorCategory::Unsupported,
/// )]
/// pub struct UnknownFunction {
///     pub name: String,
/// }
/// ```
///
/// The following tags are available:
///
/// | Tag         | Description                                                                  |
/// | ----------- | ---------------------------------------------------------------------------- |
/// | `message`   | The message displayed at the top of the error, and in one-line diagnostics. |
/// | `labels`    | An array of label texts, one per span of the error, in order.               |
/// | `help`      | Optional help text for the error, describing what the user can do to fix it. |
/// | `category`  | Optional `ErrorCategory`; defaults to `ErrorCategory::Parse`.                 |
///
/// Each tag accepts an expression. For structs with named fields, the expression is evaluated
/// with the members of the struct in scope (as references), so they can be used in the
/// expression. Tuple structs are not supported.
///
/// The generated code refers to `ariadne` and `mentor_error` by path, so the crate deriving the
/// trait must depend on both.
#[proc_macro_derive(ErrorKind, attributes(error))]
pub fn error_kind(item: TokenStream) -> TokenStream {
    let target = parse_macro_input!(item as ErrorKindTarget);
    let name = &target.name;
    quote! {
        impl mentor_error::ErrorKind for #name {
            #target
        }
    }.into()
}
