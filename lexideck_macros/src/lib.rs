mod record;

use proc_macro::TokenStream;

/// Derive macro for the `Record` trait.
///
/// Implements `lexideck::Record` for a struct, wiring up the collection
/// name and the id accessor.
///
/// # Usage
///
/// ```ignore
/// #[derive(Serialize, Deserialize, Clone, Record)]
/// #[record(collection = "courses")]
/// struct Course {
///     #[record(id)]
///     pub id: String,
///     pub name: String,
/// }
/// ```
///
/// Both attributes are optional: the collection name defaults to the
/// snake_case struct name with an `s` suffix, and the id accessor
/// defaults to a field named `id`.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}
