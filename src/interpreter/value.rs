/// The runtime value type.
///
/// Defines the `Value` enum, its truthiness rules, numeric conversion and the
/// textual rendering used by `print` and the command-line front end.
pub mod core;
