//! Fixed column sets for tabular output.

/// A row type with a fixed, ordered column set.
///
/// The column set belongs to the type, so an empty collection of rows still
/// knows which columns it has (used when writing headers for empty files).
pub trait Tabular {
    /// Column names in schema order.
    const COLUMNS: &'static [&'static str];
}
