//! Label escaping for Newick output.
//!
//! Names are written so that parsing the output yields the same names,
//! except that spaces in otherwise plain names become underscores.

/// Characters that cannot appear in an unquoted Newick label
const SPECIAL_CHARS: &[char] = &[',', ';', '\t', '\n', '\r', '(', ')', ':', '[', ']', '\''];

/// Returns whether `label` must be single-quoted to survive a round trip.
///
/// # Examples
/// ```
/// # use tipmap::parser::utils::needs_quotes;
/// assert!(!needs_quotes("Pukeko"));
/// assert!(!needs_quotes("Australasian Swamphen"));
/// assert!(needs_quotes("Pu[ke]ko"));
/// assert!(needs_quotes("'Pukeko'"));
/// ```
pub fn needs_quotes(label: &str) -> bool {
    label.contains(SPECIAL_CHARS)
}

/// Escapes a label for use in Newick strings.
///
/// Labels with special characters are wrapped in single quotes, with
/// internal single quotes doubled. Otherwise spaces become underscores.
///
/// # Examples
/// ```
/// # use tipmap::parser::utils::escape_label;
/// assert_eq!(escape_label("Pukeko"), "Pukeko");
/// assert_eq!(escape_label("Pu[ke]ko"), "'Pu[ke]ko'");
/// assert_eq!(escape_label("Australasian Swamphen"), "Australasian_Swamphen");
/// assert_eq!(escape_label("Baillon's Crake"), "'Baillon''s Crake'");
/// assert_eq!(escape_label("'quoted'"), "'''quoted'''");
/// ```
pub fn escape_label(label: &str) -> String {
    if needs_quotes(label) {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.replace(' ', "_")
    }
}
