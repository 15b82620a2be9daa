/// Splits the raw command-line value into its URL list.
///
/// The separator is the exact sequence `", "`. No other trimming or
/// normalization is applied; each URL's identity is its literal text.
pub fn parse_url_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(", ").map(ToOwned::to_owned).collect()
}
