//! Option filtering.

/// Indices of the options whose lowercase form contains the lowercase query,
/// in their original order. An empty query keeps every option.
pub fn filter_options(query: &str, options: &[String]) -> Vec<usize> {
    if query.is_empty() {
        return (0..options.len()).collect();
    }

    let query = query.to_lowercase();
    options
        .iter()
        .enumerate()
        .filter(|(_, option)| option.to_lowercase().contains(&query))
        .map(|(index, _)| index)
        .collect()
}
