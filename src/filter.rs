//! Client-side list filtering
//!
//! Every list view fetches the full collection and narrows it locally. A
//! filter matches when the query appears as a case-insensitive substring in
//! any of the row's searchable fields. The set of fields is fixed per entity
//! through the [`Searchable`] implementation.

/// A row type that exposes the fields list filtering inspects
pub trait Searchable {
    /// The field values the filter query is matched against
    fn search_fields(&self) -> Vec<String>;
}

/// Narrow rows to those matching the filter query.
///
/// Matching is a case-insensitive substring test against each searchable
/// field. An empty or whitespace-only query keeps every row.
///
/// # Examples
///
/// ```
/// use prospect::filter::{filter_rows, Searchable};
///
/// struct Row(&'static str);
///
/// impl Searchable for Row {
///     fn search_fields(&self) -> Vec<String> {
///         vec![self.0.to_string()]
///     }
/// }
///
/// let rows = vec![Row("Dupont"), Row("Martin")];
/// let matched = filter_rows(&rows, "dup");
/// assert_eq!(matched.len(), 1);
/// ```
pub fn filter_rows<'a, T: Searchable>(rows: &'a [T], query: &str) -> Vec<&'a T> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return rows.iter().collect();
    }

    rows.iter()
        .filter(|row| {
            row.search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&query))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestRow {
        nom: String,
        email: String,
    }

    impl TestRow {
        fn new(nom: &str, email: &str) -> Self {
            Self {
                nom: nom.to_string(),
                email: email.to_string(),
            }
        }
    }

    impl Searchable for TestRow {
        fn search_fields(&self) -> Vec<String> {
            vec![self.nom.clone(), self.email.clone()]
        }
    }

    fn sample_rows() -> Vec<TestRow> {
        vec![
            TestRow::new("Dupont", "marie.dupont@example.com"),
            TestRow::new("Martin", "paul.martin@example.com"),
            TestRow::new("Bernard", "luc.bernard@example.com"),
        ]
    }

    #[test]
    fn test_filter_narrows_to_matching_rows() {
        let rows = sample_rows();
        let matched = filter_rows(&rows, "dupont");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].nom, "Dupont");
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let rows = sample_rows();
        assert_eq!(filter_rows(&rows, "DUPONT").len(), 1);
        assert_eq!(filter_rows(&rows, "DuPoNt").len(), 1);
    }

    #[test]
    fn test_filter_matches_substrings() {
        let rows = sample_rows();
        let matched = filter_rows(&rows, "upo");
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn test_filter_matches_any_field() {
        let rows = sample_rows();
        let matched = filter_rows(&rows, "paul.martin");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].nom, "Martin");
    }

    #[test]
    fn test_empty_query_keeps_all_rows() {
        let rows = sample_rows();
        assert_eq!(filter_rows(&rows, "").len(), 3);
        assert_eq!(filter_rows(&rows, "   ").len(), 3);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let rows = sample_rows();
        assert!(filter_rows(&rows, "zz").is_empty());
    }

    #[test]
    fn test_filter_on_empty_collection() {
        let rows: Vec<TestRow> = Vec::new();
        assert!(filter_rows(&rows, "dupont").is_empty());
    }
}
