//! Query filtering
//!
//! The query is trimmed and matched as a case-sensitive prefix of each
//! option's name. A blank query matches everything. Catalog order is kept:
//! the result is always a subsequence of the input.

use crate::option::SelectOption;

/// Options whose name starts with the trimmed `query`, in catalog order
pub fn prefix_filter<'a>(options: &'a [SelectOption], query: &str) -> Vec<&'a SelectOption> {
    filtered_indices(options, query)
        .into_iter()
        .map(|idx| &options[idx])
        .collect()
}

/// Catalog indices of the options matching `query`, in catalog order
pub fn filtered_indices(options: &[SelectOption], query: &str) -> Vec<usize> {
    let prefix = query.trim();
    if prefix.is_empty() {
        return (0..options.len()).collect();
    }
    options
        .iter()
        .enumerate()
        .filter(|(_, opt)| opt.matches_prefix(prefix))
        .map(|(idx, _)| idx)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(n: usize) -> Vec<SelectOption> {
        (1..=n)
            .map(|i| SelectOption::new(i.to_string(), i.to_string()))
            .collect()
    }

    #[test]
    fn test_blank_query_returns_catalog() {
        let options = numbered(5);
        let all: Vec<_> = options.iter().collect();
        assert_eq!(prefix_filter(&options, ""), all);
        assert_eq!(prefix_filter(&options, "   "), all);
    }

    #[test]
    fn test_prefix_only() {
        let options = numbered(1000);
        let names: Vec<&str> = prefix_filter(&options, "5")
            .iter()
            .map(|o| o.name.as_str())
            .collect();

        assert_eq!(names.len(), 111);
        assert_eq!(&names[..3], &["5", "50", "51"]);
        assert_eq!(names[11], "500");
        assert_eq!(names.last(), Some(&"599"));
        assert!(names.iter().all(|n| n.starts_with('5')));
        // "15" contains "5" but does not start with it
        assert!(!names.contains(&"15"));
    }

    #[test]
    fn test_case_sensitive() {
        let options = vec![
            SelectOption::new("apple", "1"),
            SelectOption::new("Apricot", "2"),
            SelectOption::new("avocado", "3"),
        ];
        let names: Vec<&str> = prefix_filter(&options, "a")
            .iter()
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(names, vec!["apple", "avocado"]);
    }

    #[test]
    fn test_query_is_trimmed() {
        let options = numbered(20);
        assert_eq!(
            filtered_indices(&options, " 2 "),
            filtered_indices(&options, "2")
        );
    }

    #[test]
    fn test_order_preserved_and_repeatable() {
        let options = vec![
            SelectOption::new("b2", "x"),
            SelectOption::new("a", "y"),
            SelectOption::new("b1", "z"),
        ];
        let first = prefix_filter(&options, "b");
        let second = prefix_filter(&options, "b");
        assert_eq!(first, second);
        assert_eq!(first[0].name, "b2");
        assert_eq!(first[1].name, "b1");
    }

    #[test]
    fn test_no_matches() {
        let options = numbered(10);
        assert!(prefix_filter(&options, "x").is_empty());
        assert!(prefix_filter(&[], "1").is_empty());
    }
}
