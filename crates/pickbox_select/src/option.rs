//! Option records shown by the select

/// A selectable option
///
/// `value` identifies the option (it is what the host stores as the
/// selection); `name` is the label that is displayed and filtered on.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectOption {
    /// Display label, matched against the query
    pub name: String,
    /// Unique identifier
    pub value: String,
}

impl SelectOption {
    /// Create a new option with name and value
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Case-sensitive prefix match against the name
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        self.name.starts_with(prefix)
    }
}

/// Position of the option identified by `value`
pub fn position_of(options: &[SelectOption], value: Option<&str>) -> Option<usize> {
    let value = value?;
    options.iter().position(|o| o.value == value)
}

/// Name of the option identified by `value`, if it is in the catalog
pub fn find_selected_name<'a>(options: &'a [SelectOption], value: Option<&str>) -> Option<&'a str> {
    position_of(options, value).map(|idx| options[idx].name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Vec<SelectOption> {
        vec![
            SelectOption::new("Alpha", "a"),
            SelectOption::new("Beta", "b"),
        ]
    }

    #[test]
    fn test_select_option() {
        let opt = SelectOption::new("Label", "value");
        assert_eq!(opt.name, "Label");
        assert_eq!(opt.value, "value");
        assert!(opt.matches_prefix("La"));
        assert!(!opt.matches_prefix("la"));
        assert!(opt.matches_prefix(""));
    }

    #[test]
    fn test_find_selected_name() {
        let options = catalog();
        assert_eq!(find_selected_name(&options, Some("b")), Some("Beta"));
        assert_eq!(find_selected_name(&options, Some("z")), None);
        assert_eq!(find_selected_name(&options, None), None);
    }

    #[test]
    fn test_position_of() {
        let options = catalog();
        assert_eq!(position_of(&options, Some("a")), Some(0));
        assert_eq!(position_of(&options, Some("b")), Some(1));
        assert_eq!(position_of(&options, None), None);
    }
}
