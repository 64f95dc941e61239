//! Single-select filters and action descriptors.

use serde::Serialize;

type FilterFn<T> = Box<dyn Fn(&str, &T) -> bool + Send + Sync>;

/// One selectable filter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    /// Machine value carried in table state.
    pub value: String,
    /// Label shown to the visitor.
    pub label: String,
}

impl FilterOption {
    /// Build an option from a value and label.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// A single-select filter: enumerated options plus a row predicate.
///
/// The predicate receives the selected option value and a row; rows for which
/// it returns `false` are hidden.
pub struct Filter<T> {
    placeholder: String,
    options: Vec<FilterOption>,
    predicate: FilterFn<T>,
}

impl<T> Filter<T> {
    /// Build a filter.
    pub fn new(
        placeholder: impl Into<String>,
        options: Vec<FilterOption>,
        predicate: impl Fn(&str, &T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            placeholder: placeholder.into(),
            options,
            predicate: Box::new(predicate),
        }
    }

    /// Placeholder shown when nothing is selected.
    #[must_use]
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Available options in display order.
    #[must_use]
    pub fn options(&self) -> &[FilterOption] {
        &self.options
    }

    /// Whether `value` names one of the options.
    #[must_use]
    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }

    pub(crate) fn matches(&self, value: &str, item: &T) -> bool {
        (self.predicate)(value, item)
    }
}

impl<T> std::fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Filter")
            .field("placeholder", &self.placeholder)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// A control rendered in a row's action slot or above the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Stable action identifier, such as `view` or `edit`.
    pub id: String,
    /// Visible label.
    pub label: String,
    /// Target the action points at.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Action {
    /// Action without a target.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            href: None,
        }
    }

    /// Attach a target to the action.
    #[must_use]
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }
}
