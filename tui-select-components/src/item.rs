//! Selectable entries

use ratatui::text::Line;

/// One selectable entry of a select field
///
/// `value` is the key compared against the host's selection. Values should be
/// unique within a list; when they are not, the first match in list order wins.
#[derive(Debug, Clone, PartialEq)]
pub struct ListItem<T> {
    /// Text shown in the field once this item is selected
    pub label: String,
    pub value: T,
    /// Row content drawn in the overlay instead of the label
    pub custom: Option<Line<'static>>,
}

impl<T> ListItem<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
            custom: None,
        }
    }

    /// Draw `line` in the overlay row instead of the plain label
    pub fn with_custom(mut self, line: impl Into<Line<'static>>) -> Self {
        self.custom = Some(line.into());
        self
    }

    /// Content of this item's overlay row
    pub fn row_line(&self) -> Line<'static> {
        match &self.custom {
            Some(line) => line.clone(),
            None => Line::raw(self.label.clone()),
        }
    }
}

/// Index of the first item whose value equals `value`
pub fn position_of<T: PartialEq>(list: &[ListItem<T>], value: &T) -> Option<usize> {
    list.iter().position(|item| item.value == *value)
}

/// Label of the first item whose value equals `value`
pub fn label_for<'a, T: PartialEq>(list: &'a [ListItem<T>], value: &T) -> Option<&'a str> {
    position_of(list, value).map(|i| list[i].label.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::text::Span;

    #[test]
    fn test_first_match_wins() {
        let list = vec![
            ListItem::new("First", 1),
            ListItem::new("Second", 2),
            ListItem::new("Duplicate", 1),
        ];
        assert_eq!(label_for(&list, &1), Some("First"));
        assert_eq!(position_of(&list, &2), Some(1));
        assert_eq!(label_for(&list, &3), None);
    }

    #[test]
    fn test_row_line_prefers_custom() {
        let plain = ListItem::new("Plain", "p");
        assert_eq!(plain.row_line(), Line::raw("Plain"));

        let custom = ListItem::new("Fancy", "f").with_custom(vec![
            Span::raw("★ "),
            Span::raw("Fancy"),
        ]);
        assert_eq!(custom.row_line().to_string(), "★ Fancy");
    }
}
