//! Ordered CSS declaration and transform-function sets

/// Format a CSS length: at most three decimals, no trailing zeros, no `-0`
pub fn format_number(value: f64) -> String {
    format_with_precision(value, 1_000.0)
}

/// Format a scale factor: at most six decimals
pub fn format_ratio(value: f64) -> String {
    format_with_precision(value, 1_000_000.0)
}

fn format_with_precision(value: f64, factor: f64) -> String {
    let rounded = (value * factor).round() / factor;
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// Ordered `name -> value` slots; `None` values are kept but never emitted
#[derive(Clone, Debug, Default, PartialEq)]
struct OrderedSlots {
    entries: Vec<(String, Option<String>)>,
}

impl OrderedSlots {
    /// Last write wins; a repeated name keeps its first position
    fn set(&mut self, name: &str, value: Option<String>) {
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, v)| v.as_deref())
    }

    fn present(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .filter_map(|(n, v)| v.as_deref().map(|v| (n.as_str(), v)))
    }
}

/// Ordered CSS property declarations for a single style write
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StyleDeclarations {
    slots: OrderedSlots,
}

impl StyleDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property; `None` omits it from the output entirely
    pub fn set(&mut self, property: &str, value: Option<String>) -> &mut Self {
        self.slots.set(property, value);
        self
    }

    /// Set a pixel length
    pub fn set_px(&mut self, property: &str, value: f64) -> &mut Self {
        self.set(property, Some(format!("{}px", format_number(value))))
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.slots.get(property)
    }

    /// Whether no declaration would be emitted
    pub fn is_empty(&self) -> bool {
        self.slots.present().next().is_none()
    }

    /// `prop: value; prop: value`
    pub fn to_css_text(&self) -> String {
        self.slots
            .present()
            .map(|(property, value)| format!("{}: {}", property, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Ordered transform functions for a `transform` value
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformList {
    slots: OrderedSlots,
}

impl TransformList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a function's arguments; `None` drops the function
    pub fn set(&mut self, function: &str, args: Option<String>) -> &mut Self {
        self.slots.set(function, args);
        self
    }

    /// `fn(args) fn(args)`, or `None` when no function is present
    pub fn to_css_value(&self) -> Option<String> {
        let value = self
            .slots
            .present()
            .map(|(function, args)| format!("{}({})", function, args))
            .collect::<Vec<_>>()
            .join(" ");
        (!value.is_empty()).then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(320.0), "320");
        assert_eq!(format_number(12.5), "12.5");
        assert_eq!(format_number(1.0 / 3.0), "0.333");
        assert_eq!(format_number(-0.0001), "0");
        assert_eq!(format_ratio(2.0), "2");
        assert_eq!(format_ratio(1.0 / 3.0), "0.333333");
    }

    #[test]
    fn test_last_write_wins_in_first_position() {
        let mut decls = StyleDeclarations::new();
        decls.set_px("height", 1.0);
        decls.set_px("left", 2.0);
        decls.set_px("height", 3.0);
        assert_eq!(decls.to_css_text(), "height: 3px; left: 2px");
    }

    #[test]
    fn test_none_values_are_omitted() {
        let mut decls = StyleDeclarations::new();
        decls.set("opacity", None);
        assert!(decls.is_empty());
        assert_eq!(decls.to_css_text(), "");

        decls.set_px("top", 5.0);
        decls.set("top", None);
        assert!(decls.is_empty());
    }

    #[test]
    fn test_transform_list() {
        let mut transform = TransformList::new();
        assert_eq!(transform.to_css_value(), None);

        transform.set("translateX", Some("10px".to_string()));
        transform.set("rotate", None);
        transform.set("translateY", Some("20px".to_string()));
        assert_eq!(
            transform.to_css_value().as_deref(),
            Some("translateX(10px) translateY(20px)")
        );
    }
}
