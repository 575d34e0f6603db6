use serde::Serialize;

/// A unit of work for one day: a display name and the hours it takes.
/// The hours are fixed for the lifetime of an optimization run.
#[derive(Serialize, Debug, Clone)]
pub struct RouteDemand {
    name: String,
    hours: f64,
}

impl RouteDemand {
    pub fn new(name: impl Into<String>, hours: f64) -> Self {
        Self {
            name: name.into(),
            hours,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hours(&self) -> f64 {
        self.hours
    }

    /// Split the display name into the route number and its description.
    /// Persisted assignment records carry the two halves separately.
    pub fn identifier(&self) -> RouteIdentifier<'_> {
        RouteIdentifier::from_display_name(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteIdentifier<'a> {
    pub number: &'a str,
    pub description: &'a str,
}

impl<'a> RouteIdentifier<'a> {
    /// Display names look like `"12 - Downtown loop"`; older data has a
    /// plain space separator, and some routes are a bare number.
    pub fn from_display_name(name: &'a str) -> Self {
        if let Some((number, description)) = name.split_once(" - ") {
            return Self {
                number: number.trim(),
                description: description.trim(),
            };
        }

        match name.split_once(' ') {
            Some((number, description)) => Self {
                number: number.trim(),
                description: description.trim(),
            },
            None => Self {
                number: name,
                description: "",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_with_dash_separator() {
        let id = RouteIdentifier::from_display_name("12 - Downtown loop");
        assert_eq!(id.number, "12");
        assert_eq!(id.description, "Downtown loop");
    }

    #[test]
    fn test_split_with_space_separator() {
        let id = RouteIdentifier::from_display_name("12 Downtown loop");
        assert_eq!(id.number, "12");
        assert_eq!(id.description, "Downtown loop");
    }

    #[test]
    fn test_bare_number() {
        let id = RouteIdentifier::from_display_name("12");
        assert_eq!(id.number, "12");
        assert_eq!(id.description, "");
    }
}
