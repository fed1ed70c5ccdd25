use crate::catalog::ParamSpec;

/// Edited parameter values keyed by parameter name, in insertion order.
/// Overwriting a key keeps its original position. All selected artifacts
/// share one namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMap {
    entries: Vec<(String, String)>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    fn insert(&mut self, name: &str, value: &str) {
        match self.entries.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => self.entries.push((name.to_string(), value.to_string())),
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = ParameterMap::new();
        for (key, value) in iter {
            map.insert(&key.into(), &value.into());
        }
        map
    }
}

pub fn set_value(map: &ParameterMap, name: &str, value: &str) -> ParameterMap {
    let mut next = map.clone();
    next.insert(name, value);
    next
}

/// Value shown for a parameter field: the edited value when present, then
/// the declared default, then empty.
pub fn display_value(map: &ParameterMap, spec: &ParamSpec) -> String {
    map.get(&spec.name)
        .map(str::to_string)
        .or_else(|| spec.default.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_value_returns_new_map_and_keeps_position() {
        let base: ParameterMap = [("a", "1"), ("b", "2")].into_iter().collect();
        let next = set_value(&base, "a", "9");

        assert_eq!(base.get("a"), Some("1"));
        assert_eq!(
            next.iter().collect::<Vec<_>>(),
            vec![("a", "9"), ("b", "2")]
        );
    }

    #[test]
    fn set_value_appends_new_keys() {
        let next = set_value(&ParameterMap::new(), "Key1", "Val1");
        assert_eq!(next.len(), 1);
        assert_eq!(next.get("Key1"), Some("Val1"));
    }

    #[test]
    fn display_value_prefers_edit_then_default_then_empty() {
        let mut spec = ParamSpec::named("p");
        assert_eq!(display_value(&ParameterMap::new(), &spec), "");

        spec.default = Some("fallback".to_string());
        assert_eq!(display_value(&ParameterMap::new(), &spec), "fallback");

        let edited = set_value(&ParameterMap::new(), "p", "");
        assert_eq!(display_value(&edited, &spec), "");
    }
}
