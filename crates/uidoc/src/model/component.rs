//! Components: named, reusable layer trees with a declared prop interface.

use serde::{Deserialize, Serialize};

use crate::model::id::Id;
use crate::model::layer::Layer;
use crate::ordmap::OrderedMap;

/// A declared prop of a component's public interface.
///
/// Prop names are unique within a component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentProp {
    pub name: String,
    pub default_value: Option<String>,
}

/// A named preset of prop values, used to preview a component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentExample {
    pub id: Id,
    pub name: String,
    /// Prop name → value, keyed by the component's own prop names.
    #[serde(with = "crate::ordmap::as_object")]
    pub props: OrderedMap<String, String>,
}

/// A named, reusable layer tree plus its prop interface and example presets.
///
/// `layout` is the root of the layer tree and may be absent for a component
/// that has not been laid out yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub name: String,
    pub props: Vec<ComponentProp>,
    pub examples: Vec<ComponentExample>,
    pub layout: Option<Layer>,
}

impl Component {
    /// Looks up a declared prop by name.
    pub fn prop(&self, name: &str) -> Option<&ComponentProp> {
        self.props.iter().find(|p| p.name == name)
    }

    /// True if a prop with this name is declared.
    pub fn has_prop(&self, name: &str) -> bool {
        self.prop(name).is_some()
    }

    /// Looks up an example preset by id.
    pub fn example(&self, id: Id) -> Option<&ComponentExample> {
        self.examples.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory;

    #[test]
    fn test_prop_lookup() {
        let mut component = factory::new_component("card");
        component.props.push(ComponentProp {
            name: "title".to_string(),
            default_value: Some("Untitled".to_string()),
        });

        assert!(component.has_prop("title"));
        assert!(!component.has_prop("subtitle"));
        assert_eq!(
            component.prop("title").unwrap().default_value.as_deref(),
            Some("Untitled")
        );
    }

    #[test]
    fn test_example_lookup() {
        let mut component = factory::new_component("card");
        let example = factory::new_example("default");
        let id = example.id;
        component.examples.push(example);

        assert_eq!(component.example(id).unwrap().name, "default");
        assert!(component.example(Id::from_u128(999)).is_none());
    }
}
