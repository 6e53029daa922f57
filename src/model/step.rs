use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One node of a recipe's instruction tree.
///
/// In catalog data a leaf is written as a bare string and a composite as an
/// object with `text` and `substeps`:
///
/// ```yaml
/// steps:
///   - Boil water
///   - text: Prepare sauce
///     substeps:
///       - Beat eggs
///       - Grate cheese
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Step {
    Leaf(String),
    Composite { text: String, substeps: Vec<Step> },
}

impl Step {
    pub fn leaf(text: impl Into<String>) -> Self {
        Step::Leaf(text.into())
    }

    pub fn composite(text: impl Into<String>, substeps: Vec<Step>) -> Self {
        Step::Composite {
            text: text.into(),
            substeps,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Step::Leaf(text) | Step::Composite { text, .. } => text,
        }
    }

    /// Nested steps; empty for a leaf.
    pub fn substeps(&self) -> &[Step] {
        match self {
            Step::Leaf(_) => &[],
            Step::Composite { substeps, .. } => substeps,
        }
    }
}

// Tear down nested substeps with an explicit stack so dropping a very deep
// tree cannot exhaust the call stack.
impl Drop for Step {
    fn drop(&mut self) {
        let mut pending = match self {
            Step::Leaf(_) => return,
            Step::Composite { substeps, .. } => std::mem::take(substeps),
        };
        while let Some(mut step) = pending.pop() {
            if let Step::Composite { substeps, .. } = &mut step {
                pending.append(substeps);
            }
        }
    }
}

impl<'de> Deserialize<'de> for Step {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(StepVisitor)
    }
}

// Reads the string-or-object shape directly, without buffering subtrees.
struct StepVisitor;

impl<'de> Visitor<'de> for StepVisitor {
    type Value = Step;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a step string or a map with `text` and optional `substeps`")
    }

    fn visit_str<E: de::Error>(self, text: &str) -> Result<Step, E> {
        Ok(Step::leaf(text))
    }

    fn visit_string<E: de::Error>(self, text: String) -> Result<Step, E> {
        Ok(Step::Leaf(text))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Step, A::Error> {
        let mut text: Option<String> = None;
        let mut substeps: Option<Vec<Step>> = None;
        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                "text" if text.is_some() => return Err(de::Error::duplicate_field("text")),
                "text" => text = Some(map.next_value()?),
                "substeps" if substeps.is_some() => {
                    return Err(de::Error::duplicate_field("substeps"))
                }
                "substeps" => substeps = Some(map.next_value()?),
                _ => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }
        let text = text.ok_or_else(|| de::Error::missing_field("text"))?;
        Ok(Step::composite(text, substeps.unwrap_or_default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_untagged_deserialization() {
        let yaml = indoc! {r#"
            - Boil water
            - text: Prepare sauce
              substeps:
                - Beat eggs
                - text: Season
                  substeps: [Add pepper]
            - text: Rest
        "#};

        let steps: Vec<Step> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            steps,
            vec![
                Step::leaf("Boil water"),
                Step::composite(
                    "Prepare sauce",
                    vec![
                        Step::leaf("Beat eggs"),
                        Step::composite("Season", vec![Step::leaf("Add pepper")]),
                    ]
                ),
                Step::composite("Rest", vec![]),
            ]
        );
    }

    #[test]
    fn test_json_and_rejected_shapes() {
        let step: Step =
            serde_json::from_str(r#"{"substeps": ["Stir"], "note": "optional", "text": "Cook"}"#)
                .unwrap();
        assert_eq!(step, Step::composite("Cook", vec![Step::leaf("Stir")]));

        assert!(serde_json::from_str::<Step>(r#"{"substeps": []}"#).is_err());
        assert!(serde_json::from_str::<Step>(r#"{"text": "a", "text": "b"}"#).is_err());
        assert!(serde_json::from_str::<Step>("42").is_err());
    }

    #[test]
    fn test_serializes_to_same_shape() {
        let steps = vec![
            Step::leaf("Boil water"),
            Step::composite("Prepare sauce", vec![Step::leaf("Beat eggs")]),
        ];
        let json = serde_json::to_string(&steps).unwrap();
        assert_eq!(
            json,
            r#"["Boil water",{"text":"Prepare sauce","substeps":["Beat eggs"]}]"#
        );
        assert_eq!(serde_json::from_str::<Vec<Step>>(&json).unwrap(), steps);
    }

    #[test]
    fn test_accessors() {
        let step = Step::composite("Season", vec![Step::leaf("Add pepper")]);
        assert_eq!(step.text(), "Season");
        assert_eq!(step.substeps().len(), 1);
        assert!(Step::leaf("Mix").substeps().is_empty());
    }

    #[test]
    fn test_drop_deep_tree() {
        let mut step = Step::leaf("bottom");
        for level in 0..100_000 {
            step = Step::composite(format!("level {level}"), vec![step]);
        }
        drop(step);
    }
}
