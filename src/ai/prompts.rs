use crate::types::CustomizationSelections;
use serde_json::{Value, json};

/// Used when customizations are applied before any style was picked.
pub const DEFAULT_REDESIGN_PROMPT: &str = "Redesign this room with a cohesive, contemporary interior style. Keep the room's layout, windows, and architecture intact.";

/// Used when customizations are applied on top of an existing redesign.
pub const MATERIAL_UPDATE_PROMPT: &str = "Keep the layout, furniture placement, and overall style of this room exactly as they are. Only update the materials and finishes.";

pub fn describe_selections(selections: &CustomizationSelections) -> String {
    selections
        .iter()
        .map(|(category, option)| format!("{category}: {option}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Appends the customization list to an instruction. Empty or absent selections leave it as is.
pub fn with_customizations(
    instruction: &str,
    customizations: Option<&CustomizationSelections>,
) -> String {
    match customizations {
        Some(selections) if !selections.is_empty() => format!(
            "{instruction}\n\nApply these material customizations: {}.",
            describe_selections(selections)
        ),
        _ => instruction.to_string(),
    }
}

/// Most items a lookup may return; extra items from the service are dropped.
pub const MAX_SHOPPING_ITEMS: usize = 3;

pub fn shopping_prompt(query: &str) -> String {
    format!(
        "Based on the provided image of a room and the user's request (\"{query}\"), identify up to 3 key furniture or decor items visible. For each item, provide a plausible item name, a short description, an estimated price, and a fictional but realistic-looking shoppable URL from a popular online retailer."
    )
}

/// JSON schema for the item lookup response: an array of fully populated items.
pub fn shopping_items_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "itemName": { "type": "STRING" },
                "description": { "type": "STRING" },
                "price": { "type": "STRING" },
                "purchaseUrl": { "type": "STRING" }
            },
            "required": ["itemName", "description", "price", "purchaseUrl"]
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_customizations_appends_sorted_list() {
        let mut selections = CustomizationSelections::new();
        selections.insert("Wall Color".into(), "Sage Green".into());
        selections.insert("Flooring".into(), "Walnut".into());

        let instruction = with_customizations("Make it cozy", Some(&selections));
        assert_eq!(
            instruction,
            "Make it cozy\n\nApply these material customizations: Flooring: Walnut, Wall Color: Sage Green."
        );
    }

    #[test]
    fn test_with_customizations_passthrough() {
        assert_eq!(with_customizations("Paint it", None), "Paint it");
        let empty = CustomizationSelections::new();
        assert_eq!(with_customizations("Paint it", Some(&empty)), "Paint it");
    }

    #[test]
    fn test_shopping_prompt_quotes_query() {
        let prompt = shopping_prompt("where can I buy the lamp?");
        assert!(prompt.contains("(\"where can I buy the lamp?\")"));
        assert!(prompt.contains("up to 3"));
    }

    #[test]
    fn test_schema_requires_all_fields() {
        let schema = shopping_items_schema();
        assert_eq!(schema["items"]["required"].as_array().unwrap().len(), 4);
    }
}
