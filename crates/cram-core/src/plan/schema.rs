//! Structured-output schema for the upstream model.
//!
//! This is the strict JSON shape the completion API is told to produce:
//! every object closes `additionalProperties`, every field is required.
//! The schema is static; it does not vary with session parameters.

use serde_json::{Value, json};

/// Schema name sent alongside the format directive.
pub const SCHEMA_NAME: &str = "study_plan";

/// Build the strict study-plan output schema.
pub fn study_plan_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "topics": {
                "type": "array",
                "items": { "type": "string" },
                "minItems": 1,
                "maxItems": 20
            },
            "plan": {
                "type": "object",
                "properties": {
                    "blocks": {
                        "type": "array",
                        "minItems": 2,
                        "maxItems": 20,
                        "items": {
                            "type": "object",
                            "properties": {
                                "type": {
                                    "type": "string",
                                    "enum": ["Focus", "Break", "Practice", "Review", "Quiz"]
                                },
                                "minutes": { "type": "integer", "minimum": 1, "maximum": 180 },
                                "description": { "type": "string" }
                            },
                            "required": ["type", "minutes", "description"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["blocks"],
                "additionalProperties": false
            },
            "quiz": {
                "type": "array",
                "minItems": 3,
                "maxItems": 5,
                "items": {
                    "type": "object",
                    "properties": {
                        "question": { "type": "string" },
                        "choices": {
                            "type": "array",
                            "items": { "type": "string" },
                            "minItems": 4,
                            "maxItems": 4
                        },
                        "correctIndex": { "type": "integer", "minimum": 0, "maximum": 3 }
                    },
                    "required": ["question", "choices", "correctIndex"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["topics", "plan", "quiz"],
        "additionalProperties": false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn top_level_requires_all_three_sections() {
        let schema = study_plan_schema();
        assert_eq!(
            schema["required"],
            json!(["topics", "plan", "quiz"])
        );
        assert_eq!(schema["additionalProperties"], json!(false));
    }

    #[test]
    fn block_type_enum_is_closed() {
        let schema = study_plan_schema();
        let block_type =
            &schema["properties"]["plan"]["properties"]["blocks"]["items"]["properties"]["type"];
        assert_eq!(
            block_type["enum"],
            json!(["Focus", "Break", "Practice", "Review", "Quiz"])
        );
    }

    #[test]
    fn block_minutes_are_bounded() {
        let schema = study_plan_schema();
        let minutes =
            &schema["properties"]["plan"]["properties"]["blocks"]["items"]["properties"]["minutes"];
        assert_eq!(minutes["minimum"], json!(1));
        assert_eq!(minutes["maximum"], json!(180));
    }

    #[test]
    fn block_count_is_bounded() {
        let schema = study_plan_schema();
        let blocks = &schema["properties"]["plan"]["properties"]["blocks"];
        assert_eq!(blocks["minItems"], json!(2));
        assert_eq!(blocks["maxItems"], json!(20));
    }

    #[test]
    fn quiz_requires_exactly_four_choices() {
        let schema = study_plan_schema();
        let choices = &schema["properties"]["quiz"]["items"]["properties"]["choices"];
        assert_eq!(choices["minItems"], json!(4));
        assert_eq!(choices["maxItems"], json!(4));
    }

    #[test]
    fn quiz_count_and_answer_index_are_bounded() {
        let schema = study_plan_schema();
        assert_eq!(schema["properties"]["quiz"]["minItems"], json!(3));
        assert_eq!(schema["properties"]["quiz"]["maxItems"], json!(5));
        let index = &schema["properties"]["quiz"]["items"]["properties"]["correctIndex"];
        assert_eq!(index["minimum"], json!(0));
        assert_eq!(index["maximum"], json!(3));
    }

    #[test]
    fn every_object_closes_additional_properties() {
        let schema = study_plan_schema();
        for ptr in [
            "",
            "/properties/plan",
            "/properties/plan/properties/blocks/items",
            "/properties/quiz/items",
        ] {
            let obj = schema.pointer(ptr).unwrap();
            assert_eq!(
                obj["additionalProperties"],
                json!(false),
                "object at {ptr:?} should be strict"
            );
        }
    }
}
