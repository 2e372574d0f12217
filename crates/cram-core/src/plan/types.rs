//! Study plan data model.
//!
//! These types decode the JSON the upstream model produces under the
//! structured-output constraint, and serialize back to the caller
//! field-for-field. Block types are a closed enum: an unknown `type`
//! string is a decode error, never a silent fallthrough.

use serde::{Deserialize, Serialize};

/// A complete generated study plan: topics, timed blocks, and a quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyPlan {
    pub topics: Vec<String>,
    pub plan: PlanBlocks,
    pub quiz: Vec<QuizItem>,
}

/// Wrapper object holding the ordered block sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanBlocks {
    pub blocks: Vec<Block>,
}

/// One scheduled segment of the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub kind: BlockType,
    pub minutes: u32,
    pub description: String,
}

/// Kind of a study block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockType {
    Focus,
    Break,
    Practice,
    Review,
    Quiz,
}

/// One multiple-choice quiz item. `choices` always has exactly four
/// entries under the schema constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
    pub question: String,
    pub choices: Vec<String>,
    pub correct_index: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "topics": ["Light reactions", "Calvin cycle"],
        "plan": {
            "blocks": [
                {"type": "Focus", "minutes": 10, "description": "Read the overview"},
                {"type": "Break", "minutes": 5, "description": "Step away"},
                {"type": "Focus", "minutes": 15, "description": "Work through the cycle"}
            ]
        },
        "quiz": [
            {"question": "Where do light reactions occur?",
             "choices": ["Stroma", "Thylakoid", "Cytosol", "Nucleus"],
             "correctIndex": 1},
            {"question": "What does the Calvin cycle fix?",
             "choices": ["O2", "N2", "CO2", "H2O"],
             "correctIndex": 2},
            {"question": "Main product of photosynthesis?",
             "choices": ["Glucose", "ATP only", "Protein", "Lipids"],
             "correctIndex": 0}
        ]
    }"#;

    #[test]
    fn decodes_complete_plan() {
        let plan: StudyPlan = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(plan.topics.len(), 2);
        assert_eq!(plan.plan.blocks.len(), 3);
        assert_eq!(plan.plan.blocks[0].kind, BlockType::Focus);
        assert_eq!(plan.plan.blocks[1].kind, BlockType::Break);
        assert_eq!(plan.quiz.len(), 3);
        assert_eq!(plan.quiz[0].correct_index, 1);
    }

    #[test]
    fn roundtrips_field_for_field() {
        let plan: StudyPlan = serde_json::from_str(SAMPLE).unwrap();
        let encoded = serde_json::to_value(&plan).unwrap();
        let original: serde_json::Value = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(encoded, original);
    }

    #[test]
    fn unknown_block_type_is_a_decode_error() {
        let bad = r#"{"type": "Nap", "minutes": 5, "description": "zzz"}"#;
        let result: Result<Block, _> = serde_json::from_str(bad);
        assert!(result.is_err(), "unknown block type should fail to decode");
    }

    #[test]
    fn quiz_item_uses_camel_case_index() {
        let item: QuizItem = serde_json::from_str(
            r#"{"question":"q","choices":["a","b","c","d"],"correctIndex":3}"#,
        )
        .unwrap();
        assert_eq!(item.correct_index, 3);
        let back = serde_json::to_string(&item).unwrap();
        assert!(back.contains("correctIndex"));
    }

    #[test]
    fn block_type_serializes_as_pascal_case() {
        let v = serde_json::to_value(BlockType::Practice).unwrap();
        assert_eq!(v, serde_json::json!("Practice"));
    }
}
