//! Tests for pre- and post-application patch checks.

use serde_json::{Value, json};
use shotsplit_core::{Constraints, Op, Shot, ShotKind};
use shotsplit_error::{InvariantErrorKind, PatchErrorKind};
use shotsplit_refine::{
    parse_patch, validate_constraints, validate_count_range, validate_ops_syntax,
    validate_patch_shape, validate_text_conservation,
};

fn patch_with_ops(ops: Value) -> Value {
    json!({
        "schema_version": "shotsplit_patch.v0.1",
        "chapter_id": "ch_0001",
        "constraints": {"min_shots": 60, "max_shots": 120, "forbid_cross_scene_break": true},
        "ops": ops,
    })
}

fn shots(n: usize) -> Vec<Shot> {
    (0..n)
        .map(|i| Shot::new(i, ShotKind::Mixed, format!("第{}句。", i)))
        .collect()
}

#[test]
fn test_parse_valid_patch() {
    let patch = parse_patch(&patch_with_ops(json!([
        {"op": "split", "idx": 0, "at": "前半。"},
        {"op": "merge", "start_idx": 1, "end_idx": 2},
        {"op": "move_tail", "from_idx": 3, "to_idx": 4, "sentences": 1},
        {"op": "tag", "idx": 5, "tags": {"mood": "tense"}},
    ])))
    .unwrap();

    assert_eq!(patch.chapter_id, "ch_0001");
    assert_eq!(patch.ops.len(), 4);
    assert_eq!(
        patch.ops[2],
        Op::MoveTail {
            from_idx: 3,
            to_idx: 4,
            sentence_count: 1
        }
    );
    assert_eq!(patch.constraints.max_shots, 120);
}

#[test]
fn test_empty_ops_is_valid() {
    let patch = parse_patch(&patch_with_ops(json!([]))).unwrap();
    assert!(patch.ops.is_empty());
}

#[test]
fn test_non_object_patch() {
    let err = validate_patch_shape(&json!([1, 2, 3])).unwrap_err();
    assert_eq!(err.kind, PatchErrorKind::NotAnObject);
}

#[test]
fn test_missing_key() {
    let mut patch = patch_with_ops(json!([]));
    patch.as_object_mut().unwrap().remove("constraints");

    let err = validate_patch_shape(&patch).unwrap_err();
    assert_eq!(err.kind, PatchErrorKind::MissingKey("constraints".to_string()));
}

#[test]
fn test_unexpected_key() {
    let mut patch = patch_with_ops(json!([]));
    patch["notes"] = json!("extra commentary");

    let err = validate_patch_shape(&patch).unwrap_err();
    assert_eq!(err.kind, PatchErrorKind::UnexpectedKey("notes".to_string()));
}

#[test]
fn test_wrong_schema_version() {
    let mut patch = patch_with_ops(json!([]));
    patch["schema_version"] = json!("shotsplit_patch.v0.2");

    let err = validate_patch_shape(&patch).unwrap_err();
    assert_eq!(
        err.kind,
        PatchErrorKind::UnsupportedSchemaVersion("shotsplit_patch.v0.2".to_string())
    );
}

#[test]
fn test_chapter_id_must_be_string() {
    let mut patch = patch_with_ops(json!([]));
    patch["chapter_id"] = json!(7);

    let err = validate_patch_shape(&patch).unwrap_err();
    assert!(err.to_string().contains("chapter_id must be a string"));
}

#[test]
fn test_ops_must_be_list() {
    let err = validate_patch_shape(&patch_with_ops(json!({"op": "merge"}))).unwrap_err();
    assert!(err.to_string().contains("ops must be a list"));
}

#[test]
fn test_unknown_op_rejected() {
    let ops = json!([
        {"op": "merge", "start_idx": 0, "end_idx": 1},
        {"op": "rewrite", "idx": 0, "text": "新的文字"},
    ]);

    let err = validate_ops_syntax(ops.as_array().unwrap()).unwrap_err();
    assert_eq!(
        err.kind,
        PatchErrorKind::InvalidOpType {
            position: 1,
            op: "rewrite".to_string()
        }
    );
}

#[test]
fn test_unknown_op_reported_before_malformed_op() {
    let ops = json!([
        {"op": "merge", "start_idx": "zero"},
        {"op": "rewrite"},
    ]);

    let err = validate_ops_syntax(ops.as_array().unwrap()).unwrap_err();
    assert!(matches!(err.kind, PatchErrorKind::InvalidOpType { position: 1, .. }));
}

#[test]
fn test_op_without_tag() {
    let ops = json!([{"idx": 0}]);

    let err = validate_ops_syntax(ops.as_array().unwrap()).unwrap_err();
    assert!(matches!(err.kind, PatchErrorKind::InvalidOpType { position: 0, .. }));
}

#[test]
fn test_op_not_object() {
    let ops = json!(["merge"]);

    let err = validate_ops_syntax(ops.as_array().unwrap()).unwrap_err();
    assert_eq!(err.kind, PatchErrorKind::OpNotObject(0));
}

#[test]
fn test_malformed_op_arguments() {
    let ops = json!([{"op": "split", "idx": 0}]);

    let err = validate_ops_syntax(ops.as_array().unwrap()).unwrap_err();
    assert!(matches!(
        err.kind,
        PatchErrorKind::MalformedOp { position: 0, ref op, .. } if op == "split"
    ));
}

#[test]
fn test_constraints_types() {
    let err = validate_constraints(&json!({
        "min_shots": "60",
        "max_shots": 120,
        "forbid_cross_scene_break": true,
    }))
    .unwrap_err();
    assert!(err.to_string().contains("constraints.min_shots must be an integer"));

    let err = validate_constraints(&json!({
        "min_shots": 60,
        "max_shots": 120,
        "forbid_cross_scene_break": "yes",
    }))
    .unwrap_err();
    assert!(
        err.to_string()
            .contains("constraints.forbid_cross_scene_break must be a boolean")
    );

    let err = validate_constraints(&json!({"min_shots": 60, "max_shots": 120})).unwrap_err();
    assert_eq!(
        err.kind,
        PatchErrorKind::ConstraintsMissing("forbid_cross_scene_break".to_string())
    );
}

#[test]
fn test_echoed_constraint_values_are_not_enforced() {
    let advisory = validate_constraints(&json!({
        "min_shots": -5,
        "max_shots": 3,
        "forbid_cross_scene_break": false,
    }))
    .unwrap();
    assert_eq!(advisory.min_shots, -5);
}

#[test]
fn test_text_conservation_ignores_whitespace() {
    let base = vec![Shot::new(0, ShotKind::Mixed, "　　他推开门。\n屋里很暗。")];
    let refined = vec![
        Shot::new(0, ShotKind::Mixed, "他推开门。"),
        Shot::new(1, ShotKind::Mixed, "屋里很暗。"),
    ];

    assert!(validate_text_conservation(&base, &refined).is_ok());
}

#[test]
fn test_text_conservation_detects_edit() {
    let base = vec![Shot::new(0, ShotKind::Mixed, "他推开门。")];
    let refined = vec![Shot::new(0, ShotKind::Mixed, "他推开了门。")];

    let err = validate_text_conservation(&base, &refined).unwrap_err();
    assert_eq!(
        err.kind,
        InvariantErrorKind::TextConservation {
            baseline_chars: 5,
            refined_chars: 6
        }
    );
}

#[test]
fn test_count_range_uses_widened_window() {
    let bounds = Constraints::new(60, 120, true).effective_bounds(20);

    assert!(validate_count_range(&shots(20), bounds).is_ok());

    let err = validate_count_range(&shots(19), bounds).unwrap_err();
    assert!(
        err.to_string()
            .contains("shot count out of range: 19 not in [20,120]")
    );
}

#[test]
fn test_count_range_upper_bound() {
    let bounds = Constraints::new(1, 3, true).effective_bounds(2);

    assert!(validate_count_range(&shots(3), bounds).is_ok());
    assert!(validate_count_range(&shots(4), bounds).is_err());
}
