//! Patch validation, before and after application.
//!
//! Pre-application checks work on the raw JSON value so that a collaborator's
//! mistakes are reported precisely (missing key, unknown op tag, wrong type)
//! instead of as a generic deserialization failure. Post-application checks
//! enforce the text-conservation law and the effective count window.

use serde_json::{Map, Value};
use shotsplit_core::{
    AdvisoryConstraints, OP_NAMES, Op, PATCH_SCHEMA_VERSION, Patch, Shot, ShotBounds,
    normalized_concat,
};
use shotsplit_error::{
    InvariantError, InvariantErrorKind, InvariantResult, PatchError, PatchErrorKind, PatchResult,
};
use tracing::{debug, instrument};

/// Top-level keys a patch must carry, and the only ones it may carry.
pub const PATCH_KEYS: [&str; 4] = ["schema_version", "chapter_id", "constraints", "ops"];

fn invalid_field(field: &str, expected: &str) -> PatchError {
    PatchError::new(PatchErrorKind::InvalidField {
        field: field.to_string(),
        expected: expected.to_string(),
    })
}

/// Check the top-level structure of a patch.
///
/// # Errors
///
/// Fails unless `patch` is an object with exactly [`PATCH_KEYS`], a matching
/// `schema_version`, a string `chapter_id`, and a list of `ops`.
pub fn validate_patch_shape(patch: &Value) -> PatchResult<()> {
    let obj = patch
        .as_object()
        .ok_or_else(|| PatchError::new(PatchErrorKind::NotAnObject))?;

    for key in PATCH_KEYS {
        if !obj.contains_key(key) {
            return Err(PatchError::new(PatchErrorKind::MissingKey(key.to_string())));
        }
    }

    if let Some(extra) = obj.keys().find(|k| !PATCH_KEYS.contains(&k.as_str())) {
        return Err(PatchError::new(PatchErrorKind::UnexpectedKey(extra.clone())));
    }

    match &obj["schema_version"] {
        Value::String(version) if version == PATCH_SCHEMA_VERSION => {}
        Value::String(version) => {
            return Err(PatchError::new(PatchErrorKind::UnsupportedSchemaVersion(
                version.clone(),
            )));
        }
        other => {
            return Err(PatchError::new(PatchErrorKind::UnsupportedSchemaVersion(
                other.to_string(),
            )));
        }
    }

    if !obj["chapter_id"].is_string() {
        return Err(invalid_field("chapter_id", "a string"));
    }

    if !obj["ops"].is_array() {
        return Err(invalid_field("ops", "a list"));
    }

    Ok(())
}

/// Check every op's tag, then decode the list into typed [`Op`]s.
///
/// All tags are checked before any op is decoded, so an unknown tag anywhere
/// in the list is reported even if an earlier op is malformed.
///
/// # Errors
///
/// Fails on a non-object entry, an unrecognized or missing `op` tag, or
/// missing/mistyped op arguments.
pub fn validate_ops_syntax(ops: &[Value]) -> PatchResult<Vec<Op>> {
    let mut objects: Vec<(&Map<String, Value>, &str)> = Vec::with_capacity(ops.len());

    for (position, value) in ops.iter().enumerate() {
        let obj = value
            .as_object()
            .ok_or_else(|| PatchError::new(PatchErrorKind::OpNotObject(position)))?;

        match obj.get("op") {
            Some(Value::String(tag)) if OP_NAMES.contains(&tag.as_str()) => {
                objects.push((obj, tag.as_str()));
            }
            Some(other) => {
                let op = other.as_str().map(str::to_string).unwrap_or_else(|| other.to_string());
                return Err(PatchError::new(PatchErrorKind::InvalidOpType { position, op }));
            }
            None => {
                return Err(PatchError::new(PatchErrorKind::InvalidOpType {
                    position,
                    op: "<missing>".to_string(),
                }));
            }
        }
    }

    objects
        .into_iter()
        .enumerate()
        .map(|(position, (obj, tag))| {
            serde_json::from_value::<Op>(Value::Object(obj.clone())).map_err(|e| {
                PatchError::new(PatchErrorKind::MalformedOp {
                    position,
                    op: tag.to_string(),
                    message: e.to_string(),
                })
            })
        })
        .collect()
}

/// Type-check the constraints block a collaborator echoed back.
///
/// Values are not compared with the caller's constraints; only the
/// caller's own window is ever enforced.
///
/// # Errors
///
/// Fails unless the block is an object with integer `min_shots` and
/// `max_shots` and a boolean `forbid_cross_scene_break`.
pub fn validate_constraints(constraints: &Value) -> PatchResult<AdvisoryConstraints> {
    let obj = constraints
        .as_object()
        .ok_or_else(|| invalid_field("constraints", "an object"))?;

    let field = |name: &str| {
        obj.get(name)
            .ok_or_else(|| PatchError::new(PatchErrorKind::ConstraintsMissing(name.to_string())))
    };
    let type_error = |name: &str, expected: &str| {
        PatchError::new(PatchErrorKind::ConstraintsType {
            field: name.to_string(),
            expected: expected.to_string(),
        })
    };

    let min_shots = field("min_shots")?
        .as_i64()
        .ok_or_else(|| type_error("min_shots", "an integer"))?;
    let max_shots = field("max_shots")?
        .as_i64()
        .ok_or_else(|| type_error("max_shots", "an integer"))?;
    let forbid_cross_scene_break = field("forbid_cross_scene_break")?
        .as_bool()
        .ok_or_else(|| type_error("forbid_cross_scene_break", "a boolean"))?;

    Ok(AdvisoryConstraints {
        min_shots,
        max_shots,
        forbid_cross_scene_break,
    })
}

/// Run every pre-application check and decode the patch.
///
/// # Errors
///
/// Returns the first shape, op-syntax, or constraints failure.
#[instrument(skip_all)]
pub fn parse_patch(patch: &Value) -> PatchResult<Patch> {
    validate_patch_shape(patch)?;

    // Shape validation guarantees these keys and types.
    let ops = patch["ops"].as_array().map(Vec::as_slice).unwrap_or_default();
    let ops = validate_ops_syntax(ops)?;
    let constraints = validate_constraints(&patch["constraints"])?;
    let chapter_id = patch["chapter_id"].as_str().unwrap_or_default().to_string();

    debug!(ops = ops.len(), chapter_id = %chapter_id, "Patch passed pre-application checks");

    Ok(Patch {
        schema_version: PATCH_SCHEMA_VERSION.to_string(),
        chapter_id,
        constraints,
        ops,
    })
}

/// Enforce the text-conservation law.
///
/// # Errors
///
/// Fails when the whitespace-free concatenations of the two sequences differ.
pub fn validate_text_conservation(base_shots: &[Shot], refined_shots: &[Shot]) -> InvariantResult<()> {
    let base = normalized_concat(base_shots);
    let refined = normalized_concat(refined_shots);

    if base != refined {
        return Err(InvariantError::new(InvariantErrorKind::TextConservation {
            baseline_chars: base.chars().count(),
            refined_chars: refined.chars().count(),
        }));
    }
    Ok(())
}

/// Enforce the effective shot-count window.
///
/// # Errors
///
/// Fails when `refined_shots.len()` is outside `bounds`.
pub fn validate_count_range(refined_shots: &[Shot], bounds: ShotBounds) -> InvariantResult<()> {
    let count = refined_shots.len();
    if !bounds.contains(count) {
        return Err(InvariantError::new(InvariantErrorKind::CountRange {
            count,
            min: bounds.min,
            max: bounds.max,
        }));
    }
    Ok(())
}
