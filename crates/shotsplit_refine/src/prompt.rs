//! Instruction assembly for the refinement collaborator.

use shotsplit_core::{PATCH_SCHEMA_VERSION, RefineRequest};
use shotsplit_error::{IoError, IoErrorKind};

/// System instruction: boundary edits only, one JSON object only.
pub const SYSTEM_PROMPT: &str = concat!(
    "你是小说分镜切分的校正器（shot split refiner）。\n",
    "只允许输出一个 JSON 对象：不要解释，不要 Markdown，不要代码块，不要任何其他格式。\n",
    "只能使用 merge / split / move_tail / tag 四种 op 调整镜头边界。\n",
    "严禁增加、删除或改写任何原文字符（包括标点）；文本只能通过 op 重新划分边界。\n",
);

/// Wire-format and rules description placed ahead of the payload.
fn rules() -> String {
    format!(
        concat!(
            "任务：不改动任何原文字符，让镜头边界更贴合语义和叙事节奏。\n",
            "输出格式：\n",
            "{{\n",
            "  \"schema_version\": \"{}\",\n",
            "  \"chapter_id\": \"...\",\n",
            "  \"constraints\": {{\"min_shots\": 整数, \"max_shots\": 整数, \"forbid_cross_scene_break\": 布尔}},\n",
            "  \"ops\": [ ... ]\n",
            "}}\n",
            "\n",
            "可用 op：\n",
            "1) {{\"op\":\"merge\",\"start_idx\":i,\"end_idx\":j}}  合并 i..j 的连续镜头\n",
            "2) {{\"op\":\"split\",\"idx\":i,\"at\":\"子串\"}}  在子串首次出现处之后切开，子串必须出现在该镜头文本中\n",
            "3) {{\"op\":\"move_tail\",\"from_idx\":i,\"to_idx\":i+1,\"sentences\":k}}  把镜头 i 的最后 k 句移到镜头 i+1 开头\n",
            "4) {{\"op\":\"tag\",\"idx\":i,\"tags\":{{...}}}}  只加标注，不改文本\n",
            "\n",
            "硬性要求：\n",
            "- 只输出 JSON\n",
            "- forbid_cross_scene_break=true 时，merge/move_tail 不得涉及 scene_break 镜头\n",
            "- 应用 ops 后镜头数必须在 [min_shots, max_shots] 内\n",
        ),
        PATCH_SCHEMA_VERSION
    )
}

/// Build the user instruction: rules followed by the request payload as JSON.
///
/// Non-ASCII text is embedded as-is.
///
/// # Errors
///
/// Returns an [`IoError`] if the payload cannot be serialized. This is a
/// local failure, not a collaborator one.
pub fn build_user_prompt(request: &RefineRequest<'_>) -> Result<String, IoError> {
    let payload = serde_json::to_string(request).map_err(|e| {
        IoError::new(IoErrorKind::Serialize {
            what: "refine request",
            message: e.to_string(),
        })
    })?;
    Ok(format!("{}\n输入数据(JSON)：\n{}", rules(), payload))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shotsplit_core::{Constraints, Shot, ShotKind};

    #[test]
    fn system_prompt_forbids_rewrites_and_other_formats() {
        assert!(SYSTEM_PROMPT.contains("严禁增加、删除或改写"));
        assert!(SYSTEM_PROMPT.contains("只允许输出一个 JSON 对象"));
    }

    #[test]
    fn user_prompt_embeds_payload_without_tags() {
        let mut shot = Shot::new(0, ShotKind::Mixed, "他走了。");
        shot.tags = Some([("secret".to_string(), serde_json::json!(1))].into());
        let shots = vec![shot];
        let constraints = Constraints::new(1, 3, true);
        let request = RefineRequest::new("ch_0007", &shots, &constraints);

        let prompt = build_user_prompt(&request).unwrap();
        assert!(prompt.contains(PATCH_SCHEMA_VERSION));
        assert!(prompt.contains("\"chapter_id\":\"ch_0007\""));
        assert!(prompt.contains("他走了。"));
        assert!(prompt.contains("\"forbid_cross_scene_break\":true"));
        assert!(!prompt.contains("secret"));
    }
}
