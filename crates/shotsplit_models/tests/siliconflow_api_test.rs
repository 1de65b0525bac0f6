use shotsplit_interface::PatchCollaborator;
use shotsplit_models::{ChatCompletionsClient, CollaboratorOverrides, ShotsplitConfig};

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn test_siliconflow_returns_json_object() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let config = ShotsplitConfig::load()?;
    let resolved = config.collaborator.resolve(&CollaboratorOverrides::default())?;
    let client = ChatCompletionsClient::new(resolved)?;

    let value = client
        .submit(
            "只输出一个 JSON 对象。",
            r#"返回 {"ok": true}"#,
        )
        .await?;

    assert!(value.is_object(), "Should receive a JSON object");
    println!("Response: {}", value);

    Ok(())
}

#[test]
fn test_loaded_config_has_sane_defaults() -> Result<(), Box<dyn std::error::Error>> {
    let config = ShotsplitConfig::load()?;
    assert!(config.split.soft_target() <= config.split.hard_cut());
    assert!(config.constraints.min_shots() <= config.constraints.max_shots());
    Ok(())
}
