// Tests for story script generation using the scripted transport.

mod test_utils;

use std::sync::Arc;
use storyloom_core::{SoundEffect, StoryMode, VisualEffect};
use storyloom_error::GeminiErrorKind;
use storyloom_interface::StoryGenerator;
use storyloom_models::GenerateContentResponse;
use strum::IntoEnumIterator;
use test_utils::{
    MockFailure, MockTransport, MockTransportFactory, TransportCall, client_with, story_json,
    test_config, text_response,
};

fn generate_content_calls(factory: &MockTransportFactory) -> Vec<(String, storyloom_models::GenerateContentRequest)> {
    factory
        .transport()
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            TransportCall::GenerateContent { model, request } => Some((model, request)),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn test_short_story_is_parsed_and_stamped() -> anyhow::Result<()> {
    let raw = story_json(6);
    let factory = Arc::new(MockTransportFactory::new(
        MockTransport::new().with_content(text_response(raw.to_string())),
    ));
    let client = client_with(factory.clone(), Some("test-key"), test_config());

    let story = client
        .generate_story_script("a lost kitten", StoryMode::Short)
        .await?;

    assert_eq!(story.mode, StoryMode::Short);
    assert_eq!(story.scenes().len(), 6);
    assert!(!story.id.is_empty());
    assert!(story.created_at > 0);
    assert_eq!(story.script.mood, "Happy");
    assert_eq!(story.scenes()[0].visual_effect, Some(VisualEffect::Sparkles));
    assert_eq!(story.scenes()[0].sound_effect, Some(SoundEffect::Magic));
    assert_eq!(factory.connected_keys(), vec!["test-key"]);
    Ok(())
}

#[tokio::test]
async fn test_stamping_preserves_raw_fields() -> anyhow::Result<()> {
    let raw = story_json(8);
    let factory = Arc::new(MockTransportFactory::new(
        MockTransport::new().with_content(text_response(raw.to_string())),
    ));
    let client = client_with(factory, Some("k"), test_config());

    let story = client
        .generate_story_script("a dragon's first flight", StoryMode::Medium)
        .await?;
    let stamped = serde_json::to_value(&story)?;

    for (key, value) in raw.as_object().expect("story is an object") {
        assert_eq!(stamped.get(key), Some(value), "field {} changed", key);
    }
    assert_eq!(stamped["mode"], "medium");
    Ok(())
}

#[tokio::test]
async fn test_each_mode_requests_its_scene_count() -> anyhow::Result<()> {
    for mode in StoryMode::iter() {
        let count = mode.scene_count();
        let factory = Arc::new(MockTransportFactory::new(
            MockTransport::new().with_content(text_response(story_json(count).to_string())),
        ));
        let client = client_with(factory.clone(), Some("k"), test_config());

        let story = client.generate_story_script("topic", mode).await?;
        assert_eq!(story.scenes().len(), count, "{}", mode);

        let calls = generate_content_calls(&factory);
        assert_eq!(calls.len(), 1);
        let prompt = calls[0].1.contents[0].parts[0]
            .text
            .clone()
            .unwrap_or_default();
        assert!(
            prompt.contains(&format!("exactly {} ", count)),
            "{} prompt does not ask for {} scenes",
            mode,
            count
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_script_request_uses_json_schema() -> anyhow::Result<()> {
    let factory = Arc::new(MockTransportFactory::new(
        MockTransport::new().with_content(text_response(story_json(4).to_string())),
    ));
    let client = client_with(factory.clone(), Some("k"), test_config());

    client.generate_story_script("a sea turtle", StoryMode::Long).await?;

    let calls = generate_content_calls(&factory);
    let (model, request) = &calls[0];
    assert_eq!(model, "gemini-2.5-flash");

    let body = serde_json::to_value(request)?;
    let config = &body["generationConfig"];
    assert_eq!(config["responseMimeType"], "application/json");
    assert_eq!(config["responseSchema"]["type"], "OBJECT");
    assert!(config["responseSchema"]["properties"]["scenes"].is_object());
    assert!(config.get("responseModalities").is_none());
    Ok(())
}

#[tokio::test]
async fn test_scene_count_mismatch_is_rejected() -> anyhow::Result<()> {
    let factory = Arc::new(MockTransportFactory::new(
        MockTransport::new().with_content(text_response(story_json(5).to_string())),
    ));
    let client = client_with(factory, Some("k"), test_config());

    let err = client
        .generate_story_script("topic", StoryMode::Short)
        .await
        .unwrap_err();

    assert_eq!(
        err.gemini_kind(),
        Some(&GeminiErrorKind::SceneCountMismatch {
            expected: 6,
            actual: 5
        })
    );
    Ok(())
}

#[tokio::test]
async fn test_unknown_effect_is_malformed() -> anyhow::Result<()> {
    let mut raw = story_json(6);
    raw["scenes"][3]["soundEffect"] = serde_json::json!("applause");
    let factory = Arc::new(MockTransportFactory::new(
        MockTransport::new().with_content(text_response(raw.to_string())),
    ));
    let client = client_with(factory, Some("k"), test_config());

    let err = client
        .generate_story_script("topic", StoryMode::Short)
        .await
        .unwrap_err();

    assert!(matches!(
        err.gemini_kind(),
        Some(GeminiErrorKind::MalformedResponse(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_scene_numbers_must_run_from_one() -> anyhow::Result<()> {
    let mut duplicated = story_json(6);
    for n in 0..6 {
        duplicated["scenes"][n]["sceneNumber"] = serde_json::json!(1);
    }
    let mut zero_based = story_json(6);
    for n in 0..6 {
        zero_based["scenes"][n]["sceneNumber"] = serde_json::json!(n);
    }
    let mut swapped = story_json(6);
    swapped["scenes"][1]["sceneNumber"] = serde_json::json!(3);
    swapped["scenes"][2]["sceneNumber"] = serde_json::json!(2);

    for raw in [duplicated, zero_based, swapped] {
        let factory = Arc::new(MockTransportFactory::new(
            MockTransport::new().with_content(text_response(raw.to_string())),
        ));
        let client = client_with(factory, Some("k"), test_config());

        let err = client
            .generate_story_script("topic", StoryMode::Short)
            .await
            .unwrap_err();

        match err.gemini_kind() {
            Some(GeminiErrorKind::MalformedResponse(message)) => {
                assert!(message.contains("sceneNumber"), "{}", message)
            }
            other => panic!("unexpected error {:?}", other),
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_invalid_json_is_malformed() -> anyhow::Result<()> {
    let factory = Arc::new(MockTransportFactory::new(
        MockTransport::new().with_content(text_response("{\"title\": \"half")),
    ));
    let client = client_with(factory, Some("k"), test_config());

    let err = client
        .generate_story_script("topic", StoryMode::Short)
        .await
        .unwrap_err();

    assert!(matches!(
        err.gemini_kind(),
        Some(GeminiErrorKind::MalformedResponse(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_empty_response_is_reported() -> anyhow::Result<()> {
    let factory = Arc::new(MockTransportFactory::new(
        MockTransport::new()
            .with_content(GenerateContentResponse::default())
            .with_content(text_response("   ")),
    ));
    let client = client_with(factory, Some("k"), test_config());

    for _ in 0..2 {
        let err = client
            .generate_story_script("topic", StoryMode::Short)
            .await
            .unwrap_err();
        assert!(matches!(
            err.gemini_kind(),
            Some(GeminiErrorKind::EmptyResponse(_))
        ));
    }
    Ok(())
}

#[tokio::test]
async fn test_script_errors_are_not_remapped() -> anyhow::Result<()> {
    let factory = Arc::new(MockTransportFactory::new(MockTransport::new().with_content_failure(
        MockFailure::Gemini(GeminiErrorKind::HttpError {
            status_code: 403,
            message: "PERMISSION_DENIED: API key not valid".to_string(),
        }),
    )));
    let client = client_with(factory, Some("k"), test_config());

    let err = client
        .generate_story_script("topic", StoryMode::Short)
        .await
        .unwrap_err();

    assert!(matches!(
        err.gemini_kind(),
        Some(GeminiErrorKind::HttpError {
            status_code: 403,
            ..
        })
    ));
    Ok(())
}

#[tokio::test]
async fn test_every_call_gets_a_fresh_id() -> anyhow::Result<()> {
    let body = story_json(6).to_string();
    let factory = Arc::new(MockTransportFactory::new(
        MockTransport::new()
            .with_content(text_response(body.clone()))
            .with_content(text_response(body)),
    ));
    let client = client_with(factory.clone(), Some("k"), test_config());

    let first = client.generate_story_script("a", StoryMode::Short).await?;
    let second = client.generate_story_script("a", StoryMode::Short).await?;

    assert_ne!(first.id, second.id);
    assert_eq!(factory.connect_count(), 2);
    Ok(())
}
