// Tests for scene image and narration generation.

mod test_utils;

use std::sync::Arc;
use storyloom_core::Voice;
use storyloom_error::{GeminiErrorKind, PaidFeature};
use storyloom_interface::{SceneImages, SceneNarration};
use storyloom_models::{GenerateContentResponse, Part};
use test_utils::{
    MockFailure, MockTransport, MockTransportFactory, TransportCall, client_with,
    response_with_parts, test_config, text_response,
};

fn factory(transport: MockTransport) -> Arc<MockTransportFactory> {
    Arc::new(MockTransportFactory::new(transport))
}

#[tokio::test]
async fn test_image_returns_first_inline_part_as_data_uri() -> anyhow::Result<()> {
    let factory = factory(MockTransport::new().with_content(response_with_parts(vec![
        Part::text("Here is your image"),
        Part::inline("image/png", ""),
        Part::inline("image/jpeg", "AAAA"),
        Part::inline("image/png", "BBBB"),
    ])));
    let client = client_with(factory.clone(), Some("k"), test_config());

    let uri = client.generate_scene_image("a girl in a red hoodie").await?;
    assert_eq!(uri, "data:image/jpeg;base64,AAAA");

    match &factory.transport().calls()[0] {
        TransportCall::GenerateContent { model, request } => {
            assert_eq!(model, "gemini-3-pro-image-preview");
            let body = serde_json::to_value(request)?;
            assert_eq!(body["generationConfig"]["imageConfig"]["aspectRatio"], "9:16");
            assert_eq!(body["generationConfig"]["imageConfig"]["imageSize"], "1K");
            assert_eq!(body["contents"][0]["parts"][0]["text"], "a girl in a red hoodie");
        }
        other => panic!("unexpected call {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_image_mime_defaults_to_png() -> anyhow::Result<()> {
    let mut part = Part::inline("", "CCCC");
    if let Some(inline) = part.inline_data.as_mut() {
        inline.mime_type = None;
    }
    let factory = factory(MockTransport::new().with_content(response_with_parts(vec![part])));
    let client = client_with(factory, Some("k"), test_config());

    let uri = client.generate_scene_image("prompt").await?;
    assert_eq!(uri, "data:image/png;base64,CCCC");
    Ok(())
}

#[tokio::test]
async fn test_image_without_inline_data_is_empty() -> anyhow::Result<()> {
    let factory = factory(
        MockTransport::new()
            .with_content(text_response("I cannot draw that"))
            .with_content(GenerateContentResponse::default()),
    );
    let client = client_with(factory, Some("k"), test_config());

    for _ in 0..2 {
        let err = client.generate_scene_image("prompt").await.unwrap_err();
        assert_eq!(
            err.gemini_kind(),
            Some(&GeminiErrorKind::EmptyResponse("image".to_string()))
        );
    }
    Ok(())
}

#[tokio::test]
async fn test_image_403_becomes_permission_denied() -> anyhow::Result<()> {
    let factory = factory(
        MockTransport::new()
            .with_content_failure(MockFailure::Gemini(GeminiErrorKind::HttpError {
                status_code: 403,
                message: "Billing required".to_string(),
            }))
            .with_content_failure(MockFailure::Gemini(GeminiErrorKind::ApiRequest(
                "PERMISSION_DENIED".to_string(),
            ))),
    );
    let client = client_with(factory, Some("k"), test_config());

    for _ in 0..2 {
        let err = client.generate_scene_image("prompt").await.unwrap_err();
        assert_eq!(
            err.gemini_kind(),
            Some(&GeminiErrorKind::PermissionDenied(PaidFeature::ImageGeneration))
        );
        assert!(err.to_string().contains("Gemini 3 Pro Images"));
    }
    Ok(())
}

#[tokio::test]
async fn test_image_other_failures_bubble_unchanged() -> anyhow::Result<()> {
    let factory = factory(MockTransport::new().with_content_failure(MockFailure::Gemini(
        GeminiErrorKind::HttpError {
            status_code: 500,
            message: "Internal".to_string(),
        },
    )));
    let client = client_with(factory, Some("k"), test_config());

    let err = client.generate_scene_image("prompt").await.unwrap_err();
    assert!(matches!(
        err.gemini_kind(),
        Some(GeminiErrorKind::HttpError {
            status_code: 500,
            ..
        })
    ));
    Ok(())
}

#[tokio::test]
async fn test_audio_decodes_first_part() -> anyhow::Result<()> {
    let factory = factory(MockTransport::new().with_content(response_with_parts(vec![
        Part::inline("audio/L16;codec=pcm;rate=24000", "AAECAw=="),
    ])));
    let client = client_with(factory.clone(), Some("k"), test_config());

    let audio = client.generate_scene_audio("สวัสดี", Voice::Charon).await?;
    assert_eq!(audio.data, vec![0, 1, 2, 3]);
    assert_eq!(audio.mime_type, "audio/L16;codec=pcm;rate=24000");

    match &factory.transport().calls()[0] {
        TransportCall::GenerateContent { model, request } => {
            assert_eq!(model, "gemini-2.5-flash-preview-tts");
            let body = serde_json::to_value(request)?;
            let config = &body["generationConfig"];
            assert_eq!(config["responseModalities"], serde_json::json!(["AUDIO"]));
            assert_eq!(
                config["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]["voiceName"],
                "Charon"
            );
            assert_eq!(body["contents"][0]["parts"][0]["text"], "สวัสดี");
        }
        other => panic!("unexpected call {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn test_audio_requires_inline_data_in_first_part() -> anyhow::Result<()> {
    let factory = factory(MockTransport::new().with_content(response_with_parts(vec![
        Part::text("no audio here"),
        Part::inline("audio/wav", "AAAA"),
    ])));
    let client = client_with(factory, Some("k"), test_config());

    let err = client
        .generate_scene_audio("text", Voice::Kore)
        .await
        .unwrap_err();
    assert_eq!(
        err.gemini_kind(),
        Some(&GeminiErrorKind::EmptyResponse("audio".to_string()))
    );
    Ok(())
}

#[tokio::test]
async fn test_audio_rejects_invalid_base64() -> anyhow::Result<()> {
    let factory = factory(
        MockTransport::new().with_content(response_with_parts(vec![Part::inline(
            "audio/wav",
            "not base64!",
        )])),
    );
    let client = client_with(factory, Some("k"), test_config());

    let err = client
        .generate_scene_audio("text", Voice::Kore)
        .await
        .unwrap_err();
    assert!(matches!(
        err.gemini_kind(),
        Some(GeminiErrorKind::Base64Decode(_))
    ));
    Ok(())
}

#[tokio::test]
async fn test_audio_403_is_not_remapped() -> anyhow::Result<()> {
    let factory = factory(MockTransport::new().with_content_failure(MockFailure::Http {
        status: 403,
        message: "Forbidden".to_string(),
    }));
    let client = client_with(factory, Some("k"), test_config());

    let err = client
        .generate_scene_audio("text", Voice::Kore)
        .await
        .unwrap_err();
    assert!(err.gemini_kind().is_none());
    assert!(err.signals_forbidden());
    Ok(())
}

#[tokio::test]
async fn test_default_voice_follows_config() {
    let mut config = test_config();
    config.speech.default_voice = Voice::Puck;
    let client = client_with(factory(MockTransport::new()), Some("k"), config);

    assert_eq!(client.default_voice(), Voice::Puck);
}
