//! Test utilities for Storyloom model tests.
//!
//! This module provides a scripted transport and response builders.

#![allow(dead_code)]

pub mod mock_transport;

#[allow(unused_imports)]
pub use mock_transport::{MockFailure, MockTransport, MockTransportFactory, TransportCall};

use serde_json::{Value, json};
use std::sync::Arc;
use storyloom_config::StoryloomConfig;
use storyloom_models::{
    Candidate, Content, CredentialResolver, GeminiStoryClient, GenerateContentResponse,
    GenerateVideoResponse, GeneratedSample, OperationStatus, Part, VideoFile, VideoOperation,
    VideoOperationResponse,
};

/// Configuration with a 1 ms poll interval.
pub fn test_config() -> StoryloomConfig {
    let mut config = StoryloomConfig::default();
    config.video.poll_interval_ms = 1;
    config
}

/// Resolver that sees `key` (if any) as `API_KEY` and nothing else.
pub fn resolver_with_key(key: Option<&str>) -> CredentialResolver {
    let key = key.map(str::to_string);
    CredentialResolver::new(&StoryloomConfig::default().credentials)
        .with_env_lookup(move |name| if name == "API_KEY" { key.clone() } else { None })
}

/// A client over the mock factory with `key` available.
pub fn client_with(
    factory: Arc<MockTransportFactory>,
    key: Option<&str>,
    config: StoryloomConfig,
) -> GeminiStoryClient {
    GeminiStoryClient::with_parts(config, resolver_with_key(key), factory)
}

/// A response whose first candidate carries the given parts.
pub fn response_with_parts(parts: Vec<Part>) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: vec![Candidate {
            content: Some(Content {
                role: Some("model".to_string()),
                parts,
            }),
            finish_reason: Some("STOP".to_string()),
        }],
    }
}

/// A text response.
pub fn text_response(text: impl Into<String>) -> GenerateContentResponse {
    response_with_parts(vec![Part::text(text)])
}

/// A raw story script with `scene_count` scenes, each embedding the character.
pub fn story_json(scene_count: usize) -> Value {
    let character = "a cute little girl with a red hoodie and big brown eyes";
    let scenes: Vec<Value> = (1..=scene_count)
        .map(|n| {
            json!({
                "sceneNumber": n,
                "storyText": format!("ฉากที่ {}", n),
                "englishTranslation": format!("Scene {}", n),
                "imagePrompt": format!("Photorealistic, 8k, cinematic lighting, {}, scene {}", character, n),
                "visualEffect": "sparkles",
                "soundEffect": "magic",
            })
        })
        .collect();

    json!({
        "title": "หนูน้อยหมวกแดง",
        "coverTitle": "ป่านี้มีความลับ",
        "coverImagePrompt": "High contrast thumbnail collage",
        "seoSummary": "A magical forest tale",
        "tags": ["#story", "#shorts", "#thai"],
        "characterDescription": character,
        "mood": "Happy",
        "scenes": scenes,
    })
}

/// An operation that is still running.
pub fn running_operation(name: &str) -> VideoOperation {
    VideoOperation {
        name: name.to_string(),
        done: false,
        error: None,
        response: None,
    }
}

/// A finished operation whose first sample points at `uri`.
pub fn finished_operation(name: &str, uri: Option<&str>) -> VideoOperation {
    VideoOperation {
        name: name.to_string(),
        done: true,
        error: None,
        response: Some(VideoOperationResponse {
            generate_video_response: Some(GenerateVideoResponse {
                generated_samples: vec![GeneratedSample {
                    video: Some(VideoFile {
                        uri: uri.map(str::to_string),
                    }),
                }],
            }),
        }),
    }
}

/// A finished operation carrying an error status.
pub fn failed_operation(name: &str, code: i32, message: &str) -> VideoOperation {
    VideoOperation {
        name: name.to_string(),
        done: true,
        error: Some(OperationStatus {
            code,
            message: message.to_string(),
        }),
        response: None,
    }
}
