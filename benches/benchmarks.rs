use criterion::{black_box, criterion_group, criterion_main, Criterion};
use openai_action_gateway::auth::{sign_token, TokenVerifier};
use openai_action_gateway::types::Action;
use secrecy::SecretString;
use serde_json::json;

fn bench_token_verification(c: &mut Criterion) {
    let secret = "bench-signing-secret";
    let verifier = TokenVerifier::new(SecretString::new(secret.to_string()), 0);
    let token = sign_token("bench", secret, 3600).unwrap();

    let mut headers = axum::http::HeaderMap::new();
    headers.insert(
        "authorization",
        axum::http::HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );

    c.bench_function("verify_valid_token", |b| {
        b.iter(|| black_box(verifier.verify_headers(&headers)))
    });

    let mut bad_headers = axum::http::HeaderMap::new();
    bad_headers.insert(
        "authorization",
        axum::http::HeaderValue::from_static("Bearer not.a.jwt"),
    );

    c.bench_function("verify_garbage_token", |b| {
        b.iter(|| black_box(verifier.verify_headers(&bad_headers)))
    });
}

fn bench_envelope_parsing(c: &mut Criterion) {
    let completion = json!({
        "action": "completion",
        "params": {"model": "text-davinci-003", "prompt": "Hello,", "max_tokens": 5}
    })
    .to_string();

    let image_edit = json!({
        "action": "image-edit",
        "params": {
            "image": "https://example.com/photos/cat.png",
            "mask": "https://example.com/photos/mask.png",
            "prompt": "add a hat",
            "n": 1,
            "size": "512x512",
            "responseFormat": "url"
        }
    })
    .to_string();

    c.bench_function("parse_completion_envelope", |b| {
        b.iter(|| black_box(serde_json::from_str::<Action>(&completion).unwrap()))
    });

    c.bench_function("parse_image_edit_envelope", |b| {
        b.iter(|| black_box(serde_json::from_str::<Action>(&image_edit).unwrap()))
    });
}

criterion_group!(benches, bench_token_verification, bench_envelope_parsing);
criterion_main!(benches);
