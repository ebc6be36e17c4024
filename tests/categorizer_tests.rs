//! # Categorizer Stream Tests
//!
//! The streamed shopping-list categorization, with response bodies cut at
//! awkward byte offsets.

use kondate::ai::categorizer::{categorize_shopping_list, CategorizedItem};
use kondate::ai::stream_frames::{frame_text, FrameDecoder, LineAssembler};
use kondate::ai::FakeProvider;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

fn items() -> Vec<CategorizedItem> {
    vec![
        CategorizedItem::new("牛乳", "1本"),
        CategorizedItem::new("玉ねぎ", "2個"),
        CategorizedItem::new("鶏もも肉", "300g"),
    ]
}

const SORTED: &str = "## 野菜・果物\n- 玉ねぎ 2個\n\n## 肉\n- 鶏もも肉 300g\n\n## 乳製品・卵・大豆製品\n- 牛乳 1本\n";

#[tokio::test]
async fn test_single_byte_chunks_split_multibyte_characters() {
    let provider = FakeProvider::new()
        .with_default_response(SORTED)
        .with_stream_chunking(3, 1);

    let sorted = categorize_shopping_list(&provider, &items(), TIMEOUT).await.unwrap();

    let names: Vec<&str> = sorted.iter().map(|item| item.name.as_str()).collect();
    assert_eq!(names, vec!["玉ねぎ", "鶏もも肉", "牛乳"]);
    assert_eq!(sorted[1].quantity, "300g");
}

#[tokio::test]
async fn test_chunk_size_does_not_change_the_result() {
    let mut results = Vec::new();
    for (fragment, chunk) in [(1, 2), (5, 13), (40, 4096)] {
        let provider = FakeProvider::new()
            .with_default_response(SORTED)
            .with_stream_chunking(fragment, chunk);
        results.push(categorize_shopping_list(&provider, &items(), TIMEOUT).await.unwrap());
    }

    assert_eq!(results[0], results[1]);
    assert_eq!(results[1], results[2]);
}

#[tokio::test]
async fn test_last_line_without_newline_is_kept() {
    let provider = FakeProvider::new().with_default_response("- 牛乳 1本\n- 卵 10個");

    let sorted = categorize_shopping_list(&provider, &items(), TIMEOUT).await.unwrap();

    assert_eq!(sorted.last(), Some(&CategorizedItem::new("卵", "10個")));
}

#[test]
fn test_trailing_error_frame_is_decoded() {
    let mut body = FakeProvider::new().stream_body("- 牛乳 1本\n");
    body.pop();
    body.extend_from_slice(br#",{"error": {"code": 500, "message": "internal"}}]"#);

    let mut decoder = FrameDecoder::new();
    let frames: Vec<_> = body.chunks(5).flat_map(|chunk| decoder.push(chunk)).collect();
    assert!(frames.last().unwrap().get("error").is_some());
    assert!(!decoder.has_remainder());
}

#[test]
fn test_frames_and_lines_reassemble_by_hand() {
    let provider = FakeProvider::new().with_stream_chunking(4, 3);
    let body = provider.stream_body("- 豆腐 1丁\n- わかめ 1袋\n");

    let mut decoder = FrameDecoder::new();
    let mut lines = LineAssembler::new();
    let mut collected = Vec::new();
    for chunk in body.chunks(3) {
        for frame in decoder.push(chunk) {
            if let Some(text) = frame_text(&frame) {
                collected.extend(lines.push(text));
            }
        }
    }
    collected.extend(lines.finish());

    assert_eq!(collected, vec!["- 豆腐 1丁", "- わかめ 1袋"]);
}
