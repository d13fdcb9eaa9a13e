use lexcase::application::ports::{TextSplitter, TextSplitterError};
use lexcase::domain::{Chunk, CollectionId, PageText};
use lexcase::infrastructure::text_processing::SlidingWindowSplitter;

const SENTENCE: &str = "The petitioner filed a writ petition before the court.";

fn collection() -> CollectionId {
    CollectionId::from_filename("case.pdf")
}

async fn split(size: usize, overlap: usize, pages: &[PageText]) -> Vec<Chunk> {
    SlidingWindowSplitter::new(size, overlap)
        .unwrap()
        .split(pages, &collection())
        .await
        .unwrap()
}

fn reconstruct(chunks: &[Chunk], overlap: usize) -> String {
    let mut text = chunks[0].text.clone();
    for chunk in &chunks[1..] {
        text.extend(chunk.text.chars().skip(overlap));
    }
    text
}

#[test]
fn given_overlap_not_smaller_than_size_when_creating_then_returns_error() {
    assert!(matches!(
        SlidingWindowSplitter::new(100, 100),
        Err(TextSplitterError::InvalidConfiguration(_))
    ));
    assert!(SlidingWindowSplitter::new(100, 150).is_err());
}

#[tokio::test]
async fn given_sentence_when_splitting_then_windows_end_on_spaces() {
    let chunks = split(20, 5, &[PageText::new(1, SENTENCE)]).await;

    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "The petitioner ",
            "oner filed a writ ",
            "writ petition ",
            "tion before the ",
            " the court.",
        ]
    );
    let offsets: Vec<usize> = chunks.iter().map(|c| c.offset).collect();
    assert_eq!(offsets, vec![0, 10, 23, 32, 43]);
}

#[tokio::test]
async fn given_text_without_spaces_when_splitting_then_uses_hard_windows() {
    let chunks = split(10, 3, &[PageText::new(1, "abcdefghijklmnopqrstuvwxyz")]).await;

    let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["abcdefghij", "hijklmnopq", "opqrstuvwx", "vwxyz"]);
}

#[tokio::test]
async fn given_paragraph_break_in_window_when_splitting_then_prefers_it() {
    let text = "First paragraph here.\n\nSecond one follows.";

    let chunks = split(30, 5, &[PageText::new(1, text)]).await;

    assert_eq!(chunks[0].text, "First paragraph here.\n\n");
    assert_eq!(chunks.len(), 2);
    assert!(chunks[1].text.ends_with("Second one follows."));
}

#[tokio::test]
async fn given_long_page_when_splitting_then_chunks_respect_size_and_overlap() {
    let text = SENTENCE.repeat(12);
    let (size, overlap) = (80, 15);

    let chunks = split(size, overlap, &[PageText::new(1, text.clone())]).await;

    assert!(chunks.iter().all(|c| c.char_len() <= size));
    for pair in chunks.windows(2) {
        let tail: String = pair[0].text.chars().skip(pair[0].char_len() - overlap).collect();
        let head: String = pair[1].text.chars().take(overlap).collect();
        assert_eq!(tail, head);
        assert_eq!(pair[1].offset, pair[0].offset + pair[0].char_len() - overlap);
    }
    assert_eq!(reconstruct(&chunks, overlap), text);
}

#[tokio::test]
async fn given_page_ending_inside_overlap_when_splitting_then_no_redundant_tail_chunk() {
    let chunks = split(10, 3, &[PageText::new(1, "abcdefghijklmnopqrstuvwxyz")]).await;

    let reaching_end = chunks
        .iter()
        .filter(|c| c.offset + c.char_len() == 26)
        .count();
    assert_eq!(reaching_end, 1);
}

#[tokio::test]
async fn given_short_page_when_splitting_then_single_chunk_with_page_metadata() {
    let chunks = split(1000, 100, &[PageText::new(4, "Appeal dismissed.")]).await;

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].text, "Appeal dismissed.");
    assert_eq!(chunks[0].page, Some(4));
    assert_eq!(chunks[0].offset, 0);
    assert_eq!(chunks[0].collection_id, collection());
}

#[tokio::test]
async fn given_multibyte_text_when_splitting_then_counts_characters() {
    let text = "é".repeat(13);

    let chunks = split(5, 2, &[PageText::new(1, text.clone())]).await;

    assert_eq!(
        chunks.iter().map(Chunk::char_len).collect::<Vec<_>>(),
        vec![5, 5, 5, 4]
    );
    assert_eq!(reconstruct(&chunks, 2), text);
}

#[tokio::test]
async fn given_several_pages_when_splitting_then_chunks_never_span_pages() {
    let pages = [
        PageText::new(1, "Facts of the case."),
        PageText::new(2, "   "),
        PageText::new(3, "Held: appeal allowed."),
    ];

    let chunks = split(100, 10, &pages).await;

    let pages: Vec<Option<u32>> = chunks.iter().map(|c| c.page).collect();
    assert_eq!(pages, vec![Some(1), Some(3)]);
    assert_eq!(chunks[1].text, "Held: appeal allowed.");
}
