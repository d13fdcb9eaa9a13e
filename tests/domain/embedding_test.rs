use lexcase::domain::Embedding;

#[test]
fn given_vector_when_normalized_then_has_unit_length() {
    let embedding = Embedding::normalized(vec![3.0, 4.0]);
    assert!((embedding.values[0] - 0.6).abs() < 1e-6);
    assert!((embedding.values[1] - 0.8).abs() < 1e-6);
}

#[test]
fn given_zero_vector_when_normalized_then_stays_zero() {
    let embedding = Embedding::normalized(vec![0.0, 0.0, 0.0]);
    assert_eq!(embedding.values, vec![0.0, 0.0, 0.0]);
}

#[test]
fn given_identical_vectors_when_comparing_then_similarity_is_one() {
    let a = Embedding::new(vec![1.0, 2.0, 3.0]);
    assert!((a.cosine_similarity(&a.clone()) - 1.0).abs() < 1e-6);
}

#[test]
fn given_mismatched_dimensions_when_comparing_then_similarity_is_zero() {
    let a = Embedding::new(vec![1.0, 0.0]);
    let b = Embedding::new(vec![1.0, 0.0, 0.0]);
    assert_eq!(a.cosine_similarity(&b), 0.0);
}
