use search_core::{DocId, Document, DocumentStatus, SearchConfig, SearchError, SearchServer, StopWords};

const EPS: f64 = 1e-9;

fn ids(docs: &[Document]) -> Vec<DocId> {
    docs.iter().map(|d| d.id).collect()
}

fn pets_server() -> SearchServer {
    let mut server = SearchServer::new("and in on with");
    let docs = [
        (0, "white cat and fancy collar", DocumentStatus::Active, 2),
        (1, "fluffy cat fluffy tail", DocumentStatus::Active, 5),
        (2, "groomed dog expressive eyes", DocumentStatus::Active, -1),
        (3, "groomed starling eugene", DocumentStatus::Excluded, 9),
        (4, "fluffy dog with collar", DocumentStatus::Deprioritized, 3),
    ];
    for (id, text, status, rating) in docs {
        server.add_document(id, text, status, rating).unwrap();
    }
    server
}

#[test]
fn minus_terms_exclude_documents() {
    let mut server = SearchServer::new("a an on");
    server.add_document(0, "cat on mat", DocumentStatus::Active, 0).unwrap();
    server.add_document(1, "dog in house", DocumentStatus::Active, 0).unwrap();

    let found = server.find_top_documents("cat -dog").unwrap();
    assert_eq!(ids(&found), vec![0]);
}

#[test]
fn relevance_is_tf_times_idf() {
    let mut server = SearchServer::new("");
    server.add_document(0, "cat", DocumentStatus::Active, 4).unwrap();
    server.add_document(1, "dog", DocumentStatus::Active, 1).unwrap();

    let found = server.find_top_documents("cat").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, 0);
    assert_eq!(found[0].rating, 4);
    assert!((found[0].relevance - 2f64.ln()).abs() < EPS);
}

#[test]
fn relevance_sums_over_plus_terms() {
    let server = pets_server();
    // "fluffy": df = 2 of 5, "cat": df = 2 of 5; doc 1 has tf 0.5 and 0.25
    let found = server.find_top_documents("fluffy cat").unwrap();
    let idf = (5.0f64 / 2.0).ln();
    assert_eq!(found[0].id, 1);
    assert!((found[0].relevance - (0.5 * idf + 0.25 * idf)).abs() < EPS);
    assert_eq!(ids(&found), vec![1, 0]);
}

#[test]
fn empty_or_minus_only_queries_return_nothing() {
    let server = pets_server();
    assert!(server.find_top_documents("").unwrap().is_empty());
    assert!(server.find_top_documents("and with on").unwrap().is_empty());
    assert!(server.find_top_documents("-cat -dog").unwrap().is_empty());
}

#[test]
fn minus_term_wins_over_plus_term() {
    let server = pets_server();
    assert!(server.find_top_documents("cat -cat").unwrap().is_empty());
}

#[test]
fn default_search_only_returns_active_documents() {
    let server = pets_server();
    let found = server.find_top_documents("groomed fluffy dog").unwrap();
    assert_eq!(ids(&found), vec![1, 2]);

    let deprioritized = server
        .find_top_documents_by_status("groomed fluffy dog", DocumentStatus::Deprioritized)
        .unwrap();
    assert_eq!(ids(&deprioritized), vec![4]);

    let excluded = server
        .find_top_documents_by_status("groomed", DocumentStatus::Excluded)
        .unwrap();
    assert_eq!(ids(&excluded), vec![3]);
}

#[test]
fn predicate_sees_id_status_and_rating() {
    let server = pets_server();
    let found = server
        .find_top_documents_with("fluffy groomed cat dog", |id: DocId, _: DocumentStatus, rating: i32| {
            id % 2 == 0 && rating >= 0
        })
        .unwrap();
    assert_eq!(ids(&found), vec![4, 0]);
}

#[test]
fn results_are_capped_sorted_and_stable() {
    let mut server = SearchServer::new("");
    for id in 0..12 {
        let text = format!("shared {}", "filler ".repeat(id as usize));
        server.add_document(id, &text, DocumentStatus::Active, id as i32).unwrap();
    }
    server.add_document(100, "nothing relevant", DocumentStatus::Active, 0).unwrap();

    let first = server.find_top_documents("shared").unwrap();
    assert_eq!(first.len(), 5);
    assert!(first.windows(2).all(|w| w[0].relevance >= w[1].relevance));
    assert_eq!(ids(&first), vec![0, 1, 2, 3, 4]);
    assert_eq!(server.find_top_documents("shared").unwrap(), first);
}

#[test]
fn equal_relevance_breaks_ties_by_rating_then_id() {
    let mut server = SearchServer::new("");
    server.add_document(3, "cat", DocumentStatus::Active, 1).unwrap();
    server.add_document(1, "cat", DocumentStatus::Active, 1).unwrap();
    server.add_document(2, "cat", DocumentStatus::Active, 8).unwrap();
    server.add_document(4, "dog", DocumentStatus::Active, 0).unwrap();

    let found = server.find_top_documents("cat").unwrap();
    assert_eq!(ids(&found), vec![2, 1, 3]);
}

#[test]
fn term_frequencies_sum_to_one() {
    let server = pets_server();
    for id in server.document_ids() {
        let freqs = server.word_frequencies(id).unwrap();
        let total: f64 = freqs.values().sum();
        assert!((total - 1.0).abs() < EPS, "document {id} sums to {total}");
    }
}

#[test]
fn stop_word_only_documents_count_but_never_match() {
    let mut server = SearchServer::new("in on");
    server.add_document(0, "in on", DocumentStatus::Active, 0).unwrap();
    server.add_document(1, "cat", DocumentStatus::Active, 0).unwrap();
    assert_eq!(server.document_count(), 2);
    assert!(server.word_frequencies(0).unwrap().is_empty());

    let found = server.find_top_documents("cat in").unwrap();
    assert_eq!(ids(&found), vec![1]);
    assert!((found[0].relevance - 2f64.ln()).abs() < EPS);
}

#[test]
fn duplicate_documents_are_rejected() {
    let mut server = pets_server();
    let err = server
        .add_document(1, "replacement text", DocumentStatus::Active, 0)
        .unwrap_err();
    assert_eq!(err, SearchError::DuplicateDocument(1));
    assert_eq!(server.document_count(), 5);
    assert!(server.find_top_documents("replacement").unwrap().is_empty());
}

#[test]
fn malformed_minus_terms_are_invalid_queries() {
    let server = pets_server();
    assert!(matches!(
        server.find_top_documents("cat -"),
        Err(SearchError::InvalidQuery { .. })
    ));
    assert!(matches!(
        server.find_top_documents("--cat"),
        Err(SearchError::InvalidQuery { .. })
    ));
}

#[test]
fn result_cap_comes_from_config() {
    let config = SearchConfig { max_result_document_count: 2, ..SearchConfig::default() };
    let mut server = SearchServer::with_config(StopWords::parse("the"), config).unwrap();
    for id in 0..4 {
        server.add_document(id, "the cat", DocumentStatus::Active, 0).unwrap();
    }
    server.add_document(9, "dog", DocumentStatus::Active, 0).unwrap();
    assert_eq!(server.find_top_documents("cat").unwrap().len(), 2);
}
