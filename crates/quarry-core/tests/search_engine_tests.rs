//! End-to-end tests for the retrieval engine across all three modes.

use quarry_core::embedding::HashingEmbedder;
use quarry_core::test_utils::{doc, FailingEmbedder};
use quarry_core::{KnowledgeDocument, MatchKind, SearchEngine, SearchMode};
use std::collections::HashSet;
use std::sync::Arc;

fn medical_corpus() -> Vec<KnowledgeDocument> {
    vec![
        doc(
            "oncology-prognosis",
            "Breast cancer prognosis improves substantially with early detection \
             and machine learning risk models trained on clinical records.",
            9,
        ),
        doc(
            "oncology-imaging",
            "Deep learning models analyse mammography images to flag malignant \
             tumors earlier than routine screening alone.",
            7,
        ),
        doc(
            "nutrition",
            "Mediterranean diets rich in vegetables and olive oil correlate with \
             better long-term cardiovascular outcomes.",
            4,
        ),
        doc(
            "astronomy",
            "Radial velocity measurements reveal exoplanets orbiting nearby stars \
             with remarkable precision.",
            4,
        ),
        doc(
            "cooking",
            "Slow roasting root vegetables concentrates their sweetness and keeps \
             the kitchen warm through winter.",
            2,
        ),
    ]
}

async fn engine() -> SearchEngine {
    SearchEngine::build(medical_corpus(), Arc::new(HashingEmbedder::new(384)))
        .await
        .unwrap()
}

#[tokio::test]
async fn hybrid_ranks_relevant_documents_above_unrelated_ones() {
    let engine = engine().await;
    let results = engine
        .search("breast cancer prognosis", 5, SearchMode::hybrid_default())
        .await
        .unwrap();

    assert!(!results.is_empty());
    assert_eq!(results[0].document.id, "oncology-prognosis");

    let cooking_rank = results.iter().position(|r| r.document.id == "cooking");
    let oncology_rank = results
        .iter()
        .position(|r| r.document.id == "oncology-prognosis")
        .unwrap();
    if let Some(cooking_rank) = cooking_rank {
        assert!(oncology_rank < cooking_rank);
    }
}

#[tokio::test]
async fn hybrid_results_are_a_subset_of_the_rankers_union() {
    let engine = engine().await;
    let top_k = 3;

    let hybrid = engine
        .search("cancer detection models", top_k, SearchMode::hybrid_default())
        .await
        .unwrap();
    let vector = engine
        .search("cancer detection models", top_k * 2, SearchMode::Vector)
        .await
        .unwrap();
    let lexical = engine
        .search("cancer detection models", top_k * 2, SearchMode::Bm25)
        .await
        .unwrap();

    let union: HashSet<&str> = vector
        .iter()
        .chain(lexical.iter())
        .map(|r| r.document.id.as_str())
        .collect();

    assert!(hybrid.len() <= top_k);
    for result in &hybrid {
        assert!(union.contains(result.document.id.as_str()));
    }
}

#[tokio::test]
async fn pure_vector_weights_reproduce_vector_ordering() {
    let engine = engine().await;
    let query = "deep learning tumor imaging";

    let hybrid = engine
        .search(
            query,
            5,
            SearchMode::Hybrid {
                vector_weight: 1.0,
                bm25_weight: 0.0,
            },
        )
        .await
        .unwrap();
    let vector = engine.search(query, 5, SearchMode::Vector).await.unwrap();

    let hybrid_ids: Vec<&str> = hybrid
        .iter()
        .filter(|r| r.breakdown.and_then(|b| b.vector_score).is_some())
        .map(|r| r.document.id.as_str())
        .collect();
    let vector_ids: Vec<&str> = vector.iter().map(|r| r.document.id.as_str()).collect();

    // Documents the vector ranker returned keep their relative order.
    let restricted: Vec<&str> = hybrid_ids
        .iter()
        .filter(|id| vector_ids.contains(id))
        .copied()
        .collect();
    assert_eq!(restricted, vector_ids[..restricted.len()].to_vec());
}

#[tokio::test]
async fn priority_lifts_a_document_in_every_mode() {
    let base = |priority| {
        vec![
            doc("plain", "distributed consensus with raft leader election", priority),
            doc("boosted", "distributed consensus with raft leader election", 10),
            doc("filler-a", "sourdough hydration ratios for beginners", 5),
            doc("filler-b", "urban birdwatching in early spring", 5),
            doc("filler-c", "tidal pool ecology field notes", 5),
        ]
    };
    let engine = SearchEngine::build(base(1), Arc::new(HashingEmbedder::new(384)))
        .await
        .unwrap();

    for mode in [SearchMode::Bm25, SearchMode::Vector, SearchMode::hybrid_default()] {
        let results = engine
            .search("raft consensus", 5, mode)
            .await
            .unwrap();
        let plain = results.iter().position(|r| r.document.id == "plain");
        let boosted = results
            .iter()
            .position(|r| r.document.id == "boosted")
            .unwrap();
        if let Some(plain) = plain {
            assert!(boosted < plain, "priority should win in {mode:?}");
        }
    }
}

#[tokio::test]
async fn embedder_outage_degrades_hybrid_but_fails_vector() {
    let engine = SearchEngine::build(medical_corpus(), Arc::new(FailingEmbedder::new(384)))
        .await
        .unwrap();

    let hybrid = engine
        .search("cancer prognosis", 5, SearchMode::hybrid_default())
        .await
        .unwrap();
    assert!(!hybrid.is_empty());
    assert!(hybrid.iter().all(|r| r.match_kind == MatchKind::Bm25));

    assert!(engine
        .search("cancer prognosis", 5, SearchMode::Vector)
        .await
        .is_err());

    // Lexical mode is untouched by the outage.
    let lexical = engine
        .search("cancer prognosis", 5, SearchMode::Bm25)
        .await
        .unwrap();
    assert_eq!(lexical[0].document.id, "oncology-prognosis");
}

#[tokio::test]
async fn empty_query_and_empty_corpus_return_empty_lists() {
    let engine = engine().await;
    // Queries that tokenize to nothing never match lexically. The
    // vector ranker still embeds the raw text, so vector and hybrid
    // modes may return documents (at zero or low similarity) and only
    // lexical mode is guaranteed empty.
    for query in ["", "the of and"] {
        assert!(engine
            .search(query, 5, SearchMode::Bm25)
            .await
            .unwrap()
            .is_empty());
    }

    let empty = SearchEngine::build(vec![], Arc::new(HashingEmbedder::new(64)))
        .await
        .unwrap();
    for mode in [SearchMode::Bm25, SearchMode::Vector, SearchMode::hybrid_default()] {
        assert!(empty.search("anything", 5, mode).await.unwrap().is_empty());
    }
}

#[tokio::test]
async fn reload_is_atomic_from_the_callers_view() {
    let engine = engine().await;
    let stats_before = engine.stats().await;
    assert_eq!(stats_before.total_documents, 5);

    engine
        .reload(vec![
            doc("only", "a brand new corpus with a single passage", 5),
        ])
        .await
        .unwrap();

    let stats_after = engine.stats().await;
    assert_eq!(stats_after.total_documents, 1);

    let results = engine
        .search("passage corpus", 5, SearchMode::Bm25)
        .await
        .unwrap();
    assert!(results.iter().all(|r| r.document.id == "only"));
}

#[tokio::test]
async fn concurrent_searches_share_one_engine() {
    let engine = Arc::new(engine().await);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let engine = Arc::clone(&engine);
        handles.push(tokio::spawn(async move {
            engine
                .search("cancer prognosis", 3, SearchMode::hybrid_default())
                .await
                .unwrap()
        }));
    }

    let mut first: Option<Vec<String>> = None;
    for handle in handles {
        let ids: Vec<String> = handle
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.document.id.clone())
            .collect();
        match &first {
            Some(expected) => assert_eq!(&ids, expected),
            None => first = Some(ids),
        }
    }
}
