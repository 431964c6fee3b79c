use preptrack::{
    catalog::{LectureCatalog, QuestionCatalog},
    core::store::ProgressStore,
    types::DsaStatus,
};

const LECTURES: &str = r#"{
    "lectures": [
        {"id": 1, "title": "Arrays and Hashing", "type": "Intro"},
        {"id": 2, "title": "Two Pointers", "type": "Intro"},
        {"id": 3, "title": "Graph Traversals", "type": "Graphs"}
    ]
}"#;

const QUESTIONS: &str = r#"{
    "topics": [
        {
            "name": "Arrays",
            "categories": [
                {
                    "name": "Easy",
                    "questions": [
                        {"id": 10, "heading": "Two Sum", "leetcode_link": "https://leetcode.com/problems/two-sum"},
                        {"id": 11, "heading": "Contains Duplicate"}
                    ]
                }
            ]
        },
        {
            "name": "Graphs",
            "categories": [
                {
                    "name": "Medium",
                    "questions": [
                        {"id": 20, "heading": "Number of Islands", "practice_link": "https://example.com/islands"}
                    ]
                }
            ]
        }
    ]
}"#;

#[test]
fn lecture_catalog_counts_completed() {
    let catalog: LectureCatalog = serde_json::from_str(LECTURES).expect("catalog");
    assert_eq!(catalog.total(), 3);

    let mut store = ProgressStore::new();
    store.toggle_lecture(1);
    store.toggle_lecture(3);
    // Progress on ids outside the catalog never counts.
    store.toggle_lecture(99);

    assert_eq!(catalog.completed_count(store.record()), 2);
}

#[test]
fn question_catalog_counts_solved() {
    let catalog: QuestionCatalog = serde_json::from_str(QUESTIONS).expect("catalog");
    assert_eq!(catalog.total(), 3);

    let mut store = ProgressStore::new();
    store.update_dsa_status(10, DsaStatus::Solved);
    store.update_dsa_status(11, DsaStatus::Revision);
    store.update_dsa_status(20, DsaStatus::Solved);
    store.update_dsa_status(42, DsaStatus::Solved);

    assert_eq!(catalog.solved_count(store.record()), 2);
}

#[test]
fn question_links_are_optional() {
    let catalog: QuestionCatalog = serde_json::from_str(QUESTIONS).expect("catalog");
    let questions: Vec<_> = catalog.questions().collect();
    assert_eq!(questions[0].leetcode_link.as_deref(), Some("https://leetcode.com/problems/two-sum"));
    assert!(questions[1].leetcode_link.is_none());
    assert!(questions[1].practice_link.is_none());
    assert_eq!(questions[2].practice_link.as_deref(), Some("https://example.com/islands"));
}
