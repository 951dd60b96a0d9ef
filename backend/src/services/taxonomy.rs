use serde::Serialize;

use crate::services::document_filter::ALL_CATEGORIES;

#[derive(Debug, Serialize)]
pub struct Category {
    pub name: &'static str,
    pub subcategories: Vec<Subcategory>,
}

#[derive(Debug, Serialize)]
pub struct Subcategory {
    pub name: &'static str,
    pub tags: &'static [&'static str],
}

const TREE: &[(&str, &[(&str, &[&str])])] = &[
    (
        "Education",
        &[
            ("Research Papers", &["Machine Learning", "Data Science", "Computer Vision", "NLP"]),
            ("Assignments", &["Programming", "Mathematics", "Physics", "Chemistry"]),
            ("Textbooks", &["Computer Science", "Engineering", "Mathematics"]),
        ],
    ),
    (
        "Business",
        &[
            ("Reports", &["Financial", "Market Analysis", "Performance", "Quarterly"]),
            ("Contracts", &["Employment", "Service", "Partnership", "NDA"]),
            ("Proposals", &["Project", "Business", "Grant", "Research"]),
        ],
    ),
    (
        "Health",
        &[
            ("Medical Records", &["Patient Files", "Lab Results", "Diagnoses"]),
            ("Prescriptions", &["Medications", "Treatment Plans", "Dosages"]),
            ("Research", &["Clinical Trials", "Medical Studies", "Health Reports"]),
        ],
    ),
];

pub const ALGORITHM_LABEL: &str = "Naive Bayes Classifier";

pub fn classification_tree() -> Vec<Category> {
    TREE.iter()
        .map(|&(name, subs)| Category {
            name,
            subcategories: subs
                .iter()
                .map(|&(name, tags)| Subcategory { name, tags })
                .collect(),
        })
        .collect()
}

/// Values accepted by the library's classification filter, `all` first.
pub fn filter_categories() -> Vec<&'static str> {
    std::iter::once(ALL_CATEGORIES)
        .chain(TREE.iter().map(|&(name, _)| name))
        .collect()
}
