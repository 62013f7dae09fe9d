//! Property tests for local resolution.

use std::sync::Arc;

use proptest::prelude::*;

use dost_chat::{resolve_locally, Category, FixedPicker, KnowledgeBase, MatchKind, ResponseResolver};
use dost_core::Language;

fn language() -> impl Strategy<Value = Language> {
    prop_oneof![Just(Language::Hindi), Just(Language::English)]
}

proptest! {
    #[test]
    fn any_input_resolves_to_non_empty_text(input in any::<String>(), lang in language()) {
        let resolver = ResponseResolver::new(Arc::new(KnowledgeBase::builtin()));
        let answer = resolver.resolve(&input, lang);
        prop_assert!(!answer.is_empty());
    }

    #[test]
    fn matched_answers_come_from_the_matched_category(
        prefix in "[a-z ]{0,12}",
        suffix in "[a-z ]{0,12}",
        index in 0usize..10,
    ) {
        let kb = KnowledgeBase::builtin();
        let utterance = format!("{}aadhaar{}", prefix, suffix);
        let res = resolve_locally(&utterance, &kb, Language::Hindi, &FixedPicker(index));
        if let MatchKind::Category(id) = &res.kind {
            let category = kb.get(id).unwrap();
            prop_assert!(category.responses().contains(&res.text));
        } else {
            prop_assert!(false, "utterance containing a keyword must match a category");
        }
    }

    #[test]
    fn case_does_not_change_the_matched_category(word in "(dbt|nsp|aadhaar|seeding|eligible|problem)") {
        let kb = KnowledgeBase::builtin();
        let lower = resolve_locally(&word, &kb, Language::English, &FixedPicker(0));
        let upper = resolve_locally(&word.to_uppercase(), &kb, Language::English, &FixedPicker(0));
        prop_assert_eq!(lower, upper);
    }

    #[test]
    fn earlier_category_always_wins(shared in "[a-z]{3,8}") {
        let kb = KnowledgeBase::new(vec![
            Category::new("a", [shared.clone()], ["from a"]),
            Category::new("b", [shared.clone()], ["from b"]),
        ]).unwrap();
        let res = resolve_locally(&format!("about {} please", shared), &kb, Language::English, &FixedPicker(0));
        prop_assert_eq!(res.text, "from a");
    }
}
