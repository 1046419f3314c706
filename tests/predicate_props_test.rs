//! Property tests for result predicates and calculator closeness

use proptest::prelude::*;
use search_probe::arithmetic::{MathQuery, Operator};
use search_probe::assertion::is_close_to;
use search_probe::extract::parse_calculator_text;
use search_probe::predicate::{ResultPredicate, extension_of};

proptest! {
    #[test]
    fn domain_holds_for_any_path_on_host(path in "[a-z0-9/_-]{0,40}") {
        let url = format!("https://medium.com/{path}");
        prop_assert!(ResultPredicate::Domain("medium.com".to_string()).matches(&url));
    }

    #[test]
    fn domain_rejects_subdomains(sub in "[a-z]{1,10}") {
        let url = format!("https://{sub}.medium.com/post");
        prop_assert!(!ResultPredicate::Domain("medium.com".to_string()).matches(&url));
    }

    #[test]
    fn url_without_dot_has_no_extension(url in "[a-z:/?=&_-]{0,60}") {
        prop_assert!(extension_of(&url).is_none());
        prop_assert!(!ResultPredicate::Extension("pdf".to_string()).matches(&url));
    }

    #[test]
    fn pdf_suffix_always_matches(stem in "[a-z0-9/.]{0,30}") {
        let url = format!("https://example.org/{stem}.pdf");
        prop_assert!(ResultPredicate::Extension("pdf".to_string()).matches(&url));
    }

    #[test]
    fn containment_ignores_case(prefix in "[a-z/]{0,20}", suffix in "[a-z/]{0,20}", upper in any::<bool>()) {
        let token = if upper { "ARTICLE" } else { "Article" };
        let url = format!("https://example.com/{prefix}{token}{suffix}");
        prop_assert!(ResultPredicate::UrlContains("article".to_string()).matches(&url));
    }

    #[test]
    fn displayed_answer_is_close(lhs in 0u32..1000, rhs in 0u32..1000, op_index in 0usize..4) {
        let op = Operator::ALL[op_index];
        let rhs = if op == Operator::Divide { rhs.max(1) } else { rhs };
        let math = MathQuery::new(lhs, op, rhs);
        let shown = parse_calculator_text(&math.expected().to_string()).unwrap();
        prop_assert!(is_close_to(shown, math.expected(), 8));
    }
}
