// ABOUTME: Tests for pricing file loading and the linearity of both cost functions
// Uses temporary files for catalogs and proptest for usage counts

#[cfg(test)]
mod tests {
    use crate::pricing::catalog::PricingCatalog;
    use crate::pricing::selectors::{ApiCategory, ConversationType};
    use crate::utils::error::CostError;
    use proptest::prelude::*;
    use std::fs;
    use tempfile::TempDir;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_partial_toml_keeps_defaults() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "pricing.toml",
            r#"
[whatsapp_malaysia]
marketing = 0.1

[twilio_whatsapp.utility]
conversation = 0.03
message = 0.004
"#,
        );

        let catalog = PricingCatalog::load_from_file(&path).unwrap();
        assert_eq!(catalog.flat_rate(ApiCategory::Marketing), 0.1);
        assert_eq!(catalog.flat_rate(ApiCategory::Utility), 0.02);
        let utility = catalog.conversation_rates(ConversationType::Utility);
        assert_eq!(utility.conversation, 0.03);
        assert_eq!(utility.message, 0.004);
        let service = catalog.conversation_rates(ConversationType::ServiceConversation);
        assert_eq!(service.conversation, 0.0022);
    }

    #[test]
    fn test_load_json() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "pricing.json",
            r#"{"whatsapp_malaysia": {"service": 0.03}}"#,
        );

        let catalog = PricingCatalog::load_from_file(&path).unwrap();
        assert_eq!(catalog.flat_rate(ApiCategory::Service), 0.03);
        assert_eq!(catalog.flat_rate(ApiCategory::Authentication), 0.018);
    }

    #[test]
    fn test_load_rejects_unknown_category() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "pricing.toml", "[whatsapp_malaysia]\npromo = 0.5\n");
        assert!(matches!(
            PricingCatalog::load_from_file(&path),
            Err(CostError::Toml(_))
        ));
    }

    #[test]
    fn test_load_rejects_partial_regime() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "pricing.toml",
            "[twilio_whatsapp.utility]\nconversation = 0.03\n",
        );
        match PricingCatalog::load_from_file(&path) {
            Err(CostError::Toml(e)) => assert!(e.to_string().contains("message")),
            other => panic!("expected a TOML error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_negative_rate() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "pricing.toml", "[whatsapp_malaysia]\nutility = -0.02\n");
        assert!(matches!(
            PricingCatalog::load_from_file(&path),
            Err(CostError::Config(_))
        ));
    }

    #[test]
    fn test_load_rejects_unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "pricing.yaml", "whatsapp_malaysia: {}\n");
        assert!(matches!(
            PricingCatalog::load_from_file(&path),
            Err(CostError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            PricingCatalog::load_from_file(&path),
            Err(CostError::Io(_))
        ));
    }

    fn any_category() -> impl Strategy<Value = ApiCategory> {
        prop::sample::select(ApiCategory::ALL.to_vec())
    }

    fn any_conversation_type() -> impl Strategy<Value = ConversationType> {
        prop::sample::select(ConversationType::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn flat_cost_is_rate_times_calls(category in any_category(), calls in 0u64..10_000_000) {
            let catalog = PricingCatalog::default();
            let expected = catalog.flat_rate(category) * calls as f64;
            prop_assert_eq!(catalog.flat_cost(category, calls), expected);
        }

        #[test]
        fn flat_cost_is_additive(
            category in any_category(),
            first in 0u64..1_000_000,
            second in 0u64..1_000_000,
        ) {
            let catalog = PricingCatalog::default();
            let combined = catalog.flat_cost(category, first + second);
            let split = catalog.flat_cost(category, first) + catalog.flat_cost(category, second);
            prop_assert!(close(combined, split), "{} != {}", combined, split);
        }

        #[test]
        fn conversation_cost_is_linear(
            conversation_type in any_conversation_type(),
            conversations in 0u64..1_000_000,
            messages in 0u64..1_000_000,
        ) {
            let catalog = PricingCatalog::default();
            let rate = catalog.conversation_rates(conversation_type);
            let expected = rate.conversation * conversations as f64 + rate.message * messages as f64;
            let cost = catalog.conversation_cost(conversation_type, conversations, messages);
            prop_assert!(close(cost, expected));
            prop_assert!(cost >= 0.0);
        }

        #[test]
        fn unknown_labels_are_rejected(label in "[a-zA-Z_ ]{1,24}") {
            prop_assume!(label.parse::<ApiCategory>().is_err());
            let catalog = PricingCatalog::default();
            let is_invalid_category = matches!(
                catalog.compute_flat_cost(&label, 1),
                Err(CostError::InvalidCategory { .. })
            );
            prop_assert!(is_invalid_category);
        }

        #[test]
        fn relabelled_selectors_are_rejected(category in any_category(), pad in " {0,2}") {
            let catalog = PricingCatalog::default();
            let upper = category.as_str().to_uppercase();
            let padded = format!("{pad}{}{pad} ", category.as_str());
            prop_assert!(catalog.compute_flat_cost(&upper, 1).is_err());
            prop_assert!(catalog.compute_flat_cost(&padded, 1).is_err());
        }
    }
}
