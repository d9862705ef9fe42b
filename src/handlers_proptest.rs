//! Property-based tests for option value handlers and the registry.
//!
//! These tests use proptest to generate random inputs and verify that
//! invariants hold for all possible inputs.

#[cfg(test)]
mod proptest_tests {
    use crate::handlers::{handle_changefreq, handle_priority, w3_date, CHANGEFREQ_VALUES};
    use crate::registry::OptionRegistry;
    use crate::value::OptionValue;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    // ============================================================================
    // priority property tests
    // ============================================================================

    proptest! {
        /// Property: any priority in [0, 1] normalizes to its own decimal string
        #[test]
        fn priority_in_range_is_its_decimal_string(p in 0.0f64..=1.0) {
            let result = handle_priority(&OptionValue::Number(p)).unwrap();
            prop_assert_eq!(result.parse::<f64>().unwrap(), p);
            prop_assert_eq!(result, p.to_string());
        }

        /// Property: priorities above 1 are rejected
        #[test]
        fn priority_above_range_is_rejected(p in 1.0f64..1e9) {
            prop_assume!(p > 1.0);
            prop_assert!(handle_priority(&OptionValue::Number(p)).is_err());
        }

        /// Property: negative priorities are rejected
        #[test]
        fn priority_below_range_is_rejected(p in -1e9f64..0.0) {
            prop_assume!(p < 0.0);
            prop_assert!(handle_priority(&OptionValue::Number(p)).is_err());
        }

        /// Property: strings are never accepted as priorities
        #[test]
        fn priority_rejects_any_string(s in ".*") {
            prop_assert!(handle_priority(&OptionValue::Text(s)).is_err());
        }
    }

    // ============================================================================
    // changefreq property tests
    // ============================================================================

    proptest! {
        /// Property: only the fixed set of changefreq values is accepted
        #[test]
        fn changefreq_accepts_only_the_fixed_set(s in "[a-zA-Z]{0,10}") {
            let result = handle_changefreq(&OptionValue::Text(s.clone()));
            if CHANGEFREQ_VALUES.contains(&s.as_str()) {
                prop_assert_eq!(result.unwrap(), s);
            } else {
                prop_assert!(result.is_err());
            }
        }

        /// Property: allowed values normalize to themselves
        #[test]
        fn changefreq_is_identity_on_allowed_values(index in 0..CHANGEFREQ_VALUES.len()) {
            let value = CHANGEFREQ_VALUES[index];
            prop_assert_eq!(handle_changefreq(&OptionValue::from(value)).unwrap(), value);
        }
    }

    // ============================================================================
    // w3_date property tests
    // ============================================================================

    proptest! {
        /// Property: month and day are always two digits and the date parses back
        #[test]
        fn w3_date_round_trips(year in 1000i32..=9999, ordinal in 1u32..=365) {
            let date = NaiveDate::from_yo_opt(year, ordinal).unwrap();
            let formatted = w3_date(&date);
            prop_assert_eq!(formatted.len(), 10);
            prop_assert_eq!(
                NaiveDate::parse_from_str(&formatted, "%Y-%m-%d").unwrap(),
                date
            );
        }
    }

    // ============================================================================
    // registry property tests
    // ============================================================================

    proptest! {
        /// Property: add_option then remove_option restores the original names
        #[test]
        fn registry_add_remove_restores_names(name in "[a-z]{1,12}") {
            let mut registry = OptionRegistry::new();
            prop_assume!(!registry.contains(&name));
            let before: Vec<String> = registry.names().map(String::from).collect();

            registry.add(&name, None).unwrap();
            prop_assert!(registry.remove(&name));

            let after: Vec<String> = registry.names().map(String::from).collect();
            prop_assert_eq!(before, after);
        }

        /// Property: the clear sentinel normalizes to "no value" for any name
        #[test]
        fn registry_null_is_always_clear(name in ".*") {
            let registry = OptionRegistry::new();
            prop_assert_eq!(registry.normalize(&name, &OptionValue::Null).unwrap(), None);
        }
    }
}
