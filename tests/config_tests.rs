//! Run-configuration tests
//!
//! Covers the startup validation contract: every missing variable is named,
//! in the order checked, before any other work happens.

use storsmoke::config::{HybridRunConfig, PublicRunConfig, DEFAULT_LOCATION};
use storsmoke::StorsmokeError;

mod public_config_tests {
    use super::*;

    #[test]
    fn test_all_variables_present() {
        let config = PublicRunConfig::from_lookup(|name| match name {
            "CLIENT_ID" => Some("a".to_string()),
            "DOMAIN" => Some("b".to_string()),
            "APPLICATION_SECRET" => Some("c".to_string()),
            "AZURE_SUBSCRIPTION_ID" => Some("d".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.client_id, "a");
        assert_eq!(config.domain, "b");
        assert_eq!(config.secret, "c");
        assert_eq!(config.subscription_id, "d");
        assert_eq!(config.location, DEFAULT_LOCATION);
    }

    #[test]
    fn test_all_variables_missing_reported_in_order() {
        let err = PublicRunConfig::from_lookup(|_| None).unwrap_err();

        match err {
            StorsmokeError::MissingEnvironment(names) => assert_eq!(
                names,
                vec![
                    "CLIENT_ID",
                    "DOMAIN",
                    "APPLICATION_SECRET",
                    "AZURE_SUBSCRIPTION_ID"
                ]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_single_missing_variable_named_exactly() {
        let err = PublicRunConfig::from_lookup(|name| match name {
            "APPLICATION_SECRET" => None,
            _ => Some("x".to_string()),
        })
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "please set/export the following environment variables: APPLICATION_SECRET"
        );
    }
}

mod hybrid_config_tests {
    use super::*;

    #[test]
    fn test_all_variables_present() {
        let config = HybridRunConfig::from_lookup(|name| match name {
            "CLIENT_ID" => Some("client".to_string()),
            "TENANT_ID" => Some("tenant".to_string()),
            "CLIENT_SECRET" => Some("secret".to_string()),
            "SUBSCRIPTION_ID" => Some("sub".to_string()),
            "ARM_ENDPOINT" => Some("https://management.local.azurestack.external".to_string()),
            "LOCATION" => Some("local".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(config.tenant_id, "tenant");
        assert_eq!(
            config.arm_endpoint,
            "https://management.local.azurestack.external"
        );
        assert_eq!(config.location, "local");
    }

    #[test]
    fn test_missing_variables_reported_in_order() {
        let err = HybridRunConfig::from_lookup(|name| match name {
            "CLIENT_ID" | "SUBSCRIPTION_ID" => Some("x".to_string()),
            _ => None,
        })
        .unwrap_err();

        match err {
            StorsmokeError::MissingEnvironment(names) => assert_eq!(
                names,
                vec!["TENANT_ID", "CLIENT_SECRET", "ARM_ENDPOINT", "LOCATION"]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }
}
