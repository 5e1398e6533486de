//! Cloud-environment derivation tests
//!
//! Pins the hybrid derivations: ADFS detection, the tenant and
//! authority-validation substitutions, and the endpoint-suffix slicing.

use storsmoke::environment::{
    derive_environment, AuthenticationMetadata, CloudEnvironment, EndpointMetadata,
};

const ARM_ENDPOINT: &str = "https://management.local.azurestack.external";

fn metadata_with_login(login_endpoint: &str) -> EndpointMetadata {
    EndpointMetadata {
        gallery_endpoint: "https://gallery.local.azurestack.external".to_string(),
        graph_endpoint: "https://graph.local.azurestack.external".to_string(),
        portal_endpoint: "https://portal.local.azurestack.external".to_string(),
        authentication: AuthenticationMetadata {
            login_endpoint: login_endpoint.to_string(),
            audiences: vec!["https://management.azurestack.local/11111111".to_string()],
        },
    }
}

mod adfs_tests {
    use super::*;

    #[test]
    fn test_adfs_authority_substitutes_fixed_tenant() {
        let env = derive_environment(
            ARM_ENDPOINT,
            &metadata_with_login("https://adfs.local.azurestack.external/adfs"),
        )
        .unwrap();

        assert!(env.adfs);
        assert_eq!(env.effective_tenant("contoso.onmicrosoft.com"), "adfs");
        assert!(!env.validate_authority);
    }

    #[test]
    fn test_aad_authority_keeps_tenant_and_validation() {
        let env = derive_environment(
            ARM_ENDPOINT,
            &metadata_with_login("https://login.microsoftonline.com"),
        )
        .unwrap();

        assert!(!env.adfs);
        assert_eq!(
            env.effective_tenant("contoso.onmicrosoft.com"),
            "contoso.onmicrosoft.com"
        );
        assert!(env.validate_authority);
    }
}

mod suffix_tests {
    use super::*;

    #[test]
    fn test_storage_suffix_slices_at_first_dot() {
        let env = derive_environment(
            ARM_ENDPOINT,
            &metadata_with_login("https://login.microsoftonline.com"),
        )
        .unwrap();

        assert_eq!(env.storage_endpoint_suffix, ".local.azurestack.external");
    }

    #[test]
    fn test_key_vault_suffix_prepends_vault_label() {
        let env = derive_environment(
            ARM_ENDPOINT,
            &metadata_with_login("https://login.microsoftonline.com"),
        )
        .unwrap();

        assert_eq!(env.key_vault_dns_suffix, ".vault.local.azurestack.external");
    }
}

mod environment_record_tests {
    use super::*;

    #[test]
    fn test_token_audience_comes_from_metadata() {
        let env = derive_environment(
            ARM_ENDPOINT,
            &metadata_with_login("https://login.microsoftonline.com"),
        )
        .unwrap();

        assert_eq!(
            env.management_scope(),
            "https://management.azurestack.local/11111111/.default"
        );
    }

    #[test]
    fn test_public_cloud_record() {
        let env = CloudEnvironment::public_cloud();
        assert_eq!(env.management_endpoint, "https://management.azure.com");
        assert_eq!(env.management_scope(), "https://management.azure.com/.default");
        assert!(env.validate_authority);
        assert!(!env.adfs);
    }
}
