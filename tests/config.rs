// ABOUTME: Integration tests for settings, keyvault index and signer credentials.
// ABOUTME: Tests YAML parsing, defaults, and env-supplied startup secrets.

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;
use wadm_deploy::config::*;
use wadm_deploy::types::Zone;

mod settings {
    use super::*;

    #[test]
    fn defaults_match_production_endpoints() {
        let settings = Settings::default();
        assert_eq!(settings.registry, "ghcr.io/bettyblocks");
        assert_eq!(settings.output_dir, PathBuf::from("wadm"));
        assert_eq!(settings.template, PathBuf::from("template.wadm.yaml"));
        assert_eq!(
            settings.endpoint.url_for(&Zone::new("eu1")),
            "https://eu1.betty.zone/api/actions-compiler/internal/wadm/deploy_native_app"
        );
        assert_eq!(settings.dry_run_url, "https://httpbin.org/anything");
        assert_eq!(settings.application_id, "native");
        assert!(settings.max_concurrency.is_none());
        assert_eq!(
            settings.keyvaults,
            EnvValue::from_env(KEYVAULTS_VAR, Some("{}"))
        );
        assert_eq!(
            settings.signer_credentials,
            EnvValue::from_env(SIGNER_CREDENTIALS_VAR, None)
        );
    }

    #[test]
    fn empty_document_is_default() {
        let settings = Settings::from_yaml("").unwrap();
        assert_eq!(settings.registry, Settings::default().registry);
    }

    #[test]
    fn parse_full_settings() {
        let yaml = r#"
registry: registry.example.com/team
template: deploy/template.yaml
output_dir: out
endpoint: "https://{zone}.example.com/deploy"
dry_run_url: "https://echo.example.com/"
keyvault_endpoints:
  edge: "https://edge.vault/"
application_id: web
sign_timeout: 2s
upload_timeout: 1m 30s
token_ttl: 10m
max_concurrency: 4
keyvaults: '{"eu1": "https://eu1.vault/"}'
signer_credentials:
  env: MY_SECRETS
  default: "{}"
"#;
        let settings = Settings::from_yaml(yaml).unwrap();
        assert_eq!(settings.registry, "registry.example.com/team");
        assert_eq!(
            settings.endpoint.url_for(&Zone::new("z")),
            "https://z.example.com/deploy"
        );
        assert_eq!(settings.keyvault_endpoints.edge, "https://edge.vault/");
        assert_eq!(
            settings.keyvault_endpoints.acceptance,
            "https://betty-acc-keyvault.vault.azure.net/"
        );
        assert_eq!(settings.sign_timeout, Duration::from_secs(2));
        assert_eq!(settings.upload_timeout, Duration::from_secs(90));
        assert_eq!(settings.token_ttl, Duration::from_secs(600));
        assert_eq!(settings.max_concurrency, NonZeroUsize::new(4));
        assert_eq!(
            settings.keyvaults,
            EnvValue::Literal(r#"{"eu1": "https://eu1.vault/"}"#.to_string())
        );
        assert_eq!(
            settings.signer_credentials,
            EnvValue::from_env("MY_SECRETS", Some("{}"))
        );
    }

    #[test]
    fn endpoint_without_zone_placeholder_is_rejected() {
        let err = Settings::from_yaml("endpoint: https://example.com/deploy").unwrap_err();
        assert!(err.to_string().contains("{zone}"));
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        assert!(Settings::from_yaml("max_concurrency: 0").is_err());
    }

    #[test]
    fn discover_without_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::discover(dir.path()).unwrap();
        assert_eq!(settings.registry, "ghcr.io/bettyblocks");
    }

    #[test]
    fn discover_finds_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(SETTINGS_FILENAME), "registry: local/reg\n").unwrap();
        let settings = Settings::discover(dir.path()).unwrap();
        assert_eq!(settings.registry, "local/reg");
    }

    #[test]
    fn explicit_settings_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load_required(&dir.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn relative_paths_are_rooted() {
        let settings = Settings::default().rooted_at(std::path::Path::new("/work"));
        assert_eq!(settings.output_dir, PathBuf::from("/work/wadm"));
        assert_eq!(settings.template, PathBuf::from("/work/template.wadm.yaml"));
    }
}

mod keyvaults {
    use super::*;

    #[test]
    fn parse_index_sorted_by_zone() {
        let index = KeyvaultIndex::from_json(
            r#"{"us1": "https://us1/", "acceptance": "https://acc/", "eu1": "https://eu1/", "edge": "https://edge/"}"#,
        )
        .unwrap();

        assert_eq!(index.len(), 4);
        assert_eq!(index.get(&Zone::new("eu1")), Some("https://eu1/"));
        assert_eq!(
            index.production_zones(),
            vec![Zone::new("eu1"), Zone::new("us1")]
        );
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = KeyvaultIndex::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKeyvaults(_)));
    }

    #[test]
    fn non_string_values_are_rejected() {
        assert!(KeyvaultIndex::from_json(r#"{"eu1": 3}"#).is_err());
        assert!(KeyvaultIndex::from_json(r#"["eu1"]"#).is_err());
    }
}

mod credentials {
    use super::*;

    #[test]
    fn parse_discovery_script_format() {
        let creds = SignerCredentials::from_json(
            r#"{"issuer": "github", "services": [{"eu1": {"secret": "a"}}, {"us1": {"secret": "b"}}]}"#,
        )
        .unwrap();
        assert_eq!(creds.issuer(), "github");
        assert_eq!(creds.secret_for(&Zone::new("eu1")), Some("a"));
        assert_eq!(creds.secret_for(&Zone::new("us1")), Some("b"));
        assert_eq!(creds.secret_for(&Zone::new("ap1")), None);
    }

    #[test]
    fn parse_object_services() {
        let creds = SignerCredentials::from_json(
            r#"{"issuer": "github", "services": {"eu1": {"secret": "a"}}}"#,
        )
        .unwrap();
        assert_eq!(creds.secret_for(&Zone::new("eu1")), Some("a"));
    }

    #[test]
    fn missing_services_is_rejected() {
        let err = SignerCredentials::from_json(r#"{"issuer": "github"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentialKey("services")));
    }

    #[test]
    fn missing_issuer_is_rejected() {
        let err = SignerCredentials::from_json(r#"{"services": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingCredentialKey("issuer")));
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = SignerCredentials::from_json("nope").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCredentials(_)));
    }
}

mod startup {
    use super::*;

    const CREDS: &str = r#"{"issuer": "github", "services": [{"eu1": {"secret": "a"}}]}"#;

    #[test]
    fn loads_secrets_from_environment() {
        temp_env::with_vars(
            [
                (KEYVAULTS_VAR, Some(r#"{"eu1": "https://eu1/"}"#)),
                (SIGNER_CREDENTIALS_VAR, Some(CREDS)),
            ],
            || {
                let config = DeployConfig::from_settings(Settings::default()).unwrap();
                assert_eq!(config.keyvaults.get(&Zone::new("eu1")), Some("https://eu1/"));
                assert_eq!(config.credentials.issuer(), "github");
            },
        );
    }

    #[test]
    fn keyvaults_default_to_empty() {
        temp_env::with_vars(
            [
                (KEYVAULTS_VAR, None),
                (SIGNER_CREDENTIALS_VAR, Some(CREDS)),
            ],
            || {
                let config = DeployConfig::from_settings(Settings::default()).unwrap();
                assert!(config.keyvaults.is_empty());
            },
        );
    }

    #[test]
    fn missing_signer_credentials_is_fatal() {
        temp_env::with_var_unset(SIGNER_CREDENTIALS_VAR, || {
            let err = DeployConfig::from_settings(Settings::default()).unwrap_err();
            assert!(matches!(err, ConfigError::MissingEnvVar(var) if var == SIGNER_CREDENTIALS_VAR));
        });
    }

    #[test]
    fn malformed_keyvaults_is_fatal() {
        temp_env::with_vars(
            [
                (KEYVAULTS_VAR, Some("{")),
                (SIGNER_CREDENTIALS_VAR, Some(CREDS)),
            ],
            || {
                let err = DeployConfig::from_settings(Settings::default()).unwrap_err();
                assert!(matches!(err, ConfigError::InvalidKeyvaults(_)));
            },
        );
    }

    #[test]
    fn literal_sources_skip_the_environment() {
        let settings = Settings {
            keyvaults: EnvValue::Literal(r#"{"us1": "https://us1/"}"#.to_string()),
            signer_credentials: EnvValue::Literal(CREDS.to_string()),
            ..Settings::default()
        };
        let config = DeployConfig::from_settings(settings).unwrap();
        assert_eq!(config.keyvaults.get(&Zone::new("us1")), Some("https://us1/"));
    }
}
