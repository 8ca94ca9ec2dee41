// ABOUTME: Integration tests for validated domain types.
// ABOUTME: Covers environment parsing, zones and versions.

use wadm_deploy::types::*;

mod environment_tests {
    use super::*;

    #[test]
    fn display_round_trips_through_parse() {
        for env in Environment::ALL {
            assert_eq!(env.to_string().parse::<Environment>(), Ok(env));
        }
    }

    #[test]
    fn invalid_environment_names_the_input() {
        let err = "staging".parse::<Environment>().unwrap_err();
        assert_eq!(err.to_string(), "invalid environment, got: staging");
    }
}

mod zone_tests {
    use super::*;

    #[test]
    fn reserved_zones_are_environment_names() {
        assert!(Zone::new("edge").is_reserved());
        assert!(Zone::new("acceptance").is_reserved());
        assert!(!Zone::new("production").is_reserved());
        assert!(!Zone::new("eu1").is_reserved());
    }

    #[test]
    fn zone_for_environment_uses_its_name() {
        assert_eq!(Zone::for_environment(Environment::Edge).as_str(), "edge");
    }
}

mod version_tests {
    use super::*;

    #[test]
    fn version_is_kept_verbatim() {
        assert_eq!(Version::new(" 1.2.3 ").unwrap().as_str(), " 1.2.3 ");
    }

    #[test]
    fn empty_version_is_missing() {
        assert_eq!(Version::new(""), Err(MissingVersion));
    }
}
