use super::*;

#[test]
fn parse_completes_partial_versions() {
    assert_eq!(ServerVersion::parse("4").unwrap().to_string(), "4.0.0");
    assert_eq!(ServerVersion::parse("4.7").unwrap().to_string(), "4.7.0");
    assert_eq!(ServerVersion::parse("12.0.1").unwrap().to_string(), "12.0.1");
    assert_eq!(ServerVersion::parse("v11.10").unwrap().to_string(), "11.10.0");
}

#[test]
fn parse_keeps_prerelease() {
    let version = ServerVersion::parse("12.0-rc1").unwrap();
    assert_eq!(version.to_string(), "12.0.0-rc1");
    assert!(version.at_least(12, 0));
}

#[test]
fn parse_rejects_garbage() {
    assert!(ServerVersion::parse("").is_none());
    assert!(ServerVersion::parse("latest").is_none());
    assert!(ServerVersion::parse("4.x").is_none());
}

#[test]
fn at_least_compares_major_and_minor() {
    let version = ServerVersion::parse("4.6.9").unwrap();
    assert!(!version.at_least(4, 7));
    assert!(version.at_least(4, 6));
    assert!(ServerVersion::parse("4.7").unwrap().at_least(4, 7));
    assert!(ServerVersion::parse("5.0").unwrap().at_least(4, 7));
    assert!(!ServerVersion::parse("11.10").unwrap().at_least(12, 0));
}

#[test]
fn declared_version_from_host() {
    assert_eq!(declared_version(None), Ok(None));

    let mut mapping = HostMapping::new("gitlab.contoso.com");
    assert_eq!(declared_version(Some(&mapping)), Ok(None));

    mapping.version = Some("11.0".to_string());
    let version = declared_version(Some(&mapping)).unwrap().unwrap();
    assert!(!version.at_least(12, 0));

    mapping.version = Some("eleven".to_string());
    assert_eq!(
        declared_version(Some(&mapping)),
        Err(SourceLinkError::InvalidVersion {
            host: "gitlab.contoso.com".to_string(),
            version: "eleven".to_string(),
        })
    );
}
