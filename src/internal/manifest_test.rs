use super::*;

fn root(path: &str, url: Option<&str>) -> RepositoryRoot {
    RepositoryRoot {
        path: path.to_string(),
        source_control: "git".to_string(),
        source_link_url: url.map(str::to_string),
        ..Default::default()
    }
}

#[test]
fn test_keys_keep_root_order() {
    let roots = vec![
        root("/src/b/", Some("https://b.com/*")),
        root("/src/a/", Some("https://a.com/*")),
        root("/src/none/", None),
        root("/src/na/", Some("N/A")),
    ];

    let manifest = generate_manifest(&roots).unwrap();
    assert_eq!(
        manifest.documents(),
        &[
            ("/src/b/*".to_string(), "https://b.com/*".to_string()),
            ("/src/a/*".to_string(), "https://a.com/*".to_string()),
        ]
    );
}

#[test]
fn test_mapped_path_is_the_key() {
    let mut mapped = root("/home/build/src/", Some("https://a.com/*"));
    mapped.mapped_path = Some("/_/".to_string());

    let manifest = generate_manifest(&[mapped]).unwrap();
    assert_eq!(manifest.documents()[0].0, "/_/*");
}

#[test]
fn test_json_escaping() {
    let roots = vec![root(
        "C:\\src\\\"quoted\"\\",
        Some("https://a.com/x/*"),
    )];

    let manifest = generate_manifest(&roots).unwrap();
    assert_eq!(
        manifest.to_json().unwrap(),
        r#"{"documents":{"C:\\src\\\"quoted\"\\*":"https://a.com/x/*"}}"#
    );
}

#[test]
fn test_all_errors_are_collected() {
    let roots = vec![
        root("/no-separator", Some("https://a.com/*")),
        root("/no-wildcard/", Some("https://a.com/")),
        root("/two-wildcards/", Some("https://a.com/*/*")),
        root("/ok/", Some("https://a.com/*")),
    ];

    let errors = generate_manifest(&roots).unwrap_err();
    assert_eq!(
        errors.errors,
        vec![
            (
                "/no-separator".to_string(),
                SourceLinkError::InvalidLocalPath("/no-separator".to_string())
            ),
            (
                "/no-wildcard/".to_string(),
                SourceLinkError::InvalidWildcard("https://a.com/".to_string())
            ),
            (
                "/two-wildcards/".to_string(),
                SourceLinkError::InvalidWildcard("https://a.com/*/*".to_string())
            ),
        ]
    );
}

#[test]
fn test_empty_manifest() {
    let manifest = generate_manifest(&[root("/src/", None)]).unwrap();
    assert!(manifest.is_empty());
    assert_eq!(manifest.to_json().unwrap(), r#"{"documents":{}}"#);
}
