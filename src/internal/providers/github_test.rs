use super::*;

fn url(value: &str) -> Url {
    Url::parse(value).expect("valid url")
}

mod default_content_url_tests {
    use super::*;

    #[test]
    fn test_github_com_uses_raw_githubusercontent() {
        let content = GitHub
            .default_content_url(
                &Authority::new("github.com", None),
                None,
                &url("https://github.com/org/repo"),
            )
            .unwrap();
        assert_eq!(content.as_str(), "https://raw.githubusercontent.com/");
    }

    #[test]
    fn test_enterprise_serves_raw_on_same_host() {
        let content = GitHub
            .default_content_url(
                &Authority::new("github.contoso.com", None),
                None,
                &url("https://github.contoso.com/org/repo"),
            )
            .unwrap();
        assert_eq!(content.as_str(), "https://github.contoso.com/raw");
    }

    #[test]
    fn test_enterprise_keeps_http() {
        let content = GitHub
            .default_content_url(
                &Authority::new("github.contoso.com", Some(8080)),
                None,
                &url("http://github.contoso.com:8080/org/repo"),
            )
            .unwrap();
        assert_eq!(content.as_str(), "http://github.contoso.com:8080/raw");
    }
}

mod build_content_url_tests {
    use super::*;

    #[test]
    fn test_github_com() {
        let path = GitHub
            .parse_relative_path(&url("https://github.com/org/repo"), "/org/repo", None)
            .unwrap();
        assert_eq!(path.repository_name, "org/repo");

        let content_url = GitHub
            .build_content_url(
                &url("https://raw.githubusercontent.com"),
                &url("https://github.com/org/repo"),
                &path,
                "0123456789abcdef0123456789abcdef01234567",
                None,
            )
            .unwrap();
        assert_eq!(
            content_url,
            "https://raw.githubusercontent.com/org/repo/0123456789abcdef0123456789abcdef01234567/*"
        );
    }

    #[test]
    fn test_enterprise() {
        let path = ParsedRepositoryPath::repository("org/repo");
        let content_url = GitHub
            .build_content_url(
                &url("https://github.contoso.com/raw"),
                &url("https://github.contoso.com/org/repo"),
                &path,
                "0000000000000000000000000000000000000000",
                None,
            )
            .unwrap();
        assert_eq!(
            content_url,
            "https://github.contoso.com/raw/org/repo/0000000000000000000000000000000000000000/*"
        );
    }

    #[test]
    fn test_empty_path_is_rejected() {
        assert!(GitHub
            .parse_relative_path(&url("https://github.com/"), "", None)
            .is_none());
    }
}

mod translate_tests {
    use super::*;

    #[test]
    fn test_ssh_drops_user_and_port() {
        let translated = GitHub
            .translate_ssh_url(&url("ssh://git@github.com:22/org/repo.git"), None)
            .unwrap();
        assert_eq!(translated.as_deref(), Some("https://github.com/org/repo.git"));
    }

    #[test]
    fn test_git_protocol() {
        let translated = GitHub
            .translate_git_url(&url("git://github.com/org/repo"), None)
            .unwrap();
        assert_eq!(translated.as_deref(), Some("https://github.com/org/repo"));
    }

    #[test]
    fn test_http_unchanged() {
        let translated = GitHub
            .translate_http_url(&url("http://github.com/org/repo"), None)
            .unwrap();
        assert_eq!(translated, None);
    }
}
