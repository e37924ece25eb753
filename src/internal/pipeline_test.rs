use super::*;
use crate::internal::config::ProviderConfig;
use crate::internal::errors::SourceLinkError;

const ZEROS: &str = "0000000000000000000000000000000000000000";

fn config(providers: Vec<ProviderConfig>, repository_url: Option<&str>) -> SourceLinkConfig {
    SourceLinkConfig {
        repository_url: repository_url.map(str::to_string),
        providers,
    }
}

mod translate_tests {
    use super::*;

    #[test]
    fn test_project_url_is_translated() {
        let config = config(
            vec![ProviderConfig::new(ProviderKind::GitHub)],
            Some("git@github.com:org/repo.git"),
        );
        let mut roots = vec![RepositoryRoot::git("/src/", "git@github.com:org/repo.git", ZEROS)];

        assert_eq!(
            translate(&config, &mut roots),
            Ok(Some("https://github.com/org/repo.git".to_string()))
        );
        assert_eq!(
            roots[0].scm_repository_url.as_deref(),
            Some("https://github.com/org/repo.git")
        );
    }
}

mod generate_tests {
    use super::*;

    #[test]
    fn test_ssh_remotes_end_to_end() {
        let config = config(
            vec![ProviderConfig::new(ProviderKind::GitHub)],
            Some("git@github.com:org/repo.git"),
        );
        let mut roots = vec![
            RepositoryRoot::git("/src/", "git@github.com:org/repo.git", ZEROS),
            RepositoryRoot::git("/src/lib/", "https://github.com/org/lib", ZEROS),
        ];

        let manifest = generate(&config, &mut roots).unwrap();
        assert_eq!(
            manifest.to_json().unwrap(),
            format!(
                concat!(
                    r#"{{"documents":{{"#,
                    r#""/src/*":"https://raw.githubusercontent.com/org/repo/{zeros}/*","#,
                    r#""/src/lib/*":"https://raw.githubusercontent.com/org/lib/{zeros}/*""#,
                    r#"}}}}"#
                ),
                zeros = ZEROS
            )
        );
    }

    #[test]
    fn test_first_matching_provider_wins() {
        let config = config(
            vec![
                ProviderConfig::new(ProviderKind::GitLab)
                    .with_host(HostMapping::new("git.contoso.com")),
                ProviderConfig::new(ProviderKind::Gitea)
                    .with_host(HostMapping::new("gitea.contoso.com")),
            ],
            None,
        );
        let mut roots = vec![
            RepositoryRoot::git("/a/", "https://git.contoso.com/g/a", ZEROS),
            RepositoryRoot::git("/b/", "https://gitea.contoso.com/g/b", ZEROS),
        ];

        let manifest = generate(&config, &mut roots).unwrap();
        assert_eq!(
            manifest.documents()[0].1,
            format!("https://git.contoso.com/g/a/-/raw/{}/*", ZEROS)
        );
        assert_eq!(
            manifest.documents()[1].1,
            format!("https://gitea.contoso.com/g/b/raw/commit/{}/*", ZEROS)
        );
    }

    #[test]
    fn test_implicit_host_with_single_provider() {
        let config = config(
            vec![ProviderConfig::new(ProviderKind::GitLab)],
            Some("https://gitlab.contoso.com/g/r.git"),
        );
        let mut roots = vec![RepositoryRoot::git(
            "/src/",
            "https://gitlab.contoso.com/g/r.git",
            ZEROS,
        )];

        let manifest = generate(&config, &mut roots).unwrap();
        assert_eq!(manifest.len(), 1);

        let config = SourceLinkConfig {
            providers: vec![
                ProviderConfig::new(ProviderKind::GitLab),
                ProviderConfig::new(ProviderKind::GitHub),
            ],
            ..config
        };
        let mut roots = vec![RepositoryRoot::git(
            "/src/",
            "https://gitlab.contoso.com/g/r.git",
            ZEROS,
        )];
        let manifest = generate(&config, &mut roots).unwrap();
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_errors_are_collected_across_roots() {
        let config = config(vec![ProviderConfig::new(ProviderKind::GitHub)], None);
        let mut roots = vec![
            RepositoryRoot::git("/a/", "https://github.com/org/a", "nope"),
            RepositoryRoot::git("/b/", "https://github.com/org/b", ZEROS),
            RepositoryRoot::git("/c/", "https://github.com/org/c", "1234"),
        ];

        let errors = generate(&config, &mut roots).unwrap_err();
        assert_eq!(
            errors.errors,
            vec![
                (
                    "/a/".to_string(),
                    SourceLinkError::InvalidRevisionId("nope".to_string())
                ),
                (
                    "/c/".to_string(),
                    SourceLinkError::InvalidRevisionId("1234".to_string())
                ),
            ]
        );
        assert!(roots[1].source_link_url.is_some());
    }

    #[test]
    fn test_invalid_provider_is_reported_once() {
        let config = config(
            vec![
                ProviderConfig::new(ProviderKind::AzureDevOpsServer)
                    .with_host(HostMapping::new("tfs.contoso.com")),
                ProviderConfig::new(ProviderKind::GitHub),
            ],
            None,
        );
        let mut roots = vec![
            RepositoryRoot::git("/a/", "https://github.com/org/a", ZEROS),
            RepositoryRoot::git("/b/", "git@github.com:org/b.git", ZEROS),
            RepositoryRoot::git("/c/", "https://github.com/org/c", ZEROS),
        ];

        let errors = generate(&config, &mut roots).unwrap_err();
        assert_eq!(
            errors.errors,
            vec![(
                "Azure DevOps Server".to_string(),
                SourceLinkError::MissingHostAttribute {
                    provider: ProviderKind::AzureDevOpsServer,
                    host: "tfs.contoso.com".to_string(),
                    attribute: "virtual_directory",
                }
            )]
        );
        assert!(roots.iter().all(|root| root.source_link_url.is_some()));

        let mut roots = vec![RepositoryRoot::git("/b/", "git@github.com:org/b.git", ZEROS)];
        assert_eq!(translate(&config, &mut roots).unwrap_err().len(), 1);
        assert_eq!(
            roots[0].scm_repository_url.as_deref(),
            Some("https://github.com/org/b.git")
        );
    }
}
