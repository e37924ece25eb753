use super::*;
use crate::internal::providers::ProviderKind;

fn translate(kind: ProviderKind, hosts: &[HostMapping], url: &str) -> Result<String, SourceLinkError> {
    translate_url(kind.provider(), url, &ResolveContext::new(hosts))
}

fn defaults(kind: ProviderKind) -> Vec<HostMapping> {
    kind.provider().default_hosts()
}

mod translate_url_tests {
    use super::*;

    #[test]
    fn test_github_scp() {
        let hosts = defaults(ProviderKind::GitHub);
        assert_eq!(
            translate(ProviderKind::GitHub, &hosts, "git@github.com:org/repo.git"),
            Ok("https://github.com/org/repo.git".to_string())
        );
        assert_eq!(
            translate(ProviderKind::GitHub, &hosts, "git://github.com/org/repo"),
            Ok("https://github.com/org/repo".to_string())
        );
    }

    #[test]
    fn test_subdomain_matches() {
        let hosts = vec![HostMapping::new("contoso.com")];
        assert_eq!(
            translate(
                ProviderKind::GitLab,
                &hosts,
                "ssh://git@gitlab.contoso.com:2222/group/repo.git"
            ),
            Ok("https://gitlab.contoso.com/group/repo.git".to_string())
        );
    }

    #[test]
    fn test_unmatched_host_is_unchanged() {
        let hosts = defaults(ProviderKind::GitHub);
        assert_eq!(
            translate(ProviderKind::GitHub, &hosts, "git@contoso.com:org/repo.git"),
            Ok("git@contoso.com:org/repo.git".to_string())
        );
        assert_eq!(
            translate(ProviderKind::GitHub, &hosts, "ssh://git@notgithub.com/org/repo"),
            Ok("ssh://git@notgithub.com/org/repo".to_string())
        );
    }

    #[test]
    fn test_not_a_url_is_unchanged() {
        let hosts = defaults(ProviderKind::GitHub);
        for value in ["/local/repo", "C:\\local\\repo", "relative/repo"] {
            assert_eq!(
                translate(ProviderKind::GitHub, &hosts, value),
                Ok(value.to_string())
            );
        }
    }

    #[test]
    fn test_https_is_unchanged() {
        let hosts = defaults(ProviderKind::GitHub);
        assert_eq!(
            translate(ProviderKind::GitHub, &hosts, "https://user@github.com/org/repo"),
            Ok("https://user@github.com/org/repo".to_string())
        );
    }

    #[test]
    fn test_azure_repos() {
        let hosts = defaults(ProviderKind::AzureRepos);
        assert_eq!(
            translate(
                ProviderKind::AzureRepos,
                &hosts,
                "git@ssh.dev.azure.com:v3/org/proj/repo"
            ),
            Ok("https://dev.azure.com/org/proj/_git/repo".to_string())
        );
        assert_eq!(
            translate(
                ProviderKind::AzureRepos,
                &hosts,
                "account@vs-ssh.visualstudio.com:v3/account/proj/repo"
            ),
            Ok("account@vs-ssh.visualstudio.com:v3/account/proj/repo".to_string())
        );
        assert_eq!(
            translate(
                ProviderKind::AzureRepos,
                &hosts,
                "ssh://account@vs-ssh.visualstudio.com:22/DefaultCollection/proj/_ssh/repo"
            ),
            Ok("https://account.visualstudio.com/DefaultCollection/proj/_git/repo".to_string())
        );
    }

    #[test]
    fn test_azure_devops_server() {
        let hosts = vec![HostMapping::new("tfs.contoso.com").with_virtual_directory("tfs")];
        assert_eq!(
            translate(
                ProviderKind::AzureDevOpsServer,
                &hosts,
                "ssh://tfs.contoso.com:22/tfs/collection/proj/_ssh/repo"
            ),
            Ok("https://tfs.contoso.com/tfs/collection/proj/_git/repo".to_string())
        );
    }

    #[test]
    fn test_bitbucket_enterprise() {
        let hosts = vec![HostMapping::new("bitbucket.contoso.com")];
        assert_eq!(
            translate(
                ProviderKind::Bitbucket,
                &hosts,
                "ssh://git@bitbucket.contoso.com:7999/proj/repo.git"
            ),
            Ok("https://bitbucket.contoso.com/scm/proj/repo.git".to_string())
        );
    }

    #[test]
    fn test_gitweb() {
        let hosts = vec![HostMapping::new("git.contoso.com")];
        assert_eq!(
            translate(ProviderKind::GitWeb, &hosts, "git@git.contoso.com:tools"),
            Ok("git@git.contoso.com:tools".to_string())
        );
        assert!(matches!(
            translate(ProviderKind::GitWeb, &hosts, "https://git.contoso.com/tools"),
            Err(SourceLinkError::UnsupportedTransport { .. })
        ));
    }

    #[test]
    fn test_implicit_host() {
        let context = ResolveContext::new(&[])
            .with_repository_url(Some("git@gitea.contoso.com:org/repo.git"), true);
        assert_eq!(
            translate_url(
                ProviderKind::Gitea.provider(),
                "git@gitea.contoso.com:org/other.git",
                &context
            ),
            Ok("https://gitea.contoso.com/org/other.git".to_string())
        );
    }

    #[test]
    fn test_invalid_host_declaration() {
        let hosts = vec![HostMapping::new("https://github.com")];
        assert_eq!(
            translate(ProviderKind::GitHub, &hosts, "git@github.com:org/repo.git"),
            Err(SourceLinkError::InvalidHost("https://github.com".to_string()))
        );
    }
}

mod translate_repository_urls_tests {
    use super::*;

    #[test]
    fn test_translates_project_and_git_roots() {
        let hosts = defaults(ProviderKind::GitHub);
        let mut roots = vec![
            RepositoryRoot::git("/src/", "git@github.com:org/repo.git", "abc"),
            RepositoryRoot::new("/tfvc/", "tfvc"),
            RepositoryRoot::new("/empty/", "git"),
        ];

        let repository_url = translate_repository_urls(
            ProviderKind::GitHub.provider(),
            Some("git@github.com:org/repo.git"),
            &mut roots,
            &ResolveContext::new(&hosts),
        )
        .unwrap();

        assert_eq!(
            repository_url.as_deref(),
            Some("https://github.com/org/repo.git")
        );
        assert_eq!(
            roots[0].scm_repository_url.as_deref(),
            Some("https://github.com/org/repo.git")
        );
        assert_eq!(
            roots[0].repository_url.as_deref(),
            Some("git@github.com:org/repo.git")
        );
        assert_eq!(roots[1].scm_repository_url, None);
        assert_eq!(roots[2].scm_repository_url, None);
    }

    #[test]
    fn test_collects_errors() {
        let hosts = vec![HostMapping::new("git.contoso.com")];
        let mut roots = vec![
            RepositoryRoot::git("/a/", "https://git.contoso.com/a", "abc"),
            RepositoryRoot::git("/b/", "git@git.contoso.com:b", "abc"),
            RepositoryRoot::git("/c/", "git://git.contoso.com/c", "abc"),
        ];

        let errors = translate_repository_urls(
            ProviderKind::GitWeb.provider(),
            None,
            &mut roots,
            &ResolveContext::new(&hosts),
        )
        .unwrap_err();

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.errors[0].0, "/a/");
        assert_eq!(errors.errors[1].0, "/c/");
        assert_eq!(
            roots[1].scm_repository_url.as_deref(),
            Some("git@git.contoso.com:b")
        );
    }
}
