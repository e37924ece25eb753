use super::*;

fn url(value: &str) -> Url {
    Url::parse(value).expect("valid url")
}

#[test]
fn test_content_url() {
    let repository = url("ssh://git@git.contoso.com/projects/tools");
    let content = GitWeb
        .default_content_url(&Authority::new("git.contoso.com", None), None, &repository)
        .unwrap();
    assert_eq!(content.as_str(), "https://git.contoso.com/gitweb");

    let path = GitWeb
        .parse_relative_path(&repository, "/projects/tools", None)
        .unwrap();
    assert_eq!(
        GitWeb
            .build_content_url(&content, &repository, &path, "abc", None)
            .unwrap(),
        "https://git.contoso.com/gitweb/?p=projects/tools.git;a=blob_plain;hb=abc;f=*"
    );
}

#[test]
fn test_ssh_is_kept() {
    assert_eq!(
        GitWeb
            .translate_ssh_url(&url("ssh://git@git.contoso.com/projects/tools"), None)
            .unwrap(),
        None
    );
}

#[test]
fn test_other_transports_are_unsupported() {
    let error = GitWeb
        .translate_git_url(&url("git://git.contoso.com/projects/tools"), None)
        .unwrap_err();
    assert_eq!(
        error,
        SourceLinkError::UnsupportedTransport {
            provider: ProviderKind::GitWeb,
            scheme: "git".to_string(),
            url: "git://git.contoso.com/projects/tools".to_string(),
        }
    );

    assert!(GitWeb
        .translate_http_url(&url("https://git.contoso.com/projects/tools"), None)
        .is_err());
}
