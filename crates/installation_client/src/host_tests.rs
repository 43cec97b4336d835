use super::*;

#[test]
fn test_default_host_is_public_api() {
    assert_eq!(api_base_url(None).unwrap().as_str(), "https://api.github.com/");
    assert_eq!(
        api_base_url(Some("")).unwrap().as_str(),
        "https://api.github.com/"
    );
    assert_eq!(
        api_base_url(Some("github.com")).unwrap().as_str(),
        "https://api.github.com/"
    );
    assert_eq!(
        api_base_url(Some("api.github.com")).unwrap().as_str(),
        "https://api.github.com/"
    );
}

#[test]
fn test_enterprise_host_uses_api_v3_prefix() {
    let url = api_base_url(Some("github.example.com")).unwrap();

    assert_eq!(url.as_str(), "https://github.example.com/api/v3/");
    assert_eq!(
        url.join("orgs/testorg/installation").unwrap().as_str(),
        "https://github.example.com/api/v3/orgs/testorg/installation"
    );
}

#[test]
fn test_explicit_url_is_kept_with_trailing_slash() {
    assert_eq!(
        api_base_url(Some("http://127.0.0.1:8080")).unwrap().as_str(),
        "http://127.0.0.1:8080/"
    );
    assert_eq!(
        api_base_url(Some("https://ghe.internal/api/v3")).unwrap().as_str(),
        "https://ghe.internal/api/v3/"
    );
}

#[test]
fn test_unparseable_host_is_rejected() {
    let result = api_base_url(Some("bad host name"));

    match result {
        Err(Error::InvalidHost { host, .. }) => assert_eq!(host, "bad host name"),
        other => panic!("Expected InvalidHost, got {other:?}"),
    }
}
