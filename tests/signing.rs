use pretty_assertions::assert_eq;
use twitter_oauthsign::v1::{
    compute_authorization_header, compute_signature, signature_base, Credentials, Parameters,
    Signer,
};
use twitter_oauthsign::{ErrorKind, RestRequest};

const NONCE: &str = "kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg";
const TIMESTAMP: i64 = 1_318_622_958;
const URL: &str = "https://api.twitter.com/1/statuses/update.json?include_entities=true";
const BODY: &str = "status=Hello%20Ladies%20%2B%20Gentlemen%2C%20a%20signed%20OAuth%20request%21";
const SIGNATURE: &str = "tnnArxj06cWHq44gCs1OSKk/jLY=";
const HEADER: &str = r#"OAuth oauth_consumer_key="xvz1evFS4wEEPTGEFPHBog", oauth_nonce="kYjzVBB8Y0ZFabxSWbWovY3uYSQ2pTgmZeNu2VS4cg", oauth_signature="tnnArxj06cWHq44gCs1OSKk%2FjLY%3D", oauth_signature_method="HMAC-SHA1", oauth_timestamp="1318622958", oauth_token="370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb", oauth_version="1.0""#;

fn credentials() -> Credentials {
    Credentials::new(
        "xvz1evFS4wEEPTGEFPHBog",
        "kAcSOqF21Fu85e7zjz7ZN2U4ZRhfV3WpwPAoE3Z7kBw",
        "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb",
        "LswwdoUaIvS8ltyTt5jkRh4J50vUPVVHtR2YPi5kE",
    )
    .expect("credentials must be valid")
}

/// The explicit parameter map exactly as a caller would hand it over.
fn explicit_params() -> Parameters {
    Parameters::from_iter([
        ("oauth_version", "1.0"),
        ("oauth_token", "370773112-GmHxMAgYyLbNEtIKZeRNFsMKPR9EyMZeS9weJAEb"),
        ("oauth_timestamp", "1318622958"),
        ("oauth_signature_method", "HMAC-SHA1"),
        ("oauth_nonce", NONCE),
        ("oauth_consumer_key", "xvz1evFS4wEEPTGEFPHBog"),
    ])
}

#[test]
fn test_known_vector() {
    let _ = env_logger::builder().is_test(true).try_init();
    let creds = credentials();

    let base = signature_base("POST", URL, &explicit_params(), Some(BODY)).unwrap();
    assert_eq!(compute_signature(&creds, &base).unwrap(), SIGNATURE);

    let header =
        compute_authorization_header(&creds, "POST", URL, &explicit_params(), Some(BODY)).unwrap();
    assert_eq!(header, HEADER);
}

#[test]
fn test_known_vector_through_two_step_api() {
    let creds = credentials();
    let standing = Parameters::standing(&creds, NONCE, TIMESTAMP);
    assert_eq!(standing, explicit_params());

    let signed = Signer::new(&creds)
        .nonce(NONCE)
        .timestamp(TIMESTAMP)
        .sign(&RestRequest::post(URL).body(BODY))
        .unwrap();
    assert_eq!(signed.signature, SIGNATURE);
    assert_eq!(signed.header, HEADER);
}

#[test]
fn test_determinism() {
    let creds = credentials();
    let first =
        compute_authorization_header(&creds, "POST", URL, &explicit_params(), Some(BODY)).unwrap();
    for _ in 0..100 {
        let again =
            compute_authorization_header(&creds, "POST", URL, &explicit_params(), Some(BODY))
                .unwrap();
        assert_eq!(again, first);
    }
}

#[test]
fn test_query_string_merge() {
    let explicit = Parameters::new().param("c", "3");
    let base = signature_base("GET", "https://example.com/r?a=1&b=2", &explicit, None).unwrap();
    assert_eq!(base, "GET&https%3A%2F%2Fexample.com%2Fr&a%3D1%26b%3D2%26c%3D3");
}

#[test]
fn test_header_contains_only_protocol_parameters() {
    let creds = credentials();
    let request = RestRequest::get("https://example.com/r?q=rust").param("extra", "value");
    let signed = Signer::new(&creds).sign(&request).unwrap();

    let keys: Vec<&str> = signed
        .header
        .trim_start_matches("OAuth ")
        .split(", ")
        .map(|field| field.split_once('=').map(|(k, _)| k).unwrap_or(field))
        .collect();
    assert_eq!(
        keys,
        vec![
            "oauth_consumer_key",
            "oauth_nonce",
            "oauth_signature",
            "oauth_signature_method",
            "oauth_timestamp",
            "oauth_token",
            "oauth_version",
        ]
    );
    assert!(signed.base_string.contains("extra%3Dvalue"));
    assert!(signed.base_string.contains("q%3Drust"));
}

#[test]
fn test_url_without_scheme_is_rejected() {
    let err = compute_authorization_header(
        &credentials(),
        "GET",
        "example.com/r?a=1",
        &explicit_params(),
        None,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
}

#[test]
fn test_header_without_protocol_parameters_in_map() {
    let creds = credentials();
    let explicit = Parameters::new().param("status", "hi");
    let header = compute_authorization_header(
        &creds,
        "POST",
        "https://api.twitter.com/1.1/statuses/update.json",
        &explicit,
        None,
    )
    .unwrap();

    let keys: Vec<&str> = header
        .trim_start_matches("OAuth ")
        .split(", ")
        .map(|field| field.split_once('=').map(|(k, _)| k).unwrap_or(field))
        .collect();
    assert_eq!(
        keys,
        vec![
            "oauth_consumer_key",
            "oauth_nonce",
            "oauth_signature",
            "oauth_signature_method",
            "oauth_timestamp",
            "oauth_token",
            "oauth_version",
        ]
    );
    assert!(header.contains(r#"oauth_consumer_key="xvz1evFS4wEEPTGEFPHBog""#));
}

#[test]
fn test_mismatched_consumer_key_is_rejected() {
    let mut explicit = explicit_params();
    explicit.insert("oauth_consumer_key", "OTHER");
    let err = compute_authorization_header(&credentials(), "POST", URL, &explicit, Some(BODY))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
}
