use ecom_env::{Environment, KindeConfig};

fn json() -> serde_json::Value {
    serde_json::to_value(Environment::development()).unwrap()
}

#[test]
fn test_exact_key_set() {
    let value = json();
    let top: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(top.len(), 2);
    assert!(top.contains(&"kinde"));
    assert!(top.contains(&"apiUrl"));

    let mut kinde: Vec<&str> = value["kinde"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    kinde.sort_unstable();
    assert_eq!(
        kinde,
        [
            "audience",
            "authority",
            "clientId",
            "postLogoutRedirectUri",
            "redirectUrl"
        ]
    );
}

#[test]
fn test_development_values() {
    let env = Environment::development();
    assert_eq!(env.kinde().authority(), "https://shopecom.kinde.com");
    assert_eq!(env.kinde().redirect_url(), "http://localhost:4200");
    assert_eq!(env.kinde().post_logout_redirect_uri(), "http://localhost:4200");
    assert_eq!(env.kinde().client_id(), "79d811f5d44847c8a05abd1317ee54c7");
    assert_eq!(env.kinde().audience(), "http://localhost:8080/api");
    assert_eq!(env.api_url(), "http://localhost:8080/api");
}

#[test]
fn test_serialized_values() {
    let value = json();
    assert_eq!(value["kinde"]["authority"], "https://shopecom.kinde.com");
    assert_eq!(value["kinde"]["redirectUrl"], "http://localhost:4200");
    assert_eq!(value["kinde"]["postLogoutRedirectUri"], "http://localhost:4200");
    assert_eq!(value["kinde"]["clientId"], "79d811f5d44847c8a05abd1317ee54c7");
    assert_eq!(value["kinde"]["audience"], "http://localhost:8080/api");
    assert_eq!(value["apiUrl"], "http://localhost:8080/api");
}

#[test]
fn test_deserialize_rejects_unknown_fields() {
    let mut value = json();
    value["kinde"]["clientSecret"] = "nope".into();
    assert!(serde_json::from_value::<Environment>(value).is_err());
}

#[test]
fn test_deserialize_round_trip() {
    let env: Environment = serde_json::from_value(json()).unwrap();
    assert_eq!(env, Environment::development());
}

#[test]
fn test_clone_is_independent_and_equal() {
    let a = Environment::development();
    let b = a.clone();
    assert_eq!(a, b);
    assert_eq!(Environment::default(), a);
}

#[test]
fn test_new_validates_urls() {
    let kinde = KindeConfig::new(
        "https://shop-staging.kinde.com",
        "https://staging.shop.example",
        "https://staging.shop.example",
        "abc123",
        "https://api.staging.shop.example",
    )
    .unwrap();
    let env = Environment::new(kinde, "https://api.staging.shop.example").unwrap();
    assert_eq!(env.kinde().client_id(), "abc123");
    assert!(env.insecure_urls().is_empty());

    assert!(KindeConfig::new("shopecom", "http://a", "http://a", "id", "http://b").is_err());
}
