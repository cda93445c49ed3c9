use self::data::{SOME_PRIVATE_KEY, SOME_PUBLIC_KEY};
use http::{Method, Request, Uri};
use std::time::{Duration, SystemTime};
use verisig::{sign_request, Context, Verifier};


const SIGNATURE: &str = "HuuCVzbU3mZ2n2tluqlZRynK1GQSdJoO/vVk2hqZXgqoZKKxIqkFi2cyqygqT3Kr5va84iV8wEQF0ewPOW3cl6Qy11c0UaNDxuIhImCR6VzmrbZv0DXrtw3SlLjH2LccI0o0aoh9FairG2+lnDw5gGWZjIgQBDxQkIz5KH4D1HrLz2GnG2mhLuviLWrV+bQ4dBO8yOvQrZjqKv8vMyIV/PVZuWN5A/N9f0lzxr+Oqsd3S88qBdY5t5h9t7vvqOyEeL6UEdQAchnNmVxCnc0oNb+axT7bsaRe5rJZhm6jcJW0nvhmWR/Qyfv6vcYtnzRFUcTeEcrgPGSJP13g1wXWxA==";

fn get_request() -> Request<()> {
    Request::builder()
        .method(Method::POST)
        .uri(Uri::from_static("/foo?param=value&pet=dog"))
        .header("Host", "example.com")
        .header("Date", "Sun, 05 Jan 2014 21:31:40 GMT")
        .header("Content-Type", "application/json")
        .header(
            "Digest",
            "SHA-256=X48E9qOokqqrvdts8nOJRJN3OWDUoyWxBf7kbu9DBPE=",
        )
        .header("Content-Length", "18")
        .body(())
        .unwrap()
}

#[test]
fn sign_some() {
    let ctx = Context::background();
    let req = sign_request(
        &ctx,
        get_request(),
        "Test",
        SOME_PRIVATE_KEY,
        ["(request-target)", "Digest", "Date"],
    )
    .unwrap();

    assert_eq!(
        req.headers()["signature"].to_str().unwrap(),
        format!(
            r#"keyId="Test",algorithm="rsa-sha256",headers="(request-target) digest date",signature="{SIGNATURE}""#
        ),
    );

    // Sun, 05 Jan 2014 21:31:40 GMT
    let signed_at = SystemTime::UNIX_EPOCH + Duration::from_secs(1_388_957_500);
    Verifier::default()
        .verify_at(&ctx, &req, SOME_PUBLIC_KEY, signed_at)
        .unwrap();
}

#[test]
fn sign_some_deterministic() {
    let ctx = Context::background();
    let sign = || {
        sign_request(
            &ctx,
            get_request(),
            "Test",
            SOME_PRIVATE_KEY,
            ["(request-target)", "host", "date"],
        )
        .unwrap()
    };

    assert_eq!(sign().headers()["signature"], sign().headers()["signature"]);
}
