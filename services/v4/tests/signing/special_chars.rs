use super::*;
use anyhow::Result;
use pretty_assertions::assert_eq;
use sigv4::RequestSigner;
use sigv4_core::{ErrorKind, SignRequest, SignablePayload, SigningMethod};

fn sign(uri: &str) -> Result<Parts> {
    let signer = RequestSigner::new("s3", "us-east-1");
    let mut req = parts(http::Request::get(uri).body(())?);
    signer.sign_request(
        &mut req,
        SignablePayload::EMPTY,
        Some(&s3_credential()),
        s3_time(),
        SigningMethod::Header,
    )?;
    Ok(req)
}

fn canonical_lines(req: &Parts) -> Result<Vec<String>> {
    let creq = canonical_request(
        req,
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
    )?;
    Ok(creq.lines().map(|v| v.to_string()).collect())
}

#[test]
fn test_path_with_spaces_and_unicode() -> Result<()> {
    let req = sign("https://examplebucket.s3.amazonaws.com/my%20file%E2%9C%93.txt")?;
    assert_eq!(canonical_lines(&req)?[1], "/my%20file%E2%9C%93.txt");
    Ok(())
}

#[test]
fn test_path_reserved_characters() -> Result<()> {
    let req = sign("https://examplebucket.s3.amazonaws.com/a:b@c!d(e)f*g'h")?;
    assert_eq!(canonical_lines(&req)?[1], "/a%3Ab%40c%21d%28e%29f%2Ag%27h");
    Ok(())
}

#[test]
fn test_path_repeated_slashes() -> Result<()> {
    let req = sign("https://examplebucket.s3.amazonaws.com//a///b")?;
    assert_eq!(canonical_lines(&req)?[1], "/a/b");
    // The request itself keeps the path it was sent with.
    assert_eq!(req.uri.path(), "//a///b");
    Ok(())
}

#[test]
fn test_path_equivalent_encodings() -> Result<()> {
    let a = sign("https://examplebucket.s3.amazonaws.com/hello%20world")?;
    let b = sign("https://examplebucket.s3.amazonaws.com/hello%20world")?;
    let c = sign("https://examplebucket.s3.amazonaws.com/h%65llo%20world")?;

    assert_eq!(header_signature(&a), header_signature(&b));
    assert_eq!(header_signature(&a), header_signature(&c));
    Ok(())
}

#[test]
fn test_query_special_characters() -> Result<()> {
    let req = sign(
        "https://examplebucket.s3.amazonaws.com/?prefix=photos%2F2024&delimiter=%2F&list-type=2&marker",
    )?;
    assert_eq!(
        canonical_lines(&req)?[2],
        "delimiter=%2F&list-type=2&marker=&prefix=photos%2F2024"
    );
    Ok(())
}

#[test]
fn test_query_duplicate_names_sorted_by_value() -> Result<()> {
    let a = sign("https://examplebucket.s3.amazonaws.com/?tag=b&tag=a")?;
    let b = sign("https://examplebucket.s3.amazonaws.com/?tag=a&tag=b")?;

    assert_eq!(canonical_lines(&a)?[2], "tag=a&tag=b");
    assert_eq!(header_signature(&a), header_signature(&b));
    Ok(())
}

#[test]
fn test_invalid_utf8_path() -> Result<()> {
    let signer = RequestSigner::new("s3", "us-east-1");
    let mut req =
        parts(http::Request::get("https://examplebucket.s3.amazonaws.com/%C3%28").body(())?);

    let err = signer
        .sign_request(
            &mut req,
            SignablePayload::EMPTY,
            Some(&s3_credential()),
            s3_time(),
            SigningMethod::Header,
        )
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::EncodingInvalid);
    assert!(req.headers.is_empty());
    Ok(())
}
