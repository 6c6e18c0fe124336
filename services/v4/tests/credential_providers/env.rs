use super::context;
use anyhow::Result;
use sigv4::{Config, DefaultCredentialProvider, EnvCredentialProvider};
use sigv4_core::ProvideCredential;

#[tokio::test]
async fn test_env_provider() -> Result<()> {
    let ctx = context(&[
        ("AWS_ACCESS_KEY_ID", "access_key_id"),
        ("AWS_SECRET_ACCESS_KEY", "secret_access_key"),
        ("AWS_SESSION_TOKEN", "session_token"),
    ]);

    let cred = EnvCredentialProvider::new()
        .provide_credential(&ctx)
        .await?
        .expect("credential must be loaded");
    assert_eq!(cred.access_key_id, "access_key_id");
    assert_eq!(cred.secret_access_key, "secret_access_key");
    assert_eq!(cred.session_token.as_deref(), Some("session_token"));
    Ok(())
}

#[tokio::test]
async fn test_default_provider_from_config() -> Result<()> {
    let ctx = context(&[
        ("AWS_REGION", "us-west-2"),
        ("AWS_ACCESS_KEY_ID", "env_access_key_id"),
        ("AWS_SECRET_ACCESS_KEY", "env_secret_access_key"),
    ]);

    let cfg = Config::default().with_service("s3").from_env(&ctx);
    assert_eq!(cfg.region.as_deref(), Some("us-west-2"));

    let cred = DefaultCredentialProvider::with_config(&cfg)
        .provide_credential(&ctx)
        .await?
        .expect("credential must be loaded");
    assert_eq!(cred.access_key_id, "env_access_key_id");
    Ok(())
}
