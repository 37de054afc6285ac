mod common;

use anyhow::Result;
use study_service::cli::client::StudyClient;

#[tokio::test]
async fn client_drives_create_list_delete() -> Result<()> {
    let server = common::start_server().await?;
    let client = StudyClient::new(format!("{}/", server.base_url));

    let study = client.create("CLI Trial", Some("from the client")).await?;
    let id = study.id.expect("server assigns an id");
    assert_eq!(study.name, "CLI Trial");

    let listed = client.list().await?;
    assert_eq!(listed, vec![study]);

    client.delete(id).await?;
    assert!(client.list().await?.is_empty());

    let (status, body) = client.health().await?;
    assert!(status.is_success());
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn client_errors_when_server_unreachable() -> Result<()> {
    let port = portpicker::pick_unused_port().expect("free port");
    let client = StudyClient::new(format!("http://127.0.0.1:{}", port));

    let err = client.list().await.unwrap_err();
    assert!(err.to_string().contains("failed to reach"), "unexpected error: {}", err);
    Ok(())
}

#[tokio::test]
async fn empty_name_is_accepted() -> Result<()> {
    let server = common::start_server().await?;
    let client = StudyClient::new(server.base_url.clone());

    let created = client.create("", None).await?;
    assert_eq!(created.name, "");
    assert_eq!(client.list().await?.len(), 1);
    Ok(())
}
