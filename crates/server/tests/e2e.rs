use std::net::SocketAddr;
use std::path::PathBuf;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

use server::startup::build_app;

struct TestApp {
    base_url: String,
    data_file: PathBuf,
}

async fn start_server(data_file: PathBuf) -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.storage.data_file = data_file.to_string_lossy().into_owned();
    let app = build_app(&cfg).await?;

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, data_file })
}

fn temp_data_file() -> PathBuf {
    PathBuf::from(format!("target/test-data/{}/db.json", Uuid::new_v4()))
}

#[tokio::test]
async fn e2e_queue_persists_to_json_file() -> anyhow::Result<()> {
    let app = start_server(temp_data_file()).await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/api/volunteers", app.base_url))
        .json(&json!({"name": "Ana", "experienceYears": 10, "availabilityScore": 5}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let ana = res.json::<Value>().await?;

    let res = c.post(format!("{}/api/volunteers", app.base_url))
        .json(&json!({"name": "Bo", "experienceYears": 2, "availabilityScore": 2}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let bo = res.json::<Value>().await?;

    let res = c.post(format!("{}/api/assign", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["assignedVolunteer"], ana);

    // 直接读取磁盘上的文档，确认格式与内容
    let text = tokio::fs::read_to_string(&app.data_file).await?;
    let on_disk: Value = serde_json::from_str(&text)?;
    assert_eq!(on_disk, json!({"queued_volunteers": [bo], "assigned_volunteers": [ana]}));
    assert!(text.contains("\n  \"assigned_volunteers\""));

    let _ = tokio::fs::remove_dir_all(app.data_file.parent().unwrap()).await;
    Ok(())
}

#[tokio::test]
async fn e2e_restart_reads_existing_document() -> anyhow::Result<()> {
    let data_file = temp_data_file();
    tokio::fs::create_dir_all(data_file.parent().unwrap()).await?;
    // 旧文件缺少 assigned_volunteers，并带有额外的顶层键
    tokio::fs::write(&data_file, r#"{"queued_volunteers": [{"id": 11, "name": "Old", "experienceYears": 1.0, "availabilityScore": 2.0, "priority": 1.4}], "owner": "ops"}"#).await?;

    let app = start_server(data_file).await?;
    let c = reqwest::Client::new();

    let res = c.get(format!("{}/api/data", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let data = res.json::<Value>().await?;
    assert_eq!(data["queued_volunteers"][0]["id"], 11);
    assert_eq!(data["assigned_volunteers"], json!([]));

    let res = c.post(format!("{}/api/assign", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let res = c.post(format!("{}/api/assign", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);

    let on_disk: Value = serde_json::from_str(&tokio::fs::read_to_string(&app.data_file).await?)?;
    assert_eq!(on_disk["owner"], "ops");
    assert_eq!(on_disk["assigned_volunteers"][0]["name"], "Old");
    assert_eq!(on_disk["queued_volunteers"], json!([]));

    let _ = tokio::fs::remove_dir_all(app.data_file.parent().unwrap()).await;
    Ok(())
}
