use anyhow::{Context, Result, bail};
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
struct Todo {
    id: i64,
    title: Option<String>,
    description: Option<String>,
    completed: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Defaults assume the server is running locally on :3000
    let base = std::env::var("BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
    let todos = format!("{base}/todos");
    let http = Client::new();

    // 1) POST /todos
    let body = call(
        &http,
        Method::POST,
        &todos,
        Some(json!({ "title": "Buy milk", "description": "2%", "completed": false })),
        StatusCode::CREATED,
    )
    .await?;
    let created: Todo = serde_json::from_str(&body).context("parsing created todo failed")?;
    let item = format!("{todos}/{}", created.id);

    // 2) GET /todos/{id}
    call(&http, Method::GET, &item, None, StatusCode::OK).await?;

    // 3) PATCH /todos/{id}
    let body = call(
        &http,
        Method::PATCH,
        &item,
        Some(json!({ "completed": true })),
        StatusCode::OK,
    )
    .await?;
    let patched: Todo = serde_json::from_str(&body).context("parsing patched todo failed")?;
    println!(
        "\n{:?} ({:?}) completed: {}",
        patched.title, patched.description, patched.completed
    );

    // 4) GET /todos
    let body = call(&http, Method::GET, &todos, None, StatusCode::OK).await?;
    let listing: Value = serde_json::from_str(&body).context("parsing listing failed")?;
    let count = listing["_embedded"]["todos"]
        .as_array()
        .map(Vec::len)
        .unwrap_or_default();
    println!("\n{count} todo(s) stored");

    // 5) DELETE /todos/{id}, then confirm it is gone
    call(&http, Method::DELETE, &item, None, StatusCode::NO_CONTENT).await?;
    call(&http, Method::GET, &item, None, StatusCode::NOT_FOUND).await?;

    Ok(())
}

async fn call(
    http: &Client,
    method: Method,
    url: &str,
    body: Option<Value>,
    expected: StatusCode,
) -> Result<String> {
    println!("\n==> {method} {url}");

    let mut req = http.request(method.clone(), url);
    if let Some(body) = body {
        req = req.json(&body);
    }

    let resp = req
        .send()
        .await
        .with_context(|| format!("{method} request failed"))?;
    let status = resp.status();
    let text = resp
        .text()
        .await
        .with_context(|| format!("reading {method} body failed"))?;

    println!("Status: {status}");
    println!("Body: {text}");

    if status != expected {
        bail!("{method} {url} returned {status}, expected {expected}");
    }
    Ok(text)
}
