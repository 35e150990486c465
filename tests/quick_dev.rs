use anyhow::Result;
use serde_json::json;

// Needs a server on :8080, e.g. `STORE_BACKEND=memory TABLE_NAME=posts`.
#[tokio::test]
#[ignore]
async fn quick_dev() -> Result<()> {
    let hc = httpc_test::new_client("http://localhost:8080")?;

    hc.do_post(
        "/posts",
        json!({
          "title": "Bitcoin",
          "content": "Let's create a cold wallet of Bitcoin",
        }),
    )
    .await?
    .print()
    .await?;

    hc.do_get("/posts").await?.print().await?;

    hc.do_put(
        "/posts",
        json!({
          "id": "quick-dev",
          "title": "Bitcoin",
          "content": "Cold wallets, revisited",
        }),
    )
    .await?
    .print()
    .await?;

    // httpc-test sends DELETE without a body, so this only reaches the missing-id path.
    hc.do_delete("/posts").await?.print().await?;

    hc.do_put("/user", json!({ "name": "John Doe" }))
        .await?
        .print()
        .await?;

    Ok(())
}
