use std::collections::HashMap;

use micro_client::{
    Client, accept, bearer_token, expect_success, get, json, post, read_json_response, read_text_response,
};
use micro_wire::WireError;
use micro_wire::url::UrlBuilder;
use serde::{Deserialize, Serialize};
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[derive(Serialize, Debug)]
struct User {
    name: String,
    zip: String,
}

#[derive(Deserialize, Debug, Default)]
struct Echo {
    #[serde(default)]
    args: HashMap<String, String>,
    #[serde(default)]
    headers: HashMap<String, String>,
    json: Option<serde_json::Value>,
    url: String,
}

fn httpbin() -> UrlBuilder {
    UrlBuilder::new().https().host_and_port("httpbin.org")
}

fn main() {
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let client = Client::default();

    let mut echo = Echo::default();
    let result = client
        .request([get(httpbin().join_path("anything").query("hello", "world")), accept([mime::APPLICATION_JSON])])
        .handle([expect_success(), read_json_response(&mut echo)]);
    match result {
        Ok(()) => info!(url = %echo.url, args = ?echo.args, "got echo"),
        Err(e) => error!(cause = %e, "get failed"),
    }

    let mut echo = Echo::default();
    let user = User { name: "hello".into(), zip: "world".into() };
    let result = client
        .request([
            post(httpbin().join_path("anything")),
            bearer_token(|| Ok::<_, WireError>("secret".to_owned())),
            json(user),
        ])
        .handle([expect_success(), read_json_response(&mut echo)]);
    match result {
        Ok(()) => info!(json = ?echo.json, authorization = ?echo.headers.get("Authorization"), "posted user"),
        Err(e) => error!(cause = %e, "post failed"),
    }

    let mut text = String::new();
    let result = micro_client::request([get("https://httpbin.org/status/418")])
        .handle([read_text_response(&mut text)]);
    match result {
        Ok(()) => info!("{text}"),
        Err(e) => error!(cause = %e, "teapot failed"),
    }
}
