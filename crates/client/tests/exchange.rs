//! Full exchanges through the in-process loopback transport.

use std::io::Read;
use std::sync::{Arc, Mutex};

use micro_client::{
    Client, accept, bearer_token, content_type, expect_status_in, expect_status_one_of, expect_success, get, json,
    post, read_json_response, read_text_response, stream,
};
use micro_wire::WireError;
use micro_wire::body::{JsonBody, StringBody, write_body};
use micro_wire::protocol::{RequestBuilder, RequestReader, ResponseWriter, StatusCode};
use micro_wire::sender::{HttpSender, Loopback};
use micro_wire::url::UrlBuilder;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct Todo {
    id: u32,
    title: String,
    done: bool,
}

/// What the server saw of the last request.
#[derive(Debug, Default, Clone)]
struct Seen {
    target: String,
    content_length: Option<String>,
    authorization: Option<String>,
    accept: Option<String>,
    body: String,
}

type Server = Box<dyn Fn(&mut dyn RequestReader, &mut dyn ResponseWriter<'static>) -> Result<(), WireError>>;

fn todo_server(seen: Arc<Mutex<Seen>>) -> Server {
    Box::new(move |request: &mut dyn RequestReader, response: &mut dyn ResponseWriter<'static>| -> Result<(), WireError> {
        let (method, target) = request.request_line();
        let mut body = String::new();
        request.body().read_to_string(&mut body)?;

        if let Ok(mut seen) = seen.lock() {
            *seen = Seen {
                target: target.clone(),
                content_length: request.header("content-length").map(str::to_owned),
                authorization: request.header("authorization").map(str::to_owned),
                accept: request.header("accept").map(str::to_owned),
                body: body.clone(),
            };
        }

        match (method.as_str(), target.as_str()) {
            ("GET", "http://todo.local:8080/todos/1") => {
                write_body(response, &JsonBody(Todo { id: 1, title: "write tests".into(), done: false }))
            }
            ("POST", "http://todo.local:8080/todos") => {
                let mut todo: Todo = serde_json::from_str(&body)?;
                todo.id = 2;
                response.status_line(StatusCode::CREATED, "Created")?;
                write_body(response, &JsonBody(todo))
            }
            _ => {
                response.status_line(StatusCode::NOT_FOUND, "Not Found")?;
                write_body(response, &StringBody::new(format!("no route for {method} {target}")))
            }
        }
    })
}

fn client(seen: &Arc<Mutex<Seen>>) -> Client<HttpSender<Loopback<Server>>> {
    Client::new(HttpSender::new(Loopback::new(todo_server(Arc::clone(seen)))))
}

fn base() -> UrlBuilder {
    UrlBuilder::new().http().host_and_port("todo.local:8080").join_path("todos")
}

#[test]
fn get_json() {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let mut todo = Todo::default();

    client(&seen)
        .request([get(base().join_path("1")), accept([mime::APPLICATION_JSON])])
        .handle([expect_success(), read_json_response(&mut todo)])
        .unwrap();

    assert_eq!(todo, Todo { id: 1, title: "write tests".into(), done: false });
    let seen = seen.lock().unwrap();
    assert_eq!(seen.target, "http://todo.local:8080/todos/1");
    assert_eq!(seen.accept.as_deref(), Some("application/json"));
    assert_eq!(seen.content_length, None);
}

#[test]
fn post_json_with_bearer_token() {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let new_todo = Todo { id: 0, title: "ship it".into(), done: true };
    let mut created = Todo::default();

    client(&seen)
        .request([
            post(base()),
            content_type(mime::APPLICATION_JSON),
            bearer_token(|| Ok::<_, WireError>("let-me-in".to_owned())),
            json(new_todo.clone()),
        ])
        .handle([expect_status_one_of([StatusCode::CREATED]), read_json_response(&mut created)])
        .unwrap();

    assert_eq!(created, Todo { id: 2, ..new_todo });
    let seen = seen.lock().unwrap();
    assert_eq!(seen.authorization.as_deref(), Some("Bearer let-me-in"));
    assert_eq!(seen.content_length.as_deref(), Some(seen.body.len().to_string().as_str()));
}

#[test]
fn streamed_body_has_no_content_length() {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let payload = br#"{"id":0,"title":"streamed","done":false}"#;

    client(&seen).request([post(base()), stream(payload.as_slice())]).handle([expect_success()]).unwrap();

    let seen = seen.lock().unwrap();
    assert_eq!(seen.content_length, None);
    assert_eq!(seen.body.as_bytes(), payload);
}

#[test]
fn not_found_stops_before_reading_the_body() {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let mut text = String::new();

    let result = client(&seen)
        .request([get(base().join_path("404"))])
        .handle([expect_status_one_of([StatusCode::OK, StatusCode::CREATED]), read_text_response(&mut text)]);

    assert!(matches!(result, Err(WireError::UnexpectedResponse { .. })));
    assert!(text.is_empty());
}

#[test]
fn client_errors_are_readable() {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let mut text = String::new();

    client(&seen)
        .request([get(base().join_path("404"))])
        .handle([expect_status_in(400..=499), read_text_response(&mut text)])
        .unwrap();

    assert_eq!(text, "no route for GET http://todo.local:8080/todos/404");
}

#[test]
fn invalid_url_never_reaches_the_server() {
    let seen = Arc::new(Mutex::new(Seen::default()));

    let result = client(&seen).request([get("http://some host/todos")]).finish();

    assert!(matches!(result, Err(WireError::Url { .. })));
    assert!(seen.lock().unwrap().target.is_empty());
}

#[test]
fn failing_builder_stops_the_request() {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let failing = RequestBuilder::new(|_| Err(WireError::invalid_request("not today")));

    let result = client(&seen).request([get(base()), failing, accept([mime::TEXT_PLAIN])]).finish();

    assert!(matches!(result, Err(WireError::InvalidRequest { .. })));
    assert!(seen.lock().unwrap().target.is_empty());
}

#[test]
fn builders_can_be_reused_across_threads() {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let request = RequestBuilder::compose([get(base().join_path("1")), accept([mime::APPLICATION_JSON])]);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let request = request.clone();
            let seen = Arc::clone(&seen);
            std::thread::spawn(move || {
                let mut todo = Todo::default();
                client(&seen).request([request]).handle([expect_success(), read_json_response(&mut todo)])?;
                Ok::<_, WireError>(todo.id)
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), 1);
    }
}
