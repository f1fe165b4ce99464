//! Integration tests for manifest fetching using wiremock.

use std::fs;
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use remanifest::cli::commands::convert::{run_convert, ConvertOptions};
use remanifest::core::manifest::RemoteSpec;
use remanifest::net::{fetch_manifest, FetchError, BROWSER_USER_AGENT};

const SOURCE_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<manifest>
  <project name="a" path="p/a" />
  <project name="b" />
</manifest>"#;

#[tokio::test]
async fn test_fetch_sends_browser_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/default.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SOURCE_XML))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/default.xml", server.uri());
    let body = fetch_manifest(&url, None).await.unwrap();
    assert!(body.contains("<project"), "body should be the served XML");

    // The User-Agent contains a comma, so compare the raw header value
    // instead of using wiremock's comma-splitting header matcher.
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let user_agent = requests[0]
        .headers
        .get("user-agent")
        .expect("request should carry a User-Agent header");
    assert_eq!(user_agent.to_str().unwrap(), BROWSER_USER_AGENT);
}

#[tokio::test]
async fn test_fetch_http_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/default.xml"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/default.xml", server.uri());
    let result = fetch_manifest(&url, None).await;
    match result {
        Err(FetchError::HttpStatus { status, .. }) => assert_eq!(status.as_u16(), 404),
        other => panic!("Expected HttpStatus error, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_connection_refused() {
    // Port 1 is never listening
    let result = fetch_manifest("http://127.0.0.1:1/default.xml", None).await;
    assert!(matches!(result, Err(FetchError::NetworkError(_))));
}

#[tokio::test]
async fn test_fetch_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/default.xml"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(SOURCE_XML)
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let url = format!("{}/default.xml", server.uri());
    let result = fetch_manifest(&url, Some(Duration::from_millis(100))).await;
    assert!(matches!(result, Err(FetchError::NetworkError(_))));
}

#[tokio::test]
async fn test_convert_from_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/default.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SOURCE_XML))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out.xml");
    let options = ConvertOptions {
        source: format!("{}/default.xml", server.uri()),
        out: out.clone(),
        remote: Some(RemoteSpec {
            name: "x".to_string(),
            fetch: "https://x/".to_string(),
        }),
        timeout: None,
    };

    run_convert(&options).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].headers.get("user-agent").unwrap().to_str().unwrap(),
        BROWSER_USER_AGENT
    );

    let written = fs::read_to_string(&out).unwrap();
    assert_eq!(
        written,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <manifest>\n\
         \x20\x20<remote name=\"x\" fetch=\"https://x/\"/>\n\
         \x20\x20<project name=\"a\" path=\"p/a\" remote=\"x\"/>\n\
         \x20\x20<project name=\"b\" remote=\"x\"/>\n\
         </manifest>\n"
    );
}

#[tokio::test]
async fn test_convert_from_url_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/default.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("out.xml");
    let options = ConvertOptions {
        source: format!("{}/default.xml", server.uri()),
        out: out.clone(),
        remote: None,
        timeout: None,
    };

    let result = run_convert(&options).await;
    assert!(result.is_err(), "5xx should fail the conversion");
    assert!(!out.exists(), "no output file on fetch failure");
}
