use rengeki::{Config, LoadTest};
use std::time::Duration;

fn yaml(url: &str, concurrency: usize, duration: &str, cookie: &str) -> String {
    format!("url: {url}\nconcurrency: {concurrency}\nduration: {duration}\ndata: hello\ncookie: {cookie}\n")
}

#[tokio::test]
async fn counts_requests_across_workers() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/load")
        .match_header("cookie", "session=abc123")
        .match_body("hello")
        .with_status(200)
        .expect_at_least(4)
        .create_async()
        .await;

    let url = format!("{}/load", server.url());
    let config = Config::from_yaml_str(&yaml(&url, 4, "500ms", "session=abc123")).unwrap();
    let test = LoadTest::new(config).unwrap();

    let started = std::time::Instant::now();
    let summary = test.run().await;
    let elapsed = started.elapsed();

    assert_eq!(summary.workers, 4);
    assert!(summary.total_requests >= 4);
    assert!(elapsed >= Duration::from_millis(500));
    assert!(elapsed < Duration::from_secs(10));
    assert_eq!(summary.qps(), summary.total_requests as f64 / 0.5);
    mock.assert_async().await;
}

#[tokio::test]
async fn unreachable_target_still_finishes() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = Config::from_yaml_str(&yaml(&format!("http://{addr}/"), 2, "300ms", "a=b")).unwrap();
    let summary = LoadTest::new(config).unwrap().run().await;

    assert_eq!(summary.total_requests, 0);
    assert_eq!(summary.qps(), 0.0);
    assert!(summary.to_string().ends_with("QPS: 0.00"));
}
