// Authenticated fetch + decode against a small axum API.

#[cfg(test)]
mod test {
    use std::net::SocketAddr;
    use std::time::Duration;

    use axum::routing::get;
    use http::{header::AUTHORIZATION, HeaderMap, StatusCode};
    use httpmock::Method::GET;
    use httpmock::MockServer;
    use reqwest::Client;
    use serde_json::json;

    use crate::error::ClientError;
    use crate::response::{DecodedResponse, Render, ResponseDecoder, UnknownPagePolicy};
    use crate::tests::common::{build_reqwest_client, spawn_axum, JoinHandle, Router};

    const TOKEN: &str = "456";

    fn authorized(headers: &HeaderMap) -> bool {
        headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v == format!("Bearer {}", TOKEN))
            .unwrap_or(false)
    }

    async fn spawn_api() -> (JoinHandle<()>, SocketAddr) {
        let router = Router::new()
            .route(
                "/words",
                get(|headers: HeaderMap| async move {
                    if !authorized(&headers) {
                        return (StatusCode::UNAUTHORIZED, "missing bearer".to_owned());
                    }
                    let body = json!({"page": "words", "input": "", "words": ["word1", "word2"]});
                    (StatusCode::OK, body.to_string())
                }),
            )
            .route(
                "/occurrence",
                get(|| async {
                    json!({"page": "occurrence", "words": {"word2": 32}}).to_string()
                }),
            )
            .route(
                "/assignment",
                get(|| async {
                    json!({
                        "page": "assignment1",
                        "words": ["six", "two", "one"],
                        "percentages": {"one": 0.33},
                        "special": ["one", "two", null],
                        "extraSpecial": [1.0, 2.0, "3"]
                    })
                    .to_string()
                }),
            )
            .route("/unknown", get(|| async { r#"{"page":"unknown"}"#.to_owned() }))
            .route(
                "/html",
                get(|| async { "<html><body>Gateway Timeout</body></html>".to_owned() }),
            )
            .route(
                "/forbidden",
                get(|| async { (StatusCode::FORBIDDEN, "no".to_owned()) }),
            );
        spawn_axum(router).await
    }

    fn decoder() -> ResponseDecoder {
        ResponseDecoder::new(build_reqwest_client())
    }

    #[tokio::test]
    async fn words_page_is_fetched_with_bearer_and_rendered() {
        let (handle, addr) = spawn_api().await;

        let decoded = decoder()
            .fetch_and_decode(&format!("http://{}/words", addr), TOKEN)
            .await
            .unwrap()
            .unwrap();

        assert!(matches!(decoded, DecodedResponse::WordList(_)));
        assert_eq!(
            decoded.render(),
            "Parsed JSON:\nPage: words\nWords: word1, word2\nInput: \n"
        );
        handle.abort();
    }

    #[tokio::test]
    async fn wrong_token_is_a_status_error() {
        let (handle, addr) = spawn_api().await;

        let err = decoder()
            .fetch(&format!("http://{}/words", addr), "other")
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 401 }), "got {err:?}");
        handle.abort();
    }

    #[tokio::test]
    async fn every_known_page_renders_its_fields() {
        let (handle, addr) = spawn_api().await;
        let decoder = decoder();

        let occurrence = decoder
            .fetch_and_decode(&format!("http://{}/occurrence", addr), TOKEN)
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(occurrence, DecodedResponse::WordOccurrence(_)));
        let text = occurrence.render();
        assert!(text.contains("Page: occurrence"));
        assert!(text.contains("Words: Word is word2, it showed up 32 time"));

        let assignment = decoder
            .fetch_and_decode(&format!("http://{}/assignment", addr), TOKEN)
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(assignment, DecodedResponse::GenericAssignment(_)));
        let text = assignment.render();
        for expected in [
            "Page: assignment1",
            "Words: six, two, one",
            "Number is one, it's percentage is 0.33",
            "two with type of string",
            "null with type of null",
            "2.0 with type of float",
            "3 with type of string",
        ] {
            assert!(text.contains(expected), "missing '{expected}' in:\n{text}");
        }
        handle.abort();
    }

    #[tokio::test]
    async fn unknown_page_policy_decides_between_error_and_nothing() {
        let (handle, addr) = spawn_api().await;
        let url = format!("http://{}/unknown", addr);

        let err = decoder().fetch_and_decode(&url, TOKEN).await.unwrap_err();
        assert!(matches!(err, ClientError::UnknownPage(ref p) if p == "unknown"));

        let ignored = decoder()
            .with_unknown_page(UnknownPagePolicy::Ignore)
            .fetch_and_decode(&url, TOKEN)
            .await
            .unwrap();
        assert!(ignored.is_none());
        handle.abort();
    }

    #[tokio::test]
    async fn html_response_surfaces_the_page_body() {
        let (handle, addr) = spawn_api().await;

        let err = decoder()
            .fetch_and_decode(&format!("http://{}/html", addr), TOKEN)
            .await
            .unwrap_err();
        let ClientError::Decode(request_error) = err else {
            panic!("expected decode error, got {err:?}");
        };
        assert_eq!(request_error.http_status, 200);
        assert_eq!(request_error.body, "<html><body>Gateway Timeout</body></html>");
        handle.abort();
    }

    #[tokio::test]
    async fn non_2xx_is_a_status_error() {
        let (handle, addr) = spawn_api().await;

        let err = decoder()
            .fetch(&format!("http://{}/forbidden", addr), TOKEN)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Status { status: 403 }));
        handle.abort();
    }

    #[tokio::test]
    async fn malformed_url_is_rejected_before_sending() {
        let err = decoder().fetch("words", TOKEN).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl { .. }), "got {err:?}");
    }

    #[tokio::test]
    async fn non_http_scheme_is_rejected_before_sending() {
        let err = decoder().fetch("ftp://example.com/x", TOKEN).await.unwrap_err();
        assert!(
            matches!(err, ClientError::InvalidUrl { ref reason, .. } if reason.contains("ftp")),
            "got {err:?}"
        );
    }

    #[tokio::test]
    async fn fetch_timeout_is_a_transport_error() {
        let server = MockServer::start_async().await;
        let words = server
            .mock_async(|when, then| {
                when.method(GET).path("/words");
                then.status(200)
                    .json_body(json!({"page": "words", "words": ["word1"]}))
                    .delay(Duration::from_secs(2));
            })
            .await;

        let client = Client::builder()
            .timeout(Duration::from_millis(200))
            .build()
            .unwrap();

        let err = ResponseDecoder::new(client)
            .fetch_and_decode(&server.url("/words"), TOKEN)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Transport(ref e) if e.is_timeout()), "got {err:?}");
        words.assert_calls_async(1).await;
    }
}
