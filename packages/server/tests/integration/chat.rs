use pdfchat_server::llm::ModelCallError;
use serde_json::json;

use crate::common::{TestApp, routes};

mod chat_prompting {
    use super::*;

    #[tokio::test]
    async fn first_question_sends_document_text() {
        let app = TestApp::spawn().await;
        let id = app.create_document(&["Hello world"]).await;

        let res = app.ask(id, "What is this about?", false).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["response"], "Answer 1");
        assert_eq!(
            app.model.prompts(),
            vec!["\nUser: What is this about?\n\nPDF Content:\nHello world\nAssistant:"]
        );

        let turns = app.get(&routes::document_turns(id)).await;
        let turns = turns.body.as_array().unwrap();
        assert_eq!(turns.len(), 1);
        assert_eq!(turns[0]["user_query"], "What is this about?");
        assert_eq!(turns[0]["assistant_response"], "Answer 1");
    }

    #[tokio::test]
    async fn text_only_uses_history_without_document() {
        let app = TestApp::spawn().await;
        let id = app.create_document(&["Hello world"]).await;
        app.ask(id, "First?", false).await;

        let res = app.ask(id, "Second?", true).await;

        assert_eq!(res.status, 200);
        assert_eq!(
            app.model.prompts()[1],
            "User: First?\nAssistant: Answer 1\nUser: Second?\n\nAssistant:"
        );
    }

    #[tokio::test]
    async fn text_only_defaults_to_false() {
        let app = TestApp::spawn().await;
        let id = app.create_document(&["Hello world"]).await;

        let res = app
            .post_json(routes::CHAT, &json!({"document_id": id, "query": "Hi?"}))
            .await;

        assert_eq!(res.status, 200);
        assert!(app.model.prompts()[0].contains("PDF Content:\nHello world"));
    }

    #[tokio::test]
    async fn replaced_content_is_used_for_later_turns() {
        let app = TestApp::spawn().await;
        let id = app.create_document(&["Old text"]).await;
        app.ask(id, "Before?", false).await;

        let res = app
            .replace(id, "new.pdf", crate::common::pdf_with_pages(&["New text"]))
            .await;
        assert_eq!(res.status, 200);
        app.ask(id, "After?", false).await;

        let prompts = app.model.prompts();
        assert!(prompts[1].contains("PDF Content:\nNew text"));
        assert!(prompts[1].starts_with("User: Before?\nAssistant: Answer 1\n"));
    }
}

mod chat_history {
    use super::*;

    #[tokio::test]
    async fn turns_stay_in_order_across_documents() {
        let app = TestApp::spawn().await;
        let a = app.create_document(&["Document A"]).await;
        let b = app.create_document(&["Document B"]).await;

        for (doc, query) in [(a, "a1"), (b, "b1"), (a, "a2"), (b, "b2"), (a, "a3")] {
            assert_eq!(app.ask(doc, query, true).await.status, 200);
        }

        let turns = app.get(&routes::document_turns(a)).await;
        let queries: Vec<&str> = turns
            .body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["user_query"].as_str().unwrap())
            .collect();
        assert_eq!(queries, vec!["a1", "a2", "a3"]);

        let turns_b = app.get(&routes::document_turns(b)).await;
        assert_eq!(turns_b.body.as_array().unwrap().len(), 2);
    }
}

mod chat_errors {
    use super::*;

    #[tokio::test]
    async fn unknown_document_does_not_call_model() {
        let app = TestApp::spawn().await;

        let res = app.ask(999, "Anyone there?", false).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Document with ID 999 not found.");
        assert!(app.model.prompts().is_empty());
    }

    #[tokio::test]
    async fn blank_query_is_rejected() {
        let app = TestApp::spawn().await;
        let id = app.create_document(&["Hello world"]).await;

        let res = app.ask(id, "   ", false).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
        assert!(app.model.prompts().is_empty());
    }

    #[tokio::test]
    async fn malformed_json_is_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .post_raw(routes::CHAT, "application/json", "{\"document_id\": ")
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn rejected_request_stores_no_turn() {
        let app = TestApp::spawn().await;
        let id = app.create_document(&["Hello world"]).await;
        app.model
            .fail_next(ModelCallError::InvalidRequest("API key not valid".into()));

        let res = app.ask(id, "Hi?", false).await;

        assert_eq!(res.status, 500);
        assert_eq!(res.code(), "MODEL_ERROR");
        assert!(!res.text.contains("API key"));
        let turns = app.get(&routes::document_turns(id)).await;
        assert!(turns.body.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn exhausted_rate_limit_is_reported() {
        let app = TestApp::spawn().await;
        let id = app.create_document(&["Hello world"]).await;
        app.model
            .fail_next(ModelCallError::RateLimited("quota".into()));

        let res = app.ask(id, "Hi?", false).await;

        assert_eq!(res.status, 500);
        assert_eq!(res.code(), "MODEL_RATE_LIMITED");
    }
}

mod debug_info {
    use super::*;

    #[tokio::test]
    async fn available_when_debug_enabled() {
        let app = TestApp::spawn().await;

        let res = app.get(routes::DEBUG_INFO).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["message"], "Debugging is enabled");
        assert_eq!(res.body["log_level"], "debug");
    }

    #[tokio::test]
    async fn hidden_when_debug_disabled() {
        let app = TestApp::spawn_with(|config| config.logging.debug = false).await;
        let res = app.get(routes::DEBUG_INFO).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NOT_FOUND");
    }
}
