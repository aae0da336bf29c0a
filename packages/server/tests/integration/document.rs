use sea_orm::{EntityTrait, PaginatorTrait};

use pdfchat_server::entity::conversation_turn;

use crate::common::{TestApp, pdf_with_pages, routes};

mod document_upload {
    use super::*;

    #[tokio::test]
    async fn upload_extracts_normalized_text() {
        let app = TestApp::spawn().await;

        let res = app.upload("hello.pdf", pdf_with_pages(&["Hello world"])).await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["filename"], "hello.pdf");
        assert_eq!(res.body["processing_status"], "Processed");
        let id = res.body["document_id"].as_i64().unwrap();

        let doc = app.get(&routes::document(id)).await;
        assert_eq!(doc.status, 200);
        assert_eq!(doc.body["id"].as_i64().unwrap(), id);
        assert_eq!(doc.body["content_preview"], "Hello world");
        assert_eq!(doc.body["page_count"], 1);
        assert_eq!(doc.body["processing_status"], "Processed");

        let stored = doc.body["filename"].as_str().unwrap();
        assert_ne!(stored, "hello.pdf");
        assert!(stored.ends_with(".pdf"));
        assert_eq!(app.uploaded_files(), vec![stored.to_string()]);
    }

    #[tokio::test]
    async fn pages_are_joined_and_blank_pages_skipped() {
        let app = TestApp::spawn().await;
        let id = app
            .create_document(&["First   page!", "", "Second page"])
            .await;

        let doc = app.get(&routes::document(id)).await;
        assert_eq!(doc.body["content_preview"], "First page! Second page");
        assert_eq!(doc.body["page_count"], 3);
    }

    #[tokio::test]
    async fn pdf_without_text_is_rejected_and_cleaned_up() {
        let app = TestApp::spawn().await;

        let res = app.upload("scan.pdf", pdf_with_pages(&["", ""])).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "EXTRACTION_ERROR");
        assert!(app.uploaded_files().is_empty());
        let list = app.get(routes::DOCUMENTS).await;
        assert_eq!(list.body.as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn corrupt_pdf_is_rejected_and_cleaned_up() {
        let app = TestApp::spawn().await;

        let res = app.upload("broken.pdf", b"%PDF-1.4 mock content".to_vec()).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "EXTRACTION_ERROR");
        assert!(app.uploaded_files().is_empty());
    }

    #[tokio::test]
    async fn non_pdf_extension_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.upload("notes.txt", pdf_with_pages(&["Hello"])).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
        assert!(app.uploaded_files().is_empty());
    }

    #[tokio::test]
    async fn uppercase_extension_is_accepted() {
        let app = TestApp::spawn().await;
        let res = app.upload("REPORT.PDF", pdf_with_pages(&["Hello"])).await;
        assert_eq!(res.status, 201, "{}", res.text);
    }

    #[tokio::test]
    async fn oversized_file_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.upload("big.pdf", vec![b'0'; 1024 * 1024 + 1]).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
        assert!(app.uploaded_files().is_empty());
    }

    #[tokio::test]
    async fn missing_file_field_is_rejected() {
        let app = TestApp::spawn().await;
        let form = reqwest::multipart::Form::new().text("name", "value");

        let res = app
            .client
            .post(format!("http://{}{}", app.addr, routes::DOCUMENTS))
            .multipart(form)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 400);
    }
}

mod document_listing {
    use super::*;

    #[tokio::test]
    async fn list_returns_documents_in_creation_order() {
        let app = TestApp::spawn().await;
        let first = app.create_document(&["Alpha"]).await;
        let second = app.create_document(&["Beta"]).await;

        let res = app.get(routes::DOCUMENTS).await;

        assert_eq!(res.status, 200);
        let items = res.body.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["id"].as_i64().unwrap(), first);
        assert_eq!(items[0]["content_preview"], "Alpha");
        assert_eq!(items[1]["id"].as_i64().unwrap(), second);
        assert!(items[1]["updated_at"].as_str().is_some());
    }

    #[tokio::test]
    async fn preview_is_limited_to_100_characters() {
        let app = TestApp::spawn().await;
        let long = "word ".repeat(40);
        let id = app.create_document(&[long.as_str()]).await;

        let res = app.get(&routes::document(id)).await;
        let preview = res.body["content_preview"].as_str().unwrap();
        assert_eq!(preview.chars().count(), 100);
        assert!(long.starts_with(preview));
    }

    #[tokio::test]
    async fn unknown_document_is_not_found() {
        let app = TestApp::spawn().await;
        let res = app.get(&routes::document(42)).await;
        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NOT_FOUND");
        assert_eq!(res.body["message"], "Document with ID 42 not found.");
    }
}

mod document_replace {
    use super::*;

    #[tokio::test]
    async fn replace_swaps_content_and_file() {
        let app = TestApp::spawn().await;
        let id = app.create_document(&["Old text"]).await;
        let before = app.get(&routes::document(id)).await;
        let old_name = before.body["filename"].as_str().unwrap().to_string();

        let res = app
            .replace(id, "new.pdf", pdf_with_pages(&["New text", "More"]))
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["document_id"].as_i64().unwrap(), id);
        assert_eq!(res.body["filename"], "new.pdf");

        let after = app.get(&routes::document(id)).await;
        assert_eq!(after.body["content_preview"], "New text More");
        assert_eq!(after.body["page_count"], 2);
        let new_name = after.body["filename"].as_str().unwrap().to_string();
        assert_ne!(new_name, old_name);
        assert_eq!(app.uploaded_files(), vec![new_name]);
    }

    #[tokio::test]
    async fn failed_replace_leaves_original_untouched() {
        let app = TestApp::spawn().await;
        let id = app.create_document(&["Original text"]).await;
        let before = app.get(&routes::document(id)).await;
        let name = before.body["filename"].as_str().unwrap().to_string();
        let original_bytes = app.read_upload(&name);

        let res = app.replace(id, "blank.pdf", pdf_with_pages(&[""])).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "EXTRACTION_ERROR");

        let after = app.get(&routes::document(id)).await;
        assert_eq!(after.body, before.body);
        assert_eq!(app.uploaded_files(), vec![name.clone()]);
        assert_eq!(app.read_upload(&name), original_bytes);
    }

    #[tokio::test]
    async fn replace_unknown_document_is_not_found() {
        let app = TestApp::spawn().await;
        let res = app.replace(7, "new.pdf", pdf_with_pages(&["Text"])).await;
        assert_eq!(res.status, 404);
        assert!(app.uploaded_files().is_empty());
    }
}

mod document_delete {
    use super::*;

    #[tokio::test]
    async fn delete_removes_record_file_and_turns() {
        let app = TestApp::spawn().await;
        let id = app.create_document(&["Hello world"]).await;
        let other = app.create_document(&["Other"]).await;
        for query in ["One?", "Two?", "Three?"] {
            assert_eq!(app.ask(id, query, false).await.status, 200);
        }
        assert_eq!(app.ask(other, "Kept?", false).await.status, 200);

        let res = app.delete(&routes::document(id)).await;

        assert_eq!(res.status, 204);
        assert!(res.text.is_empty());
        assert_eq!(app.get(&routes::document(id)).await.status, 404);
        assert_eq!(app.get(&routes::document_turns(id)).await.status, 404);
        assert_eq!(app.uploaded_files().len(), 1);

        let remaining = conversation_turn::Entity::find()
            .count(&app.db)
            .await
            .unwrap();
        assert_eq!(remaining, 1);
    }

    #[tokio::test]
    async fn delete_unknown_document_is_not_found() {
        let app = TestApp::spawn().await;
        let id = app.create_document(&["Keep me"]).await;

        let res = app.delete(&routes::document(999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["message"], "Document with ID 999 not found.");
        assert_eq!(app.get(&routes::document(id)).await.status, 200);
        assert_eq!(app.uploaded_files().len(), 1);
    }

    #[tokio::test]
    async fn second_delete_is_not_found() {
        let app = TestApp::spawn().await;
        let id = app.create_document(&["Hello"]).await;

        assert_eq!(app.delete(&routes::document(id)).await.status, 204);
        assert_eq!(app.delete(&routes::document(id)).await.status, 404);
    }
}

mod document_path_errors {
    use super::*;

    #[tokio::test]
    async fn non_numeric_id_is_json_validation_error() {
        let app = TestApp::spawn().await;

        let get = app.get("/api/v1/documents/abc").await;
        assert_eq!(get.status, 400);
        assert_eq!(get.code(), "VALIDATION_ERROR");
        assert!(get.body["message"].as_str().unwrap().contains("abc"));

        let delete = app.delete("/api/v1/documents/abc").await;
        assert_eq!(delete.status, 400);
        assert_eq!(delete.code(), "VALIDATION_ERROR");

        let turns = app.get("/api/v1/documents/abc/turns").await;
        assert_eq!(turns.status, 400);
        assert_eq!(turns.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn overflowing_id_is_json_validation_error() {
        let app = TestApp::spawn().await;

        let res = app.get(&routes::document(99_999_999_999)).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn replace_with_bad_id_stores_nothing() {
        let app = TestApp::spawn().await;

        let res = app
            .client
            .put(format!("http://{}/api/v1/documents/abc", app.addr))
            .multipart(
                reqwest::multipart::Form::new().part(
                    "file",
                    reqwest::multipart::Part::bytes(pdf_with_pages(&["Text"]))
                        .file_name("new.pdf"),
                ),
            )
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 400);
        assert!(app.uploaded_files().is_empty());
    }

    #[tokio::test]
    async fn unknown_route_is_json_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get("/api/v1/nothing-here").await;

        assert_eq!(res.status, 404);
        assert_eq!(res.code(), "NOT_FOUND");
        assert_eq!(res.body["message"], "No route for /api/v1/nothing-here");
    }
}

mod document_storage_errors {
    use super::*;

    #[tokio::test]
    async fn unwritable_upload_dir_is_storage_error() {
        let app = TestApp::spawn().await;
        app.block_temp_dir();

        let res = app.upload("a.pdf", pdf_with_pages(&["Hello"])).await;

        assert_eq!(res.status, 500);
        assert_eq!(res.code(), "STORAGE_ERROR");
        assert!(!res.text.contains(".tmp"));
        assert!(app.uploaded_files().iter().all(|n| !n.ends_with(".pdf")));
        let list = app.get(routes::DOCUMENTS).await;
        assert_eq!(list.body.as_array().unwrap().len(), 0);
    }
}
