//! Integration tests for the ContactsClient using mockito for HTTP mocking.

use contact_audit::domain::{ContactId, Field};
use contact_audit::{Contact, ContactsClient, Counter, StoreError};
use mockito::{Matcher, Server};

fn sample_contact() -> Contact {
    Contact::new(
        ContactId::new("5").unwrap(),
        "1005",
        "Lucía Gómez",
        "lucia@outlook.com",
        "9621234567",
    )
}

#[test]
fn test_list_contacts() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/contacts")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "2".into()),
            Matcher::UrlEncoded("limit".into(), "50".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "data": [
                {"id": 51, "client_key": 1051, "name": "Pedro Ruiz", "email": "pedro@gmail.com", "phone": "9611234567"},
                {"id": 52, "client_key": "1052", "name": null, "email": "x@y", "phone": 9991234567}
            ],
            "total": 120,
            "total_pages": 3
        }"#,
        )
        .create();

    let client = ContactsClient::with_base_url(server.url());
    let page = client.list_contacts(2, 50).unwrap();

    mock.assert();
    assert_eq!(page.total, 120);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.data[0].id.as_str(), "51");
    assert_eq!(page.data[0].client_key, "1051");
    assert_eq!(page.data[1].name, "");
    assert_eq!(page.data[1].phone, "9991234567");
    assert_eq!(client.metrics().get(Counter::ContactsFetched), 2);
}

#[test]
fn test_search_contacts_encodes_value() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/contacts/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("field".into(), "name".into()),
            Matcher::UrlEncoded("value".into(), "José Luis".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"data": [{"id": "9", "name": "José Luis"}]}"#)
        .create();

    let client = ContactsClient::with_base_url(server.url());
    let results = client.search_contacts(Field::Name, "José Luis").unwrap();

    mock.assert();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "José Luis");
}

#[test]
fn test_update_contact_with_envelope() {
    let mut server = Server::new();
    let contact = sample_contact();

    let mock = server
        .mock("PUT", "/contacts/5")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "client_key": "1005",
            "phone": "9621234567"
        })))
        .with_status(200)
        .with_body(
            r#"{"data": {"id": 5, "client_key": "1005", "name": "Lucía Gómez", "email": "lucia@outlook.com", "phone": "9621234567"}}"#,
        )
        .create();

    let client = ContactsClient::with_base_url(server.url());
    let updated = client.update_contact(&contact.id, &contact).unwrap();

    mock.assert();
    assert_eq!(updated, contact);
    assert_eq!(client.metrics().get(Counter::ContactsUpdated), 1);
}

#[test]
fn test_update_contact_acknowledgement_only() {
    let mut server = Server::new();
    let contact = sample_contact();

    let mock = server
        .mock("PUT", "/contacts/5")
        .with_status(200)
        .with_body(r#"{"message": "Contact updated"}"#)
        .create();

    let client = ContactsClient::with_base_url(server.url());
    let updated = client.update_contact(&contact.id, &contact).unwrap();

    mock.assert();
    assert_eq!(updated, contact);
}

#[test]
fn test_validate_contacts() {
    let mut server = Server::new();

    let mock = server
        .mock("GET", "/contacts/validate")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("page".into(), "1".into()),
            Matcher::UrlEncoded("limit".into(), "50".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{
            "data": [{
                "contact": {"id": 1, "client_key": "1", "name": "Ana", "email": "ana@gmail.com", "phone": "9991234567"},
                "is_valid": true,
                "errors": [{"field": "phone", "type": "INVALID_AREA_CODE", "message": "bad area code", "value": "9991234567"}]
            }],
            "total_pages": 1,
            "stats": {"total": 1, "valid": 0, "invalid": 1}
        }"#,
        )
        .create();

    let client = ContactsClient::with_base_url(server.url());
    let page = client.validate_contacts(1, 50).unwrap();

    mock.assert();
    assert!(!page.data[0].is_valid);
    assert_eq!(page.stats.unwrap().invalid, 1);
    assert_eq!(client.metrics().get(Counter::ValidationsFetched), 1);
}

#[test]
fn test_error_body_mapping() {
    let mut server = Server::new();

    server
        .mock("PUT", "/contacts/404")
        .with_status(404)
        .with_body(r#"{"error": "Contact not found"}"#)
        .create();
    server
        .mock("PUT", "/contacts/422")
        .with_status(422)
        .with_body(r#"{"error": "email is invalid"}"#)
        .create();
    server
        .mock("PUT", "/contacts/500")
        .with_status(500)
        .with_body("database down")
        .create();

    let client = ContactsClient::with_base_url(server.url());
    let update = |id: &str| {
        let mut contact = sample_contact();
        contact.id = ContactId::new(id).unwrap();
        client.update_contact(&contact.id, &contact).unwrap_err()
    };

    match update("404") {
        StoreError::NotFound(message) => assert_eq!(message, "Contact not found"),
        other => panic!("unexpected error: {:?}", other),
    }
    match update("422") {
        StoreError::InvalidRequest(message) => assert_eq!(message, "email is invalid"),
        other => panic!("unexpected error: {:?}", other),
    }
    match update("500") {
        StoreError::ApiError { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "database down");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(client.metrics().get(Counter::Errors), 3);
    assert_eq!(client.metrics().get(Counter::Requests), 3);
    assert_eq!(client.metrics().get(Counter::ContactsUpdated), 0);
}

#[test]
fn test_malformed_json_is_reported() {
    let mut server = Server::new();

    server
        .mock("GET", "/contacts")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>oops</html>")
        .create();

    let client = ContactsClient::with_base_url(server.url());
    let err = client.list_contacts(1, 50).unwrap_err();
    assert!(matches!(err, StoreError::JsonError(_)));
}

#[test]
fn test_upload_spreadsheet_multipart() {
    let mut server = Server::new();

    let mock = server
        .mock("POST", "/contacts/upload")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".to_string()),
        )
        .match_body(Matcher::Regex(
            r#"name="file"; filename="clientes\.xlsx""#.to_string(),
        ))
        .with_status(200)
        .with_body(r#"{"message": "File processed successfully", "count": 42}"#)
        .create();

    let client = ContactsClient::with_base_url(server.url());
    let summary = client
        .upload_spreadsheet("clientes.xlsx", b"spreadsheet-bytes")
        .unwrap();

    mock.assert();
    assert_eq!(summary.count, 42);
    assert_eq!(summary.message, "File processed successfully");
}

#[test]
fn test_download_spreadsheet() {
    let mut server = Server::new();
    let payload = vec![0x50, 0x4b, 0x03, 0x04, 0x14, 0x00];

    let mock = server
        .mock("GET", "/contacts/download")
        .with_status(200)
        .with_header(
            "content-type",
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        )
        .with_body(payload.clone())
        .create();

    let client = ContactsClient::with_base_url(server.url());
    let bytes = client.download_spreadsheet().unwrap();

    mock.assert();
    assert_eq!(bytes, payload);
    assert_eq!(client.metrics().get(Counter::BytesDownloaded), 6);
}

#[test]
fn test_empty_download_is_an_error() {
    let mut server = Server::new();

    server
        .mock("GET", "/contacts/download")
        .with_status(200)
        .with_body("")
        .create();

    let client = ContactsClient::with_base_url(server.url());
    assert!(matches!(
        client.download_spreadsheet(),
        Err(StoreError::EmptyPayload)
    ));
}
