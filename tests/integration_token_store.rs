//! Integration tests for the token store and delete use case

use std::sync::Arc;

use uuid::Uuid;
use wb_tokens::messenger::{InMemoryBus, OutboundMessage, WbTokenMessage, WILDBERRIES_TRANSPORT};
use wb_tokens::store::{PgTokenStore, TokenStore};
use wb_tokens::{DeleteTokenCommand, DeleteTokenHandler, ModifyAction, TokenDeleteErrorKind, WbTokenEvent};

mod common;

fn new_event() -> WbTokenEvent {
    WbTokenEvent::new(Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4(), "wb-secret".to_string())
}

#[tokio::test]
async fn test_insert_and_find() {
    let Some(pool) = common::setup_test_db().await else {
        return;
    };
    let store = PgTokenStore::new(pool);

    let event = new_event();
    let token = store.insert_token(&event).await.unwrap();

    let loaded = store.find_event(event.id()).await.unwrap().unwrap();
    assert_eq!(loaded.main(), token.id());
    assert_eq!(loaded.token(), "wb-secret");
    assert_eq!(loaded.modify(), ModifyAction::New);

    let root = store.find_token_by_event(event.id()).await.unwrap().unwrap();
    assert_eq!(root, token);

    assert!(store.find_event(Uuid::new_v4()).await.unwrap().is_none());
    assert!(store.find_token_by_event(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_token_e2e() {
    let Some(pool) = common::setup_test_db().await else {
        return;
    };
    let store = Arc::new(PgTokenStore::new(pool));
    let bus = InMemoryBus::wildberries(8);
    let mut receiver = bus.subscribe(WILDBERRIES_TRANSPORT).unwrap();

    let event = new_event();
    let token = store.insert_token(&event).await.unwrap();

    let handler = DeleteTokenHandler::new(store.clone(), Arc::new(bus));
    let admin = Uuid::new_v4();
    let deleted = handler
        .handle(DeleteTokenCommand::new(event.id(), admin))
        .await
        .unwrap();
    assert_eq!(deleted, token);

    // Root gone, event history kept and marked
    assert!(store.find_token_by_event(event.id()).await.unwrap().is_none());
    let stored = store.find_event(event.id()).await.unwrap().unwrap();
    assert_eq!(stored.modify(), ModifyAction::Delete);
    assert!(!stored.is_active());
    assert_eq!(stored.modified_by(), Some(admin));

    assert_eq!(
        receiver.recv().await.unwrap(),
        OutboundMessage::WbToken(WbTokenMessage::new(token.id(), event.id(), event.id()))
    );
}

#[tokio::test]
async fn test_stale_delete_rolls_back() {
    let Some(pool) = common::setup_test_db().await else {
        return;
    };
    let store = PgTokenStore::new(pool);

    let event = new_event();
    let token = store.insert_token(&event).await.unwrap();

    let mut updated = store.find_event(event.id()).await.unwrap().unwrap();
    updated.apply_delete(Uuid::new_v4());

    // Root that no longer matches the stored row
    let stale = wb_tokens::WbToken::new(token.id(), Uuid::new_v4());
    let err = store.delete_token(&updated, &stale).await.unwrap_err();
    assert!(err.is_stale());

    // Event update was rolled back with the failed delete
    let stored = store.find_event(event.id()).await.unwrap().unwrap();
    assert_eq!(stored.modify(), ModifyAction::New);
    assert!(store.find_token_by_event(event.id()).await.unwrap().is_some());
}

#[tokio::test]
async fn test_delete_twice_reports_missing_root() {
    let Some(pool) = common::setup_test_db().await else {
        return;
    };
    let store = Arc::new(PgTokenStore::new(pool));
    let handler = DeleteTokenHandler::new(store.clone(), Arc::new(InMemoryBus::wildberries(8)));

    let event = new_event();
    store.insert_token(&event).await.unwrap();

    handler
        .handle(DeleteTokenCommand::new(event.id(), Uuid::new_v4()))
        .await
        .unwrap();
    let err = handler
        .handle(DeleteTokenCommand::new(event.id(), Uuid::new_v4()))
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), TokenDeleteErrorKind::AggregateNotFound(_)));
}
