// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end conversation tests over the mock transport.

use std::sync::Arc;

use chrono::Utc;
use pantry_agent::i18n::{Msg, render, text};
use pantry_config::PantryConfig;
use pantry_core::traits::{ListStore, ReceiptStore, UserDirectory};
use pantry_core::types::{
    Locale, NewItem, ParsedItem, ParsingStatus, ProductListDetection, ReceiptData, ReceiptItem,
    ReceiptStatus, ShoppingItem, ShoppingList, User, short_id,
};
use pantry_router::{Callback, MenuAction, ReceiptsAction};
use pantry_state::{NAVIGATION_SLOTS, Slot};
use pantry_test_utils::harness::DEFAULT_TELEGRAM_ID;
use pantry_test_utils::{
    MockLanguageModel, MockReceiptAnalyzer, MockSpeech, Outbound, TestHarness,
};
use uuid::Uuid;

async fn user(harness: &TestHarness) -> User {
    harness.user().await.unwrap().expect("user exists after first turn")
}

async fn only_list(harness: &TestHarness) -> ShoppingList {
    let user = user(harness).await;
    let mut lists = harness.store.user_lists(user.id).await.unwrap();
    assert_eq!(lists.len(), 1, "expected exactly one list");
    lists.remove(0)
}

/// Creates a personal list called `name` through the menus.
async fn create_personal_list(harness: &TestHarness, name: &str) -> ShoppingList {
    harness.send_text("/createlist").await.unwrap();
    harness
        .press(&Callback::CreateListFor(None).token())
        .await
        .unwrap();
    harness.send_text(name).await.unwrap();
    only_list(harness).await
}

fn plain(name: &str) -> NewItem {
    NewItem {
        display_name: name.into(),
        canonical_name: name.into(),
        quantity: None,
        category: None,
        notes: None,
    }
}

async fn add_directly(harness: &TestHarness, list: &ShoppingList, names: &[&str]) -> Vec<ShoppingItem> {
    let me = user(harness).await;
    harness
        .store
        .add_items_parsed(list.id, me.id, names.iter().map(|n| plain(n)).collect())
        .await
        .unwrap()
}

fn toggle(list: &ShoppingList, item: &ShoppingItem) -> String {
    Callback::ToggleItem {
        list: short_id(&list.id),
        item: short_id(&item.id),
    }
    .token()
}

/// Everything sent to `chat_id`.
async fn sent_to(harness: &TestHarness, chat_id: i64) -> Vec<String> {
    harness
        .transport
        .outbound()
        .await
        .into_iter()
        .filter_map(|o| match o {
            Outbound::Send { message, text, .. } if message.chat_id == chat_id => Some(text),
            _ => None,
        })
        .collect()
}

fn config_with(allowed: &[i64], admins: &[i64]) -> PantryConfig {
    let mut config = PantryConfig::default();
    config.telegram.allowed_users = allowed.iter().map(i64::to_string).collect();
    config.telegram.admin_users = admins.iter().map(i64::to_string).collect();
    config
}

#[tokio::test]
async fn create_list_in_family_edits_the_prompt() {
    let harness = TestHarness::new().await.unwrap();
    harness.send_text("/createfamily Home").await.unwrap();
    let me = user(&harness).await;
    let family = harness.store.user_families(me.id).await.unwrap().remove(0);

    harness.send_text("/createlist").await.unwrap();
    let pick = Callback::CreateListFor(Some(family.id)).token();
    harness.press(&pick).await.unwrap();
    assert!(harness.state.contains(me.id, Slot::CreatingListForFamily));
    let prompt = harness
        .state
        .get(me.id, Slot::CreateListMessageId)
        .expect("prompt tracked");

    harness.send_text("Weekly Groceries").await.unwrap();

    let list = only_list(&harness).await;
    assert_eq!(list.name, "Weekly Groceries");
    assert_eq!(list.family_id, Some(family.id));
    assert!(list.is_shared);
    assert!(!harness.state.contains(me.id, Slot::CreatingListForFamily));
    assert!(!harness.state.contains(me.id, Slot::CreateListMessageId));

    let expected = render(Locale::En, Msg::ListCreated, &[("name", "Weekly Groceries")]);
    match harness.transport.last_screen().await {
        Some(Outbound::Edit { message, text, .. }) => {
            assert_eq!(message.to_string(), prompt);
            assert_eq!(text, expected);
        }
        other => panic!("expected the prompt to be edited, got {other:?}"),
    }
}

#[tokio::test]
async fn short_list_name_keeps_the_workflow() {
    let harness = TestHarness::new().await.unwrap();
    harness.send_text("/createlist").await.unwrap();
    harness
        .press(&Callback::CreateListFor(None).token())
        .await
        .unwrap();

    harness.send_text("x").await.unwrap();

    let me = user(&harness).await;
    assert!(harness.store.user_lists(me.id).await.unwrap().is_empty());
    assert!(harness.state.contains(me.id, Slot::CreatingListForFamily));
}

#[tokio::test]
async fn voice_items_land_on_the_list() {
    let phrase = "milk and two loaves of bread";
    let model = Arc::new(MockLanguageModel::new());
    let mut bread = ParsedItem::named("bread").with_quantity(2.0, "loaves");
    bread.original_text = Some("two loaves of bread".into());
    let mut milk = ParsedItem::named("milk");
    milk.original_text = Some("milk".into());
    model.parse(phrase, vec![milk, bread]).await;

    let harness = TestHarness::builder()
        .with_model(model.clone())
        .with_speech(MockSpeech::saying(phrase, Some("en")))
        .build()
        .await
        .unwrap();
    let list = create_personal_list(&harness, "Groceries").await;
    harness
        .press(&Callback::AddItem(list.id).token())
        .await
        .unwrap();

    harness.send_voice().await.unwrap();

    let items = harness.store.list_items(list.id).await.unwrap();
    let names: Vec<&str> = items.iter().map(|i| i.display_name.as_str()).collect();
    assert_eq!(names, vec!["milk", "two loaves of bread"]);
    assert!(items.iter().all(|i| i.parsing_status == ParsingStatus::Parsed));
    assert_eq!(items[1].quantity.as_deref(), Some("2 loaves"));

    let echo = render(Locale::En, Msg::VoiceTranscript, &[("text", phrase)]);
    assert!(harness.transport.texts().await.contains(&echo));
    let me = user(&harness).await;
    assert!(!harness.state.contains(me.id, Slot::AddingItemToList));
    assert!(harness.state.contains(me.id, Slot::ViewingList));
}

#[tokio::test]
async fn silent_voice_writes_nothing() {
    let harness = TestHarness::builder()
        .with_speech(MockSpeech::silent())
        .build()
        .await
        .unwrap();
    let list = create_personal_list(&harness, "Groceries").await;
    harness
        .press(&Callback::AddItem(list.id).token())
        .await
        .unwrap();

    harness.send_voice().await.unwrap();

    assert!(harness.store.list_items(list.id).await.unwrap().is_empty());
    let me = user(&harness).await;
    assert!(harness.state.contains(me.id, Slot::AddingItemToList));
}

/// A list holding "bread" and an open duplicate session for
/// "bread 2 loaves, butter".
async fn duplicate_session(model: Arc<MockLanguageModel>) -> (TestHarness, ShoppingList) {
    model.parse("bread", vec![ParsedItem::named("bread")]).await;
    model
        .product_list(
            "bread 2 loaves, butter",
            vec![
                ParsedItem::named("bread").with_quantity(2.0, "loaves"),
                ParsedItem::named("butter"),
            ],
        )
        .await;
    let harness = TestHarness::builder()
        .with_model(model)
        .build()
        .await
        .unwrap();
    let list = create_personal_list(&harness, "Groceries").await;
    harness
        .press(&Callback::AddItem(list.id).token())
        .await
        .unwrap();
    harness.send_text("bread").await.unwrap();
    harness.send_text("bread 2 loaves, butter").await.unwrap();
    (harness, list)
}

#[tokio::test]
async fn replacing_a_duplicate_updates_and_appends() {
    let (harness, list) = duplicate_session(Arc::new(MockLanguageModel::new())).await;
    let me = user(&harness).await;
    assert!(harness.state.contains(me.id, Slot::DuplicateResolution));
    assert_eq!(harness.store.list_items(list.id).await.unwrap().len(), 1);

    let replace = harness
        .token_starting_with("dup:replace:0")
        .await
        .expect("replace button for the first pair");
    harness.press(&replace).await.unwrap();

    let items = harness.store.list_items(list.id).await.unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].display_name, "bread");
    assert_eq!(items[0].quantity.as_deref(), Some("2 loaves"));
    assert_eq!(items[1].display_name, "butter");
    assert!(!harness.state.contains(me.id, Slot::DuplicateResolution));
    assert!(!harness.state.contains(me.id, Slot::ReplaceMessageId));
    assert!(harness.state.contains(me.id, Slot::ViewingList));
}

#[tokio::test]
async fn keeping_both_inserts_a_second_entry() {
    let (harness, list) = duplicate_session(Arc::new(MockLanguageModel::new())).await;
    let both = harness.token_starting_with("dup:both:0").await.unwrap();
    harness.press(&both).await.unwrap();

    let items = harness.store.list_items(list.id).await.unwrap();
    let names: Vec<&str> = items.iter().map(|i| i.display_name.as_str()).collect();
    assert_eq!(names, vec!["bread", "bread", "butter"]);
    assert_eq!(items[0].quantity, None);
}

#[tokio::test]
async fn cancelling_duplicates_writes_nothing() {
    let (harness, list) = duplicate_session(Arc::new(MockLanguageModel::new())).await;
    let cancel = harness.token_starting_with("dup:cancel").await.unwrap();
    harness.press(&cancel).await.unwrap();

    let items = harness.store.list_items(list.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, None);
}

#[tokio::test]
async fn low_confidence_text_earns_a_nudge() {
    let model = Arc::new(MockLanguageModel::new());
    model
        .detection("maybe I'll buy a car", ProductListDetection::new(false, 0.35))
        .await;
    let harness = TestHarness::builder()
        .with_model(model.clone())
        .build()
        .await
        .unwrap();

    harness.send_text("maybe I'll buy a car").await.unwrap();

    assert_eq!(harness.last_text().await, text(Locale::En, Msg::LowConfidence));
    let me = user(&harness).await;
    assert!(harness.store.user_lists(me.id).await.unwrap().is_empty());
    assert!(harness.state.active_slots(me.id).iter().all(|s| !s.is_workflow()));
    assert_eq!(model.parse_calls(), 0);
}

#[tokio::test]
async fn stale_duplicate_button_answers_session_expired() {
    let (harness, list) = duplicate_session(Arc::new(MockLanguageModel::new())).await;
    let replace = harness.token_starting_with("dup:replace:0").await.unwrap();
    let prompt = harness.message_with_token(&replace).await;

    harness.send_text("/lists").await.unwrap();
    let me = user(&harness).await;
    assert!(!harness.state.contains(me.id, Slot::DuplicateResolution));

    harness.press_on(&replace, prompt).await.unwrap();

    let items = harness.store.list_items(list.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, None);
    let expired = text(Locale::En, Msg::SessionExpired).to_string();
    match harness.transport.outbound().await.last() {
        Some(Outbound::Answer { notice, .. }) => assert_eq!(notice.as_ref(), Some(&expired)),
        other => panic!("expected a callback answer, got {other:?}"),
    }
}

fn receipt() -> ReceiptData {
    ReceiptData {
        merchant_name: Some("Corner Shop".into()),
        currency: Some("EUR".into()),
        subtotal: 9.0,
        tax: 1.0,
        total: 10.0,
        items: vec![ReceiptItem {
            name: "Milk".into(),
            quantity: 2,
            price: 4.5,
            total_price: 9.0,
            category: None,
        }],
        confidence: 0.97,
        ..ReceiptData::default()
    }
}

#[tokio::test]
async fn receipt_upload_edits_the_placeholder() {
    let harness = TestHarness::builder()
        .with_receipts(MockReceiptAnalyzer::returning(receipt()))
        .build()
        .await
        .unwrap();
    harness.send_text("/receipts").await.unwrap();
    harness.press("receipts:upload").await.unwrap();
    let me = user(&harness).await;
    let prompt = harness
        .state
        .get(me.id, Slot::UploadMessageId)
        .expect("upload prompt tracked");

    harness.send_photo().await.unwrap();

    let page = harness.store.user_receipts(me.id, 0, 10).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.receipts[0].status, ReceiptStatus::Processed);
    assert!(!harness.state.contains(me.id, Slot::AwaitingReceiptUpload));
    assert!(!harness.state.contains(me.id, Slot::UploadMessageId));
    match harness.transport.last_screen().await {
        Some(Outbound::Edit { message, text, .. }) => {
            assert_eq!(message.to_string(), prompt);
            assert!(text.contains("Corner Shop"));
        }
        other => panic!("expected the placeholder to be edited, got {other:?}"),
    }
}

#[tokio::test]
async fn failed_analysis_marks_the_receipt_failed() {
    let harness = TestHarness::builder()
        .with_receipts(MockReceiptAnalyzer::failing())
        .build()
        .await
        .unwrap();
    harness.send_text("/receipts").await.unwrap();
    harness.press("receipts:upload").await.unwrap();

    harness.send_photo().await.unwrap();

    let me = user(&harness).await;
    let page = harness.store.user_receipts(me.id, 0, 10).await.unwrap();
    assert_eq!(page.receipts[0].status, ReceiptStatus::Failed);
    assert_eq!(harness.last_text().await, text(Locale::En, Msg::ReceiptFailed));
}

#[tokio::test]
async fn out_of_range_receipts_page_shows_the_last_page() {
    let harness = TestHarness::builder()
        .with_receipts(MockReceiptAnalyzer::failing())
        .build()
        .await
        .unwrap();
    harness.send_text("/receipts").await.unwrap();
    harness.press("receipts:upload").await.unwrap();
    harness.send_photo().await.unwrap();

    let far = Callback::Receipts(ReceiptsAction::View { page: usize::MAX }).token();
    assert_eq!(far, format!("receipts:view:{}", usize::MAX));
    harness.press(&far).await.unwrap();

    let page = render(Locale::En, Msg::ReceiptsPage, &[("page", "1"), ("pages", "1")]);
    assert_eq!(harness.last_text().await, page);
}

#[tokio::test]
async fn photo_without_upload_gets_a_hint() {
    let harness = TestHarness::builder()
        .with_receipts(MockReceiptAnalyzer::returning(receipt()))
        .build()
        .await
        .unwrap();
    harness.send_photo().await.unwrap();

    let me = user(&harness).await;
    assert_eq!(harness.store.user_receipts(me.id, 0, 10).await.unwrap().total, 0);
    assert_eq!(harness.last_text().await, text(Locale::En, Msg::ReceiptHint));
}

#[tokio::test]
async fn detected_product_list_goes_to_a_new_list() {
    let model = Arc::new(MockLanguageModel::new());
    model
        .product_list(
            "milk, eggs, apples",
            vec![
                ParsedItem::named("milk"),
                ParsedItem::named("eggs"),
                ParsedItem::named("apples"),
            ],
        )
        .await;
    let harness = TestHarness::builder()
        .with_model(model)
        .build()
        .await
        .unwrap();

    harness.send_text("milk, eggs, apples").await.unwrap();
    let me = user(&harness).await;
    assert!(harness.state.contains(me.id, Slot::ProductListSelection));

    harness.press("productlist:create:auto").await.unwrap();

    let list = only_list(&harness).await;
    let date = chrono::Utc::now().format("%d.%m.%Y").to_string();
    assert_eq!(list.name, render(Locale::En, Msg::AutoListName, &[("date", &date)]));
    assert_eq!(harness.store.list_items(list.id).await.unwrap().len(), 3);
    assert!(!harness.state.contains(me.id, Slot::ProductListSelection));
    assert!(!harness.state.contains(me.id, Slot::ProductListMessageId));
}

#[tokio::test]
async fn unknown_users_are_turned_away() {
    let harness = TestHarness::new().await.unwrap();
    harness.send_text_as(4242, "/lists").await.unwrap();
    harness.send_text_as(4242, "milk and bread").await.unwrap();

    let stranger = harness.store.user_by_telegram_id(4242).await.unwrap().unwrap();
    assert!(!stranger.is_authorized);
    assert!(harness.store.user_lists(stranger.id).await.unwrap().is_empty());
    assert_eq!(harness.model.detect_calls(), 0);
}

#[tokio::test]
async fn language_choice_is_remembered() {
    let harness = TestHarness::new().await.unwrap();
    harness.send_text("/start").await.unwrap();
    harness
        .press(&Callback::Menu(MenuAction::Language).token())
        .await
        .unwrap();
    harness
        .press(&Callback::Language(Locale::Uk).token())
        .await
        .unwrap();

    assert_eq!(user(&harness).await.locale, Locale::Uk);
    assert_eq!(harness.last_text().await, text(Locale::Uk, Msg::MainMenu));
}

#[tokio::test]
async fn top_level_navigation_clears_every_workflow_slot() {
    let harness = TestHarness::new().await.unwrap();
    harness.send_text("/start").await.unwrap();
    let me = user(&harness).await;
    for slot in NAVIGATION_SLOTS {
        harness.state.set(me.id, slot, "stale");
    }
    assert!(!harness.state.active_slots(me.id).is_empty());

    harness
        .press(&Callback::Menu(MenuAction::Lists).token())
        .await
        .unwrap();

    let active = harness.state.active_slots(me.id);
    for slot in NAVIGATION_SLOTS {
        assert!(!active.contains(&slot), "{slot} survived navigation");
    }
    assert_eq!(harness.last_text().await, text(Locale::En, Msg::NoLists));
}

#[tokio::test]
async fn toggling_twice_restores_the_item() {
    let harness = TestHarness::new().await.unwrap();
    let list = create_personal_list(&harness, "Groceries").await;
    let milk = add_directly(&harness, &list, &["milk"]).await.remove(0);
    let me = user(&harness).await;
    harness
        .press(&Callback::ViewList(list.id).token())
        .await
        .unwrap();

    harness.press(&toggle(&list, &milk)).await.unwrap();
    let bought = harness.store.list_items(list.id).await.unwrap().remove(0);
    assert!(bought.completed);
    assert_eq!(bought.completed_by, Some(me.id));
    assert!(bought.completed_at.is_some());

    harness.press(&toggle(&list, &milk)).await.unwrap();
    let restored = harness.store.list_items(list.id).await.unwrap().remove(0);
    assert!(!restored.completed);
    assert_eq!(restored.completed_by, None);
    assert_eq!(restored.completed_at, None);
    assert!(harness.state.contains(me.id, Slot::ViewingList));
}

#[tokio::test]
async fn ambiguous_short_list_id_is_not_found() {
    let harness = TestHarness::new().await.unwrap();
    harness.send_text("/start").await.unwrap();
    let me = user(&harness).await;
    let mut twins = Vec::new();
    for (n, name) in [(1u128, "First"), (2, "Second")] {
        let list = ShoppingList {
            id: Uuid::from_u128((0xabcd_ef12_u128 << 96) | n),
            name: name.into(),
            family_id: None,
            owner_id: me.id,
            is_shared: false,
            created_at: Utc::now(),
        };
        twins.push(harness.store.restore_list(list).await);
    }
    assert_eq!(short_id(&twins[0].id), short_id(&twins[1].id));
    let milk = add_directly(&harness, &twins[0], &["milk"]).await.remove(0);

    harness.press_on(&toggle(&twins[0], &milk), None).await.unwrap();

    assert!(!harness.store.list_items(twins[0].id).await.unwrap()[0].completed);
    assert_eq!(harness.last_text().await, text(Locale::En, Msg::NotFound));
}

#[tokio::test]
async fn model_outage_keeps_the_adding_workflow() {
    let model = Arc::new(MockLanguageModel::new());
    let harness = TestHarness::builder()
        .with_model(model.clone())
        .build()
        .await
        .unwrap();
    let list = create_personal_list(&harness, "Groceries").await;
    harness
        .press(&Callback::AddItem(list.id).token())
        .await
        .unwrap();
    model.set_unavailable(true);

    harness.send_text("milk and bread").await.unwrap();

    let me = user(&harness).await;
    assert!(harness.state.contains(me.id, Slot::AddingItemToList));
    assert!(harness.store.list_items(list.id).await.unwrap().is_empty());
    assert_eq!(harness.last_text().await, text(Locale::En, Msg::ServiceUnavailable));
}

#[tokio::test]
async fn family_creator_adds_a_member_who_sees_family_lists() {
    let harness = TestHarness::builder()
        .with_config(config_with(&[DEFAULT_TELEGRAM_ID, 2002], &[]))
        .build()
        .await
        .unwrap();
    harness.send_text_as(2002, "/start").await.unwrap();
    harness.send_text("/createfamily Home").await.unwrap();
    let me = user(&harness).await;
    let family = harness.store.user_families(me.id).await.unwrap().remove(0);

    harness.send_text("/addfamilymember home @user2002").await.unwrap();

    let added = render(
        Locale::En,
        Msg::MemberAdded,
        &[("member", "Tester 2002"), ("family", "Home")],
    );
    assert_eq!(harness.last_text().await, added);
    let welcome = render(
        Locale::En,
        Msg::AddedToFamily,
        &[("admin", "Tester 1001"), ("family", "Home")],
    );
    assert!(sent_to(&harness, 2002).await.contains(&welcome));

    let bob = harness.store.user_by_telegram_id(2002).await.unwrap().unwrap();
    assert!(harness.store.is_family_member(bob.id, family.id).await.unwrap());
    harness
        .store
        .create_list(pantry_core::types::NewList {
            name: "Shared".into(),
            family_id: Some(family.id),
            owner_id: me.id,
        })
        .await
        .unwrap();
    assert_eq!(harness.store.user_lists(bob.id).await.unwrap().len(), 1);

    harness.send_text("/addfamilymember Home 2002").await.unwrap();
    let again = render(
        Locale::En,
        Msg::AlreadyMember,
        &[("member", "Tester 2002"), ("family", "Home")],
    );
    assert_eq!(harness.last_text().await, again);

    harness.send_text_as(2002, "/addfamilymember Home 1001").await.unwrap();
    assert_eq!(
        harness.last_text().await,
        render(Locale::En, Msg::FamilyAdminRequired, &[("name", "Home")])
    );
}

#[tokio::test]
async fn add_family_member_reports_bad_arguments() {
    let harness = TestHarness::new().await.unwrap();
    harness.send_text("/createfamily Home").await.unwrap();

    harness.send_text("/addfamilymember Home").await.unwrap();
    assert_eq!(harness.last_text().await, text(Locale::En, Msg::AddMemberUsage));

    harness.send_text("/addfamilymember Cabin 1001").await.unwrap();
    assert_eq!(
        harness.last_text().await,
        render(Locale::En, Msg::FamilyNotFound, &[("name", "Cabin")])
    );

    harness.send_text("/addfamilymember Home @nobody").await.unwrap();
    assert_eq!(
        harness.last_text().await,
        render(Locale::En, Msg::MemberNotFound, &[("who", "@nobody")])
    );
}

#[tokio::test]
async fn admins_hear_about_new_users_once() {
    let harness = TestHarness::builder()
        .with_config(config_with(&[], &[DEFAULT_TELEGRAM_ID]))
        .build()
        .await
        .unwrap();
    harness.send_text("/start").await.unwrap();
    assert!(sent_to(&harness, DEFAULT_TELEGRAM_ID)
        .await
        .iter()
        .all(|t| !t.starts_with("👤")));

    harness.send_text_as(4242, "hello").await.unwrap();
    harness.send_text_as(4242, "hello again").await.unwrap();

    let notice = render(
        Locale::En,
        Msg::NewUserNotice,
        &[("name", "Tester 4242"), ("username", "user4242"), ("id", "4242")],
    );
    let notices = sent_to(&harness, DEFAULT_TELEGRAM_ID)
        .await
        .into_iter()
        .filter(|t| *t == notice)
        .count();
    assert_eq!(notices, 1);
}

#[tokio::test]
async fn authorized_user_is_told() {
    let harness = TestHarness::builder()
        .with_config(config_with(&[], &[DEFAULT_TELEGRAM_ID]))
        .build()
        .await
        .unwrap();
    harness.send_text("/start").await.unwrap();
    harness.send_text_as(4242, "/start").await.unwrap();

    harness.send_text("/authorize 4242").await.unwrap();

    let stranger = harness.store.user_by_telegram_id(4242).await.unwrap().unwrap();
    assert!(stranger.is_authorized);
    let granted = render(Locale::En, Msg::AuthorizationGranted, &[("name", "Tester 4242")]);
    assert!(sent_to(&harness, 4242).await.contains(&granted));
    assert_eq!(
        harness.last_text().await,
        render(Locale::En, Msg::UserAuthorized, &[("id", "4242")])
    );
}

#[tokio::test]
async fn bought_items_can_be_cleared_and_the_list_deleted() {
    let harness = TestHarness::new().await.unwrap();
    let list = create_personal_list(&harness, "Groceries").await;
    let items = add_directly(&harness, &list, &["milk", "bread"]).await;
    harness
        .press(&Callback::ViewList(list.id).token())
        .await
        .unwrap();
    harness.press(&toggle(&list, &items[0])).await.unwrap();

    harness
        .press(&Callback::ClearCompleted(list.id).token())
        .await
        .unwrap();
    let left = harness.store.list_items(list.id).await.unwrap();
    assert_eq!(left.len(), 1);
    assert_eq!(left[0].display_name, "bread");

    harness
        .press(&Callback::DeleteList(list.id).token())
        .await
        .unwrap();
    assert_eq!(
        harness.last_text().await,
        render(Locale::En, Msg::ConfirmDeleteList, &[("name", "Groceries")])
    );
    harness
        .press(&Callback::ConfirmDeleteList(list.id).token())
        .await
        .unwrap();

    let me = user(&harness).await;
    assert!(harness.store.user_lists(me.id).await.unwrap().is_empty());
    assert!(!harness.state.contains(me.id, Slot::ViewingList));
    let deleted = render(Locale::En, Msg::ListDeleted, &[("name", "Groceries")]);
    match harness.transport.outbound().await.last() {
        Some(Outbound::Answer { notice, .. }) => assert_eq!(notice.as_ref(), Some(&deleted)),
        other => panic!("expected a callback answer, got {other:?}"),
    }
}
