// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inline keyboards. Every button carries a [`Callback`] token.

use pantry_core::types::{Button, Keyboard, Locale, Receipt, ShoppingItem, ShoppingList, short_id};
use pantry_router::{Callback, DupAction, MenuAction, ProductListAction, ReceiptsAction};
use pantry_state::{DuplicateSession, FamilyChoice};
use uuid::Uuid;

use crate::i18n::{Msg, text};

const TOGGLE_LABEL_MAX: usize = 16;

fn button(locale: Locale, msg: Msg, callback: Callback) -> Button {
    Button::new(text(locale, msg), callback.token())
}

fn main_menu_button(locale: Locale) -> Button {
    button(locale, Msg::BtnMainMenu, Callback::Menu(MenuAction::Start))
}

/// Only a way back to the main menu.
pub fn back_to_menu(locale: Locale) -> Keyboard {
    Keyboard::new().row(vec![main_menu_button(locale)])
}

pub fn main_menu(locale: Locale, is_admin: bool) -> Keyboard {
    let mut kb = Keyboard::new()
        .row(vec![
            button(locale, Msg::BtnLists, Callback::Menu(MenuAction::Lists)),
            button(locale, Msg::BtnCreateList, Callback::Menu(MenuAction::CreateList)),
        ])
        .row(vec![
            button(locale, Msg::BtnFamilies, Callback::Menu(MenuAction::Families)),
            button(locale, Msg::BtnReceipts, Callback::Menu(MenuAction::Receipts)),
        ])
        .row(vec![
            button(locale, Msg::BtnLanguage, Callback::Menu(MenuAction::Language)),
            button(locale, Msg::BtnHelp, Callback::Menu(MenuAction::Help)),
        ]);
    if is_admin {
        kb = kb.row(vec![
            Button::new("👥 Users", Callback::Menu(MenuAction::Users).token()),
            Button::new("📈 Stats", Callback::Menu(MenuAction::Stats).token()),
        ]);
    }
    kb
}

pub fn languages() -> Keyboard {
    Keyboard::new().row(vec![
        Button::new("🇬🇧 English", Callback::Language(Locale::En).token()),
        Button::new("🇺🇦 Українська", Callback::Language(Locale::Uk).token()),
        Button::new("🇷🇺 Русский", Callback::Language(Locale::Ru).token()),
    ])
}

/// One button per list, then "new list" and the main menu.
pub fn lists_overview(locale: Locale, lists: &[ShoppingList]) -> Keyboard {
    let buttons = lists
        .iter()
        .map(|list| {
            let icon = if list.is_shared { "👨‍👩‍👧" } else { "👤" };
            Button::new(
                format!("{icon} {}", list.name),
                Callback::ViewList(list.id).token(),
            )
        })
        .collect();
    Keyboard::new()
        .grid(buttons, 1)
        .row(vec![button(locale, Msg::BtnCreateList, Callback::CreateNewList)])
        .row(vec![main_menu_button(locale)])
}

pub fn family_picker(locale: Locale, families: &[FamilyChoice]) -> Keyboard {
    let buttons = families
        .iter()
        .map(|f| Button::new(format!("👨‍👩‍👧 {}", f.name), Callback::CreateListFor(Some(f.id)).token()))
        .collect();
    Keyboard::new()
        .grid(buttons, 1)
        .row(vec![button(locale, Msg::BtnPersonal, Callback::CreateListFor(None))])
        .row(vec![main_menu_button(locale)])
}

/// Shown after a list is created or items were added outside a list view.
pub fn list_actions(locale: Locale, list_id: Uuid) -> Keyboard {
    Keyboard::new()
        .row(vec![
            button(locale, Msg::BtnAddItems, Callback::AddItem(list_id)),
            button(locale, Msg::BtnViewList, Callback::ViewList(list_id)),
        ])
        .row(vec![button(locale, Msg::BtnAllLists, Callback::ShowLists)])
}

fn toggle_label(item: &ShoppingItem) -> String {
    let mark = if item.completed { "✅" } else { "⬜" };
    let name: String = if item.display_name.chars().count() > TOGGLE_LABEL_MAX {
        let cut: String = item.display_name.chars().take(TOGGLE_LABEL_MAX).collect();
        format!("{cut}...")
    } else {
        item.display_name.clone()
    };
    format!("{mark} {name}")
}

/// Toggle buttons two per row, then list actions. "Clear bought" only
/// appears once something is bought.
pub fn list_view(locale: Locale, list: &ShoppingList, items: &[ShoppingItem]) -> Keyboard {
    let list_short = short_id(&list.id);
    let toggles = items
        .iter()
        .map(|item| {
            Button::new(
                toggle_label(item),
                Callback::ToggleItem {
                    list: list_short.clone(),
                    item: short_id(&item.id),
                }
                .token(),
            )
        })
        .collect();
    let mut upkeep = Vec::with_capacity(2);
    if items.iter().any(|item| item.completed) {
        upkeep.push(button(locale, Msg::BtnClearCompleted, Callback::ClearCompleted(list.id)));
    }
    upkeep.push(button(locale, Msg::BtnDeleteList, Callback::DeleteList(list.id)));
    Keyboard::new()
        .grid(toggles, 2)
        .row(vec![button(locale, Msg::BtnAddItems, Callback::AddItem(list.id))])
        .row(upkeep)
        .row(vec![
            button(locale, Msg::BtnAllLists, Callback::ShowLists),
            main_menu_button(locale),
        ])
}

pub fn confirm_delete(locale: Locale, list_id: Uuid) -> Keyboard {
    Keyboard::new().row(vec![
        button(locale, Msg::BtnConfirmDelete, Callback::ConfirmDeleteList(list_id)),
        button(locale, Msg::BtnCancel, Callback::ViewList(list_id)),
    ])
}

/// Back to the list view while waiting for items.
pub fn adding_items(locale: Locale, list_id: Uuid) -> Keyboard {
    Keyboard::new().row(vec![button(locale, Msg::BtnBack, Callback::ViewList(list_id))])
}

/// Per-pair buttons for unresolved pairs only, then the global actions.
pub fn duplicates(locale: Locale, session: &DuplicateSession) -> Keyboard {
    let list = Some(short_id(&session.list_id));
    let dup = |action: DupAction, index: Option<usize>| Callback::Duplicate {
        action,
        index,
        list: list.clone(),
    };
    let mut kb = Keyboard::new();
    for (i, pair) in session.pairs.iter().enumerate() {
        if pair.resolved {
            continue;
        }
        kb = kb.row(vec![
            button(locale, Msg::BtnKeep, dup(DupAction::Keep, Some(i))),
            button(locale, Msg::BtnReplace, dup(DupAction::Replace, Some(i))),
            button(locale, Msg::BtnBoth, dup(DupAction::Both, Some(i))),
        ]);
    }
    kb.row(vec![
        button(locale, Msg::BtnKeepAll, dup(DupAction::KeepAll, None)),
        button(locale, Msg::BtnReplaceAll, dup(DupAction::ReplaceAll, None)),
        button(locale, Msg::BtnCancel, dup(DupAction::Cancel, None)),
    ])
}

/// Target lists for a detected product list.
pub fn product_list_targets(locale: Locale, lists: &[ShoppingList]) -> Keyboard {
    let buttons = lists
        .iter()
        .map(|list| {
            Button::new(
                format!("➕ {}", list.name),
                Callback::ProductList(ProductListAction::AddTo(short_id(&list.id))).token(),
            )
        })
        .collect();
    Keyboard::new()
        .grid(buttons, 1)
        .row(vec![
            button(locale, Msg::BtnCreateAuto, Callback::ProductList(ProductListAction::CreateAuto)),
            button(
                locale,
                Msg::BtnCreateCustom,
                Callback::ProductList(ProductListAction::CreateCustom),
            ),
        ])
        .row(vec![button(locale, Msg::BtnCancel, Callback::ProductList(ProductListAction::Cancel))])
}

pub fn receipts_menu(locale: Locale) -> Keyboard {
    let receipts = |action| Callback::Receipts(action);
    Keyboard::new()
        .row(vec![
            button(locale, Msg::BtnUpload, receipts(ReceiptsAction::Upload)),
            button(locale, Msg::BtnViewReceipts, receipts(ReceiptsAction::View { page: 0 })),
        ])
        .row(vec![
            button(locale, Msg::BtnTaxes, receipts(ReceiptsAction::Taxes)),
            button(locale, Msg::BtnStats, receipts(ReceiptsAction::Stats)),
        ])
        .row(vec![main_menu_button(locale)])
}

pub fn back_to_receipts(locale: Locale) -> Keyboard {
    Keyboard::new().row(vec![button(
        locale,
        Msg::BtnBack,
        Callback::Receipts(ReceiptsAction::Menu),
    )])
}

/// Detail buttons for one page plus paging arrows.
pub fn receipts_page(locale: Locale, receipts: &[Receipt], page: usize, pages: usize) -> Keyboard {
    let buttons = receipts
        .iter()
        .map(|r| {
            let label = match r.data.as_ref() {
                Some(data) => format!(
                    "{} · {:.2}",
                    data.merchant_name.as_deref().unwrap_or("?"),
                    data.total
                ),
                None => format!("{} · {}", r.file_name, r.status),
            };
            Button::new(label, Callback::Receipts(ReceiptsAction::Detail(r.id)).token())
        })
        .collect();

    let mut paging = Vec::new();
    if page > 0 {
        paging.push(button(
            locale,
            Msg::BtnPrev,
            Callback::Receipts(ReceiptsAction::View { page: page - 1 }),
        ));
    }
    if page + 1 < pages {
        paging.push(button(
            locale,
            Msg::BtnNext,
            Callback::Receipts(ReceiptsAction::View { page: page + 1 }),
        ));
    }
    Keyboard::new()
        .grid(buttons, 1)
        .row(paging)
        .row(vec![button(locale, Msg::BtnBack, Callback::Receipts(ReceiptsAction::Menu))])
}

pub fn receipt_detail(locale: Locale) -> Keyboard {
    Keyboard::new().row(vec![button(
        locale,
        Msg::BtnBack,
        Callback::Receipts(ReceiptsAction::View { page: 0 }),
    )])
}
