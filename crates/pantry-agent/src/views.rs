// SPDX-FileCopyrightText: 2026 Pantry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message bodies for the larger screens.

use std::fmt::Write as _;

use pantry_core::types::{Family, Locale, Receipt, ReceiptData, ShoppingItem, ShoppingList, User};
use pantry_state::DuplicateSession;

use crate::canonical::{fingerprint, visible_quantity};
use crate::i18n::{Msg, escape, text};

pub fn list_view(locale: Locale, list: &ShoppingList, items: &[ShoppingItem]) -> String {
    let icon = if list.is_shared { "👨‍👩‍👧" } else { "🛒" };
    let mut out = format!("{icon} <b>{}</b>\n\n", escape(&list.name));
    if items.is_empty() {
        out.push_str(text(locale, Msg::EmptyList));
        return out;
    }
    for item in items {
        let mark = if item.completed { "✅" } else { "▫️" };
        let _ = write!(out, "{mark} {}", escape(&item.display_name));
        if let Some(canonical) = item.canonical_name.as_deref() {
            if fingerprint(canonical) != fingerprint(&item.display_name) {
                let _ = write!(out, " ({})", escape(canonical));
            }
        }
        if let Some(quantity) = visible_quantity(item.quantity.as_deref()) {
            let _ = write!(out, " <i>– {}</i>", escape(quantity));
        }
        if let Some(notes) = item.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            let _ = write!(out, " <i>({})</i>", escape(notes));
        }
        out.push('\n');
    }
    let done = items.iter().filter(|i| i.completed).count();
    let _ = write!(out, "\n{done}/{}", items.len());
    out
}

pub fn duplicates(locale: Locale, session: &DuplicateSession) -> String {
    let mut out = text(locale, Msg::DuplicatesFound).to_string();
    out.push_str("\n\n");
    for (i, pair) in session.pairs.iter().enumerate() {
        let mark = if pair.resolved { "✔️" } else { "🔁" };
        let _ = write!(out, "{mark} {}. <b>{}</b>", i + 1, escape(&pair.existing_name));
        if let Some(q) = visible_quantity(pair.existing_quantity.as_deref()) {
            let _ = write!(out, " ({})", escape(q));
        }
        let _ = write!(out, " ← {}", escape(&pair.display_name));
        if let Some(q) = visible_quantity(pair.new_quantity.as_deref()) {
            let _ = write!(out, " ({})", escape(q));
        }
        out.push('\n');
    }
    out
}

pub fn lists_overview(locale: Locale, lists: &[ShoppingList]) -> &'static str {
    if lists.is_empty() {
        text(locale, Msg::NoLists)
    } else {
        text(locale, Msg::ListsOverview)
    }
}

/// Each family with its member and list counts.
pub fn families(locale: Locale, families: &[(Family, usize)]) -> String {
    if families.is_empty() {
        return text(locale, Msg::NoFamilies).to_string();
    }
    let mut out = format!("{}\n\n", text(locale, Msg::FamiliesTitle));
    for (family, lists) in families {
        let _ = writeln!(
            out,
            "• {} 👤 {} 📋 {}",
            escape(&family.name),
            family.members.len(),
            lists
        );
    }
    out
}

pub fn users(locale: Locale, users: &[User]) -> String {
    let mut out = format!("{}\n\n", text(locale, Msg::UsersTitle));
    for user in users {
        let auth = if user.is_authorized { "✅" } else { "⛔" };
        let admin = if user.is_admin { " 👑" } else { "" };
        let _ = writeln!(
            out,
            "{auth} {} <code>{}</code>{admin}",
            escape(&user.display_name()),
            user.telegram_id
        );
    }
    out
}

fn money(amount: f64, currency: Option<&str>) -> String {
    match currency {
        Some(code) => format!("{amount:.2} {code}"),
        None => format!("{amount:.2}"),
    }
}

pub fn receipt_detail(receipt: &Receipt) -> String {
    let Some(data) = receipt.data.as_ref() else {
        return format!("🧾 {} · {}", escape(&receipt.file_name), receipt.status);
    };
    receipt_body(data)
}

fn receipt_body(data: &ReceiptData) -> String {
    let currency = data.currency.as_deref();
    let mut out = format!(
        "🏪 <b>{}</b>\n",
        escape(data.merchant_name.as_deref().unwrap_or("?"))
    );
    if let Some(address) = data.merchant_address.as_deref() {
        let _ = writeln!(out, "📍 {}", escape(address));
    }
    match (data.transaction_date, data.transaction_time) {
        (Some(date), Some(time)) => {
            let _ = writeln!(out, "📅 {} {}", date.format("%d.%m.%Y"), time.format("%H:%M"));
        }
        (Some(date), None) => {
            let _ = writeln!(out, "📅 {}", date.format("%d.%m.%Y"));
        }
        (None, Some(time)) => {
            let _ = writeln!(out, "🕒 {}", time.format("%H:%M"));
        }
        (None, None) => {}
    }
    if !data.items.is_empty() {
        out.push('\n');
        for item in &data.items {
            let _ = writeln!(
                out,
                "• {} × {} = {}",
                escape(&item.name),
                item.quantity,
                money(item.total_price, currency)
            );
        }
        out.push('\n');
    }
    let _ = writeln!(out, "Subtotal: {}", money(data.subtotal, currency));
    let _ = writeln!(out, "Tax: {}", money(data.tax, currency));
    let _ = write!(out, "<b>Total: {}</b>", money(data.total, currency));
    out
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime, Utc};
    use pantry_core::types::{ParsingStatus, ReceiptItem, ReceiptStatus, UserId};
    use uuid::Uuid;

    use super::*;

    fn item(display: &str, canonical: &str, quantity: Option<&str>, completed: bool) -> ShoppingItem {
        ShoppingItem {
            id: Uuid::new_v4(),
            list_id: Uuid::nil(),
            display_name: display.into(),
            canonical_name: Some(canonical.into()),
            quantity: quantity.map(str::to_string),
            category: None,
            completed,
            completed_by: None,
            completed_at: None,
            parsing_status: ParsingStatus::Parsed,
            notes: None,
            added_by: UserId::new(),
            created_at: Utc::now(),
        }
    }

    fn list() -> ShoppingList {
        ShoppingList {
            id: Uuid::nil(),
            name: "Weekly <Groceries>".into(),
            family_id: None,
            owner_id: UserId::new(),
            is_shared: false,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn list_view_shows_canonical_and_quantity() {
        let items = [
            item("two loaves of bread", "bread", Some("2 loaves"), false),
            item("milk", "Milk", Some("0 x"), true),
        ];
        let body = list_view(Locale::En, &list(), &items);
        assert!(body.contains("Weekly &lt;Groceries&gt;"));
        assert!(body.contains("▫️ two loaves of bread (bread) <i>– 2 loaves</i>"));
        assert!(body.contains("✅ milk\n"));
        assert!(body.ends_with("1/2"));
    }

    #[test]
    fn families_show_member_and_list_counts() {
        let owner = UserId::new();
        let home = Family {
            id: Uuid::new_v4(),
            name: "Home & Co".into(),
            members: vec![owner, UserId::new()],
            created_by: owner,
        };
        let body = families(Locale::En, &[(home, 3)]);
        assert!(body.contains("• Home &amp; Co 👤 2 📋 3"));
        assert_eq!(families(Locale::En, &[]), text(Locale::En, Msg::NoFamilies));
    }

    #[test]
    fn empty_list_says_so() {
        let body = list_view(Locale::Uk, &list(), &[]);
        assert!(body.contains("Список порожній"));
    }

    #[test]
    fn receipt_detail_lists_totals() {
        let receipt = Receipt {
            id: Uuid::new_v4(),
            user_id: UserId::new(),
            file_name: "r.jpg".into(),
            content_type: "image/jpeg".into(),
            status: ReceiptStatus::Processed,
            data: Some(ReceiptData {
                merchant_name: Some("Silpo".into()),
                transaction_date: NaiveDate::from_ymd_opt(2024, 12, 31),
                transaction_time: NaiveTime::from_hms_opt(18, 5, 0),
                currency: Some("UAH".into()),
                subtotal: 90.0,
                tax: 10.0,
                total: 100.0,
                items: vec![ReceiptItem {
                    name: "Milk".into(),
                    quantity: 2,
                    price: 45.0,
                    total_price: 90.0,
                    category: None,
                }],
                ..ReceiptData::default()
            }),
            created_at: Utc::now(),
        };
        let body = receipt_detail(&receipt);
        assert!(body.contains("🏪 <b>Silpo</b>"));
        assert!(body.contains("📅 31.12.2024 18:05"));
        assert!(body.contains("• Milk × 2 = 90.00 UAH"));
        assert!(body.ends_with("<b>Total: 100.00 UAH</b>"));
    }
}
